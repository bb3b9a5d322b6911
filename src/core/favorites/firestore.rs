use crate::app::config::FirestoreConfig;
use crate::core::favorites::remote::{RemoteError, RemoteFavoritesRepository};
use crate::core::favorites::{FavoriteId, FavoritesSet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use firestore::errors::FirestoreError;
use firestore::{path, FirestoreDb, FirestoreDbOptions};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub async fn create_client(config: &FirestoreConfig) -> Result<FirestoreDb, anyhow::Error> {
    let mut options = FirestoreDbOptions::new(config.project_id.clone());

    if let Some(db_id) = &config.database_id {
        options = options.with_database_id(db_id.clone());
    }

    if let Some(host) = &config.emulator_host {
        options = options.with_firebase_api_url(format!("http://{}", host));
    }

    let db = if let Some(path) = &config.credentials_path {
        FirestoreDb::with_options_service_account_key_file(options, path.clone()).await?
    } else {
        FirestoreDb::with_options(options).await?
    };

    Ok(db)
}

/// Document shape stored per favorite. The document id is
/// `{identity}:{product}`, which is what makes a duplicate insert a
/// conflict instead of a second record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FavoriteDoc {
    uid: String,
    product: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    ts: DateTime<Utc>,
}

/// Firestore-backed favorites table, one document per
/// (identity, product) pair in a single collection.
pub struct FirestoreFavorites {
    db: Arc<FirestoreDb>,
    collection: String,
}

impl FirestoreFavorites {
    pub fn new(db: Arc<FirestoreDb>, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }

    fn doc_id(identity: &str, id: &FavoriteId) -> String {
        format!("{}:{}", identity, id)
    }

    fn classify(err: &FirestoreError) -> RemoteError {
        if let FirestoreError::DatabaseError(db_err) = err {
            let code = db_err.public.code.as_str();
            if code.eq_ignore_ascii_case("unauthenticated")
                || code.eq_ignore_ascii_case("permissiondenied")
            {
                return RemoteError::Auth(err.to_string());
            }
        }

        RemoteError::Connectivity(err.to_string())
    }

    async fn insert_one(&self, identity: &str, id: &FavoriteId) -> Result<(), RemoteError> {
        let doc = FavoriteDoc {
            uid: identity.to_string(),
            product: id.as_str().to_string(),
            ts: Utc::now(),
        };

        let result = self
            .db
            .fluent()
            .insert()
            .into(self.collection.as_str())
            .document_id(Self::doc_id(identity, id))
            .object(&doc)
            .execute::<FavoriteDoc>()
            .await;

        match result {
            Ok(_) => Ok(()),
            // the record already exists; the uniqueness constraint holds
            Err(FirestoreError::DataConflictError(_)) => Ok(()),
            Err(err) => {
                error!("Favorite insert failed for {}:{}: {}", identity, id, err);
                Err(Self::classify(&err))
            }
        }
    }

    async fn delete_one(&self, identity: &str, id: &FavoriteId) -> Result<(), RemoteError> {
        let result = self
            .db
            .fluent()
            .delete()
            .from(self.collection.as_str())
            .document_id(Self::doc_id(identity, id))
            .execute()
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(FirestoreError::DataNotFoundError(_)) => Ok(()),
            Err(err) => {
                error!("Favorite delete failed for {}:{}: {}", identity, id, err);
                Err(Self::classify(&err))
            }
        }
    }

    /// Auth failures dominate: they reset the whole session, so they
    /// must not be masked by a transient error on a sibling record.
    fn merge_results(results: Vec<Result<(), RemoteError>>) -> Result<(), RemoteError> {
        let mut first: Option<RemoteError> = None;

        for result in results {
            if let Err(err) = result {
                if err.is_auth() {
                    return Err(err);
                }
                first.get_or_insert(err);
            }
        }

        match first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteFavoritesRepository for FirestoreFavorites {
    async fn fetch_all(&self, identity: &str) -> Result<FavoritesSet, RemoteError> {
        let docs = self
            .db
            .fluent()
            .select()
            .from(self.collection.as_str())
            .filter(|q| q.for_all([q.field(path!(FavoriteDoc::uid)).eq(identity)]))
            .query()
            .await
            .map_err(|e| {
                error!(
                    "Favorites query failed for collection {}: {}",
                    self.collection, e
                );
                Self::classify(&e)
            })?;

        let mut favorites = FavoritesSet::new();
        for doc in docs {
            match FirestoreDb::deserialize_doc_to::<FavoriteDoc>(&doc) {
                Ok(fav) => {
                    favorites.insert(FavoriteId::new(fav.product));
                }
                Err(err) => {
                    warn!("Skipping undecodable favorite document {}: {}", doc.name, err);
                }
            }
        }

        debug!(
            "Fetched {} favorites for identity {} from {}",
            favorites.len(),
            identity,
            self.collection
        );
        Ok(favorites)
    }

    async fn insert_many(&self, identity: &str, ids: &[FavoriteId]) -> Result<(), RemoteError> {
        if ids.is_empty() {
            return Ok(());
        }

        let results = join_all(ids.iter().map(|id| self.insert_one(identity, id))).await;
        Self::merge_results(results)
    }

    async fn delete_many(&self, identity: &str, ids: &[FavoriteId]) -> Result<(), RemoteError> {
        if ids.is_empty() {
            return Ok(());
        }

        let results = join_all(ids.iter().map(|id| self.delete_one(identity, id))).await;
        Self::merge_results(results)
    }
}
