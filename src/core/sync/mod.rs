mod coordinator;
pub mod diagnostics;
pub mod diff;

pub use coordinator::{SyncCoordinator, SyncPhase};
pub use diagnostics::{Diagnostics, SyncDiagnostic};
