use crate::app::config::{FileRotation, LogSink, LoggingConfig};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

type DynLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync + 'static>;

struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

pub fn init(config: &LoggingConfig) -> Result<()> {
    config.validate()?;

    let crate_name = env!("CARGO_PKG_NAME");
    let filter = EnvFilter::from_default_env()
        .add_directive("error".parse()?)
        .add_directive(format!("{}={}", crate_name, config.level).parse()?);

    let mut layers: Vec<DynLayer> = Vec::new();

    for sink in &config.sinks {
        match sink {
            LogSink::Stdout { color, json } => {
                let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());
                std::mem::forget(_guard);

                if *json {
                    layers.push(fmt::layer().json().with_writer(non_blocking).boxed());
                } else {
                    layers.push(
                        fmt::layer()
                            .compact()
                            .with_timer(CompactTime)
                            .with_ansi(*color)
                            .with_writer(non_blocking)
                            .boxed(),
                    );
                }
            }
            LogSink::File {
                path,
                json,
                rotation,
            } => {
                let writer = create_file_writer(path, rotation)?;

                if *json {
                    layers.push(fmt::layer().json().with_writer(writer).boxed());
                } else {
                    layers.push(
                        fmt::layer()
                            .compact()
                            .with_timer(CompactTime)
                            .with_ansi(false)
                            .with_writer(writer)
                            .boxed(),
                    );
                }
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(())
}

fn create_file_writer(
    path: &Path,
    rotation: &FileRotation,
) -> Result<tracing_appender::non_blocking::NonBlocking> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file name in path: {}", path.display()))?;

    let directory = path
        .parent()
        .ok_or_else(|| anyhow!("Invalid directory in path: {}", path.display()))?;

    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory)
            .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    }

    let file_appender = match rotation {
        FileRotation::Daily => tracing_appender::rolling::daily(directory, file_name),
        FileRotation::Hourly => tracing_appender::rolling::hourly(directory, file_name),
        FileRotation::Never => tracing_appender::rolling::never(directory, file_name),
    };

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    std::mem::forget(_guard);

    Ok(non_blocking)
}
