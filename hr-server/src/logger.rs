//! Logging Infrastructure
//!
//! Structured logging setup for development (pretty console) and production
//! (JSON console, optional daily rolling files split by target).

use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, filter, fmt};

/// Log sub-directories, one per tracing target family
const APP_DIR: &str = "app";
const AUDIT_DIR: &str = "audit";
const SECURITY_DIR: &str = "security";

/// Application logs older than this are removed by [`periodic_cleanup`]
pub const LOG_RETENTION_DAYS: u64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logger with optional file output
///
/// `RUST_LOG` overrides `log_level`. When `log_dir` is set, records are also
/// written to `app/`, `audit/` and `security/` daily rolling files.
pub fn init_logger_with_file(
    log_level: &str,
    json: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{log_level},tower_http=info,sqlx=warn")))?;

    let console: BoxedLayer = if json {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false)
            .boxed()
    };

    let mut layers = vec![console];
    if let Some(dir) = log_dir {
        layers.extend(file_layers(Path::new(dir))?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;
    Ok(())
}

fn file_layers(dir: &Path) -> anyhow::Result<Vec<BoxedLayer>> {
    for sub in [APP_DIR, AUDIT_DIR, SECURITY_DIR] {
        std::fs::create_dir_all(dir.join(sub))?;
    }

    let app = tracing_appender::rolling::daily(dir.join(APP_DIR), "hr-server.log");
    let audit = tracing_appender::rolling::daily(dir.join(AUDIT_DIR), "audit.log");
    let security = tracing_appender::rolling::daily(dir.join(SECURITY_DIR), "security.log");

    Ok(vec![
        fmt::layer()
            .json()
            .with_writer(app)
            .with_filter(filter::filter_fn(|meta| {
                meta.target() != "audit" && meta.target() != "security"
            }))
            .boxed(),
        fmt::layer()
            .json()
            .with_writer(audit)
            .with_filter(filter::filter_fn(|meta| meta.target() == "audit"))
            .boxed(),
        fmt::layer()
            .json()
            .with_writer(security)
            .with_filter(filter::filter_fn(|meta| meta.target() == "security"))
            .boxed(),
    ])
}

/// Delete application log files older than `days`
///
/// Audit and security logs are retained. Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &str, days: u64) -> std::io::Result<usize> {
    let app_dir = Path::new(log_dir).join(APP_DIR);
    if !app_dir.exists() {
        return Ok(0);
    }

    let max_age = Duration::from_secs(days * 24 * 60 * 60);
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(&app_dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let age = meta
            .modified()
            .ok()
            .and_then(|m| now.duration_since(m).ok())
            .unwrap_or_default();
        if age > max_age {
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Run [`cleanup_old_logs`] every hour for the lifetime of the process
pub fn periodic_cleanup(log_dir: String) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60 * 60));
        loop {
            interval.tick().await;
            match cleanup_old_logs(&log_dir, LOG_RETENTION_DAYS) {
                Ok(0) => {}
                Ok(n) => tracing::info!(removed = n, "Old log files cleaned up"),
                Err(e) => tracing::warn!(error = %e, "Log cleanup failed"),
            }
        }
    })
}
