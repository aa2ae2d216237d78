//! Tracing setup for the binary.

use std::path::PathBuf;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "STATECRAFT_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Nothing is logged; the shell owns stdout and stderr.
    Off,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `--verbose` wins over `STATECRAFT_LOG`; neither means off.
    pub fn resolve(verbose: bool, log_env: Option<String>) -> Self {
        match (verbose, log_env) {
            (true, _) => LogTarget::Stderr,
            (false, Some(base)) if !base.is_empty() => {
                LogTarget::File(unique_log_path(&base, unix_seconds(), std::process::id()))
            }
            _ => LogTarget::Off,
        }
    }
}

/// `{base}.{timestamp}.{pid}`, so concurrent sessions never share a file.
pub fn unique_log_path(base: &str, timestamp: u64, pid: u32) -> PathBuf {
    PathBuf::from(format!("{base}.{timestamp}.{pid}"))
}

fn unix_seconds() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Install the global subscriber for `target`. `RUST_LOG` overrides the
/// default level (`debug` on stderr, `info` in a file).
pub fn init_tracing(target: &LogTarget) {
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_timer(UtcTime::rfc_3339())
                        .with_target(true),
                )
                .init();
        }
        LogTarget::File(path) => {
            let file = match std::fs::File::create(path) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("Warning: cannot create log file {}: {err}", path.display());
                    return;
                }
            };
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_logs_to_stderr_even_with_file_set() {
        assert_eq!(
            LogTarget::resolve(true, Some("/tmp/log".into())),
            LogTarget::Stderr
        );
    }

    #[test]
    fn no_flag_and_no_env_is_off() {
        assert_eq!(LogTarget::resolve(false, None), LogTarget::Off);
        assert_eq!(LogTarget::resolve(false, Some(String::new())), LogTarget::Off);
    }

    #[test]
    fn file_target_gets_unique_suffix() {
        assert_eq!(
            unique_log_path("/tmp/statecraft.log", 1700000000, 42),
            PathBuf::from("/tmp/statecraft.log.1700000000.42")
        );
        match LogTarget::resolve(false, Some("/tmp/statecraft.log".into())) {
            LogTarget::File(path) => {
                let name = path.to_string_lossy().into_owned();
                assert!(name.starts_with("/tmp/statecraft.log."));
                assert!(name.ends_with(&format!(".{}", std::process::id())));
            }
            other => panic!("expected a file target, got {other:?}"),
        }
    }
}
