use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Size limits for the `--log-file` target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogRetention {
    /// Trim once the file grows past this many bytes
    max_bytes: u64,
    /// Approximate number of trailing bytes kept after a trim
    keep_bytes: u64,
}

impl LogRetention {
    const DEFAULT: Self = Self {
        max_bytes: 5 * 1024 * 1024,
        keep_bytes: 1024 * 1024,
    };

    /// Drop the oldest entries of the log at `path` if it is over the limit.
    ///
    /// The kept tail starts on a line boundary. Returns the number of bytes
    /// removed; a missing file counts as nothing to trim.
    fn trim(&self, path: &Path) -> io::Result<usize> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };
        if contents.len() as u64 <= self.max_bytes {
            return Ok(0);
        }

        let cut = contents.len().saturating_sub(self.keep_bytes as usize);
        let line_start = if cut == 0 || contents[cut - 1] == b'\n' {
            cut
        } else {
            contents[cut..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(contents.len(), |i| cut + i + 1)
        };

        let mut trimmed =
            format!("# finsim: trimmed {line_start} bytes of older entries\n").into_bytes();
        trimmed.extend_from_slice(&contents[line_start..]);
        fs::write(path, trimmed)?;
        Ok(line_start)
    }
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("finsim={level},finsim_core=warn")
}

/// Initialize logging.
///
/// Without `log_file`, events go to stderr so they never mix with report
/// output on stdout. With `log_file`, events are appended to that file
/// without ANSI colours; the file is cut back to its last 1MB once it
/// exceeds 5MB.
/// `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    match log_file {
        Some(log_path) => {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let trimmed = LogRetention::DEFAULT.trim(log_path);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();

            tracing::info!(log_path = %log_path.display(), "Logging initialized");
            match trimmed {
                Ok(0) => {}
                Ok(bytes) => tracing::debug!(bytes, "Trimmed old log entries"),
                Err(e) => tracing::warn!(error = %e, "Could not trim log file"),
            }
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "finsim=debug,finsim_core=warn");
    }

    fn retention(max_bytes: u64, keep_bytes: u64) -> LogRetention {
        LogRetention {
            max_bytes,
            keep_bytes,
        }
    }

    fn numbered_lines(count: usize) -> String {
        // 9 bytes per line
        (0..count).map(|i| format!("line {i:03}\n")).collect()
    }

    #[test]
    fn test_small_log_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finsim.log");
        fs::write(&path, "one\ntwo\n").unwrap();

        assert_eq!(retention(1024, 16).trim(&path).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_trim_mid_line_skips_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finsim.log");
        fs::write(&path, numbered_lines(100)).unwrap();

        // 900 bytes; keeping 20 cuts inside "line 097"
        assert_eq!(retention(100, 20).trim(&path).unwrap(), 882);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# finsim: trimmed 882 bytes of older entries\nline 098\nline 099\n"
        );
    }

    #[test]
    fn test_trim_on_line_boundary_keeps_that_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finsim.log");
        fs::write(&path, numbered_lines(100)).unwrap();

        assert_eq!(retention(100, 18).trim(&path).unwrap(), 882);
        let kept = fs::read_to_string(&path).unwrap();
        assert!(kept.ends_with("\nline 098\nline 099\n"), "kept {kept:?}");
    }

    #[test]
    fn test_missing_log_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            LogRetention::DEFAULT
                .trim(&dir.path().join("absent.log"))
                .unwrap(),
            0
        );
    }
}
