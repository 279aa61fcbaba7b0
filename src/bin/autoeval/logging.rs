use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::{ConfigPaths, LoggingConfig};

/// Starts file logging. `level_override` comes from `--log-level`.
///
/// The returned handle must stay alive for file output to be flushed.
pub fn init_logging(
    config: &LoggingConfig,
    paths: &ConfigPaths,
    level_override: Option<&str>,
) -> anyhow::Result<LoggerHandle> {
    let log_path = config
        .path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.logs_dir.join("autoeval.log"));
    let (directory, basename) = split_log_path(&log_path, &paths.logs_dir);
    let level = level_override.unwrap_or(&config.level);
    let duplicate = if config.duplicate_warnings {
        Duplicate::Warn
    } else {
        Duplicate::None
    };

    let handle = Logger::try_with_env_or_str(level)?
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .duplicate_to_stderr(duplicate)
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}

fn split_log_path(log_path: &Path, fallback_dir: &Path) -> (PathBuf, String) {
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => fallback_dir.to_path_buf(),
    };
    let basename = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("autoeval")
        .to_string();
    (directory, basename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_path_keeps_its_directory() {
        let (dir, name) = split_log_path(Path::new("/var/log/eval/run.log"), Path::new("/logs"));
        assert_eq!(dir, PathBuf::from("/var/log/eval"));
        assert_eq!(name, "run");
    }

    #[test]
    fn bare_file_name_uses_logs_dir() {
        let (dir, name) = split_log_path(Path::new("eval.log"), Path::new("/logs"));
        assert_eq!(dir, PathBuf::from("/logs"));
        assert_eq!(name, "eval");
    }
}
