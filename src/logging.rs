//! Logger setup for the binary
//!
//! The TUI draws on the terminal, so log records either go to a file or are
//! dropped unless `RUST_LOG` asks for them.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::path::Path;

/// Install the global logger. Fails if one is already installed.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .format_timestamp_millis()
                .try_init()
                .context("Failed to install logger")?;
        }
        None => {
            Builder::from_env(Env::default().default_filter_or("off"))
                .try_init()
                .context("Failed to install logger")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logger_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.log");

        assert!(init(Some(path.as_path())).is_ok());
        assert!(path.exists());

        // the global logger can only be set once per process
        assert!(init(None).is_err());
    }

    #[test]
    fn test_unwritable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("snake.log");

        let err = init(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
