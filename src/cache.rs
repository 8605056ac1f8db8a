//! Cache Controller - OS/database cache invalidation strategies
//!
//! Cold lookups are only meaningful if the invalidation is total, so the
//! automatic strategy restarts the database service around dropping the OS
//! page cache. The interactive strategy delegates the whole job to a human
//! operator for environments where the harness lacks the privileges.

use crate::error::BenchError;
use std::io::{BufRead, Write};
use std::process::Command;

/// Invalidation strategy. The benchmark runner only sees this trait and
/// stays free of platform knowledge.
pub trait CacheInvalidator {
    fn invalidate(&self) -> Result<(), BenchError>;
}

/// Prints an instruction and blocks until the operator confirms the caches
/// were cleared out-of-band.
pub struct InteractiveInvalidator;

impl CacheInvalidator for InteractiveInvalidator {
    fn invalidate(&self) -> Result<(), BenchError> {
        print!("NOTE: Please clear PostgreSQL cache, and press ENTER when done...");
        std::io::stdout().flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

/// Runs a per-OS command sequence: stop the database service, flush
/// filesystem buffers, drop the OS page cache, restart the service.
///
/// Commands run synchronously via `/bin/sh -c`; the first nonzero exit
/// aborts with no partial-clear recovery. Requires elevated privileges.
pub struct ShellInvalidator {
    commands: Vec<String>,
}

impl ShellInvalidator {
    pub fn for_current_os() -> Result<Self, BenchError> {
        Self::for_os(std::env::consts::OS)
    }

    pub fn for_os(os: &str) -> Result<Self, BenchError> {
        let commands: &[&str] = match os {
            "linux" => &[
                "service postgresql stop",
                "sync",
                "echo 3 > /proc/sys/vm/drop_caches",
                "service postgresql start",
            ],
            "macos" => &[
                "pg_ctl -D /usr/local/var/postgres stop",
                "sync",
                "sudo purge",
                "pg_ctl -D /usr/local/var/postgres start",
            ],
            other => return Err(BenchError::UnsupportedPlatform(other.to_string())),
        };
        Ok(Self {
            commands: commands.iter().map(|c| c.to_string()).collect(),
        })
    }

    #[cfg(test)]
    fn with_commands(commands: &[&str]) -> Self {
        Self {
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CacheInvalidator for ShellInvalidator {
    fn invalidate(&self) -> Result<(), BenchError> {
        tracing::debug!("Clearing PostgreSQL cache and restarting...");
        for command in &self.commands {
            tracing::debug!("{}", command);
            let status = Command::new("/bin/sh").arg("-c").arg(command).status()?;
            if !status.success() {
                return Err(BenchError::CacheCommand {
                    command: command.clone(),
                    status,
                });
            }
        }
        Ok(())
    }
}

/// Pick the strategy for this run: interactive when `--pause` was given,
/// otherwise the shell sequence for the current OS.
pub fn select_invalidator(pause_for_cache: bool) -> Result<Box<dyn CacheInvalidator>, BenchError> {
    if pause_for_cache {
        Ok(Box::new(InteractiveInvalidator))
    } else {
        Ok(Box::new(ShellInvalidator::for_current_os()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_command_sequence() {
        let invalidator = ShellInvalidator::for_os("linux").unwrap();
        assert_eq!(invalidator.commands.len(), 4);
        assert_eq!(invalidator.commands[0], "service postgresql stop");
        assert_eq!(invalidator.commands[2], "echo 3 > /proc/sys/vm/drop_caches");
        assert_eq!(invalidator.commands[3], "service postgresql start");
    }

    #[test]
    fn test_macos_command_sequence() {
        let invalidator = ShellInvalidator::for_os("macos").unwrap();
        assert_eq!(invalidator.commands.len(), 4);
        assert_eq!(invalidator.commands[2], "sudo purge");
    }

    #[test]
    fn test_unsupported_platform_is_an_error() {
        let result = ShellInvalidator::for_os("windows");
        assert!(matches!(result, Err(BenchError::UnsupportedPlatform(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_invalidate_runs_all_commands_in_order() {
        let marker = format!("target/test_cache_marker_{}", std::process::id());
        let touch = format!("touch {marker}");
        let invalidator = ShellInvalidator::with_commands(&["true", touch.as_str()]);
        invalidator.invalidate().unwrap();
        assert!(std::path::Path::new(&marker).exists());
        std::fs::remove_file(&marker).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_invalidate_stops_at_first_failing_command() {
        let marker = format!("target/test_cache_abort_{}", std::process::id());
        let touch = format!("touch {marker}");
        let invalidator = ShellInvalidator::with_commands(&["false", touch.as_str()]);
        let result = invalidator.invalidate();
        assert!(matches!(result, Err(BenchError::CacheCommand { .. })));
        assert!(
            !std::path::Path::new(&marker).exists(),
            "commands after a failure must not run"
        );
    }
}
