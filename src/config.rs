//! Command-line configuration
//!
//! ```text
//! forktty [--interval <ms>] [--snapshot-limit <bytes>] [--log <file>] <file.c>
//! ```

use crate::errors::{SimError, SimResult};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Delay between ticks while auto-playing
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Memory budget for tick history (64 MiB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;

/// Environment variable holding the tracing filter (e.g. `forktty=debug`)
pub const LOG_FILTER_ENV: &str = "FORKTTY_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source_path: PathBuf,
    pub tick_interval: Duration,
    pub snapshot_limit: usize,
    /// Write tracing output here; no logging when unset
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Parse arguments (without the program name)
    pub fn from_args<I>(args: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut source_path = None;
        let mut tick_interval = DEFAULT_TICK_INTERVAL;
        let mut snapshot_limit = DEFAULT_SNAPSHOT_LIMIT;
        let mut log_file = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--interval" => {
                    let ms: u64 = parse_value(&arg, args.next())?;
                    if ms == 0 {
                        return Err(SimError::InvalidArgument(
                            "--interval must be at least 1 ms".to_string(),
                        ));
                    }
                    tick_interval = Duration::from_millis(ms);
                }
                "--snapshot-limit" => snapshot_limit = parse_value(&arg, args.next())?,
                "--log" => {
                    let path = args.next().ok_or_else(|| missing_value(&arg))?;
                    log_file = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => {
                    return Err(SimError::InvalidArgument(format!("unknown flag '{}'", flag)));
                }
                _ if source_path.is_some() => {
                    return Err(SimError::InvalidArgument(format!(
                        "unexpected extra argument '{}'",
                        arg
                    )));
                }
                _ => source_path = Some(PathBuf::from(&arg)),
            }
        }

        Ok(Config {
            source_path: source_path.ok_or(SimError::MissingSource)?,
            tick_interval,
            snapshot_limit,
            log_file,
        })
    }

    /// Read the program to simulate
    pub fn load_source(&self) -> SimResult<String> {
        if !self.source_path.exists() {
            return Err(SimError::SourceNotFound(self.source_path.clone()));
        }
        Ok(fs::read_to_string(&self.source_path)?)
    }
}

fn missing_value(flag: &str) -> SimError {
    SimError::InvalidArgument(format!("{} expects a value", flag))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> SimResult<T> {
    let value = value.ok_or_else(|| missing_value(flag))?;
    value
        .parse()
        .map_err(|_| SimError::InvalidArgument(format!("bad value '{}' for {}", value, flag)))
}

/// Usage text for `program`
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--interval <ms>] [--snapshot-limit <bytes>] [--log <file>] <file.c>\n\
         \n\
         Examples:\n  \
         {program} demos/single_fork.c     # One fork, parent and child print\n  \
         {program} demos/fork_tree.c       # Nested forks with getpid()/getppid()\n\
         \n\
         Set {LOG_FILTER_ENV}=debug together with --log to trace forks and exits."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(args(&["prog.c"])).unwrap();
        assert_eq!(config.source_path, PathBuf::from("prog.c"));
        assert_eq!(config.tick_interval, DEFAULT_TICK_INTERVAL);
        assert_eq!(config.snapshot_limit, DEFAULT_SNAPSHOT_LIMIT);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_all_flags() {
        let config = Config::from_args(args(&[
            "--interval",
            "250",
            "--snapshot-limit",
            "4096",
            "--log",
            "sim.log",
            "prog.c",
        ]))
        .unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.snapshot_limit, 4096);
        assert_eq!(config.log_file, Some(PathBuf::from("sim.log")));
    }

    #[test]
    fn test_missing_source() {
        assert!(matches!(
            Config::from_args(args(&["--interval", "10"])),
            Err(SimError::MissingSource)
        ));
    }

    #[test]
    fn test_bad_values() {
        for bad in [
            &["--interval", "soon", "a.c"][..],
            &["--interval", "0", "a.c"][..],
            &["a.c", "--log"][..],
            &["--verbose", "a.c"][..],
            &["a.c", "b.c"][..],
        ] {
            assert!(
                matches!(Config::from_args(args(bad)), Err(SimError::InvalidArgument(_))),
                "expected InvalidArgument for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_load_missing_file() {
        let config = Config::from_args(args(&["/definitely/not/here.c"])).unwrap();
        assert!(matches!(config.load_source(), Err(SimError::SourceNotFound(_))));
    }
}
