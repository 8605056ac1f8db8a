//! ikbench - Identifier-Key Performance Test
//!
//! Usage:
//!   ikbench <dsn> [-n <times>] [-p|--pause] [-v|--verbose]
//!
//! One run, strictly sequential:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌────────────┐    ┌──────────┐
//! │ Generate │───▶│ Insert×4 │───▶│ Invalidate │───▶│ Select   │  ×3 key types
//! │ (memory) │    │ (timed)  │    │   caches   │    │(cold/warm)│
//! └──────────┘    └──────────┘    └────────────┘    └──────────┘
//! ```

use ikbench::bench::{DbTester, run_benchmark};
use ikbench::cache::select_invalidator;
use ikbench::config::AppConfig;
use ikbench::dataset::{build_records, sample_indices};
use ikbench::error::BenchError;
use ikbench::generator::IkGenerator;

const DEFAULT_NUM_ENTRIES: usize = 100_000;

const USAGE: &str = "Identifier Key Performance Test.

Usage:
  ikbench <dsn> [-n <times>] [options]

Options:
  -n <times>     Repeat n times [default: 100000] (100k).
  -p, --pause    Pause between query sessions for cleaning database cache.
  -v, --verbose  Verbose mode.";

// ============================================================
// CLI
// ============================================================

struct CliArgs {
    dsn: String,
    num_entries: usize,
    pause_for_cache: bool,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Option<CliArgs> {
    let mut dsn = None;
    let mut num_entries = DEFAULT_NUM_ENTRIES;
    let mut pause_for_cache = false;
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" => {
                i += 1;
                num_entries = args.get(i)?.parse().ok()?;
            }
            "-p" | "--pause" => pause_for_cache = true,
            "-v" | "--verbose" => verbose = true,
            arg if !arg.starts_with('-') && dsn.is_none() => dsn = Some(arg.to_string()),
            _ => return None,
        }
        i += 1;
    }

    Some(CliArgs {
        dsn: dsn?,
        num_entries,
        pause_for_cache,
        verbose,
    })
}

// ============================================================
// MAIN
// ============================================================

async fn run(args: CliArgs) -> Result<(), BenchError> {
    let mut generator = IkGenerator::new()?;
    let records = build_records(&mut generator, args.num_entries)?;
    let sample = sample_indices(args.num_entries, args.num_entries / 10);

    let invalidator = select_invalidator(args.pause_for_cache)?;

    let tester = DbTester::connect(&args.dsn).await?;
    run_benchmark(&tester, invalidator.as_ref(), &records, &sample).await
}

#[tokio::main]
async fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&argv) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let app_config = AppConfig::load("config/ikbench.yaml");
    let _log_guard = ikbench::logging::init_logging(&app_config, args.verbose);

    if let Err(e) = run(args).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(argv: &[&str]) -> Vec<String> {
        argv.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_dsn_only() {
        let args = parse_args(&to_args(&["postgres://iktest@localhost/iktest"])).unwrap();
        assert_eq!(args.dsn, "postgres://iktest@localhost/iktest");
        assert_eq!(args.num_entries, DEFAULT_NUM_ENTRIES);
        assert!(!args.pause_for_cache);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_all_flags() {
        let args = parse_args(&to_args(&[
            "postgres://iktest@localhost/iktest",
            "-n",
            "1000",
            "--pause",
            "-v",
        ]))
        .unwrap();
        assert_eq!(args.num_entries, 1000);
        assert!(args.pause_for_cache);
        assert!(args.verbose);
    }

    #[test]
    fn test_parse_missing_dsn_is_rejected() {
        assert!(parse_args(&to_args(&["-n", "1000"])).is_none());
    }

    #[test]
    fn test_parse_bad_repeat_count_is_rejected() {
        assert!(parse_args(&to_args(&["dsn", "-n", "lots"])).is_none());
    }

    #[test]
    fn test_parse_unknown_flag_is_rejected() {
        assert!(parse_args(&to_args(&["dsn", "--frobnicate"])).is_none());
    }
}
