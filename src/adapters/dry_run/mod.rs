//! Dry-run directory decorator.

mod dry_run_directory;

pub use dry_run_directory::DryRunDirectory;
