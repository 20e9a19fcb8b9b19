//! Command-line interface definitions for taskgen.

use clap::Parser;
use std::path::PathBuf;

/// Task-registration table generator.
///
/// Compiles a TOML task-descriptor document into the scheduler interface
/// header and the table/bootstrap source compiled into the firmware.
#[derive(Parser)]
#[command(name = "taskgen", version, about)]
pub struct Cli {
    /// Path to the task descriptor document (TOML).
    pub tasks_file: PathBuf,

    /// Output path for the interface header.
    pub header_out: PathBuf,

    /// Output path for the generated table/bootstrap source.
    pub source_out: PathBuf,

    /// Scheduler priority ceiling (configMAX_PRIORITIES).
    #[arg(long, default_value_t = 5)]
    pub max_priorities: u32,

    /// Stack base unit (configMINIMAL_STACK_SIZE), in the scheduler's
    /// native stack units.
    #[arg(long, default_value_t = 360)]
    pub minimal_stack_size: u32,

    /// C++ namespace both artifacts are placed in.
    #[arg(long, default_value = "firmware")]
    pub namespace: String,

    /// Suppress progress output; show only errors.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
