//! RTOS task-table generator.
//!
//! Reads a declarative task-descriptor document and emits two artifacts
//! for the firmware build: a fixed interface header (priority and
//! stack-size constants, result-code enumeration, bootstrap declaration)
//! and a generated source containing the ordered task-registration table
//! plus the fail-fast `CreateAllTasks()` bootstrap routine.
//!
//! Pipeline: parse args → load descriptors → render both artifacts in
//! memory → write both files. Any validation failure aborts before
//! anything is written, so output is all-or-nothing.

mod cli;
mod config;
mod emit;
mod error;
mod loader;
mod model;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let cfg = config::GenConfig {
        max_priorities: cli.max_priorities,
        minimal_stack_size: cli.minimal_stack_size,
        namespace: cli.namespace.clone(),
    };

    if !cli.quiet {
        println!("Loading {}...", cli.tasks_file.display());
    }
    let document = std::fs::read_to_string(&cli.tasks_file)
        .with_context(|| format!("Failed to read {}", cli.tasks_file.display()))?;
    let tasks = loader::parse(&document)
        .with_context(|| format!("Failed to load {}", cli.tasks_file.display()))?;

    let Some(header_name) = cli.header_out.file_name() else {
        bail!("header output path {} has no file name", cli.header_out.display());
    };
    let header_name = header_name.to_string_lossy();

    // Render both artifacts before touching the filesystem.
    let header = emit::emit_interface(&cfg)?;
    let source = emit::emit_table(&cfg, &tasks, &header_name)?;

    write_artifact(&cli.header_out, &header)?;
    write_artifact(&cli.source_out, &source)?;

    if !cli.quiet {
        println!("  -> {}", cli.header_out.display());
        println!("  -> {}", cli.source_out.display());
        println!("Generated table for {} task(s).", tasks.len());
    }
    Ok(())
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
