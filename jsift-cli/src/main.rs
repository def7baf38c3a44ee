//! jsift CLI - filter or deduplicate JSON arrays inside larger documents
//!
//! This binary provides command-line interfaces for:
//! - run: process one source document from discrete options
//! - batch: process every job in a JSON batch descriptor
//!
//! Every option can also be supplied through a `JSIFT_*` environment
//! variable, so the tool drops into CI pipelines without argument plumbing.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use jsift_io::{load_batch, run_batch_with, BatchSummary, JobError, JobEvent, RawJobOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "jsift")]
#[command(about = "Deduplicate or filter a JSON array addressed by a path expression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter one document from discrete options
    ///
    /// Examples:
    ///   jsift run --source-file users.json --target-path out \
    ///       --mode unique --json-path '$.data.users[*]' --json-fields id,name
    Run {
        #[command(flatten)]
        options: JobArgs,
        /// Show a progress spinner while the job runs
        #[arg(long)]
        progress: bool,
    },
    /// Run every job in a JSON batch descriptor, sequentially
    ///
    /// The descriptor is a JSON array of job objects with the same field
    /// names as the run options (sourceFile, targetPath, targetFile, mode,
    /// jsonPath, jsonFields). Fields a job omits fall back to the options
    /// given here. Without a descriptor a single fallback-sourced job runs.
    Batch {
        /// Batch descriptor file
        #[arg(env = "JSIFT_BATCH")]
        descriptor: Option<PathBuf>,
        #[command(flatten)]
        options: JobArgs,
        /// Show a progress spinner while jobs run
        #[arg(long)]
        progress: bool,
    },
}

/// One job's options; every field may come from a flag or the environment.
#[derive(Args)]
struct JobArgs {
    /// Source JSON document
    #[arg(long, env = "JSIFT_SOURCE_FILE")]
    source_file: Option<String>,
    /// Directory the rewritten document is stored in
    #[arg(long, env = "JSIFT_TARGET_PATH")]
    target_path: Option<String>,
    /// Target file name (defaults to the source file's base name)
    #[arg(long, env = "JSIFT_TARGET_FILE")]
    target_file: Option<String>,
    /// Filter mode: 'unique' keeps the first occurrence of every duplicate
    /// group, 'distinct' keeps only the repeats
    #[arg(long, env = "JSIFT_MODE")]
    mode: Option<String>,
    /// Path expression addressing the array to filter, e.g. '$.data.users[*]'
    #[arg(long, env = "JSIFT_JSON_PATH")]
    json_path: Option<String>,
    /// Comma-separated comparison field keys, e.g. 'id,name'
    #[arg(long, env = "JSIFT_JSON_FIELDS")]
    json_fields: Option<String>,
}

impl JobArgs {
    fn into_raw(self) -> RawJobOptions {
        RawJobOptions {
            source_file: self.source_file,
            target_path: self.target_path,
            target_file: self.target_file,
            mode: self.mode,
            json_path: self.json_path,
            json_fields: self.json_fields,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { options, progress } => execute(None, options.into_raw(), progress),
        Commands::Batch {
            descriptor,
            options,
            progress,
        } => execute(descriptor, options.into_raw(), progress),
    };

    match result {
        Ok(summary) => {
            // Machine-readable aggregate outcome; human reporting goes to stderr
            println!("changed={}", summary.changed);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Cannot process JSON data: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(
    descriptor: Option<PathBuf>,
    fallback: RawJobOptions,
    show_progress: bool,
) -> Result<BatchSummary, JobError> {
    let jobs = match &descriptor {
        Some(path) => load_batch(path)?,
        None => Vec::new(),
    };

    let mut spinner: Option<ProgressBar> = None;
    run_batch_with(jobs, &fallback, |event| match event {
        JobEvent::Started(options) => {
            let message = format!(
                "Processing source JSON file: {} with mode: {}, path: {}, fields: {}",
                options.source_file.display(),
                options.mode,
                options.path,
                options.fields.join(",")
            );
            if show_progress {
                spinner = Some(create_spinner(&message));
            } else {
                eprintln!("{message}");
            }
        }
        JobEvent::Finished(job) => {
            let message = format!(
                "Stored JSON data to target file: {} (records: {} of {}, removed: {})",
                job.target.display(),
                job.records_kept,
                job.records_in,
                job.records_removed
            );
            match spinner.take() {
                Some(pb) => pb.finish_with_message(message),
                None => eprintln!("{message}"),
            }
        }
    })
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
