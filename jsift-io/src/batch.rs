//! Strictly sequential batch execution

use crate::error::Result;
use crate::job::{run_job, JobSummary};
use crate::options::{JobOptions, RawJobOptions};

/// Progress notification emitted while a batch runs.
#[derive(Debug)]
pub enum JobEvent<'a> {
    /// A job's options resolved and it is about to run.
    Started(&'a JobOptions),
    /// A job completed and its output is persisted.
    Finished(&'a JobSummary),
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Whether the most recently completed job persisted output.
    pub changed: bool,
    /// Per-job summaries, in execution order.
    pub jobs: Vec<JobSummary>,
}

/// Run `jobs` strictly in order, with `fallback` supplying any field a job
/// entry leaves unset.
///
/// An empty job list runs exactly one job built from the fallback alone.
/// Jobs never overlap: each job's resolution, read, transform, and write
/// complete before the next job starts, so later jobs may depend on the
/// side effects of earlier ones. The first failure aborts the batch; jobs
/// that already completed keep their persisted output.
pub fn run_batch(jobs: Vec<RawJobOptions>, fallback: &RawJobOptions) -> Result<BatchSummary> {
    run_batch_with(jobs, fallback, |_| {})
}

/// [`run_batch`] with a progress observer for per-job reporting.
pub fn run_batch_with<F>(
    jobs: Vec<RawJobOptions>,
    fallback: &RawJobOptions,
    mut observe: F,
) -> Result<BatchSummary>
where
    F: FnMut(JobEvent<'_>),
{
    let jobs = if jobs.is_empty() {
        vec![RawJobOptions::default()]
    } else {
        jobs
    };

    let mut summary = BatchSummary::default();
    for raw in jobs {
        let options = raw.or(fallback).resolve()?;
        observe(JobEvent::Started(&options));
        let job = run_job(&options)?;
        observe(JobEvent::Finished(&job));
        summary.changed = true;
        summary.jobs.push(job);
    }
    Ok(summary)
}
