use super::report::{DispatchReport, JobReport};
use crate::ports::QuerySender;
use dnsblast_domain::{
    DispatchTarget, DomainError, DomainName, QueryJob, QueryOutcome, QueryResponse,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Concurrent dispatch engine.
///
/// Spawns one task per input name. Each task issues `repeat` queries
/// strictly one after another; tasks run concurrently with each other and
/// share nothing but the read-only target. `execute` returns once every task
/// has finished.
pub struct RunDispatchUseCase {
    sender: Arc<dyn QuerySender>,
    target: Arc<DispatchTarget>,
    max_concurrency: Option<usize>,
    shutdown: CancellationToken,
}

impl RunDispatchUseCase {
    pub fn new(sender: Arc<dyn QuerySender>, target: DispatchTarget) -> Self {
        Self {
            sender,
            target: Arc::new(target),
            max_concurrency: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// Caps the number of jobs running at once. `None` runs every job at once.
    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn target(&self) -> &DispatchTarget {
        &self.target
    }

    pub async fn execute(
        &self,
        names: &[String],
        repeat: u32,
    ) -> Result<DispatchReport, DomainError> {
        self.target.validate()?;

        if repeat == 0 {
            return Err(DomainError::InvalidConfiguration(
                "repeat must be at least 1".to_string(),
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(DomainError::InvalidConfiguration(
                "max_concurrency must be at least 1".to_string(),
            ));
        }

        let jobs = QueryJob::from_names(names, repeat);
        let permits = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

        info!(
            target_addr = %self.target,
            jobs = jobs.len(),
            repeat = repeat,
            max_concurrency = ?self.max_concurrency,
            "Starting dispatch"
        );

        let started = Instant::now();
        let mut handles = Vec::with_capacity(jobs.len());

        for job in jobs {
            let index = job.index;
            let name = Arc::clone(&job.name);
            let sender = Arc::clone(&self.sender);
            let target = Arc::clone(&self.target);
            let permits = permits.clone();
            let shutdown = self.shutdown.clone();
            // Outcomes leave the task as they happen, so a job that dies
            // mid-run still reports the iterations it finished.
            let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(async move {
                // Held for the whole job so the cap bounds active jobs, not queries.
                let _permit = match permits {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                run_job(job, sender.as_ref(), &target, &shutdown, outcome_tx).await
            });

            handles.push((index, name, handle, outcome_rx));
        }

        let mut reports = Vec::with_capacity(handles.len());

        for (index, name, handle, mut outcome_rx) in handles {
            let joined = handle.await;

            // The task is gone, so every outcome it sent is already buffered.
            let mut outcomes = Vec::new();
            while let Ok(outcome) = outcome_rx.try_recv() {
                outcomes.push(outcome);
            }

            let (cancelled, aborted) = match joined {
                Ok(cancelled) => (cancelled, None),
                Err(e) => {
                    warn!(
                        job = index,
                        name = %name,
                        completed = outcomes.len(),
                        error = %e,
                        "Dispatch task aborted"
                    );
                    (false, Some(e.to_string()))
                }
            };

            reports.push(JobReport {
                index,
                name,
                outcomes,
                aborted,
                cancelled,
            });
        }

        reports.sort_by_key(|r| r.index);

        let report = DispatchReport {
            jobs: reports,
            elapsed: started.elapsed(),
        };

        info!(
            jobs = report.jobs.len(),
            outcomes = report.total_outcomes(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Dispatch finished"
        );

        Ok(report)
    }
}

/// Runs the job's iterations in order, sending each outcome as it is produced.
/// Returns whether the job stopped early because of cancellation.
async fn run_job(
    job: QueryJob,
    sender: &dyn QuerySender,
    target: &DispatchTarget,
    shutdown: &CancellationToken,
    outcomes: mpsc::UnboundedSender<QueryOutcome>,
) -> bool {
    for iteration in 0..job.repeat {
        if shutdown.is_cancelled() {
            debug!(job = job.index, iteration = iteration, "Job cancelled");
            return true;
        }

        let outcome = run_iteration(&job.name, sender, target).await;

        debug!(
            job = job.index,
            iteration = iteration,
            name = %job.name,
            outcome = outcome.label(),
            "Query finished"
        );

        // The receiver outlives every task.
        let _ = outcomes.send(outcome);
    }

    false
}

/// One attempt. Never fails: every error becomes an outcome.
async fn run_iteration(
    raw_name: &str,
    sender: &dyn QuerySender,
    target: &DispatchTarget,
) -> QueryOutcome {
    // Normalized again on every attempt, like a client building each query from scratch.
    let name = match DomainName::parse(raw_name) {
        Ok(name) => name,
        Err(e) => return QueryOutcome::from(Err::<QueryResponse, _>(e)),
    };

    match tokio::time::timeout(target.timeout, sender.send_query(&name, target)).await {
        Ok(result) => QueryOutcome::from(result),
        Err(_) => QueryOutcome::Timeout,
    }
}
