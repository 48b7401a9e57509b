use dnsblast_domain::QueryOutcome;
use std::sync::Arc;
use std::time::Duration;

/// Outcomes of one job, in iteration order.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub index: usize,
    pub name: Arc<str>,
    pub outcomes: Vec<QueryOutcome>,
    /// Set when the unit died before finishing (panic or abort).
    pub aborted: Option<String>,
    /// Set when the run was cancelled before the job used up its iterations.
    pub cancelled: bool,
}

impl JobReport {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none() && !self.cancelled
    }
}

#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// Sorted by job index, which is the position of the name in the input.
    pub jobs: Vec<JobReport>,
    pub elapsed: Duration,
}

impl DispatchReport {
    pub fn total_outcomes(&self) -> usize {
        self.jobs.iter().map(|j| j.outcomes.len()).sum()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &QueryOutcome> {
        self.jobs.iter().flat_map(|j| j.outcomes.iter())
    }

    pub fn summary(&self) -> DispatchSummary {
        let mut summary = DispatchSummary {
            jobs: self.jobs.len(),
            elapsed: self.elapsed,
            ..Default::default()
        };

        let mut latency_total = Duration::ZERO;

        for job in &self.jobs {
            if job.aborted.is_some() {
                summary.aborted_jobs += 1;
            }
            if job.cancelled {
                summary.cancelled_jobs += 1;
            }

            for outcome in &job.outcomes {
                summary.attempts += 1;
                match outcome {
                    QueryOutcome::Response(r) => {
                        summary.responses += 1;
                        latency_total += r.latency;
                        summary.max_latency = Some(
                            summary
                                .max_latency
                                .map_or(r.latency, |current| current.max(r.latency)),
                        );
                    }
                    QueryOutcome::Timeout => summary.timeouts += 1,
                    QueryOutcome::TransportError(_) => summary.transport_errors += 1,
                    QueryOutcome::InvalidName(_) => summary.invalid_names += 1,
                }
            }
        }

        summary.avg_latency = mean_latency(latency_total, summary.responses);

        summary
    }
}

/// Mean over `count` samples, computed in nanoseconds so large counts are
/// not truncated.
fn mean_latency(total: Duration, count: u64) -> Option<Duration> {
    if count == 0 {
        return None;
    }
    let nanos = total.as_nanos() / u128::from(count);
    Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub jobs: usize,
    pub attempts: u64,
    pub responses: u64,
    pub timeouts: u64,
    pub transport_errors: u64,
    pub invalid_names: u64,
    pub aborted_jobs: usize,
    pub cancelled_jobs: usize,
    pub avg_latency: Option<Duration>,
    pub max_latency: Option<Duration>,
    pub elapsed: Duration,
}

impl DispatchSummary {
    pub fn queries_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.attempts as f64 / secs
    }
}
