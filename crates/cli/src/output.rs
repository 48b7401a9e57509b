//! Plain-text rendering of a dispatch report.

use dnsblast_application::use_cases::{DispatchReport, DispatchSummary, JobReport};
use dnsblast_domain::QueryOutcome;
use std::fmt::Write as _;
use std::io::{self, Write};

pub fn outcome_line(job: &JobReport, iteration: usize, outcome: &QueryOutcome) -> String {
    let mut line = format!(
        "job={} iter={} name={} outcome={}",
        job.index,
        iteration,
        job.name,
        outcome.label()
    );

    match outcome {
        QueryOutcome::Response(response) => {
            let _ = write!(
                line,
                " id={} rcode={} ad={} bytes={} latency_ms={:.3}",
                response.id,
                response.rcode,
                response.authentic_data,
                response.size,
                response.latency.as_secs_f64() * 1000.0
            );
            if !response.answers.is_empty() {
                let _ = write!(line, " txt={:?}", response.answers);
            }
        }
        QueryOutcome::Timeout => {}
        QueryOutcome::TransportError(reason) | QueryOutcome::InvalidName(reason) => {
            let _ = write!(line, " error={:?}", reason);
        }
    }

    line
}

pub fn summary_line(summary: &DispatchSummary) -> String {
    let mut line = format!(
        "jobs={} attempts={} responses={} timeouts={} transport_errors={} invalid_names={}",
        summary.jobs,
        summary.attempts,
        summary.responses,
        summary.timeouts,
        summary.transport_errors,
        summary.invalid_names
    );

    if summary.aborted_jobs > 0 {
        let _ = write!(line, " aborted_jobs={}", summary.aborted_jobs);
    }
    if summary.cancelled_jobs > 0 {
        let _ = write!(line, " cancelled_jobs={}", summary.cancelled_jobs);
    }
    if let (Some(avg), Some(max)) = (summary.avg_latency, summary.max_latency) {
        let _ = write!(
            line,
            " avg_latency_ms={:.3} max_latency_ms={:.3}",
            avg.as_secs_f64() * 1000.0,
            max.as_secs_f64() * 1000.0
        );
    }
    let _ = write!(
        line,
        " elapsed_ms={} qps={:.1}",
        summary.elapsed.as_millis(),
        summary.queries_per_second()
    );

    line
}

pub fn print_report(report: &DispatchReport, quiet: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !quiet {
        for job in &report.jobs {
            for (iteration, outcome) in job.outcomes.iter().enumerate() {
                writeln!(out, "{}", outcome_line(job, iteration, outcome))?;
            }
            if let Some(reason) = &job.aborted {
                writeln!(out, "job={} name={} aborted={:?}", job.index, job.name, reason)?;
            }
        }
    }

    writeln!(out, "{}", summary_line(&report.summary()))?;
    out.flush()
}
