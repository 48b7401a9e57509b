/// Dispatch Flow Tests
///
/// Full path: names → dispatch engine → UDP sender → stub server → report

#[path = "../common/mod.rs"]
mod common;

use common::{names, target_for, TestNames, TestServer, TestServerBuilder};
use dnsblast_application::use_cases::RunDispatchUseCase;
use dnsblast_domain::QueryOutcome;
use dnsblast_infrastructure::dns::UdpQuerySender;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn dispatch(server: &TestServer, timeout_ms: u64) -> RunDispatchUseCase {
    RunDispatchUseCase::new(Arc::new(UdpQuerySender::new()), target_for(server, timeout_ms))
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_silent_endpoint_yields_single_timeout() {
    let server = TestServer::silent().await.expect("Failed to start server");

    let start = Instant::now();
    let report = dispatch(&server, 100)
        .execute(&names(&[TestNames::example()]), 1)
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.total_outcomes(), 1);
    assert_eq!(report.jobs[0].outcomes[0], QueryOutcome::Timeout);
    assert!(elapsed >= Duration::from_millis(100));
    assert!(elapsed < Duration::from_secs(1), "took {:?}", elapsed);

    server.shutdown();
}

#[tokio::test]
async fn test_one_response_per_name() {
    let server = TestServer::start().await.expect("Failed to start server");

    let report = dispatch(&server, 2000)
        .execute(&TestNames::trio(), 1)
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 3);
    for (job, expected) in report.jobs.iter().zip(["a.com.", "b.com.", "c.com."]) {
        assert_eq!(job.outcomes.len(), 1);
        let response = job.outcomes[0].response().expect("response outcome");
        assert_eq!(response.answers, vec![format!("hello {}", expected)]);
    }
    assert_eq!(server.seen().len(), 3);

    server.shutdown();
}

#[tokio::test]
async fn test_relative_and_absolute_names_share_qname() {
    let server = TestServer::start().await.expect("Failed to start server");

    dispatch(&server, 2000)
        .execute(&names(&[TestNames::relative(), TestNames::absolute()]), 1)
        .await
        .unwrap();

    let seen = server.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].qname_wire, seen[1].qname_wire);
    assert_eq!(seen[0].qname_wire, b"\x06google\x00".to_vec());
    assert_eq!(server.seen_for("google."), 2);

    server.shutdown();
}

#[tokio::test]
async fn test_duplicate_names_are_queried_independently() {
    let server = TestServer::start().await.expect("Failed to start server");

    let report = dispatch(&server, 2000)
        .execute(&names(&["x.com", "x.com"]), 1)
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 2);
    assert!(report.outcomes().all(QueryOutcome::is_response));
    assert_eq!(server.seen_for("x.com."), 2);

    server.shutdown();
}

// ============================================================================
// Wire Shape Seen By The Server
// ============================================================================

#[tokio::test]
async fn test_server_sees_ad_bit_and_single_opt_record() {
    let server = TestServer::start().await.expect("Failed to start server");

    dispatch(&server, 2000)
        .execute(&TestNames::trio(), 2)
        .await
        .unwrap();

    let seen = server.seen();
    assert_eq!(seen.len(), 6);
    for query in seen {
        assert!(query.authentic_data, "AD missing for {}", query.name);
        assert!(query.recursion_desired, "RD missing for {}", query.name);
        assert_eq!(query.max_payload, Some(65535));
        assert_eq!(query.additional_count, 1);
    }

    server.shutdown();
}

#[tokio::test]
async fn test_response_flags_are_surfaced() {
    let server = TestServer::start().await.expect("Failed to start server");

    let report = dispatch(&server, 2000)
        .execute(&names(&[TestNames::example()]), 1)
        .await
        .unwrap();

    let response = report.jobs[0].outcomes[0].response().expect("response outcome");
    assert_eq!(response.rcode, "NOERROR");
    assert!(response.authentic_data);
    assert!(response.size > 12);

    server.shutdown();
}

// ============================================================================
// Repeat And Isolation
// ============================================================================

#[tokio::test]
async fn test_repeat_sends_sequential_queries() {
    let server = TestServer::start().await.expect("Failed to start server");

    let report = dispatch(&server, 2000)
        .execute(&names(&["a.com", "b.com"]), 5)
        .await
        .unwrap();

    assert!(report.jobs.iter().all(|j| j.outcomes.len() == 5));
    assert_eq!(server.seen_for("a.com."), 5);
    assert_eq!(server.seen_for("b.com."), 5);

    let summary = report.summary();
    assert_eq!(summary.attempts, 10);
    assert_eq!(summary.responses, 10);

    server.shutdown();
}

#[tokio::test]
async fn test_silent_name_does_not_affect_others() {
    let server = TestServerBuilder::new()
        .silent_for("slow.com.")
        .build()
        .await
        .expect("Failed to start server");

    let report = dispatch(&server, 100)
        .execute(&names(&["fast.com", "slow.com", "other.com"]), 2)
        .await
        .unwrap();

    assert!(report.jobs[0].outcomes.iter().all(QueryOutcome::is_response));
    assert!(report.jobs[1].outcomes.iter().all(QueryOutcome::is_timeout));
    assert!(report.jobs[2].outcomes.iter().all(QueryOutcome::is_response));
    assert!(report.jobs.iter().all(|j| j.outcomes.len() == 2));
    assert_eq!(server.seen_for("slow.com."), 2);

    server.shutdown();
}

#[tokio::test]
async fn test_invalid_name_never_reaches_the_wire() {
    let server = TestServer::start().await.expect("Failed to start server");

    let report = dispatch(&server, 2000)
        .execute(&names(&["bad..name", TestNames::example()]), 2)
        .await
        .unwrap();

    assert!(report.jobs[0]
        .outcomes
        .iter()
        .all(|o| matches!(o, QueryOutcome::InvalidName(_))));
    assert_eq!(report.jobs[0].outcomes.len(), 2);
    assert_eq!(server.seen().len(), 2);
    assert_eq!(server.seen_for("example.com."), 2);

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_silent_jobs_time_out_concurrently() {
    let server = TestServer::silent().await.expect("Failed to start server");

    let start = Instant::now();
    let report = dispatch(&server, 200)
        .execute(&names(&["a.com", "b.com", "c.com", "d.com", "e.com"]), 1)
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.summary().timeouts, 5);
    // One after another would take at least 1s
    assert!(elapsed < Duration::from_millis(800), "took {:?}", elapsed);

    server.shutdown();
}
