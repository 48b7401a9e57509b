#![allow(dead_code)]

use async_trait::async_trait;
use dnsblast_application::ports::QuerySender;
use dnsblast_domain::{DispatchTarget, DomainError, DomainName, QueryResponse};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock QuerySender
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Respond,
    RespondAfter(Duration),
    /// Never answers; the engine's per-iteration timeout must fire.
    Hang,
    TransportFailure,
    Panic,
    /// Answers the first `n` queries for the name, then panics.
    PanicAfter(usize),
}

#[derive(Default)]
struct Tracking {
    calls: Vec<String>,
    per_name_in_flight: HashMap<String, usize>,
}

pub struct MockQuerySender {
    behaviors: HashMap<String, Behavior>,
    default: Behavior,
    tracking: Mutex<Tracking>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    overlapping_same_name: AtomicBool,
}

impl MockQuerySender {
    pub fn new(default: Behavior) -> Self {
        Self {
            behaviors: HashMap::new(),
            default,
            tracking: Mutex::new(Tracking::default()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            overlapping_same_name: AtomicBool::new(false),
        }
    }

    /// Behavior for one name, keyed by its absolute form (`"a.com."`).
    pub fn with_behavior(mut self, fqdn: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(fqdn.to_string(), behavior);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<String> {
        self.tracking.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, fqdn: &str) -> usize {
        self.tracking
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == fqdn)
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// True if two queries for the same name were ever outstanding at once.
    pub fn saw_overlap_for_same_name(&self) -> bool {
        self.overlapping_same_name.load(Ordering::SeqCst)
    }

    fn enter(&self, fqdn: &str) -> InFlightGuard<'_> {
        {
            let mut tracking = self.tracking.lock().unwrap();
            tracking.calls.push(fqdn.to_string());
            let count = tracking
                .per_name_in_flight
                .entry(fqdn.to_string())
                .or_insert(0);
            *count += 1;
            if *count > 1 {
                self.overlapping_same_name.store(true, Ordering::SeqCst);
            }
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        InFlightGuard {
            sender: self,
            fqdn: fqdn.to_string(),
        }
    }
}

struct InFlightGuard<'a> {
    sender: &'a MockQuerySender,
    fqdn: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.sender.in_flight.fetch_sub(1, Ordering::SeqCst);
        if let Ok(mut tracking) = self.sender.tracking.lock() {
            if let Some(count) = tracking.per_name_in_flight.get_mut(&self.fqdn) {
                *count -= 1;
            }
        }
    }
}

pub fn txt_response(fqdn: &str, latency: Duration) -> QueryResponse {
    QueryResponse {
        id: 0x1234,
        rcode: "NOERROR",
        authentic_data: false,
        answers: vec![format!("txt for {}", fqdn)],
        edns_payload: Some(65535),
        size: 64,
        latency,
    }
}

#[async_trait]
impl QuerySender for MockQuerySender {
    async fn send_query(
        &self,
        name: &DomainName,
        _target: &DispatchTarget,
    ) -> Result<QueryResponse, DomainError> {
        let fqdn = name.as_str();
        let behavior = self.behaviors.get(fqdn).copied().unwrap_or(self.default);
        let answered = self.call_count(fqdn);
        let _guard = self.enter(fqdn);

        match behavior {
            Behavior::Respond => Ok(txt_response(fqdn, Duration::ZERO)),
            Behavior::RespondAfter(delay) => {
                tokio::time::sleep(delay).await;
                Ok(txt_response(fqdn, delay))
            }
            Behavior::Hang => std::future::pending().await,
            Behavior::TransportFailure => Err(DomainError::Transport(format!(
                "connection refused by mock for {}",
                fqdn
            ))),
            Behavior::Panic => panic!("mock sender exploded for {}", fqdn),
            Behavior::PanicAfter(n) if answered >= n => {
                panic!("mock sender exploded for {} after {} answers", fqdn, n)
            }
            Behavior::PanicAfter(_) => Ok(txt_response(fqdn, Duration::ZERO)),
        }
    }
}
