//! Process-wide health snapshot: uptime plus request/failure counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();
static REQUESTS_HANDLED: AtomicU64 = AtomicU64::new(0);
static AGENT_FAILURES: AtomicU64 = AtomicU64::new(0);

/// Point-in-time health report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub requests_handled: u64,
    pub agent_failures: u64,
}

/// Record process start. Idempotent; uptime counts from the first call.
pub fn init() {
    let _ = STARTED_AT.set(Instant::now());
}

pub fn record_request() {
    REQUESTS_HANDLED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_failure() {
    AGENT_FAILURES.fetch_add(1, Ordering::Relaxed);
}

/// Current health snapshot.
pub fn snapshot() -> HealthSnapshot {
    let uptime_seconds = STARTED_AT
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    HealthSnapshot {
        status: "healthy",
        uptime_seconds,
        requests_handled: REQUESTS_HANDLED.load(Ordering::Relaxed),
        agent_failures: AGENT_FAILURES.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_counters() {
        init();
        let before = snapshot();
        record_request();
        record_request();
        record_failure();
        let after = snapshot();

        assert_eq!(after.requests_handled, before.requests_handled + 2);
        assert_eq!(after.agent_failures, before.agent_failures + 1);
        assert_eq!(after.status, "healthy");
    }
}
