//! Session storage traits and types for conversation state.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::Envelope;
use crate::routing::Intent;

/// A tracked conversation session, keyed by a client-supplied identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub last_intent: Option<Intent>,
    pub message_count: usize,
}

/// One request/response pair in a session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeEntry {
    pub message: String,
    pub response: Envelope,
    pub timestamp: DateTime<Utc>,
}

/// Filter criteria for listing sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub user_id: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

/// Storage for conversation sessions and their append-only histories.
///
/// The history is a log: entries are only ever appended, never rewritten or
/// deduplicated, so history length after N messages is exactly N.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append an exchange, creating the session on first use. Returns the
    /// updated session.
    async fn append_exchange(
        &self,
        session_id: &str,
        user_id: &str,
        entry: ExchangeEntry,
        intent: Intent,
    ) -> Result<Session>;

    /// Get a session by id, if it exists.
    async fn get(&self, session_id: &str) -> Result<Option<Session>>;

    /// Retrieve history entries for a session, most recent `limit` when set.
    async fn history(&self, session_id: &str, limit: Option<usize>)
        -> Result<Vec<ExchangeEntry>>;

    /// List sessions matching the given filter, most recent activity first.
    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>>;

    /// Delete a session and its history. Returns whether it existed.
    async fn clear(&self, session_id: &str) -> Result<bool>;

    /// The name of this session store implementation.
    fn name(&self) -> &str;
}
