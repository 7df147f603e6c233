//! In-memory session store implementation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;

use super::traits::{ExchangeEntry, Session, SessionFilter, SessionStore};
use crate::routing::Intent;

/// An in-memory session store backed by mutex-protected hash maps.
///
/// Lives in process memory only; everything is lost on restart. There is no
/// eviction, matching the append-only session contract.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    histories: Mutex<HashMap<String, Vec<ExchangeEntry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            histories: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn append_exchange(
        &self,
        session_id: &str,
        user_id: &str,
        entry: ExchangeEntry,
        intent: Intent,
    ) -> Result<Session> {
        let now = Utc::now();

        let mut sessions = self.sessions.lock();
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                session_id: session_id.to_string(),
                user_id: user_id.to_string(),
                created_at: now,
                last_activity: now,
                last_intent: None,
                message_count: 0,
            });
        session.last_activity = now;
        session.last_intent = Some(intent);
        session.message_count += 1;
        let snapshot = session.clone();
        drop(sessions);

        let mut histories = self.histories.lock();
        histories
            .entry(session_id.to_string())
            .or_default()
            .push(entry);

        Ok(snapshot)
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        let sessions = self.sessions.lock();
        Ok(sessions.get(session_id).cloned())
    }

    async fn history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ExchangeEntry>> {
        let histories = self.histories.lock();
        let entries = match histories.get(session_id) {
            Some(entries) => entries.clone(),
            None => return Ok(Vec::new()),
        };

        match limit {
            Some(n) => {
                let start = entries.len().saturating_sub(n);
                Ok(entries[start..].to_vec())
            }
            None => Ok(entries),
        }
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        let sessions = self.sessions.lock();
        let mut results: Vec<Session> = sessions
            .values()
            .filter(|s| {
                if let Some(ref user_id) = filter.user_id {
                    if s.user_id != *user_id {
                        return false;
                    }
                }
                if let Some(ref since) = filter.since {
                    if s.last_activity < *since {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        results.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));

        if let Some(limit) = filter.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    async fn clear(&self, session_id: &str) -> Result<bool> {
        let existed = self.sessions.lock().remove(session_id).is_some();
        self.histories.lock().remove(session_id);
        Ok(existed)
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentReply, ReplyKind};
    use crate::pipeline::Envelope;
    use crate::routing::{AgentCategory, MatchedBy, RoutingDecision};

    fn entry(message: &str) -> ExchangeEntry {
        let decision = RoutingDecision {
            category: AgentCategory::General,
            intent: Intent::General,
            confidence: 0.5,
            matched_by: MatchedBy::Fallback,
        };
        ExchangeEntry {
            message: message.to_string(),
            response: Envelope::wrap(AgentReply::text("ok"), &decision),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn first_append_creates_the_session() {
        let store = InMemorySessionStore::new();
        assert!(store.get("s1").await.unwrap().is_none());

        let session = store
            .append_exchange("s1", "user-1", entry("hello"), Intent::General)
            .await
            .unwrap();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.message_count, 1);
        assert_eq!(session.last_intent, Some(Intent::General));

        assert!(store.get("s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn history_length_matches_message_count() {
        let store = InMemorySessionStore::new();
        for i in 0..5 {
            store
                .append_exchange("s1", "user-1", entry(&format!("message {i}")), Intent::General)
                .await
                .unwrap();
        }

        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.message_count, 5);
        assert_eq!(store.history("s1", None).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn identical_messages_are_appended_not_deduplicated() {
        let store = InMemorySessionStore::new();
        for _ in 0..2 {
            store
                .append_exchange("s1", "user-1", entry("same message"), Intent::General)
                .await
                .unwrap();
        }

        let history = store.history("s1", None).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message, history[1].message);
    }

    #[tokio::test]
    async fn history_limit_returns_most_recent_entries() {
        let store = InMemorySessionStore::new();
        for i in 0..5 {
            store
                .append_exchange("s1", "user-1", entry(&format!("message {i}")), Intent::General)
                .await
                .unwrap();
        }

        let last_two = store.history("s1", Some(2)).await.unwrap();
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].message, "message 3");
        assert_eq!(last_two[1].message, "message 4");
    }

    #[tokio::test]
    async fn list_filters_by_user() {
        let store = InMemorySessionStore::new();
        store
            .append_exchange("s1", "user-a", entry("hi"), Intent::General)
            .await
            .unwrap();
        store
            .append_exchange("s2", "user-b", entry("hi"), Intent::General)
            .await
            .unwrap();

        let filter = SessionFilter {
            user_id: Some("user-a".to_string()),
            ..Default::default()
        };
        let results = store.list(&filter).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].session_id, "s1");
    }

    #[tokio::test]
    async fn clear_removes_session_and_history() {
        let store = InMemorySessionStore::new();
        store
            .append_exchange("s1", "user-1", entry("hello"), Intent::General)
            .await
            .unwrap();

        assert!(store.clear("s1").await.unwrap());
        assert!(store.get("s1").await.unwrap().is_none());
        assert!(store.history("s1", None).await.unwrap().is_empty());
        assert!(!store.clear("s1").await.unwrap());
    }
}
