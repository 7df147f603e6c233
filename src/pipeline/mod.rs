//! The orchestration pipeline: extraction → routing → planning → dispatch →
//! envelope, with the session append at the end.
//!
//! Data flows strictly one way per request. There is no feedback loop, no
//! queuing, and no concurrency between steps; the only error boundary is the
//! envelope wrapping, which converts agent failures into apology replies.

pub mod envelope;

pub use envelope::{Envelope, ResponseMetadata};

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use crate::agents::{create_dispatcher, AgentRequest, Dispatcher};
use crate::config::Config;
use crate::directory::{create_directory, create_ledger};
use crate::extract::Extractor;
use crate::health;
use crate::routing::{create_router, AgentCategory, RouteContext, Router, UserRole};
use crate::planner;
use crate::sessions::{create_session_store, ExchangeEntry, SessionStore};

/// The result of processing one message end to end.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub request_id: String,
    pub session_id: String,
    pub agent: AgentCategory,
    pub envelope: Envelope,
}

/// Request-routing pipeline with injected store implementations.
pub struct Pipeline {
    extractor: Extractor,
    router: Box<dyn Router>,
    dispatcher: Dispatcher,
    sessions: Arc<dyn SessionStore>,
}

impl Pipeline {
    pub fn new(
        router: Box<dyn Router>,
        dispatcher: Dispatcher,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            extractor: Extractor::new(),
            router,
            dispatcher,
            sessions,
        }
    }

    /// Wire the pipeline with the default in-memory backends.
    pub fn from_config(config: &Config) -> Self {
        let dispatcher =
            create_dispatcher(&config.agents, create_directory(), create_ledger());
        Self::new(create_router(), dispatcher, create_session_store())
    }

    /// The session store shared with the gateway.
    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }

    /// Process one message through the full pipeline.
    ///
    /// Always returns an envelope for routable input; an agent failure is
    /// converted into an apology envelope with `success = false` rather than
    /// an error. A missing session id starts a new session named after the
    /// request id.
    pub async fn process_message(
        &self,
        user_id: &str,
        message: &str,
        session_id: Option<&str>,
        user_role: UserRole,
    ) -> Result<PipelineOutcome> {
        let request_id = Uuid::new_v4().to_string();
        let session_id = session_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&request_id)
            .to_string();

        health::record_request();

        let cleaned = self.extractor.clean(message);
        let entities = self.extractor.extract(&cleaned);
        let decision = self.router.route(&RouteContext {
            message: &cleaned,
            user_role,
            entities: &entities,
        });
        let plan = planner::plan_for(&decision);

        tracing::debug!(
            request_id = %request_id,
            user_id = %user_id,
            category = %decision.category,
            confidence = decision.confidence,
            "message routed"
        );

        let request = AgentRequest {
            message: cleaned.clone(),
            user_id: user_id.to_string(),
            session_id: session_id.clone(),
            intent: decision.intent,
            entities,
            plan,
        };

        let envelope = match self.dispatcher.dispatch(decision.category, &request).await {
            Ok(reply) => Envelope::wrap(reply, &decision),
            Err(error) => {
                health::record_failure();
                tracing::warn!(
                    request_id = %request_id,
                    agent = %decision.category,
                    error = %error,
                    "agent call failed, substituting apology"
                );
                Envelope::apology(&decision)
            }
        };

        self.sessions
            .append_exchange(
                &session_id,
                user_id,
                ExchangeEntry {
                    message: message.to_string(),
                    response: envelope.clone(),
                    timestamp: envelope.timestamp,
                },
                decision.intent,
            )
            .await?;

        Ok(PipelineOutcome {
            request_id,
            session_id,
            agent: decision.category,
            envelope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{Agent, AgentReply, ReplyKind};
    use crate::routing::Intent;
    use async_trait::async_trait;

    fn pipeline() -> Pipeline {
        Pipeline::from_config(&Config::default())
    }

    #[tokio::test]
    async fn service_search_routes_to_consumer_with_matches() {
        let outcome = pipeline()
            .process_message("user-1", "Find me a plumber in Colombo", Some("s1"), UserRole::Consumer)
            .await
            .unwrap();

        assert_eq!(outcome.agent, AgentCategory::Consumer);
        assert!(outcome.envelope.success);
        assert_eq!(outcome.envelope.kind, ReplyKind::ServiceResults);
        assert!(outcome.envelope.metadata.confidence >= 0.9);

        let data = outcome.envelope.data.unwrap();
        let providers = data["providers"].as_array().unwrap();
        assert!(providers
            .iter()
            .all(|p| p["category"] == "plumbing" && p["location"] == "colombo"));
    }

    #[tokio::test]
    async fn earnings_question_routes_to_provider_with_revenue() {
        let outcome = pipeline()
            .process_message(
                "prov_001",
                "How much did I earn this month?",
                Some("s1"),
                UserRole::Consumer,
            )
            .await
            .unwrap();

        assert_eq!(outcome.agent, AgentCategory::Provider);
        assert_eq!(outcome.envelope.kind, ReplyKind::RevenueSummary);
        assert!(outcome.envelope.message.contains("125000"));
    }

    #[tokio::test]
    async fn greeting_routes_to_general_with_suggestions() {
        let outcome = pipeline()
            .process_message("user-1", "Hello", Some("s1"), UserRole::Consumer)
            .await
            .unwrap();

        assert_eq!(outcome.agent, AgentCategory::General);
        assert!(!outcome.envelope.suggestions.is_empty());
        assert!(outcome.envelope.message.contains("Kumbuk assistant"));
    }

    #[tokio::test]
    async fn empty_message_falls_back_to_general_without_error() {
        let outcome = pipeline()
            .process_message("user-1", "", Some("s1"), UserRole::Consumer)
            .await
            .unwrap();

        assert_eq!(outcome.agent, AgentCategory::General);
        assert!(outcome.envelope.success);
    }

    #[tokio::test]
    async fn missing_session_id_starts_session_named_after_request() {
        let p = pipeline();
        let outcome = p
            .process_message("user-1", "Hello", None, UserRole::Consumer)
            .await
            .unwrap();

        assert_eq!(outcome.session_id, outcome.request_id);
        let session = p.sessions().get(&outcome.session_id).await.unwrap();
        assert!(session.is_some());
    }

    #[tokio::test]
    async fn every_message_appends_exactly_one_history_entry() {
        let p = pipeline();
        for _ in 0..3 {
            p.process_message("user-1", "Hello", Some("s1"), UserRole::Consumer)
                .await
                .unwrap();
        }

        let session = p.sessions().get("s1").await.unwrap().unwrap();
        assert_eq!(session.message_count, 3);
        assert_eq!(p.sessions().history("s1", None).await.unwrap().len(), 3);
    }

    struct ExplodingAgent;

    #[async_trait]
    impl Agent for ExplodingAgent {
        fn category(&self) -> AgentCategory {
            AgentCategory::Consumer
        }

        async fn handle(&self, _request: &AgentRequest) -> Result<AgentReply> {
            anyhow::bail!("backend blew up")
        }

        fn name(&self) -> &str {
            "exploding"
        }
    }

    #[tokio::test]
    async fn agent_failure_becomes_apology_envelope() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Box::new(ExplodingAgent));
        let p = Pipeline::new(create_router(), dispatcher, create_session_store());

        let outcome = p
            .process_message("user-1", "find a plumber", Some("s1"), UserRole::Consumer)
            .await
            .unwrap();

        assert!(!outcome.envelope.success);
        assert_eq!(outcome.envelope.kind, ReplyKind::Error);
        assert!(!outcome.envelope.message.contains("backend blew up"));

        // The failed exchange is still recorded in the session.
        let session = p.sessions().get("s1").await.unwrap().unwrap();
        assert_eq!(session.message_count, 1);
        assert_eq!(session.last_intent, Some(Intent::ServiceSearch));
    }
}
