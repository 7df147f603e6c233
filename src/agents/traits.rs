//! Agent trait and the request/reply types exchanged with the dispatcher.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::extract::ExtractedEntities;
use crate::planner::TaskPlan;
use crate::routing::{AgentCategory, Intent};

/// Everything an agent needs to answer one message.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub message: String,
    pub user_id: String,
    pub session_id: String,
    pub intent: Intent,
    pub entities: ExtractedEntities,
    pub plan: TaskPlan,
}

/// The shape of an agent reply, used by clients to pick a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Text,
    ServiceResults,
    InquirySummary,
    RevenueSummary,
    RatingSummary,
    AnalyticsDashboard,
    Error,
}

/// Raw output of one agent invocation, before envelope wrapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    pub kind: ReplyKind,
    pub message: String,
    /// Structured payload for rich clients (provider lists, metrics, ...).
    pub data: Option<serde_json::Value>,
    /// Suggested follow-up queries.
    pub suggestions: Vec<String>,
}

impl AgentReply {
    /// A plain text reply with no payload.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            message: message.into(),
            data: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

/// A category-specific responder.
///
/// A failing `handle` call propagates its error to the dispatcher's caller;
/// the response handler is the only error boundary in the pipeline.
#[async_trait]
pub trait Agent: Send + Sync {
    /// The category this agent serves.
    fn category(&self) -> AgentCategory;

    /// Answer one request.
    async fn handle(&self, request: &AgentRequest) -> Result<AgentReply>;

    /// The name of this agent implementation.
    fn name(&self) -> &str;
}
