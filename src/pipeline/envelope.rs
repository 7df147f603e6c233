//! Uniform response envelope returned for every processed message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agents::{AgentReply, ReplyKind};
use crate::routing::{AgentCategory, Intent, RoutingDecision};

/// Routing facts attached to every envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub agent: AgentCategory,
    pub intent: Intent,
    pub confidence: f64,
}

/// The uniform wrapper around agent output. This is what clients receive,
/// whether an agent succeeded or failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub kind: ReplyKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
    pub metadata: ResponseMetadata,
    pub timestamp: DateTime<Utc>,
}

impl Envelope {
    /// Wrap a successful agent reply.
    pub fn wrap(reply: AgentReply, decision: &RoutingDecision) -> Self {
        Self {
            success: true,
            kind: reply.kind,
            message: reply.message,
            data: reply.data,
            suggestions: reply.suggestions,
            metadata: ResponseMetadata {
                agent: decision.category,
                intent: decision.intent,
                confidence: decision.confidence,
            },
            timestamp: Utc::now(),
        }
    }

    /// The generic apology substituted when an agent call fails. Error details
    /// stay in the logs, never in the user-facing message.
    pub fn apology(decision: &RoutingDecision) -> Self {
        Self {
            success: false,
            kind: ReplyKind::Error,
            message: "I ran into a problem processing that request. Please try \
                      again or rephrase your question."
                .to_string(),
            data: None,
            suggestions: vec![
                "Try rephrasing your question".to_string(),
                "Contact support if the issue persists".to_string(),
            ],
            metadata: ResponseMetadata {
                agent: decision.category,
                intent: decision.intent,
                confidence: decision.confidence,
            },
            timestamp: Utc::now(),
        }
    }
}
