//! Routing traits and types for resolving which agent handles a message.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extract::ExtractedEntities;

/// The agent category a message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCategory {
    Consumer,
    Provider,
    General,
}

impl fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consumer => write!(f, "consumer"),
            Self::Provider => write!(f, "provider"),
            Self::General => write!(f, "general"),
        }
    }
}

/// The classified purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ServiceSearch,
    BusinessQuery,
    General,
}

/// The role a caller declares for itself. No authentication backs this; it is
/// a client-supplied hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Consumer,
    Provider,
}

impl UserRole {
    /// Parse a role string, falling back to consumer for anything unknown.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "provider" => Self::Provider,
            _ => Self::Consumer,
        }
    }
}

/// Which rule produced a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    DeclaredRole,
    BusinessKeyword,
    ServiceEntity,
    Fallback,
}

/// Context provided to the router for one message.
#[derive(Debug, Clone)]
pub struct RouteContext<'a> {
    pub message: &'a str,
    pub user_role: UserRole,
    pub entities: &'a ExtractedEntities,
}

/// The result of routing a message. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub category: AgentCategory,
    pub intent: Intent,
    pub confidence: f64,
    pub matched_by: MatchedBy,
}

/// Maps a message and its extracted entities to an agent category.
///
/// Implementations must be total: an unroutable message resolves to
/// [`AgentCategory::General`], never an error.
pub trait Router: Send + Sync {
    /// Resolve the routing decision for one message.
    fn route(&self, context: &RouteContext<'_>) -> RoutingDecision;

    /// The name of this router implementation.
    fn name(&self) -> &str;
}
