//! Keyword router — the default rule-based routing policy.

use super::traits::{
    AgentCategory, Intent, MatchedBy, RouteContext, Router, RoutingDecision, UserRole,
};

/// Business-analytics keywords that route a message to the provider agent.
const BUSINESS_KEYWORDS: &[&str] = &[
    "earn",
    "earning",
    "earnings",
    "income",
    "revenue",
    "inquiry",
    "inquiries",
    "rating",
    "ratings",
    "review",
    "reviews",
    "business",
    "analytics",
    "performance",
    "dashboard",
    "booking",
    "bookings",
    "customers",
];

/// Rule-based router. Rules are checked in a fixed order and the first match
/// wins:
///
/// 1. a declared provider role routes to the provider agent;
/// 2. a business-analytics keyword routes to the provider agent;
/// 3. non-empty service or location entities route to the consumer agent;
/// 4. everything else falls back to the general agent.
///
/// Confidence is a fixed per-rule heuristic, not a learned value.
#[derive(Debug, Clone, Default)]
pub struct KeywordRouter;

impl KeywordRouter {
    pub fn new() -> Self {
        Self
    }
}

/// Pure classification function behind [`KeywordRouter`].
pub fn classify(context: &RouteContext<'_>) -> RoutingDecision {
    if context.user_role == UserRole::Provider {
        return RoutingDecision {
            category: AgentCategory::Provider,
            intent: Intent::BusinessQuery,
            confidence: 1.0,
            matched_by: MatchedBy::DeclaredRole,
        };
    }

    let lowered = context.message.to_lowercase();
    if BUSINESS_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return RoutingDecision {
            category: AgentCategory::Provider,
            intent: Intent::BusinessQuery,
            confidence: 0.95,
            matched_by: MatchedBy::BusinessKeyword,
        };
    }

    if !context.entities.service_types.is_empty() || !context.entities.locations.is_empty() {
        return RoutingDecision {
            category: AgentCategory::Consumer,
            intent: Intent::ServiceSearch,
            confidence: 0.95,
            matched_by: MatchedBy::ServiceEntity,
        };
    }

    RoutingDecision {
        category: AgentCategory::General,
        intent: Intent::General,
        confidence: 0.5,
        matched_by: MatchedBy::Fallback,
    }
}

impl Router for KeywordRouter {
    fn route(&self, context: &RouteContext<'_>) -> RoutingDecision {
        classify(context)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
