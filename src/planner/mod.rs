//! Task planner — expands a routing decision into a static, ordered subtask
//! list for the selected agent.
//!
//! Plans are purely declarative. The dispatcher hands the whole plan to one
//! agent; subtask and data-source names describe the intended workflow and are
//! not executed individually.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::routing::{AgentCategory, Intent, RoutingDecision};

/// How the subtasks of a plan are meant to run. Only sequential execution
/// exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    #[default]
    Sequential,
}

/// A static execution plan for one routed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    pub category: AgentCategory,
    pub intent: Intent,
    /// Ordered subtask names.
    pub subtasks: Vec<String>,
    /// Backing-store names the plan would touch. Informational only.
    pub data_sources: BTreeSet<String>,
    pub execution: ExecutionStrategy,
}

impl TaskPlan {
    fn new(
        decision: &RoutingDecision,
        subtasks: &[&str],
        data_sources: &[&str],
    ) -> Self {
        Self {
            category: decision.category,
            intent: decision.intent,
            subtasks: subtasks.iter().map(|s| (*s).to_string()).collect(),
            data_sources: data_sources.iter().map(|s| (*s).to_string()).collect(),
            execution: ExecutionStrategy::Sequential,
        }
    }
}

/// Build the static plan for a routing decision. Never fails.
pub fn plan_for(decision: &RoutingDecision) -> TaskPlan {
    match (decision.category, decision.intent) {
        (AgentCategory::Consumer, Intent::ServiceSearch) => TaskPlan::new(
            decision,
            &[
                "extract_requirements",
                "search_directory",
                "rank_results",
                "format_response",
            ],
            &["directory", "ranking"],
        ),
        (AgentCategory::Consumer, _) => TaskPlan::new(
            decision,
            &["understand_query", "generate_response"],
            &["directory"],
        ),
        (AgentCategory::Provider, Intent::BusinessQuery) => TaskPlan::new(
            decision,
            &[
                "identify_metrics",
                "fetch_business_data",
                "compute_analytics",
                "format_report",
            ],
            &["ledger"],
        ),
        (AgentCategory::Provider, _) => TaskPlan::new(
            decision,
            &["fetch_business_context", "generate_response"],
            &["ledger"],
        ),
        (AgentCategory::General, _) => TaskPlan::new(
            decision,
            &["understand_query", "generate_response"],
            &[],
        ),
    }
}
