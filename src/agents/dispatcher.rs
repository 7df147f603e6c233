//! Dispatcher — hands a routed request to the agent bound to its category.

use anyhow::Result;
use std::collections::HashMap;

use super::general::GeneralAgent;
use super::traits::{Agent, AgentReply, AgentRequest};
use crate::routing::AgentCategory;

/// Registry of agents keyed by category. A category with no registered agent
/// falls back to the general assistance responder; agent errors propagate to
/// the caller untouched.
pub struct Dispatcher {
    agents: HashMap<AgentCategory, Box<dyn Agent>>,
    fallback: Box<dyn Agent>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
            fallback: Box::new(GeneralAgent::new()),
        }
    }

    /// Register an agent under its own category, replacing any previous one.
    pub fn register(&mut self, agent: Box<dyn Agent>) {
        self.agents.insert(agent.category(), agent);
    }

    /// Dispatch one request to the agent for `category`.
    pub async fn dispatch(
        &self,
        category: AgentCategory,
        request: &AgentRequest,
    ) -> Result<AgentReply> {
        let agent = self.agents.get(&category).unwrap_or(&self.fallback);
        tracing::debug!(
            agent = agent.name(),
            category = %category,
            user_id = %request.user_id,
            "dispatching request"
        );
        agent.handle(request).await
    }

    /// Names of registered agents, for health reporting.
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.values().map(|a| a.name()).collect()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedEntities;
    use crate::planner::plan_for;
    use crate::routing::{Intent, MatchedBy, RoutingDecision};
    use async_trait::async_trait;

    struct FailingAgent;

    #[async_trait]
    impl Agent for FailingAgent {
        fn category(&self) -> AgentCategory {
            AgentCategory::Consumer
        }

        async fn handle(&self, _request: &AgentRequest) -> Result<AgentReply> {
            anyhow::bail!("directory unavailable")
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn request(category: AgentCategory, intent: Intent) -> AgentRequest {
        let decision = RoutingDecision {
            category,
            intent,
            confidence: 0.5,
            matched_by: MatchedBy::Fallback,
        };
        AgentRequest {
            message: "hello".to_string(),
            user_id: "user-1".to_string(),
            session_id: "session-1".to_string(),
            intent,
            entities: ExtractedEntities::default(),
            plan: plan_for(&decision),
        }
    }

    #[tokio::test]
    async fn unregistered_category_falls_back_to_general() {
        let dispatcher = Dispatcher::new();
        let reply = dispatcher
            .dispatch(
                AgentCategory::Consumer,
                &request(AgentCategory::Consumer, Intent::General),
            )
            .await
            .unwrap();
        assert!(reply.message.contains("Kumbuk assistant"));
    }

    #[tokio::test]
    async fn agent_errors_propagate_to_the_caller() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Box::new(FailingAgent));

        let result = dispatcher
            .dispatch(
                AgentCategory::Consumer,
                &request(AgentCategory::Consumer, Intent::ServiceSearch),
            )
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("directory unavailable"));
    }

    #[tokio::test]
    async fn register_replaces_agent_for_category() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Box::new(FailingAgent));
        assert_eq!(dispatcher.agent_names(), vec!["failing"]);
    }
}
