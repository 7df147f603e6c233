//! General assistance agent — static greeting, help, and fallback replies.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{Agent, AgentReply, AgentRequest};
use crate::routing::AgentCategory;

/// Responder for unclassified messages and greetings. Also serves as the
/// dispatcher's fallback when no agent is registered for a category.
#[derive(Debug, Clone, Default)]
pub struct GeneralAgent;

impl GeneralAgent {
    pub fn new() -> Self {
        Self
    }

    fn suggestions() -> Vec<String> {
        vec![
            "Find a plumber in Colombo".to_string(),
            "Show me electricians in Kandy".to_string(),
            "I need a painter".to_string(),
        ]
    }
}

#[async_trait]
impl Agent for GeneralAgent {
    fn category(&self) -> AgentCategory {
        AgentCategory::General
    }

    async fn handle(&self, request: &AgentRequest) -> Result<AgentReply> {
        let lowered = request.message.to_lowercase();

        let message = if ["hello", "hi", "hey"].iter().any(|w| lowered.contains(w)) {
            "Hello! I'm your Kumbuk assistant. I can help you find local service \
             providers like plumbers, electricians, painters, and more. What \
             service are you looking for?"
        } else if lowered.contains("help") || lowered.contains("how") {
            "I can help you find local service providers in Sri Lanka! Just tell \
             me what service you need and your location. For example: 'Find me a \
             plumber in Colombo' or 'I need an electrician in Kandy'."
        } else {
            "I'm here to help you find local services! You can ask me to find \
             plumbers, electricians, painters, cleaners, and many other service \
             providers. What do you need today?"
        };

        Ok(AgentReply::text(message).with_suggestions(Self::suggestions()))
    }

    fn name(&self) -> &str {
        "general"
    }
}
