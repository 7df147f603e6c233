//! Consumer agent — service discovery over the provider directory.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::traits::{Agent, AgentReply, AgentRequest, ReplyKind};
use crate::directory::{ProviderDirectory, ProviderRecord, Ranker, SearchFilter};
use crate::routing::{AgentCategory, Intent};

/// Finds and ranks matching providers, then assembles a templated summary.
pub struct ConsumerAgent {
    directory: Arc<dyn ProviderDirectory>,
    ranker: Box<dyn Ranker>,
    top_n: usize,
}

impl ConsumerAgent {
    pub fn new(
        directory: Arc<dyn ProviderDirectory>,
        ranker: Box<dyn Ranker>,
        top_n: usize,
    ) -> Self {
        Self {
            directory,
            ranker,
            top_n,
        }
    }

    async fn service_search(&self, request: &AgentRequest) -> Result<AgentReply> {
        let filter = SearchFilter::from_entities(&request.entities);
        let mut matches = self.directory.search(&filter).await?;
        self.ranker.rank(&mut matches);

        let service = request
            .entities
            .service_types
            .iter()
            .next()
            .map(String::as_str)
            .unwrap_or("service provider");
        let location = request
            .entities
            .locations
            .iter()
            .next()
            .map(String::as_str)
            .unwrap_or("your area");

        if matches.is_empty() {
            return Ok(AgentReply::text(format!(
                "No providers found for {service} in {location} just yet. \
                 Could you share a few more details about what you're looking for?"
            ))
            .with_suggestions(vec![
                "Find a plumber in Colombo".to_string(),
                "Show me electricians in Kandy".to_string(),
            ]));
        }

        let mut message = format!(
            "I found {count} {service} provider{plural} in {location}. ",
            count = matches.len(),
            plural = if matches.len() > 1 { "s" } else { "" },
        );
        let top = &matches[0];
        message.push_str(&format!(
            "Based on ratings, I recommend {name} ({rating} ★, {reviews} reviews).",
            name = top.name,
            rating = top.rating,
            reviews = top.reviews,
        ));

        let recommendations: Vec<ProviderRecord> =
            matches.iter().take(self.top_n).cloned().collect();
        let total = matches.len();

        Ok(AgentReply {
            kind: ReplyKind::ServiceResults,
            message,
            data: Some(serde_json::json!({
                "providers": matches,
                "recommendations": recommendations,
                "total_count": total,
            })),
            suggestions: Vec::new(),
        })
    }

    fn general_query(&self, request: &AgentRequest) -> AgentReply {
        let lowered = request.message.to_lowercase();
        let message = if ["hello", "hi", "hey"].iter().any(|w| lowered.contains(w)) {
            "Hello! I can help you find local service providers. What service \
             are you looking for?"
        } else {
            "Tell me the service you need and your location and I'll find \
             providers near you."
        };
        AgentReply::text(message).with_suggestions(vec![
            "Find a plumber in Colombo".to_string(),
            "I need a painter".to_string(),
        ])
    }
}

#[async_trait]
impl Agent for ConsumerAgent {
    fn category(&self) -> AgentCategory {
        AgentCategory::Consumer
    }

    async fn handle(&self, request: &AgentRequest) -> Result<AgentReply> {
        match request.intent {
            Intent::ServiceSearch => self.service_search(request).await,
            _ => Ok(self.general_query(request)),
        }
    }

    fn name(&self) -> &str {
        "consumer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{InMemoryDirectory, RatingRanker};
    use crate::extract::Extractor;
    use crate::planner::plan_for;
    use crate::routing::{classify, RouteContext, UserRole};

    fn agent() -> ConsumerAgent {
        ConsumerAgent::new(Arc::new(InMemoryDirectory::new()), Box::new(RatingRanker), 3)
    }

    fn search_request(message: &str) -> AgentRequest {
        let extractor = Extractor::new();
        let entities = extractor.extract(message);
        let decision = classify(&RouteContext {
            message,
            user_role: UserRole::Consumer,
            entities: &entities,
        });
        AgentRequest {
            message: message.to_string(),
            user_id: "user-1".to_string(),
            session_id: "session-1".to_string(),
            intent: decision.intent,
            entities,
            plan: plan_for(&decision),
        }
    }

    #[tokio::test]
    async fn plumber_in_colombo_returns_matching_providers() {
        let reply = agent()
            .handle(&search_request("Find me a plumber in Colombo"))
            .await
            .unwrap();

        assert_eq!(reply.kind, ReplyKind::ServiceResults);
        assert!(reply.message.contains("plumbing"));
        assert!(reply.message.contains("colombo"));

        let data = reply.data.unwrap();
        let providers = data["providers"].as_array().unwrap();
        assert!(!providers.is_empty());
        for provider in providers {
            assert_eq!(provider["category"], "plumbing");
            assert_eq!(provider["location"], "colombo");
        }
    }

    #[tokio::test]
    async fn results_are_ranked_rating_descending() {
        let reply = agent()
            .handle(&search_request("plumber in colombo"))
            .await
            .unwrap();
        let data = reply.data.unwrap();
        let providers = data["providers"].as_array().unwrap();
        let ratings: Vec<f64> = providers
            .iter()
            .map(|p| p["rating"].as_f64().unwrap())
            .collect();
        let mut sorted = ratings.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(ratings, sorted);
        // Top match is named in the summary.
        assert!(reply.message.contains("Silva Plumbing Services"));
    }

    #[tokio::test]
    async fn unmatched_search_says_no_providers_found() {
        let reply = agent()
            .handle(&search_request("photographer in Jaffna"))
            .await
            .unwrap();
        assert_eq!(reply.kind, ReplyKind::Text);
        assert!(reply.message.contains("No providers found"));
    }

    #[tokio::test]
    async fn recommendations_are_capped_at_top_n() {
        // Empty filter matches the whole directory, so the cap applies.
        let reply = agent().handle(&search_request("in colombo")).await.unwrap();
        let data = reply.data.unwrap();
        let recommendations = data["recommendations"].as_array().unwrap();
        assert!(recommendations.len() <= 3);
    }
}
