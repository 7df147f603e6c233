//! Provider agent — business analytics over the mock ledger.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::traits::{Agent, AgentReply, AgentRequest, ReplyKind};
use crate::directory::{BusinessLedger, InquiryStatus, InquiryUrgency};
use crate::routing::{AgentCategory, Intent};

/// Answers business queries (inquiries, revenue, ratings, dashboard) for a
/// provider, reading from the injected ledger.
pub struct ProviderAgent {
    ledger: Arc<dyn BusinessLedger>,
}

impl ProviderAgent {
    pub fn new(ledger: Arc<dyn BusinessLedger>) -> Self {
        Self { ledger }
    }

    async fn business_query(&self, request: &AgentRequest) -> Result<AgentReply> {
        let lowered = request.message.to_lowercase();

        if lowered.contains("inquir") || lowered.contains("request") {
            self.inquiry_summary(&request.user_id).await
        } else if ["revenue", "earn", "income"].iter().any(|w| lowered.contains(w)) {
            self.revenue_summary(&request.user_id).await
        } else if ["rating", "review"].iter().any(|w| lowered.contains(w)) {
            self.rating_summary(&request.user_id).await
        } else {
            self.analytics_dashboard(&request.user_id).await
        }
    }

    async fn inquiry_summary(&self, provider_id: &str) -> Result<AgentReply> {
        let snapshot = self.ledger.snapshot(provider_id).await?;
        let inquiries = self.ledger.inquiries(provider_id).await?;

        let pending = inquiries
            .iter()
            .filter(|i| i.status == InquiryStatus::Pending)
            .count();
        let urgent = inquiries
            .iter()
            .filter(|i| i.urgency == InquiryUrgency::High)
            .count();

        let mut message = format!("You have {pending} pending inquiries");
        if urgent > 0 {
            message.push_str(&format!(
                ", including {urgent} urgent request{}",
                if urgent > 1 { "s" } else { "" }
            ));
        }
        message.push_str(". ");
        if let Some(latest) = inquiries.first() {
            message.push_str(&format!(
                "Latest: {} in {} needs {}.",
                latest.customer, latest.location, latest.service
            ));
        }

        Ok(AgentReply {
            kind: ReplyKind::InquirySummary,
            message,
            data: Some(serde_json::json!({
                "inquiries": inquiries,
                "stats": {
                    "total": snapshot.total_inquiries,
                    "pending": pending,
                    "urgent": urgent,
                },
            })),
            suggestions: Vec::new(),
        })
    }

    async fn revenue_summary(&self, provider_id: &str) -> Result<AgentReply> {
        let snapshot = self.ledger.snapshot(provider_id).await?;
        let revenue = snapshot.month_revenue;
        let completed = snapshot.completed_jobs;
        let avg_per_job = if completed > 0 {
            revenue / u64::from(completed)
        } else {
            0
        };
        let previous = snapshot.previous_month_revenue;
        let growth = if previous > 0 {
            (revenue as f64 - previous as f64) / previous as f64 * 100.0
        } else {
            0.0
        };

        let mut message = format!(
            "This month, you've earned Rs. {revenue} from {completed} completed \
             jobs (avg Rs. {avg_per_job} per job). "
        );
        if growth >= 0.0 {
            message.push_str(&format!("That's {growth:.1}% higher than last month!"));
        } else {
            message.push_str(&format!(
                "Revenue is {:.1}% lower than last month.",
                growth.abs()
            ));
        }

        Ok(AgentReply {
            kind: ReplyKind::RevenueSummary,
            message,
            data: Some(serde_json::json!({
                "revenue": {
                    "this_month": revenue,
                    "last_month": previous,
                    "growth_percent": (growth * 10.0).round() / 10.0,
                    "completed_jobs": completed,
                    "avg_per_job": avg_per_job,
                },
            })),
            suggestions: Vec::new(),
        })
    }

    async fn rating_summary(&self, provider_id: &str) -> Result<AgentReply> {
        let snapshot = self.ledger.snapshot(provider_id).await?;
        let rating = snapshot.average_rating;
        let response_rate = snapshot.response_rate;

        let mut message = format!(
            "Your current rating is {rating}/5.0 with a {response_rate}% response rate. "
        );
        if rating >= 4.5 {
            message.push_str("Excellent work! Keep maintaining this high quality service.");
        } else if rating >= 4.0 {
            message.push_str("Good performance! Focus on quick responses to improve further.");
        } else {
            message.push_str(
                "There's room for improvement. Consider faster responses and better communication.",
            );
        }

        Ok(AgentReply {
            kind: ReplyKind::RatingSummary,
            message,
            data: Some(serde_json::json!({
                "rating": {
                    "average": rating,
                    "response_rate": response_rate,
                    "total_reviews": snapshot.total_inquiries,
                },
            })),
            suggestions: vec![
                "Respond to inquiries within 1 hour".to_string(),
                "Send updates during long jobs".to_string(),
                "Ask satisfied customers for reviews".to_string(),
            ],
        })
    }

    async fn analytics_dashboard(&self, provider_id: &str) -> Result<AgentReply> {
        let snapshot = self.ledger.snapshot(provider_id).await?;
        let inquiries = self.ledger.inquiries(provider_id).await?;

        let message = format!(
            "Here's your business overview:\n\
             Total inquiries: {total}\n\
             Pending: {pending}\n\
             Completed jobs: {completed}\n\
             Revenue (this month): Rs. {revenue}\n\
             Average rating: {rating}/5.0\n\
             Response rate: {response_rate}%",
            total = snapshot.total_inquiries,
            pending = snapshot.pending_inquiries,
            completed = snapshot.completed_jobs,
            revenue = snapshot.month_revenue,
            rating = snapshot.average_rating,
            response_rate = snapshot.response_rate,
        );

        Ok(AgentReply {
            kind: ReplyKind::AnalyticsDashboard,
            message,
            data: Some(serde_json::json!({
                "analytics": snapshot,
                "recent_inquiries": inquiries,
            })),
            suggestions: Vec::new(),
        })
    }

    fn general_query(&self, request: &AgentRequest) -> AgentReply {
        let lowered = request.message.to_lowercase();
        let message = if ["hello", "hi", "hey"].iter().any(|w| lowered.contains(w)) {
            "Hello! I'm your Kumbuk business assistant. I can help you manage \
             inquiries, track revenue, view analytics, and improve your service \
             ratings. What would you like to know?"
        } else {
            "I'm here to help you manage your service business! Ask me about \
             inquiries, revenue, ratings, or analytics."
        };
        AgentReply::text(message).with_suggestions(vec![
            "Show pending inquiries".to_string(),
            "How much did I earn this month?".to_string(),
            "What's my current rating?".to_string(),
        ])
    }
}

#[async_trait]
impl Agent for ProviderAgent {
    fn category(&self) -> AgentCategory {
        AgentCategory::Provider
    }

    async fn handle(&self, request: &AgentRequest) -> Result<AgentReply> {
        match request.intent {
            Intent::BusinessQuery => self.business_query(request).await,
            _ => Ok(self.general_query(request)),
        }
    }

    fn name(&self) -> &str {
        "provider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryLedger;
    use crate::extract::ExtractedEntities;
    use crate::planner::plan_for;
    use crate::routing::{MatchedBy, RoutingDecision};

    fn agent() -> ProviderAgent {
        ProviderAgent::new(Arc::new(InMemoryLedger::new()))
    }

    fn business_request(message: &str) -> AgentRequest {
        let decision = RoutingDecision {
            category: AgentCategory::Provider,
            intent: Intent::BusinessQuery,
            confidence: 0.95,
            matched_by: MatchedBy::BusinessKeyword,
        };
        AgentRequest {
            message: message.to_string(),
            user_id: "prov_001".to_string(),
            session_id: "session-1".to_string(),
            intent: decision.intent,
            entities: ExtractedEntities::default(),
            plan: plan_for(&decision),
        }
    }

    #[tokio::test]
    async fn earnings_question_returns_revenue_figures() {
        let reply = agent()
            .handle(&business_request("How much did I earn this month?"))
            .await
            .unwrap();

        assert_eq!(reply.kind, ReplyKind::RevenueSummary);
        assert!(reply.message.contains("Rs. 125000"));
        let data = reply.data.unwrap();
        assert_eq!(data["revenue"]["this_month"], 125_000);
        assert_eq!(data["revenue"]["completed_jobs"], 89);
    }

    #[tokio::test]
    async fn revenue_growth_is_deterministic() {
        let reply = agent()
            .handle(&business_request("show my revenue"))
            .await
            .unwrap();
        let data = reply.data.unwrap();
        // 125_000 vs 112_500 is a fixed +11.1%.
        assert_eq!(data["revenue"]["growth_percent"], 11.1);
        assert!(reply.message.contains("higher than last month"));
    }

    #[tokio::test]
    async fn inquiry_question_summarizes_pending_and_urgent() {
        let reply = agent()
            .handle(&business_request("any new inquiries?"))
            .await
            .unwrap();

        assert_eq!(reply.kind, ReplyKind::InquirySummary);
        assert!(reply.message.contains("2 pending"));
        assert!(reply.message.contains("1 urgent request"));
        assert!(reply.message.contains("Nimal Perera"));
    }

    #[tokio::test]
    async fn rating_question_includes_coaching_tips() {
        let reply = agent()
            .handle(&business_request("what's my rating?"))
            .await
            .unwrap();

        assert_eq!(reply.kind, ReplyKind::RatingSummary);
        assert!(reply.message.contains("4.7/5.0"));
        assert!(reply.message.contains("Excellent work"));
        assert_eq!(reply.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn unspecific_business_question_gets_the_dashboard() {
        let reply = agent()
            .handle(&business_request("how is my business doing?"))
            .await
            .unwrap();

        assert_eq!(reply.kind, ReplyKind::AnalyticsDashboard);
        assert!(reply.message.contains("business overview"));
        assert!(reply.message.contains("Rs. 125000"));
    }

    #[tokio::test]
    async fn non_business_intent_gets_the_assistant_greeting() {
        let mut request = business_request("hello");
        request.intent = Intent::General;
        let reply = agent().handle(&request).await.unwrap();
        assert_eq!(reply.kind, ReplyKind::Text);
        assert!(reply.message.contains("business assistant"));
    }
}
