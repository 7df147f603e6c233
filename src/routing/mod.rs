//! Message routing — resolves which agent category handles a given message.

pub mod keyword;
pub mod traits;

pub use keyword::{classify, KeywordRouter};
pub use traits::{
    AgentCategory, Intent, MatchedBy, RouteContext, Router, RoutingDecision, UserRole,
};

/// Create the default keyword router.
pub fn create_router() -> Box<dyn Router> {
    Box::new(KeywordRouter::new())
}
