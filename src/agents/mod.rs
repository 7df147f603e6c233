//! Category-specific agents and the dispatcher that selects between them.

pub mod consumer;
pub mod dispatcher;
pub mod general;
pub mod provider;
pub mod traits;

pub use consumer::ConsumerAgent;
pub use dispatcher::Dispatcher;
pub use general::GeneralAgent;
pub use provider::ProviderAgent;
pub use traits::{Agent, AgentReply, AgentRequest, ReplyKind};

use std::sync::Arc;

use crate::config::AgentsConfig;
use crate::directory::{create_ranker, BusinessLedger, ProviderDirectory};

/// Create the standard dispatcher with the consumer, provider, and general
/// agents registered.
pub fn create_dispatcher(
    config: &AgentsConfig,
    directory: Arc<dyn ProviderDirectory>,
    ledger: Arc<dyn BusinessLedger>,
) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Box::new(ConsumerAgent::new(
        directory,
        create_ranker(),
        config.top_recommendations,
    )));
    dispatcher.register(Box::new(ProviderAgent::new(ledger)));
    dispatcher.register(Box::new(GeneralAgent::new()));
    dispatcher
}
