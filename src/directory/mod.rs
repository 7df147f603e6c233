//! Provider directory — listings, ranking, and the provider business ledger.

pub mod in_memory;
pub mod traits;

pub use in_memory::{seed_providers, InMemoryDirectory, InMemoryLedger};
pub use traits::{
    BusinessLedger, BusinessSnapshot, InquiryRecord, InquiryStatus, InquiryUrgency,
    ProviderDirectory, ProviderRecord, Ranker, RatingRanker, SearchFilter,
};

use std::sync::Arc;

/// Create the default in-memory provider directory.
pub fn create_directory() -> Arc<dyn ProviderDirectory> {
    Arc::new(InMemoryDirectory::new())
}

/// Create the default in-memory business ledger.
pub fn create_ledger() -> Arc<dyn BusinessLedger> {
    Arc::new(InMemoryLedger::new())
}

/// Create the default rating-based ranker.
pub fn create_ranker() -> Box<dyn Ranker> {
    Box::new(RatingRanker)
}
