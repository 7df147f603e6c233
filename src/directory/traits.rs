//! Store and capability traits for provider lookup, ranking, and the
//! provider-side business ledger.
//!
//! The pipeline only ever talks to these traits; swapping the in-memory
//! implementations for a real directory or graph backend must not touch
//! pipeline logic.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::extract::ExtractedEntities;

/// A service provider listing. Static seed data, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: String,
    pub name: String,
    /// Canonical category slug, lowercase (e.g. "plumbing").
    pub category: String,
    /// City, lowercase, from the gazetteer.
    pub location: String,
    pub rating: f64,
    pub price_range: String,
    pub available: bool,
    pub reviews: u32,
}

/// Filter for a directory search. Empty sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub categories: BTreeSet<String>,
    pub locations: BTreeSet<String>,
}

impl SearchFilter {
    /// Build a filter from extracted entities.
    pub fn from_entities(entities: &ExtractedEntities) -> Self {
        Self {
            categories: entities.service_types.clone(),
            locations: entities.locations.clone(),
        }
    }

    /// True when a record passes the filter.
    pub fn matches(&self, record: &ProviderRecord) -> bool {
        (self.categories.is_empty() || self.categories.contains(&record.category))
            && (self.locations.is_empty() || self.locations.contains(&record.location))
    }
}

/// Read access to the provider directory.
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// Return all records passing the filter, in storage order.
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<ProviderRecord>>;

    /// Look up a single record by id.
    async fn get(&self, id: &str) -> Result<Option<ProviderRecord>>;

    /// The name of this directory implementation.
    fn name(&self) -> &str;
}

/// Ranking capability for search results.
///
/// Contract: reorders the slice best-first and must be deterministic for a
/// given input. The in-memory implementation sorts by rating; a future
/// semantic backend may rank by query relevance instead, behind this same
/// seam.
pub trait Ranker: Send + Sync {
    fn rank(&self, records: &mut [ProviderRecord]);

    /// The name of this ranker implementation.
    fn name(&self) -> &str;
}

/// Ranks by rating descending, review count as tie-break.
#[derive(Debug, Clone, Default)]
pub struct RatingRanker;

impl Ranker for RatingRanker {
    fn rank(&self, records: &mut [ProviderRecord]) {
        records.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.reviews.cmp(&a.reviews))
        });
    }

    fn name(&self) -> &str {
        "rating"
    }
}

// ── Business ledger ───────────────────────────────────────────────

/// Aggregate business metrics for a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSnapshot {
    pub total_inquiries: u32,
    pub pending_inquiries: u32,
    pub completed_jobs: u32,
    pub month_revenue: u64,
    pub previous_month_revenue: u64,
    pub average_rating: f64,
    pub response_rate: u32,
}

/// Lifecycle state of a customer inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    Pending,
    Accepted,
    Completed,
}

/// Customer-declared urgency of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryUrgency {
    Low,
    Medium,
    High,
}

/// A single customer inquiry as seen by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryRecord {
    pub id: String,
    pub customer: String,
    pub service: String,
    pub location: String,
    pub status: InquiryStatus,
    pub urgency: InquiryUrgency,
    pub created_at: DateTime<Utc>,
}

/// Read access to provider business data.
#[async_trait]
pub trait BusinessLedger: Send + Sync {
    /// Aggregate metrics for one provider.
    async fn snapshot(&self, provider_id: &str) -> Result<BusinessSnapshot>;

    /// Recent inquiries for one provider, newest first.
    async fn inquiries(&self, provider_id: &str) -> Result<Vec<InquiryRecord>>;

    /// The name of this ledger implementation.
    fn name(&self) -> &str;
}
