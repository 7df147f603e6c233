//! In-memory directory and ledger implementations backed by static seed data.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::traits::{
    BusinessLedger, BusinessSnapshot, InquiryRecord, InquiryStatus, InquiryUrgency,
    ProviderDirectory, ProviderRecord, SearchFilter,
};

/// Directory over a fixed, immutable provider list.
pub struct InMemoryDirectory {
    providers: Vec<ProviderRecord>,
}

impl InMemoryDirectory {
    /// Create a directory with the standard seed listings.
    pub fn new() -> Self {
        Self {
            providers: seed_providers(),
        }
    }

    /// Create a directory over an explicit record set.
    pub fn with_providers(providers: Vec<ProviderRecord>) -> Self {
        Self { providers }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderDirectory for InMemoryDirectory {
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<ProviderRecord>> {
        Ok(self
            .providers
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<ProviderRecord>> {
        Ok(self.providers.iter().find(|r| r.id == id).cloned())
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

fn record(
    id: &str,
    name: &str,
    category: &str,
    location: &str,
    rating: f64,
    price_range: &str,
    available: bool,
    reviews: u32,
) -> ProviderRecord {
    ProviderRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        location: location.to_string(),
        rating,
        price_range: price_range.to_string(),
        available,
        reviews,
    }
}

/// The standard seed listings.
pub fn seed_providers() -> Vec<ProviderRecord> {
    vec![
        record(
            "prov_001",
            "Silva Plumbing Services",
            "plumbing",
            "colombo",
            4.8,
            "Rs. 3000-5000",
            true,
            127,
        ),
        record(
            "prov_002",
            "Quick Fix Electricians",
            "electrical",
            "kandy",
            4.6,
            "Rs. 2500-4500",
            true,
            89,
        ),
        record(
            "prov_003",
            "Bright Home Painters",
            "painting",
            "galle",
            4.9,
            "Rs. 4000-8000",
            false,
            156,
        ),
        record(
            "prov_004",
            "Lanka Pipe Masters",
            "plumbing",
            "colombo",
            4.5,
            "Rs. 2500-4000",
            true,
            64,
        ),
        record(
            "prov_005",
            "Green Thumb Gardens",
            "gardening",
            "kandy",
            4.7,
            "Rs. 2000-3500",
            true,
            73,
        ),
        record(
            "prov_006",
            "Coastal Carpentry Works",
            "carpentry",
            "negombo",
            4.4,
            "Rs. 3500-6000",
            true,
            52,
        ),
        record(
            "prov_007",
            "Sparkle Clean Crew",
            "cleaning",
            "colombo",
            4.3,
            "Rs. 1500-3000",
            true,
            98,
        ),
    ]
}

// ── Ledger ────────────────────────────────────────────────────────

/// Ledger over a fixed business snapshot and inquiry list. The same mock book
/// is returned for every provider id.
pub struct InMemoryLedger {
    snapshot: BusinessSnapshot,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            snapshot: BusinessSnapshot {
                total_inquiries: 127,
                pending_inquiries: 8,
                completed_jobs: 89,
                month_revenue: 125_000,
                previous_month_revenue: 112_500,
                average_rating: 4.7,
                response_rate: 92,
            },
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BusinessLedger for InMemoryLedger {
    async fn snapshot(&self, _provider_id: &str) -> Result<BusinessSnapshot> {
        Ok(self.snapshot.clone())
    }

    async fn inquiries(&self, _provider_id: &str) -> Result<Vec<InquiryRecord>> {
        let now = Utc::now();
        Ok(vec![
            InquiryRecord {
                id: "inq_001".to_string(),
                customer: "Nimal Perera".to_string(),
                service: "plumbing".to_string(),
                location: "colombo".to_string(),
                status: InquiryStatus::Pending,
                urgency: InquiryUrgency::High,
                created_at: now - Duration::hours(2),
            },
            InquiryRecord {
                id: "inq_002".to_string(),
                customer: "Kamal Silva".to_string(),
                service: "electrical".to_string(),
                location: "nugegoda".to_string(),
                status: InquiryStatus::Pending,
                urgency: InquiryUrgency::Medium,
                created_at: now - Duration::hours(5),
            },
        ])
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}
