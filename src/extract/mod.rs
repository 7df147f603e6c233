//! Entity extraction — pattern-matches chat text against the service
//! vocabulary, the city gazetteer, price phrases, and urgency markers.
//!
//! Extraction is best-effort and side-effect free: absence of a match yields
//! empty sets, never an error.

pub mod vocab;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use vocab::{CITY_GAZETTEER, SERVICE_VOCABULARY, STOPWORDS};

/// An upper price bound mentioned in a message ("under Rs. 5000").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBound {
    pub amount: u64,
    pub currency: String,
}

/// How soon the caller needs the service. Variants are ordered by urgency so
/// the strongest marker in a message wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Weekend,
    Tomorrow,
    Today,
    Immediate,
}

/// Entities recognized in a single message. Derived per request and discarded
/// after the response is produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Recognized cities, lowercase, from the fixed gazetteer.
    pub locations: BTreeSet<String>,
    /// Canonical service category slugs (e.g. "plumbing").
    pub service_types: BTreeSet<String>,
    /// Upper price bound, if a price phrase was present.
    pub price_limit: Option<PriceBound>,
    /// Strongest urgency marker, if any.
    pub urgency: Option<Urgency>,
}

impl ExtractedEntities {
    /// True when nothing at all was recognized.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.service_types.is_empty()
            && self.price_limit.is_none()
            && self.urgency.is_none()
    }
}

/// Entity extractor with a pre-compiled price pattern.
pub struct Extractor {
    price_pattern: Regex,
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            // "rs 5000", "rs. 5000", "rupees 5000"
            price_pattern: Regex::new(r"(?:rs\.?|rupees?)\s*(\d+)")
                .expect("price pattern is valid"),
        }
    }

    /// Normalize raw chat text: collapse whitespace, strip symbols that are
    /// neither word characters nor common punctuation.
    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = String::with_capacity(text.len());
        let mut pending_space = false;
        for ch in text.chars() {
            if ch.is_whitespace() {
                pending_space = !cleaned.is_empty();
                continue;
            }
            if ch.is_alphanumeric() || matches!(ch, '.' | ',' | '!' | '?' | '-' | '_' | '\'') {
                if pending_space {
                    cleaned.push(' ');
                    pending_space = false;
                }
                cleaned.push(ch);
            }
        }
        cleaned
    }

    /// Run extraction over already-cleaned text.
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let lowered = text.to_lowercase();
        let mut entities = ExtractedEntities::default();

        for city in CITY_GAZETTEER {
            if lowered.contains(city) {
                entities.locations.insert((*city).to_string());
            }
        }

        for (surface, canonical) in SERVICE_VOCABULARY {
            if lowered.contains(surface) {
                entities.service_types.insert((*canonical).to_string());
            }
        }

        if let Some(captures) = self.price_pattern.captures(&lowered) {
            if let Ok(amount) = captures[1].parse::<u64>() {
                entities.price_limit = Some(PriceBound {
                    amount,
                    currency: "LKR".to_string(),
                });
            }
        }

        entities.urgency = extract_urgency(&lowered);

        entities
    }

    /// Extract up to ten content keywords, stopwords removed.
    pub fn keywords(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
            .filter(|word| word.len() > 2 && !STOPWORDS.contains(word))
            .map(|word| word.to_string())
            .take(10)
            .collect()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_urgency(lowered: &str) -> Option<Urgency> {
    let mut strongest = None;
    for (marker, urgency) in [
        ("weekend", Urgency::Weekend),
        ("tomorrow", Urgency::Tomorrow),
        ("today", Urgency::Today),
        ("urgent", Urgency::Immediate),
        ("emergency", Urgency::Immediate),
        ("asap", Urgency::Immediate),
    ] {
        if lowered.contains(marker) && strongest.map_or(true, |current| urgency > current) {
            strongest = Some(urgency);
        }
    }
    strongest
}
