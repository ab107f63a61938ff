//! Search engine
//!
//! Resolves one query at a time against the shared catalog index. No state
//! is retained between calls. An identifier code short-circuits everything
//! else; otherwise candidates come from the brand index and are accepted by
//! substring containment or fuzzy similarity on the model name. Results keep
//! the catalog's source order; an empty result is a normal outcome.

use crate::catalog::{CatalogIndex, VehicleRecord};
use crate::search::extract::QueryExtractor;
use crate::search::similarity::similarity;
use std::sync::Arc;
use tracing::debug;

/// Minimum similarity score (exclusive) for a near-miss model name to count
const SIMILARITY_THRESHOLD: f64 = 0.7;

pub struct SearchEngine {
    index: Arc<CatalogIndex>,
    extractor: QueryExtractor,
}

impl SearchEngine {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        let extractor = QueryExtractor::new(&index);
        Self { index, extractor }
    }

    /// Resolve free query text against the catalog
    pub fn search(&self, query: &str) -> Vec<&VehicleRecord> {
        let parsed = self.extractor.parse(query);
        debug!(
            fipe_code = ?parsed.fipe_code,
            brand = ?parsed.brand,
            year = ?parsed.year,
            "Parsed query"
        );

        if let Some(code) = &parsed.fipe_code {
            if let Some(record) = self.index.lookup_by_fipe(code) {
                return vec![record];
            }
        }

        let Some(brand) = &parsed.brand else {
            return Vec::new();
        };

        // Model text: the query with the matched brand and year tokens each
        // removed once, in the index's normalized (uppercase) form. The year
        // is a filter, not part of the model name; leaving it in would make
        // a brand+year query match nothing.
        let mut model_text = parsed.raw.to_uppercase().replacen(brand.as_str(), "", 1);
        if let Some(year) = parsed.year {
            model_text = model_text.replacen(&year.to_string(), "", 1);
        }

        self.matching_records(brand, model_text.trim(), parsed.year)
    }

    /// Resolve pre-extracted fields, bypassing the text extractor. Used when
    /// an upstream extraction step already produced structured fields.
    pub fn search_structured(
        &self,
        brand: Option<&str>,
        model: Option<&str>,
        year: Option<i32>,
        fipe_code: Option<&str>,
    ) -> Vec<&VehicleRecord> {
        if let Some(code) = fipe_code {
            if let Some(record) = self.index.lookup_by_fipe(code) {
                return vec![record];
            }
        }

        let Some(brand) = brand else {
            return Vec::new();
        };

        let model_text = model.unwrap_or("").trim().to_uppercase();
        self.matching_records(brand, &model_text, year)
    }

    /// Brand-scoped candidates passing the model check and the year filter,
    /// in catalog source order. An empty model text keeps every brand record
    /// (the brand-only fallback); the year filter still applies to those.
    fn matching_records(&self, brand: &str, model_text: &str, year: Option<i32>) -> Vec<&VehicleRecord> {
        self.index
            .records_for_brand(brand)
            .into_iter()
            .filter(|record| model_matches(&record.normalized_model(), model_text))
            .filter(|record| year_permits(record, year))
            .collect()
    }
}

fn model_matches(candidate_model: &str, model_text: &str) -> bool {
    candidate_model.contains(model_text)
        || similarity(candidate_model, model_text) > SIMILARITY_THRESHOLD
}

/// Fail-open year filter: a record is excluded only when a year was supplied
/// and the record carries a fully numeric range that the year falls outside.
/// Absent or unparseable bounds never exclude a candidate.
fn year_permits(record: &VehicleRecord, year: Option<i32>) -> bool {
    match (year, record.year_range()) {
        (Some(year), Some((start, end))) => start <= year && year <= end,
        _ => true,
    }
}
