//! In-memory catalog indexes
//!
//! Built once at startup from the loaded records and read-only afterwards,
//! so any number of concurrent queries can share it without locking. Records
//! are stored in source order in a single vector; the indexes refer to them
//! by position, which keeps brand groups in insertion order for free.

use super::record::VehicleRecord;
use std::collections::{BTreeSet, HashMap};

/// Indexed, read-only view of the vehicle catalog
pub struct CatalogIndex {
    records: Vec<VehicleRecord>,
    /// Normalized (trimmed) FIPE code -> record position. Last write wins on
    /// duplicate codes in the source, matching the source-of-truth export.
    by_fipe: HashMap<String, usize>,
    /// Normalized (trimmed, uppercased) brand -> record positions in source order
    by_brand: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Build the indexes. Total and deterministic: records with an empty
    /// code or brand are simply not indexed under that key.
    pub fn build(records: Vec<VehicleRecord>) -> Self {
        let mut by_fipe = HashMap::new();
        let mut by_brand: HashMap<String, Vec<usize>> = HashMap::new();

        for (pos, record) in records.iter().enumerate() {
            if let Some(code) = &record.fipe_code {
                let code = code.trim();
                if !code.is_empty() {
                    by_fipe.insert(code.to_string(), pos);
                }
            }

            let brand = record.brand.trim().to_uppercase();
            if !brand.is_empty() {
                by_brand.entry(brand).or_default().push(pos);
            }
        }

        Self {
            records,
            by_fipe,
            by_brand,
        }
    }

    /// Exact lookup by FIPE code. O(1); surrounding whitespace is ignored.
    pub fn lookup_by_fipe(&self, code: &str) -> Option<&VehicleRecord> {
        self.by_fipe.get(code.trim()).map(|&pos| &self.records[pos])
    }

    /// All records of a brand, in catalog source order. Unknown brand yields
    /// an empty list.
    pub fn records_for_brand(&self, brand: &str) -> Vec<&VehicleRecord> {
        match self.by_brand.get(&brand.trim().to_uppercase()) {
            Some(positions) => positions.iter().map(|&pos| &self.records[pos]).collect(),
            None => Vec::new(),
        }
    }

    /// Distinct normalized brands, lexicographically sorted
    pub fn all_brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = self.by_brand.keys().cloned().collect();
        brands.sort();
        brands
    }

    /// Distinct non-empty categories, sorted and deduplicated
    pub fn all_categories(&self) -> Vec<String> {
        self.distinct_values(|record| record.category.as_deref())
    }

    /// Distinct non-empty quota classes, sorted and deduplicated
    pub fn all_quotas(&self) -> Vec<String> {
        self.distinct_values(|record| record.quota.as_deref())
    }

    fn distinct_values<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&VehicleRecord) -> Option<&str>,
    {
        let values: BTreeSet<String> = self
            .records
            .iter()
            .filter_map(|record| field(record))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        values.into_iter().collect()
    }

    /// Number of records in the catalog (indexed or not)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> VehicleRecord {
        serde_json::from_value(value).unwrap()
    }

    fn sample_index() -> CatalogIndex {
        CatalogIndex::build(vec![
            record(json!({
                "Código Fipe": "002107-5", "Montadora": "TOYOTA", "Modelo": "HILUX",
                "Ano inicial": 2010, "Ano final": 2018, "Categoria": "B", "Cota": "PCD"
            })),
            record(json!({
                "Código Fipe": "002108-3", "Montadora": "toyota ", "Modelo": "COROLLA",
                "Categoria": "A", "Cota": "Taxi"
            })),
            record(json!({
                "Código Fipe": "003001-2", "Montadora": "FORD", "Modelo": "FUSION",
                "Categoria": "B"
            })),
            // No code and no brand: loadable, never indexed
            record(json!({"Modelo": "MISTÉRIO"})),
        ])
    }

    #[test]
    fn test_lookup_by_fipe() {
        let index = sample_index();
        let hilux = index.lookup_by_fipe("002107-5").unwrap();
        assert_eq!(hilux.model, "HILUX");
        assert!(index.lookup_by_fipe("999999-9").is_none());
    }

    #[test]
    fn test_lookup_by_fipe_trims_whitespace() {
        let index = sample_index();
        assert_eq!(
            index.lookup_by_fipe("  002107-5  ").map(|r| r.model.as_str()),
            Some("HILUX")
        );
    }

    #[test]
    fn test_duplicate_codes_last_write_wins() {
        let index = CatalogIndex::build(vec![
            record(json!({"Código Fipe": "111111-1", "Montadora": "A", "Modelo": "FIRST"})),
            record(json!({"Código Fipe": "111111-1", "Montadora": "A", "Modelo": "SECOND"})),
        ]);
        assert_eq!(index.lookup_by_fipe("111111-1").unwrap().model, "SECOND");
    }

    #[test]
    fn test_records_for_brand_normalizes_key() {
        let index = sample_index();
        // " toyota " in the source and "Toyota" in the query both normalize
        let toyotas = index.records_for_brand("  Toyota ");
        assert_eq!(toyotas.len(), 2);
        // Insertion order preserved
        assert_eq!(toyotas[0].model, "HILUX");
        assert_eq!(toyotas[1].model, "COROLLA");
    }

    #[test]
    fn test_records_for_brand_soundness() {
        let index = sample_index();
        for brand in index.all_brands() {
            for record in index.records_for_brand(&brand) {
                assert_eq!(record.brand.trim().to_uppercase(), brand);
            }
        }
    }

    #[test]
    fn test_unknown_brand_is_empty_not_error() {
        let index = sample_index();
        assert!(index.records_for_brand("DELOREAN").is_empty());
    }

    #[test]
    fn test_all_brands_sorted_distinct() {
        let index = sample_index();
        assert_eq!(index.all_brands(), vec!["FORD", "TOYOTA"]);
    }

    #[test]
    fn test_categories_and_quotas() {
        let index = sample_index();
        assert_eq!(index.all_categories(), vec!["A", "B"]);
        assert_eq!(index.all_quotas(), vec!["PCD", "Taxi"]);
    }

    #[test]
    fn test_len_counts_unindexed_records() {
        let index = sample_index();
        assert_eq!(index.len(), 4);
    }
}
