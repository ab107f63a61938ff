//! Query extractor
//!
//! Turns free-form message text into structured lookup fields. Three
//! independent rules, any subset of which may fire: a FIPE identifier code,
//! a standalone model year, and a known brand from the catalog vocabulary.
//! Extraction never fails; unparseable input yields an all-absent query.

use crate::catalog::CatalogIndex;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;

/// Structured fields extracted from one query. Transient, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// FIPE code, first occurrence of the 6-digit/hyphen/1-digit shape
    pub fipe_code: Option<String>,
    /// First standalone 4-digit year in 1900..=2099
    pub year: Option<i32>,
    /// Normalized brand, drawn only from brands present in the catalog
    pub brand: Option<String>,
    /// Original unmodified query text
    pub raw: String,
}

/// Stateless extractor over a fixed brand vocabulary
pub struct QueryExtractor {
    fipe_pattern: Regex,
    year_pattern: Regex,
    /// Catalog brand names, uppercased, with leftmost-longest matching so a
    /// brand whose name contains another brand's name always wins the overlap
    brand_scanner: AhoCorasick,
    brand_names: Vec<String>,
}

impl QueryExtractor {
    /// Build an extractor over the catalog's brand vocabulary
    pub fn new(index: &CatalogIndex) -> Self {
        let brand_names = index.all_brands();
        let brand_scanner = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&brand_names)
            .expect("brand vocabulary builds a valid automaton");

        Self {
            fipe_pattern: Regex::new(r"\d{6}-\d").expect("valid FIPE code pattern"),
            year_pattern: Regex::new(r"\b(19|20)\d{2}\b").expect("valid year pattern"),
            brand_scanner,
            brand_names,
        }
    }

    /// Parse query text into structured fields. All rules are independent;
    /// none is required to match.
    pub fn parse(&self, query: &str) -> ParsedQuery {
        let fipe_code = self
            .fipe_pattern
            .find(query)
            .map(|m| m.as_str().to_string());

        let year = self
            .year_pattern
            .find(query)
            .and_then(|m| m.as_str().parse().ok());

        let brand = self
            .brand_scanner
            .find(query.to_uppercase().as_str())
            .map(|m| self.brand_names[m.pattern().as_usize()].clone());

        ParsedQuery {
            fipe_code,
            year,
            brand,
            raw: query.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleRecord;
    use serde_json::json;

    fn extractor_with_brands(brands: &[&str]) -> QueryExtractor {
        let records = brands
            .iter()
            .map(|brand| {
                serde_json::from_value::<VehicleRecord>(json!({
                    "Montadora": brand, "Modelo": "X"
                }))
                .unwrap()
            })
            .collect();
        QueryExtractor::new(&CatalogIndex::build(records))
    }

    #[test]
    fn test_fipe_code_only() {
        let extractor = extractor_with_brands(&["TOYOTA"]);
        let parsed = extractor.parse("002107-5");
        assert_eq!(parsed.fipe_code.as_deref(), Some("002107-5"));
        assert_eq!(parsed.year, None);
        assert_eq!(parsed.brand, None);
    }

    #[test]
    fn test_brand_model_year() {
        let extractor = extractor_with_brands(&["TOYOTA", "FORD"]);
        let parsed = extractor.parse("Toyota Hilux 2015");
        assert_eq!(parsed.brand.as_deref(), Some("TOYOTA"));
        assert_eq!(parsed.year, Some(2015));
        assert_eq!(parsed.fipe_code, None);
        assert_eq!(parsed.raw, "Toyota Hilux 2015");
    }

    #[test]
    fn test_year_must_be_standalone_token() {
        let extractor = extractor_with_brands(&[]);
        // Embedded in a longer digit run: not a year
        assert_eq!(extractor.parse("serial 120157890").year, None);
        assert_eq!(extractor.parse("ano 2015 ok").year, Some(2015));
    }

    #[test]
    fn test_year_century_bounds() {
        let extractor = extractor_with_brands(&[]);
        assert_eq!(extractor.parse("1899").year, None);
        assert_eq!(extractor.parse("1900").year, Some(1900));
        assert_eq!(extractor.parse("2099").year, Some(2099));
        assert_eq!(extractor.parse("2100").year, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let extractor = extractor_with_brands(&[]);
        let parsed = extractor.parse("002107-5 ou 003001-2, de 2010 a 2018");
        assert_eq!(parsed.fipe_code.as_deref(), Some("002107-5"));
        assert_eq!(parsed.year, Some(2010));
    }

    #[test]
    fn test_brand_match_is_case_insensitive() {
        let extractor = extractor_with_brands(&["VOLKSWAGEN"]);
        assert_eq!(
            extractor.parse("volkswagen gol").brand.as_deref(),
            Some("VOLKSWAGEN")
        );
    }

    #[test]
    fn test_overlapping_brand_names_longest_wins() {
        // One brand's name is a prefix of another's: the longer name must win
        // regardless of catalog discovery order.
        let extractor = extractor_with_brands(&["MERCEDES-BENZ", "MERCEDES"]);
        assert_eq!(
            extractor.parse("mercedes-benz sprinter").brand.as_deref(),
            Some("MERCEDES-BENZ")
        );
        assert_eq!(
            extractor.parse("mercedes classe a").brand.as_deref(),
            Some("MERCEDES")
        );
    }

    #[test]
    fn test_unparseable_input_yields_empty_query() {
        let extractor = extractor_with_brands(&["TOYOTA"]);
        let parsed = extractor.parse("qual o carro mais barato?");
        assert_eq!(parsed.fipe_code, None);
        assert_eq!(parsed.year, None);
        assert_eq!(parsed.brand, None);
    }

    #[test]
    fn test_empty_vocabulary_never_matches_brand() {
        let extractor = extractor_with_brands(&[]);
        assert_eq!(extractor.parse("Toyota Hilux").brand, None);
    }
}
