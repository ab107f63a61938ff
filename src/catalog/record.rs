//! Vehicle record type
//!
//! Maps one entry of the FIPE catalog JSON. The source field labels are
//! Portuguese and are preserved verbatim on the wire; a record missing any
//! field still deserializes, with the field absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One catalog entry. Immutable after load; the index refers to records by
/// position, so this type carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// FIPE identifier code, e.g. `002107-5`
    #[serde(rename = "Código Fipe", default, deserialize_with = "text_opt")]
    pub fipe_code: Option<String>,

    #[serde(rename = "Montadora", default, deserialize_with = "text")]
    pub brand: String,

    #[serde(rename = "Modelo", default, deserialize_with = "text")]
    pub model: String,

    #[serde(rename = "Tipo veículo", default, deserialize_with = "text_opt")]
    pub vehicle_type: Option<String>,

    /// First model year. Kept as raw text: the source mixes numbers and
    /// strings, and the year filter must stay fail-open on garbage.
    #[serde(rename = "Ano inicial", default, deserialize_with = "text_opt")]
    pub year_start: Option<String>,

    /// Last model year, same caveats as `year_start`
    #[serde(rename = "Ano final", default, deserialize_with = "text_opt")]
    pub year_end: Option<String>,

    #[serde(rename = "Categoria", default, deserialize_with = "text_opt")]
    pub category: Option<String>,

    #[serde(rename = "Cota", default, deserialize_with = "text_opt")]
    pub quota: Option<String>,
}

impl VehicleRecord {
    /// Model string normalized for matching: trimmed and uppercased
    pub fn normalized_model(&self) -> String {
        self.model.trim().to_uppercase()
    }

    /// Year range as integers, when both bounds are present and numeric
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let start = parse_year(self.year_start.as_deref())?;
        let end = parse_year(self.year_end.as_deref())?;
        Some((start, end))
    }
}

fn parse_year(raw: Option<&str>) -> Option<i32> {
    raw?.trim().parse().ok()
}

/// Accept a JSON string or number, yielding its text form
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_opt(deserializer)?.unwrap_or_default())
}

/// Accept a JSON string, number or null, yielding optional text
fn text_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
