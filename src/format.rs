//! Reply formatting
//!
//! Renders search results as WhatsApp-ready Portuguese text. One record gets
//! the full detail card; several get a numbered summary capped at five lines
//! with a remainder count; none gets usage guidance.

use crate::catalog::VehicleRecord;

/// Summary lines shown before the remainder count kicks in
const SUMMARY_LIMIT: usize = 5;

const NOT_FOUND: &str = "❌ Nenhum veículo encontrado com os critérios informados.\n\n\
    Tente novamente com:\n- Código FIPE\n- Marca e Modelo\n- Marca e Ano";

/// Full detail card for a single vehicle
pub fn format_vehicle(record: &VehicleRecord) -> String {
    format!(
        "📋 *Informações do Veículo*\n\
         \n\
         🏷️ *Código FIPE:* {}\n\
         🚗 *Montadora:* {}\n\
         📝 *Modelo:* {}\n\
         🎯 *Tipo:* {}\n\
         📅 *Anos:* {} - {}\n\
         \n\
         💰 *CATEGORIA:* {}\n\
         📊 *COTA:* {}",
        or_na(record.fipe_code.as_deref()),
        or_na(Some(&record.brand)),
        or_na(Some(&record.model)),
        or_na(record.vehicle_type.as_deref()),
        or_na(record.year_start.as_deref()),
        or_na(record.year_end.as_deref()),
        or_na(record.category.as_deref()),
        or_na(record.quota.as_deref()),
    )
}

/// Render a result list as one reply message
pub fn format_reply(records: &[&VehicleRecord]) -> String {
    match records {
        [] => NOT_FOUND.to_string(),
        [single] => format_vehicle(single),
        many => {
            let mut reply = format!("🔍 Encontrados {} veículos:\n\n", many.len());
            for (i, record) in many.iter().take(SUMMARY_LIMIT).enumerate() {
                reply.push_str(&format!(
                    "{}. {} {}\n   FIPE: {} | Cota: {}\n\n",
                    i + 1,
                    or_na(Some(&record.brand)),
                    or_na(Some(&record.model)),
                    or_na(record.fipe_code.as_deref()),
                    or_na(record.quota.as_deref()),
                ));
            }
            if many.len() > SUMMARY_LIMIT {
                reply.push_str(&format!("... e mais {} resultados", many.len() - SUMMARY_LIMIT));
            }
            reply
        }
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}
