//! Inbound HTTP surface
//!
//! Three endpoints mirror the Meta webhook contract: the GET verification
//! handshake, the POST message webhook, and operational extras (`/health`,
//! `/search`). The message webhook always answers 200 with a status body;
//! Meta retries on non-200 and a retried message would produce duplicate
//! replies, so processing failures are reported in-band instead.

use crate::catalog::{CatalogIndex, VehicleRecord};
use crate::error::{normalize_text, validate_query};
use crate::format::format_reply;
use crate::nlp::ExtractionClient;
use crate::search::SearchEngine;
use crate::whatsapp::WhatsAppClient;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared handler state. Cheap to clone; everything mutable-free.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub index: Arc<CatalogIndex>,
    pub whatsapp: Arc<WhatsAppClient>,
    pub extraction: Arc<ExtractionClient>,
    pub verify_token: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .route("/health", get(health))
        .route("/search", get(search_debug))
        .with_state(state)
}

#[derive(Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Meta's subscription handshake: echo the challenge when the token matches
async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    if params.verify_token.as_deref() == Some(state.verify_token.as_str())
        && !state.verify_token.is_empty()
    {
        info!("Webhook verified");
        (StatusCode::OK, params.challenge.unwrap_or_default())
    } else {
        warn!("Invalid verify token");
        (StatusCode::FORBIDDEN, "Invalid verify token".to_string())
    }
}

#[derive(Deserialize, Default)]
struct WebhookEvent {
    #[serde(default)]
    object: String,
    #[serde(default)]
    entry: Vec<WebhookEntry>,
}

#[derive(Deserialize, Default)]
struct WebhookEntry {
    #[serde(default)]
    changes: Vec<WebhookChange>,
}

#[derive(Deserialize, Default)]
struct WebhookChange {
    #[serde(default)]
    value: WebhookValue,
}

#[derive(Deserialize, Default)]
struct WebhookValue {
    #[serde(default)]
    messages: Vec<InboundMessage>,
}

#[derive(Deserialize, Default)]
struct InboundMessage {
    #[serde(default)]
    from: String,
    #[serde(default)]
    text: InboundText,
}

#[derive(Deserialize, Default)]
struct InboundText {
    #[serde(default)]
    body: String,
}

/// Message webhook. Body is parsed by hand so even malformed payloads get a
/// 200: the failure is reported in the status body, never the status code.
async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> Json<serde_json::Value> {
    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            error!("Error processing webhook: {}", err);
            return Json(json!({"status": "error", "message": err.to_string()}));
        }
    };

    if event.object != "whatsapp_business_account" {
        return Json(json!({"status": "ok"}));
    }

    let message = event
        .entry
        .into_iter()
        .next()
        .and_then(|entry| entry.changes.into_iter().next())
        .and_then(|change| change.value.messages.into_iter().next());

    let Some(message) = message else {
        // Status callbacks and other non-message notifications
        return Json(json!({"status": "ok"}));
    };

    info!("Message from {}: {}", message.from, message.text.body);

    let text = normalize_text(&message.text.body);
    if let Err(err) = validate_query(&text) {
        warn!("Rejected inbound message: {}", err);
        return Json(json!({
            "status": "error",
            "error": err.error_code(),
            "message": err.message(),
        }));
    }

    let reply = {
        let results = resolve_message(&state, &text).await;
        format_reply(&results)
    };

    match state.whatsapp.send_text(&message.from, &reply).await {
        Ok(_) => Json(json!({"status": "ok"})),
        Err(err) => {
            error!("Error processing webhook: {}", err);
            Json(json!({
                "status": "error",
                "error": err.error_code(),
                "message": err.message(),
            }))
        }
    }
}

/// AI extraction first, free-text parse as fallback. A failed or empty
/// extraction and an empty structured result both fall through, so the bot
/// degrades to plain parsing whenever the extraction path misbehaves.
async fn resolve_message<'a>(state: &'a AppState, text: &str) -> Vec<&'a VehicleRecord> {
    if let Some(extracted) = state.extraction.extract(text).await {
        if !extracted.is_empty() {
            let results = state.engine.search_structured(
                extracted.brand.as_deref(),
                extracted.model.as_deref(),
                extracted.year,
                extracted.fipe_code.as_deref(),
            );
            if !results.is_empty() {
                return results;
            }
        }
    }

    state.engine.search(text)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "vehicles_loaded": state.index.len(),
        "brands": state.index.all_brands().len(),
        "categories": state.index.all_categories().len(),
    }))
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

/// Debug endpoint: run the full resolution pipeline without delivery. The
/// query gets the same normalization and validation as an inbound message,
/// so the two paths cannot diverge.
async fn search_debug(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let query = normalize_text(&params.query);
    if let Err(err) = validate_query(&query) {
        return Json(json!({
            "status": "error",
            "error": err.error_code(),
            "message": err.message(),
        }));
    }

    let results = resolve_message(&state, &query).await;
    Json(json!({
        "query": query,
        "results_count": results.len(),
        "response": format_reply(&results),
        "vehicles": results,
    }))
}
