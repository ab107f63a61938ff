//! Language-model extraction of vehicle fields
//!
//! Optional front end to the search pipeline: asks a chat-completion API to
//! pull structured vehicle fields out of a free-form message. Every failure
//! mode (no API key, network error, malformed reply) collapses to `None`,
//! and the caller falls back to the plain text extractor. The search core
//! never depends on this module working.

use crate::config::ExtractionConfig;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Fields the model extracted from one message. All optional; an empty
/// extraction is valid and simply routes the message to the text parser.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExtractedVehicle {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub fipe_code: Option<String>,
}

impl ExtractedVehicle {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.model.is_none() && self.fipe_code.is_none()
    }
}

pub struct ExtractionClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl ExtractionClient {
    pub fn new(client: Client, config: &ExtractionConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Extract vehicle fields from a user message. Returns `None` whenever
    /// extraction is unavailable or produced nothing usable.
    pub async fn extract(&self, message: &str) -> Option<ExtractedVehicle> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                debug!("Extraction API key not configured, skipping extraction");
                return None;
            }
        };

        let prompt = build_prompt(message);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "Você é um assistente que extrai informações de veículos em JSON.",
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.3,
            max_tokens: 200,
        };

        let response = match self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("Extraction request failed: {}", err);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Extraction API returned status {}", response.status());
            return None;
        }

        let reply: ChatResponse = match response.json().await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Extraction response unreadable: {}", err);
                return None;
            }
        };

        let content = reply.choices.first().map(|choice| choice.message.content.as_str())?;
        match serde_json::from_str::<ExtractedVehicle>(content) {
            Ok(extracted) => {
                debug!(?extracted, "Extraction produced structured fields");
                Some(extracted)
            }
            Err(err) => {
                warn!("Extraction reply is not the expected JSON: {}", err);
                None
            }
        }
    }
}

fn build_prompt(message: &str) -> String {
    format!(
        r#"Você é um assistente especializado em extrair informações de veículos de mensagens de usuários.
Analise a seguinte mensagem e extraia as informações do veículo:

Mensagem: "{message}"

Responda em JSON com os seguintes campos:
- brand: marca do veículo (ex: Toyota, Ford, etc)
- model: modelo do veículo
- year: ano do veículo (se mencionado)
- fipe_code: código FIPE (se mencionado)

Exemplo de resposta:
{{"brand": "Toyota", "model": "Hilux", "year": 2015, "fipe_code": null}}

Responda APENAS com o JSON, sem explicações adicionais."#
    )
}

/// Accept the year as a JSON number or a numeric string; anything else is
/// treated as absent rather than failing the whole extraction
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: String,
}
