//! WhatsApp Cloud API integration
//!
//! `client` delivers outbound text messages through the Meta Graph API;
//! `webhook` hosts the inbound HTTP surface (verification handshake, message
//! webhook, health and debug endpoints).

pub mod client;
pub mod webhook;

pub use client::WhatsAppClient;
pub use webhook::{router, AppState};
