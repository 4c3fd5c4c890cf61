//! Inbound adapters translating transport payloads into domain calls.

pub mod http;
