// Document analysis: request building, the oracle seam, response validation.
// All oracle calls go through llm_client; nothing here talks to Gemini directly.

pub mod handlers;
pub mod oracle;
pub mod prompts;
pub mod request;
pub mod result;
pub mod schema;
pub mod service;
