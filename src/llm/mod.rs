//! LLM — Gemini client for schema-constrained generation.
//!
//! DESIGN
//! ======
//! The AI features ask the model for JSON conforming to a declared response
//! schema instead of free text. This module owns the transport only: env
//! config, the HTTP client, and the declared schemas. Prompt construction
//! and payload validation live in `services::ai`.

pub mod config;
pub mod gemini;
pub mod schema;

pub use gemini::GeminiClient;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// GENERATION TRAIT
// =============================================================================

/// Schema-constrained generation. Implementations return the raw JSON text
/// the model produced; callers parse it into their expected shape. Enables
/// mocking in tests.
#[async_trait::async_trait]
pub trait GenerateJson: Send + Sync {
    /// Request generation constrained to `schema`.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response carries
    /// no candidate text.
    async fn generate_json(&self, prompt: &str, schema: &serde_json::Value) -> Result<String, LlmError>;
}
