//! Inference backend abstraction.
//!
//! The analyzer never talks to an LLM provider directly. It hands a
//! [`GenerateRequest`] to an [`InferenceBackend`] and gets back the generated
//! text, if any:
//!
//! ```text
//! ┌──────────────┐  GenerateRequest   ┌──────────────────┐
//! │   Analyzer   │ ─────────────────> │ InferenceBackend │ ──> provider API
//! │              │ <───────────────── │  (GeminiBackend) │
//! └──────────────┘  Result<Option<S>> └──────────────────┘
//! ```
//!
//! `Ok(None)` means the provider answered without any text. Transport and
//! provider errors come back as `Err`. Tests substitute their own backend.

mod gemini;

pub use gemini::{GeminiBackend, DEFAULT_API_URL, DEFAULT_MODEL};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::analysis::ResultSchema;
use crate::error::Result;

/// One generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Model identifier (e.g. `gemini-2.5-flash`)
    pub model: String,
    /// User prompt
    pub prompt: String,
    /// System instruction
    pub system_instruction: String,
    /// Output contract, sent as the JSON response schema
    pub response_schema: &'static ResultSchema,
}

/// Boxed future returned by [`InferenceBackend::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>>;

/// Pluggable LLM provider.
pub trait InferenceBackend: Send + Sync {
    /// Run one generation and return the produced text.
    fn generate<'a>(&'a self, request: &'a GenerateRequest) -> GenerateFuture<'a>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}

impl<T: InferenceBackend + ?Sized> InferenceBackend for Arc<T> {
    fn generate<'a>(&'a self, request: &'a GenerateRequest) -> GenerateFuture<'a> {
        (**self).generate(request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: InferenceBackend + ?Sized> InferenceBackend for Box<T> {
    fn generate<'a>(&'a self, request: &'a GenerateRequest) -> GenerateFuture<'a> {
        (**self).generate(request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
