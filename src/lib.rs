//! # ScamShield - LLM-backed Security Risk Analysis
//!
//! Submit a URL, an email, a transaction record, a code snippet or a password
//! and get back a structured security verdict. The verdict comes from an
//! external LLM inference service constrained by a response schema; this crate
//! builds the request, validates what comes back, and guarantees the caller
//! always receives a complete result.
//!
//! ## Architecture
//!
//! ```text
//!  CLI / HTTP API
//!        │  (mode, input)
//!        v
//!  ┌───────────────────────────────────────────────┐
//!  │ Analyzer                                      │
//!  │   PromptBuilder ──> InferenceBackend ──> parse│──> AnalysisResult
//!  │        (pure)        (one call)      (validate)│     (verdict or fallback)
//!  └───────────────────────────────────────────────┘
//!                             │
//!                             v
//!                    Gemini generateContent
//! ```
//!
//! ## Verdict
//!
//! | Field            | Type            | Notes                                   |
//! |------------------|-----------------|-----------------------------------------|
//! | `riskLevel`      | `RiskLevel`     | SAFE, SUSPICIOUS, MALICIOUS, UNKNOWN    |
//! | `score`          | integer 0..=100 | 0 = dangerous / weak, 100 = safe / strong |
//! | `summary`        | string          | one-paragraph verdict                   |
//! | `details`        | string[]        | findings in backend order, may be empty |
//! | `recommendation` | string          | what the user should do                 |
//!
//! ## Failure handling
//!
//! Transport errors, empty responses and schema violations never reach the
//! caller of [`Analyzer::analyze`]. They are logged and replaced with the
//! mode's fallback verdict (`UNKNOWN`, score 0). Use
//! [`Analyzer::try_analyze`] to see the underlying error.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scamshield::{AnalysisMode, Analyzer, Config, GeminiBackend};
//!
//! let config = Config::load(None)?;
//! let backend = GeminiBackend::from_config(&config.backend)?;
//! let analyzer = Analyzer::new(backend).with_model(&config.backend.model);
//!
//! let verdict = analyzer.analyze(AnalysisMode::Email, raw_email).await;
//! if verdict.risk_level == scamshield::RiskLevel::Unknown {
//!     eprintln!("analysis unavailable: {}", verdict.summary);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`analysis`]: modes, prompts, verdict validation, the analyzer
//! - [`inference`]: backend trait and the Gemini client
//! - [`server`]: HTTP API server (Axum-based)
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod analysis;
pub mod config;
pub mod error;
pub mod inference;
pub mod server;

// Re-exports for convenience
pub use analysis::{
    AnalysisMode, AnalysisResult, Analyzer, PromptBuilder, RiskLevel, SafetyBand, ScanReport,
};
pub use config::Config;
pub use error::{FailureKind, Result, ScamShieldError};
pub use inference::{GeminiBackend, GenerateRequest, InferenceBackend};
pub use server::{AppState, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
