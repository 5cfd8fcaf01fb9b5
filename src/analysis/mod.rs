//! Security analysis of user submissions.
//!
//! # Flow
//!
//! ```text
//! caller ──> Analyzer::analyze(mode, input)
//!               │
//!               ├─> PromptBuilder::build(mode, input)   prompt + system instruction + schema
//!               ├─> InferenceBackend::generate(request)  one call, no retries
//!               └─> parse_result(text)                   validate against the schema
//!                        │
//!                        ├─ ok  ──> verdict, unchanged
//!                        └─ err ──> AnalysisResult::fallback(mode)
//! ```
//!
//! # Modes
//!
//! | Mode          | Looks for                                          | Persona           |
//! |---------------|----------------------------------------------------|-------------------|
//! | `URL`         | phishing, malware, XSS                             | security analyst  |
//! | `EMAIL`       | spam, phishing, social engineering                 | security analyst  |
//! | `TRANSACTION` | high amounts, geo-velocity, rapid succession, odd hours | security analyst |
//! | `CODE`        | SQL injection, buffer overflow, hardcoded secrets  | security analyst  |
//! | `PASSWORD`    | entropy and guessability                           | password cracker  |
//!
//! # Failure signal
//!
//! A fallback carries `riskLevel = UNKNOWN` and `score = 0`. A score of 0 is
//! also a legitimate "maximally dangerous" verdict, so consumers must treat
//! `UNKNOWN` as the failure signal, not the score.
//!
//! # Example
//!
//! ```rust,ignore
//! use scamshield::analysis::{AnalysisMode, Analyzer};
//! use scamshield::inference::GeminiBackend;
//!
//! let backend = GeminiBackend::from_config(&config.backend)?;
//! let analyzer = Analyzer::new(backend);
//!
//! let result = analyzer.analyze(AnalysisMode::Url, "https://example.com/login").await;
//! println!("{} ({}/100)", result.risk_level, result.score);
//! ```

mod mode;
mod orchestrator;
mod prompt;
mod result;

pub use mode::AnalysisMode;
pub use orchestrator::{Analyzer, ScanReport};
pub use prompt::{
    system_instruction, AnalysisPrompt, PromptBuilder, ResultSchema, ANALYST_SYSTEM_INSTRUCTION,
    PASSWORD_SYSTEM_INSTRUCTION,
};
pub use result::{
    parse_result, validate_score, AnalysisResult, RiskLevel, SafetyBand, MAX_SCORE, MIN_SCORE,
};

use crate::error::{Result, ScamShieldError};

/// Return `input` if it has content after trimming.
///
/// The analyzer assumes this has been checked; callers run it first.
pub fn require_input(input: &str) -> Result<&str> {
    if input.trim().is_empty() {
        Err(ScamShieldError::InvalidInput(
            "input must not be empty".to_string(),
        ))
    } else {
        Ok(input)
    }
}
