//! Analysis verdicts, their validation, and the per-mode fallback.
//!
//! A verdict arriving from the inference backend is untrusted text. It only
//! becomes an [`AnalysisResult`] after [`parse_result`] has checked it against
//! the same contract the backend was asked to honour:
//!
//! - all five fields present
//! - `riskLevel` one of `SAFE`, `SUSPICIOUS`, `MALICIOUS`, `UNKNOWN`
//! - `score` an integer in `0..=100`
//! - `details` an array of strings
//!
//! Anything else is a [`ScamShieldError::SchemaViolation`]. A verdict that
//! passes is kept exactly as the backend wrote it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::mode::AnalysisMode;
use crate::error::{Result, ScamShieldError};

/// Lowest valid safety score.
pub const MIN_SCORE: u8 = 0;

/// Highest valid safety score.
pub const MAX_SCORE: u8 = 100;

/// Coarse safety classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// No threat indicators found.
    Safe,
    /// Some indicators, not conclusive.
    Suspicious,
    /// Clearly hostile.
    Malicious,
    /// Analysis could not complete.
    Unknown,
}

impl RiskLevel {
    /// All levels accepted in a verdict.
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Safe,
        RiskLevel::Suspicious,
        RiskLevel::Malicious,
        RiskLevel::Unknown,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Suspicious => "SUSPICIOUS",
            Self::Malicious => "MALICIOUS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display band for a safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyBand {
    /// Score above 80.
    High,
    /// Score above 50, up to 80.
    Moderate,
    /// Score of 50 or below.
    Low,
}

impl SafetyBand {
    /// Band for a score.
    pub fn for_score(score: u8) -> Self {
        if score > 80 {
            Self::High
        } else if score > 50 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Structured security verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAnalysisResult")]
pub struct AnalysisResult {
    /// Risk classification
    pub risk_level: RiskLevel,
    /// Safety score, 0 (dangerous / weak) to 100 (safe / strong)
    pub score: u8,
    /// One-paragraph verdict
    pub summary: String,
    /// Specific findings, in the order the backend listed them
    pub details: Vec<String>,
    /// Actionable guidance
    pub recommendation: String,
}

impl AnalysisResult {
    /// Fallback result for a mode whose analysis failed.
    pub fn fallback(mode: AnalysisMode) -> Self {
        let copy = fallback_copy(mode);
        Self {
            risk_level: RiskLevel::Unknown,
            score: MIN_SCORE,
            summary: copy.summary.to_string(),
            details: copy.details.iter().map(|d| d.to_string()).collect(),
            recommendation: copy.recommendation.to_string(),
        }
    }

    /// Whether this result is the fallback for `mode`.
    pub fn is_fallback_for(&self, mode: AnalysisMode) -> bool {
        *self == Self::fallback(mode)
    }

    /// Display band for the score.
    pub fn safety_band(&self) -> SafetyBand {
        SafetyBand::for_score(self.score)
    }
}

/// Fixed copy used for a mode's fallback result.
#[derive(Debug)]
struct FallbackCopy {
    summary: &'static str,
    details: &'static [&'static str],
    recommendation: &'static str,
}

const GENERIC_FALLBACK: FallbackCopy = FallbackCopy {
    summary: "Analysis failed due to an error.",
    details: &["API connection failed or input was invalid."],
    recommendation: "Try again later.",
};

const PASSWORD_FALLBACK: FallbackCopy = FallbackCopy {
    summary: "Error checking password",
    details: &[],
    recommendation: "Use a longer password.",
};

fn fallback_copy(mode: AnalysisMode) -> &'static FallbackCopy {
    match mode {
        AnalysisMode::Password => &PASSWORD_FALLBACK,
        AnalysisMode::Url
        | AnalysisMode::Email
        | AnalysisMode::Transaction
        | AnalysisMode::Code => &GENERIC_FALLBACK,
    }
}

/// Verdict as decoded from JSON, before range checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysisResult {
    risk_level: RiskLevel,
    score: i64,
    summary: String,
    details: Vec<String>,
    recommendation: String,
}

impl TryFrom<RawAnalysisResult> for AnalysisResult {
    type Error = ScamShieldError;

    fn try_from(raw: RawAnalysisResult) -> Result<Self> {
        let score = validate_score(raw.score)?;
        Ok(Self {
            risk_level: raw.risk_level,
            score,
            summary: raw.summary,
            details: raw.details,
            recommendation: raw.recommendation,
        })
    }
}

/// Check a score against `MIN_SCORE..=MAX_SCORE`.
pub fn validate_score(score: i64) -> Result<u8> {
    if (i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&score) {
        Ok(score as u8)
    } else {
        Err(ScamShieldError::SchemaViolation(format!(
            "score {score} outside {MIN_SCORE}..={MAX_SCORE}"
        )))
    }
}

/// Parse backend text into a validated verdict.
pub fn parse_result(text: &str) -> Result<AnalysisResult> {
    if text.trim().is_empty() {
        return Err(ScamShieldError::EmptyResponse);
    }
    serde_json::from_str(text).map_err(|e| ScamShieldError::SchemaViolation(e.to_string()))
}
