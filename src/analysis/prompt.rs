//! Prompt construction for the inference backend.
//!
//! [`PromptBuilder::build`] is pure: the same mode and input always give the
//! same [`AnalysisPrompt`], and nothing is read or written along the way.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{json, Value};

use super::mode::AnalysisMode;
use super::result::{RiskLevel, MAX_SCORE, MIN_SCORE};

/// System instruction for the URL, email, transaction and code analysts.
pub const ANALYST_SYSTEM_INSTRUCTION: &str =
    "You are an expert cybersecurity analyst. Be conservative and highlight potential risks. Output JSON only.";

/// System instruction for the password auditor.
pub const PASSWORD_SYSTEM_INSTRUCTION: &str =
    "You are a password cracking expert. Estimate entropy and guessability. Score 0 (weak) to 100 (strong).";

/// Structured-output contract sent alongside every prompt.
///
/// Uses the OpenAPI subset accepted by `responseSchema`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSchema(Value);

impl ResultSchema {
    /// The shared analysis result schema.
    pub fn analysis() -> &'static ResultSchema {
        static SCHEMA: OnceLock<ResultSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            let levels: Vec<&str> = RiskLevel::ALL.iter().map(RiskLevel::as_str).collect();
            ResultSchema(json!({
                "type": "OBJECT",
                "properties": {
                    "riskLevel": {
                        "type": "STRING",
                        "enum": levels,
                    },
                    "score": {
                        "type": "INTEGER",
                        "minimum": MIN_SCORE,
                        "maximum": MAX_SCORE,
                        "description": "A safety score from 0 (very dangerous) to 100 (very safe)",
                    },
                    "summary": {
                        "type": "STRING",
                        "description": "A brief summary of the findings.",
                    },
                    "details": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "List of specific technical reasons for the verdict.",
                    },
                    "recommendation": {
                        "type": "STRING",
                        "description": "Actionable advice for the user.",
                    },
                },
                "required": ["riskLevel", "score", "summary", "details", "recommendation"],
            }))
        })
    }

    /// Raw JSON form.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Field names the schema marks as required.
    pub fn required_fields(&self) -> Vec<&str> {
        self.0["required"]
            .as_array()
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Everything the backend needs for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPrompt {
    /// User-turn instruction embedding the raw input
    pub prompt: String,
    /// System instruction framing the analyst persona
    pub system_instruction: &'static str,
    /// Output contract
    pub schema: &'static ResultSchema,
}

/// Builds mode-specific prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Create a prompt builder
    pub fn new() -> Self {
        Self
    }

    /// Build the prompt for `input` under `mode`.
    ///
    /// `input` is embedded verbatim; callers must reject blank input first.
    pub fn build(&self, mode: AnalysisMode, input: &str) -> AnalysisPrompt {
        let prompt = match mode {
            AnalysisMode::Url => format!(
                "Analyze this URL for cybersecurity threats (Phishing, Malware, XSS, etc.). URL: \"{input}\""
            ),
            AnalysisMode::Email => format!(
                "Analyze this email content for SPAM, Phishing, or Social Engineering attacks. Content: \"{input}\""
            ),
            AnalysisMode::Transaction => format!(
                "Analyze this financial transaction data for potential fraud or anomalies. \
                 Specifically evaluate the 'amount', 'location', and 'time' if provided. \
                 Look for high amounts, unusual locations (geo-velocity), rapid succession, \
                 or odd timing (e.g., late night). Data: \"{input}\""
            ),
            AnalysisMode::Code => format!(
                "Analyze this code snippet for security vulnerabilities (SQL Injection, Buffer Overflow, Hardcoded secrets, etc.). Code: \"{input}\""
            ),
            AnalysisMode::Password => format!(
                "Analyze the strength of this password: \"{input}\". Do not reveal the password in output."
            ),
        };

        AnalysisPrompt {
            prompt,
            system_instruction: system_instruction(mode),
            schema: ResultSchema::analysis(),
        }
    }
}

/// System instruction for a mode.
pub fn system_instruction(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Password => PASSWORD_SYSTEM_INSTRUCTION,
        _ => ANALYST_SYSTEM_INSTRUCTION,
    }
}
