//! End-to-end analysis of one submission.
//!
//! Each call walks the same path exactly once:
//!
//! ```text
//! [Idle] -> [BuildingPrompt] -> [AwaitingBackend] -> [Parsing] -> [Done(verdict)]
//!                                      │                 │
//!                                      └──── error ──────┴──────> [Done(fallback)]
//! ```
//!
//! Nothing is shared between calls except the immutable [`Analyzer`] itself,
//! so concurrent analyses need no locking.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::mode::AnalysisMode;
use super::prompt::PromptBuilder;
use super::result::{parse_result, AnalysisResult, SafetyBand};
use crate::error::{Result, ScamShieldError};
use crate::inference::{GenerateRequest, InferenceBackend, DEFAULT_MODEL};

/// Runs analyses against an inference backend.
#[derive(Debug, Clone)]
pub struct Analyzer<B> {
    backend: B,
    builder: PromptBuilder,
    model: String,
    timeout: Option<Duration>,
}

impl<B: InferenceBackend> Analyzer<B> {
    /// Create an analyzer using the default model
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            builder: PromptBuilder::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    /// Use a different model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Abandon backend calls that take longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The inference backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Analyze `input`, reporting why the analysis failed instead of falling back.
    ///
    /// `input` must be non-blank (see [`require_input`](super::require_input)).
    pub async fn try_analyze(&self, mode: AnalysisMode, input: &str) -> Result<AnalysisResult> {
        let built = self.builder.build(mode, input);
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: built.prompt,
            system_instruction: built.system_instruction.to_string(),
            response_schema: built.schema,
        };

        let text = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.backend.generate(&request))
                .await
                .map_err(|_| {
                    ScamShieldError::Transport(format!("backend timed out after {limit:?}"))
                })??,
            None => self.backend.generate(&request).await?,
        };

        let text = text.ok_or(ScamShieldError::EmptyResponse)?;
        parse_result(&text)
    }

    /// Analyze `input`. Never fails: any error yields the mode's fallback.
    pub async fn analyze(&self, mode: AnalysisMode, input: &str) -> AnalysisResult {
        tracing::debug!(
            mode = %mode,
            input_len = input.len(),
            backend = self.backend.name(),
            model = %self.model,
            "Starting analysis"
        );

        match self.try_analyze(mode, input).await {
            Ok(result) => {
                tracing::debug!(
                    mode = %mode,
                    risk = %result.risk_level,
                    score = result.score,
                    "Analysis complete"
                );
                result
            },
            Err(err) => {
                let kind = err
                    .failure_kind()
                    .map_or_else(|| "other".to_string(), |k| k.to_string());
                tracing::warn!(
                    mode = %mode,
                    failure = %kind,
                    error = %err,
                    "Analysis failed, returning fallback"
                );
                AnalysisResult::fallback(mode)
            },
        }
    }

    /// Analyze `input` and stamp the verdict with a scan id and time.
    pub async fn scan(&self, mode: AnalysisMode, input: &str) -> ScanReport {
        let result = self.analyze(mode, input).await;
        ScanReport::new(mode, result)
    }
}

/// A verdict together with when and under which id it was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Short upper-case scan identifier
    pub scan_id: String,
    /// Mode the input was analyzed under
    pub mode: AnalysisMode,
    /// The verdict
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// Display band of the score
    pub safety_band: SafetyBand,
    /// Completion time
    pub scanned_at: DateTime<Utc>,
}

impl ScanReport {
    /// Stamp a verdict
    pub fn new(mode: AnalysisMode, result: AnalysisResult) -> Self {
        Self {
            scan_id: new_scan_id(),
            mode,
            safety_band: result.safety_band(),
            result,
            scanned_at: Utc::now(),
        }
    }

    /// Whether the analysis failed and the verdict is the fallback.
    pub fn is_fallback(&self) -> bool {
        self.result.is_fallback_for(self.mode)
    }
}

fn new_scan_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id.to_uppercase()
}
