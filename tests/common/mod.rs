//! Shared test backends.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use scamshield::inference::{GenerateFuture, GenerateRequest, InferenceBackend};
use scamshield::{Result, ScamShieldError};

type Reply = Box<dyn Fn() -> Result<Option<String>> + Send + Sync>;

/// Backend returning a scripted reply and recording every request.
pub struct ScriptedBackend {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedBackend {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`.
    pub fn text(text: &str) -> Self {
        let text = text.to_string();
        Self::with_reply(Box::new(move || Ok(Some(text.clone()))))
    }

    /// Always answer without any text.
    pub fn empty() -> Self {
        Self::with_reply(Box::new(|| Ok(None)))
    }

    /// Always fail at the transport layer.
    pub fn transport_error() -> Self {
        Self::with_reply(Box::new(|| {
            Err(ScamShieldError::Transport("connection refused".to_string()))
        }))
    }

    /// Always fail with a provider status.
    pub fn upstream_error(status: u16) -> Self {
        Self::with_reply(Box::new(move || {
            Err(ScamShieldError::Upstream {
                status,
                message: "backend unavailable".to_string(),
            })
        }))
    }

    /// Number of generate calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl InferenceBackend for ScriptedBackend {
    fn generate<'a>(&'a self, request: &'a GenerateRequest) -> GenerateFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let reply = (self.reply)();
        Box::pin(async move { reply })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// A well-formed verdict body.
pub fn verdict_json(risk_level: &str, score: i64) -> String {
    serde_json::json!({
        "riskLevel": risk_level,
        "score": score,
        "summary": "The path imitates a credential page.",
        "details": ["Path contains 'suspicious'", "Domain registered recently"],
        "recommendation": "Avoid entering credentials on this site.",
    })
    .to_string()
}
