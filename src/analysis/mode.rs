//! Analysis modes and their per-mode metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScamShieldError;

/// Kind of artifact submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisMode {
    /// A link checked for phishing and malware distribution.
    Url,
    /// Raw email headers and body checked for spam and social engineering.
    Email,
    /// A financial transaction record checked for fraud anomalies.
    Transaction,
    /// A code snippet checked for vulnerabilities.
    Code,
    /// A password audited for strength.
    Password,
}

impl AnalysisMode {
    /// All modes, in display order.
    pub const ALL: [AnalysisMode; 5] = [
        AnalysisMode::Url,
        AnalysisMode::Email,
        AnalysisMode::Transaction,
        AnalysisMode::Code,
        AnalysisMode::Password,
    ];

    /// Wire name (`URL`, `EMAIL`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Email => "EMAIL",
            Self::Transaction => "TRANSACTION",
            Self::Code => "CODE",
            Self::Password => "PASSWORD",
        }
    }

    /// Human-readable scanner title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Url => "Malicious URL Scanner",
            Self::Email => "Email Spam & Phishing Detector",
            Self::Transaction => "Transaction Anomaly Detector",
            Self::Code => "Vulnerability Code Scanner",
            Self::Password => "Password Strength Audit",
        }
    }

    /// One-line description of what the scanner looks for.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Url => {
                "Detect phishing links, malware distribution sites, and suspicious domains using AI heuristics."
            },
            Self::Email => {
                "Analyze email headers and body text for social engineering, spam patterns, and malicious intent."
            },
            Self::Transaction => {
                "Identify fraudulent financial patterns or irregular behavior in transaction logs. Input data including amount, location, and time."
            },
            Self::Code => {
                "Static analysis of code snippets to identify potential security flaws like SQL Injection or XSS."
            },
            Self::Password => {
                "Evaluate password entropy and resistance to brute-force or dictionary attacks."
            },
        }
    }

    /// Sample input for trying the scanner out.
    pub fn sample_input(&self) -> &'static str {
        match self {
            Self::Url => "https://example.com/suspicious-path",
            Self::Email => "Paste raw email content here...",
            Self::Transaction => TRANSACTION_SAMPLE,
            Self::Code => {
                "def login(user): query = 'SELECT * FROM users WHERE name=' + user..."
            },
            Self::Password => "Enter password to test...",
        }
    }

    /// Whether the input is a secret that must not be echoed or logged.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password)
    }
}

const TRANSACTION_SAMPLE: &str = r#"{
  "transaction_id": "TXN_99283",
  "amount": 15000.00,
  "currency": "USD",
  "location": "Lagos, Nigeria",
  "user_home_location": "New York, USA",
  "time": "03:15 AM",
  "merchant": "Unknown Electronics Store"
}"#;

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = ScamShieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "url" | "link" => Ok(Self::Url),
            "email" | "mail" => Ok(Self::Email),
            "transaction" | "txn" => Ok(Self::Transaction),
            "code" | "snippet" => Ok(Self::Code),
            "password" | "pw" => Ok(Self::Password),
            _ => Err(ScamShieldError::InvalidInput(format!(
                "Unknown analysis mode: {s}. Use: url, email, transaction, code, password"
            ))),
        }
    }
}
