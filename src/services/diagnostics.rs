//! User-facing rendering of service failures
//!
//! A failed call is shown as a headline, the service's message split into one
//! line per sentence, and remediation hints picked by status code.

use crate::error::ServiceError;
use tracing::{error, info};

const NO_DETAILS: &str = "The API did not provide further information.";

const GENERIC_HINTS: &[&str] = &[
    "These errors can have multiple root causes.",
    "Check the request settings in your config file and the service status page.",
];

const AUTH_HINTS: &[&str] = &[
    "This is a key related issue. Please check the API key you provided in your config file.",
];

const MODEL_ACCESS_HINTS: &[&str] = &[
    "The key you are using might not be eligible for the configured model.",
    "Some models are only available after your account has a payment history.",
    "Try a different conversation_model or summarize_model in your config file.",
];

/// Which remediation advice applies to a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintCategory {
    Generic,
    Auth,
    ModelAccess,
    None,
}

impl HintCategory {
    pub fn for_status(status: u16) -> Self {
        match status {
            400 => HintCategory::Generic,
            401 => HintCategory::Auth,
            404 => HintCategory::ModelAccess,
            _ => HintCategory::None,
        }
    }

    pub fn hints(self) -> &'static [&'static str] {
        match self {
            HintCategory::Generic => GENERIC_HINTS,
            HintCategory::Auth => AUTH_HINTS,
            HintCategory::ModelAccess => MODEL_ACCESS_HINTS,
            HintCategory::None => &[],
        }
    }
}

/// Printable explanation of a failed service call
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub headline: String,
    pub details: Vec<String>,
    pub category: HintCategory,
}

impl Diagnostic {
    pub fn hints(&self) -> &'static [&'static str] {
        self.category.hints()
    }

    /// Log the diagnostic: errors for what happened, info for what to do
    pub fn emit(&self) {
        error!("❌ {}", self.headline);
        for line in &self.details {
            error!("   {}", line);
        }
        for hint in self.hints() {
            info!("💡 {}", hint);
        }
    }
}

impl From<&ServiceError> for Diagnostic {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::Credential(reason) => Diagnostic {
                headline: "The OpenAI API key you provided is invalid. Please check your config file."
                    .to_string(),
                details: vec![reason.clone()],
                category: HintCategory::Auth,
            },
            ServiceError::Status {
                status,
                kind,
                message,
            } => Diagnostic {
                headline: format!("The OpenAI API sent the following error code {status} ({kind})"),
                details: sentences(message),
                category: HintCategory::for_status(*status),
            },
            ServiceError::Transport(reason) => Diagnostic {
                headline: "Could not reach the OpenAI API".to_string(),
                details: vec![reason.clone()],
                category: HintCategory::None,
            },
            ServiceError::Decode(reason) => Diagnostic {
                headline: "The OpenAI API sent a response that could not be understood".to_string(),
                details: vec![reason.clone()],
                category: HintCategory::None,
            },
        }
    }
}

fn sentences(message: &str) -> Vec<String> {
    let lines: Vec<String> = message
        .split(". ")
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        vec![NO_DETAILS.to_string()]
    } else {
        lines
    }
}
