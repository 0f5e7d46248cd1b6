//! Ordered progress log for one verification run.
//!
//! Steps carry no artificial pacing; presentation layers animate them if
//! they want to. The log is append-only within a run and replaced wholesale
//! when the next run starts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Info,
    Success,
    Warn,
    Error,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationStep {
    pub message: String,
    pub kind: StepKind,
    pub timestamp: DateTime<Utc>,
}

impl VerificationStep {
    pub fn new(kind: StepKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(StepKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StepKind::Success, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(StepKind::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StepKind::Error, message)
    }
}
