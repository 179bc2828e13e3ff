use std::fmt;

use report_core::{DraftStyle, Headline, HeadlineResult, RequestId, UserInput};
use thiserror::Error;

/// Work items accepted by the engine, one per remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    GenerateHeadlines {
        request_id: RequestId,
        input: UserInput,
    },
    MoreHeadlines {
        request_id: RequestId,
        input: UserInput,
        existing: Vec<HeadlineResult>,
    },
    WriteDraft {
        request_id: RequestId,
        input: UserInput,
        headline: Headline,
    },
    RestyleDraft {
        request_id: RequestId,
        style: DraftStyle,
        base: String,
    },
    ReviseDraft {
        request_id: RequestId,
        style: DraftStyle,
        previous: String,
        feedback: String,
    },
}

impl EngineCommand {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineCommand::GenerateHeadlines { request_id, .. }
            | EngineCommand::MoreHeadlines { request_id, .. }
            | EngineCommand::WriteDraft { request_id, .. }
            | EngineCommand::RestyleDraft { request_id, .. }
            | EngineCommand::ReviseDraft { request_id, .. } => *request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HeadlinesGenerated {
        request_id: RequestId,
        result: Result<Vec<HeadlineResult>, GenerateError>,
    },
    MoreHeadlinesGenerated {
        request_id: RequestId,
        result: Result<Vec<HeadlineResult>, GenerateError>,
    },
    DraftWritten {
        request_id: RequestId,
        result: Result<String, GenerateError>,
    },
    /// Answer to both a restyle and a feedback rewrite.
    DraftStyleWritten {
        request_id: RequestId,
        style: DraftStyle,
        result: Result<String, GenerateError>,
    },
}

impl EngineEvent {
    pub fn failure_kind(&self) -> Option<&FailureKind> {
        let err = match self {
            EngineEvent::HeadlinesGenerated { result, .. }
            | EngineEvent::MoreHeadlinesGenerated { result, .. } => result.as_ref().err(),
            EngineEvent::DraftWritten { result, .. }
            | EngineEvent::DraftStyleWritten { result, .. } => result.as_ref().err(),
        };
        err.map(|err| &err.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingCredential,
    InvalidCredential,
    HttpStatus(u16),
    Timeout,
    Network,
    EmptyResponse,
    Schema,
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingCredential => write!(f, "api key not set"),
            FailureKind::InvalidCredential => write!(f, "api key rejected"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::EmptyResponse => write!(f, "empty response"),
            FailureKind::Schema => write!(f, "unexpected response format"),
            FailureKind::Internal => write!(f, "internal error"),
        }
    }
}
