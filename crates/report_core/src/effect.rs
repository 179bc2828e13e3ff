use crate::{DraftStyle, Headline, HeadlineResult, RequestId, UserInput};

/// Work the state machine asks the outside world to perform. Every remote
/// call carries the `RequestId` its answer must quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    GenerateHeadlines {
        request_id: RequestId,
        input: UserInput,
    },
    GenerateMoreHeadlines {
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
    ExportResults {
        results: Vec<HeadlineResult>,
    },
    PersistCredential {
        key: String,
    },
}

impl Effect {
    /// Whether executing this effect calls the remote generator.
    pub fn is_remote(&self) -> bool {
        !matches!(
            self,
            Effect::ExportResults { .. } | Effect::PersistCredential { .. }
        )
    }
}
