use crate::{Attachment, DraftStyle, Field, Headline, HeadlineResult, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one form field.
    FieldChanged { field: Field, value: String },
    /// A reference document was read and encoded.
    AttachmentAdded(Attachment),
    /// User removed the attachment at this position.
    AttachmentRemoved(usize),
    /// Reading a reference document failed.
    AttachmentFailed(String),
    /// User submitted the form.
    Submitted,
    /// Generator answered the initial headline request.
    HeadlinesGenerated {
        request_id: RequestId,
        result: Result<Vec<HeadlineResult>, String>,
    },
    /// User left the error screen.
    ErrorAcknowledged,
    /// User asked for more headlines on top of the current results.
    MoreHeadlinesRequested,
    MoreHeadlinesGenerated {
        request_id: RequestId,
        result: Result<Vec<HeadlineResult>, String>,
    },
    /// User picked a headline to expand.
    HeadlineSelected(Headline),
    WriteDraftClicked,
    DraftWritten {
        request_id: RequestId,
        result: Result<String, String>,
    },
    /// User switched the draft style.
    DraftStyleSelected(DraftStyle),
    /// User asked for a rewrite of the visible draft.
    DraftFeedbackSubmitted(String),
    /// Generator answered a restyle or a feedback rewrite for `style`.
    DraftStyleWritten {
        request_id: RequestId,
        style: DraftStyle,
        result: Result<String, String>,
    },
    BackToResults,
    ExportRequested,
    /// Export effect finished; `Ok` carries the written path.
    ExportFinished(Result<String, String>),
    /// User closed a transient error banner.
    ErrorDismissed,
    ResetClicked,
    /// Credential store was read at startup.
    CredentialLoaded { present: bool },
    /// User entered a new API key.
    CredentialSaved(String),
    /// Writing the key to the store failed.
    CredentialPersistFailed(String),
    /// A remote call failed because the key is missing or was refused. Sent
    /// after the failed result message itself.
    CredentialRejected,
    CredentialPromptOpened,
    CredentialPromptDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
