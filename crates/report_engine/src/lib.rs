//! Report engine: remote generation, credential storage and file output.
mod attachment;
mod credential;
mod engine;
mod export;
mod generator;
mod persist;
mod prompt;
mod types;

pub use attachment::{load_attachment, mime_type_for, AttachmentError, MAX_ATTACHMENT_BYTES};
pub use credential::{
    CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore, CREDENTIAL_KEY,
};
pub use engine::EngineHandle;
pub use export::{export_results, render_results_text, ExportError, ExportSummary, EXPORT_FILENAME};
pub use generator::{
    parse_headlines, GeminiGenerator, Generator, GeneratorSettings, DEFAULT_ENDPOINT,
    DEFAULT_MODEL,
};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use prompt::{
    draft_prompt, headline_prompt, headline_schema, more_headlines_prompt, restyle_prompt,
    revision_prompt,
};
pub use types::{EngineCommand, EngineEvent, FailureKind, GenerateError};
