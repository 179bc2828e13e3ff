use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use report_logging::report_info;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

/// Well-known key the API key is stored under.
pub const CREDENTIAL_KEY: &str = "googleApiKey";

const APP_DIR: &str = "headline_strategist";
const CREDENTIAL_FILENAME: &str = "credentials.ron";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("credential file {path} is invalid: {message}")]
    Format { path: String, message: String },
    #[error("credential file path {0} has no parent directory")]
    InvalidPath(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Process-wide API key storage, read at call time.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored key; blank values count as absent.
    fn load(&self) -> Result<Option<String>, CredentialError>;
    fn save(&self, key: &str) -> Result<(), CredentialError>;
}

/// Keeps the key in a RON map on disk so it survives restarts.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform configuration directory.
    pub fn in_config_dir() -> Result<Self, CredentialError> {
        let dir = dirs::config_dir().ok_or(CredentialError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(CREDENTIAL_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, CredentialError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        ron::from_str(&content).map_err(|err| CredentialError::Format {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        let mut map = self.read_map()?;
        Ok(map.remove(CREDENTIAL_KEY).and_then(non_blank))
    }

    fn save(&self, key: &str) -> Result<(), CredentialError> {
        let mut map = self.read_map()?;
        map.insert(CREDENTIAL_KEY.to_string(), key.trim().to_string());

        let content = ron::ser::to_string_pretty(&map, ron::ser::PrettyConfig::new()).map_err(
            |err| CredentialError::Format {
                path: self.path.display().to_string(),
                message: err.to_string(),
            },
        )?;
        let dir = self
            .path
            .parent()
            .ok_or_else(|| CredentialError::InvalidPath(self.path.display().to_string()))?;
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CredentialError::InvalidPath(self.path.display().to_string()))?;

        AtomicFileWriter::new(dir.to_path_buf()).write(filename, &content)?;
        report_info!("Stored API key in {:?}", self.path);
        Ok(())
    }
}

/// In-memory store for tests and one-off sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    key: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Mutex::new(Some(key.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        let guard = self.key.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone().and_then(non_blank))
    }

    fn save(&self, key: &str) -> Result<(), CredentialError> {
        let mut guard = self.key.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(key.trim().to_string());
        Ok(())
    }
}

fn non_blank(key: String) -> Option<String> {
    if key.trim().is_empty() {
        None
    } else {
        Some(key)
    }
}
