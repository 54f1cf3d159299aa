use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tribute_core::{AuthSession, PortError, SessionStorePort};

use crate::AdapterConfig;

/// Persisted sign-in state: a JSON file when a path is configured, process memory otherwise.
#[derive(Debug, Clone)]
pub enum SessionStoreAdapter {
    File(PathBuf),
    Memory(Arc<Mutex<Option<AuthSession>>>),
}

impl Default for SessionStoreAdapter {
    fn default() -> Self {
        SessionStoreAdapter::Memory(Arc::new(Mutex::new(None)))
    }
}

impl SessionStoreAdapter {
    pub fn with_config(config: &AdapterConfig) -> Self {
        match config.session_path.as_ref() {
            Some(path) => SessionStoreAdapter::File(path.clone()),
            None => SessionStoreAdapter::default(),
        }
    }
}

impl SessionStorePort for SessionStoreAdapter {
    fn load(&self) -> Result<Option<AuthSession>, PortError> {
        match self {
            SessionStoreAdapter::File(path) => {
                let raw = match fs::read_to_string(path) {
                    Ok(raw) => raw,
                    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                    Err(e) => {
                        return Err(PortError::Transport(format!(
                            "read session file {} failed: {e}",
                            path.display()
                        )))
                    }
                };
                if raw.trim().is_empty() {
                    return Ok(None);
                }
                serde_json::from_str(&raw)
                    .map(Some)
                    .map_err(|e| PortError::Validation(format!("session file is corrupt: {e}")))
            }
            SessionStoreAdapter::Memory(slot) => {
                let g = slot
                    .lock()
                    .map_err(|e| PortError::Transport(format!("session lock poisoned: {e}")))?;
                Ok(g.clone())
            }
        }
    }

    fn save(&self, session: &AuthSession) -> Result<(), PortError> {
        match self {
            SessionStoreAdapter::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| {
                        PortError::Transport(format!("create {} failed: {e}", parent.display()))
                    })?;
                }
                let raw = serde_json::to_string_pretty(session).map_err(|e| {
                    PortError::Validation(format!("session serialization failed: {e}"))
                })?;
                fs::write(path, raw).map_err(|e| {
                    PortError::Transport(format!(
                        "write session file {} failed: {e}",
                        path.display()
                    ))
                })
            }
            SessionStoreAdapter::Memory(slot) => {
                let mut g = slot
                    .lock()
                    .map_err(|e| PortError::Transport(format!("session lock poisoned: {e}")))?;
                *g = Some(session.clone());
                Ok(())
            }
        }
    }

    fn clear(&self) -> Result<(), PortError> {
        match self {
            SessionStoreAdapter::File(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(PortError::Transport(format!(
                    "remove session file {} failed: {e}",
                    path.display()
                ))),
            },
            SessionStoreAdapter::Memory(slot) => {
                let mut g = slot
                    .lock()
                    .map_err(|e| PortError::Transport(format!("session lock poisoned: {e}")))?;
                *g = None;
                Ok(())
            }
        }
    }
}
