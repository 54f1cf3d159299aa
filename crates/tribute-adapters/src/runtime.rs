use std::sync::{Arc, Mutex, MutexGuard};

use tribute_core::PortError;

use crate::http::ApiClient;
use crate::memory::MemoryBackend;
use crate::AdapterConfig;

/// Where adapter calls go. Cloning shares the same backend.
#[derive(Debug, Clone)]
pub enum ServiceMode {
    Disabled(String),
    InMemory(Arc<Mutex<MemoryBackend>>),
    Http(ApiClient),
}

impl ServiceMode {
    pub fn from_config(config: &AdapterConfig) -> Self {
        match config.api_base_url.as_deref() {
            Some(base_url) => match ApiClient::new(base_url, config.api_timeout_ms) {
                Ok(client) => {
                    tracing::info!(base_url, "using tribute api");
                    ServiceMode::Http(client)
                }
                Err(e) if config.strict_runtime_required() => ServiceMode::Disabled(format!(
                    "failed to initialize api client in production profile: {e}"
                )),
                Err(e) => {
                    tracing::warn!(error = %e, "api client unavailable, using in-memory backend");
                    Self::in_memory_from(config)
                }
            },
            None if config.strict_runtime_required() => ServiceMode::Disabled(
                "TRIBUTE_API_BASE_URL is not configured in production runtime profile".to_owned(),
            ),
            None => {
                tracing::info!("no api base url configured, using in-memory backend");
                Self::in_memory_from(config)
            }
        }
    }

    pub fn in_memory(backend: MemoryBackend) -> Self {
        ServiceMode::InMemory(Arc::new(Mutex::new(backend)))
    }

    fn in_memory_from(config: &AdapterConfig) -> Self {
        Self::in_memory(MemoryBackend::seeded(
            &config.dev_admin_email,
            &config.dev_admin_password,
        ))
    }

    /// Token sent as bearer auth on later HTTP calls. No-op for the in-memory backend.
    pub fn set_token(&self, token: Option<String>) -> Result<(), PortError> {
        match self {
            ServiceMode::Http(client) => client.set_token(token),
            ServiceMode::InMemory(_) | ServiceMode::Disabled(_) => Ok(()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ServiceMode::Disabled(reason) => format!("disabled ({reason})"),
            ServiceMode::InMemory(_) => "in-memory".to_owned(),
            ServiceMode::Http(client) => client.base_url().to_owned(),
        }
    }
}

pub(crate) fn lock_backend(
    backend: &Mutex<MemoryBackend>,
) -> Result<MutexGuard<'_, MemoryBackend>, PortError> {
    backend
        .lock()
        .map_err(|e| PortError::Transport(format!("memory backend lock poisoned: {e}")))
}
