use serde_json::Value;

use tribute_core::{
    AuthPort, AuthSession, Credentials, PortError, SignupPayload, SignupReceipt, SubmissionPort,
};

use crate::runtime::{lock_backend, ServiceMode};
use crate::AdapterConfig;

const DEFAULT_REDIRECT: &str = "/dashboard";

/// Registration and sign-in against the tribute API.
#[derive(Debug, Clone)]
pub struct AccountAdapter {
    mode: ServiceMode,
}

impl Default for AccountAdapter {
    fn default() -> Self {
        Self::with_config(AdapterConfig::from_env())
    }
}

impl AccountAdapter {
    pub fn new(mode: ServiceMode) -> Self {
        Self { mode }
    }

    pub fn with_config(config: AdapterConfig) -> Self {
        Self::new(ServiceMode::from_config(&config))
    }

    pub fn mode(&self) -> &ServiceMode {
        &self.mode
    }
}

impl SubmissionPort for AccountAdapter {
    fn submit_signup(&self, payload: &SignupPayload) -> Result<SignupReceipt, PortError> {
        tracing::info!(plan = payload.plan.as_str(), theme = payload.theme.as_str(), "submitting signup");
        match &self.mode {
            ServiceMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ServiceMode::InMemory(backend) => lock_backend(backend)?.register(payload),
            ServiceMode::Http(client) => {
                let body = serde_json::to_value(payload).map_err(|e| {
                    PortError::Validation(format!("signup payload serialization failed: {e}"))
                })?;
                let response = client.post("/auth/register", &body)?;
                let redirect = response
                    .get("redirect")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_REDIRECT)
                    .to_owned();
                Ok(SignupReceipt { redirect })
            }
        }
    }
}

impl AuthPort for AccountAdapter {
    fn login(&self, credentials: &Credentials) -> Result<AuthSession, PortError> {
        let session = match &self.mode {
            ServiceMode::Disabled(reason) => return Err(PortError::Policy(reason.clone())),
            ServiceMode::InMemory(backend) => lock_backend(backend)?.login(credentials)?,
            ServiceMode::Http(client) => {
                let body = serde_json::to_value(credentials).map_err(|e| {
                    PortError::Validation(format!("credentials serialization failed: {e}"))
                })?;
                let response = client.post("/auth/login", &body)?;
                serde_json::from_value::<AuthSession>(response).map_err(|e| {
                    PortError::Transport(format!("login response decode failed: {e}"))
                })?
            }
        };
        self.mode.set_token(Some(session.token.clone()))?;
        Ok(session)
    }
}
