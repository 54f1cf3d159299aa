use serde_json::Value;

use tribute_core::{PortError, Ticket, TicketFetchPort, TicketId, TicketMutationPort, TicketStatus};

use crate::runtime::{lock_backend, ServiceMode};
use crate::AdapterConfig;

/// Admin message store: `/messages` on the tribute API.
#[derive(Debug, Clone)]
pub struct TicketServiceAdapter {
    mode: ServiceMode,
}

impl Default for TicketServiceAdapter {
    fn default() -> Self {
        Self::with_config(AdapterConfig::from_env())
    }
}

impl TicketServiceAdapter {
    pub fn new(mode: ServiceMode) -> Self {
        Self { mode }
    }

    pub fn with_config(config: AdapterConfig) -> Self {
        Self::new(ServiceMode::from_config(&config))
    }
}

impl TicketFetchPort for TicketServiceAdapter {
    fn fetch_tickets(&self) -> Result<Vec<Ticket>, PortError> {
        match &self.mode {
            ServiceMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ServiceMode::InMemory(backend) => Ok(lock_backend(backend)?.tickets()),
            ServiceMode::Http(client) => {
                let body = client.get("/messages")?;
                decode_ticket_list(body)
            }
        }
    }
}

impl TicketMutationPort for TicketServiceAdapter {
    fn set_ticket_status(&self, id: &TicketId, desired: TicketStatus) -> Result<(), PortError> {
        tracing::info!(ticket = %id, status = desired.as_str(), "updating ticket status");
        match &self.mode {
            ServiceMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ServiceMode::InMemory(backend) => lock_backend(backend)?.set_status(id, desired),
            ServiceMode::Http(client) => client
                .patch(
                    &message_path(id, "status")?,
                    &serde_json::json!({ "status": desired }),
                )
                .map(|_| ()),
        }
    }

    fn reply_to_ticket(&self, id: &TicketId, body: &str) -> Result<(), PortError> {
        tracing::info!(ticket = %id, "replying to ticket");
        match &self.mode {
            ServiceMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ServiceMode::InMemory(backend) => lock_backend(backend)?.reply(id, body),
            ServiceMode::Http(client) => client
                .post(
                    &message_path(id, "reply")?,
                    &serde_json::json!({ "content": body }),
                )
                .map(|_| ()),
        }
    }
}

/// `/messages/{id}/{action}` with the id percent-encoded as a single segment.
fn message_path(id: &TicketId, action: &str) -> Result<String, PortError> {
    let mut url = reqwest::Url::parse("http://tribute.invalid/")
        .map_err(|e| PortError::Transport(format!("building message path failed: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| PortError::Transport("message path cannot hold segments".to_owned()))?
        .pop_if_empty()
        .extend(["messages", id.0.as_str(), action]);
    Ok(url.path().to_owned())
}

// Older endpoints wrap the list as `{ "messages": [...] }`.
fn decode_ticket_list(body: Value) -> Result<Vec<Ticket>, PortError> {
    let list = match body {
        Value::Object(mut obj) => obj
            .remove("messages")
            .or_else(|| obj.remove("tickets"))
            .ok_or_else(|| PortError::Transport("ticket list missing from response".to_owned()))?,
        other => other,
    };
    serde_json::from_value(list)
        .map_err(|e| PortError::Transport(format!("ticket list decode failed: {e}")))
}
