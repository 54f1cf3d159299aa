//! In-process stand-in for the tribute API, used when no base URL is configured.

use std::collections::HashMap;

use tribute_core::{
    AuthSession, Credentials, PortError, SessionUser, SignupPayload, SignupReceipt, Ticket,
    TicketId, TicketStatus, UserRole,
};

#[derive(Debug, Clone)]
struct MemoryAccount {
    password: String,
    user: SessionUser,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    accounts: HashMap<String, MemoryAccount>,
    tickets: Vec<Ticket>,
    replies: Vec<(TicketId, String)>,
    next_id: u64,
}

impl MemoryBackend {
    pub fn with_admin(email: &str, password: &str) -> Self {
        let mut backend = Self::default();
        backend.insert_account(email, password, "Administrator", UserRole::Admin);
        backend
    }

    /// Development backend with an admin account and a few open tickets.
    pub fn seeded(admin_email: &str, admin_password: &str) -> Self {
        let mut backend = Self::with_admin(admin_email, admin_password);
        for (name, email, subject, content, status) in [
            (
                "Maria Lopez",
                "maria@example.com",
                "Cannot upload photos",
                "The memories page rejects my JPEG files.",
                TicketStatus::Open,
            ),
            (
                "Tom Becker",
                "tom@example.com",
                "Change tribute theme",
                "Can I switch from classic to nature after publishing?",
                TicketStatus::Responded,
            ),
            (
                "Aiko Tanaka",
                "aiko@example.com",
                "Donation link",
                "The donation button points to the wrong charity.",
                TicketStatus::Closed,
            ),
        ] {
            backend.insert_ticket(name, email, subject, content, status);
        }
        backend
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_account(&mut self, email: &str, password: &str, name: &str, role: UserRole) {
        let id = self.next_id();
        self.accounts.insert(
            email.to_ascii_lowercase(),
            MemoryAccount {
                password: password.to_owned(),
                user: SessionUser {
                    id: id.to_string(),
                    email: email.to_owned(),
                    name: name.to_owned(),
                    role,
                },
            },
        );
    }

    pub fn insert_ticket(
        &mut self,
        sender_name: &str,
        sender_email: &str,
        subject: &str,
        content: &str,
        status: TicketStatus,
    ) -> TicketId {
        let id = TicketId(self.next_id().to_string());
        self.tickets.push(Ticket {
            id: id.clone(),
            subject: subject.to_owned(),
            sender_name: sender_name.to_owned(),
            sender_email: sender_email.to_owned(),
            initial_content: content.to_owned(),
            status: Some(status),
            updated_at: None,
            date: None,
        });
        id
    }

    pub fn register(&mut self, payload: &SignupPayload) -> Result<SignupReceipt, PortError> {
        let user = &payload.user;
        if user.password != user.confirm_password {
            return Err(PortError::Rejected("passwords do not match".to_owned()));
        }
        if self
            .accounts
            .contains_key(&user.email.to_ascii_lowercase())
        {
            return Err(PortError::Rejected("email already registered".to_owned()));
        }
        let name = format!("{} {}", user.first_name, user.last_name);
        self.insert_account(&user.email, &user.password, name.trim(), UserRole::User);
        Ok(SignupReceipt {
            redirect: "/dashboard".to_owned(),
        })
    }

    pub fn login(&self, credentials: &Credentials) -> Result<AuthSession, PortError> {
        let account = self
            .accounts
            .get(&credentials.email.trim().to_ascii_lowercase())
            .filter(|a| a.password == credentials.password)
            .ok_or_else(|| PortError::Rejected("invalid credentials".to_owned()))?;
        Ok(AuthSession {
            token: format!("mem-{}", account.user.id),
            user: account.user.clone(),
        })
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets.clone()
    }

    pub fn set_status(&mut self, id: &TicketId, desired: TicketStatus) -> Result<(), PortError> {
        let ticket = self.ticket_mut(id)?;
        ticket.status = Some(desired);
        Ok(())
    }

    pub fn reply(&mut self, id: &TicketId, body: &str) -> Result<(), PortError> {
        let ticket = self.ticket_mut(id)?;
        ticket.status = Some(TicketStatus::Responded);
        self.replies.push((id.clone(), body.to_owned()));
        Ok(())
    }

    pub fn replies(&self) -> &[(TicketId, String)] {
        &self.replies
    }

    fn ticket_mut(&mut self, id: &TicketId) -> Result<&mut Ticket, PortError> {
        self.tickets
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| PortError::NotFound(format!("ticket {id}")))
    }
}
