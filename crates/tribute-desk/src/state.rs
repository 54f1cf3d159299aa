//! Per-tab UI state. Domain state lives in the core types held here.

use tribute_core::{
    Credentials, DeceasedInfo, DeceasedPatch, Plan, PlanSelection, PortError, SectionUpdate,
    SignupWizard, Theme, TicketIntent, TicketList, UserInfo, UserPatch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Signup,
    Login,
    Tickets,
}

#[derive(Debug, Clone, Default)]
pub struct Notice {
    pub last_error: Option<String>,
    pub last_info: Option<String>,
}

impl Notice {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_info = None;
        self.last_error = Some(message.into());
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.last_error = None;
        self.last_info = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.last_error = None;
        self.last_info = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
    pub busy: bool,
    pub notice: Notice,
}

impl LoginFormState {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        }
    }
}

/// Text buffers for the three wizard steps. Edits are pushed into the wizard draft as they happen.
#[derive(Debug, Clone, Default)]
pub struct SignupUiState {
    pub wizard: SignupWizard,
    pub deceased: DeceasedInfo,
    pub user: UserInfo,
    pub plan: Option<Plan>,
    pub theme: Option<Theme>,
    pub redirect: Option<String>,
    pub notice: Notice,
}

impl SignupUiState {
    pub fn sync_deceased(&mut self) {
        let d = &self.deceased;
        self.wizard
            .update_section(SectionUpdate::Deceased(DeceasedPatch {
                name: Some(d.name.clone()),
                date_of_birth: Some(d.date_of_birth.clone()),
                date_of_death: Some(d.date_of_death.clone()),
                biography: Some(d.biography.clone()),
            }));
    }

    pub fn sync_user(&mut self) {
        let u = &self.user;
        self.wizard.update_section(SectionUpdate::User(UserPatch {
            first_name: Some(u.first_name.clone()),
            last_name: Some(u.last_name.clone()),
            email: Some(u.email.clone()),
            phone: Some(u.phone.clone()),
            password: Some(u.password.clone()),
            confirm_password: Some(u.confirm_password.clone()),
        }));
    }

    pub fn selection(&self) -> PlanSelection {
        PlanSelection {
            plan: self.plan,
            theme: self.theme,
        }
    }

    /// Empties the buffers after an accepted signup. The wizard has already reset its draft.
    pub fn clear_form(&mut self) {
        self.deceased = DeceasedInfo::default();
        self.user = UserInfo::default();
        self.plan = None;
        self.theme = None;
    }

    pub fn start_over(&mut self) {
        self.wizard.discard();
        self.clear_form();
        self.redirect = None;
        self.notice.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct TicketsUiState {
    pub list: TicketList,
    pub reply_draft: String,
    pub loaded: bool,
    /// Intent whose mutation is still running on a worker.
    pub in_flight: Option<TicketIntent>,
    pub notice: Notice,
}

impl TicketsUiState {
    /// Applies a finished mutation. Returns true when the list should be refetched.
    ///
    /// Results landing after a reset (sign-out) are dropped: nothing is in flight any more.
    pub fn finish_mutation(&mut self, intent: &TicketIntent, result: Result<(), PortError>) -> bool {
        if self.in_flight.take().is_none() {
            tracing::debug!(ticket = %intent.ticket_id(), "dropping mutation result after reset");
            return false;
        }
        let id = intent.ticket_id();
        match result {
            Ok(()) => {
                let message = match intent {
                    TicketIntent::Close { .. } => format!("Ticket {id} closed."),
                    TicketIntent::Reopen { .. } => format!("Ticket {id} reopened."),
                    TicketIntent::Reply { .. } => {
                        self.reply_draft.clear();
                        format!("Reply sent for ticket {id}.")
                    }
                };
                self.notice.set_info(message);
                true
            }
            Err(e) => {
                self.list.record_mutation_failure(id, &e);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.list.reset();
        self.reply_draft.clear();
        self.loaded = false;
        self.in_flight = None;
        self.notice.clear();
    }
}

#[cfg(test)]
mod tests {
    use tribute_core::{Plan, PortError, Theme, TicketId, TicketIntent, WizardStep};

    use super::{LoginFormState, Notice, SignupUiState, Tab, TicketsUiState};

    #[test]
    fn setting_error_clears_info_and_vice_versa() {
        let mut notice = Notice::default();
        notice.set_info("ok");
        assert_eq!(notice.last_info.as_deref(), Some("ok"));
        notice.set_error("bad");
        assert_eq!(notice.last_error.as_deref(), Some("bad"));
        assert!(notice.last_info.is_none());
    }

    #[test]
    fn app_opens_on_signup_tab() {
        assert_eq!(Tab::default(), Tab::Signup);
    }

    #[test]
    fn login_credentials_trim_email_only() {
        let form = LoginFormState {
            email: "  admin@tribute.local ".to_owned(),
            password: " pw ".to_owned(),
            ..LoginFormState::default()
        };
        let creds = form.credentials();
        assert_eq!(creds.email, "admin@tribute.local");
        assert_eq!(creds.password, " pw ");
    }

    #[test]
    fn synced_buffers_unlock_first_step() {
        let mut state = SignupUiState::default();
        state.deceased.date_of_birth = "1940-05-01".to_owned();
        assert!(!state.wizard.can_advance(WizardStep::DeceasedInfo));

        state.deceased.date_of_death = "2021-09-09".to_owned();
        state.sync_deceased();
        assert!(state.wizard.can_advance(WizardStep::DeceasedInfo));
        assert_eq!(state.wizard.draft().deceased.date_of_death, "2021-09-09");
    }

    #[test]
    fn start_over_resets_wizard_and_buffers() {
        let mut state = SignupUiState::default();
        state.deceased.date_of_birth = "1940-05-01".to_owned();
        state.deceased.date_of_death = "2021-09-09".to_owned();
        state.sync_deceased();
        state.wizard.next_step().expect("advance");
        state.plan = Some(Plan::Basic);
        state.theme = Some(Theme::Nature);
        state.notice.set_error("x");

        state.start_over();
        assert_eq!(state.wizard.step(), WizardStep::DeceasedInfo);
        assert!(state.deceased.date_of_birth.is_empty());
        assert!(state.selection().plan.is_none());
        assert!(state.notice.last_error.is_none());
    }

    #[test]
    fn ticket_state_reset_forgets_loaded_list() {
        let mut state = TicketsUiState {
            loaded: true,
            reply_draft: "draft".to_owned(),
            ..TicketsUiState::default()
        };
        state.reset();
        assert!(!state.loaded);
        assert!(state.reply_draft.is_empty());
        assert!(state.list.tickets().is_empty());
    }

    #[test]
    fn finished_mutation_requests_refetch_and_clears_reply() {
        let intent = TicketIntent::Reply {
            id: TicketId::from("3"),
            body: "Fixed".to_owned(),
        };
        let mut state = TicketsUiState {
            reply_draft: "Fixed".to_owned(),
            in_flight: Some(intent.clone()),
            ..TicketsUiState::default()
        };

        assert!(state.finish_mutation(&intent, Ok(())));
        assert!(state.in_flight.is_none());
        assert!(state.reply_draft.is_empty());
        assert_eq!(state.notice.last_info.as_deref(), Some("Reply sent for ticket 3."));
    }

    #[test]
    fn failed_mutation_keeps_list_and_skips_refetch() {
        let intent = TicketIntent::Close {
            id: TicketId::from("3"),
        };
        let mut state = TicketsUiState {
            in_flight: Some(intent.clone()),
            ..TicketsUiState::default()
        };

        let refetch = state.finish_mutation(&intent, Err(PortError::Transport("down".to_owned())));
        assert!(!refetch);
        assert!(state.in_flight.is_none());
    }

    #[test]
    fn mutation_finishing_after_sign_out_is_dropped() {
        let intent = TicketIntent::Close {
            id: TicketId::from("3"),
        };
        let mut state = TicketsUiState {
            loaded: true,
            in_flight: Some(intent.clone()),
            ..TicketsUiState::default()
        };
        state.reset();

        assert!(!state.finish_mutation(&intent, Ok(())));
        assert!(!state.loaded);
        assert!(state.notice.last_info.is_none());
    }
}
