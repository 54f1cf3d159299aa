//! Main application state and update loop

use std::sync::{Arc, Mutex};

use eframe::egui;
use tribute_adapters::SessionStoreAdapter;
use tribute_core::{
    sign_in_error, AuthSession, FetchToken, PendingSubmission, PortError, SessionContext,
    SignupReceipt, SubmitOutcome, Ticket, TicketIntent,
};

use crate::bridge::DeskBridge;
use crate::login_ui::{self, LoginAction};
use crate::signup_ui::{self, SignupAction};
use crate::state::{LoginFormState, SignupUiState, Tab, TicketsUiState};
use crate::tickets_ui::{self, TicketsAction};
use crate::ui;

/// Written by a worker thread, taken by the next frame.
type ResultSlot<T> = Arc<Mutex<Option<T>>>;

type LoginResult = Result<AuthSession, PortError>;
type SignupResult = (PendingSubmission, Result<SignupReceipt, PortError>);
type FetchResult = (FetchToken, Result<Vec<Ticket>, PortError>);
type MutationResult = (TicketIntent, Result<(), PortError>);

pub struct App {
    active_tab: Tab,
    bridge: DeskBridge,
    session: SessionContext<SessionStoreAdapter>,
    login: LoginFormState,
    signup: SignupUiState,
    tickets: TicketsUiState,
    login_result: ResultSlot<LoginResult>,
    signup_result: ResultSlot<SignupResult>,
    fetch_result: ResultSlot<FetchResult>,
    mutation_result: ResultSlot<MutationResult>,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let bridge = DeskBridge::default();
        let session = SessionContext::restore(bridge.session_store());
        if let Err(e) = bridge.set_token(session.token()) {
            tracing::warn!(error = %e, "could not attach restored session token");
        }
        tracing::info!(
            runtime = %bridge.runtime_label(),
            signed_in = session.is_signed_in(),
            "tribute desk ready"
        );

        let active_tab = if session.is_admin() {
            Tab::Tickets
        } else {
            Tab::default()
        };

        Self {
            active_tab,
            bridge,
            session,
            login: LoginFormState::default(),
            signup: SignupUiState::default(),
            tickets: TicketsUiState::default(),
            login_result: Arc::new(Mutex::new(None)),
            signup_result: Arc::new(Mutex::new(None)),
            fetch_result: Arc::new(Mutex::new(None)),
            mutation_result: Arc::new(Mutex::new(None)),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.check_login_result();
        self.check_signup_result();
        self.check_fetch_result();
        self.check_mutation_result(ctx);
        self.log_events();

        if self.active_tab == Tab::Tickets && !self.session.is_admin() {
            self.active_tab = Tab::Login;
        }
        let previous_tab = self.active_tab;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("Tribute Desk").size(22.0).color(ui::ACCENT));
                ui.add_space(30.0);
                ui.separator();
                ui.add_space(10.0);
                ui.selectable_value(&mut self.active_tab, Tab::Signup, "Create Tribute");
                let account_label = if self.session.is_signed_in() {
                    "Account"
                } else {
                    "Sign In"
                };
                ui.selectable_value(&mut self.active_tab, Tab::Login, account_label);
                if self.session.is_admin() {
                    ui.selectable_value(&mut self.active_tab, Tab::Tickets, "Tickets");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(self.bridge.runtime_label()).small().weak());
                });
            });
            ui.add_space(4.0);
        });

        if previous_tab == Tab::Tickets && self.active_tab != Tab::Tickets {
            self.tickets.list.detach();
            self.tickets.loaded = false;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                match self.active_tab {
                    Tab::Signup => self.render_signup_tab(ui, ctx),
                    Tab::Login => self.render_login_tab(ui, ctx),
                    Tab::Tickets => self.render_tickets_tab(ui, ctx),
                }
                ui.add_space(20.0);
            });
        });
    }
}

impl App {
    fn render_signup_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match signup_ui::render_signup(ui, &mut self.signup) {
            Some(SignupAction::Submit(pending)) => self.start_signup(ctx, pending),
            Some(SignupAction::GoToLogin) => self.active_tab = Tab::Login,
            None => {}
        }
    }

    fn render_login_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let current_user = self.session.current_user().cloned();
        match login_ui::render_login(ui, &mut self.login, current_user.as_ref()) {
            Some(LoginAction::SignIn(credentials)) => {
                self.login.busy = true;
                self.login.notice.clear();
                let bridge = self.bridge.clone();
                spawn_into(&self.login_result, ctx, move || bridge.login(&credentials));
            }
            Some(LoginAction::SignOut) => self.sign_out(),
            None => {}
        }
    }

    fn render_tickets_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if !self.tickets.loaded && !self.tickets.list.is_loading() {
            self.start_fetch(ctx);
        }
        match tickets_ui::render_tickets(ui, &mut self.tickets) {
            Some(TicketsAction::Refresh) => self.start_fetch(ctx),
            Some(TicketsAction::Send(intent)) => self.start_mutation(ctx, intent),
            None => {}
        }
    }

    fn start_signup(&mut self, ctx: &egui::Context, pending: PendingSubmission) {
        let bridge = self.bridge.clone();
        spawn_into(&self.signup_result, ctx, move || {
            let outcome = bridge.submit_signup(&pending.payload);
            (pending, outcome)
        });
    }

    fn check_signup_result(&mut self) {
        let Some((pending, outcome)) = take_result(&self.signup_result) else {
            return;
        };
        match self.signup.wizard.finish_submit(&pending, outcome) {
            Ok(SubmitOutcome::Accepted(receipt)) => {
                self.login.email = pending.payload.user.email.clone();
                self.signup.redirect = Some(receipt.redirect);
                self.signup.clear_form();
                self.signup.notice.set_info("Tribute created.");
            }
            Ok(SubmitOutcome::Stale) => {}
            Err(e) => self.signup.notice.set_error(e.to_string()),
        }
    }

    fn check_login_result(&mut self) {
        let Some(result) = take_result(&self.login_result) else {
            return;
        };
        self.login.busy = false;
        let session = match result {
            Ok(session) => session,
            Err(e) => {
                self.login.notice.set_error(sign_in_error(&e).to_string());
                return;
            }
        };
        if let Err(e) = self.session.sign_in(session) {
            self.login.notice.set_error(e.to_string());
            return;
        }
        self.login.password.clear();
        self.tickets.reset();
        if let Some(user) = self.session.current_user() {
            self.login.notice.set_info(format!("Signed in as {}.", user.email));
        }
        if self.session.is_admin() {
            self.active_tab = Tab::Tickets;
        }
    }

    fn sign_out(&mut self) {
        if let Err(e) = self.session.sign_out() {
            tracing::warn!(error = %e, "sign-out could not clear stored session");
        }
        if let Err(e) = self.bridge.set_token(None) {
            tracing::warn!(error = %e, "could not drop session token");
        }
        self.tickets.reset();
        self.login.notice.set_info("Signed out.");
    }

    fn start_fetch(&mut self, ctx: &egui::Context) {
        let token = self.tickets.list.begin_refresh();
        self.tickets.loaded = true;
        let bridge = self.bridge.clone();
        spawn_into(&self.fetch_result, ctx, move || (token, bridge.fetch_tickets()));
    }

    fn check_fetch_result(&mut self) {
        if let Some((token, result)) = take_result(&self.fetch_result) {
            self.tickets.list.apply_fetch(token, result);
        }
    }

    fn start_mutation(&mut self, ctx: &egui::Context, intent: TicketIntent) {
        self.tickets.in_flight = Some(intent.clone());
        self.tickets.notice.clear();
        let bridge = self.bridge.clone();
        spawn_into(&self.mutation_result, ctx, move || {
            let result = bridge.send_intent(&intent);
            (intent, result)
        });
    }

    fn check_mutation_result(&mut self, ctx: &egui::Context) {
        let Some((intent, result)) = take_result(&self.mutation_result) else {
            return;
        };
        if self.tickets.finish_mutation(&intent, result) && self.session.is_admin() {
            self.start_fetch(ctx);
        }
    }

    fn log_events(&mut self) {
        for event in self.signup.wizard.drain_events() {
            tracing::debug!(?event, "wizard event");
        }
        for event in self.tickets.list.drain_events() {
            tracing::debug!(?event, "ticket event");
        }
    }
}

fn spawn_into<T, F>(slot: &ResultSlot<T>, ctx: &egui::Context, job: F)
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let slot = Arc::clone(slot);
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let value = job();
        match slot.lock() {
            Ok(mut guard) => *guard = Some(value),
            Err(e) => tracing::error!(error = %e, "result slot poisoned"),
        }
        ctx.request_repaint();
    });
}

fn take_result<T>(slot: &ResultSlot<T>) -> Option<T> {
    slot.lock().ok().and_then(|mut guard| guard.take())
}
