use egui::Ui;
use tribute_core::{PendingSubmission, Plan, Theme, WizardStep};

use crate::state::SignupUiState;
use crate::ui;

pub enum SignupAction {
    Submit(PendingSubmission),
    GoToLogin,
}

pub fn render_signup(ui: &mut Ui, state: &mut SignupUiState) -> Option<SignupAction> {
    ui::styled_heading(ui, "Create a Tribute");
    let step = state.wizard.step();
    if step != WizardStep::Submitted {
        ui.label(format!(
            "Step {} of {}: {}",
            step.number(),
            WizardStep::LAST_FORM_STEP,
            step.title()
        ));
    }
    ui.add_space(8.0);
    ui::notice(ui, &state.notice);

    match step {
        WizardStep::DeceasedInfo => {
            render_deceased_step(ui, state);
            None
        }
        WizardStep::UserInfo => {
            render_user_step(ui, state);
            None
        }
        WizardStep::PlanTheme => render_plan_step(ui, state),
        WizardStep::Submitted => render_submitted(ui, state),
    }
}

fn render_deceased_step(ui: &mut Ui, state: &mut SignupUiState) {
    ui::section_header(ui, "About your loved one");
    let d = &mut state.deceased;
    let mut changed = ui::form_field(ui, "Full name", &mut d.name, false, "").changed();
    changed |= ui::form_field(ui, "Date of birth", &mut d.date_of_birth, true, "YYYY-MM-DD")
        .changed();
    changed |= ui::form_field(ui, "Date of death", &mut d.date_of_death, true, "YYYY-MM-DD")
        .changed();
    ui.label("Biography");
    changed |= ui
        .add(
            egui::TextEdit::multiline(&mut d.biography)
                .desired_rows(5)
                .desired_width(460.0),
        )
        .changed();
    if changed {
        state.sync_deceased();
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        next_button(ui, state);
    });
}

fn render_user_step(ui: &mut Ui, state: &mut SignupUiState) {
    ui::section_header(ui, "Your account");
    let u = &mut state.user;
    let mut changed = ui::form_field(ui, "First name", &mut u.first_name, true, "").changed();
    changed |= ui::form_field(ui, "Last name", &mut u.last_name, true, "").changed();
    changed |= ui::form_field(ui, "Email", &mut u.email, true, "you@example.com").changed();
    changed |= ui::form_field(ui, "Phone", &mut u.phone, true, "").changed();
    changed |= ui::password_field(ui, "Password", &mut u.password).changed();
    changed |= ui::password_field(ui, "Confirm password", &mut u.confirm_password).changed();
    if changed {
        state.sync_user();
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        back_button(ui, state);
        next_button(ui, state);
    });
}

fn render_plan_step(ui: &mut Ui, state: &mut SignupUiState) -> Option<SignupAction> {
    ui::section_header(ui, "Plan and theme");
    let busy = state.wizard.is_submitting();

    ui.add_enabled_ui(!busy, |ui| {
        ui.horizontal(|ui| {
            ui.label("Plan:");
            egui::ComboBox::from_id_salt("plan_select")
                .selected_text(state.plan.map_or("Choose a plan", Plan::as_str))
                .show_ui(ui, |ui| {
                    for plan in Plan::ALL {
                        ui.selectable_value(&mut state.plan, Some(plan), plan.as_str());
                    }
                });
        });
        ui.horizontal(|ui| {
            ui.label("Theme:");
            egui::ComboBox::from_id_salt("theme_select")
                .selected_text(state.theme.map_or("Choose a theme", Theme::as_str))
                .show_ui(ui, |ui| {
                    for theme in Theme::ALL {
                        ui.selectable_value(&mut state.theme, Some(theme), theme.as_str());
                    }
                });
        });
    });

    ui.add_space(8.0);
    let mut action = None;
    ui.horizontal(|ui| {
        ui.add_enabled_ui(!busy, |ui| back_button(ui, state));
        let label = if busy { "Submitting..." } else { "Create tribute" };
        if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
            let selection = state.selection();
            match state.wizard.begin_submit(selection) {
                Ok(pending) => {
                    state.notice.clear();
                    action = Some(SignupAction::Submit(pending));
                }
                Err(e) => state.notice.set_error(e.to_string()),
            }
        }
        if busy {
            ui.spinner();
        }
    });
    action
}

fn render_submitted(ui: &mut Ui, state: &mut SignupUiState) -> Option<SignupAction> {
    ui.label("Your tribute has been created.");
    if let Some(redirect) = state.redirect.as_ref() {
        ui.label(format!("Continue to {redirect} after signing in."));
    }
    ui.add_space(8.0);
    let mut action = None;
    ui.horizontal(|ui| {
        if ui.button("Go to sign in").clicked() {
            action = Some(SignupAction::GoToLogin);
        }
        if ui.button("Create another tribute").clicked() {
            state.start_over();
        }
    });
    action
}

fn next_button(ui: &mut Ui, state: &mut SignupUiState) {
    let step = state.wizard.step();
    let missing = state.wizard.missing_fields(step);
    let response = ui.add_enabled(missing.is_empty(), egui::Button::new("Next"));
    let response = if missing.is_empty() {
        response
    } else {
        response.on_disabled_hover_text(format!("Still needed: {}", missing.join(", ")))
    };
    if response.clicked() {
        match state.wizard.next_step() {
            Ok(_) => state.notice.clear(),
            Err(e) => state.notice.set_error(e.to_string()),
        }
    }
}

fn back_button(ui: &mut Ui, state: &mut SignupUiState) {
    if ui.button("Back").clicked() {
        match state.wizard.prev_step() {
            Ok(_) => state.notice.clear(),
            Err(e) => state.notice.set_error(e.to_string()),
        }
    }
}
