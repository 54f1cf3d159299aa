use egui::Ui;
use tribute_core::{validate_credentials, Credentials, SessionUser, UserRole};

use crate::state::LoginFormState;
use crate::ui;

pub enum LoginAction {
    SignIn(Credentials),
    SignOut,
}

pub fn render_login(
    ui: &mut Ui,
    state: &mut LoginFormState,
    current_user: Option<&SessionUser>,
) -> Option<LoginAction> {
    ui::styled_heading(ui, "Sign In");
    ui.add_space(8.0);
    ui::notice(ui, &state.notice);

    if let Some(user) = current_user {
        let role = match user.role {
            UserRole::Admin => "administrator",
            UserRole::User => "member",
        };
        let name = if user.name.is_empty() {
            user.email.as_str()
        } else {
            user.name.as_str()
        };
        ui.label(format!("Signed in as {name} ({role})."));
        ui.add_space(8.0);
        if ui.button("Sign out").clicked() {
            return Some(LoginAction::SignOut);
        }
        return None;
    }

    ui::form_field(ui, "Email", &mut state.email, true, "you@example.com");
    let password = ui::password_field(ui, "Password", &mut state.password);
    let submitted = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.add_space(8.0);
    let mut action = None;
    ui.horizontal(|ui| {
        let clicked = ui
            .add_enabled(!state.busy, egui::Button::new("Sign in"))
            .clicked();
        if state.busy {
            ui.spinner();
        }
        if (clicked || submitted) && !state.busy {
            let credentials = state.credentials();
            match validate_credentials(&credentials) {
                Ok(()) => action = Some(LoginAction::SignIn(credentials)),
                Err(e) => state.notice.set_error(e.to_string()),
            }
        }
    });
    action
}
