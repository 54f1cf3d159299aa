//! UI helper components

use eframe::egui;
use tribute_core::BadgeVariant;

use crate::state::Notice;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(176, 141, 87);

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

pub fn notice(ui: &mut egui::Ui, notice: &Notice) {
    if let Some(err) = notice.last_error.as_ref() {
        ui.colored_label(egui::Color32::RED, err);
    }
    if let Some(info) = notice.last_info.as_ref() {
        ui.colored_label(egui::Color32::LIGHT_GREEN, info);
    }
}

/// Label plus single-line edit. Required labels get a trailing `*`.
pub fn form_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    required: bool,
    hint: &str,
) -> egui::Response {
    ui.horizontal(|ui| {
        let text = if required {
            format!("{label} *")
        } else {
            label.to_owned()
        };
        ui.add_sized([140.0, 18.0], egui::Label::new(text));
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .desired_width(320.0),
        )
    })
    .inner
}

pub fn password_field(ui: &mut egui::Ui, label: &str, value: &mut String) -> egui::Response {
    ui.horizontal(|ui| {
        ui.add_sized([140.0, 18.0], egui::Label::new(format!("{label} *")));
        ui.add(
            egui::TextEdit::singleline(value)
                .password(true)
                .desired_width(320.0),
        )
    })
    .inner
}

fn badge_colors(variant: BadgeVariant) -> (egui::Color32, egui::Color32) {
    match variant {
        BadgeVariant::Info => (
            egui::Color32::from_rgb(30, 64, 120),
            egui::Color32::from_rgb(190, 215, 255),
        ),
        BadgeVariant::Warning => (
            egui::Color32::from_rgb(120, 90, 20),
            egui::Color32::from_rgb(255, 225, 150),
        ),
        BadgeVariant::Success => (
            egui::Color32::from_rgb(25, 95, 55),
            egui::Color32::from_rgb(180, 240, 200),
        ),
        BadgeVariant::Default => (egui::Color32::from_gray(70), egui::Color32::from_gray(220)),
    }
}

pub fn status_badge(ui: &mut egui::Ui, variant: BadgeVariant, text: &str) -> egui::Response {
    let (bg, fg) = badge_colors(variant);
    ui.label(
        egui::RichText::new(format!(" {text} "))
            .small()
            .strong()
            .color(fg)
            .background_color(bg),
    )
}
