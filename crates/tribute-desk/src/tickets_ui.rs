use egui::Ui;
use tribute_core::{Ticket, TicketIntent, TicketList, TicketStatus};

use crate::state::TicketsUiState;
use crate::ui;

pub enum TicketsAction {
    Refresh,
    Send(TicketIntent),
}

pub fn render_tickets(ui: &mut Ui, state: &mut TicketsUiState) -> Option<TicketsAction> {
    ui::styled_heading(ui, "Support Tickets");
    ui.label("Messages sent from tribute pages.");

    let mut action = None;
    let busy = state.in_flight.is_some();

    ui.horizontal(|ui| {
        let loading = state.list.is_loading();
        if ui
            .add_enabled(!loading, egui::Button::new("Refresh"))
            .clicked()
        {
            action = Some(TicketsAction::Refresh);
        }
        if loading || busy {
            ui.spinner();
        }
    });

    ui::notice(ui, &state.notice);
    if let Some(err) = state.list.last_error() {
        ui.colored_label(egui::Color32::RED, err.to_string());
    }

    ui.separator();
    let tickets = state.list.tickets().to_vec();
    if tickets.is_empty() {
        ui.label(if state.list.is_loading() {
            "Loading tickets..."
        } else {
            "No tickets yet."
        });
        return action;
    }

    egui::Grid::new("ticket_grid")
        .num_columns(5)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Subject");
            ui.strong("From");
            ui.strong("Status");
            ui.strong("Updated");
            ui.strong("");
            ui.end_row();
            for ticket in &tickets {
                if ui
                    .selectable_label(state.list.is_selected(ticket), &ticket.subject)
                    .clicked()
                {
                    state.list.select_ticket(ticket);
                    state.reply_draft.clear();
                }
                ui.label(&ticket.sender_name);
                ui::status_badge(ui, TicketList::status_variant(ticket), status_text(ticket));
                ui.label(ticket.last_updated().unwrap_or("-"));
                if ui
                    .add_enabled(!busy, egui::Button::new(toggle_label(ticket)))
                    .clicked()
                {
                    action = Some(TicketsAction::Send(
                        state.list.request_delete_or_close(ticket),
                    ));
                }
                ui.end_row();
            }
        });

    if let Some(selected) = state.list.selected().cloned() {
        if let Some(send) = render_details(ui, state, &selected, busy) {
            action = Some(send);
        }
    }
    action
}

fn render_details(
    ui: &mut Ui,
    state: &mut TicketsUiState,
    ticket: &Ticket,
    busy: bool,
) -> Option<TicketsAction> {
    ui::section_header(ui, &ticket.subject);
    ui.label(format!("{} <{}>", ticket.sender_name, ticket.sender_email));
    ui.add_space(4.0);
    ui.label(&ticket.initial_content);

    ui.add_space(8.0);
    ui.label("Reply");
    ui.add(
        egui::TextEdit::multiline(&mut state.reply_draft)
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );

    let mut action = None;
    if ui
        .add_enabled(!busy, egui::Button::new("Send reply"))
        .clicked()
    {
        match state.list.compose_reply(ticket, &state.reply_draft) {
            Ok(intent) => action = Some(TicketsAction::Send(intent)),
            Err(e) => state.notice.set_error(e.to_string()),
        }
    }
    action
}

fn status_text(ticket: &Ticket) -> &'static str {
    ticket.status.map_or("unknown", TicketStatus::as_str)
}

fn toggle_label(ticket: &Ticket) -> &'static str {
    if ticket.status == Some(TicketStatus::Closed) {
        "Reopen"
    } else {
        "Close"
    }
}
