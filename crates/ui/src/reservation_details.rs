//! Host flow for table clicks: open the table's first active reservation in a
//! details window, or say the table has none. The window's buttons send
//! `ReservationStatusRequest`s; the result comes back as a short notice.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use reservations::{
    FloorTables, Reservation, ReservationBook, ReservationStatus, ReservationStatusChanged,
    ReservationStatusRequest, TableClicked,
};

/// How long a host notice stays on screen.
const NOTICE_SECS: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableClickOutcome {
    Open { reservation_id: String },
    NoActiveReservation { message: String },
}

/// Reservation currently shown in the details window.
#[derive(Resource, Default, Debug)]
pub struct ReservationDetails {
    pub open: Option<String>,
}

#[derive(Resource, Default, Debug)]
pub struct HostNotice {
    text: Option<String>,
    remaining_secs: f32,
}

impl HostNotice {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.remaining_secs = NOTICE_SECS;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn tick(&mut self, dt: f32) {
        if self.text.is_none() {
            return;
        }
        self.remaining_secs -= dt;
        if self.remaining_secs <= 0.0 {
            self.text = None;
        }
    }
}

pub fn resolve_table_click(
    book: &ReservationBook,
    tables: &FloorTables,
    table_id: &str,
) -> TableClickOutcome {
    if let Some(reservation) = book.active_for_table(table_id).next() {
        return TableClickOutcome::Open {
            reservation_id: reservation.id.clone(),
        };
    }
    let name = tables
        .get(table_id)
        .map_or_else(|| format!("Table {table_id}"), |t| t.name.clone());
    TableClickOutcome::NoActiveReservation {
        message: format!("{name} has no active reservations."),
    }
}

/// Status moves the details window offers for a reservation.
pub fn available_actions(status: ReservationStatus) -> Vec<ReservationStatus> {
    [ReservationStatus::Confirmed, ReservationStatus::Cancelled]
        .into_iter()
        .filter(|next| status.can_transition_to(*next))
        .collect()
}

fn action_label(next: ReservationStatus) -> &'static str {
    match next {
        ReservationStatus::Confirmed => "Confirm Reservation",
        ReservationStatus::Cancelled => "Cancel Reservation",
        ReservationStatus::Pending => "Mark Pending",
    }
}

fn detail_rows(reservation: &Reservation) -> Vec<(&'static str, String)> {
    let table = if reservation.table_name.is_empty() {
        format!("Table {}", reservation.table_id)
    } else {
        reservation.table_name.clone()
    };
    let mut rows = vec![
        ("Customer", reservation.customer_name.clone()),
        ("Email", reservation.customer_email.clone()),
        ("Phone", reservation.customer_phone.clone()),
        ("Date", reservation.date.clone()),
        ("Time", reservation.time.clone()),
        ("Party size", reservation.party_size.to_string()),
        ("Table", table),
        ("Status", reservation.status.label().to_string()),
    ];
    rows.retain(|(_, value)| !value.is_empty());
    if let Some(requests) = &reservation.special_requests {
        rows.push(("Special requests", requests.clone()));
    }
    rows
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn open_details_on_table_click(
    mut clicked: EventReader<TableClicked>,
    book: Res<ReservationBook>,
    tables: Res<FloorTables>,
    mut details: ResMut<ReservationDetails>,
    mut notice: ResMut<HostNotice>,
) {
    for TableClicked { table_id } in clicked.read() {
        match resolve_table_click(&book, &tables, table_id) {
            TableClickOutcome::Open { reservation_id } => {
                debug!("Opening reservation {reservation_id} for table {table_id}");
                details.open = Some(reservation_id);
            }
            TableClickOutcome::NoActiveReservation { message } => {
                details.open = None;
                notice.show(message);
            }
        }
    }
}

pub fn notice_on_status_changed(
    mut changes: EventReader<ReservationStatusChanged>,
    mut notice: ResMut<HostNotice>,
) {
    for ReservationStatusChanged(applied) in changes.read() {
        notice.show(format!(
            "Reservation {} successfully",
            applied.to.label().to_lowercase()
        ));
    }
}

pub fn tick_host_notice(time: Res<Time>, mut notice: ResMut<HostNotice>) {
    if notice.text.is_some() {
        notice.tick(time.delta_secs());
    }
}

pub fn host_notice_ui(mut contexts: EguiContexts, notice: Res<HostNotice>) {
    let Some(text) = notice.text() else {
        return;
    };
    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("host_notice"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(text);
            });
        });
}

pub fn reservation_details_ui(
    mut contexts: EguiContexts,
    mut details: ResMut<ReservationDetails>,
    book: Res<ReservationBook>,
    mut requests: EventWriter<ReservationStatusRequest>,
) {
    let Some(reservation_id) = details.open.clone() else {
        return;
    };
    let Some(reservation) = book.get(&reservation_id) else {
        details.open = None;
        return;
    };

    let ctx = contexts.ctx_mut();
    let mut open = true;
    let mut close = false;
    egui::Window::new("Reservation Details")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(340.0)
        .show(ctx, |ui| {
            egui::Grid::new("reservation_detail_rows")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in detail_rows(reservation) {
                        ui.strong(label);
                        ui.label(value);
                        ui.end_row();
                    }
                });
            ui.separator();
            ui.horizontal(|ui| {
                for next in available_actions(reservation.status) {
                    if ui.button(action_label(next)).clicked() {
                        requests.send(ReservationStatusRequest::new(reservation.id.clone(), next));
                        close = true;
                    }
                }
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });

    if !open || close {
        details.open = None;
    }
}
