use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use rendering::egui_input_guard::update_pointer_capture;
use rendering::FloorViewSet;

pub mod hover_card;
pub mod reservation_details;
pub mod status_legend;
pub mod theme;
pub mod view_toggle;

use reservation_details::{HostNotice, ReservationDetails};

/// Egui overlay for the host: view tabs, hover card, legend and the
/// reservation details window.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<ReservationDetails>()
            .init_resource::<HostNotice>()
            .add_systems(Startup, theme::apply_floor_theme)
            .add_systems(Update, update_pointer_capture.before(FloorViewSet::Input))
            .add_systems(
                Update,
                (
                    reservation_details::open_details_on_table_click,
                    reservation_details::notice_on_status_changed,
                    reservation_details::tick_host_notice,
                ),
            )
            .add_systems(
                Update,
                (
                    view_toggle::view_toggle_ui,
                    hover_card::hover_card_ui,
                    status_legend::status_legend_ui,
                    reservation_details::reservation_details_ui,
                    reservation_details::host_notice_ui,
                )
                    .after(FloorViewSet::Pick),
            );
    }
}
