// CustView - ui/panels/toolbar.rs
//
// Search box and record count above the table.
// Edits go through the view state's debouncer; Escape clears the search
// immediately.

use crate::app::state::ViewState;
use crate::ui::theme;
use std::time::Instant;

/// Render the toolbar.
pub fn render(ui: &mut egui::Ui, state: &mut ViewState, now: Instant) {
    ui.horizontal(|ui| {
        let mut text = state.query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text("Search by name / email / phone")
                .desired_width(theme::SEARCH_BOX_WIDTH),
        );
        if response.changed() {
            state.on_query_change(&text, now);
        }
        // TextEdit drops focus on Escape, so check both states.
        let escaped = (response.has_focus() || response.lost_focus())
            && ui.input(|i| i.key_pressed(egui::Key::Escape));
        let cleared = !state.query.is_empty()
            && ui
                .small_button("\u{2715}")
                .on_hover_text("Clear search")
                .clicked();
        if escaped || cleared {
            state.set_query_immediate("");
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(state.status_text());
            if state.is_searching() {
                let progress = f32::from(state.search_progress()) / 100.0;
                ui.add(
                    egui::ProgressBar::new(progress)
                        .desired_width(140.0)
                        .show_percentage(),
                );
            }
        });
    });
}
