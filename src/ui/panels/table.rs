// CustView - ui/panels/table.rs
//
// Virtual-scrolling customer table.
//
// Uses egui's `ScrollArea::show_rows`, which renders only the rows in the
// viewport, so cost per frame is independent of how many rows are loaded
// or matched. After drawing, the unseen distance below the viewport is
// reported to the view state, which decides whether to load another page.

use crate::app::state::ViewState;
use crate::core::model::{Record, SortKey};
use crate::ui::theme;
use crate::util::constants::LAST_MESSAGE_DATE_FORMAT;
use egui::{Align, Layout, RichText};

/// Render the header row and the table body (central area).
pub fn render(ui: &mut egui::Ui, state: &mut ViewState) {
    render_header(ui, state);
    ui.separator();

    let rows = state.displayed_len();
    if rows == 0 {
        ui.centered_and_justified(|ui| {
            if state.has_search_results() {
                ui.label("No customers match the search.");
            } else {
                ui.label("Loading customers\u{2026}");
            }
        });
        return;
    }

    let output = egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, theme::ROW_HEIGHT, rows, |ui, row_range| {
            for position in row_range {
                if let Some(record) = state.displayed_row(position) {
                    render_row(ui, record);
                }
            }
        });

    let remaining =
        output.content_size.y - (output.state.offset.y + output.inner_rect.height());
    if state.on_scroll(remaining) {
        tracing::trace!(remaining, "Near bottom; next page requested");
    }
}

fn render_header(ui: &mut egui::Ui, state: &mut ViewState) {
    let spec = state.sort_spec();
    let mut clicked: Option<SortKey> = None;

    ui.horizontal(|ui| {
        for (key, width) in [
            (SortKey::Id, theme::COL_ID),
            (SortKey::Name, theme::COL_NAME),
            (SortKey::Score, theme::COL_SCORE),
            (SortKey::Email, theme::COL_EMAIL),
        ] {
            let label = format!("{} {}", key.label(), spec.indicator(key));
            let button = egui::Button::new(RichText::new(label).strong()).frame(false);
            if ui
                .add_sized([width, theme::HEADER_HEIGHT], button)
                .on_hover_text(format!("Sort by {}", key.label()))
                .clicked()
            {
                clicked = Some(key);
            }
        }
        header_cell(ui, theme::COL_LAST_MESSAGE, "Last message sent at");
        header_cell(ui, theme::COL_ADDED_BY, "Added By");
    });

    if let Some(key) = clicked {
        state.toggle_sort(key);
    }
}

fn header_cell(ui: &mut egui::Ui, width: f32, text: &str) {
    ui.allocate_ui_with_layout(
        egui::vec2(width, theme::HEADER_HEIGHT),
        Layout::left_to_right(Align::Center),
        |ui| ui.strong(text),
    );
}

fn cell(ui: &mut egui::Ui, width: f32, text: RichText) {
    ui.allocate_ui_with_layout(
        egui::vec2(width, theme::ROW_HEIGHT),
        Layout::left_to_right(Align::Center),
        |ui| ui.add(egui::Label::new(text).truncate()),
    );
}

fn render_row(ui: &mut egui::Ui, record: &Record) {
    ui.horizontal(|ui| {
        cell(ui, theme::COL_ID, RichText::new(record.id.to_string()).monospace());

        // Avatar + name over phone.
        ui.allocate_ui_with_layout(
            egui::vec2(theme::COL_NAME, theme::ROW_HEIGHT),
            Layout::left_to_right(Align::Center),
            |ui| {
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(theme::AVATAR_SIZE, theme::AVATAR_SIZE),
                    egui::Sense::hover(),
                );
                ui.painter().circle_filled(
                    rect.center(),
                    theme::AVATAR_SIZE / 2.0,
                    theme::avatar_colour(record.avatar),
                );
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    initials(&record.name),
                    egui::FontId::proportional(10.0),
                    egui::Color32::WHITE,
                );
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing.y = 0.0;
                    ui.add(egui::Label::new(&record.name).truncate());
                    ui.label(RichText::new(&record.phone).small().weak());
                });
            },
        );

        cell(
            ui,
            theme::COL_SCORE,
            RichText::new(record.score.to_string()).color(theme::score_colour(record.score)),
        );
        cell(ui, theme::COL_EMAIL, RichText::new(&record.email));
        cell(
            ui,
            theme::COL_LAST_MESSAGE,
            RichText::new(
                record
                    .last_message_at
                    .format(LAST_MESSAGE_DATE_FORMAT)
                    .to_string(),
            )
            .small(),
        );
        cell(
            ui,
            theme::COL_ADDED_BY,
            RichText::new(record.added_by.label()).color(theme::added_by_colour(record.added_by)),
        );
    });
}

/// Up to two upper-case initials from a display name.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Aarav Shah"), "AS");
        assert_eq!(initials("dev"), "D");
        assert_eq!(initials(""), "");
    }
}
