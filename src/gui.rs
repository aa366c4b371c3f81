// CustView - gui.rs
//
// Top-level eframe::App implementation.
// Drives one view-state scheduler turn per frame and wires the panels.

use crate::app::state::ViewState;
use crate::core::export;
use crate::ui;
use crate::util::error::{CustViewError, Result};
use crate::util::format::thousands;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// The CustView application.
pub struct CustViewApp {
    pub state: ViewState,
    /// Last export outcome, shown in the status bar.
    notice: Option<String>,
}

impl CustViewApp {
    pub fn new(state: ViewState) -> Self {
        Self {
            state,
            notice: None,
        }
    }

    /// Ask for a destination and write the displayed rows to it.
    fn export_displayed(&mut self, format: ExportFormat) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format!("customers.{}", format.extension()))
            .save_file()
        else {
            return;
        };
        self.notice = Some(match self.write_export(format, &dest) {
            Ok(n) => format!("Exported {n} rows to {}.", format.label()),
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                e.to_string()
            }
        });
    }

    fn write_export(&self, format: ExportFormat, dest: &Path) -> Result<usize> {
        let file = std::fs::File::create(dest).map_err(|e| CustViewError::Io {
            path: dest.to_path_buf(),
            operation: "create export file",
            source: e,
        })?;
        let writer = std::io::BufWriter::new(file);
        let rows = self.state.displayed_rows();
        let count = match format {
            ExportFormat::Csv => export::export_csv(rows, writer, dest)?,
            ExportFormat::Json => export::export_json(rows, writer, dest)?,
        };
        Ok(count)
    }
}

impl eframe::App for CustViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.tick(now);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_rows = self.state.displayed_len() > 0;
                    ui.add_enabled_ui(has_rows, |ui| {
                        if ui.button("Export CSV\u{2026}").clicked() {
                            self.export_displayed(ExportFormat::Csv);
                            ui.close_menu();
                        }
                        if ui.button("Export JSON\u{2026}").clicked() {
                            self.export_displayed(ExportFormat::Json);
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar: search box + counts
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::toolbar::render(ui, &mut self.state, now);
            ui.add_space(4.0);
        });

        // Status bar: loading / searching indicator and last notice
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.is_searching() {
                    ui.spinner();
                    ui.label(format!("Searching\u{2026} {}%", self.state.search_progress()));
                } else if self.state.is_loading_page() {
                    ui.spinner();
                    ui.label("Loading more\u{2026}");
                } else if let Some(notice) = &self.notice {
                    ui.label(notice);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "page {} of {}",
                        thousands(self.state.loaded_pages()),
                        thousands(self.state.config().page_count())
                    ));
                });
            });
        });

        // Central panel (table)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::table::render(ui, &mut self.state);
        });

        // Keep frames coming while work is scheduled for a later tick.
        if self.state.is_searching() || self.state.is_loading_page() {
            ctx.request_repaint();
        } else if let Some(wait) = self.state.debounce_remaining(now) {
            ctx.request_repaint_after(wait);
        }
    }
}
