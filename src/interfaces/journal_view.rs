use crate::application::report::{pl_cell, price_cell};
use crate::domain::performance::query::CategoryFilter;
use crate::domain::trading::types::Side;
use crate::interfaces::components::metrics::render_status_pill;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::ui::JournalApp;
use eframe::egui;

/// Filterable trade table. Deleting only marks the trade; the app asks
/// for confirmation before anything is written. Delete is disabled while a
/// submission is pending.
pub fn render_journal_view(ui: &mut egui::Ui, app: &mut JournalApp) {
    ui.horizontal(|ui| {
        for option in CategoryFilter::options() {
            ui.selectable_value(&mut app.query.category, option, option.label());
        }
        ui.separator();
        ui.add(
            egui::TextEdit::singleline(&mut app.query.search)
                .hint_text("Search symbol or notes")
                .desired_width(220.0),
        );
    });
    ui.add_space(DesignSystem::SPACING_SMALL);

    let visible = app.query.apply(&app.trades);
    if visible.is_empty() {
        ui.label(egui::RichText::new("No matching trades").color(DesignSystem::TEXT_MUTED));
        return;
    }

    let busy = app.gate.is_busy();
    let mut remove_request = None;
    egui::ScrollArea::vertical()
        .id_salt("journal_table")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("journal_grid")
                .striped(true)
                .num_columns(11)
                .spacing([14.0, 6.0])
                .show(ui, |ui| {
                    for header in [
                        "Date", "Time", "Symbol", "Category", "Side", "Entry", "Exit", "Lot",
                        "P/L", "Notes", "",
                    ] {
                        ui.label(
                            egui::RichText::new(header)
                                .small()
                                .strong()
                                .color(DesignSystem::TEXT_SECONDARY),
                        );
                    }
                    ui.end_row();

                    for trade in visible {
                        ui.label(trade.date_label());
                        ui.label(trade.time_label());
                        ui.label(egui::RichText::new(&trade.symbol).strong());
                        ui.label(trade.category().label());

                        let side_color = match trade.side {
                            Side::Long => DesignSystem::PROFIT,
                            Side::Short => DesignSystem::LOSS,
                        };
                        render_status_pill(ui, &trade.side.to_string().to_uppercase(), side_color);

                        ui.label(price_cell(trade.entry));
                        ui.label(price_cell(trade.exit));
                        ui.label(trade.lot.normalize().to_string());
                        ui.label(
                            egui::RichText::new(pl_cell(trade.pl))
                                .strong()
                                .color(DesignSystem::pl_color(trade.pl_value())),
                        );

                        let notes = ui.label(truncate(&trade.notes, 40));
                        if trade.screenshot.is_some() {
                            notes.on_hover_text("Screenshot attached");
                        }

                        let delete = egui::Button::new(
                            egui::RichText::new("Delete").small().color(DesignSystem::LOSS),
                        );
                        if ui.add_enabled(!busy, delete).clicked() {
                            remove_request = Some(trade.id.clone());
                        }
                        ui.end_row();
                    }
                });
        });

    if remove_request.is_some() {
        app.pending_removal = remove_request;
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push('…');
    short
}
