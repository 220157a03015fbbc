use crate::domain::trading::types::Side;
use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::ui::JournalApp;
use eframe::egui;

pub fn render_trade_form(ui: &mut egui::Ui, app: &mut JournalApp) {
    let busy = app.gate.is_busy();

    Card::new().title("New Trade").show(ui, |ui| {
        egui::Grid::new("trade_form_grid")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                let form = &mut app.form;

                ui.label("Date");
                ui.add(egui::TextEdit::singleline(&mut form.date).hint_text("YYYY-MM-DD (today)"));
                ui.end_row();

                ui.label("Time");
                ui.add(egui::TextEdit::singleline(&mut form.time).hint_text("HH:MM (now)"));
                ui.end_row();

                ui.label("Symbol");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut form.symbol).hint_text("XAUUSD"));
                    if let Some(kind) = form.category_hint() {
                        ui.label(
                            egui::RichText::new(kind.label())
                                .small()
                                .color(DesignSystem::ACCENT_PRIMARY),
                        );
                    }
                });
                ui.end_row();

                ui.label("Side");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut form.side, Side::Long, "Long");
                    ui.radio_value(&mut form.side, Side::Short, "Short");
                });
                ui.end_row();

                ui.label("Entry");
                ui.text_edit_singleline(&mut form.entry);
                ui.end_row();

                ui.label("Exit");
                ui.text_edit_singleline(&mut form.exit);
                ui.end_row();

                ui.label("Lot");
                ui.add(egui::TextEdit::singleline(&mut form.lot).hint_text("1"));
                ui.end_row();

                ui.label("Contract");
                ui.add(egui::TextEdit::singleline(&mut form.contract).hint_text("1"));
                ui.end_row();

                ui.label("Stop loss");
                ui.add(egui::TextEdit::singleline(&mut form.stop_loss).hint_text("optional"));
                ui.end_row();

                ui.label("Notes");
                ui.add(egui::TextEdit::multiline(&mut form.notes).desired_rows(3));
                ui.end_row();

                ui.label("Screenshot");
                ui.add(
                    egui::TextEdit::singleline(&mut form.screenshot_path)
                        .hint_text("path to image (optional)"),
                );
                ui.end_row();
            });

        ui.add_space(DesignSystem::SPACING_SMALL);

        let preview = app.form.preview();
        let preview_text = preview.display();
        if !preview_text.is_empty() {
            let color = preview
                .pl
                .map(DesignSystem::pl_color)
                .unwrap_or(DesignSystem::NEUTRAL);
            ui.label(
                egui::RichText::new(format!("P/L preview: {}", preview_text))
                    .strong()
                    .color(color),
            );
        }

        ui.add_space(DesignSystem::SPACING_SMALL);

        ui.horizontal(|ui| {
            let label = if busy { "Saving…" } else { "Save Trade" };
            if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                app.submit_form();
            }
            if ui.add_enabled(!busy, egui::Button::new("Reset")).clicked() {
                app.form.reset();
            }
            if busy {
                ui.spinner();
            }
        });
    });
}
