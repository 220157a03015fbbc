use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Headline figure with an optional caption underneath.
pub fn render_metric_card(
    ui: &mut egui::Ui,
    title: &str,
    value: &str,
    value_color: egui::Color32,
    caption: Option<&str>,
) {
    Card::new().title(title).min_height(90.0).show(ui, |ui| {
        ui.label(
            egui::RichText::new(value)
                .size(26.0)
                .strong()
                .color(value_color),
        );

        if let Some(caption) = caption {
            ui.label(
                egui::RichText::new(caption)
                    .size(11.0)
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
}

/// Small coloured badge, used for sides and categories in tables.
pub fn render_status_pill(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color.linear_multiply(0.15))
        .corner_radius(10)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(11.0).strong().color(color));
        });
}
