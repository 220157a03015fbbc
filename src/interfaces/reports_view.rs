use crate::application::report::Report;
use crate::domain::errors::JournalError;
use crate::infrastructure::export::{PageLayout, export_csv, export_pdf};
use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::ui::{JournalApp, Notice};
use eframe::egui;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Clone, Copy)]
enum ExportKind {
    Pdf,
    Csv,
}

pub fn render_reports_view(ui: &mut egui::Ui, app: &mut JournalApp) {
    let pdf_path = app.config.pdf_output_path();
    let csv_path = app.config.csv_output_path();
    let mut requested = None;

    Card::new().title("Export").show(ui, |ui| {
        ui.label(format!(
            "{} trades, net P/L {}",
            app.metrics.total_trades,
            app.metrics.net_display()
        ));
        ui.add_space(DesignSystem::SPACING_SMALL);

        ui.horizontal(|ui| {
            if ui.button("Export PDF").clicked() {
                requested = Some(ExportKind::Pdf);
            }
            ui.label(
                egui::RichText::new(pdf_path.display().to_string())
                    .small()
                    .color(DesignSystem::TEXT_MUTED),
            );
        });
        ui.horizontal(|ui| {
            if ui.button("Export CSV").clicked() {
                requested = Some(ExportKind::Csv);
            }
            ui.label(
                egui::RichText::new(csv_path.display().to_string())
                    .small()
                    .color(DesignSystem::TEXT_MUTED),
            );
        });
    });

    let Some(kind) = requested else {
        return;
    };
    if app.trades.is_empty() {
        app.notice = Some(Notice::Error(JournalError::NothingToExport.to_string()));
        return;
    }

    let (path, result) = match kind {
        ExportKind::Pdf => (pdf_path, export_report_pdf(app)),
        ExportKind::Csv => (csv_path.clone(), export_csv(&app.trades, &csv_path)),
    };
    match result {
        Ok(()) => {
            info!("Report written to {}", path.display());
            app.notice = Some(Notice::Info(format!("Saved {}", path.display())));
        }
        Err(e) => {
            error!("Export failed: {:#}", e);
            app.notice = Some(Notice::Error(format!("Export failed: {}", e)));
        }
    }
}

fn export_report_pdf(app: &JournalApp) -> anyhow::Result<()> {
    let report = Report::build(app.config.report_title.clone(), &app.trades)?;
    let path: PathBuf = app.config.pdf_output_path();
    export_pdf(&report, PageLayout::new(app.config.rows_per_page), &path)
}
