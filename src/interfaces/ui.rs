use crate::application::journal::TradeJournal;
use crate::application::report::pl_cell;
use crate::application::submission::{SubmissionGate, SubmissionStatus};
use crate::application::trade_form::TradeForm;
use crate::config::JournalConfig;
use crate::domain::errors::JournalError;
use crate::domain::performance::metrics::JournalMetrics;
use crate::domain::performance::query::TradeQuery;
use crate::domain::trading::types::Trade;
use crate::interfaces::dashboard::render_dashboard;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::journal_view::render_journal_view;
use crate::interfaces::reports_view::render_reports_view;
use crate::interfaces::trade_form_view::render_trade_form;
use crossbeam_channel::Receiver;
use eframe::egui;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{error, info};

const MAX_LOG_LINES: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Journal,
    NewTrade,
    Reports,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Journal, Tab::NewTrade, Tab::Reports];

    fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Journal => "Journal",
            Tab::NewTrade => "New Trade",
            Tab::Reports => "Reports",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Desktop front end over a [`TradeJournal`].
///
/// Keeps a cached snapshot and metrics, rebuilt after every mutation, so
/// frames never re-read storage.
pub struct JournalApp {
    pub(crate) journal: TradeJournal,
    pub(crate) config: JournalConfig,
    pub(crate) runtime: Handle,
    pub(crate) tab: Tab,
    pub(crate) form: TradeForm,
    pub(crate) gate: SubmissionGate,
    pub(crate) query: TradeQuery,
    pub(crate) trades: Vec<Trade>,
    pub(crate) metrics: JournalMetrics,
    pub(crate) pending_removal: Option<String>,
    pub(crate) notice: Option<Notice>,
    log_rx: Receiver<String>,
    logs: VecDeque<String>,
    show_logs: bool,
    themed: bool,
}

impl JournalApp {
    pub fn new(
        journal: TradeJournal,
        config: JournalConfig,
        runtime: Handle,
        log_rx: Receiver<String>,
    ) -> Self {
        let mut app = Self {
            journal,
            config,
            runtime,
            tab: Tab::Dashboard,
            form: TradeForm::default(),
            gate: SubmissionGate::new(),
            query: TradeQuery::default(),
            trades: Vec::new(),
            metrics: JournalMetrics::default(),
            pending_removal: None,
            notice: None,
            log_rx,
            logs: VecDeque::new(),
            show_logs: false,
            themed: false,
        };
        app.refresh();
        app
    }

    /// Rebuild the cached view of the journal.
    pub(crate) fn refresh(&mut self) {
        self.trades = self.journal.snapshot();
        self.metrics = JournalMetrics::calculate(&self.trades);
    }

    pub(crate) fn report_error(&mut self, err: &JournalError) {
        if !err.is_validation() {
            error!("{}", err);
        }
        self.notice = Some(Notice::Error(err.to_string()));
    }

    pub(crate) fn submit_form(&mut self) {
        let draft = self.form.to_draft();
        let screenshot = self.form.screenshot_path();
        match self
            .gate
            .submit(&mut self.journal, draft, screenshot, &self.runtime)
        {
            Ok(status) => self.handle_submission(status),
            Err(e) => self.report_error(&e),
        }
    }

    fn handle_submission(&mut self, status: SubmissionStatus) {
        match status {
            SubmissionStatus::Idle | SubmissionStatus::Reading => {}
            SubmissionStatus::Saved(trade) => {
                info!("Journaled {} {} ({})", trade.side, trade.symbol, pl_cell(trade.pl));
                self.form.reset();
                self.refresh();
                self.notice = Some(Notice::Info(format!("Saved {} trade", trade.symbol)));
                self.tab = Tab::Journal;
            }
            SubmissionStatus::Failed(e) => self.report_error(&e),
        }
    }

    fn drain_logs(&mut self) {
        while let Ok(line) = self.log_rx.try_recv() {
            self.logs.push_back(line);
            if self.logs.len() > MAX_LOG_LINES {
                self.logs.pop_front();
            }
        }
    }

    /// Asks for confirmation of a marked deletion. Held back while a
    /// submission is reading its screenshot.
    fn resolve_removal(&mut self, ctx: &egui::Context) {
        if self.gate.is_busy() {
            return;
        }
        let Some(id) = self.pending_removal.clone() else {
            return;
        };
        let Some(trade) = self.journal.find(&id).cloned() else {
            self.pending_removal = None;
            return;
        };

        let mut decision = None;
        egui::Window::new("Delete trade?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!(
                    "{} {} on {} {} ({})",
                    trade.side,
                    trade.symbol,
                    trade.date_label(),
                    trade.time_label(),
                    pl_cell(trade.pl)
                ));
                ui.add_space(DesignSystem::SPACING_SMALL);
                ui.horizontal(|ui| {
                    if ui
                        .button(egui::RichText::new("Delete").color(DesignSystem::LOSS))
                        .clicked()
                    {
                        decision = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(false);
                    }
                });
            });

        let Some(confirmed) = decision else {
            return;
        };
        self.pending_removal = None;
        match self.gate.remove(&mut self.journal, &id, |_| confirmed) {
            Ok(Some(removed)) => {
                self.refresh();
                self.notice = Some(Notice::Info(format!("Deleted {} trade", removed.symbol)));
            }
            Ok(None) => {}
            Err(e) => self.report_error(&e),
        }
    }

    fn render_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.notice.clone() else {
            return;
        };
        let (text, color) = match &notice {
            Notice::Info(text) => (text.as_str(), DesignSystem::ACCENT_PRIMARY),
            Notice::Error(text) => (text.as_str(), DesignSystem::LOSS),
        };
        egui::Frame::NONE
            .fill(color.linear_multiply(0.12))
            .stroke(egui::Stroke::new(1.0, color))
            .corner_radius(6)
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(text).color(color));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            self.notice = None;
                        }
                    });
                });
            });
        ui.add_space(DesignSystem::SPACING_SMALL);
    }
}

impl eframe::App for JournalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.themed {
            ctx.set_visuals(DesignSystem::theme());
            self.themed = true;
        }

        self.drain_logs();
        if self.gate.is_busy() {
            let status = self.gate.poll(&mut self.journal);
            self.handle_submission(status);
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("Trade Journal")
                        .strong()
                        .color(DesignSystem::ACCENT_PRIMARY),
                );
                ui.separator();
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.label());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_logs, "Logs");
                });
            });
        });

        egui::TopBottomPanel::bottom("ticker_panel").show(ctx, |ui| {
            ui.label(
                egui::RichText::new(self.metrics.ticker())
                    .monospace()
                    .color(DesignSystem::TEXT_SECONDARY),
            );
        });

        if self.show_logs {
            egui::SidePanel::right("log_panel")
                .default_width(340.0)
                .resizable(true)
                .show(ctx, |ui| {
                    ui.heading("Logs");
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for line in &self.logs {
                                let color = if line.contains("ERROR") {
                                    DesignSystem::LOSS
                                } else if line.contains("WARN") {
                                    egui::Color32::from_rgb(255, 200, 90)
                                } else {
                                    DesignSystem::TEXT_SECONDARY
                                };
                                ui.label(egui::RichText::new(line).small().color(color));
                            }
                        });
                });
        }

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                self.render_notice(ui);
                match self.tab {
                    Tab::Dashboard => render_dashboard(ui, self),
                    Tab::Journal => render_journal_view(ui, self),
                    Tab::NewTrade => render_trade_form(ui, self),
                    Tab::Reports => render_reports_view(ui, self),
                }
            });

        self.resolve_removal(ctx);
    }
}
