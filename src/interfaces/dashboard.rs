use crate::application::report::{pl_cell, signed_pl};
use crate::domain::performance::series::{equity_curve, monthly_pl, recent, win_loss};
use crate::interfaces::components::card::Card;
use crate::interfaces::components::charts::{
    render_equity_chart, render_monthly_chart, render_win_loss_chart,
};
use crate::interfaces::components::metrics::{render_metric_card, render_status_pill};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::ui::JournalApp;
use eframe::egui;

/// Headline metrics, the most recent trades and the three charts.
pub fn render_dashboard(ui: &mut egui::Ui, app: &JournalApp) {
    let metrics = &app.metrics;
    let trades = &app.trades;

    let profit_factor = metrics
        .profit_factor
        .map(|pf| format!("{:.2}", pf))
        .unwrap_or_else(|| "—".to_string());

    ui.columns(4, |cols| {
        render_metric_card(
            &mut cols[0],
            "Total Trades",
            &metrics.total_trades.to_string(),
            DesignSystem::TEXT_PRIMARY,
            None,
        );
        render_metric_card(
            &mut cols[1],
            "Net P/L",
            &metrics.net_display(),
            DesignSystem::pl_color(metrics.net_pl),
            None,
        );
        render_metric_card(
            &mut cols[2],
            "Win Rate",
            &metrics.win_rate_display(),
            DesignSystem::ACCENT_PRIMARY,
            Some(&format!(
                "{} wins / {} losses",
                metrics.winning_trades, metrics.losing_trades
            )),
        );
        render_metric_card(
            &mut cols[3],
            "Profit Factor",
            &profit_factor,
            DesignSystem::TEXT_PRIMARY,
            Some(&format!(
                "best {} / worst {}",
                signed_pl(metrics.largest_win),
                signed_pl(metrics.largest_loss)
            )),
        );
    });

    ui.add_space(DesignSystem::SPACING_MEDIUM);

    egui::ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            Card::new().title("Recent Trades").show(ui, |ui| {
                let latest = recent(trades, app.config.recent_limit);
                if latest.is_empty() {
                    ui.label(
                        egui::RichText::new("No trades journaled yet")
                            .color(DesignSystem::TEXT_MUTED),
                    );
                }
                for trade in latest {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} {}",
                                trade.date_label(),
                                trade.time_label()
                            ))
                            .color(DesignSystem::TEXT_SECONDARY),
                        );
                        ui.label(egui::RichText::new(&trade.symbol).strong());
                        render_status_pill(ui, trade.category().label(), DesignSystem::ACCENT_PRIMARY);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(pl_cell(trade.pl))
                                    .strong()
                                    .color(DesignSystem::pl_color(trade.pl_value())),
                            );
                        });
                    });
                }
            });

            ui.add_space(DesignSystem::SPACING_MEDIUM);

            Card::new().title("Equity Curve").show(ui, |ui| {
                render_equity_chart(ui, &equity_curve(trades));
            });

            ui.add_space(DesignSystem::SPACING_MEDIUM);

            ui.columns(2, |cols| {
                Card::new().title("Win / Loss").show(&mut cols[0], |ui| {
                    render_win_loss_chart(ui, win_loss(trades));
                });
                Card::new().title("Monthly P/L").show(&mut cols[1], |ui| {
                    render_monthly_chart(ui, &monthly_pl(trades));
                });
            });
        });
}
