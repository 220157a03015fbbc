use crate::domain::performance::series::{EquityPoint, MonthlyPl, WinLoss};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};
use rust_decimal::prelude::ToPrimitive;

const CHART_HEIGHT: f32 = 220.0;

/// Running equity, one point per trade in list order.
pub fn render_equity_chart(ui: &mut egui::Ui, points: &[EquityPoint]) {
    let values: Vec<[f64; 2]> = points
        .iter()
        .enumerate()
        .map(|(i, p)| [(i + 1) as f64, p.equity.to_f64().unwrap_or(0.0)])
        .collect();

    let line = Line::new("Equity", PlotPoints::from(values))
        .color(DesignSystem::ACCENT_PRIMARY)
        .width(2.0);

    Plot::new("equity_curve")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| format!("#{}", mark.value as i64))
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

pub fn render_win_loss_chart(ui: &mut egui::Ui, counts: WinLoss) {
    let bars = vec![
        Bar::new(0.0, counts.wins as f64)
            .name("Wins")
            .width(0.6)
            .fill(DesignSystem::PROFIT),
        Bar::new(1.0, counts.losses as f64)
            .name("Losses")
            .width(0.6)
            .fill(DesignSystem::LOSS),
    ];

    Plot::new("win_loss")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .x_axis_formatter(|mark, _range| match mark.value.round() as i64 {
            0 => "Wins".to_string(),
            1 => "Losses".to_string(),
            _ => String::new(),
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Win / Loss", bars));
        });
}

/// Net P/L per calendar month, oldest first.
pub fn render_monthly_chart(ui: &mut egui::Ui, months: &[MonthlyPl]) {
    let bars: Vec<Bar> = months
        .iter()
        .enumerate()
        .map(|(i, m)| {
            Bar::new(i as f64, m.pl.to_f64().unwrap_or(0.0))
                .name(&m.month)
                .width(0.7)
                .fill(DesignSystem::pl_color(m.pl))
        })
        .collect();

    let labels: Vec<String> = months.iter().map(|m| m.month.clone()).collect();

    Plot::new("monthly_pl")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || (mark.value - idx).abs() > f64::EPSILON {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Monthly P/L", bars));
        });
}
