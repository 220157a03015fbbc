use eframe::egui;
use rust_decimal::Decimal;

/// Dark journal palette and shared frames.
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(11, 14, 20);
    pub const BG_CARD: egui::Color32 = egui::Color32::from_rgb(20, 25, 34);
    pub const BG_CARD_HOVER: egui::Color32 = egui::Color32::from_rgb(27, 33, 44);
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(14, 18, 25);

    pub const ACCENT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(0, 240, 209); // #00F0D1

    pub const PROFIT: egui::Color32 = egui::Color32::from_rgb(0, 230, 118);
    pub const LOSS: egui::Color32 = egui::Color32::from_rgb(255, 82, 82);
    pub const NEUTRAL: egui::Color32 = egui::Color32::from_gray(170);

    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(236, 242, 248);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(150);
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_gray(95);

    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(44, 51, 62);

    // --- Metrics ---

    pub const ROUNDING_MEDIUM: f32 = 8.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;

    /// Visuals applied once at startup.
    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_WINDOW;
        visuals.extreme_bg_color = Self::BG_INPUT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.weak_bg_fill = Self::BG_CARD;
        visuals.widgets.inactive.bg_fill = Self::BG_CARD;
        visuals.widgets.hovered.bg_fill = Self::BG_CARD_HOVER;

        visuals.selection.bg_fill = Self::ACCENT_PRIMARY.linear_multiply(0.25);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT_PRIMARY);

        visuals
    }

    /// Green for gains, red for losses, grey for flat.
    pub fn pl_color(pl: Decimal) -> egui::Color32 {
        if pl > Decimal::ZERO {
            Self::PROFIT
        } else if pl < Decimal::ZERO {
            Self::LOSS
        } else {
            Self::NEUTRAL
        }
    }

    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING_MEDIUM)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_WINDOW)
            .inner_margin(egui::Margin::same(Self::SPACING_MEDIUM as i8))
    }
}
