//! Paginated PDF rendering of a [`Report`].

use crate::application::report::{Report, ReportRow, TABLE_HEADER};
use anyhow::{Context, Result, anyhow};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs;
use std::path::Path;
use tracing::info;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const ROW_HEIGHT: f32 = 6.0;
const TABLE_FONT_SIZE: f32 = 10.0;
/// Column x offsets in mm, one per [`TABLE_HEADER`] entry.
const COLUMNS: [f32; 8] = [14.0, 40.0, 56.0, 86.0, 104.0, 130.0, 156.0, 172.0];

/// Table header y on the first page (below title and summary).
const FIRST_HEADER_Y: f32 = 237.0;
/// Table header y on continuation pages.
const HEADER_Y: f32 = 277.0;
const BOTTOM_MARGIN: f32 = 15.0;

/// How many table rows go on each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub first_page_rows: usize,
    pub rows_per_page: usize,
}

impl PageLayout {
    /// Requested rows per page, capped to what physically fits.
    pub fn new(rows_per_page: usize) -> Self {
        let rows_per_page = rows_per_page.max(1);
        Self {
            first_page_rows: rows_per_page.min(capacity(FIRST_HEADER_Y)),
            rows_per_page: rows_per_page.min(capacity(HEADER_Y)),
        }
    }

    /// Split rows into pages.
    pub fn paginate<'a>(&self, rows: &'a [ReportRow]) -> Vec<&'a [ReportRow]> {
        let split = rows.len().min(self.first_page_rows);
        let (first, rest) = rows.split_at(split);
        let mut pages = vec![first];
        pages.extend(rest.chunks(self.rows_per_page));
        pages
    }
}

fn capacity(header_y: f32) -> usize {
    ((header_y - ROW_HEIGHT - BOTTOM_MARGIN) / ROW_HEIGHT).floor() as usize + 1
}

/// Render the report into PDF bytes.
pub fn render_pdf(report: &Report, layout: PageLayout) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(&report.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("Failed to load Helvetica: {:?}", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("Failed to load Helvetica-Bold: {:?}", e))?;

    let pages = layout.paginate(&report.rows);
    for (index, rows) in pages.iter().enumerate() {
        let canvas = if index == 0 {
            doc.get_page(page).get_layer(layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let header_y = if index == 0 {
            canvas.use_text(report.title.clone(), 16.0, Mm(MARGIN_LEFT), Mm(277.0), &bold);
            let [count, net] = report.summary_lines();
            canvas.use_text(count, 12.0, Mm(MARGIN_LEFT), Mm(262.0), &regular);
            canvas.use_text(net, 12.0, Mm(MARGIN_LEFT), Mm(252.0), &regular);
            FIRST_HEADER_Y
        } else {
            HEADER_Y
        };

        draw_row(&canvas, &TABLE_HEADER.map(String::from), header_y, &bold);
        for (i, row) in rows.iter().enumerate() {
            let y = header_y - ROW_HEIGHT * (i as f32 + 1.0);
            draw_row(&canvas, &row.cells, y, &regular);
        }

        let footer = format!("Page {} of {}", index + 1, pages.len());
        canvas.use_text(footer, 8.0, Mm(PAGE_WIDTH - 40.0), Mm(8.0), &regular);
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("Failed to serialize PDF: {:?}", e))
}

fn draw_row(canvas: &PdfLayerReference, cells: &[String; 8], y: f32, font: &IndirectFontRef) {
    for (cell, x) in cells.iter().zip(COLUMNS) {
        canvas.use_text(cell.clone(), TABLE_FONT_SIZE, Mm(x), Mm(y), font);
    }
}

/// Render and write the report to `path`.
pub fn export_pdf(report: &Report, layout: PageLayout, path: &Path) -> Result<()> {
    let bytes = render_pdf(report, layout)?;
    fs::write(path, &bytes).with_context(|| format!("Failed to write PDF report {:?}", path))?;
    info!(
        "Exported {} trades to {:?} ({} bytes)",
        report.total_trades,
        path,
        bytes.len()
    );
    Ok(())
}
