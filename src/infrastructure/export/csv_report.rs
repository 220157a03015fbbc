use crate::application::report::{TABLE_HEADER, signed_pl};
use crate::domain::errors::JournalError;
use crate::domain::trading::types::Trade;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the journal as CSV: the report columns plus category and notes.
pub fn write_csv<W: Write>(trades: &[Trade], writer: W) -> Result<()> {
    if trades.is_empty() {
        return Err(JournalError::NothingToExport.into());
    }

    let mut wtr = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = TABLE_HEADER.to_vec();
    header.extend(["Category", "Notes"]);
    wtr.write_record(&header)?;

    for t in trades {
        wtr.write_record([
            t.date_label(),
            t.time_label(),
            t.symbol.clone(),
            t.side.to_string(),
            optional(t.entry),
            optional(t.exit),
            t.lot.normalize().to_string(),
            t.pl.map(signed_pl).unwrap_or_default(),
            t.category().to_string(),
            t.notes.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Unset values are left as empty cells.
fn optional(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

pub fn export_csv(trades: &[Trade], path: &Path) -> Result<()> {
    if trades.is_empty() {
        return Err(JournalError::NothingToExport.into());
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV report {:?}", path))?;
    write_csv(trades, file)?;
    info!("Exported {} trades to {:?}", trades.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trading::types::Side;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    #[test]
    fn test_csv_layout() {
        let trade = Trade {
            id: "t1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 9),
            time: NaiveTime::from_hms_opt(16, 20, 0),
            symbol: "XAUUSD".to_string(),
            side: Side::Long,
            entry: Some(dec!(2330.5)),
            exit: Some(dec!(2335.0)),
            lot: dec!(0.2),
            contract: dec!(1),
            notes: "NY, retest".to_string(),
            screenshot: None,
            pl: Some(dec!(90.00)),
        };

        let mut buf = Vec::new();
        write_csv(&[trade.clone()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Date,Time,Symbol,Side,Entry,Exit,Lot,P/L,Category,Notes");
        assert_eq!(
            lines[1],
            "2024-04-09,16:20,XAUUSD,long,2330.5,2335,0.2,+90.00,Gold,\"NY, retest\""
        );

        let mut gap = trade;
        gap.time = None;
        gap.pl = None;
        let mut buf = Vec::new();
        write_csv(&[gap], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("2024-04-09,,XAUUSD,long,2330.5,2335,0.2,,Gold,\"NY, retest\"")
        );
    }

    #[test]
    fn test_empty_csv_is_refused() {
        let err = write_csv(&[], Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::NothingToExport)
        ));
    }
}
