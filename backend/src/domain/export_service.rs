//! CSV export of a weekly aggregate.
use anyhow::{anyhow, Context, Result};

use crate::domain::aggregator::{format_amount, WeeklyAggregate};
use crate::domain::models::week_window::WeekWindow;

const EXPORT_HEADER: [&str; 2] = ["Member", "Total Cost"];

/// Render `aggregate` as CSV: a header row then one row per member, sorted by
/// member id, with no trailing newline.
pub fn export_csv(aggregate: &WeeklyAggregate) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for (member_id, total) in &aggregate.per_member_total {
        writer.write_record([member_id.as_str(), format_amount(*total).as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV export: {}", e.error()))?;
    let mut content = String::from_utf8(bytes).context("CSV export is not valid UTF-8")?;
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

/// `weekly_insights_<start>_<end>.csv`, dates as `YYYY-MM-DD`.
pub fn export_file_name(window: &WeekWindow) -> String {
    format!(
        "weekly_insights_{}_{}.csv",
        window.start_date().format("%Y-%m-%d"),
        window.end_date().format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn window() -> WeekWindow {
        WeekWindow::containing_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_export_rows_are_sorted_with_two_decimals() {
        let mut aggregate = WeeklyAggregate::empty(window());
        aggregate
            .per_member_total
            .insert("B".to_string(), Decimal::from(7));
        aggregate
            .per_member_total
            .insert("A".to_string(), Decimal::from_str("12.5").unwrap());

        assert_eq!(export_csv(&aggregate).unwrap(), "Member,Total Cost\nA,12.50\nB,7.00");
    }

    #[test]
    fn test_export_of_empty_week_is_header_only() {
        let aggregate = WeeklyAggregate::empty(window());
        assert_eq!(export_csv(&aggregate).unwrap(), "Member,Total Cost");
    }

    #[test]
    fn test_export_quotes_awkward_member_names() {
        let mut aggregate = WeeklyAggregate::empty(window());
        aggregate
            .per_member_total
            .insert("Rao, Vivek".to_string(), Decimal::from_str("0.005").unwrap());

        assert_eq!(
            export_csv(&aggregate).unwrap(),
            "Member,Total Cost\n\"Rao, Vivek\",0.01"
        );
    }

    #[test]
    fn test_export_file_name_uses_window_dates() {
        assert_eq!(export_file_name(&window()), "weekly_insights_2024-02-25_2024-03-02.csv");
    }
}
