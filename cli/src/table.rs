use drr_core::{total_lead_count, DrrSummary, Record, RecordRow};
use drr_core::time::format_date;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

// Helper struct for Table Row
#[derive(Tabled)]
struct DrrTableRow {
    #[tabled(rename = "Start Date")]
    start_date: String,
    #[tabled(rename = "End Date")]
    end_date: String,
    #[tabled(rename = "Number of Days")]
    number_of_days: String,
    #[tabled(rename = "Sundays")]
    sundays: String,
    #[tabled(rename = "Lead Count")]
    lead_count: String,
    #[tabled(rename = "DRR")]
    expected_drr: String,
    #[tabled(rename = "Last Updated")]
    last_updated: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<RecordRow> for DrrTableRow {
    fn from(row: RecordRow) -> Self {
        Self {
            start_date: row.start_date,
            end_date: row.end_date,
            number_of_days: row.number_of_days,
            sundays: row.sundays,
            lead_count: row.lead_count,
            expected_drr: row.expected_drr,
            last_updated: row.last_updated,
            id: row.id,
        }
    }
}

pub fn render_records(rows: Vec<RecordRow>, records: &[Record]) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }

    let mut table = Table::new(rows.into_iter().map(DrrTableRow::from));
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    format!("{}\nTotal lead count: {}", table, total_lead_count(records))
}

pub fn render_summary(summary: &DrrSummary) -> String {
    let sundays = if summary.sundays.is_empty() {
        "-".to_string()
    } else {
        summary.sundays.iter().map(|d| format_date(*d)).collect::<Vec<_>>().join(", ")
    };
    format!(
        "Number of days: {}\nSundays:        {}\nExpected DRR:   {}",
        summary.number_of_days,
        sundays,
        summary.expected_drr.as_deref().unwrap_or("-")
    )
}
