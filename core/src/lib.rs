pub mod calculator;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use calculator::{count_business_days, expected_drr, expected_drr_from_input, sundays_in_range, summarize, DrrSummary};
pub use error::ValidationError;
pub use input::{expand_key, parse_args, parse_draft, ParsedInput};
pub use model::draft::{RecordDraft, ValidDraft};
pub use model::record::Record;
pub use repository::{FileRecordRepository, InMemoryRecordRepository, RecordRepository};
pub use service::dto::{total_lead_count, RecordRow};
pub use service::record_service::RecordService;
pub use time::{format_date, format_last_updated, parse_date};
