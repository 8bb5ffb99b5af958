mod export;
mod form;
mod store;

pub use export::{report_file_name, ReportClock, REPORT_HEADER};
pub use form::{FormField, PendingEntry};
pub use store::{FieldLogStore, LogRow, ROW_TIMESTAMP_FORMAT};
