use super::store::FieldLogStore;
use crate::error::ExportError;
use chrono::{Local, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// First row of every report
pub const REPORT_HEADER: [&str; 7] = [
    "Date & Time",
    "Geo",
    "Loc Des",
    "Activity",
    "Tag",
    "Note",
    "Remark",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Report file for an export started at `at`
pub fn report_file_name(at: NaiveDateTime) -> String {
    format!("GA_REPORT_{}.csv", at.format("%H%M"))
}

/// Wall clock used for row stamps and report names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportClock {
    Local,
    Zone(Tz),
}

impl ReportClock {
    /// Resolve a configured zone name, falling back to local time on parse errors
    pub fn from_config(timezone: Option<&str>) -> Self {
        match timezone {
            None => ReportClock::Local,
            Some(name) => match name.parse::<Tz>() {
                Ok(tz) => ReportClock::Zone(tz),
                Err(_) => {
                    warn!(
                        "Invalid export timezone '{}', falling back to local time",
                        name
                    );
                    ReportClock::Local
                }
            },
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            ReportClock::Local => Local::now().naive_local(),
            ReportClock::Zone(tz) => Utc::now().with_timezone(tz).naive_local(),
        }
    }
}

impl FieldLogStore {
    /// Write the header and every row, in capture order, as BOM-prefixed UTF-8 CSV
    pub fn export_to_writer<W: Write>(&self, mut out: W) -> Result<(), ExportError> {
        out.write_all(UTF8_BOM)?;

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(out);
        writer.write_record(REPORT_HEADER)?;
        for row in self.rows() {
            writer.write_record(row.cells())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Export into `directory`, replacing any report from the same minute
    pub fn export(&self, directory: &Path, at: NaiveDateTime) -> Result<PathBuf, ExportError> {
        let path = directory.join(report_file_name(at));
        let file = File::create(&path).map_err(|source| ExportError::Create {
            path: path.display().to_string(),
            source,
        })?;

        self.export_to_writer(BufWriter::new(file))?;

        info!("Exported {} rows to {}", self.len(), path.display());
        Ok(path)
    }
}
