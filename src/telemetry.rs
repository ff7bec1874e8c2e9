//! Local error telemetry for particle-upgrade
//!
//! Failed conversions are appended to a JSONL file, one [`ErrorEntry`] per
//! line, so recurring problems across a batch of legacy configs can be
//! grepped or loaded into other tools afterwards. Only the input path and the
//! error are recorded.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::parser::LoadError;
use crate::upgrade::UpgradeError;

/// One failed conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// UTC time of the failure, ISO 8601
    pub timestamp: String,
    /// CLI mode that failed ("upgrade" or "check")
    pub command: String,
    /// Version of the tool that produced the entry
    pub version: String,
    /// Input document, if the failure belongs to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Error category (e.g. "missing_field", "load_error")
    pub error_type: String,
    /// Error message
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorEntry {
    pub fn new(
        command: impl Into<String>,
        error_type: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: utc_timestamp(SystemTime::now()),
            command: command.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            file: None,
            error_type: error_type.into(),
            context: context.into(),
            suggestion: None,
        }
    }

    pub fn with_file(mut self, file: &Path) -> Self {
        self.file = Some(file.display().to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    /// Entry for a document that loaded but could not be converted.
    pub fn upgrade_failed(command: &str, err: &UpgradeError) -> Self {
        ErrorEntry::new(command, err.error_type(), err.to_string())
            .with_suggestion(err.suggestion())
    }

    /// Entry for a document that could not be read or parsed.
    pub fn load_failed(command: &str, err: &LoadError) -> Self {
        let error_type = match err {
            LoadError::Io { .. } => "io_error",
            _ => "parse_error",
        };
        ErrorEntry::new(command, error_type, err.to_string())
    }
}

/// Format a system time as `YYYY-MM-DDTHH:MM:SSZ`.
fn utc_timestamp(time: SystemTime) -> String {
    let secs = time.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (year, month, day) = civil_from_days(days as i64);

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Convert days since 1970-01-01 to a (year, month, day) civil date.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Appends [`ErrorEntry`] lines to a JSONL file
pub struct ErrorCollector {
    path: PathBuf,
    enabled: bool,
}

impl ErrorCollector {
    pub fn new(path: impl AsRef<Path>, enabled: bool) -> Self {
        Self { path: path.as_ref().to_path_buf(), enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry. Does nothing when collection is disabled.
    pub fn log(&self, entry: &ErrorEntry) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, entry)?;
        writeln!(writer)?;
        writer.flush()
    }
}

thread_local! {
    static COLLECTOR: RefCell<Option<ErrorCollector>> = const { RefCell::new(None) };
}

/// Install the collector used by [`log_error`] on this thread.
pub fn init_collector(path: impl AsRef<Path>, enabled: bool) {
    COLLECTOR.with(|c| *c.borrow_mut() = Some(ErrorCollector::new(path, enabled)));
}

/// Log an entry through this thread's collector, if one is installed.
///
/// Telemetry must never turn a reported failure into a different one, so
/// write errors are dropped.
pub fn log_error(entry: &ErrorEntry) {
    COLLECTOR.with(|c| {
        if let Some(ref collector) = *c.borrow() {
            let _ = collector.log(entry);
        }
    });
}

/// Check if this thread's collector is enabled
pub fn is_collection_enabled() -> bool {
    COLLECTOR.with(|c| c.borrow().as_ref().is_some_and(ErrorCollector::is_enabled))
}
