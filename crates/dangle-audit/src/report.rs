//! Report streams and the run summary.

use chrono::{DateTime, Utc};
use dangle_core::{ClassificationResult, DangleError, ExtractionError, ReportStream, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::warn;

/// Column names, in the order every line carries them
pub const REPORT_COLUMNS: [&str; 5] = ["sequence", "name", "type", "target", "annotation"];

/// Encoding of the two report streams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl FromStr for ReportFormat {
    type Err = DangleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonl" | "ndjson" | "json" => Ok(Self::Jsonl),
            _ => Err(DangleError::Config(format!(
                "unknown report format: {s} (valid formats: csv, jsonl)"
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// One report line
#[derive(Debug, Serialize)]
struct ReportLine<'a> {
    sequence: u64,
    name: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    target: &'a str,
    annotation: &'a str,
}

impl<'a> From<&'a ClassificationResult> for ReportLine<'a> {
    fn from(result: &'a ClassificationResult) -> Self {
        Self {
            sequence: result.sequence,
            name: &result.name,
            record_type: result.record_type.as_str(),
            target: &result.target,
            annotation: result.annotation(),
        }
    }
}

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    Jsonl(W),
}

impl<W: Write> Sink<W> {
    fn new(writer: W, format: ReportFormat) -> Result<Self> {
        match format {
            ReportFormat::Csv => {
                let mut csv = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(writer);
                csv.write_record(REPORT_COLUMNS).map_err(csv_error)?;
                Ok(Self::Csv(csv))
            }
            ReportFormat::Jsonl => Ok(Self::Jsonl(writer)),
        }
    }

    fn write(&mut self, line: &ReportLine<'_>) -> Result<()> {
        match self {
            Self::Csv(csv) => csv.serialize(line).map_err(csv_error),
            Self::Jsonl(writer) => {
                serde_json::to_writer(&mut *writer, line)?;
                writer.write_all(b"\n")?;
                Ok(())
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Csv(csv) => csv.flush()?,
            Self::Jsonl(writer) => writer.flush()?,
        }
        Ok(())
    }

    fn into_inner(self) -> Result<W> {
        match self {
            Self::Csv(csv) => csv.into_inner().map_err(|e| DangleError::Io(e.into_error())),
            Self::Jsonl(mut writer) => {
                writer.flush()?;
                Ok(writer)
            }
        }
    }
}

fn csv_error(err: csv::Error) -> DangleError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => DangleError::Io(io),
            other => DangleError::Report(format!("{other:?}")),
        }
    } else {
        DangleError::Report(err.to_string())
    }
}

/// Writes classification results to the recognized and unknown streams.
///
/// Lines are append-only; nothing written is ever reordered or withdrawn.
pub struct Reporter<R: Write, U: Write> {
    recognized: Sink<R>,
    unknown: Sink<U>,
    malformed: u64,
}

impl<R: Write, U: Write> Reporter<R, U> {
    /// Start both streams; CSV streams get their header row immediately
    pub fn new(recognized: R, unknown: U, format: ReportFormat) -> Result<Self> {
        Ok(Self {
            recognized: Sink::new(recognized, format)?,
            unknown: Sink::new(unknown, format)?,
            malformed: 0,
        })
    }

    /// Append `result` to the stream it belongs in
    pub fn report(&mut self, result: &ClassificationResult) -> Result<ReportStream> {
        let line = ReportLine::from(result);
        let stream = result.stream();
        match stream {
            ReportStream::Recognized => self.recognized.write(&line)?,
            ReportStream::Unknown => self.unknown.write(&line)?,
        }
        Ok(stream)
    }

    /// Log a record that was skipped because it could not be normalized
    pub fn report_malformed(&mut self, record: &MalformedRecord) {
        self.malformed += 1;
        warn!(
            position = record.position,
            name = %record.name,
            record_type = %record.record_type,
            reason = %record.reason,
            "skipping malformed record"
        );
    }

    /// Malformed records seen so far
    pub const fn malformed(&self) -> u64 {
        self.malformed
    }

    /// Push buffered lines to the underlying writers
    pub fn flush(&mut self) -> Result<()> {
        self.recognized.flush()?;
        self.unknown.flush()
    }

    /// Flush and hand back the writers
    pub fn into_inner(self) -> Result<(R, U)> {
        Ok((self.recognized.into_inner()?, self.unknown.into_inner()?))
    }
}

/// A record skipped because it could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRecord {
    /// Position among all record sets of the zone, eligible or not
    pub position: u64,
    /// Record name
    pub name: String,
    /// Record type
    pub record_type: String,
    /// Why extraction failed
    pub reason: String,
}

impl MalformedRecord {
    /// Describe an extraction failure at `position`
    #[must_use]
    pub fn new(position: u64, err: &ExtractionError) -> Self {
        Self {
            position,
            name: err.name().to_string(),
            record_type: err.record_type().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Totals for one audit run
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    /// Zone that was walked
    pub zone_id: String,
    /// Pages fetched
    pub pages: u64,
    /// A and CNAME records classified
    pub records: u64,
    /// Records of other types
    pub skipped: u64,
    /// Targets written to the recognized stream
    pub recognized: u64,
    /// Targets written to the unknown stream
    pub unknown: u64,
    /// Records that failed extraction
    pub malformed: Vec<MalformedRecord>,
    /// When the walk started
    pub started_at: DateTime<Utc>,
    /// When the walk finished
    pub finished_at: Option<DateTime<Utc>>,
}

impl AuditSummary {
    /// Empty summary for a walk starting now
    #[must_use]
    pub fn start(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            pages: 0,
            records: 0,
            skipped: 0,
            recognized: 0,
            unknown: 0,
            malformed: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Count a written line
    pub fn count(&mut self, stream: ReportStream) {
        match stream {
            ReportStream::Recognized => self.recognized += 1,
            ReportStream::Unknown => self.unknown += 1,
        }
    }

    /// Wall-clock duration, once finished
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dangle_core::RecordType;

    fn result(sequence: u64, target: &str, alias: bool, ripe: Option<&str>, recognized: bool) -> ClassificationResult {
        ClassificationResult {
            sequence,
            name: "www.example.com".into(),
            record_type: if alias { RecordType::Cname } else { RecordType::A },
            target: target.into(),
            alias,
            ripe: ripe.map(String::from),
            recognized,
        }
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn csv_routes_and_formats() {
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), ReportFormat::Csv).unwrap();

        assert_eq!(
            reporter.report(&result(0, "203.0.113.5", false, None, true)).unwrap(),
            ReportStream::Recognized
        );
        reporter
            .report(&result(1, "d111111abcdef8.cloudfront.net", false, Some("Can be alias"), false))
            .unwrap();
        reporter
            .report(&result(2, "my-bucket.s3-website-us-west-2.amazonaws.com", true, None, false))
            .unwrap();

        let (recognized, unknown) = reporter.into_inner().unwrap();
        assert_eq!(
            text(recognized),
            "sequence,name,type,target,annotation\n0,www.example.com,A,203.0.113.5,\n"
        );
        assert_eq!(
            text(unknown),
            "sequence,name,type,target,annotation\n\
             1,www.example.com,A,d111111abcdef8.cloudfront.net,Can be alias\n\
             2,www.example.com,CNAME,my-bucket.s3-website-us-west-2.amazonaws.com,alias\n"
        );
    }

    #[test]
    fn empty_csv_still_has_header() {
        let reporter = Reporter::new(Vec::new(), Vec::new(), ReportFormat::Csv).unwrap();
        let (recognized, unknown) = reporter.into_inner().unwrap();
        assert_eq!(text(recognized), "sequence,name,type,target,annotation\n");
        assert_eq!(text(unknown), "sequence,name,type,target,annotation\n");
    }

    #[test]
    fn jsonl_lines() {
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), ReportFormat::Jsonl).unwrap();
        reporter.report(&result(4, "198.51.100.9", false, None, false)).unwrap();

        let (recognized, unknown) = reporter.into_inner().unwrap();
        assert!(recognized.is_empty());

        let unknown = text(unknown);
        let line: serde_json::Value = serde_json::from_str(unknown.trim_end()).unwrap();
        assert_eq!(line["sequence"], 4);
        assert_eq!(line["type"], "A");
        assert_eq!(line["target"], "198.51.100.9");
        assert_eq!(line["annotation"], "");
        assert!(unknown.ends_with('\n'));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("ndjson".parse::<ReportFormat>().unwrap(), ReportFormat::Jsonl);
        assert!("yaml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Jsonl.to_string(), "jsonl");
    }

    #[test]
    fn summary_counts_streams() {
        let mut summary = AuditSummary::start("Z1");
        summary.count(ReportStream::Recognized);
        summary.count(ReportStream::Unknown);
        summary.count(ReportStream::Unknown);
        assert_eq!((summary.recognized, summary.unknown), (1, 2));
        assert!(summary.elapsed().is_none());
    }

    #[test]
    fn malformed_record_carries_reason() {
        let err = ExtractionError::MissingTargets {
            name: "bare.example.com".into(),
            record_type: RecordType::Cname,
        };
        let malformed = MalformedRecord::new(3, &err);
        assert_eq!(malformed.position, 3);
        assert_eq!(malformed.record_type, "CNAME");
        assert!(malformed.reason.contains("neither an alias target"));

        let mut reporter = Reporter::new(Vec::new(), Vec::new(), ReportFormat::Csv).unwrap();
        reporter.report_malformed(&malformed);
        assert_eq!(reporter.malformed(), 1);

        let (recognized, unknown) = reporter.into_inner().unwrap();
        assert_eq!(text(recognized), "sequence,name,type,target,annotation\n");
        assert_eq!(text(unknown), "sequence,name,type,target,annotation\n");
    }
}
