//! Parsing of the portal's CSV attendance export.
//!
//! The export is not real CSV: a title line, a quoted header line, and a
//! single quoted data row. The parser strips the quoting wholesale and
//! zips header to data positionally.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{AttendanceEntry, AttendanceSummary, RawReportRow};
use crate::services::subject_resolver::SubjectResolver;

/// Columns that describe the student rather than a subject.
const RESERVED_FIELDS: [&str; 4] = ["Name", "Uni Reg No", "Roll No", "Duty Leave %"];

/// Course-catalogue version prefix stripped from resolved display names.
const VERSION_PREFIX: &str = "24";

/// How to treat a header/data field-count mismatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldCountPolicy {
    /// Zip to the shorter side. Tolerates the trailing-comma quirks of
    /// the upstream export; surplus fields are dropped.
    #[default]
    Truncate,
    /// Fail the parse with `FieldCountMismatch` instead.
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportParser {
    policy: FieldCountPolicy,
}

impl ReportParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FieldCountPolicy) -> Self {
        Self { policy }
    }

    /// Parse the raw export body into a header-ordered row.
    ///
    /// Line 0 is a title/metadata line and is discarded; line 1 is the
    /// header and line 2 the data row. Fewer than 3 lines is a malformed
    /// report.
    pub fn parse(&self, raw: &str) -> Result<RawReportRow> {
        let lines: Vec<&str> = raw.lines().collect();
        if lines.len() < 3 {
            return Err(Error::MalformedReport(format!(
                "expected at least 3 lines, got {}",
                lines.len()
            )));
        }

        let header = split_fields(lines[1]);
        let data = split_fields(lines[2]);
        if header.len() != data.len() {
            match self.policy {
                FieldCountPolicy::Strict => {
                    return Err(Error::FieldCountMismatch {
                        header: header.len(),
                        data: data.len(),
                    });
                }
                FieldCountPolicy::Truncate => {
                    debug!(
                        header = header.len(),
                        data = data.len(),
                        "field count mismatch, truncating to the shorter side"
                    );
                }
            }
        }

        let mut row = RawReportRow::new();
        for (name, value) in header.into_iter().zip(data) {
            row.push(name, value);
        }
        Ok(row)
    }

    /// Fold a parsed row into the caller-facing summary.
    ///
    /// Infallible: subject fields that don't carry a well-formed
    /// attended/total pair are skipped, never surfaced as errors. Entry
    /// order follows the header.
    pub fn to_summary(&self, row: &RawReportRow, resolver: &SubjectResolver) -> AttendanceSummary {
        let mut attendance_data = Vec::new();
        for (field, value) in row.iter() {
            if RESERVED_FIELDS.contains(&field) {
                continue;
            }
            let subject = display_name(resolver.resolve(field));
            match classify(&subject, value) {
                FieldOutcome::Entry(entry) => attendance_data.push(entry),
                FieldOutcome::Skipped(reason) => {
                    debug!(subject = %subject, ?reason, value, "field omitted from summary");
                }
            }
        }

        AttendanceSummary {
            name: row.get("Name").unwrap_or("Unknown").to_string(),
            uni_reg_no: row.get("Uni Reg No").unwrap_or("N/A").to_string(),
            roll_no: row.get("Roll No").unwrap_or("N/A").to_string(),
            duty_leave: row.get("Duty Leave %").unwrap_or("N/A").to_string(),
            attendance_data,
        }
    }
}

/// Strip all quoting and split one export line on commas.
fn split_fields(line: &str) -> Vec<String> {
    line.replace('"', "").split(',').map(str::to_string).collect()
}

/// Resolved subject name minus the catalogue version prefix.
fn display_name(resolved: &str) -> String {
    resolved
        .strip_prefix(VERSION_PREFIX)
        .unwrap_or(resolved)
        .to_string()
}

/// Why a field was left out of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `/` in the value, so not an attended/total pair at all.
    NotAttendance,
    /// Looked like a pair but did not split into exactly two integers.
    Unparsable,
}

/// Best-effort classification of one subject column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Entry(AttendanceEntry),
    Skipped(SkipReason),
}

/// Classify a field value such as `"18/20 (90%)"`.
///
/// Only the first whitespace-delimited token counts; it must split on `/`
/// into exactly two integers. Counts parse as unsigned, so a signed token
/// like `"-1/20"` is skipped rather than recorded as a negative count.
pub fn classify(subject: &str, value: &str) -> FieldOutcome {
    if !value.contains('/') {
        return FieldOutcome::Skipped(SkipReason::NotAttendance);
    }

    let token = value.split_whitespace().next().unwrap_or("");
    let mut parts = token.split('/');
    let (attended, total) = match (parts.next(), parts.next(), parts.next()) {
        (Some(attended), Some(total), None) => (attended, total),
        _ => return FieldOutcome::Skipped(SkipReason::Unparsable),
    };

    match (attended.parse(), total.parse()) {
        (Ok(attended), Ok(total)) => FieldOutcome::Entry(AttendanceEntry {
            subject: subject.to_string(),
            attended,
            total,
        }),
        _ => FieldOutcome::Skipped(SkipReason::Unparsable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = "\"Subject Wise Attendance\"\n\
        \"Name\",\"Uni Reg No\",\"Roll No\",\"Duty Leave %\",\"24CS101\",\"MAT203\"\n\
        \"Alice\",\"123\",\"45\",\"2%\",\"18/20 (90%)\",\"9/10\"";

    #[test]
    fn too_few_lines_is_malformed() {
        let parser = ReportParser::new();
        for raw in ["", "one line", "one\ntwo"] {
            assert!(matches!(
                parser.parse(raw),
                Err(Error::MalformedReport(_))
            ));
        }
    }

    #[test]
    fn strips_quotes_and_preserves_header_order() {
        let row = ReportParser::new().parse(SAMPLE).unwrap();
        assert_eq!(row.len(), 6);
        assert_eq!(row.get("Name"), Some("Alice"));
        assert_eq!(row.get("24CS101"), Some("18/20 (90%)"));
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["Name", "Uni Reg No", "Roll No", "Duty Leave %", "24CS101", "MAT203"]
        );
    }

    #[test]
    fn truncates_on_mismatch_by_default() {
        let raw = "title\na,b,c\n1,2";
        let row = ReportParser::new().parse(raw).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("b"), Some("2"));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn strict_policy_rejects_mismatch() {
        let raw = "title\na,b,c\n1,2";
        let parser = ReportParser::with_policy(FieldCountPolicy::Strict);
        assert!(matches!(
            parser.parse(raw),
            Err(Error::FieldCountMismatch { header: 3, data: 2 })
        ));
    }

    #[test]
    fn classify_requires_a_fraction() {
        assert_eq!(
            classify("CS101", "75%"),
            FieldOutcome::Skipped(SkipReason::NotAttendance)
        );
    }

    #[test]
    fn classify_skips_non_integer_pairs() {
        assert_eq!(
            classify("CS101", "abc/def"),
            FieldOutcome::Skipped(SkipReason::Unparsable)
        );
        // "N/A" carries a slash but no numbers.
        assert_eq!(
            classify("CS101", "N/A"),
            FieldOutcome::Skipped(SkipReason::Unparsable)
        );
        assert_eq!(
            classify("CS101", "1/2/3"),
            FieldOutcome::Skipped(SkipReason::Unparsable)
        );
        // Counts are unsigned; a negative attended count is no entry.
        assert_eq!(
            classify("CS101", "-1/20"),
            FieldOutcome::Skipped(SkipReason::Unparsable)
        );
    }

    #[test]
    fn classify_uses_first_token_only() {
        assert_eq!(
            classify("CS101", "18/20 (90%)"),
            FieldOutcome::Entry(AttendanceEntry {
                subject: "CS101".to_string(),
                attended: 18,
                total: 20,
            })
        );
    }

    #[test]
    fn summary_round_trip() {
        let parser = ReportParser::new();
        let raw = "title\nName,Uni Reg No,Roll No,24CS101\nAlice,123,45,18/20";
        let row = parser.parse(raw).unwrap();
        // Resolver has no mapping: the code passes through, then loses
        // its "24" prefix.
        let summary = parser.to_summary(&row, &SubjectResolver::empty());

        assert_eq!(summary.name, "Alice");
        assert_eq!(summary.uni_reg_no, "123");
        assert_eq!(summary.roll_no, "45");
        assert_eq!(summary.duty_leave, "N/A");
        assert_eq!(
            summary.attendance_data,
            vec![AttendanceEntry {
                subject: "CS101".to_string(),
                attended: 18,
                total: 20,
            }]
        );
    }

    #[test]
    fn summary_excludes_reserved_fields_and_keeps_order() {
        let parser = ReportParser::new();
        let mut table = HashMap::new();
        table.insert("MAT203".to_string(), "Discrete Mathematics".to_string());
        let resolver = SubjectResolver::from_table(table);

        let row = parser.parse(SAMPLE).unwrap();
        let summary = parser.to_summary(&row, &resolver);

        assert_eq!(summary.duty_leave, "2%");
        let subjects: Vec<&str> = summary
            .attendance_data
            .iter()
            .map(|entry| entry.subject.as_str())
            .collect();
        assert_eq!(subjects, vec!["CS101", "Discrete Mathematics"]);
    }

    #[test]
    fn missing_reserved_fields_use_defaults() {
        let parser = ReportParser::new();
        let row = parser.parse("title\nCS101\n10/12").unwrap();
        let summary = parser.to_summary(&row, &SubjectResolver::empty());

        assert_eq!(summary.name, "Unknown");
        assert_eq!(summary.uni_reg_no, "N/A");
        assert_eq!(summary.roll_no, "N/A");
        assert_eq!(summary.duty_leave, "N/A");
        assert_eq!(summary.attendance_data.len(), 1);
    }
}
