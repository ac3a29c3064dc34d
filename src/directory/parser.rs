//! Positional parser for the comma-separated registry source.
//!
//! The format has no quoting or escaping: every data line is split on `,`
//! and the Nth field maps to the Nth column. The first line is a header and
//! is always discarded.

use super::record::{COLUMN_COUNT, SchoolRecord};
use thiserror::Error;

/// How rows with an unexpected column count are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Keep the row, padding missing fields with empty strings
    #[default]
    Lenient,
    /// Reject the row
    Strict,
}

/// Problem found on a single source line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct RowIssue {
    /// 1-based line number in the source text
    pub line: usize,
    pub kind: RowIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowIssueKind {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("missing UDISE code")]
    MissingCode,
}

/// Parsed records plus everything that was dropped or tolerated on the way
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: Vec<SchoolRecord>,
    pub issues: Vec<RowIssue>,
}

impl ParseReport {
    /// Rows that were left out of `records`
    pub fn rejected(&self, mode: ParseMode) -> usize {
        self.issues
            .iter()
            .filter(|issue| match issue.kind {
                RowIssueKind::MissingCode => true,
                RowIssueKind::ColumnCount { .. } => mode == ParseMode::Strict,
            })
            .count()
    }
}

/// Parse the registry source. Never fails: short rows degrade to empty
/// fields and rows without a code are dropped.
pub fn parse(source: &str) -> Vec<SchoolRecord> {
    parse_with_report(source, ParseMode::Lenient).records
}

/// Parse the registry source, reporting malformed rows
pub fn parse_with_report(source: &str, mode: ParseMode) -> ParseReport {
    let mut report = ParseReport::default();

    for (idx, line) in source.split('\n').enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = idx + 1;
        let fields: Vec<&str> = line.split(',').collect();

        if fields.len() != COLUMN_COUNT {
            report.issues.push(RowIssue {
                line: line_number,
                kind: RowIssueKind::ColumnCount {
                    expected: COLUMN_COUNT,
                    found: fields.len(),
                },
            });
            if mode == ParseMode::Strict {
                continue;
            }
        }

        let record = SchoolRecord::from_fields(&fields);
        if !record.has_code() {
            report.issues.push(RowIssue {
                line: line_number,
                kind: RowIssueKind::MissingCode,
            });
            continue;
        }

        report.records.push(record);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "district,block,udise_code,school_name,category,area,management";

    fn source(lines: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for line in lines {
            s.push('\n');
            s.push_str(line);
        }
        s
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse(HEADER).is_empty());
        assert!(parse(&format!("{}\n", HEADER)).is_empty());
    }

    #[test]
    fn test_parse_single_record() {
        let records = parse(&source(&["A,B,12345678901,SchoolX,Cat,Area,Mgmt"]));

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.district, "A");
        assert_eq!(r.block, "B");
        assert_eq!(r.udise_code, "12345678901");
        assert_eq!(r.school_name, "SchoolX");
        assert_eq!(r.category, "Cat");
        assert_eq!(r.area, "Area");
        assert_eq!(r.management, "Mgmt");
    }

    #[test]
    fn test_first_line_is_always_header() {
        // Even a data-looking first line is discarded
        let records = parse("A,B,11111111111,First,C,A,M\nA,B,22222222222,Second,C,A,M");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].school_name, "Second");
    }

    #[test]
    fn test_short_line_without_code_is_dropped() {
        let report = parse_with_report(&source(&["Cuttack,Banki"]), ParseMode::Lenient);

        assert!(report.records.is_empty());
        assert_eq!(
            report.issues,
            vec![
                RowIssue {
                    line: 2,
                    kind: RowIssueKind::ColumnCount { expected: 7, found: 2 },
                },
                RowIssue {
                    line: 2,
                    kind: RowIssueKind::MissingCode,
                },
            ]
        );
    }

    #[test]
    fn test_short_line_with_code_is_kept_leniently() {
        let records = parse(&source(&["Cuttack,Banki,21090100101"]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].district, "Cuttack");
        assert_eq!(records[0].block, "Banki");
        assert_eq!(records[0].udise_code, "21090100101");
        assert_eq!(records[0].school_name, "");
        assert_eq!(records[0].management, "");
    }

    #[test]
    fn test_strict_mode_rejects_wrong_column_count() {
        let src = source(&[
            "Cuttack,Banki,21090100101",
            "Puri,Gop,21180200202,UP School, Gop,Primary,Rural,Govt",
            "Puri,Gop,21180200203,UGME School,Primary,Rural,Govt",
        ]);

        let report = parse_with_report(&src, ParseMode::Strict);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].udise_code, "21180200203");
        assert_eq!(report.rejected(ParseMode::Strict), 2);

        // Lenient mode keeps both misaligned rows
        let lenient = parse_with_report(&src, ParseMode::Lenient);
        assert_eq!(lenient.records.len(), 3);
        assert_eq!(lenient.rejected(ParseMode::Lenient), 0);
    }

    #[test]
    fn test_blank_lines_skipped_and_order_kept() {
        let records = parse(&source(&[
            "",
            "D1,B1,00000000001,One,C,A,M",
            "   ",
            "D2,B2,00000000002,Two,C,A,M",
            "\r",
            "D3,B3,00000000003,Three,C,A,M",
        ]));

        let codes: Vec<&str> = records.iter().map(|r| r.udise_code.as_str()).collect();
        assert_eq!(codes, vec!["00000000001", "00000000002", "00000000003"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = parse("h1,h2\r\nD1,B1,00000000001,One,C,A,Govt\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].management, "Govt");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let records = parse(&source(&["  Khordha , Jatni ,  21150300301 , PS Jatni ,P,R,G "]));
        assert_eq!(records[0].district, "Khordha");
        assert_eq!(records[0].udise_code, "21150300301");
        assert_eq!(records[0].school_name, "PS Jatni");
        assert_eq!(records[0].management, "G");
    }

    #[test]
    fn test_issue_display() {
        let issue = RowIssue {
            line: 4,
            kind: RowIssueKind::ColumnCount { expected: 7, found: 3 },
        };
        assert_eq!(issue.to_string(), "line 4: expected 7 columns, found 3");
    }
}
