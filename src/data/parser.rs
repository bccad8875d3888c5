//! Paste Parser Module
//! Turns pasted CSV/TSV-like text into points.
//!
//! Fields are separated by a tab, comma, semicolon, or a run of two or more
//! whitespace characters. A line is kept when its first two fields are both
//! finite numbers; further fields are ignored.

use super::dataset::{parse_number, Point};

/// Why a pasted line was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    TooFewFields,
    NotNumeric,
}

/// A non-empty line that did not yield a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number within the trimmed input.
    pub line: usize,
    pub text: String,
    pub reason: RowRejection,
}

/// Result of parsing a paste: accepted points plus what was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub points: Vec<Point>,
    pub rejected: Vec<RejectedLine>,
}

impl ParseReport {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Parse pasted text and keep track of dropped lines.
pub fn parse_pasted(text: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (idx, raw) in text.trim().lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line);
        if fields.len() < 2 {
            report.rejected.push(RejectedLine {
                line: idx + 1,
                text: line.to_string(),
                reason: RowRejection::TooFewFields,
            });
            continue;
        }

        let x = parse_number(fields[0]).filter(|v| v.is_finite());
        let y = parse_number(fields[1]).filter(|v| v.is_finite());
        match (x, y) {
            (Some(x), Some(y)) => report.points.push(Point::new(x, y)),
            _ => report.rejected.push(RejectedLine {
                line: idx + 1,
                text: line.to_string(),
                reason: RowRejection::NotNumeric,
            }),
        }
    }

    report
}

/// Parse pasted text into points, silently dropping malformed lines.
pub fn parse_csv(text: &str) -> Vec<Point> {
    parse_pasted(text).points
}

/// Render points one `x, y` per line; `parse_csv` reads this back unchanged.
pub fn to_delimited_text(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{}, {}", p.x, p.y))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split one trimmed line into trimmed fields.
///
/// Commas and semicolons always split. Inside the pieces between them a
/// whitespace run splits when it is two or more characters long or holds a
/// tab; a single space stays inside the field.
fn split_fields(line: &str) -> Vec<&str> {
    line.split([',', ';'])
        .flat_map(|segment| split_wide_whitespace(segment.trim()))
        .collect()
}

fn split_wide_whitespace(segment: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut chars = segment.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if !ch.is_whitespace() {
            continue;
        }
        let mut end = pos + ch.len_utf8();
        let mut run = 1;
        let mut has_tab = ch == '\t';
        while let Some(&(next_pos, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            has_tab |= next == '\t';
            run += 1;
            end = next_pos + next.len_utf8();
            chars.next();
        }
        if run >= 2 || has_tab {
            fields.push(&segment[start..pos]);
            start = end;
        }
    }
    fields.push(&segment[start..]);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_rows() {
        assert_eq!(
            parse_csv("0, 10\n1, 15\n2, 23"),
            vec![
                Point::new(0.0, 10.0),
                Point::new(1.0, 15.0),
                Point::new(2.0, 23.0)
            ]
        );
    }

    #[test]
    fn drops_malformed_lines() {
        let report = parse_pasted("abc, def\n1,2");
        assert_eq!(report.points, vec![Point::new(1.0, 2.0)]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 1);
        assert_eq!(report.rejected[0].reason, RowRejection::NotNumeric);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_csv("").is_empty());
        assert!(parse_pasted("  \n\n ").rejected.is_empty());
    }

    #[test]
    fn accepts_all_delimiters() {
        let text = "1\t2\n3;4\n5    6\n7,8,99\r\n9  \t 10";
        assert_eq!(
            parse_csv(text),
            vec![
                Point::new(1.0, 2.0),
                Point::new(3.0, 4.0),
                Point::new(5.0, 6.0),
                Point::new(7.0, 8.0),
                Point::new(9.0, 10.0),
            ]
        );
    }

    #[test]
    fn single_space_does_not_split() {
        let report = parse_pasted("1 2");
        assert!(report.points.is_empty());
        assert_eq!(report.rejected[0].reason, RowRejection::TooFewFields);
    }

    #[test]
    fn empty_field_is_not_zero() {
        let report = parse_pasted("1,,2");
        assert!(report.points.is_empty());
        assert_eq!(report.rejected[0].reason, RowRejection::NotNumeric);
    }

    #[test]
    fn scientific_and_negative_values() {
        assert_eq!(
            parse_csv("-1.5e2; 3E-1"),
            vec![Point::new(-150.0, 0.3)]
        );
    }

    #[test]
    fn split_keeps_inner_single_spaces() {
        assert_eq!(split_fields("a b,c"), vec!["a b", "c"]);
        assert_eq!(split_fields("a  b"), vec!["a", "b"]);
        assert_eq!(split_fields("a\tb"), vec!["a", "b"]);
        assert_eq!(split_fields("1,  2"), vec!["1", "2"]);
        assert_eq!(split_fields("1  ;2"), vec!["1", "2"]);
    }

    #[test]
    fn delimited_text_reads_back() {
        let points = vec![Point::new(0.1, -2.0), Point::new(1e-7, 12345.678)];
        assert_eq!(parse_csv(&to_delimited_text(&points)), points);
    }
}
