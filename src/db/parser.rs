//! Line parser for the `.dat` text format.
//!
//! # Responsibilities
//! - Skip blank lines and `#` comments
//! - Measure indentation (spaces only)
//! - Split comma separated ranges into `low`/`high` endpoints
//! - Collect `key="value"` properties
//!
//! # Format
//! ```text
//! # comment line
//! 0        prop1="foo"
//!   100    prop2="bar"
//!   200-345 prop2="bar" prop3="baz"
//! 90,98    prop1="booz"
//! ```

use std::io::BufRead;

use crate::db::tree::Props;
use crate::error::{Error, ParseErrorKind, Result};

/// An inclusive range of equal-length digit strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitRange {
    pub low: String,
    pub high: String,
}

impl DigitRange {
    pub fn new(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: low.into(),
            high: high.into(),
        }
    }

    /// A range matching exactly one prefix.
    pub fn single(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            high: prefix.clone(),
            low: prefix,
        }
    }
}

/// One parsed data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source.
    pub line: usize,
    /// Count of leading spaces.
    pub indent: usize,
    /// Digits consumed by every range on the line.
    pub length: usize,
    pub ranges: Vec<DigitRange>,
    pub props: Props,
}

/// Lazy iterator of records over a buffered reader.
///
/// Stops after the first error.
pub struct Records<R> {
    reader: R,
    line_no: usize,
    buf: String,
    done: bool,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buf.trim_end_matches(['\n', '\r']);
                    match parse_line(self.line_no, line) {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => {}
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::Io(e)));
                }
            }
        }
        None
    }
}

/// Parse a single line. Blank and comment lines yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Record>> {
    let body = line.trim_start_matches(' ');
    let indent = line.len() - body.len();

    let content = body.trim_start();
    if content.is_empty() || content.starts_with('#') {
        return Ok(None);
    }
    if body.starts_with(char::is_whitespace) {
        return Err(Error::parse(
            line_no,
            ParseErrorKind::MalformedLine,
            "indentation must use spaces",
        ));
    }

    let (ranges_text, props_text) = match body.find(char::is_whitespace) {
        Some(idx) => body.split_at(idx),
        None => (body, ""),
    };

    let ranges = parse_ranges(line_no, ranges_text)?;
    let length = ranges[0].low.len();
    let props = parse_props(line_no, props_text)?;

    Ok(Some(Record {
        line: line_no,
        indent,
        length,
        ranges,
        props,
    }))
}

fn parse_ranges(line_no: usize, text: &str) -> Result<Vec<DigitRange>> {
    let mut ranges: Vec<DigitRange> = Vec::new();

    for token in text.split(',') {
        let mut endpoints = token.split('-');
        let low = endpoints.next().unwrap_or_default();
        let high = endpoints.next().unwrap_or(low);
        if endpoints.next().is_some() || low.is_empty() || high.is_empty() {
            return Err(Error::parse(
                line_no,
                ParseErrorKind::MalformedLine,
                format!("invalid range {token:?}"),
            ));
        }

        for endpoint in [low, high] {
            if !endpoint.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::parse(
                    line_no,
                    ParseErrorKind::NonDigitToken,
                    format!("{endpoint:?} is not a digit string"),
                ));
            }
        }

        if low.len() != high.len() {
            return Err(Error::parse(
                line_no,
                ParseErrorKind::MalformedRange,
                format!("endpoints of {token:?} differ in length"),
            ));
        }
        if low > high {
            return Err(Error::parse(
                line_no,
                ParseErrorKind::MalformedRange,
                format!("{low} is greater than {high}"),
            ));
        }
        if let Some(first) = ranges.first() {
            if first.low.len() != low.len() {
                return Err(Error::parse(
                    line_no,
                    ParseErrorKind::MalformedRange,
                    format!("{token:?} differs in length from {:?}", first.low),
                ));
            }
        }

        ranges.push(DigitRange::new(low, high));
    }

    Ok(ranges)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn parse_props(line_no: usize, text: &str) -> Result<Props> {
    let mut props = Props::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        let key_len = rest.find(|c| !is_ident_char(c)).unwrap_or(rest.len());
        if key_len == 0 {
            return Err(Error::parse(
                line_no,
                ParseErrorKind::MalformedLine,
                format!("expected property name at {rest:?}"),
            ));
        }
        let (key, after) = rest.split_at(key_len);

        let quoted = after.strip_prefix("=\"").ok_or_else(|| {
            Error::parse(
                line_no,
                ParseErrorKind::MalformedLine,
                format!("expected =\"...\" after property {key:?}"),
            )
        })?;
        let close = quoted.find('"').ok_or_else(|| {
            Error::parse(
                line_no,
                ParseErrorKind::MalformedLine,
                format!("unterminated value for property {key:?}"),
            )
        })?;

        props.insert(key, &quoted[..close]);
        rest = quoted[close + 1..].trim_start();
    }

    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Record {
        parse_line(1, line).unwrap().unwrap()
    }

    fn kind_of(line: &str) -> ParseErrorKind {
        parse_line(3, line).unwrap_err().parse_kind().unwrap()
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        assert!(parse_line(1, "").unwrap().is_none());
        assert!(parse_line(1, "    ").unwrap().is_none());
        assert!(parse_line(1, "# comment").unwrap().is_none());
        assert!(parse_line(1, "   # indented comment").unwrap().is_none());
    }

    #[test]
    fn test_single_prefix_with_props() {
        let record = parse("  100    prop2=\"bar\"");
        assert_eq!(record.indent, 2);
        assert_eq!(record.length, 3);
        assert_eq!(record.ranges, vec![DigitRange::single("100")]);
        assert_eq!(record.props.get("prop2"), Some("bar"));
    }

    #[test]
    fn test_ranges_and_multiple_props() {
        let record = parse("  200-345 prop2=\"bar\" prop3=\"baz\"");
        assert_eq!(record.ranges, vec![DigitRange::new("200", "345")]);
        assert_eq!(record.props.len(), 2);
        assert_eq!(record.props.get("prop3"), Some("baz"));
    }

    #[test]
    fn test_comma_separated_ranges() {
        let record = parse("90,98    prop1=\"booz\"");
        assert_eq!(
            record.ranges,
            vec![DigitRange::single("90"), DigitRange::single("98")]
        );
        assert_eq!(record.length, 2);
    }

    #[test]
    fn test_values_with_spaces_and_empty_values() {
        let record = parse("204 country=\"Netherlands Antilles\" note=\"\"");
        assert_eq!(record.props.get("country"), Some("Netherlands Antilles"));
        assert_eq!(record.props.get("note"), Some(""));
    }

    #[test]
    fn test_line_without_props() {
        let record = parse("978");
        assert!(record.props.is_empty());
        assert_eq!(record.indent, 0);
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let record = parse("1 a=\"x\" a=\"y\"");
        assert_eq!(record.props.get("a"), Some("y"));
    }

    #[test]
    fn test_malformed_ranges() {
        assert_eq!(kind_of("12-3"), ParseErrorKind::MalformedRange);
        assert_eq!(kind_of("50-40"), ParseErrorKind::MalformedRange);
        assert_eq!(kind_of("1,23"), ParseErrorKind::MalformedRange);
    }

    #[test]
    fn test_non_digit_tokens() {
        assert_eq!(kind_of("1a2 x=\"y\""), ParseErrorKind::NonDigitToken);
        assert_eq!(kind_of("10-2b"), ParseErrorKind::NonDigitToken);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(kind_of("1-2-3"), ParseErrorKind::MalformedLine);
        assert_eq!(kind_of("1,,2"), ParseErrorKind::MalformedLine);
        assert_eq!(kind_of("\t12"), ParseErrorKind::MalformedLine);
        assert_eq!(kind_of("12 prop"), ParseErrorKind::MalformedLine);
        assert_eq!(kind_of("12 prop=bar"), ParseErrorKind::MalformedLine);
        assert_eq!(kind_of("12 prop=\"bar"), ParseErrorKind::MalformedLine);
        assert_eq!(kind_of("12 =\"bar\""), ParseErrorKind::MalformedLine);
    }

    #[test]
    fn test_error_reports_line_number() {
        let err = parse_line(42, "9-1").unwrap_err();
        assert_eq!(err.line(), Some(42));
        assert!(err.to_string().starts_with("line 42"));
    }

    #[test]
    fn test_records_iterator_counts_lines_and_handles_crlf() {
        let text = "# header\r\n0 a=\"1\"\r\n\r\n  12 b=\"2\"\r\n";
        let records: Vec<Record> = Records::new(text.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].indent, 2);
        assert_eq!(records[1].props.get("b"), Some("2"));
    }

    #[test]
    fn test_records_iterator_stops_after_error() {
        let text = "1\nx\n2\n";
        let mut records = Records::new(text.as_bytes());
        assert!(records.next().unwrap().is_ok());
        assert!(records.next().unwrap().is_err());
        assert!(records.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes: &[u8] = b"1 a=\"\xff\"\n";
        let err = Records::new(bytes).next().unwrap().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
