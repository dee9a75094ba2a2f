//! Holiday feed loader.
//!
//! A feed is text with one `YYYYMMDD,name` record per line, in any order.
//! Blank lines and `#` comments are ignored.  What happens to a line that
//! does not parse depends on the [`FeedMode`]:
//!
//! * [`FeedMode::Strict`] aborts on the first bad line or repeated date.
//! * [`FeedMode::Lenient`] skips it, logs a warning, and records a
//!   [`Rejection`] so the caller can report it.  For a repeated date the
//!   first occurrence in the feed wins.

use crate::holiday::Holiday;
use crate::ledger::HolidayLedger;
use almanac_core::errors::{Error, Result};
use almanac_core::settings::FeedMode;
use almanac_core::utilities::data_parsers::is_blank_or_comment;
use std::io::BufRead;
use std::path::Path;

/// A feed line that was skipped during a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based line number in the feed.
    pub line: usize,
    /// Why the line was skipped.
    pub reason: String,
}

/// The outcome of loading a feed.
#[derive(Debug, Clone)]
pub struct FeedLoad {
    /// The ledger built from every line that was accepted.
    pub ledger: HolidayLedger,
    /// Lines that were skipped (always empty in strict mode).
    pub rejected: Vec<Rejection>,
}

impl FeedLoad {
    /// Discard the rejection report and keep the ledger.
    pub fn into_ledger(self) -> HolidayLedger {
        self.ledger
    }
}

impl HolidayLedger {
    /// Load a ledger from feed text.
    pub fn from_feed(text: &str, mode: FeedMode) -> Result<FeedLoad> {
        load(text.lines().map(|l| Ok(Ok(l.to_string()))), mode)
    }

    /// Load a ledger from any buffered reader.
    ///
    /// A line that is not valid UTF-8 is malformed like any other bad line.
    /// Only a failed read is reported as [`Error::Io`].
    pub fn from_reader<R: BufRead>(reader: R, mode: FeedMode) -> Result<FeedLoad> {
        load(raw_lines(reader), mode)
    }

    /// Load a ledger from a file.
    pub fn from_path(path: impl AsRef<Path>, mode: FeedMode) -> Result<FeedLoad> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), ?mode, "loading holidays");
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
        Self::from_reader(std::io::BufReader::new(file), mode)
    }
}

/// One feed line: its text, or why it could not be decoded.
type RawLine = std::result::Result<String, String>;

/// Split a reader on `\n` without requiring the whole stream to be UTF-8.
fn raw_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = Result<RawLine>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || match reader.read_until(b'\n', &mut buf) {
        Ok(0) => None,
        Ok(_) => {
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            let line = String::from_utf8(std::mem::take(&mut buf))
                .map_err(|e| format!("not valid UTF-8: {}", e.utf8_error()));
            Some(Ok(line))
        }
        Err(e) => Some(Err(Error::from(e))),
    })
}

fn load(lines: impl Iterator<Item = Result<RawLine>>, mode: FeedMode) -> Result<FeedLoad> {
    let mut parsed: Vec<(usize, Holiday)> = Vec::new();
    let mut rejected = Vec::new();

    for (i, line) in lines.enumerate() {
        let line_no = i + 1;
        let entry = match line? {
            Ok(text) if is_blank_or_comment(&text) => continue,
            Ok(text) => Holiday::parse_line(line_no, &text),
            Err(reason) => Err(Error::MalformedEntry {
                line: line_no,
                reason,
            }),
        };
        match entry {
            Ok(h) => parsed.push((line_no, h)),
            Err(e) if mode == FeedMode::Strict => return Err(e),
            Err(e) => {
                let reason = match e {
                    Error::MalformedEntry { reason, .. } => reason,
                    other => other.to_string(),
                };
                tracing::warn!(line = line_no, %reason, "skipping malformed holiday");
                rejected.push(Rejection {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    // Stable sort: among equal dates, feed order survives, so the first
    // occurrence is the one kept.
    parsed.sort_by_key(|(_, h)| h.date());
    let mut holidays: Vec<Holiday> = Vec::with_capacity(parsed.len());
    for (line_no, h) in parsed {
        if holidays.last() == Some(&h) {
            if mode == FeedMode::Strict {
                return Err(Error::DuplicateHoliday(h.date().to_string()));
            }
            tracing::warn!(line = line_no, date = %h.date(), "skipping duplicate holiday");
            rejected.push(Rejection {
                line: line_no,
                reason: format!("duplicate holiday on {}", h.date()),
            });
            continue;
        }
        holidays.push(h);
    }
    rejected.sort_by_key(|r| r.line);

    Ok(FeedLoad {
        ledger: HolidayLedger::from_sorted(holidays),
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    const FEED: &str = "\
# NYSE 2024
20240704,Independence Day
20240101,New Year's Day

20240115, Martin Luther King, Jr. Day
";

    #[test]
    fn loads_and_sorts() {
        let load = HolidayLedger::from_feed(FEED, FeedMode::Strict).unwrap();
        assert!(load.rejected.is_empty());
        let l = load.into_ledger();
        assert_eq!(l.len(), 3);
        assert_eq!(l.first().unwrap().yyyymmdd(), 20240101);
        assert_eq!(
            l.fetch(Date::from_yyyymmdd(20240115).unwrap()).unwrap().name(),
            "Martin Luther King, Jr. Day"
        );
    }

    #[test]
    fn lenient_skips_and_reports() {
        let feed = "20240101,New Year\nnot a holiday\n20240230,Nope\n20240704,July 4\n";
        let load = HolidayLedger::from_feed(feed, FeedMode::Lenient).unwrap();
        assert_eq!(load.ledger.len(), 2);
        let lines: Vec<usize> = load.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn strict_fails_on_first_bad_line() {
        let feed = "20240101,New Year\nnot a holiday\n20240230,Nope\n";
        let e = HolidayLedger::from_feed(feed, FeedMode::Strict).unwrap_err();
        assert!(matches!(e, Error::MalformedEntry { line: 2, .. }));
    }

    #[test]
    fn duplicates() {
        let feed = "20240101,New Year\n20240704,July 4\n20240101,Again\n";
        let load = HolidayLedger::from_feed(feed, FeedMode::Lenient).unwrap();
        assert_eq!(load.ledger.len(), 2);
        assert_eq!(load.ledger.first().unwrap().name(), "New Year");
        assert_eq!(load.rejected[0].line, 3);

        let e = HolidayLedger::from_feed(feed, FeedMode::Strict).unwrap_err();
        assert_eq!(e, Error::DuplicateHoliday("20240101".into()));
    }

    #[test]
    fn reads_from_a_reader() {
        let load =
            HolidayLedger::from_reader(std::io::Cursor::new(FEED.as_bytes()), FeedMode::Strict)
                .unwrap();
        assert_eq!(load.ledger.len(), 3);
    }

    #[test]
    fn undecodable_line_is_rejected_not_fatal() {
        let bytes: &[u8] = b"20240101,New Year\r\n20240704,Independ\xffence\n20241225,Christmas\n";
        let load = HolidayLedger::from_reader(bytes, FeedMode::Lenient).unwrap();
        assert_eq!(load.ledger.len(), 2);
        assert_eq!(load.ledger.first().unwrap().name(), "New Year");
        assert_eq!(load.rejected.len(), 1);
        assert_eq!(load.rejected[0].line, 2);
        assert!(load.rejected[0].reason.contains("UTF-8"));

        let e = HolidayLedger::from_reader(bytes, FeedMode::Strict).unwrap_err();
        assert!(matches!(e, Error::MalformedEntry { line: 2, .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let e = HolidayLedger::from_path("/nonexistent/holidays.csv", FeedMode::Lenient)
            .unwrap_err();
        assert!(matches!(e, Error::Io(_)));
    }
}
