//! Data parsing helpers for the compact text forms used at the boundary.

/// Split a canonical `YYYYMMDD` string into `(year, month, day)`.
///
/// Only the shape is checked here (exactly eight ASCII digits once surrounding
/// whitespace is trimmed); whether the day exists is left to the date type.
pub fn parse_yyyymmdd(s: &str) -> Option<(u16, u8, u8)> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: u16 = s[0..4].parse().ok()?;
    let month: u8 = s[4..6].parse().ok()?;
    let day: u8 = s[6..8].parse().ok()?;
    Some((year, month, day))
}

/// Split a `YYYYMMDD` integer into `(year, month, day)`.
///
/// Like [`parse_yyyymmdd`], no calendar validation happens here.
pub fn split_yyyymmdd(n: u32) -> Option<(u16, u8, u8)> {
    if !(10_000_000..=99_999_999).contains(&n) {
        return None;
    }
    let year = u16::try_from(n / 10_000).ok()?;
    let month = u8::try_from(n / 100 % 100).ok()?;
    let day = u8::try_from(n % 100).ok()?;
    Some((year, month, day))
}

/// Split a record on its first `max - 1` commas, trimming every field.
///
/// The last field keeps any further commas, so free-text descriptions
/// survive intact.
pub fn split_record(s: &str, max: usize) -> Vec<&str> {
    s.splitn(max, ',').map(str::trim).collect()
}

/// Whether a feed line carries no data (blank or a `#` comment).
pub fn is_blank_or_comment(line: &str) -> bool {
    let t = line.trim_start();
    t.is_empty() || t.starts_with('#')
}
