//! Text formatting helpers for ordinals.

/// Return the English ordinal suffix for `n` (e.g. `1` → `"st"`, `12` → `"th"`).
pub fn ordinal_suffix(n: u32) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Format a number with its ordinal suffix (e.g. `1` → `"1st"`, `22` → `"22nd"`).
pub fn format_ordinal(n: u32) -> String {
    format!("{n}{}", ordinal_suffix(n))
}

/// Format a signed occurrence count the way a calendar reads it.
///
/// Zero means every occurrence, positive values count from the start of the
/// month, and negative values count back from its end:
///
/// ```
/// use almanac_core::utilities::data_formatters::format_signed_ordinal;
/// assert_eq!(format_signed_ordinal(0), "every");
/// assert_eq!(format_signed_ordinal(3), "3rd");
/// assert_eq!(format_signed_ordinal(-1), "last");
/// assert_eq!(format_signed_ordinal(-2), "2nd last");
/// ```
pub fn format_signed_ordinal(n: i32) -> String {
    match n {
        0 => "every".to_string(),
        -1 => "last".to_string(),
        n if n > 0 => format_ordinal(n.unsigned_abs()),
        n => format!("{} last", format_ordinal(n.unsigned_abs())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal() {
        assert_eq!(format_ordinal(1), "1st");
        assert_eq!(format_ordinal(2), "2nd");
        assert_eq!(format_ordinal(3), "3rd");
        assert_eq!(format_ordinal(4), "4th");
        assert_eq!(format_ordinal(11), "11th");
        assert_eq!(format_ordinal(12), "12th");
        assert_eq!(format_ordinal(13), "13th");
        assert_eq!(format_ordinal(21), "21st");
        assert_eq!(format_ordinal(22), "22nd");
    }

    #[test]
    fn test_signed_ordinal() {
        assert_eq!(format_signed_ordinal(1), "1st");
        assert_eq!(format_signed_ordinal(19), "19th");
        assert_eq!(format_signed_ordinal(-3), "3rd last");
        assert_eq!(format_signed_ordinal(-4), "4th last");
        assert_eq!(format_signed_ordinal(i32::MIN), "2147483648th last");
    }
}
