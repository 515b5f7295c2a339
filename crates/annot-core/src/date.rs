//! PDF date conversion.
//!
//! PDF dates come in the form `D:YYYYMMDDHHmmSS±HH'mm'`. The viewer shows
//! them as `DD.MM.YYYY HH:MM:SS`, built by substituting fixed-width fields
//! into a template. A field is written only when the leading digit run of
//! the input is long enough to contain it; everything else keeps the
//! template default.

/// Extract the leading run of digits, skipping any non-digit prefix.
fn leading_digit_run(s: &str) -> &str {
    let start = match s.find(|c: char| c.is_ascii_digit()) {
        Some(i) => i,
        None => return "",
    };
    let digits = &s[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    &digits[..end]
}

/// Convert a raw PDF date string into the `DD.MM.YYYY HH:MM:SS` display
/// form.
///
/// Absent input, or input with fewer than four leading digits, yields the
/// exact template default `01.01.1970 00:00:00`.
pub fn convert_date(raw: Option<&str>) -> String {
    let digits = raw.map(leading_digit_run).unwrap_or("");
    let len = digits.len();

    let field = |offset: usize, width: usize, default: &'static str| {
        if len >= offset + width {
            &digits[offset..offset + width]
        } else {
            default
        }
    };

    let year = field(0, 4, "1970");
    let month = field(4, 2, "01");
    let day = field(6, 2, "01");
    let hour = field(8, 2, "00");
    let minute = field(10, 2, "00");
    let second = field(12, 2, "00");

    format!(
        "{}.{}.{} {}:{}:{}",
        day, month, year, hour, minute, second
    )
}
