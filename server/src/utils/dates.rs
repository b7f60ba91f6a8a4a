use chrono::{DateTime, NaiveDateTime, Utc};

/// Format shown to users in forms and validation messages.
pub const DATE_FORMAT_DISPLAY: &str = "dd.MM.yyyy HH:mm";

/// The same format expressed for chrono.
pub const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Parses a form date. Input carries no offset and is taken as UTC.
///
/// chrono accepts single-digit fields, a signed year and runs of whitespace
/// for this format, so the exact `dd.MM.yyyy HH:mm` shape is checked first.
pub fn parse_event_date(input: &str) -> Option<DateTime<Utc>> {
    if !has_display_shape(input) {
        return None;
    }
    NaiveDateTime::parse_from_str(input, DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn has_display_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == DATE_FORMAT_DISPLAY.len()
        && bytes.iter().enumerate().all(|(i, byte)| match i {
            2 | 5 => *byte == b'.',
            10 => *byte == b' ',
            13 => *byte == b':',
            _ => byte.is_ascii_digit(),
        })
}

pub fn format_event_date(value: &DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}
