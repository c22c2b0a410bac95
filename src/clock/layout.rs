//! Reference-time layouts.
//!
//! A layout is an example rendering of the reference instant
//! `Mon Jan 2 15:04:05 MST 2006`. Each recognised piece of that example is
//! replaced with the matching field of the time being formatted; all other
//! text is copied through unchanged. `"15:04"` therefore renders hours and
//! minutes, and `"Monday, January 2"` renders a long weekday and month.
//!
//! | token                  | field                                      |
//! |------------------------|--------------------------------------------|
//! | `January` `Jan`        | month name                                 |
//! | `1` `01`               | month number                               |
//! | `Monday` `Mon`         | weekday name                               |
//! | `2` `_2` `02`          | day of month (plain, space, zero padded)   |
//! | `__2` `002`            | day of year                                |
//! | `2006` `06`            | year                                       |
//! | `15` `3` `03`          | hour (24h, 12h, 12h zero padded)           |
//! | `4` `04` `5` `05`      | minute, second                             |
//! | `PM` `pm`              | meridiem                                   |
//! | `MST`                  | zone abbreviation                          |
//! | `-0700` `-07:00` `-07` | numeric offset (`-070000`, `-07:00:00` too)|
//! | `Z0700` `Z07:00` `Z07` | numeric offset, `Z` at UTC                 |
//! | `.000` `.999`          | fractional seconds, fixed or trimmed       |

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDateTime, Offset, TimeZone, Timelike};

const LONG_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const LONG_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MAX_FRACTION_DIGITS: usize = 9;

/// Calendar and clock fields of an instant in some zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedTime {
    local: NaiveDateTime,
    offset_seconds: i32,
    abbreviation: String,
}

impl ZonedTime {
    /// Builds a zoned time from its parts.
    ///
    /// `abbreviation` may be empty when the zone has no short name; `MST`
    /// then renders as a numeric offset.
    pub fn new(local: NaiveDateTime, offset_seconds: i32, abbreviation: impl Into<String>) -> Self {
        Self {
            local,
            offset_seconds,
            abbreviation: abbreviation.into(),
        }
    }

    /// Captures the local fields, offset and abbreviation of `datetime`.
    pub fn from_datetime<Tz>(datetime: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let name = datetime.format("%Z").to_string();
        // chrono writes unnamed offsets as `+01:00`; tzdb names such as `+05` stay.
        let abbreviation = if name.contains(':') {
            String::new()
        } else {
            name
        };

        Self {
            local: datetime.naive_local(),
            offset_seconds: datetime.offset().fix().local_minus_utc(),
            abbreviation,
        }
    }

    /// Fills a missing abbreviation with the tzdb numeric form, `+05` or `+0545`.
    pub(super) fn or_numeric_abbreviation(mut self) -> Self {
        if self.abbreviation.is_empty() {
            let style = if self.offset_seconds % 3600 == 0 {
                OffsetStyle::Hours
            } else {
                OffsetStyle::HoursMinutes
            };
            push_offset(&mut self.abbreviation, self.offset_seconds, style);
        }
        self
    }

    /// Wall-clock fields in this zone.
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// Seconds east of UTC.
    pub fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    /// Short zone name such as `CEST`, or empty if unknown.
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetStyle {
    Hours,
    HoursMinutes,
    HoursMinutesColon,
    Seconds,
    SecondsColon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk {
    LongMonth,
    Month,
    NumMonth,
    ZeroMonth,
    LongWeekday,
    Weekday,
    Day,
    UnderDay,
    ZeroDay,
    UnderYearDay,
    ZeroYearDay,
    LongYear,
    Year,
    Hour,
    Hour12,
    ZeroHour12,
    Minute,
    ZeroMinute,
    Second,
    ZeroSecond,
    UpperMeridiem,
    LowerMeridiem,
    ZoneName,
    NumericOffset(OffsetStyle),
    IsoOffset(OffsetStyle),
    FixedFraction { digits: usize, separator: char },
    TrimmedFraction { digits: usize, separator: char },
}

/// Renders `time` according to `layout`.
///
/// Never fails: text that is not a token is copied as is.
pub fn format(time: &ZonedTime, layout: &str) -> String {
    let bytes = layout.as_bytes();
    let mut out = String::with_capacity(layout.len() + 8);
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match match_chunk(&bytes[i..]) {
            Some((chunk, len)) => {
                out.push_str(&layout[literal_start..i]);
                render_chunk(&mut out, time, chunk);
                i += len;
                literal_start = i;
            }
            None => i += 1,
        }
    }

    out.push_str(&layout[literal_start..]);
    out
}

fn starts_with_lowercase(rest: &[u8]) -> bool {
    rest.first().is_some_and(u8::is_ascii_lowercase)
}

/// Recognises the token at the start of `rest`, returning it with its byte length.
fn match_chunk(rest: &[u8]) -> Option<(Chunk, usize)> {
    let first = *rest.first()?;

    match first {
        b'J' if rest.starts_with(b"Jan") => {
            if rest.starts_with(b"January") {
                Some((Chunk::LongMonth, 7))
            } else if !starts_with_lowercase(&rest[3..]) {
                Some((Chunk::Month, 3))
            } else {
                None
            }
        }
        b'M' if rest.starts_with(b"Mon") => {
            if rest.starts_with(b"Monday") {
                Some((Chunk::LongWeekday, 6))
            } else if !starts_with_lowercase(&rest[3..]) {
                Some((Chunk::Weekday, 3))
            } else {
                None
            }
        }
        b'M' if rest.starts_with(b"MST") => Some((Chunk::ZoneName, 3)),
        b'0' if rest.starts_with(b"002") => Some((Chunk::ZeroYearDay, 3)),
        b'0' => {
            let chunk = match rest.get(1)? {
                b'1' => Chunk::ZeroMonth,
                b'2' => Chunk::ZeroDay,
                b'3' => Chunk::ZeroHour12,
                b'4' => Chunk::ZeroMinute,
                b'5' => Chunk::ZeroSecond,
                b'6' => Chunk::Year,
                _ => return None,
            };
            Some((chunk, 2))
        }
        b'1' if rest.starts_with(b"15") => Some((Chunk::Hour, 2)),
        b'1' => Some((Chunk::NumMonth, 1)),
        b'2' if rest.starts_with(b"2006") => Some((Chunk::LongYear, 4)),
        b'2' => Some((Chunk::Day, 1)),
        // "_2006" is a literal underscore followed by the year.
        b'_' if rest.starts_with(b"_2") && !rest.starts_with(b"_2006") => {
            Some((Chunk::UnderDay, 2))
        }
        b'_' if rest.starts_with(b"__2") => Some((Chunk::UnderYearDay, 3)),
        b'3' => Some((Chunk::Hour12, 1)),
        b'4' => Some((Chunk::Minute, 1)),
        b'5' => Some((Chunk::Second, 1)),
        b'P' if rest.starts_with(b"PM") => Some((Chunk::UpperMeridiem, 2)),
        b'p' if rest.starts_with(b"pm") => Some((Chunk::LowerMeridiem, 2)),
        b'-' => match_offset(&rest[1..]).map(|(style, len)| (Chunk::NumericOffset(style), len + 1)),
        b'Z' => match_offset(&rest[1..]).map(|(style, len)| (Chunk::IsoOffset(style), len + 1)),
        b'.' | b',' => match_fraction(rest),
        _ => None,
    }
}

fn match_offset(rest: &[u8]) -> Option<(OffsetStyle, usize)> {
    const STYLES: [(&[u8], OffsetStyle); 5] = [
        (b"070000", OffsetStyle::Seconds),
        (b"07:00:00", OffsetStyle::SecondsColon),
        (b"0700", OffsetStyle::HoursMinutes),
        (b"07:00", OffsetStyle::HoursMinutesColon),
        (b"07", OffsetStyle::Hours),
    ];

    STYLES
        .iter()
        .find(|(pattern, _)| rest.starts_with(pattern))
        .map(|(pattern, style)| (*style, pattern.len()))
}

fn match_fraction(rest: &[u8]) -> Option<(Chunk, usize)> {
    let separator = char::from(rest[0]);
    let digit = *rest.get(1)?;
    if digit != b'0' && digit != b'9' {
        return None;
    }

    let end = 1 + rest[1..].iter().take_while(|&&b| b == digit).count();
    if rest.get(end).is_some_and(u8::is_ascii_digit) {
        return None;
    }

    let digits = end - 1;
    let chunk = if digit == b'0' {
        Chunk::FixedFraction { digits, separator }
    } else {
        Chunk::TrimmedFraction { digits, separator }
    };
    Some((chunk, end))
}

fn push_padded(out: &mut String, value: i64, width: usize, pad: char) {
    if value < 0 {
        out.push('-');
    }
    let digits = value.unsigned_abs().to_string();
    for _ in digits.len()..width {
        out.push(pad);
    }
    out.push_str(&digits);
}

fn render_chunk(out: &mut String, time: &ZonedTime, chunk: Chunk) {
    let local = time.local;
    let month = LONG_MONTHS[local.month0() as usize];
    let weekday = LONG_WEEKDAYS[local.weekday().num_days_from_monday() as usize];

    match chunk {
        Chunk::LongMonth => out.push_str(month),
        Chunk::Month => out.push_str(&month[..3]),
        Chunk::NumMonth => push_padded(out, local.month().into(), 0, '0'),
        Chunk::ZeroMonth => push_padded(out, local.month().into(), 2, '0'),
        Chunk::LongWeekday => out.push_str(weekday),
        Chunk::Weekday => out.push_str(&weekday[..3]),
        Chunk::Day => push_padded(out, local.day().into(), 0, '0'),
        Chunk::UnderDay => push_padded(out, local.day().into(), 2, ' '),
        Chunk::ZeroDay => push_padded(out, local.day().into(), 2, '0'),
        Chunk::UnderYearDay => push_padded(out, local.ordinal().into(), 3, ' '),
        Chunk::ZeroYearDay => push_padded(out, local.ordinal().into(), 3, '0'),
        Chunk::LongYear => push_padded(out, local.year().into(), 4, '0'),
        Chunk::Year => push_padded(out, i64::from(local.year()).rem_euclid(100), 2, '0'),
        Chunk::Hour => push_padded(out, local.hour().into(), 2, '0'),
        Chunk::Hour12 => push_padded(out, hour12(local.hour()), 0, '0'),
        Chunk::ZeroHour12 => push_padded(out, hour12(local.hour()), 2, '0'),
        Chunk::Minute => push_padded(out, local.minute().into(), 0, '0'),
        Chunk::ZeroMinute => push_padded(out, local.minute().into(), 2, '0'),
        Chunk::Second => push_padded(out, local.second().into(), 0, '0'),
        Chunk::ZeroSecond => push_padded(out, local.second().into(), 2, '0'),
        Chunk::UpperMeridiem => out.push_str(if local.hour() >= 12 { "PM" } else { "AM" }),
        Chunk::LowerMeridiem => out.push_str(if local.hour() >= 12 { "pm" } else { "am" }),
        Chunk::ZoneName if !time.abbreviation.is_empty() => out.push_str(&time.abbreviation),
        Chunk::ZoneName => push_offset(out, time.offset_seconds, OffsetStyle::HoursMinutes),
        Chunk::NumericOffset(style) => push_offset(out, time.offset_seconds, style),
        Chunk::IsoOffset(_) if time.offset_seconds == 0 => out.push('Z'),
        Chunk::IsoOffset(style) => push_offset(out, time.offset_seconds, style),
        Chunk::FixedFraction { digits, separator } => {
            let nanos = fraction_digits(local.nanosecond());
            out.push(separator);
            out.push_str(&nanos[..digits.min(MAX_FRACTION_DIGITS)]);
        }
        Chunk::TrimmedFraction { digits, separator } => {
            let nanos = fraction_digits(local.nanosecond());
            let kept = nanos[..digits.min(MAX_FRACTION_DIGITS)].trim_end_matches('0');
            if !kept.is_empty() {
                out.push(separator);
                out.push_str(kept);
            }
        }
    }
}

fn hour12(hour: u32) -> i64 {
    match hour % 12 {
        0 => 12,
        h => h.into(),
    }
}

fn fraction_digits(nanosecond: u32) -> String {
    // Leap seconds are reported as nanosecond >= 1e9.
    format!("{:09}", nanosecond % 1_000_000_000)
}

fn push_offset(out: &mut String, offset_seconds: i32, style: OffsetStyle) {
    out.push(if offset_seconds < 0 { '-' } else { '+' });

    let abs = offset_seconds.unsigned_abs();
    let hours = abs / 3600;
    let minutes = abs / 60 % 60;
    let seconds = abs % 60;

    push_padded(out, hours.into(), 2, '0');

    let colon = matches!(
        style,
        OffsetStyle::HoursMinutesColon | OffsetStyle::SecondsColon
    );
    if style == OffsetStyle::Hours {
        return;
    }
    if colon {
        out.push(':');
    }
    push_padded(out, minutes.into(), 2, '0');

    if matches!(style, OffsetStyle::Seconds | OffsetStyle::SecondsColon) {
        if colon {
            out.push(':');
        }
        push_padded(out, seconds.into(), 2, '0');
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;

    use super::*;

    fn at(
        (year, month, day): (i32, u32, u32),
        (hour, minute, second, nano): (u32, u32, u32, u32),
        offset_seconds: i32,
        abbreviation: &str,
    ) -> ZonedTime {
        let local = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_nano_opt(hour, minute, second, nano)
            .unwrap();
        ZonedTime::new(local, offset_seconds, abbreviation)
    }

    fn evening() -> ZonedTime {
        at((2025, 6, 5), (18, 4, 5, 123_400_000), 0, "UTC")
    }

    #[test]
    fn default_layouts() {
        let time = evening();

        assert_eq!(format(&time, "15:04"), "18:04");
        assert_eq!(format(&time, "Monday, January 2"), "Thursday, June 5");
    }

    #[test]
    fn classic_layouts() {
        let time = evening();

        assert_eq!(
            format(&time, "Mon Jan _2 15:04:05 MST 2006"),
            "Thu Jun  5 18:04:05 UTC 2025"
        );
        assert_eq!(
            format(&time, "2006-01-02T15:04:05.000Z07:00"),
            "2025-06-05T18:04:05.123Z"
        );
        assert_eq!(format(&time, "1/2/06"), "6/5/25");
        assert_eq!(format(&time, "02 Jan 06 15:04 -0700"), "05 Jun 25 18:04 +0000");
    }

    #[test]
    fn twelve_hour_clock() {
        let time = evening();

        assert_eq!(format(&time, "3:04PM"), "6:04PM");
        assert_eq!(format(&time, "03:04 pm"), "06:04 pm");

        let midnight = at((2025, 6, 5), (0, 7, 0, 0), 0, "UTC");
        assert_eq!(format(&midnight, "3:04 PM"), "12:07 AM");
    }

    #[test]
    fn numeric_offsets() {
        let kathmandu = at((2025, 6, 5), (23, 49, 5, 0), 20_700, "");
        let new_york = at((2025, 6, 5), (14, 4, 5, 0), -14_400, "EDT");

        assert_eq!(format(&kathmandu, "-07:00:00"), "+05:45:00");
        assert_eq!(format(&kathmandu, "-070000"), "+054500");
        assert_eq!(format(&kathmandu, "Z07:00"), "+05:45");
        assert_eq!(format(&new_york, "-0700"), "-0400");
        assert_eq!(format(&new_york, "-07"), "-04");
        assert_eq!(format(&new_york, "Z0700"), "-0400");
    }

    #[test]
    fn zone_name_falls_back_to_offset() {
        let named = at((2025, 6, 5), (14, 4, 5, 0), -14_400, "EDT");
        let unnamed = at((2025, 6, 5), (23, 34, 5, 0), 19_800, "");

        assert_eq!(format(&named, "MST"), "EDT");
        assert_eq!(format(&unnamed, "MST"), "+0530");
    }

    #[test]
    fn fractional_seconds() {
        let time = evening();

        assert_eq!(format(&time, "05.000"), "05.123");
        assert_eq!(format(&time, "05,000000"), "05,123400");
        assert_eq!(format(&time, "05.999999"), "05.1234");

        let whole = at((2025, 6, 5), (18, 4, 5, 0), 0, "UTC");
        assert_eq!(format(&whole, "05.999"), "05");
    }

    #[test]
    fn day_of_year() {
        let time = evening();
        let early = at((2025, 1, 5), (9, 0, 0, 0), 0, "UTC");

        assert_eq!(format(&time, "002 __2"), "156 156");
        assert_eq!(format(&early, "002|__2|_2|02"), "005|  5| 5|05");
    }

    #[test]
    fn unknown_text_passes_through() {
        let time = evening();

        assert_eq!(format(&time, "Month"), "Month");
        assert_eq!(format(&time, "Janky"), "Janky");
        assert_eq!(format(&time, "at 15h"), "at 18h");
        assert_eq!(format(&time, "_2006"), "_2025");
        assert_eq!(format(&time, "時刻 15:04 ✓"), "時刻 18:04 ✓");
        assert_eq!(format(&time, ""), "");
    }

    #[test]
    fn same_input_renders_identically() {
        let time = evening();
        let layout = "Monday, January 2 2006 15:04:05.000 MST";

        assert_eq!(format(&time, layout), format(&time, layout));
    }

    #[test]
    fn from_datetime_captures_named_zone() {
        let berlin: Tz = "Europe/Berlin".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 6, 5, 16, 4, 0).unwrap();

        let zoned = ZonedTime::from_datetime(&instant.with_timezone(&berlin));

        assert_eq!(zoned.offset_seconds(), 7200);
        assert_eq!(zoned.abbreviation(), "CEST");
        assert_eq!(format(&zoned, "15:04 MST"), "18:04 CEST");
    }

    #[test]
    fn from_datetime_keeps_signed_tzdb_names() {
        let tashkent: Tz = "Asia/Tashkent".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 6, 5, 16, 4, 0).unwrap();

        let zoned = ZonedTime::from_datetime(&instant.with_timezone(&tashkent))
            .or_numeric_abbreviation();

        assert_eq!(zoned.abbreviation(), "+05");
        assert_eq!(format(&zoned, "15:04 MST"), "21:04 +05");
    }

    #[test]
    fn numeric_abbreviation_keeps_existing_name() {
        let zoned = ZonedTime::new(NaiveDateTime::default(), 7200, "CEST").or_numeric_abbreviation();
        let unnamed = ZonedTime::new(NaiveDateTime::default(), 20700, "").or_numeric_abbreviation();

        assert_eq!(zoned.abbreviation(), "CEST");
        assert_eq!(unnamed.abbreviation(), "+0545");
    }

    #[test]
    fn from_datetime_drops_numeric_zone_names() {
        let fixed = chrono::FixedOffset::east_opt(3600).unwrap();
        let instant = fixed.with_ymd_and_hms(2025, 6, 5, 19, 4, 0).unwrap();

        let zoned = ZonedTime::from_datetime(&instant);

        assert_eq!(zoned.abbreviation(), "");
        assert_eq!(format(&zoned, "MST"), "+0100");
    }
}
