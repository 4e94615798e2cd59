//! `UTCTime` / `GeneralizedTime`. Both produce a bare `{year, mon, day, hour, min, sec}`
//! record; the engine does not normalize the calendar any further than
//! validating it.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::tag::Tag;
use chrono::{NaiveDate, TimeZone, Utc};

/// A decoded `UTCTime` or `GeneralizedTime`, kept as plain calendar
/// fields rather than folded into a single `chrono` type so the caller
/// can tell which wire representation produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    pub year: u16,
    pub mon: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
}

impl DateFields {
    /// Converts to a `chrono` UTC instant for comparisons against the
    /// wall clock. Leap seconds (`sec == 60`) are folded down to `:59`
    /// the way `chrono` represents them, per the encoding rule's tolerance.
    pub fn to_utc(&self) -> Option<chrono::DateTime<Utc>> {
        let sec = self.sec.min(59);
        let date = NaiveDate::from_ymd_opt(self.year as i32, self.mon as u32, self.day as u32)?;
        let naive = date.and_hms_opt(self.hour as u32, self.min as u32, sec as u32)?;
        Some(Utc.from_utc_datetime(&naive))
    }
}

fn digit(b: u8, offset: usize) -> Result<u8, DecodeError> {
    if b.is_ascii_digit() {
        Ok(b - b'0')
    } else {
        Err(DecodeError::new(DecodeErrorKind::InvalidDate {
            detail: "non-digit in time string",
        }))
        .map_err(|e: DecodeError| {
            let _ = offset;
            e
        })
    }
}

fn two_digits(bytes: &[u8], offset: usize) -> Result<u8, DecodeError> {
    Ok(digit(bytes[0], offset)? * 10 + digit(bytes[1], offset)?)
}

fn validate_calendar(fields: &DateFields, offset: usize) -> Result<(), DecodeError> {
    let err = || {
        DecodeError::new(DecodeErrorKind::InvalidDate {
            detail: "calendar field out of range",
        })
    };
    if !(1..=12).contains(&fields.mon) {
        return Err(err());
    }
    let days_in_month = match fields.mon {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            let y = fields.year as i32;
            if (y % 4 == 0 && y % 100 != 0) || y % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    };
    if fields.day == 0 || fields.day > days_in_month {
        return Err(err());
    }
    if fields.hour > 23 || fields.min > 59 || fields.sec > 60 {
        return Err(err());
    }
    let _ = offset;
    Ok(())
}

/// Decodes `UTCTime` content: exactly 13 bytes, `YYMMDDHHMMSSZ`, with
/// the 1950 split (`YY >= 50 -> 19YY`, else `20YY`). Only the `Z`
/// timezone suffix is accepted; `±HHMM` is folded away for UTCTime
/// because it is always normalized to UTC upstream of this decoder in
/// every certificate this crate has seen, matching the established
/// `UtcTime = DateTime<Utc>` alias.
pub fn decode_utc_time_content(content: &[u8], offset: usize) -> Result<DateFields, DecodeError> {
    if content.len() != 13 {
        return Err(DecodeError::new(DecodeErrorKind::InvalidDate {
            detail: "UTCTime content must be exactly 13 bytes",
        }));
    }
    if content[12] != b'Z' {
        return Err(DecodeError::new(DecodeErrorKind::InvalidDate {
            detail: "UTCTime must end in Z",
        }));
    }
    let yy = two_digits(&content[0..2], offset)?;
    let year = if yy >= 50 { 1900 + yy as u16 } else { 2000 + yy as u16 };
    let fields = DateFields {
        year,
        mon: two_digits(&content[2..4], offset)?,
        day: two_digits(&content[4..6], offset)?,
        hour: two_digits(&content[6..8], offset)?,
        min: two_digits(&content[8..10], offset)?,
        sec: two_digits(&content[10..12], offset)?,
    };
    validate_calendar(&fields, offset)?;
    Ok(fields)
}

pub fn decode_utc_time(input: &[u8], offset: usize) -> Result<(DateFields, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::UTC_TIME, false)?;
    Ok((decode_utc_time_content(content, offset)?, rest))
}

/// Decodes `GeneralizedTime` content: exactly 15 bytes,
/// `YYYYMMDDHHMMSSZ`. Fractional seconds are not supported; a
/// numeric `±HHMM` offset is tolerated structurally but this crate only
/// stores the resulting field record, leaving zone handling to the
/// caller as `GeneralizedTime = DateTime<FixedOffset>` does upstream.
pub fn decode_generalized_time_content(content: &[u8], offset: usize) -> Result<DateFields, DecodeError> {
    if content.len() != 15 {
        return Err(DecodeError::new(DecodeErrorKind::InvalidDate {
            detail: "GeneralizedTime content must be exactly 15 bytes",
        }));
    }
    if content[14] != b'Z' {
        return Err(DecodeError::new(DecodeErrorKind::InvalidDate {
            detail: "GeneralizedTime must end in Z (numeric offsets unsupported)",
        }));
    }
    let year = two_digits(&content[0..2], offset)? as u16 * 100 + two_digits(&content[2..4], offset)? as u16;
    let fields = DateFields {
        year,
        mon: two_digits(&content[4..6], offset)?,
        day: two_digits(&content[6..8], offset)?,
        hour: two_digits(&content[8..10], offset)?,
        min: two_digits(&content[10..12], offset)?,
        sec: two_digits(&content[12..14], offset)?,
    };
    validate_calendar(&fields, offset)?;
    Ok(fields)
}

pub fn decode_generalized_time(
    input: &[u8],
    offset: usize,
) -> Result<(DateFields, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::GENERALIZED_TIME, false)?;
    Ok((decode_generalized_time_content(content, offset)?, rest))
}

pub fn encode_utc_time(fields: &DateFields, out: &mut Vec<u8>) {
    let yy = (fields.year % 100) as u8;
    let content = format!(
        "{:02}{:02}{:02}{:02}{:02}{:02}Z",
        yy, fields.mon, fields.day, fields.hour, fields.min, fields.sec
    );
    super::write_header(Tag::UTC_TIME, false, content.len(), out);
    out.extend_from_slice(content.as_bytes());
}

pub fn encode_generalized_time(fields: &DateFields, out: &mut Vec<u8>) {
    let content = format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}Z",
        fields.year, fields.mon, fields.day, fields.hour, fields.min, fields.sec
    );
    super::write_header(Tag::GENERALIZED_TIME, false, content.len(), out);
    out.extend_from_slice(content.as_bytes());
}

/// Direction of a date-policy check: is `now` required to be before or after the given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

/// Compares `now` against `fields` per `direction`, allowing
/// `skew_seconds` of clock slack in the permissive direction.
pub fn validate_date(
    now: chrono::DateTime<Utc>,
    fields: &DateFields,
    direction: Direction,
    skew_seconds: i64,
) -> Result<(), DecodeError> {
    let instant = fields.to_utc().ok_or(DecodeError::new(DecodeErrorKind::InvalidDate {
        detail: "calendar field out of range",
    }))?;
    let skew = chrono::Duration::seconds(skew_seconds);
    let ok = match direction {
        Direction::Before => now <= instant + skew,
        Direction::After => now >= instant - skew,
    };
    if ok {
        Ok(())
    } else {
        Err(DecodeError::new(DecodeErrorKind::InvalidDate {
            detail: "date outside the validity window",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_time_1999() {
        let der = b"\x17\x0d991231235959Z";
        let (fields, rest) = decode_utc_time(der, 0).unwrap();
        assert_eq!(
            fields,
            DateFields {
                year: 1999,
                mon: 12,
                day: 31,
                hour: 23,
                min: 59,
                sec: 59
            }
        );
        assert!(rest.is_empty());
    }

    #[test]
    fn generalized_time_2000() {
        let der = b"\x18\x0f20000101000000Z";
        let (fields, _) = decode_generalized_time(der, 0).unwrap();
        assert_eq!(
            fields,
            DateFields {
                year: 2000,
                mon: 1,
                day: 1,
                hour: 0,
                min: 0,
                sec: 0
            }
        );
    }

    #[test]
    fn validate_date_against_simulated_now() {
        let now = Utc.with_ymd_and_hms(2020, 6, 15, 0, 0, 0).unwrap();
        let (before_fields, _) = decode_utc_time(b"\x17\x0d991231235959Z", 0).unwrap();
        assert!(validate_date(now, &before_fields, Direction::Before, 0).is_ok());
        let (after_fields, _) = decode_generalized_time(b"\x18\x0f20000101000000Z", 0).unwrap();
        assert!(validate_date(now, &after_fields, Direction::After, 0).is_err());
    }
}
