//! Conversions between the human-editable and on-disk encodings.
//!
//! GPS coordinates live on disk as three unsigned rationals
//! (degrees/minutes/seconds, "DMS") and are edited as decimal degrees;
//! timestamps live on disk as a single text tag and are edited as a
//! date/time pair. Both conversions are pure functions with no locale
//! dependence, usable without touching the codec.
//!
//! Precision: [`rational_from_degrees`] truncates seconds to two decimal
//! digits (numerator scaled by 100 over denominator 100). That bound is
//! roughly 0.01 arc-seconds, or 0.3 m on the ground, and is intentional —
//! a decode/encode/decode cycle recovers coordinates to within that bound,
//! not exactly.

use chrono::NaiveDateTime;

use crate::error::{MetadataError, Result};
use crate::record::Timestamp;

/// On-disk representation of one angular value: (numerator, denominator)
/// pairs for degrees, minutes, and seconds.
///
/// Exists only transiently during decode/encode; editors always see decimal
/// degrees. The on-disk convention is unsigned — sign (hemisphere) handling
/// is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalCoordinate {
    pub degrees: (u32, u32),
    pub minutes: (u32, u32),
    pub seconds: (u32, u32),
}

/// Converts an on-disk DMS rational triple to decimal degrees.
///
/// A missing triple yields `Ok(None)`. A denominator of zero is undefined
/// input — a conforming encoder never produces one — and is reported as a
/// format error rather than divided by.
pub fn degrees_from_rational(triple: Option<RationalCoordinate>) -> Result<Option<f64>> {
    let Some(t) = triple else {
        return Ok(None);
    };

    for (_, den) in [t.degrees, t.minutes, t.seconds] {
        if den == 0 {
            return Err(MetadataError::Format(
                "zero denominator in GPS rational".into(),
            ));
        }
    }

    let degrees = t.degrees.0 as f64 / t.degrees.1 as f64;
    let minutes = t.minutes.0 as f64 / t.minutes.1 as f64;
    let seconds = t.seconds.0 as f64 / t.seconds.1 as f64;

    Ok(Some(degrees + minutes / 60.0 + seconds / 3600.0))
}

/// Converts a decimal-degree magnitude to the on-disk DMS rational triple.
///
/// Degrees and minutes are exact integers over denominator 1; seconds are
/// truncated to two decimal digits (numerator over denominator 100). The
/// value must be a finite non-negative magnitude — callers strip the sign
/// first, matching the unsigned on-disk convention.
pub fn rational_from_degrees(value: f64) -> RationalCoordinate {
    let degrees = value.trunc();
    let minutes = ((value - degrees) * 60.0).trunc();
    let seconds = (value - degrees - minutes / 60.0) * 3600.0;

    RationalCoordinate {
        degrees: (degrees as u32, 1),
        minutes: (minutes as u32, 1),
        seconds: ((seconds * 100.0) as u32, 100),
    }
}

/// Parses a timestamp text tag into its date and time halves.
///
/// Two layouts are accepted: `YYYY-MM-DD HH:MM:SS` (a previously normalized
/// value round-tripping through the editor) and `YYYY:MM:DD HH:MM:SS` (the
/// EXIF on-disk convention). The returned date is always hyphenated.
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y:%m:%d %H:%M:%S"))
        .map_err(|_| MetadataError::Format(format!("unrecognized timestamp layout: {text:?}")))?;

    Ok(Timestamp {
        date: parsed.format("%Y-%m-%d").to_string(),
        time: parsed.format("%H:%M:%S").to_string(),
    })
}

/// Joins a date/time pair back into a single text tag value.
///
/// No validation: the editing collaborator vouches for the halves before
/// encode is called.
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    format!("{} {}", timestamp.date, timestamp.time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(d: u32, m: u32, s_num: u32, s_den: u32) -> RationalCoordinate {
        RationalCoordinate {
            degrees: (d, 1),
            minutes: (m, 1),
            seconds: (s_num, s_den),
        }
    }

    #[test]
    fn absent_triple_is_absent_degrees() {
        assert_eq!(degrees_from_rational(None).unwrap(), None);
    }

    #[test]
    fn zero_denominator_is_a_format_error() {
        let bad = RationalCoordinate {
            degrees: (52, 1),
            minutes: (31, 0),
            seconds: (1200, 100),
        };
        assert!(matches!(
            degrees_from_rational(Some(bad)),
            Err(MetadataError::Format(_))
        ));
    }

    #[test]
    fn berlin_encodes_to_exact_integer_triple() {
        // 52.5200° → 52° 31' 12.00"
        let dms = rational_from_degrees(52.5200);
        assert_eq!(dms.degrees, (52, 1));
        assert_eq!(dms.minutes, (31, 1));
        assert_eq!(dms.seconds, (1200, 100));
    }

    #[test]
    fn degrees_minutes_use_denominator_one() {
        let dms = rational_from_degrees(2.3522);
        assert_eq!(dms.degrees.1, 1);
        assert_eq!(dms.minutes.1, 1);
        assert_eq!(dms.seconds.1, 100);
    }

    #[test]
    fn dms_round_trip_stays_within_precision_bound() {
        // Truncating seconds to 0.01" bounds the error by 1.5e-3 degrees.
        for i in 0..1800 {
            let v = i as f64 * 0.1;
            let back = degrees_from_rational(Some(rational_from_degrees(v)))
                .unwrap()
                .unwrap();
            assert!(
                (back - v).abs() < 1.5e-3,
                "round-trip drift too large for {v}: got {back}"
            );
        }
    }

    #[test]
    fn known_triple_decodes() {
        let v = degrees_from_rational(Some(triple(48, 51, 2376, 100)))
            .unwrap()
            .unwrap();
        assert!((v - 48.8566).abs() < 1e-9);
    }

    #[test]
    fn parses_exif_colon_layout() {
        let ts = parse_timestamp("2023:07:04 10:15:30").unwrap();
        assert_eq!(ts.date, "2023-07-04");
        assert_eq!(ts.time, "10:15:30");
    }

    #[test]
    fn parses_normalized_hyphen_layout() {
        let ts = parse_timestamp("2023-07-04 10:15:30").unwrap();
        assert_eq!(ts.date, "2023-07-04");
        assert_eq!(ts.time, "10:15:30");
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(matches!(
            parse_timestamp("04/07/2023"),
            Err(MetadataError::Format(_))
        ));
        assert!(matches!(parse_timestamp(""), Err(MetadataError::Format(_))));
    }

    #[test]
    fn format_is_plain_concatenation() {
        let ts = Timestamp::new("2024-01-01", "00:00:00");
        assert_eq!(format_timestamp(&ts), "2024-01-01 00:00:00");
        // No validation by design; garbage passes through untouched.
        let odd = Timestamp::new("not-a-date", "later");
        assert_eq!(format_timestamp(&odd), "not-a-date later");
    }

    #[test]
    fn timestamp_survives_parse_format_cycle() {
        let ts = parse_timestamp("2024:01:01 00:00:00").unwrap();
        let text = format_timestamp(&ts);
        assert_eq!(parse_timestamp(&text).unwrap(), ts);
    }
}
