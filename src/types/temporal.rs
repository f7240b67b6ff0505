//! Date-time and interval values
//!
//! Two SQL interval classes are kept apart: day-to-second intervals are
//! an exact microsecond count, year-to-month intervals are a month
//! count. Date-time arithmetic goes through chrono so calendar rules
//! (month lengths, leap days) are honored.

use crate::error::{Error, Result};
use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

/// An exact day-to-second interval, stored as total microseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct DaySecondInterval {
    micros: i64,
}

impl DaySecondInterval {
    pub fn from_micros(micros: i64) -> DaySecondInterval {
        DaySecondInterval { micros }
    }

    pub fn from_parts(days: i64, hours: i64, minutes: i64, seconds: i64, micros: i64) -> Option<Self> {
        let total = days
            .checked_mul(MICROS_PER_DAY)?
            .checked_add(hours.checked_mul(MICROS_PER_HOUR)?)?
            .checked_add(minutes.checked_mul(MICROS_PER_MINUTE)?)?
            .checked_add(seconds.checked_mul(MICROS_PER_SECOND)?)?
            .checked_add(micros)?;
        Some(DaySecondInterval { micros: total })
    }

    pub fn micros(&self) -> i64 {
        self.micros
    }

    pub fn to_duration(&self) -> Duration {
        Duration::microseconds(self.micros)
    }

    pub fn negate(&self) -> Result<DaySecondInterval> {
        self.micros
            .checked_neg()
            .map(DaySecondInterval::from_micros)
            .ok_or_else(|| Error::InvalidValue("interval overflow".into()))
    }

    pub fn add(&self, other: &DaySecondInterval) -> Result<DaySecondInterval> {
        self.micros
            .checked_add(other.micros)
            .map(DaySecondInterval::from_micros)
            .ok_or_else(|| Error::InvalidValue("interval overflow".into()))
    }

    pub fn subtract(&self, other: &DaySecondInterval) -> Result<DaySecondInterval> {
        self.micros
            .checked_sub(other.micros)
            .map(DaySecondInterval::from_micros)
            .ok_or_else(|| Error::InvalidValue("interval overflow".into()))
    }

    /// Canonical `[-]D HH:MM:SS.ffffff` form.
    pub fn to_text(&self) -> String {
        let total = i128::from(self.micros);
        let sign = if total < 0 { "-" } else { "" };
        let abs = total.unsigned_abs();
        let days = abs / MICROS_PER_DAY as u128;
        let hours = abs / MICROS_PER_HOUR as u128 % 24;
        let minutes = abs / MICROS_PER_MINUTE as u128 % 60;
        let seconds = abs / MICROS_PER_SECOND as u128 % 60;
        let micros = abs % MICROS_PER_SECOND as u128;
        format!(
            "{}{} {:02}:{:02}:{:02}.{:06}",
            sign, days, hours, minutes, seconds, micros
        )
    }
}

impl FromStr for DaySecondInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let bad = || Error::InvalidValue(format!("invalid day-second interval {:?}", text));
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (days_part, time_part) = rest.split_once(' ').ok_or_else(bad)?;
        let days: i64 = days_part.parse().map_err(|_| bad())?;
        let mut clock = time_part.split(':');
        let hours: i64 = clock.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let minutes: i64 = clock.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let seconds_part = clock.next().ok_or_else(bad)?;
        if clock.next().is_some() {
            return Err(bad());
        }
        let (seconds_text, micros) = match seconds_part.split_once('.') {
            Some((whole, frac)) => {
                if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(bad());
                }
                let mut padded = frac.to_string();
                while padded.len() < 6 {
                    padded.push('0');
                }
                (whole, padded.parse::<i64>().map_err(|_| bad())?)
            }
            None => (seconds_part, 0),
        };
        let seconds: i64 = seconds_text.parse().map_err(|_| bad())?;
        let interval =
            DaySecondInterval::from_parts(days, hours, minutes, seconds, micros).ok_or_else(bad)?;
        if negative { interval.negate() } else { Ok(interval) }
    }
}

impl fmt::Display for DaySecondInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// A calendar year-to-month interval, stored as total months.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct YearMonthInterval {
    months: i32,
}

impl YearMonthInterval {
    pub fn from_months(months: i32) -> YearMonthInterval {
        YearMonthInterval { months }
    }

    pub fn months(&self) -> i32 {
        self.months
    }

    pub fn negate(&self) -> Result<YearMonthInterval> {
        self.months
            .checked_neg()
            .map(YearMonthInterval::from_months)
            .ok_or_else(|| Error::InvalidValue("interval overflow".into()))
    }

    pub fn add(&self, other: &YearMonthInterval) -> Result<YearMonthInterval> {
        self.months
            .checked_add(other.months)
            .map(YearMonthInterval::from_months)
            .ok_or_else(|| Error::InvalidValue("interval overflow".into()))
    }

    pub fn subtract(&self, other: &YearMonthInterval) -> Result<YearMonthInterval> {
        self.months
            .checked_sub(other.months)
            .map(YearMonthInterval::from_months)
            .ok_or_else(|| Error::InvalidValue("interval overflow".into()))
    }

    /// Canonical `[-]Y-MM` form.
    pub fn to_text(&self) -> String {
        let sign = if self.months < 0 { "-" } else { "" };
        let abs = self.months.unsigned_abs();
        format!("{}{}-{:02}", sign, abs / 12, abs % 12)
    }
}

impl FromStr for YearMonthInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let bad = || Error::InvalidValue(format!("invalid year-month interval {:?}", text));
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (years_part, months_part) = rest.split_once('-').ok_or_else(bad)?;
        let years: i32 = years_part.parse().map_err(|_| bad())?;
        let months: i32 = months_part.parse().map_err(|_| bad())?;
        if months >= 12 {
            return Err(bad());
        }
        let total = years
            .checked_mul(12)
            .and_then(|y| y.checked_add(months))
            .ok_or_else(bad)?;
        let interval = YearMonthInterval::from_months(total);
        if negative { interval.negate() } else { Ok(interval) }
    }
}

impl fmt::Display for YearMonthInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

fn out_of_range() -> Error {
    Error::InvalidValue("timestamp out of range".into())
}

pub fn datetime_add_day_second(
    ts: NaiveDateTime,
    interval: &DaySecondInterval,
) -> Result<NaiveDateTime> {
    ts.checked_add_signed(interval.to_duration())
        .ok_or_else(out_of_range)
}

pub fn datetime_sub_day_second(
    ts: NaiveDateTime,
    interval: &DaySecondInterval,
) -> Result<NaiveDateTime> {
    ts.checked_sub_signed(interval.to_duration())
        .ok_or_else(out_of_range)
}

pub fn datetime_add_year_month(
    ts: NaiveDateTime,
    interval: &YearMonthInterval,
) -> Result<NaiveDateTime> {
    let months = interval.months();
    if months >= 0 {
        ts.checked_add_months(Months::new(months as u32))
    } else {
        ts.checked_sub_months(Months::new(months.unsigned_abs()))
    }
    .ok_or_else(out_of_range)
}

pub fn datetime_sub_year_month(
    ts: NaiveDateTime,
    interval: &YearMonthInterval,
) -> Result<NaiveDateTime> {
    datetime_add_year_month(ts, &interval.negate()?)
}

/// `a - b` as an exact day-to-second interval.
pub fn datetime_difference(a: NaiveDateTime, b: NaiveDateTime) -> Result<DaySecondInterval> {
    (a - b)
        .num_microseconds()
        .map(DaySecondInterval::from_micros)
        .ok_or_else(|| Error::InvalidValue("interval overflow".into()))
}

/// Canonical date-time text; round-trips through [`parse_datetime`].
pub fn format_datetime(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

pub fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| Error::InvalidValue(format!("invalid timestamp literal {:?}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_second_round_trip() {
        let iv = DaySecondInterval::from_parts(3, 4, 5, 6, 7).unwrap();
        assert_eq!(iv.to_text(), "3 04:05:06.000007");
        assert_eq!(iv.to_text().parse::<DaySecondInterval>().unwrap(), iv);
        let neg = iv.negate().unwrap();
        assert_eq!(neg.to_text().parse::<DaySecondInterval>().unwrap(), neg);
    }

    #[test]
    fn test_year_month_round_trip() {
        let iv = YearMonthInterval::from_months(15);
        assert_eq!(iv.to_text(), "1-03");
        assert_eq!(iv.to_text().parse::<YearMonthInterval>().unwrap(), iv);
        let neg = iv.negate().unwrap();
        assert_eq!(neg.to_text(), "-1-03");
        assert_eq!(neg.to_text().parse::<YearMonthInterval>().unwrap(), neg);
    }

    #[test]
    fn test_calendar_arithmetic_clamps() {
        let ts = parse_datetime("2024-01-31 12:00:00").unwrap();
        let one_month = YearMonthInterval::from_months(1);
        let shifted = datetime_add_year_month(ts, &one_month).unwrap();
        assert_eq!(format_datetime(&shifted), "2024-02-29 12:00:00");
    }

    #[test]
    fn test_datetime_difference() {
        let a = parse_datetime("2024-03-02 00:00:01.5").unwrap();
        let b = parse_datetime("2024-03-01 00:00:00").unwrap();
        let diff = datetime_difference(a, b).unwrap();
        assert_eq!(diff.to_text(), "1 00:00:01.500000");
    }
}
