use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Julian date of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian date of J2000.0.
pub(crate) const J2000_JD: f64 = 2_451_545.0;

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// TT - UTC, valid for instants after the leap second at the end of 2016.
///
/// Heliographic geometry changes by well under an arcsecond per minute of time, so a fixed offset
/// is plenty for every quantity derived from it here.
const TT_MINUS_UTC_SECONDS: f64 = 69.184;

/// The instant at which a frame is observed.
///
/// This is a thin wrapper around a UTC [`DateTime`] that knows how to express itself in the
/// Julian day counts the solar theory is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObsTime(DateTime<Utc>);

impl ObsTime {
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// J2000.0, ie 2000-01-01T12:00:00 TT.
    ///
    /// Like the rest of this type, the TT/UTC distinction is handled with a fixed offset.
    #[must_use]
    pub fn j2000() -> Self {
        Self::from_julian_date(J2000_JD - TT_MINUS_UTC_SECONDS / SECONDS_PER_DAY)
    }

    /// Constructs the instant at the given UTC calendar date and time of day.
    ///
    /// Returns `None` if the fields do not name a valid instant.
    #[must_use]
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
    }

    /// Constructs the instant at the given (UTC-based) Julian date.
    #[must_use]
    pub fn from_julian_date(jd: f64) -> Self {
        let seconds = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round() as i64;
        // nanos may round up to a full second, which from_timestamp_nanos absorbs for us
        let total_nanos = (whole as i64) * 1_000_000_000 + nanos;
        Self(DateTime::from_timestamp_nanos(total_nanos))
    }

    #[must_use]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// The UTC-based Julian date of this instant.
    #[must_use]
    pub fn julian_date(&self) -> f64 {
        let seconds = self.0.timestamp() as f64 + f64::from(self.0.timestamp_subsec_nanos()) * 1e-9;
        UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
    }

    /// Days elapsed since J2000.0 on the TT scale.
    #[must_use]
    pub fn days_since_j2000(&self) -> f64 {
        self.julian_date() + TT_MINUS_UTC_SECONDS / SECONDS_PER_DAY - J2000_JD
    }

    /// Julian centuries elapsed since J2000.0 on the TT scale.
    #[must_use]
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / 36_525.0
    }

    /// Shifts the instant by a (possibly fractional, possibly negative) number of seconds.
    #[must_use]
    pub fn offset_by_seconds(&self, seconds: f64) -> Self {
        let nanos = (seconds * 1e9).round() as i64;
        Self(self.0 + chrono::Duration::nanoseconds(nanos))
    }
}

impl From<DateTime<Utc>> for ObsTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Display for ObsTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn j2000_is_zero_days_since_j2000() {
        assert_relative_eq!(ObsTime::j2000().days_since_j2000(), 0., epsilon = 1e-8);
    }

    #[rstest]
    #[case(1970, 1, 1, 0, UNIX_EPOCH_JD)]
    #[case(2000, 1, 1, 12, 2_451_545.0)]
    #[case(2017, 8, 21, 0, 2_457_986.5)]
    fn julian_date_of_calendar_dates(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] expected: f64,
    ) {
        let t = ObsTime::from_ymd_hms(year, month, day, hour, 0, 0).unwrap();
        assert_relative_eq!(t.julian_date(), expected, epsilon = 1e-9);
    }

    #[test]
    fn julian_date_survives_a_trip_through_chrono() {
        let jd = 2_459_000.123_456;
        assert_relative_eq!(ObsTime::from_julian_date(jd).julian_date(), jd, epsilon = 1e-8);
    }

    #[test]
    fn offset_by_seconds_moves_the_julian_date() {
        let t = ObsTime::from_ymd_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let later = t.offset_by_seconds(SECONDS_PER_DAY / 2.);
        assert_relative_eq!(later.julian_date() - t.julian_date(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn display_is_iso_like() {
        let t = ObsTime::from_ymd_hms(2011, 6, 7, 6, 33, 2).unwrap();
        insta::assert_snapshot!(t, @"2011-06-07T06:33:02.000");
    }
}
