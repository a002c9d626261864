// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Generic time–scale parameterised instant.
//!
//! [`Time<S>`] is the continuous Julian instant every solver in this crate
//! produces and consumes.  It stores a scalar quantity in [`Days`] whose
//! *meaning* is determined by the compile-time marker `S: TimeScale`:
//! dynamical time for the ephemeris formulas, Universal Time for civil
//! output, or the China Standard Time civil clock used for lunar month
//! boundaries.  The value itself carries no calendar semantics; the day
//! boundary sits at noon, as usual for Julian Days.

use chrono::{DateTime, FixedOffset, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time scales.
///
/// A **time scale** defines:
///
/// 1. A human-readable **label** (e.g. `"JD"`, `"UT"`, `"CST"`).
/// 2. A pair of conversion functions between the scale's native quantity
///    (in [`Days`]) and **Julian Date in TT** (JD(TT)), the canonical
///    representation of the ephemeris formulas.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale's native unit to an absolute JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert an absolute JD(TT) back to this scale's native quantity.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>: the generic instant
// ═══════════════════════════════════════════════════════════════════════════

/// A point on time scale `S`.
///
/// `PhantomData` is zero-sized, so `Time<S>` is layout-identical to `Days`
/// (a single `f64`).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw scalar (days since the scale's epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Midnight-based day index of this instant on its own scale.
    ///
    /// Julian Days start at noon; adding half a day before flooring yields
    /// the number of the civil day that contains the instant.  Two instants
    /// fall on the same civil day iff their day numbers are equal, which is
    /// how every month and term boundary in this crate is compared.
    #[inline]
    pub fn day_number(&self) -> i64 {
        (self.value() + 0.5).floor() as i64
    }

    /// Absolute Julian Day (TT) corresponding to this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd_tt(self.quantity)
    }

    /// Build an instant from an absolute Julian Day (TT).
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd_tt(jd))
    }

    /// Convert this instant to another time scale.
    ///
    /// The conversion routes through the canonical JD(TT) intermediate:
    ///
    /// ```text
    /// self → JD(TT) → target
    /// ```
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd_tt(self.quantity))
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Inverts the ΔT correction to recover the UT timestamp (UT and UTC are
    /// treated as equal).  Returns `None` if the value falls outside chrono's
    /// representable range.  Chrono is proleptic Gregorian, so instants
    /// before the 1582 reform come back on the Gregorian calendar; use
    /// [`CivilDateTime::from_julian_day`](crate::CivilDateTime::from_julian_day)
    /// for historical dates.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        use super::scales::UT;
        const UNIX_EPOCH_JD: f64 = 2_440_587.5;
        let jd_ut = self.to::<UT>().quantity();
        let seconds_since_epoch = (jd_ut - Days::new(UNIX_EPOCH_JD)).to::<Second>().value();
        let secs = seconds_since_epoch.floor() as i64;
        let nanos = ((seconds_since_epoch - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }

    /// Localize this instant to a fixed civil offset.
    ///
    /// This only affects *presentation*: lunar and sexagenary computations
    /// always run on the China Standard Time scale regardless of the offset
    /// a caller displays in.
    pub fn to_offset(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.to_utc().map(|utc| utc.with_timezone(&offset))
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// The UTC timestamp is interpreted as Universal Time and the ΔT
    /// correction is applied automatically when `S` lives on the TT axis.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        use super::scales::UT;
        const UNIX_EPOCH_JD: f64 = 2_440_587.5;
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let jd_ut = Days::new(UNIX_EPOCH_JD) + (seconds_since_epoch + nanos).to::<Day>();
        Time::<UT>::from_days(jd_ut).to::<S>()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<S: TimeScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl<S: TimeScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{CST, JD, UT};
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn day_number_is_midnight_based() {
        assert_eq!(Time::<JD>::new(2_451_545.0).day_number(), 2_451_545);
        assert_eq!(Time::<JD>::new(2_451_544.5).day_number(), 2_451_545);
        assert_eq!(Time::<JD>::new(2_451_544.499_9).day_number(), 2_451_544);
        assert_eq!(Time::<JD>::new(2_451_545.499_9).day_number(), 2_451_545);
    }

    #[test]
    fn utc_roundtrip() {
        let datetime = DateTime::from_timestamp(946_728_000, 0).unwrap();
        let jd = Time::<JD>::from_utc(datetime);
        let back = jd.to_utc().expect("to_utc");
        let delta_ns =
            back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
        assert!(delta_ns.abs() < 1_000, "roundtrip error: {} ns", delta_ns);
    }

    #[test]
    fn from_utc_applies_delta_t() {
        // 2000-01-01 12:00:00 UT; the polynomial ΔT model gives ≈63.9 s.
        let datetime = DateTime::from_timestamp(946_728_000, 0).unwrap();
        let jd = Time::<JD>::from_utc(datetime);
        let delta_t_secs = (jd.quantity() - Days::new(2_451_545.0)).to::<Second>();
        assert!(
            (delta_t_secs - Seconds::new(63.87)).abs() < Seconds::new(0.5),
            "ΔT correction = {} s",
            delta_t_secs
        );
    }

    #[test]
    fn to_offset_localizes_without_changing_the_instant() {
        let ut = Time::<UT>::new(2_451_545.0);
        let beijing = FixedOffset::east_opt(8 * 3600).unwrap();
        let local = ut.to_offset(beijing).expect("in range");
        assert_eq!(local.hour(), 20);
        let expected = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let drift = local.with_timezone(&Utc) - expected;
        assert!(drift.num_microseconds().unwrap().abs() < 1_000);
    }

    #[test]
    fn cst_is_eight_hours_ahead_of_ut() {
        let ut = Time::<UT>::new(2_460_000.0);
        let cst = ut.to::<CST>();
        assert!(((cst - Time::<CST>::new(2_460_000.0)) - Days::new(8.0 / 24.0)).abs() < Days::new(1e-7));
    }

    #[test]
    fn arithmetic_and_ordering() {
        let mut jd = Time::<JD>::new(2_451_545.0);
        jd += Days::new(1.0);
        assert_eq!(jd.quantity(), Days::new(2_451_546.0));
        jd -= Days::new(0.5);
        assert_eq!(jd.quantity(), Days::new(2_451_545.5));
        let later = jd + Days::new(2.0);
        assert_eq!(later - jd, Days::new(2.0));
        assert!(jd < later);
    }

    #[test]
    fn into_days() {
        let jd = Time::<JD>::new(2_451_547.5);
        let days: Days = jd.into();
        assert_eq!(days, 2_451_547.5);
        assert_eq!(Time::<JD>::from(days), jd);
    }

    #[test]
    fn display_uses_scale_label() {
        let s = format!("{}", Time::<CST>::new(2_451_545.0));
        assert!(s.starts_with("CST"));
    }
}
