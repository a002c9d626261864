// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use super::instant::Time;
use super::scales::JD;

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// First day of the Gregorian calendar, 1582-10-15T12:00:00
    /// (JD 2 299 161.0).  Earlier day numbers are Julian-calendar dates.
    pub const GREGORIAN_REFORM: Self = Self::new(2_299_161.0);

    /// One Julian year expressed in days.
    pub const JULIAN_YEAR: Days = Days::new(365.25);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// One Julian millennium expressed in days.
    pub const JULIAN_MILLENNIUM: Days = Days::new(365_250.0);

    /// Julian millennia since J2000.0 (orbital elements of the solar-term solver).
    #[inline]
    pub fn julian_millennia(&self) -> Millennia {
        Millennia::new(
            ((*self - Self::J2000) / Self::JULIAN_MILLENNIUM)
                .simplify()
                .value(),
        )
    }

    /// Julian centuries since J2000.0 (perturbation and lunar arguments).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Decimal year on the Julian-year grid anchored at J2000.0.
    ///
    /// Agrees with the civil year to within a few days for the whole
    /// supported range, which is all the ΔT polynomials need.
    #[inline]
    pub fn decimal_year(&self) -> f64 {
        2000.0 + ((*self - Self::J2000) / Self::JULIAN_YEAR).simplify().value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julian_conversions() {
        let jd = Time::<JD>::J2000 + Days::new(365_250.0);
        assert!((jd.julian_millennia() - Millennia::new(1.0)).abs() < Millennia::new(1e-12));
        assert!((jd.julian_centuries() - Centuries::new(10.0)).abs() < Centuries::new(1e-12));
        assert!((jd.decimal_year() - 3000.0).abs() < 1e-9);
    }
}
