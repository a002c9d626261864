use nongli::{
    gregorian_to_lunar, lunar_days, lunar_to_gregorian, new_moon, sexagenary, solar_term,
    CivilDateTime, LunarWindow, SexagenaryPair, Time,
};
use proptest::prelude::*;

// -1000-01-01 (Julian) .. 3000-12-31
const FIRST_DAY: i64 = 1_355_808;
const LAST_DAY: i64 = 2_817_152;

fn civil_day(day_number: i64) -> CivilDateTime {
    CivilDateTime::from_julian_day(Time::new(day_number as f64)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn civil_julian_day_roundtrip(jd in 0.0f64..5_373_000.0) {
        let civil = CivilDateTime::from_julian_day(Time::new(jd)).unwrap();
        let back = civil.to_julian_day().unwrap();
        prop_assert!((back.value() - jd).abs() < 2e-8, "{civil}: {jd} -> {}", back.value());
    }

    #[test]
    fn civil_day_number_roundtrip(day_number in 0i64..5_373_000) {
        let civil = civil_day(day_number);
        prop_assert_eq!(civil.day_number(), day_number);
        let midnight = CivilDateTime::date(civil.year, civil.month, civil.day).unwrap();
        prop_assert_eq!(midnight.day_number(), day_number);
        prop_assert_eq!(civil.hour, 12);
    }

    #[test]
    fn lunar_date_roundtrip(day_number in FIRST_DAY..LAST_DAY) {
        let civil = civil_day(day_number);
        let lunar = gregorian_to_lunar(civil.year, civil.month, civil.day).unwrap();
        prop_assert!((1..=12).contains(&lunar.month));
        let length = lunar_days(lunar.year, lunar.month, lunar.leap).unwrap();
        prop_assert!(length == 29 || length == 30);
        prop_assert!(lunar.day >= 1 && lunar.day <= length);
        prop_assert_eq!(lunar_to_gregorian(lunar).unwrap().day_number(), day_number);
    }

    #[test]
    fn day_pillar_advances_daily(day_number in FIRST_DAY..LAST_DAY) {
        let today = civil_day(day_number);
        let tomorrow = civil_day(day_number + 1);
        let a = sexagenary::cycle(today.year, today.month, today.day, 12, 0, 0, false).unwrap();
        let b = sexagenary::cycle(tomorrow.year, tomorrow.month, tomorrow.day, 12, 0, 0, false)
            .unwrap();
        prop_assert_eq!((a.day.index() + 1) % 60, b.day.index());
    }

    #[test]
    fn windows_hold_at_most_one_leap_month(year in -1001i32..=3000) {
        let window = LunarWindow::build(year).unwrap();
        let leaps = window.codes().iter().filter(|c| c.is_leap()).count();
        prop_assert!(leaps <= 1, "{year}: {leaps} leap months");
        prop_assert!(window.month_lengths().iter().all(|&n| n == 29 || n == 30), "{year}");
        prop_assert!(window.leap_month() <= 12);
    }

    #[test]
    fn sexagenary_pair_components(index in 0u32..60) {
        let pair = SexagenaryPair::from_index(index);
        prop_assert_eq!(u32::from(pair.stem()), index % 10);
        prop_assert_eq!(u32::from(pair.branch()), index % 12);
        prop_assert_eq!(SexagenaryPair::new(pair.stem(), pair.branch()), Some(pair));
    }

    #[test]
    fn lunations_stay_near_synodic_length(k in -37_000i64..12_000) {
        let gap = new_moon::true_new_moon(k + 1) - new_moon::true_new_moon(k);
        prop_assert!(gap.value() > 29.2 && gap.value() < 29.9, "lunation {k}: {}", gap.value());
    }

    #[test]
    fn solar_terms_are_ordered(year in -1000i32..=3000) {
        let terms = solar_term::year_solar_terms(year).unwrap();
        prop_assert_eq!(terms.len(), solar_term::TERMS_PER_TABLE);
        for pair in terms.windows(2) {
            let gap = (pair[1].1 - pair[0].1).value();
            prop_assert!(gap > 14.0 && gap < 16.5, "{year} {}: {gap}", pair[1].0);
            prop_assert_eq!(pair[1].0, solar_term::SolarTerm::from_index(pair[0].0.index() + 1));
        }
    }
}
