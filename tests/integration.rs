use chrono::DateTime;
use nongli::{
    delta_t, gregorian_to_lunar, leap_month, lunar_days, lunar_to_gregorian, new_moon,
    sexagenary, solar_term, CalendarOptions, ChineseCalendar, CivilDateTime, JulianDate,
    LunarDate, LunarWindow, SexagenaryPair, Time, CST, JD, UT,
};
use qtty::{Day, Seconds};

#[test]
fn j2000_and_reform_constants() {
    let j2000 = CivilDateTime::new(2000, 1, 1, 12, 0, 0, 0).unwrap();
    assert_eq!(j2000.to_julian_day().unwrap(), JulianDate::J2000);

    let reform = CivilDateTime::new(1582, 10, 15, 12, 0, 0, 0).unwrap();
    assert_eq!(reform.to_julian_day().unwrap().value(), 2_299_161.0);
}

#[test]
fn utc_roundtrip_j2000_is_stable() {
    let datetime = DateTime::from_timestamp(946_728_000, 0).unwrap();
    let jd = JulianDate::from_utc(datetime);
    let back = jd.to_utc().expect("to_utc");
    let delta_ns = back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
    assert!(delta_ns.abs() < 1_000);
}

#[test]
fn ut_applies_delta_t_near_j2000() {
    let ut = Time::<UT>::new(2_451_545.0);
    let jd: JulianDate = ut.to::<JD>();
    let offset_s = (jd.quantity() - ut.quantity()).to::<Day>().to::<qtty::Second>();
    assert!((offset_s - Seconds::new(63.87)).abs() < Seconds::new(1.0));
    assert!((delta_t::delta_t_seconds(2000, 1.0).unwrap() - offset_s).abs() < Seconds::new(0.1));
}

#[test]
fn lunar_new_year_2023() {
    assert_eq!(
        gregorian_to_lunar(2023, 1, 22).unwrap(),
        LunarDate::new(2023, 1, 1, false)
    );
}

#[test]
fn leap_second_month_of_2023() {
    let window = LunarWindow::build(2023).unwrap();
    let leap_codes: Vec<f64> = window
        .codes()
        .iter()
        .filter(|c| c.is_leap())
        .map(|c| c.value())
        .collect();
    assert_eq!(leap_codes, vec![3.5]);
    assert_eq!(leap_month(2023).unwrap(), 2);
    assert_eq!(
        lunar_to_gregorian(LunarDate::new(2023, 2, 1, true)).unwrap(),
        CivilDateTime::date(2023, 3, 22).unwrap()
    );
}

#[test]
fn spring_festival_dates() {
    for (year, month, day) in [
        (1900, 1, 31),
        (1949, 1, 29),
        (2000, 2, 5),
        (2008, 2, 7),
        (2024, 2, 10),
        (2025, 1, 29),
    ] {
        assert_eq!(
            gregorian_to_lunar(year, month, day).unwrap(),
            LunarDate::new(year, 1, 1, false),
            "{year}-{month}-{day}"
        );
        let eve = CivilDateTime::date(year, month, day).unwrap().day_number() - 1;
        let eve = CivilDateTime::from_julian_day(Time::new(eve as f64)).unwrap();
        let lunar_eve = gregorian_to_lunar(eve.year, eve.month, eve.day).unwrap();
        assert_eq!((lunar_eve.year, lunar_eve.month), (year - 1, 12));
    }
}

#[test]
fn new_moons_of_a_window_are_lunar_first_days() {
    let window = LunarWindow::build(2024).unwrap();
    for moon in &window.new_moons()[..15] {
        let civil = CivilDateTime::from_julian_day(Time::new(moon.day_number() as f64)).unwrap();
        let lunar = gregorian_to_lunar(civil.year, civil.month, civil.day).unwrap();
        assert_eq!(lunar.day, 1, "{civil}");
    }
}

#[test]
fn true_new_moon_lies_near_mean_phase() {
    let k = new_moon::reference_synodic_month_index(JulianDate::J2000);
    for offset in 0..24 {
        let mean = new_moon::mean_time_of_phase(k + offset);
        let true_moon = new_moon::true_new_moon(k + offset);
        assert!((true_moon - mean).value().abs() < 0.75);
    }
}

#[test]
fn solar_terms_on_the_beijing_clock() {
    let terms = solar_term::year_solar_terms(2024).unwrap();
    let (_, lichun) = terms
        .iter()
        .find(|(term, _)| *term == solar_term::SolarTerm::Lichun)
        .copied()
        .unwrap();
    let beijing: Time<CST> = lichun.to::<CST>();
    let civil = CivilDateTime::from_julian_day(Time::new(beijing.value())).unwrap();
    assert_eq!((civil.year, civil.month, civil.day), (2024, 2, 4));
}

#[test]
fn sexagenary_reference_days() {
    // 1949-10-01 is a Jiazi day.
    let p = sexagenary::cycle(1949, 10, 1, 15, 0, 0, false).unwrap();
    assert_eq!(p.day, SexagenaryPair::from_index(0));
    // 2024 is a Jiachen (Dragon) year from Lichun on.
    let p = sexagenary::cycle(2024, 6, 1, 12, 0, 0, false).unwrap();
    assert_eq!(p.year.to_string(), "Jiachen");
    assert_eq!(sexagenary::ANIMALS[usize::from(p.year.zodiac_animal())], "Dragon");
}

#[test]
fn engine_matches_free_functions_across_a_year() {
    let calendar = ChineseCalendar::new(CalendarOptions::default()).unwrap();
    let mut day = CivilDateTime::date(2033, 1, 1).unwrap().day_number();
    let end = CivilDateTime::date(2034, 1, 1).unwrap().day_number();
    while day < end {
        let noon = CivilDateTime::from_julian_day(Time::new(day as f64)).unwrap();
        let midnight = CivilDateTime::date(noon.year, noon.month, noon.day).unwrap();
        let cached = calendar.gregorian_to_lunar(noon.year, noon.month, noon.day).unwrap();
        assert_eq!(cached, gregorian_to_lunar(noon.year, noon.month, noon.day).unwrap());
        assert_eq!(calendar.lunar_to_gregorian(cached).unwrap(), midnight);
        assert_eq!(midnight.day_number(), day);
        day += 1;
    }
    assert!(calendar.cache().len() <= 3);
}

#[test]
fn month_lengths_sum_to_year_length() {
    for year in [1900, 2023, 2033] {
        let leap = leap_month(year).unwrap();
        let mut total = 0;
        for month in 1..=12 {
            total += lunar_days(year, month, false).unwrap();
            if month == leap {
                total += lunar_days(year, month, true).unwrap();
            }
        }
        let first = lunar_to_gregorian(LunarDate::new(year, 1, 1, false)).unwrap();
        let next = lunar_to_gregorian(LunarDate::new(year + 1, 1, 1, false)).unwrap();
        assert_eq!(i64::from(total), next.day_number() - first.day_number(), "{year}");
    }
}

#[cfg(feature = "serde")]
#[test]
fn serde_roundtrip_of_results() {
    let info = ChineseCalendar::default()
        .day(&CivilDateTime::new(2023, 1, 22, 9, 0, 0, 0).unwrap())
        .unwrap();
    let json = serde_json::to_string(&info).unwrap();
    let back: nongli::DayInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);

    let jd = Time::<JD>::new(2_451_545.25);
    let json = serde_json::to_string(&jd).unwrap();
    assert_eq!(json, "2451545.25");
}
