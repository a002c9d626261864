use chrono::Utc;
use nongli::{CalendarOptions, ChineseCalendar, CivilDateTime, JulianDate, Time, CST, UT};
use tracing_subscriber::EnvFilter;

fn main() -> nongli::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let now_jd = JulianDate::from_utc(Utc::now());
    let now_ut: Time<UT> = now_jd.to::<UT>();
    let now_cst: Time<CST> = now_jd.to::<CST>();
    println!("JD(TT): {now_jd}");
    println!("UT: {now_ut}");

    let calendar = ChineseCalendar::new(CalendarOptions::default())?;
    let beijing = CivilDateTime::from_julian_day(Time::new(now_cst.value()))?;
    let info = calendar.day(&beijing)?;
    println!("Beijing: {}", info.civil);
    println!("Lunar: {}", info.lunar);
    println!("Pillars: {}", info.pillars);
    if let Some(term) = info.solar_term {
        println!("Solar term today: {term}");
    }

    println!("Leap month of {}: {}", info.lunar.year, calendar.leap_month(info.lunar.year)?);
    for (term, at) in calendar.year_solar_terms(beijing.year)? {
        println!("{term:>12}  {}", at.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}
