use chrono::{Datelike, Local, NaiveDate, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "DD-MM" (one or two digits each) at the very start of the title
    static ref LEADING_DATE_REGEX: Regex = Regex::new(r"^([0-9]{1,2})-([0-9]{1,2})").unwrap();
}

/// Parse a leading `D-M` / `DD-MM` date from an event title, in the current year.
///
/// Returns `None` when the title does not start with a date or when the
/// day/month pair is not a real calendar date this year.
pub fn parse_leading_date(title: &str) -> Option<NaiveDate> {
    parse_leading_date_in_year(title, Local::now().year())
}

/// Same as [`parse_leading_date`] with an explicit year.
pub fn parse_leading_date_in_year(title: &str, year: i32) -> Option<NaiveDate> {
    let caps = LEADING_DATE_REGEX.captures(title)?;

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Portuguese day name, as shown on the retailer's site.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}
