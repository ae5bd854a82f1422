use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Date format accepted from chat input, e.g. `24.12.2026`
pub const DATE_FORMAT: &str = "%d.%m.%Y";
/// Time format accepted from chat input, e.g. `09:30`
pub const TIME_FORMAT: &str = "%H:%M";
/// Sortable form stored alongside each reminder
pub const FIRE_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn parse_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).ok()
}

/// Combines chat-supplied date and time into the stored `fire_at` key.
pub fn fire_at(date: &str, time: &str) -> Option<String> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Some(NaiveDateTime::new(date, time).format(FIRE_AT_FORMAT).to_string())
}

/// A date is valid when it parses and is not before `now`'s day.
pub fn valid_date_at(date: &str, now: NaiveDateTime) -> bool {
    parse_date(date).is_some_and(|d| d >= now.date())
}

/// A time is valid when it parses and, for a reminder on `now`'s day,
/// is not earlier than the current minute.
pub fn valid_time_at(time: &str, date: &str, now: NaiveDateTime) -> bool {
    let Some(time) = parse_time(time) else {
        return false;
    };

    match parse_date(date) {
        Some(day) if day == now.date() => {
            let current_minute = now.format(TIME_FORMAT).to_string();
            time.format(TIME_FORMAT).to_string() >= current_minute
        }
        _ => true,
    }
}

pub fn valid_date(date: &str) -> bool {
    valid_date_at(date, now())
}

pub fn valid_time(time: &str, date: &str) -> bool {
    valid_time_at(time, date, now())
}

/// Reminders are entered and fired in the host's local time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, FIRE_AT_FORMAT).unwrap()
    }

    #[test]
    fn test_valid_date_formats() {
        let now = at("2026-10-19 12:00");
        assert!(valid_date_at("19.10.2026", now));
        assert!(valid_date_at("1.1.2027", now));
        assert!(valid_date_at("31.12.2026", now));
    }

    #[test]
    fn test_invalid_dates() {
        let now = at("2026-10-19 12:00");
        assert!(!valid_date_at("18.10.2026", now)); // yesterday
        assert!(!valid_date_at("32.01.2027", now));
        assert!(!valid_date_at("29.02.2027", now));
        assert!(!valid_date_at("2027-01-01", now));
        assert!(!valid_date_at("", now));
    }

    #[test]
    fn test_valid_time_depends_on_date() {
        let now = at("2026-10-19 12:00");
        assert!(valid_time_at("12:00", "19.10.2026", now));
        assert!(valid_time_at("18:45", "19.10.2026", now));
        assert!(!valid_time_at("11:59", "19.10.2026", now));
        // any well-formed time is fine on a later day
        assert!(valid_time_at("00:00", "20.10.2026", now));
    }

    #[test]
    fn test_invalid_times() {
        let now = at("2026-10-19 12:00");
        assert!(!valid_time_at("24:00", "20.10.2026", now));
        assert!(!valid_time_at("12:60", "20.10.2026", now));
        assert!(!valid_time_at("noon", "20.10.2026", now));
    }

    #[test]
    fn test_fire_at_is_sortable() {
        assert_eq!(fire_at("5.1.2027", "9:05").as_deref(), Some("2027-01-05 09:05"));
        assert_eq!(fire_at("bad", "9:05"), None);
        assert!(fire_at("05.01.2027", "09:05").unwrap() < fire_at("05.01.2027", "10:00").unwrap());
    }
}
