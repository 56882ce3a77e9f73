use std::io::{self, Write};

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use x509::{CertificateEntry, CertificateLocations};

/// Prints subject and time to expiry of every certificate.
pub(crate) fn print(
    out: &mut impl Write,
    locations: &CertificateLocations,
    now: DateTime<Utc>,
) -> io::Result<()> {
    for location in locations {
        let Some(certificates) = location.certificates() else {
            writeln!(out, "--- [{}: {}] ---", location.name(), location.error().unwrap_or_default())?;
            writeln!(out)?;
            continue;
        };

        writeln!(out, "--- [{}] ---", location.name())?;
        for entry in certificates {
            writeln!(out, "Subject: {}", entry.subject_string())?;
            writeln!(out, "Expiry: {}", expiry_string(entry, now))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn expiry_string(entry: &CertificateEntry, now: DateTime<Utc>) -> String {
    let Some(not_after) = entry.not_after() else {
        return "-".to_string();
    };
    let expiry = format_expiry(now, not_after);
    if entry.is_expired(now) {
        format!("EXPIRED {} ago", expiry)
    } else {
        expiry
    }
}

/// Calendar difference between `now` and `t`, leading zero units dropped.
pub(crate) fn format_expiry(now: DateTime<Utc>, t: DateTime<Utc>) -> String {
    let diff = CalendarDiff::between(now, t);
    if diff.years != 0 {
        return format!(
            "{} years {} months {} days {} hours {} minutes",
            diff.years, diff.months, diff.days, diff.hours, diff.minutes
        );
    }
    if diff.months != 0 {
        return format!(
            "{} months {} days {} hours {} minutes",
            diff.months, diff.days, diff.hours, diff.minutes
        );
    }
    if diff.days != 0 {
        return format!("{} days {} hours {} minutes", diff.days, diff.hours, diff.minutes);
    }
    if diff.hours != 0 {
        return format!("{} hours {} minutes", diff.hours, diff.minutes);
    }
    format!("{} minutes", diff.minutes)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CalendarDiff {
    years: i32,
    months: i32,
    days: i32,
    hours: i32,
    minutes: i32,
}

impl CalendarDiff {
    /// Field-wise difference with borrowing, order of `a` and `b` ignored.
    fn between(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        let (a, b) = if a > b { (b, a) } else { (a, b) };

        let mut years = b.year() - a.year();
        let mut months = b.month() as i32 - a.month() as i32;
        let mut days = b.day() as i32 - a.day() as i32;
        let mut hours = b.hour() as i32 - a.hour() as i32;
        let mut minutes = b.minute() as i32 - a.minute() as i32;
        let seconds = b.second() as i32 - a.second() as i32;

        if seconds < 0 {
            minutes -= 1;
        }
        if minutes < 0 {
            minutes += 60;
            hours -= 1;
        }
        if hours < 0 {
            hours += 24;
            days -= 1;
        }
        if days < 0 {
            days += days_in_month(a.year(), a.month());
            months -= 1;
        }
        if months < 0 {
            months += 12;
            years -= 1;
        }

        CalendarDiff {
            years,
            months,
            days,
            hours,
            minutes,
        }
    }
}

fn days_in_month(year: i32, month: u32) -> i32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as i32,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Months, TimeZone};
    use rstest::rstest;
    use x509::{CertificateLocation, Certificates};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 15).unwrap()
    }

    fn later(months: u32, days: i64, hours: i64, minutes: i64) -> DateTime<Utc> {
        now().checked_add_months(Months::new(months)).unwrap()
            + Duration::days(days)
            + Duration::hours(hours)
            + Duration::minutes(minutes)
    }

    #[rstest]
    #[case(later(38, 7, 5, 25), "3 years 2 months 7 days 5 hours 25 minutes")]
    #[case(later(2, 7, 5, 25), "2 months 7 days 5 hours 25 minutes")]
    #[case(later(0, 7, 5, 25), "7 days 5 hours 25 minutes")]
    #[case(later(0, 0, 5, 25), "5 hours 25 minutes")]
    #[case(later(0, 0, 0, 25), "25 minutes")]
    #[case(now(), "0 minutes")]
    fn test_format_expiry(#[case] t: DateTime<Utc>, #[case] expected: &str) {
        assert_eq!(expected, format_expiry(now(), t));
    }

    #[test]
    fn test_format_expiry_in_the_past() {
        let t = now() - Duration::days(3) - Duration::hours(2);
        assert_eq!("3 days 2 hours 0 minutes", format_expiry(now(), t));
    }

    #[rstest]
    // Jan 31 to Mar 1 borrows from January
    #[case((2026, 1, 31), (2026, 3, 1), (0, 1, 1))]
    #[case((2025, 12, 15), (2026, 1, 10), (0, 0, 26))]
    #[case((2024, 2, 29), (2025, 2, 28), (0, 11, 28))]
    fn test_calendar_diff_borrows(
        #[case] a: (i32, u32, u32),
        #[case] b: (i32, u32, u32),
        #[case] expected: (i32, i32, i32),
    ) {
        let a = Utc.with_ymd_and_hms(a.0, a.1, a.2, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(b.0, b.1, b.2, 0, 0, 0).unwrap();
        let diff = CalendarDiff::between(a, b);
        assert_eq!(expected, (diff.years, diff.months, diff.days));
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2026, 2, 28)]
    #[case(2026, 12, 31)]
    #[case(2026, 4, 30)]
    fn test_days_in_month(#[case] year: i32, #[case] month: u32, #[case] expected: i32) {
        assert_eq!(expected, days_in_month(year, month));
    }

    #[test]
    fn test_print() {
        let bundle = include_str!("../tests/data/bundle.pem");
        let certificates = Certificates::from_bytes(bundle.as_bytes()).unwrap();
        let locations = vec![
            CertificateLocation::new("bundle.pem", certificates),
            CertificateLocation::failed("missing.pem", "not found"),
        ]
        .into_iter()
        .collect();
        let now = Utc.with_ymd_and_hms(2043, 5, 1, 0, 0, 0).unwrap();

        let mut out = Vec::new();
        print(&mut out, &locations, now).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "\
--- [bundle.pem] ---
Subject: CN=leaf.example.com,O=Certinfo,C=GB
Expiry: 1 months 0 days 0 hours 0 minutes

Subject: CN=expired.example.com
Expiry: EXPIRED 22 years 4 months 0 days 0 hours 0 minutes ago

Subject: CN=Certinfo Test Root,O=Certinfo,C=GB
Expiry: 8 months 0 days 0 hours 0 minutes

Subject: CN=leaf.example.com,O=Certinfo,C=GB
Expiry: 1 months 0 days 0 hours 0 minutes

--- [missing.pem: not found] ---

";
        assert_eq!(expected, text);
    }

    #[test]
    fn test_errored_entry_expiry() {
        let entry = CertificateEntry::with_error(2, x509::Error::NoPemBlock);
        assert_eq!("-", expiry_string(&entry, now()));
    }
}
