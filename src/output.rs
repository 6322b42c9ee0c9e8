//! User-facing rendering of the statistics reports.
//!
//! Every writer takes any [`Write`] so the session can print to stdout and
//! tests can capture into a buffer.

use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::selection::month_name;
use crate::stats::duration::breakdown;
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};

pub const NO_DATA: &str = "no data";
pub const SEPARATOR_WIDTH: usize = 40;

/// Logs a report as pretty JSON at debug level.
pub fn log_json<T: Serialize>(label: &str, report: &T) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => debug!(report = label, "{}", json),
        Err(e) => debug!(report = label, error = %e, "Report not serializable"),
    }
}

pub fn write_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    match &stats.popular_month {
        Some(p) => writeln!(
            out,
            "The most common month is {} with {} trips",
            month_name(p.value),
            p.count
        )?,
        None => writeln!(out, "The most common month: {NO_DATA}")?,
    }
    match &stats.popular_day {
        Some(p) => writeln!(out, "The most common day is {} with {} trips", p.value, p.count)?,
        None => writeln!(out, "The most common day: {NO_DATA}")?,
    }
    match &stats.popular_hour {
        Some(p) => writeln!(out, "The most common hour is {} with {} trips", p.value, p.count)?,
        None => writeln!(out, "The most common hour: {NO_DATA}")?,
    }
    Ok(())
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;
    match &stats.popular_start {
        Some(p) => writeln!(
            out,
            "{} was the most popular Start Station. It was used {} times",
            p.value, p.count
        )?,
        None => writeln!(out, "The most popular Start Station: {NO_DATA}")?,
    }
    match &stats.popular_end {
        Some(p) => writeln!(
            out,
            "{} was the most popular End Station. It was used {} times",
            p.value, p.count
        )?,
        None => writeln!(out, "The most popular End Station: {NO_DATA}")?,
    }
    match &stats.popular_trip {
        Some(p) => writeln!(
            out,
            "The most popular Start & End Station combination was {} -> {} with {} trips",
            p.value.0, p.value.1, p.count
        )?,
        None => writeln!(out, "The most popular Start & End Station combination: {NO_DATA}")?,
    }
    Ok(())
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "\nCalculating Trip Duration...\n")?;
    let (d, h, m, s) = breakdown(stats.total_seconds);
    writeln!(
        out,
        "The total travel time was {:.2} seconds ({d}d {h}h {m}m {s:.0}s)",
        stats.total_seconds
    )?;
    match stats.mean_seconds {
        Some(mean) => writeln!(out, "The mean travel time was {mean:.2} seconds")?,
        None => writeln!(out, "The mean travel time: {NO_DATA}")?,
    }
    Ok(())
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(out, "\nCalculating User Stats...\n")?;

    writeln!(out, "Breakdown of User Types:")?;
    write_breakdown(out, &stats.user_types)?;
    if stats.user_types_missing > 0 {
        writeln!(
            out,
            "User Type was not specified for {} commuters",
            stats.user_types_missing
        )?;
    }
    writeln!(out)?;

    match &stats.gender {
        Some(g) => {
            writeln!(out, "Breakdown of Gender:")?;
            write_breakdown(out, &g.breakdown)?;
            writeln!(out, "\nGender was not specified for {} commuters\n", g.missing)?;
        }
        None => writeln!(out, "Gender is not available for this city.\n")?,
    }

    match &stats.birth_year {
        Some(b) => {
            match (b.earliest, b.latest, &b.most_common) {
                (Some(earliest), Some(latest), Some(common)) => {
                    writeln!(out, "The earliest birth year is {earliest}")?;
                    writeln!(out, "The most recent birth year is {latest}")?;
                    writeln!(
                        out,
                        "The most common birth year is {} with {} commuters born this year",
                        common.value, common.count
                    )?;
                }
                _ => writeln!(out, "Birth Year: {NO_DATA}")?,
            }
            writeln!(out, "Birth Year was not specified for {} commuters\n", b.missing)?;
        }
        None => writeln!(out, "Birth Year is not available for this city.\n")?,
    }
    Ok(())
}

fn write_breakdown<W: Write>(out: &mut W, rows: &[(String, usize)]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "  {NO_DATA}");
    }
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (label, count) in rows {
        writeln!(out, "  {label:<width$}  {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{BirthYearStats, Popular};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_time_stats_text() {
        let stats = TimeStats {
            popular_month: Some(Popular { value: 6, count: 98 }),
            popular_day: Some(Popular {
                value: "Tuesday",
                count: 45,
            }),
            popular_hour: None,
        };
        let text = render(|b| write_time_stats(b, &stats));

        assert!(text.contains("The most common month is June with 98 trips"));
        assert!(text.contains("The most common day is Tuesday with 45 trips"));
        assert!(text.contains("The most common hour: no data"));
    }

    #[test]
    fn test_duration_no_data() {
        let stats = DurationStats {
            trips: 0,
            total_seconds: 0.0,
            mean_seconds: None,
        };
        let text = render(|b| write_duration_stats(b, &stats));

        assert!(text.contains("The total travel time was 0.00 seconds"));
        assert!(text.contains("The mean travel time: no data"));
    }

    #[test]
    fn test_user_stats_not_available() {
        let stats = UserStats {
            user_types: vec![("Subscriber".to_string(), 2)],
            user_types_missing: 0,
            gender: None,
            birth_year: None,
        };
        let text = render(|b| write_user_stats(b, &stats));

        assert!(text.contains("Subscriber  2"));
        assert!(text.contains("Gender is not available for this city."));
        assert!(text.contains("Birth Year is not available for this city."));
    }

    #[test]
    fn test_birth_year_all_missing_text() {
        let stats = UserStats {
            user_types: vec![],
            user_types_missing: 1,
            gender: None,
            birth_year: Some(BirthYearStats {
                earliest: None,
                latest: None,
                most_common: None,
                missing: 1,
            }),
        };
        let text = render(|b| write_user_stats(b, &stats));

        assert!(text.contains("Birth Year: no data"));
        assert!(text.contains("Birth Year was not specified for 1 commuters"));
    }

    #[test]
    fn test_separator_width() {
        let text = render(|b| write_separator(b));
        assert_eq!(text.trim_end(), "-".repeat(40));
    }

    #[test]
    fn test_log_json_does_not_panic() {
        log_json("user", &vec![("Customer", 1)]);
    }
}
