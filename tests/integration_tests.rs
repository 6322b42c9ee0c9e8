use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use bikeshare_stats::config::{BadRowPolicy, CityTable, Config};
use bikeshare_stats::filter::filter;
use bikeshare_stats::loader::load;
use bikeshare_stats::selection::{City, DayFilter, MonthFilter, Selection, WEEKDAYS};
use bikeshare_stats::session::Session;
use bikeshare_stats::stats::{Popular, duration_stats, time_stats, user_stats};
use bikeshare_stats::trip::TripTable;
use bikeshare_stats::viewer::RawRowViewer;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_city(city: City) -> TripTable {
    let cities = CityTable::new(fixtures_dir());
    load(&cities, city, BadRowPolicy::Abort)
        .expect("fixture should load")
        .0
}

fn run_session(input: &str) -> String {
    let config = Config::new(CityTable::new(fixtures_dir()));
    let mut session = Session::new(config, Cursor::new(input.as_bytes().to_vec()), Vec::new());
    session.run().expect("session should finish");
    String::from_utf8(session.into_output()).unwrap()
}

fn all_selections() -> Vec<Selection> {
    let months = std::iter::once(MonthFilter::All).chain((1..=6).map(MonthFilter::Month));
    months
        .flat_map(|month| {
            std::iter::once(DayFilter::All)
                .chain(WEEKDAYS.iter().copied().map(DayFilter::Day))
                .map(move |day| Selection { month, day })
        })
        .collect()
}

#[test]
fn test_every_fixture_loads() {
    for city in City::ALL {
        let table = load_city(city);
        assert_eq!(table.len(), 24, "{city}");
    }
}

#[test]
fn test_chicago_most_common_month() {
    let table = filter(&load_city(City::Chicago), Selection::ALL);
    let stats = time_stats(&table);

    assert_eq!(stats.popular_month, Some(Popular { value: 6, count: 8 }));
    assert_eq!(stats.popular_month_name(), Some("June"));
}

#[test]
fn test_filtered_rows_are_subset_matching_predicates() {
    let full = load_city(City::Chicago);
    for selection in all_selections() {
        let out = filter(&full, selection);
        assert!(out.len() <= full.len());
        for trip in out.iter() {
            assert!(full.trips.contains(trip));
            assert!(selection.month.matches(trip.month));
            assert!(selection.day.matches(trip.weekday));
        }
        assert_eq!(filter(&out, selection), out, "{selection:?}");
    }
}

#[test]
fn test_all_all_is_identity() {
    let full = load_city(City::NewYorkCity);
    assert_eq!(filter(&full, Selection::ALL), full);
}

#[test]
fn test_month_partitions_cover_the_table() {
    let full = load_city(City::Washington);
    let total: usize = (1..=6)
        .map(|m| {
            filter(
                &full,
                Selection {
                    month: MonthFilter::Month(m),
                    day: DayFilter::All,
                },
            )
            .len()
        })
        .sum();
    assert_eq!(total, full.len());
}

#[test]
fn test_duration_mean_is_total_over_count() {
    for city in City::ALL {
        let stats = duration_stats(&load_city(city));
        assert!(stats.total_seconds >= 0.0);
        let mean = stats.mean_seconds.unwrap();
        assert!((mean - stats.total_seconds / stats.trips as f64).abs() < 1e-9);
    }
}

#[test]
fn test_washington_has_no_demographics() {
    let stats = user_stats(&load_city(City::Washington));
    assert!(stats.gender.is_none());
    assert!(stats.birth_year.is_none());
    assert!(!stats.user_types.is_empty());

    let out = run_session("washington\nall\nall\nno\nno\n");
    assert!(out.contains("Gender is not available for this city."));
    assert!(out.contains("Birth Year is not available for this city."));
}

#[test]
fn test_new_york_has_demographics() {
    let stats = user_stats(&load_city(City::NewYorkCity));
    let gender = stats.gender.unwrap();
    let counted: usize = gender.breakdown.iter().map(|(_, n)| n).sum();
    assert_eq!(counted + gender.missing, 24);
    assert!(stats.birth_year.unwrap().earliest.is_some());
}

#[test]
fn test_viewer_pages_through_source_rows() {
    let path = fixtures_dir().join("chicago.csv");
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    let mut viewer = RawRowViewer::open(&path).unwrap();
    let first = viewer.next_batch(10).unwrap();
    let second = viewer.next_batch(10).unwrap();
    let third = viewer.next_batch(10).unwrap();

    assert_eq!(first.rows, lines[1..11]);
    assert_eq!(second.rows, lines[11..21]);
    assert_eq!(third.rows, lines[21..25]);
    assert!(third.exhausted);
    assert!(viewer.next_batch(10).unwrap().rows.is_empty());
}

#[test]
fn test_session_views_raw_rows_in_batches() {
    let content = fs::read_to_string(fixtures_dir().join("chicago.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    let out = run_session("chicago\nall\nall\nyes\nyes\nno\nno\n");

    assert!(out.contains(lines[1]));
    assert!(out.contains(lines[20]));
    assert!(!out.contains(lines[21]));
}

#[test]
fn test_july_is_rejected_at_prompt() {
    let out = run_session("chicago\njuly\nall\nall\nno\nno\n");

    assert!(out.contains("July is not a valid month."));
    assert!(out.contains("month: All, day: All"));
    assert!(!out.contains("month: July"));
}

#[test]
fn test_skip_policy_drops_bad_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut body = fs::read_to_string(fixtures_dir().join("washington.csv")).unwrap();
    body.push_str("1,garbage,,12.0,A,B,Customer\n");
    fs::write(dir.path().join("washington.csv"), body).unwrap();
    let cities = CityTable::new(dir.path());

    assert!(load(&cities, City::Washington, BadRowPolicy::Abort).is_err());

    let (table, summary) = load(&cities, City::Washington, BadRowPolicy::Skip).unwrap();
    assert_eq!(table.len(), 24);
    assert_eq!(summary.skipped, 1);
}
