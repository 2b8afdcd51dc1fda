use chrono::{Duration, NaiveDate, NaiveDateTime};
use mediplan::{
    aggregate_by_day, aggregate_by_month, filter, generate, generate_with, AppointmentRecord,
    CalendarSession, CalendarView, Category, DailyCountRange, DateWindow, Direction,
    GeneratorConfig, ScheduleError, Status,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn record(id: u64, patient: &str, start: NaiveDateTime, status: Status) -> AppointmentRecord {
    AppointmentRecord {
        id,
        start,
        end: start + Duration::minutes(30),
        patient_name: patient.to_string(),
        doctor_name: "Dr. Jean Martin".to_string(),
        specialty: "Cardiologie".to_string(),
        status,
        room: "Salle 120".to_string(),
        patient_age: None,
        condition: None,
    }
}

#[test]
fn overlapping_march_bookings_aggregate() {
    init();
    let records = vec![
        record(1, "Marie Dupont", at(2025, 3, 10, 9, 0), Status::Confirmed),
        record(2, "Pierre Bernard", at(2025, 3, 10, 9, 0), Status::Pending),
    ];
    assert!(records[0].overlaps_with(&records[1]));

    let march = aggregate_by_month(&records, 2025)[2];
    assert_eq!(
        (march.total(), march.confirmed_count(), march.pending_count(), march.cancelled_count()),
        (2, 1, 1, 0)
    );
}

#[test]
fn dupont_search_returns_only_marie() {
    let records = vec![
        record(1, "Marie Dupont", at(2025, 3, 10, 9, 0), Status::Confirmed),
        record(2, "Pierre Bernard", at(2025, 3, 10, 10, 0), Status::Pending),
    ];
    let found = filter(&records, "dupont", &Category::All);
    assert_eq!(found, vec![&records[0]]);
}

#[test]
fn single_day_generation_from_json() {
    init();
    let json = r#"{
        "window": { "start": "2025-03-10", "end": "2025-03-10" },
        "daily_count": { "min": 6, "max": 6 },
        "seed": 2025
    }"#;
    let config = GeneratorConfig::from_json_str(json).unwrap();
    let dataset = generate(&config).unwrap();
    assert_eq!(dataset.len(), 6);

    let day = aggregate_by_day(&dataset.records, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    assert_eq!(day.len(), 6);
    assert!(day.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn injected_rng_is_deterministic() {
    let config = GeneratorConfig::for_year(2024).unwrap();
    let a = generate_with(&config, &mut StdRng::seed_from_u64(77)).unwrap();
    let b = generate_with(&config, &mut StdRng::seed_from_u64(77)).unwrap();
    let c = generate_with(&config, &mut StdRng::seed_from_u64(78)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn configuration_errors_surface_synchronously() {
    let mut config = GeneratorConfig::for_year(2025).unwrap();
    config.daily_count = DailyCountRange { min: 3, max: 1 };
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidConfig(_)));

    let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    assert!(DateWindow::new(start, end).is_err());
}

#[test]
fn session_walkthrough() {
    init();
    let config = GeneratorConfig::for_year(2025).unwrap().with_seed(31);
    let dataset = generate(&config).unwrap();
    let total = dataset.len();
    let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let mut session = CalendarSession::new(dataset, today);

    session.set_view(CalendarView::Year);
    let overview = session.year_overview();
    assert_eq!(overview.len(), 12);
    assert_eq!(overview.iter().map(|b| b.total()).sum::<usize>(), total);

    session.navigate_from(Direction::Next, today);
    assert_eq!(session.heading(), "2026");
    assert!(session.year_overview().iter().all(|b| b.total() == 0));

    session.navigate_from(Direction::Today, today);
    session.set_view(CalendarView::Month);
    session.navigate_from(Direction::Next, today);
    assert_eq!(session.current_date(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

    session.set_query("zzz-nobody");
    assert!(session.filtered().is_empty());
    assert!(session.in_selection().is_empty());
    assert_eq!(session.records().len(), total);
}
