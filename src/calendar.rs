/// Calendar session state for the hospital calendar view.
///
/// A `CalendarSession` owns one generated dataset for its whole lifetime
/// together with the user's current selection (date, view mode, search
/// text, specialty). Every derived view is recomputed from the untouched
/// dataset on each call.

use crate::aggregate::{
    aggregate_by_day, aggregate_by_month, aggregate_by_week, summarize_day, DayBucket, DaySummary,
    MonthBucket,
};
use crate::config::DateWindow;
use crate::filter::{filter, Category};
use crate::generator::ScheduleDataset;
use crate::models::AppointmentRecord;
use crate::navigator::{selection_window, step_from, week_start, CalendarView, Direction, Granularity};
use chrono::{Datelike, Local, NaiveDate};

pub struct CalendarSession {
    dataset: ScheduleDataset,
    current_date: NaiveDate,
    view: CalendarView,
    query: String,
    category: Category,
}

impl CalendarSession {
    /// Start in month view on `today` with no filters.
    pub fn new(dataset: ScheduleDataset, today: NaiveDate) -> Self {
        log::debug!(
            "Opening calendar session for dataset {} ({} records)",
            dataset.dataset_id,
            dataset.len()
        );
        CalendarSession {
            dataset,
            current_date: today,
            view: CalendarView::default(),
            query: String::new(),
            category: Category::All,
        }
    }

    pub fn dataset(&self) -> &ScheduleDataset {
        &self.dataset
    }

    pub fn records(&self) -> &[AppointmentRecord] {
        &self.dataset.records
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_view(&mut self, view: CalendarView) {
        log::debug!("View {} -> {}", self.view.name(), view.name());
        self.view = view;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    /// Step by the current view's granularity using the local clock.
    pub fn navigate(&mut self, direction: Direction) -> NaiveDate {
        self.navigate_from(direction, Local::now().date_naive())
    }

    /// Step by the current view's granularity with an explicit `today`.
    pub fn navigate_from(&mut self, direction: Direction, today: NaiveDate) -> NaiveDate {
        let next = step_from(self.current_date, self.view.granularity(), direction, today);
        log::debug!("Navigate {:?}: {} -> {}", direction, self.current_date, next);
        self.current_date = next;
        next
    }

    /// Jump from the year overview into a month (zero-based).
    pub fn select_month(&mut self, month0: u32) -> bool {
        match NaiveDate::from_ymd_opt(self.current_date.year(), month0 + 1, 1) {
            Some(first) => {
                self.current_date = first;
                self.set_view(CalendarView::Month);
                true
            }
            None => false,
        }
    }

    /// Records passing the current search text and specialty.
    pub fn filtered(&self) -> Vec<&AppointmentRecord> {
        filter(&self.dataset.records, &self.query, &self.category)
    }

    /// Month buckets for the year of the current date.
    pub fn year_overview(&self) -> Vec<MonthBucket> {
        aggregate_by_month(self.filtered(), self.current_date.year())
    }

    /// Filtered records of the current date, sorted by start.
    pub fn day_agenda(&self) -> Vec<&AppointmentRecord> {
        aggregate_by_day(self.filtered(), self.current_date)
    }

    /// Day buckets for the Monday-based week holding the current date.
    pub fn week_overview(&self) -> Vec<DayBucket> {
        aggregate_by_week(self.filtered(), week_start(self.current_date))
    }

    pub fn day_summary(&self) -> DaySummary<'_> {
        summarize_day(self.filtered(), self.current_date)
    }

    /// Date interval shown by the current view.
    pub fn selection(&self) -> DateWindow {
        selection_window(self.current_date, self.view.granularity())
    }

    /// Filtered records inside the current selection, sorted by start.
    pub fn in_selection(&self) -> Vec<&AppointmentRecord> {
        let window = self.selection();
        let mut records: Vec<&AppointmentRecord> = self
            .filtered()
            .into_iter()
            .filter(|r| window.contains(r.date()))
            .collect();
        records.sort_by_key(|r| r.start);
        records
    }

    /// Title line for the current view.
    pub fn heading(&self) -> String {
        match self.view.granularity() {
            Granularity::Day => self.current_date.format("%A %-d %B %Y").to_string(),
            Granularity::Year => self.current_date.format("%Y").to_string(),
            _ => self.current_date.format("%B %Y").to_string(),
        }
    }
}

impl std::fmt::Display for CalendarSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CalendarSession({}, view={}, records={})",
            self.current_date,
            self.view.name(),
            self.dataset.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::generator::generate;

    fn session() -> CalendarSession {
        let config = GeneratorConfig::for_year(2025).unwrap().with_seed(99);
        let dataset = generate(&config).unwrap();
        CalendarSession::new(dataset, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    #[test]
    fn starts_unfiltered_in_month_view() {
        let s = session();
        assert_eq!(s.view(), CalendarView::Month);
        assert_eq!(s.filtered().len(), s.records().len());
        assert_eq!(s.heading(), "March 2025");
    }

    #[test]
    fn navigation_follows_view() {
        let mut s = session();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        s.navigate_from(Direction::Next, today);
        assert_eq!(s.current_date(), NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
        s.set_view(CalendarView::Day);
        s.navigate_from(Direction::Prev, today);
        assert_eq!(s.current_date(), NaiveDate::from_ymd_opt(2025, 4, 9).unwrap());
        s.navigate_from(Direction::Today, today);
        assert_eq!(s.current_date(), today);
        // Navigation never changes the view mode.
        assert_eq!(s.view(), CalendarView::Day);
    }

    #[test]
    fn select_month_switches_to_month_view() {
        let mut s = session();
        s.set_view(CalendarView::Year);
        assert!(s.select_month(10));
        assert_eq!(s.current_date(), NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(s.view(), CalendarView::Month);
        assert!(!s.select_month(12));
    }

    #[test]
    fn year_overview_totals_match_filtered() {
        let mut s = session();
        s.set_category(Category::from_string("Dermatologie"));
        let total: usize = s.year_overview().iter().map(|b| b.total()).sum();
        assert_eq!(total, s.filtered().len());
        assert!(s.filtered().iter().all(|r| r.specialty == "Dermatologie"));
    }

    #[test]
    fn day_agenda_and_summary_agree() {
        let s = session();
        let agenda = s.day_agenda();
        assert!(!agenda.is_empty());
        assert!(agenda.windows(2).all(|w| w[0].start <= w[1].start));
        assert_eq!(s.day_summary().counts.total, agenda.len());
        assert_eq!(
            s.week_overview()[0].counts.total,
            agenda.len(),
            "2025-03-10 is a Monday"
        );
    }

    #[test]
    fn selection_matches_view() {
        let mut s = session();
        let march: Vec<_> = s.in_selection();
        assert!(march.iter().all(|r| r.start.month() == 3));
        s.set_view(CalendarView::Day);
        assert_eq!(s.in_selection().len(), s.day_agenda().len());
    }
}
