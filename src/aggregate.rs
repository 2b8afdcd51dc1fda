/// Calendar bucketing of appointment records.
///
/// Aggregations read any iterator of record references, so they work on a
/// full dataset as well as on the output of `filter::filter`. Nothing here
/// mutates or reorders the source records.

use crate::models::{AppointmentRecord, Status, StatusCounts};
use crate::navigator::{is_weekend, week_days};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Status counts for one month; `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: u32,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

impl MonthBucket {
    pub fn total(&self) -> usize {
        self.counts.total
    }

    pub fn confirmed_count(&self) -> usize {
        self.counts.confirmed
    }

    pub fn pending_count(&self) -> usize {
        self.counts.pending
    }

    pub fn cancelled_count(&self) -> usize {
        self.counts.cancelled
    }

    pub fn share(&self, status: Status) -> f64 {
        self.counts.share(status)
    }
}

/// Status counts for one calendar day of a week overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub is_weekend: bool,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

impl DayBucket {
    pub fn share(&self, status: Status) -> f64 {
        self.counts.share(status)
    }
}

/// Headline figures for a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary<'a> {
    pub date: NaiveDate,
    pub counts: StatusCounts,
    /// Earliest appointment of the day that is not cancelled.
    pub next: Option<&'a AppointmentRecord>,
}

/// Twelve buckets, one per month of `year`, including empty months.
pub fn aggregate_by_month<'a, I>(records: I, year: i32) -> Vec<MonthBucket>
where
    I: IntoIterator<Item = &'a AppointmentRecord>,
{
    let mut buckets: Vec<MonthBucket> = (0..12)
        .map(|month| MonthBucket {
            month,
            counts: StatusCounts::default(),
        })
        .collect();

    for record in records {
        if record.start.year() == year {
            buckets[record.start.month0() as usize].counts.add(record.status);
        }
    }

    buckets
}

/// Records starting on `date`, sorted by start time.
///
/// Records with equal starts keep their input order.
pub fn aggregate_by_day<'a, I>(records: I, date: NaiveDate) -> Vec<&'a AppointmentRecord>
where
    I: IntoIterator<Item = &'a AppointmentRecord>,
{
    let mut day: Vec<&AppointmentRecord> = records
        .into_iter()
        .filter(|r| r.start.date() == date)
        .collect();
    day.sort_by_key(|r| r.start);
    day
}

/// Seven buckets for the week starting at `week_start`.
pub fn aggregate_by_week<'a, I>(records: I, week_start: NaiveDate) -> Vec<DayBucket>
where
    I: IntoIterator<Item = &'a AppointmentRecord>,
{
    let mut buckets: Vec<DayBucket> = week_days(week_start)
        .into_iter()
        .map(|date| DayBucket {
            date,
            is_weekend: is_weekend(date),
            counts: StatusCounts::default(),
        })
        .collect();

    for record in records {
        let offset = (record.start.date() - week_start).num_days();
        if (0..7).contains(&offset) {
            buckets[offset as usize].counts.add(record.status);
        }
    }

    buckets
}

/// Counts and next non-cancelled appointment for `date`.
pub fn summarize_day<'a, I>(records: I, date: NaiveDate) -> DaySummary<'a>
where
    I: IntoIterator<Item = &'a AppointmentRecord>,
{
    let day = aggregate_by_day(records, date);
    DaySummary {
        date,
        counts: StatusCounts::tally(day.iter().copied()),
        next: day.into_iter().find(|r| r.status != Status::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn record(id: u64, start: NaiveDateTime, status: Status) -> AppointmentRecord {
        AppointmentRecord {
            id,
            start,
            end: start + Duration::minutes(30),
            patient_name: "Marie Dupont".to_string(),
            doctor_name: "Dr. Jean Martin".to_string(),
            specialty: "Cardiologie".to_string(),
            status,
            room: "Salle 100".to_string(),
            patient_age: None,
            condition: None,
        }
    }

    #[test]
    fn overlapping_march_bookings_are_both_counted() {
        let records = vec![
            record(1, at(2025, 3, 10, 9, 0), Status::Confirmed),
            record(2, at(2025, 3, 10, 9, 0), Status::Pending),
        ];
        let buckets = aggregate_by_month(&records, 2025);
        assert_eq!(buckets.len(), 12);
        let march = buckets[2];
        assert_eq!(march.month, 2);
        assert_eq!(march.total(), 2);
        assert_eq!(march.confirmed_count(), 1);
        assert_eq!(march.pending_count(), 1);
        assert_eq!(march.cancelled_count(), 0);
        assert_eq!(march.share(Status::Confirmed), 50.0);
    }

    #[test]
    fn other_years_are_ignored() {
        let records = vec![
            record(1, at(2024, 12, 31, 17, 30), Status::Confirmed),
            record(2, at(2025, 1, 1, 8, 0), Status::Cancelled),
        ];
        let buckets = aggregate_by_month(&records, 2025);
        assert_eq!(buckets.iter().map(|b| b.total()).sum::<usize>(), 1);
        assert_eq!(buckets[0].cancelled_count(), 1);
        assert!(buckets[1..].iter().all(|b| b.total() == 0));
        assert_eq!(buckets[5].share(Status::Pending), 0.0);
    }

    #[test]
    fn empty_input_still_yields_twelve_buckets() {
        let buckets = aggregate_by_month(std::iter::empty(), 2025);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[11].month, 11);
    }

    #[test]
    fn day_view_is_sorted_and_stable() {
        let records = vec![
            record(1, at(2025, 3, 10, 15, 0), Status::Confirmed),
            record(2, at(2025, 3, 11, 8, 0), Status::Confirmed),
            record(3, at(2025, 3, 10, 9, 0), Status::Pending),
            record(4, at(2025, 3, 10, 9, 0), Status::Cancelled),
        ];
        let day = aggregate_by_day(&records, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let ids: Vec<u64> = day.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4, 1]);
        // Source order untouched.
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn week_buckets_cover_seven_days() {
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let records = vec![
            record(1, at(2025, 3, 10, 9, 0), Status::Confirmed),
            record(2, at(2025, 3, 16, 9, 0), Status::Pending),
            record(3, at(2025, 3, 17, 9, 0), Status::Pending),
            record(4, at(2025, 3, 9, 9, 0), Status::Pending),
        ];
        let week = aggregate_by_week(&records, monday);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].counts.confirmed, 1);
        assert_eq!(week[6].counts.pending, 1);
        assert!(week[6].is_weekend && !week[0].is_weekend);
        assert_eq!(week.iter().map(|b| b.counts.total).sum::<usize>(), 2);
    }

    #[test]
    fn summary_skips_cancelled_for_next() {
        let records = vec![
            record(1, at(2025, 3, 10, 8, 0), Status::Cancelled),
            record(2, at(2025, 3, 10, 11, 0), Status::Confirmed),
            record(3, at(2025, 3, 10, 10, 0), Status::Pending),
        ];
        let summary = summarize_day(&records, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(summary.counts.total, 3);
        assert_eq!(summary.counts.pending, 1);
        assert_eq!(summary.next.map(|r| r.id), Some(3));
    }

    #[test]
    fn summary_of_empty_day() {
        let summary = summarize_day(std::iter::empty(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(summary.counts.is_empty());
        assert!(summary.next.is_none());
    }

    #[test]
    fn month_bucket_serializes_flat() {
        let bucket = aggregate_by_month(std::iter::empty(), 2025)[0];
        let json = serde_json::to_value(bucket).unwrap();
        assert_eq!(json["month"], 0);
        assert_eq!(json["total"], 0);
        assert_eq!(json["cancelled"], 0);
    }
}
