/// Calendar date arithmetic.
///
/// Every function here is pure over its arguments; only `step` reads the
/// local clock, and only for `Direction::Today`.

use crate::config::DateWindow;
use crate::error::{Result, ScheduleError};
use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Unit a navigation step moves by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err(ScheduleError::UnknownGranularity(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
    Today,
}

impl Direction {
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "prev" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            "today" => Ok(Direction::Today),
            _ => Err(ScheduleError::UnknownDirection(value.to_string())),
        }
    }
}

/// View mode of the hospital calendar.
///
/// Any mode may switch to any other; navigation never changes the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    #[default]
    Month,
    Year,
}

impl CalendarView {
    pub fn granularity(&self) -> Granularity {
        match self {
            CalendarView::Day => Granularity::Day,
            CalendarView::Month => Granularity::Month,
            CalendarView::Year => Granularity::Year,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CalendarView::Day => "DAY",
            CalendarView::Month => "MONTH",
            CalendarView::Year => "YEAR",
        }
    }
}

/// Step `current` using the local clock for `Direction::Today`.
pub fn step(current: NaiveDate, granularity: Granularity, direction: Direction) -> NaiveDate {
    step_from(current, granularity, direction, Local::now().date_naive())
}

/// Step `current` by one `granularity` unit.
///
/// Month and year steps clamp the day to the target month's length, so
/// January 31st moves to February 28th (or 29th) and a month step is not
/// always reversible. A step past the representable date range leaves the
/// date unchanged.
pub fn step_from(
    current: NaiveDate,
    granularity: Granularity,
    direction: Direction,
    today: NaiveDate,
) -> NaiveDate {
    let forward = match direction {
        Direction::Today => return today,
        Direction::Next => true,
        Direction::Prev => false,
    };

    let moved = match granularity {
        Granularity::Day => shift_days(current, 1, forward),
        Granularity::Week => shift_days(current, 7, forward),
        Granularity::Month => shift_months(current, 1, forward),
        Granularity::Year => shift_months(current, 12, forward),
    };
    moved.unwrap_or(current)
}

fn shift_days(date: NaiveDate, days: u64, forward: bool) -> Option<NaiveDate> {
    if forward {
        date.checked_add_days(Days::new(days))
    } else {
        date.checked_sub_days(Days::new(days))
    }
}

fn shift_months(date: NaiveDate, months: u32, forward: bool) -> Option<NaiveDate> {
    if forward {
        date.checked_add_months(Months::new(months))
    } else {
        date.checked_sub_months(Months::new(months))
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// The seven consecutive days starting at `start`.
pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take(7).collect()
}

/// Closed date interval displayed for `granularity` around `date`.
pub fn selection_window(date: NaiveDate, granularity: Granularity) -> DateWindow {
    let (start, end) = match granularity {
        Granularity::Day => (date, date),
        Granularity::Week => {
            let start = week_start(date);
            (start, start.checked_add_days(Days::new(6)).unwrap_or(date))
        }
        Granularity::Month => {
            let start = date.with_day(1).unwrap_or(date);
            let end = start
                .checked_add_months(Months::new(1))
                .and_then(|d| d.pred_opt())
                .unwrap_or(date);
            (start, end)
        }
        Granularity::Year => {
            let start = date.with_ordinal(1).unwrap_or(date);
            let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
            (start, end)
        }
    };
    DateWindow { start, end }
}
