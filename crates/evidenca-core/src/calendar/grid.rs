// ── Month / week / day layout ──
//
// Pure date arithmetic: which days a period covers and which placeable
// events overlap each of them. Weeks start on Monday.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::model::Event;

/// Days in the month grid: six full weeks.
pub const MONTH_CELLS: usize = 42;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GridView {
    #[default]
    Month,
    Week,
    Day,
}

/// One day of the grid with the events overlapping it.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// `false` for the leading/trailing days of neighbouring months.
    pub in_period: bool,
    pub events: Vec<&'a Event>,
}

pub struct CalendarGrid;

impl CalendarGrid {
    /// Lay `events` out over the period of `view` containing `anchor`.
    ///
    /// Events missing either bound are skipped. Within a day, events are
    /// ordered by start.
    pub fn layout<'a>(
        events: impl IntoIterator<Item = &'a Event>,
        view: GridView,
        anchor: NaiveDate,
    ) -> Vec<DayCell<'a>> {
        let mut placeable: Vec<&Event> = events.into_iter().filter(|e| e.is_placeable()).collect();
        placeable.sort_by_key(|e| e.start);

        Self::days(view, anchor)
            .into_iter()
            .map(|date| DayCell {
                date,
                in_period: view != GridView::Month || date.month() == anchor.month(),
                events: placeable
                    .iter()
                    .copied()
                    .filter(|e| overlaps(e, date))
                    .collect(),
            })
            .collect()
    }

    /// Dates covered by the period.
    pub fn days(view: GridView, anchor: NaiveDate) -> Vec<NaiveDate> {
        match view {
            GridView::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                week_start(first).iter_days().take(MONTH_CELLS).collect()
            }
            GridView::Week => week_start(anchor).iter_days().take(7).collect(),
            GridView::Day => vec![anchor],
        }
    }

    /// Anchor of the following period.
    pub fn next_period(view: GridView, anchor: NaiveDate) -> NaiveDate {
        match view {
            GridView::Month => anchor.checked_add_months(Months::new(1)),
            GridView::Week => anchor.checked_add_days(Days::new(7)),
            GridView::Day => anchor.checked_add_days(Days::new(1)),
        }
        .unwrap_or(anchor)
    }

    /// Anchor of the preceding period.
    pub fn prev_period(view: GridView, anchor: NaiveDate) -> NaiveDate {
        match view {
            GridView::Month => anchor.checked_sub_months(Months::new(1)),
            GridView::Week => anchor.checked_sub_days(Days::new(7)),
            GridView::Day => anchor.checked_sub_days(Days::new(1)),
        }
        .unwrap_or(anchor)
    }

    /// Heading for the period, e.g. "May 2024".
    pub fn title(view: GridView, anchor: NaiveDate) -> String {
        match view {
            GridView::Month => anchor.format("%B %Y").to_string(),
            GridView::Week => {
                let start = week_start(anchor);
                let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            GridView::Day => anchor.format("%A, %B %-d, %Y").to_string(),
        }
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

fn overlaps(event: &Event, day: NaiveDate) -> bool {
    match (event.start, event.end) {
        (Some(start), Some(end)) => start.date_naive() <= day && day <= end.date_naive(),
        _ => false,
    }
}
