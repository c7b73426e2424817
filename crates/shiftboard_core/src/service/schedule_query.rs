//! Week view queries.
//!
//! # Responsibility
//! - Compute the Monday-anchored window for a reference date.
//! - Return the window's dates and shifts shaped for calendar, hourly,
//!   per-caregiver and grant views.
//!
//! # Invariants
//! - A window is always `[monday, monday + 7 days)`.
//! - Shifts keep store order (`date ASC, shift_type ASC`).
//! - Nothing is cached between calls.

use crate::model::caregiver::Caregiver;
use crate::model::shift::{ShiftRecord, ShiftType, HOURS_PER_SHIFT};
use crate::model::week::WeekWindow;
use crate::repo::caregiver_repo::CaregiverRepository;
use crate::repo::shift_repo::ShiftRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use serde::Serialize;

const HOURS_PER_DAY: u32 = 24;

/// Dates and shifts of one week window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekSchedule {
    pub window: WeekWindow,
    /// Monday..Sunday.
    pub dates: Vec<NaiveDate>,
    pub shifts: Vec<ShiftRecord>,
}

impl WeekSchedule {
    /// Shifts on `date`, in shift-code order.
    pub fn shifts_on(&self, date: NaiveDate) -> impl Iterator<Item = &ShiftRecord> {
        self.shifts.iter().filter(move |shift| shift.date == date)
    }
}

/// Hour-by-hour coverage of one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyGrid {
    pub window: WeekWindow,
    pub days: Vec<HourlyDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyDay {
    pub date: NaiveDate,
    /// Exactly 24 entries, hour 0 first.
    pub hours: Vec<HourSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourSlot {
    pub hour: u32,
    /// Shifts on duty during this hour.
    pub shifts: Vec<ShiftRecord>,
}

/// Per-caregiver view of one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaregiverGrid {
    pub window: WeekWindow,
    pub dates: Vec<NaiveDate>,
    /// One row per caregiver, ordered by caregiver id.
    pub rows: Vec<CaregiverWeekRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaregiverWeekRow {
    pub caregiver: Caregiver,
    /// Shift types worked per date, aligned with `CaregiverGrid::dates`.
    pub days: Vec<Vec<ShiftType>>,
    pub shift_count: u32,
    /// Informational only; weekly hour targets are not enforced.
    pub weekly_hours: u32,
}

/// Read-side service over caregiver and shift repositories.
pub struct ScheduleQueryService<C: CaregiverRepository, S: ShiftRepository> {
    caregivers: C,
    shifts: S,
}

impl<C: CaregiverRepository, S: ShiftRepository> ScheduleQueryService<C, S> {
    pub fn new(caregivers: C, shifts: S) -> Self {
        Self { caregivers, shifts }
    }

    /// Calendar view data for the week containing `today`.
    pub fn week_schedule(&self, today: NaiveDate) -> RepoResult<WeekSchedule> {
        let window = WeekWindow::containing(today);
        let shifts = self
            .shifts
            .query_shifts_in_range(window.start, window.end_exclusive)?;
        Ok(WeekSchedule {
            window,
            dates: window.dates(),
            shifts,
        })
    }

    /// Grant view data; same window and join as the calendar.
    pub fn grant_view(&self, today: NaiveDate) -> RepoResult<WeekSchedule> {
        self.week_schedule(today)
    }

    /// Hourly coverage for the week containing `today`.
    ///
    /// Hours running past midnight are attributed to the next date when it
    /// is inside the window and dropped otherwise.
    pub fn hourly_grid(&self, today: NaiveDate) -> RepoResult<HourlyGrid> {
        let schedule = self.week_schedule(today)?;
        let mut days: Vec<HourlyDay> = schedule
            .dates
            .iter()
            .map(|date| HourlyDay {
                date: *date,
                hours: (0..HOURS_PER_DAY)
                    .map(|hour| HourSlot {
                        hour,
                        shifts: Vec::new(),
                    })
                    .collect(),
            })
            .collect();

        for shift in &schedule.shifts {
            let day_index = (shift.date - schedule.window.start).num_days();
            let definition = shift.shift_type.definition();
            for absolute_hour in definition.start_hour..definition.end_hour() {
                let index = day_index + i64::from(absolute_hour / HOURS_PER_DAY);
                let Ok(index) = usize::try_from(index) else {
                    continue;
                };
                let Some(day) = days.get_mut(index) else {
                    continue;
                };
                let hour = (absolute_hour % HOURS_PER_DAY) as usize;
                day.hours[hour].shifts.push(shift.clone());
            }
        }

        Ok(HourlyGrid {
            window: schedule.window,
            days,
        })
    }

    /// Per-caregiver rows for the week containing `today`.
    pub fn caregiver_grid(&self, today: NaiveDate) -> RepoResult<CaregiverGrid> {
        let schedule = self.week_schedule(today)?;
        let caregivers = self.caregivers.list_caregivers()?;

        let rows = caregivers
            .into_iter()
            .map(|caregiver| {
                let days: Vec<Vec<ShiftType>> = schedule
                    .dates
                    .iter()
                    .map(|date| {
                        schedule
                            .shifts_on(*date)
                            .filter(|shift| shift.caregiver_id == caregiver.id)
                            .map(|shift| shift.shift_type)
                            .collect()
                    })
                    .collect();
                let shift_count = days.iter().map(|day| day.len() as u32).sum::<u32>();
                CaregiverWeekRow {
                    caregiver,
                    days,
                    shift_count,
                    weekly_hours: shift_count * HOURS_PER_SHIFT,
                }
            })
            .collect();

        Ok(CaregiverGrid {
            window: schedule.window,
            dates: schedule.dates,
            rows,
        })
    }

    /// All caregivers ordered by id.
    pub fn list_caregivers(&self) -> RepoResult<Vec<Caregiver>> {
        self.caregivers.list_caregivers()
    }
}
