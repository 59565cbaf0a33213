//! Calendar view models for the medical schedule screen.
//!
//! Meetings are mapped to colored events and bucketed per calendar day.
//! The month grid is 7 columns wide, offset by the weekday index of the
//! month's first day (Sunday-based), and each day cell shows at most
//! [`MAX_VISIBLE_EVENTS_PER_DAY`] events plus an overflow counter.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

use crate::models::{MeetingSchedule, MeetingStatus};

pub const MAX_VISIBLE_EVENTS_PER_DAY: usize = 4;

pub const PENDING_COLOR: &str = "#f59e0b";
pub const COMPLETED_COLOR: &str = "#22c55e";
pub const CANCELLED_COLOR: &str = "#ef4444";

pub fn status_color(status: MeetingStatus) -> &'static str {
    match status {
        MeetingStatus::Pending => PENDING_COLOR,
        MeetingStatus::Completed => COMPLETED_COLOR,
        MeetingStatus::Cancelled => CANCELLED_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: MeetingStatus,
    pub color: &'static str,
}

pub fn map_meeting_to_event(meeting: &MeetingSchedule) -> CalendarEvent {
    let title = meeting
        .patient_name
        .clone()
        .or_else(|| meeting.doctor_name.clone())
        .unwrap_or_else(|| "Lịch hẹn".to_string());

    CalendarEvent {
        id: meeting.id.clone(),
        title,
        start: meeting.start_date,
        end: meeting.end_date,
        status: meeting.status,
        color: status_color(meeting.status),
    }
}

pub fn overflow_label(hidden: usize) -> String {
    format!("+{} lịch hẹn khác", hidden)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub view: CalendarView,
    pub selected_date: NaiveDate,
}

impl CalendarState {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            view: CalendarView::Month,
            selected_date,
        }
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    /// Selecting a day cell switches to the day view on that date.
    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.view = CalendarView::Day;
    }
}

#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    /// At most [`MAX_VISIBLE_EVENTS_PER_DAY`] entries, sorted by start.
    pub events: Vec<CalendarEvent>,
    pub hidden_count: usize,
    pub overflow_label: Option<String>,
}

/// Events whose start falls on the given day, sorted by start time.
///
/// Bucketing is by start only: a meeting spanning midnight still renders
/// in its start day's cell.
pub fn events_on_day(date: NaiveDate, events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let mut hits: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| e.start.date_naive() == date)
        .cloned()
        .collect();
    hits.sort_by_key(|e| e.start);
    hits
}

/// Build the month grid: leading and trailing out-of-month cells pad the
/// rows to full weeks.
pub fn month_grid(year: i32, month: u32, events: &[CalendarEvent]) -> Vec<DayCell> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let offset = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(offset);
    let total_cells = (offset as usize + days_in_month(year, month) as usize).div_ceil(7) * 7;

    (0..total_cells)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            day_cell(date, date.year() == year && date.month() == month, events)
        })
        .collect()
}

fn day_cell(date: NaiveDate, in_current_month: bool, events: &[CalendarEvent]) -> DayCell {
    let day_events = events_on_day(date, events);
    let hidden_count = day_events.len().saturating_sub(MAX_VISIBLE_EVENTS_PER_DAY);

    DayCell {
        date,
        in_current_month,
        events: day_events
            .into_iter()
            .take(MAX_VISIBLE_EVENTS_PER_DAY)
            .collect(),
        hidden_count,
        overflow_label: (hidden_count > 0).then(|| overflow_label(hidden_count)),
    }
}

#[derive(Debug, Clone)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

/// The Sunday-started week containing the anchor date. Week cells are not
/// truncated.
pub fn week_days(anchor: NaiveDate, events: &[CalendarEvent]) -> Vec<WeekDay> {
    let start = anchor - Duration::days(anchor.weekday().num_days_from_sunday() as i64);

    (0..7)
        .map(|i| {
            let date = start + Duration::days(i);
            WeekDay {
                date,
                events: events_on_day(date, events),
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct HourSlot {
    pub hour: u32,
    pub events: Vec<CalendarEvent>,
}

/// Hourly buckets for the day view, keyed by event start hour.
pub fn day_slots(date: NaiveDate, events: &[CalendarEvent]) -> Vec<HourSlot> {
    let day_events = events_on_day(date, events);

    (0..24)
        .map(|hour| HourSlot {
            hour,
            events: day_events
                .iter()
                .filter(|e| e.start.hour() == hour)
                .cloned()
                .collect(),
        })
        .collect()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next.and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meeting(id: &str, start: DateTime<Utc>, status: MeetingStatus) -> MeetingSchedule {
        MeetingSchedule {
            id: id.to_string(),
            order_id: None,
            doctor_id: "d1".to_string(),
            patient_id: "p1".to_string(),
            doctor_name: Some("BS. Hà".to_string()),
            patient_name: Some("Trần Thị Bình".to_string()),
            start_date: start,
            end_date: start + Duration::minutes(30),
            status,
            meeting_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn event(id: &str, y: i32, m: u32, d: u32, h: u32) -> CalendarEvent {
        map_meeting_to_event(&meeting(
            id,
            Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            MeetingStatus::Pending,
        ))
    }

    #[test]
    fn event_appears_only_in_its_start_day_cell() {
        let events = vec![event("e1", 2026, 6, 10, 9)];
        let grid = month_grid(2026, 6, &events);

        let hits: Vec<&DayCell> = grid.iter().filter(|c| !c.events.is_empty()).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, NaiveDate::from_ymd_opt(2026, 6, 10).unwrap());
    }

    #[test]
    fn five_events_show_four_plus_overflow() {
        let events: Vec<CalendarEvent> = (9..14)
            .map(|h| event(&format!("e{}", h), 2026, 6, 10, h))
            .collect();
        let grid = month_grid(2026, 6, &events);

        let cell = grid
            .iter()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2026, 6, 10).unwrap())
            .unwrap();

        assert_eq!(cell.events.len(), 4);
        assert_eq!(cell.hidden_count, 1);
        assert_eq!(cell.overflow_label.as_deref(), Some("+1 lịch hẹn khác"));
    }

    #[test]
    fn day_events_are_sorted_by_start_time() {
        let events = vec![event("late", 2026, 6, 10, 15), event("early", 2026, 6, 10, 8)];
        let day = events_on_day(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(), &events);

        assert_eq!(day[0].id, "early");
        assert_eq!(day[1].id, "late");
    }

    #[test]
    fn month_grid_is_offset_by_first_weekday() {
        // June 1st 2026 is a Monday, so one leading May cell pads the row.
        let grid = month_grid(2026, 6, &[]);

        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2026, 5, 31).unwrap());
        assert!(!grid[0].in_current_month);
        assert_eq!(grid[1].date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert!(grid[1].in_current_month);
        assert!(grid.len() % 7 == 0);
    }

    #[test]
    fn selecting_a_day_switches_to_day_view() {
        let mut state = CalendarState::new(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(state.view, CalendarView::Month);

        let picked = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
        state.select_day(picked);

        assert_eq!(state.view, CalendarView::Day);
        assert_eq!(state.selected_date, picked);
    }

    #[test]
    fn week_starts_on_sunday_and_has_seven_days() {
        // June 10th 2026 is a Wednesday.
        let week = week_days(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(), &[]);

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2026, 6, 7).unwrap());
        assert_eq!(week[6].date, NaiveDate::from_ymd_opt(2026, 6, 13).unwrap());
    }

    #[test]
    fn day_slots_bucket_by_start_hour() {
        let events = vec![event("e1", 2026, 6, 10, 9), event("e2", 2026, 6, 10, 9)];
        let slots = day_slots(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(), &events);

        assert_eq!(slots.len(), 24);
        assert_eq!(slots[9].events.len(), 2);
        assert!(slots[10].events.is_empty());
    }

    #[test]
    fn status_colors_tag_events() {
        let completed = map_meeting_to_event(&meeting(
            "e1",
            Utc.with_ymd_and_hms(2026, 6, 10, 9, 0, 0).unwrap(),
            MeetingStatus::Completed,
        ));
        assert_eq!(completed.color, COMPLETED_COLOR);
        assert_eq!(completed.title, "Trần Thị Bình");
    }
}
