use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::Task;

/// Tasks due within this many days get the "Due Soon" badge.
pub const DUE_SOON_DAYS: i64 = 2;

/// Status badge shown next to a task title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Completed,
    Overdue,
    DueSoon,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Completed => "Completed",
            Badge::Overdue => "Overdue",
            Badge::DueSoon => "Due Soon",
        }
    }
}

/// Parses a due-date string leniently.
///
/// Accepts a bare date, a date-time without offset, or an RFC 3339
/// timestamp (offset dropped). Returns `None` for anything else,
/// including the empty string.
pub fn parse_due(due: &str) -> Option<NaiveDateTime> {
    let due = due.trim();
    if due.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(due, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(due) {
        return Some(dt.naive_local());
    }
    None
}

/// Computes the badge for a task relative to `now`.
///
/// Completion wins over everything; otherwise the due date is bucketed
/// by whole days remaining (rounded up), matching the list's coloring:
/// negative is overdue, 0..=2 is due soon, further out gets no badge.
/// An absent or unparseable due date yields no badge.
pub fn badge_for(task: &Task, now: NaiveDateTime) -> Option<Badge> {
    if task.completed {
        return Some(Badge::Completed);
    }
    let due = parse_due(&task.due_date)?;
    let days = days_until(due, now);
    if days < 0 {
        Some(Badge::Overdue)
    } else if days <= DUE_SOON_DAYS {
        Some(Badge::DueSoon)
    } else {
        None
    }
}

/// Whole days from `now` to `due`, rounded toward the future. A task
/// due an hour ago still counts as day 0; it only becomes overdue once
/// a full day behind.
fn days_until(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let secs = (due - now).num_seconds();
    (secs + 86_399).div_euclid(86_400)
}
