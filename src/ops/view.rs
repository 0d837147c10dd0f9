use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::model::task::Task;

/// Completion filter applied first in the view pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Done,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Active, StatusFilter::Done];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Done => task.completed,
        }
    }

    /// All → Active → Done → All
    pub fn next(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Done,
            StatusFilter::Done => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Done => "Done",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Done => "done",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "done" => Ok(StatusFilter::Done),
            _ => Err(format!("unknown filter '{s}' (expected all, active, or done)")),
        }
    }
}

/// Filter, sort, and search settings for the visible list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
    pub filter: StatusFilter,
    pub sort_by_due: bool,
    pub search: String,
}

/// Derive the visible list: status filter, then the optional due-date sort,
/// then the title search. The order matters and must stay fixed.
pub fn derive_view<'a>(tasks: &'a [Task], criteria: &ViewCriteria) -> Vec<&'a Task> {
    let mut list: Vec<&Task> = tasks
        .iter()
        .filter(|t| criteria.filter.matches(t))
        .collect();

    if criteria.sort_by_due {
        // sort_by is stable: undated tasks keep their relative order at the end
        list.sort_by(|a, b| compare_due(a.due_date, b.due_date));
    }

    if criteria.search.trim().is_empty() {
        return list;
    }
    let needle = criteria.search.to_lowercase();
    list.retain(|t| t.title.to_lowercase().contains(&needle));
    list
}

/// Ascending by date, tasks without a due date last
fn compare_due(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Derived urgency of a task's due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Future,
}

/// Overdue when due before `today` and still open; Today when due today;
/// Future otherwise, including when there is no due date.
pub fn due_status(task: &Task, today: NaiveDate) -> DueStatus {
    match task.due_date {
        Some(due) if due < today && !task.completed => DueStatus::Overdue,
        Some(due) if due == today => DueStatus::Today,
        _ => DueStatus::Future,
    }
}
