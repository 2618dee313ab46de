//! Cleaning routine data model

use chrono::NaiveDate;
use home_common::time::format_date;
use home_common::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Storage-assigned routine identifier
pub type RoutineId = i64;

/// Storage-assigned record identifier
pub type RecordId = i64;

/// Label used when a routine has never been recorded
pub const NEVER_RECORDED: &str = "never";

/// Structured routine identity: which room, which task.
///
/// Stored and displayed as `"<Room>/<Task>"`; in memory the two parts are
/// kept apart so nothing downstream has to split strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutineTitle {
    room: String,
    task: String,
}

impl RoutineTitle {
    pub const SEPARATOR: char = '/';

    /// Build a title from its parts. Neither part may be empty or contain `/`.
    pub fn new(room: impl Into<String>, task: impl Into<String>) -> Result<Self> {
        let room = room.into();
        let task = task.into();
        let valid = |part: &str| !part.is_empty() && !part.contains(Self::SEPARATOR);
        if !valid(&room) || !valid(&task) {
            return Err(Error::InvalidTitle(format!("{}{}{}", room, Self::SEPARATOR, task)));
        }
        Ok(Self { room, task })
    }

    /// Parse the stored `"<Room>/<Task>"` form.
    ///
    /// Anything other than exactly two non-empty segments is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split(Self::SEPARATOR).collect::<Vec<_>>().as_slice() {
            [room, task] => Self::new(*room, *task).map_err(|_| Error::InvalidTitle(raw.to_string())),
            _ => Err(Error::InvalidTitle(raw.to_string())),
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn task(&self) -> &str {
        &self.task
    }
}

impl fmt::Display for RoutineTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.room, Self::SEPARATOR, self.task)
    }
}

impl FromStr for RoutineTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Recurring chore definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    pub id: RoutineId,
    pub title: RoutineTitle,
    /// Recurrence in whole weeks, always positive
    pub frequency_weeks: u32,
}

/// One completion of a routine (date only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub routine_id: RoutineId,
    pub recorded_at: NaiveDate,
}

/// A routine that is due, with its last completion (`None` = never)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedRoutine {
    pub routine_id: RoutineId,
    pub title: RoutineTitle,
    pub last_recorded_at: Option<NaiveDate>,
}

impl ExpectedRoutine {
    pub fn last_recorded_label(&self) -> String {
        last_recorded_label(self.last_recorded_at)
    }
}

/// Anything carrying a routine title, hence groupable by room
pub trait Titled {
    fn title(&self) -> &RoutineTitle;
}

impl Titled for Routine {
    fn title(&self) -> &RoutineTitle {
        &self.title
    }
}

impl Titled for ExpectedRoutine {
    fn title(&self) -> &RoutineTitle {
        &self.title
    }
}

/// `YYYY-MM-DD`, or `never`
pub fn last_recorded_label(last_recorded_at: Option<NaiveDate>) -> String {
    match last_recorded_at {
        Some(date) => format_date(date),
        None => NEVER_RECORDED.to_string(),
    }
}
