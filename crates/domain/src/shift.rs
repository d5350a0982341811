use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use officeline_core::{AppError, AppResult, MemberId, NonEmptyString, OfficeId};
use serde::{Deserialize, Serialize};

use crate::{Assignable, Assignment, ShiftId, assignment::no_assignment};

/// Location used when a shift is created without one.
pub const DEFAULT_SHIFT_LOCATION: &str = "Main Office";

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Lifecycle of a scheduled shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Scheduled in the future.
    Upcoming,
    /// Currently being worked.
    Active,
    /// Finished.
    Completed,
}

impl ShiftStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for ShiftStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::Validation(format!(
                "unknown shift status '{value}'"
            ))),
        }
    }
}

/// Input for scheduling a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
    /// Shift title.
    pub title: String,
    /// Calendar day of the shift.
    pub date: NaiveDate,
    /// Start time of day.
    pub start_time: NaiveTime,
    /// End time of day; at or before the start means the shift ends next day.
    pub end_time: NaiveTime,
    /// Optional location.
    pub location: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Role or members the shift is for.
    pub assignment: Option<Assignment>,
}

/// A scheduled block of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    id: ShiftId,
    office_id: OfficeId,
    title: NonEmptyString,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    location: String,
    notes: Option<String>,
    status: ShiftStatus,
    assignment: Assignment,
    created_by: MemberId,
    created_at: DateTime<Utc>,
}

impl Shift {
    /// Creates an upcoming shift. A shift must target a role or members.
    pub fn new(
        office_id: OfficeId,
        input: NewShift,
        created_by: MemberId,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let assignment = input.assignment.ok_or_else(no_assignment)?;

        Ok(Self {
            id: ShiftId::new(),
            office_id,
            title: NonEmptyString::for_field("shift title", input.title)?,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            location: input
                .location
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_SHIFT_LOCATION.to_owned()),
            notes: input
                .notes
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            status: ShiftStatus::Upcoming,
            assignment,
            created_by,
            created_at,
        })
    }

    /// Returns the shift id.
    #[must_use]
    pub fn id(&self) -> ShiftId {
        self.id
    }

    /// Returns the shift title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the calendar day.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the start time.
    #[must_use]
    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    /// Returns the end time.
    #[must_use]
    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> ShiftStatus {
        self.status
    }

    /// Returns the creating member.
    #[must_use]
    pub fn created_by(&self) -> MemberId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the status and reports whether it changed.
    pub fn set_status(&mut self, status: ShiftStatus) -> bool {
        if self.status == status {
            return false;
        }

        self.status = status;
        true
    }

    /// Returns the scheduled length in hours.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        let mut minutes = (self.end_time - self.start_time).num_minutes();
        if minutes <= 0 {
            minutes += MINUTES_PER_DAY;
        }

        minutes as f64 / 60.0
    }
}

impl Assignable for Shift {
    fn office_id(&self) -> OfficeId {
        self.office_id
    }

    fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    fn replace_assignment(&mut self, assignment: Assignment) {
        self.assignment = assignment;
    }
}
