use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use officeline_core::{AppError, AppResult, MemberId, NonEmptyString, OfficeId};
use serde::{Deserialize, Serialize};

use crate::{Assignable, Assignment, Priority, TaskId, assignment::no_assignment};

/// Progress of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(AppError::Validation(format!("unknown task status '{value}'"))),
        }
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Day the task is due.
    pub deadline: NaiveDate,
    /// Urgency.
    pub priority: Priority,
    /// Optional grouping label.
    pub category: Option<String>,
    /// Role or members the task is for.
    pub assignment: Option<Assignment>,
}

/// A unit of work with a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    office_id: OfficeId,
    title: NonEmptyString,
    description: String,
    deadline: NaiveDate,
    priority: Priority,
    status: TaskStatus,
    category: Option<String>,
    assignment: Assignment,
    created_by: MemberId,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in `todo`. A task must target a role or members.
    pub fn new(
        office_id: OfficeId,
        input: NewTask,
        created_by: MemberId,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let assignment = input.assignment.ok_or_else(no_assignment)?;

        Ok(Self {
            id: TaskId::new(),
            office_id,
            title: NonEmptyString::for_field("task title", input.title)?,
            description: input.description.trim().to_owned(),
            deadline: input.deadline,
            priority: input.priority,
            status: TaskStatus::Todo,
            category: input
                .category
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            assignment,
            created_by,
            created_at,
        })
    }

    /// Returns the task id.
    #[must_use]
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the deadline.
    #[must_use]
    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Returns the priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
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

    /// Returns true once the task is done.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Sets the status and reports whether it changed.
    pub fn set_status(&mut self, status: TaskStatus) -> bool {
        if self.status == status {
            return false;
        }

        self.status = status;
        true
    }

    /// Returns true when the deadline passed before `today` and the task is open.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.deadline < today
    }
}

impl Assignable for Task {
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

/// Optional task predicates; every provided predicate must hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Keep only tasks with this priority.
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// Returns true when `task` passes every provided predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoleName;

    fn day(month: u32, date: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, date).unwrap_or_else(|| unreachable!())
    }

    fn task(priority: Priority) -> Task {
        Task::new(
            OfficeId::new(),
            NewTask {
                title: "Update Inventory System".to_owned(),
                description: "Review supplier information".to_owned(),
                deadline: day(1, 20),
                priority,
                category: Some("Inventory".to_owned()),
                assignment: Some(Assignment::to_role(RoleName::employee())),
            },
            MemberId::new(),
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn task_without_assignment_is_rejected() {
        let created = Task::new(
            OfficeId::new(),
            NewTask {
                title: "Orphan".to_owned(),
                description: String::new(),
                deadline: day(1, 1),
                priority: Priority::Low,
                category: None,
                assignment: None,
            },
            MemberId::new(),
            Utc::now(),
        );

        assert!(created.is_err());
    }

    #[test]
    fn open_task_past_deadline_is_overdue() {
        let mut task = task(Priority::High);
        assert!(task.is_overdue(day(1, 21)));
        assert!(!task.is_overdue(day(1, 20)));

        assert!(task.set_status(TaskStatus::Done));
        assert!(!task.is_overdue(day(1, 21)));
    }

    #[test]
    fn filter_ands_predicates() {
        let high = task(Priority::High);
        let low = task(Priority::Low);
        let filter = TaskFilter {
            status: Some(TaskStatus::Todo),
            priority: Some(Priority::High),
        };

        assert!(filter.matches(&high));
        assert!(!filter.matches(&low));
        assert!(TaskFilter::default().matches(&low));
    }

    #[test]
    fn status_storage_values_roundtrip() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(TaskStatus::from_str(status.as_str()).ok(), Some(status));
        }
    }
}
