use async_trait::async_trait;
use officeline_core::{AppResult, OfficeId};
use officeline_domain::{Shift, ShiftId, Task, TaskId};

/// Repository port for shifts and tasks.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Inserts a new shift.
    async fn insert_shift(&self, shift: Shift) -> AppResult<()>;

    /// Replaces a stored shift.
    async fn save_shift(&self, shift: Shift) -> AppResult<()>;

    /// Finds one shift inside an office.
    async fn find_shift(&self, office_id: OfficeId, shift_id: ShiftId) -> AppResult<Option<Shift>>;

    /// Lists office shifts ordered by date and start time.
    async fn list_shifts(&self, office_id: OfficeId) -> AppResult<Vec<Shift>>;

    /// Inserts a new task.
    async fn insert_task(&self, task: Task) -> AppResult<()>;

    /// Replaces a stored task.
    async fn save_task(&self, task: Task) -> AppResult<()>;

    /// Finds one task inside an office.
    async fn find_task(&self, office_id: OfficeId, task_id: TaskId) -> AppResult<Option<Task>>;

    /// Lists office tasks ordered by deadline.
    async fn list_tasks(&self, office_id: OfficeId) -> AppResult<Vec<Task>>;
}
