use async_trait::async_trait;
use officeline_application::ScheduleRepository;
use officeline_core::{AppError, AppResult, OfficeId};
use officeline_domain::{Assignable, Shift, ShiftId, Task, TaskId};

use super::InMemoryOfficeStore;

#[async_trait]
impl ScheduleRepository for InMemoryOfficeStore {
    async fn insert_shift(&self, shift: Shift) -> AppResult<()> {
        let key = (shift.office_id(), shift.id());
        let mut shifts = self.shifts.write().await;

        if shifts.contains_key(&key) {
            return Err(AppError::Conflict(format!("shift '{}' already exists", key.1)));
        }

        shifts.insert(key, shift);
        Ok(())
    }

    async fn save_shift(&self, shift: Shift) -> AppResult<()> {
        let mut shifts = self.shifts.write().await;
        let stored = shifts
            .get_mut(&(shift.office_id(), shift.id()))
            .ok_or_else(|| AppError::NotFound(format!("shift '{}' does not exist", shift.id())))?;

        *stored = shift;
        Ok(())
    }

    async fn find_shift(&self, office_id: OfficeId, shift_id: ShiftId) -> AppResult<Option<Shift>> {
        Ok(self.shifts.read().await.get(&(office_id, shift_id)).cloned())
    }

    async fn list_shifts(&self, office_id: OfficeId) -> AppResult<Vec<Shift>> {
        let shifts = self.shifts.read().await;

        let mut values: Vec<Shift> = shifts
            .iter()
            .filter(|((stored_office_id, _), _)| *stored_office_id == office_id)
            .map(|(_, shift)| shift.clone())
            .collect();
        values.sort_by_key(|shift| (shift.date(), shift.start_time(), shift.created_at()));

        Ok(values)
    }

    async fn insert_task(&self, task: Task) -> AppResult<()> {
        let key = (task.office_id(), task.id());
        let mut tasks = self.tasks.write().await;

        if tasks.contains_key(&key) {
            return Err(AppError::Conflict(format!("task '{}' already exists", key.1)));
        }

        tasks.insert(key, task);
        Ok(())
    }

    async fn save_task(&self, task: Task) -> AppResult<()> {
        let mut tasks = self.tasks.write().await;
        let stored = tasks
            .get_mut(&(task.office_id(), task.id()))
            .ok_or_else(|| AppError::NotFound(format!("task '{}' does not exist", task.id())))?;

        *stored = task;
        Ok(())
    }

    async fn find_task(&self, office_id: OfficeId, task_id: TaskId) -> AppResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&(office_id, task_id)).cloned())
    }

    async fn list_tasks(&self, office_id: OfficeId) -> AppResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        let mut values: Vec<Task> = tasks
            .iter()
            .filter(|((stored_office_id, _), _)| *stored_office_id == office_id)
            .map(|(_, task)| task.clone())
            .collect();
        values.sort_by_key(|task| (task.deadline(), task.created_at()));

        Ok(values)
    }
}
