//! Summary statistics derived from entity snapshots.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Assignable, InventoryItem, Member, OverstockRatio, Priority, Shift, Task};

/// Entity snapshots a summary is computed from.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsInputs<'a> {
    /// Office members.
    pub members: &'a [Member],
    /// Office tasks.
    pub tasks: &'a [Task],
    /// Office shifts.
    pub shifts: &'a [Shift],
    /// Office inventory.
    pub items: &'a [InventoryItem],
}

/// Task counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    /// High-priority tasks.
    pub high: usize,
    /// Medium-priority tasks.
    pub medium: usize,
    /// Low-priority tasks.
    pub low: usize,
}

/// Staff and task counts for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStats {
    /// Role name.
    pub role: String,
    /// Members holding the role.
    pub staff: usize,
    /// Tasks affecting at least one member with the role.
    pub tasks: usize,
}

/// Point-in-time summary of an office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Number of tasks.
    pub total_tasks: usize,
    /// Number of finished tasks.
    pub completed_tasks: usize,
    /// `completed_tasks / total_tasks`, 0 without tasks.
    pub task_completion_rate: f64,
    /// Open tasks past their deadline.
    pub overdue_tasks: usize,
    /// Tasks per priority.
    pub tasks_by_priority: PriorityBreakdown,
    /// Number of members.
    pub total_staff: usize,
    /// Number of active members.
    pub active_staff: usize,
    /// `active_staff / total_staff`, 0 without members.
    pub staff_utilization: f64,
    /// Sum of scheduled shift hours.
    pub scheduled_hours: f64,
    /// Value of stock on hand in minor units.
    pub inventory_value_cents: u64,
    /// Items that are low or out of stock.
    pub low_stock_count: usize,
    /// Per-role staff and task counts, ordered by role name.
    pub role_breakdown: Vec<RoleStats>,
}

/// Computes a snapshot. Pure; nothing is cached between calls.
#[must_use]
pub fn summarize(
    inputs: AnalyticsInputs<'_>,
    today: NaiveDate,
    ratio: OverstockRatio,
) -> AnalyticsSnapshot {
    let total_tasks = inputs.tasks.len();
    let completed_tasks = inputs.tasks.iter().filter(|task| task.is_done()).count();
    let total_staff = inputs.members.len();
    let active_staff = inputs
        .members
        .iter()
        .filter(|member| member.is_active())
        .count();

    let mut tasks_by_priority = PriorityBreakdown::default();
    for task in inputs.tasks {
        match task.priority() {
            Priority::High => tasks_by_priority.high += 1,
            Priority::Medium => tasks_by_priority.medium += 1,
            Priority::Low => tasks_by_priority.low += 1,
        }
    }

    AnalyticsSnapshot {
        total_tasks,
        completed_tasks,
        task_completion_rate: ratio_of(completed_tasks, total_tasks),
        overdue_tasks: inputs
            .tasks
            .iter()
            .filter(|task| task.is_overdue(today))
            .count(),
        tasks_by_priority,
        total_staff,
        active_staff,
        staff_utilization: ratio_of(active_staff, total_staff),
        scheduled_hours: inputs.shifts.iter().map(Shift::duration_hours).sum(),
        inventory_value_cents: inputs
            .items
            .iter()
            .map(InventoryItem::stock_value_cents)
            .fold(0_u64, u64::saturating_add),
        low_stock_count: inputs
            .items
            .iter()
            .filter(|item| item.classify_with(ratio).needs_restock())
            .count(),
        role_breakdown: role_breakdown(inputs.members, inputs.tasks),
    }
}

fn ratio_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    part as f64 / whole as f64
}

fn role_breakdown(members: &[Member], tasks: &[Task]) -> Vec<RoleStats> {
    let mut stats: BTreeMap<&str, RoleStats> = BTreeMap::new();
    for member in members {
        stats
            .entry(member.role().as_str())
            .or_insert_with(|| RoleStats {
                role: member.role().as_str().to_owned(),
                staff: 0,
                tasks: 0,
            })
            .staff += 1;
    }

    for task in tasks {
        let affected = task.resolve_affected_members(members);
        for (role, entry) in &mut stats {
            if affected.iter().any(|member| member.role().as_str() == *role) {
                entry.tasks += 1;
            }
        }
    }

    stats.into_values().collect()
}
