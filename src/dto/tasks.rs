use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::task::{Task, TaskPriority, TaskStatus};
use crate::domain::user::UserWithRole;
use crate::dto::SelectOption;
use crate::dto::badges::{Badge, Badged, legend};
use crate::dto::user_name;
use crate::pagination::Paginated;

/// Query string of the tasks page.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TasksQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// `all`, `mine` or an employee id.
    pub owner: Option<String>,
    pub page: Option<usize>,
    /// Browser tab the list is shown in; see [`crate::api::sequencer::tab_token`].
    pub tab: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusOption {
    pub status: TaskStatus,
    pub badge: Badge,
}

#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub task: Task,
    pub status: Badge,
    pub priority: Badge,
    pub overdue: bool,
    pub employee_name: Option<String>,
    /// Transitions allowed from the current status.
    pub next_statuses: Vec<StatusOption>,
}

impl TaskRow {
    pub fn new(task: Task, today: NaiveDate, employees: &[UserWithRole]) -> Self {
        Self {
            status: task.status.badge(),
            priority: task.priority.badge(),
            overdue: task.is_overdue(today),
            employee_name: user_name(employees, task.target_employee_id),
            next_statuses: task
                .status
                .next_statuses()
                .iter()
                .map(|status| StatusOption {
                    status: *status,
                    badge: status.badge(),
                })
                .collect(),
            task,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TasksPageData {
    pub tasks: Paginated<TaskRow>,
    pub statuses: Vec<(TaskStatus, Badge)>,
    pub priorities: Vec<(TaskPriority, Badge)>,
    pub companies: Vec<SelectOption>,
    pub employees: Vec<SelectOption>,
    pub can_filter_by_employee: bool,
    pub search_query: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub owner: String,
}

pub fn status_legend() -> Vec<(TaskStatus, Badge)> {
    legend(&TaskStatus::ALL)
}

pub fn priority_legend() -> Vec<(TaskPriority, Badge)> {
    legend(&TaskPriority::ALL)
}
