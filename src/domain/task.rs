//! Tasks exchanged between companies and their status workflow.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CertificateId, CompanyId, DeclarationId, DocumentId, Note, StatusChangeId, TaskId, TaskName,
    TypeConstraintError, UserId,
};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Urgent,
    High,
    #[default]
    Normal,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Urgent, TaskPriority::High, TaskPriority::Normal];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Urgent => "urgent",
            TaskPriority::High => "high",
            TaskPriority::Normal => "normal",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        TaskPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown priority `{value}`")))
    }
}

/// Seven-state task lifecycle.
///
/// `new -> in_progress -> {waiting, on_review, completed, cancelled, frozen}`;
/// `waiting`, `frozen` and `on_review` can go back to `in_progress`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    New,
    InProgress,
    Waiting,
    OnReview,
    Completed,
    Cancelled,
    Frozen,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 7] = [
        TaskStatus::New,
        TaskStatus::InProgress,
        TaskStatus::Waiting,
        TaskStatus::OnReview,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
        TaskStatus::Frozen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::New => "new",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Waiting => "waiting",
            TaskStatus::OnReview => "on_review",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Frozen => "frozen",
        }
    }

    pub fn next_statuses(&self) -> &'static [TaskStatus] {
        match self {
            TaskStatus::New => &[TaskStatus::InProgress],
            TaskStatus::InProgress => &[
                TaskStatus::Waiting,
                TaskStatus::OnReview,
                TaskStatus::Completed,
                TaskStatus::Cancelled,
                TaskStatus::Frozen,
            ],
            TaskStatus::Waiting | TaskStatus::Frozen | TaskStatus::OnReview => {
                &[TaskStatus::InProgress]
            }
            TaskStatus::Completed | TaskStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    /// Whether the task still counts as active work.
    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown task status `{value}`")))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusChange {
    pub id: StatusChangeId,
    pub task_id: TaskId,
    pub from_status: TaskStatus,
    pub to_status: TaskStatus,
    pub changed_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub target_company_id: CompanyId,
    pub target_employee_id: UserId,
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub attached_document_ids: Vec<DocumentId>,
    #[serde(default)]
    pub attached_declaration_ids: Vec<DeclarationId>,
    #[serde(default)]
    pub attached_certificate_ids: Vec<CertificateId>,
    pub created_by_user_id: UserId,
    pub created_by_company_id: CompanyId,
    #[serde(default)]
    pub status_history: Vec<TaskStatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.deadline < today
    }
}

/// Payload for creating a task.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub target_company_id: CompanyId,
    pub target_employee_id: UserId,
    pub name: TaskName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    pub attached_document_ids: Vec<DocumentId>,
    pub attached_declaration_ids: Vec<DeclarationId>,
    pub attached_certificate_ids: Vec<CertificateId>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<TaskName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_employee_id: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use TaskStatus::*;

    #[test]
    fn new_tasks_can_only_be_started() {
        assert_eq!(New.next_statuses(), &[InProgress]);
        assert!(!New.can_transition_to(Completed));
    }

    #[test]
    fn in_progress_fans_out_to_five_states() {
        for next in [Waiting, OnReview, Completed, Cancelled, Frozen] {
            assert!(InProgress.can_transition_to(next), "{next}");
        }
        assert!(!InProgress.can_transition_to(New));
    }

    #[test]
    fn paused_states_return_to_in_progress() {
        for paused in [Waiting, Frozen, OnReview] {
            assert_eq!(paused.next_statuses(), &[InProgress]);
        }
    }

    #[test]
    fn finished_tasks_are_final() {
        assert!(Completed.next_statuses().is_empty());
        assert!(Cancelled.next_statuses().is_empty());
        assert!(!Completed.is_open());
    }

    #[test]
    fn statuses_use_snake_case_literals() {
        assert_eq!(serde_json::to_string(&OnReview).unwrap(), "\"on_review\"");
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(InProgress));
        assert_eq!("urgent".parse::<TaskPriority>(), Ok(TaskPriority::Urgent));
    }
}
