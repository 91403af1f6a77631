use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::task::{NewTask, TaskPriority, TaskStatus};
use crate::domain::types::{CompanyId, Note, TaskName};
use crate::forms::certificates::deadline_in_days;
use crate::forms::{FormError, parse_date, parse_id, parse_ids};

/// Value of the company selector meaning "my own company".
pub const OWN_COMPANY: &str = "own";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddTaskForm {
    pub target_company_id: String,
    pub target_employee_id: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub note: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
    /// Explicit calendar deadline; takes precedence over `deadline_days`.
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub deadline_days: String,
    #[serde(default)]
    pub document_ids: Vec<String>,
    #[serde(default)]
    pub declaration_ids: Vec<String>,
    #[serde(default)]
    pub certificate_ids: Vec<String>,
}

impl AddTaskForm {
    fn deadline(&self, today: NaiveDate) -> Result<NaiveDate, FormError> {
        if !self.deadline.trim().is_empty() {
            return parse_date(&self.deadline);
        }
        if !self.deadline_days.trim().is_empty() {
            return deadline_in_days(today, &self.deadline_days);
        }
        Err(FormError::Required("Срок"))
    }

    fn target_company(&self, own_company: CompanyId) -> Result<CompanyId, FormError> {
        match self.target_company_id.trim() {
            "" | OWN_COMPANY => Ok(own_company),
            id => parse_id(id, "Компания"),
        }
    }

    pub fn into_payload(
        self,
        own_company: CompanyId,
        today: NaiveDate,
    ) -> Result<NewTask, FormError> {
        self.validate()?;

        let priority = match self.priority.trim() {
            "" => TaskPriority::default(),
            value => value.parse()?,
        };
        let status = match self.status.trim() {
            "" => TaskStatus::default(),
            value => value.parse()?,
        };

        Ok(NewTask {
            target_company_id: self.target_company(own_company)?,
            target_employee_id: parse_id(&self.target_employee_id, "Сотрудник")?,
            deadline: self.deadline(today)?,
            name: TaskName::new(self.name)?,
            note: Note::optional(&self.note),
            priority,
            status,
            attached_document_ids: parse_ids(&self.document_ids)?,
            attached_declaration_ids: parse_ids(&self.declaration_ids)?,
            attached_certificate_ids: parse_ids(&self.certificate_ids)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusForm {
    pub status: String,
}

impl TryFrom<TaskStatusForm> for TaskStatus {
    type Error = FormError;

    fn try_from(form: TaskStatusForm) -> Result<Self, Self::Error> {
        Ok(form.status.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWN: &str = "44444444-4444-4444-8444-444444444444";
    const PARTNER: &str = "55555555-5555-4555-8555-555555555555";
    const EMPLOYEE: &str = "33333333-3333-4333-8333-333333333333";

    fn own() -> CompanyId {
        OWN.parse().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 30).unwrap()
    }

    fn form() -> AddTaskForm {
        AddTaskForm {
            target_company_id: OWN_COMPANY.to_string(),
            target_employee_id: EMPLOYEE.to_string(),
            name: "Подготовить документы".to_string(),
            deadline_days: "3".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_normal_new_task_in_own_company() {
        let task = form().into_payload(own(), today()).unwrap();
        assert_eq!(task.target_company_id, own());
        assert_eq!(task.priority, TaskPriority::Normal);
        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.deadline, NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
    }

    #[test]
    fn explicit_date_wins_over_days() {
        let mut form = form();
        form.target_company_id = PARTNER.to_string();
        form.deadline = "2026-03-01".to_string();
        let task = form.into_payload(own(), today()).unwrap();
        assert_eq!(task.target_company_id.to_string(), PARTNER);
        assert_eq!(task.deadline, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn name_length_is_bounded() {
        let mut empty = form();
        empty.name = String::new();
        assert!(matches!(
            empty.into_payload(own(), today()),
            Err(FormError::Validation(_))
        ));

        let mut long = form();
        long.name = "x".repeat(256);
        assert!(long.into_payload(own(), today()).is_err());
    }

    #[test]
    fn deadline_is_required() {
        let mut form = form();
        form.deadline_days = String::new();
        assert!(matches!(
            form.into_payload(own(), today()),
            Err(FormError::Required(_))
        ));
    }
}
