//! Tasks page: filtered list, creation across partner companies and the
//! status workflow.

use crate::api::query::TaskListQuery;
use crate::api::sequencer::RequestSequencer;
use crate::api::{CompanyApi, PartnershipApi, TaskApi, UserApi};
use crate::domain::task::{Task, TaskPriority, TaskStatus};
use crate::domain::types::TaskId;
use crate::dto::tasks::{TaskRow, TasksPageData, TasksQuery, priority_legend, status_legend};
use crate::dto::{SelectOption, employee_options};
use crate::forms::tasks::{AddTaskForm, OWN_COMPANY, TaskStatusForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::partners::partner_companies;
use crate::services::{
    Member, OwnerFilter, ServiceError, ServiceResult, ensure_colleague, non_blank, today,
};

/// Loads one page of tasks with the options of the add form.
///
/// Returns `None` when a newer load for the same view started meanwhile.
pub async fn load_tasks_page<A>(
    api: &A,
    member: &Member,
    query: TasksQuery,
    sequencer: &RequestSequencer,
) -> ServiceResult<Option<TasksPageData>>
where
    A: TaskApi + UserApi + PartnershipApi + CompanyApi,
{
    let ticket = sequencer.issue();

    let page = query.page.unwrap_or(1);
    let owner = OwnerFilter::parse(member, query.owner.as_deref());
    let status = non_blank(query.status.clone()).and_then(|s| s.parse::<TaskStatus>().ok());
    let priority = non_blank(query.priority.clone()).and_then(|p| p.parse::<TaskPriority>().ok());

    let mut list_query = TaskListQuery::new()
        .owner(owner.scope, owner.owner_id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = non_blank(query.search.clone()) {
        list_query = list_query.search(term);
    }
    if let Some(status) = status {
        list_query = list_query.status(status);
    }
    if let Some(priority) = priority {
        list_query = list_query.priority(priority);
    }

    let tasks = api.list_tasks(&list_query).await.map_err(|err| {
        log::error!("Failed to list tasks: {err}");
        err
    })?;
    let employees = api.list_company_users(member.company_id()).await?;

    let mut companies = vec![SelectOption::new(OWN_COMPANY, member.company.name.clone())];
    match partner_companies(api, member).await {
        Ok(partners) => companies.extend(
            partners
                .into_iter()
                .map(|c| SelectOption::new(c.id, c.name)),
        ),
        Err(err) => log::warn!("Failed to load partner companies: {err}"),
    }

    let today = today();
    let rows = Paginated::new(
        tasks
            .data
            .into_iter()
            .map(|t| TaskRow::new(t, today, &employees))
            .collect(),
        tasks.page,
        tasks.total_pages,
    );

    let data = TasksPageData {
        tasks: rows,
        statuses: status_legend(),
        priorities: priority_legend(),
        companies,
        employees: employee_options(&employees),
        can_filter_by_employee: member.is_director_or_senior(),
        search_query: non_blank(query.search),
        status,
        priority,
        owner: owner.as_param(),
    };

    Ok(sequencer.accept(ticket, data))
}

/// Creates a task for the own company or for an accepted partner.
pub async fn create_task<A>(api: &A, member: &Member, form: AddTaskForm) -> ServiceResult<Task>
where
    A: TaskApi + UserApi + PartnershipApi + CompanyApi,
{
    let new_task = form.into_payload(member.company_id(), today())?;

    if new_task.target_company_id == member.company_id() {
        ensure_colleague(api, member, new_task.target_employee_id).await?;
    } else {
        let partners = partner_companies(api, member).await?;
        if !partners.iter().any(|c| c.id == new_task.target_company_id) {
            return Err(ServiceError::Form(
                "Задачу можно поставить только партнёру".to_string(),
            ));
        }
    }

    api.create_task(&new_task).await.map_err(|err| {
        log::error!("Failed to create task: {err}");
        err.into()
    })
}

/// Moves the task along the workflow; only the offered transitions are accepted.
pub async fn change_task_status<A>(
    api: &A,
    id: TaskId,
    form: TaskStatusForm,
) -> ServiceResult<Task>
where
    A: TaskApi,
{
    let next = TaskStatus::try_from(form)?;

    let task = api.get_task(id).await.map_err(|err| {
        log::error!("Failed to get task {id}: {err}");
        err
    })?;
    if !task.status.can_transition_to(next) {
        return Err(ServiceError::Form("Недопустимый переход статуса".to_string()));
    }

    api.update_task_status(id, next).await.map_err(|err| {
        log::error!("Failed to change status of task {id}: {err}");
        err.into()
    })
}

/// Only tasks created by the member's company can be deleted.
pub async fn delete_task<A>(api: &A, member: &Member, id: TaskId) -> ServiceResult<()>
where
    A: TaskApi,
{
    let task = api.get_task(id).await?;
    if task.created_by_company_id != member.company_id() {
        return Err(ServiceError::Unauthorized);
    }

    api.delete_task(id).await.map_err(|err| {
        log::error!("Failed to delete task {id}: {err}");
        err.into()
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::dto::badges::Badged;
    use crate::services::fixtures::*;

    const TASK: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";
    const STRANGER: &str = "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb";

    fn add_form(company: &str) -> AddTaskForm {
        AddTaskForm {
            target_company_id: company.to_string(),
            target_employee_id: EMPLOYEE.to_string(),
            name: "Собрать пакет документов".to_string(),
            deadline_days: "3".to_string(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn own_company_tasks_go_to_colleagues() {
        let mut api = MockApi::new();
        api.expect_list_company_users()
            .returning(|_| Ok(vec![user(EMPLOYEE, "employee", "declarant")]));
        api.expect_create_task()
            .withf(|t| t.status == TaskStatus::New && t.priority == TaskPriority::Normal)
            .returning(|_| Ok(task(TASK, "new")));

        let created = create_task(&api, &declarant("director"), add_form(OWN_COMPANY))
            .await
            .unwrap();
        assert_eq!(created.status, TaskStatus::New);
    }

    #[actix_web::test]
    async fn urgent_task_is_listed_with_its_badges() {
        let due = today().checked_add_days(chrono::Days::new(2)).unwrap();

        let mut api = MockApi::new();
        api.expect_list_company_users()
            .returning(|_| Ok(vec![user(EMPLOYEE, "employee", "declarant")]));
        api.expect_create_task()
            .withf(move |t| {
                t.priority == TaskPriority::Urgent
                    && t.status == TaskStatus::New
                    && t.deadline == due
            })
            .returning(|t| {
                let mut created = task(TASK, "new");
                created.priority = t.priority;
                created.deadline = t.deadline;
                Ok(created)
            });

        let form = AddTaskForm {
            priority: "urgent".to_string(),
            deadline_days: "2".to_string(),
            ..add_form(OWN_COMPANY)
        };
        let created = create_task(&api, &declarant("director"), form)
            .await
            .unwrap();

        let employees = vec![user(EMPLOYEE, "employee", "declarant")];
        let row = TaskRow::new(created, today(), &employees);
        assert_eq!(row.priority, TaskPriority::Urgent.badge());
        assert_eq!(row.priority.label, "Срочный");
        assert_eq!(row.status.icon, "bi-plus-lg");
        assert!(!row.overdue);
        assert_eq!(row.task.deadline, due);
    }

    #[actix_web::test]
    async fn unknown_companies_are_refused() {
        let mut api = MockApi::new();
        api.expect_list_partnerships().returning(|| Ok(Vec::new()));
        api.expect_create_task().never();

        let result = create_task(&api, &declarant("director"), add_form(STRANGER)).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn new_tasks_cannot_jump_to_completed() {
        let mut api = MockApi::new();
        api.expect_get_task().returning(|_| Ok(task(TASK, "new")));
        api.expect_update_task_status().never();

        let form = TaskStatusForm {
            status: "completed".to_string(),
        };
        let result = change_task_status(&api, TASK.parse().unwrap(), form).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn frozen_tasks_resume() {
        let mut api = MockApi::new();
        api.expect_get_task().returning(|_| Ok(task(TASK, "frozen")));
        api.expect_update_task_status()
            .withf(|_, status| *status == TaskStatus::InProgress)
            .returning(|_, _| Ok(task(TASK, "in_progress")));

        let form = TaskStatusForm {
            status: "in_progress".to_string(),
        };
        let updated = change_task_status(&api, TASK.parse().unwrap(), form)
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[actix_web::test]
    async fn rows_offer_next_statuses() {
        let mut api = MockApi::new();
        api.expect_list_tasks()
            .returning(|_| Ok(page(vec![task(TASK, "in_progress")])));
        api.expect_list_company_users()
            .returning(|_| Ok(vec![user(EMPLOYEE, "employee", "declarant")]));
        api.expect_list_partnerships().returning(|| Ok(Vec::new()));

        let data = load_tasks_page(
            &api,
            &declarant("employee"),
            TasksQuery::default(),
            &RequestSequencer::new(),
        )
        .await
        .unwrap()
        .unwrap();

        let row = &data.tasks.items[0];
        assert_eq!(row.next_statuses.len(), 5);
        assert_eq!(row.employee_name.as_deref(), Some("Test employee"));
        assert_eq!(data.companies[0].value, OWN_COMPANY);
    }
}
