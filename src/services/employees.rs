//! Employee management for directors and seniors.

use crate::api::UserApi;
use crate::domain::types::{Note, UserId};
use crate::domain::user::{Role, UserWithRole};
use crate::dto::employee_options;
use crate::dto::employees::{EmployeeRow, EmployeesPageData, role_label, role_options};
use crate::forms::employees::{AssignRoleForm, MessageForm, RemoveEmployeeForm};
use crate::services::{Member, ServiceError, ServiceResult, ensure_role};

const MANAGERS: &[Role] = &[Role::Director, Role::Senior];
const DIRECTOR: &[Role] = &[Role::Director];

pub async fn load_employees_page<A>(api: &A, member: &Member) -> ServiceResult<EmployeesPageData>
where
    A: UserApi,
{
    ensure_role(member, MANAGERS)?;

    let users = api
        .list_company_users(member.company_id())
        .await
        .map_err(|err| {
            log::error!("Failed to list company users: {err}");
            err
        })?;

    let reassign_targets = employee_options(&users);
    let employees = users
        .into_iter()
        .map(|employee| EmployeeRow {
            role_label: role_label(employee.role),
            is_self: employee.user.id == member.id(),
            employee,
        })
        .collect();

    Ok(EmployeesPageData {
        employees,
        roles: role_options(),
        reassign_targets,
        can_manage_roles: member.role() == Role::Director,
    })
}

/// Loads a colleague, refusing users of other companies and the member themself.
async fn colleague<A>(api: &A, member: &Member, id: UserId) -> ServiceResult<UserWithRole>
where
    A: UserApi,
{
    if id == member.id() {
        return Err(ServiceError::Form(
            "Действие недоступно для своей учётной записи".to_string(),
        ));
    }
    let user = api.get_user(id).await?;
    if user.user.company_id != Some(member.company_id()) {
        return Err(ServiceError::NotFound);
    }
    Ok(user)
}

pub async fn assign_role<A>(
    api: &A,
    member: &Member,
    id: UserId,
    form: AssignRoleForm,
) -> ServiceResult<UserWithRole>
where
    A: UserApi,
{
    ensure_role(member, DIRECTOR)?;

    let role = Role::try_from(form)?;
    colleague(api, member, id).await?;

    api.assign_role(id, role).await.map_err(|err| {
        log::error!("Failed to assign role to user {id}: {err}");
        err.into()
    })
}

pub async fn block_employee<A>(api: &A, member: &Member, id: UserId) -> ServiceResult<()>
where
    A: UserApi,
{
    ensure_role(member, MANAGERS)?;
    colleague(api, member, id).await?;

    api.block_user(id).await.map(|_| ()).map_err(|err| {
        log::error!("Failed to block user {id}: {err}");
        err.into()
    })
}

pub async fn unblock_employee<A>(api: &A, member: &Member, id: UserId) -> ServiceResult<()>
where
    A: UserApi,
{
    ensure_role(member, MANAGERS)?;
    colleague(api, member, id).await?;

    api.unblock_user(id).await.map(|_| ()).map_err(|err| {
        log::error!("Failed to unblock user {id}: {err}");
        err.into()
    })
}

/// Removes the employee after handing their records to another colleague.
pub async fn remove_employee<A>(
    api: &A,
    member: &Member,
    id: UserId,
    form: RemoveEmployeeForm,
) -> ServiceResult<()>
where
    A: UserApi,
{
    ensure_role(member, DIRECTOR)?;

    let payload = form.into_payload(id)?;
    colleague(api, member, id).await?;

    let target = api.get_user(payload.reassign_to).await?;
    if target.user.company_id != Some(member.company_id()) || target.user.is_blocked {
        return Err(ServiceError::Form(
            "Записи можно передать только активному сотруднику".to_string(),
        ));
    }

    api.remove_user(id, payload.reassign_to)
        .await
        .map_err(|err| {
            log::error!("Failed to remove user {id}: {err}");
            err.into()
        })
}

pub async fn message_employee<A>(
    api: &A,
    member: &Member,
    id: UserId,
    form: MessageForm,
) -> ServiceResult<()>
where
    A: UserApi,
{
    ensure_role(member, MANAGERS)?;

    let message = Note::try_from(form)?;
    colleague(api, member, id).await?;

    api.message_user(id, &message).await.map_err(|err| {
        log::error!("Failed to message user {id}: {err}");
        err.into()
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::services::fixtures::*;
    use crate::services::fixtures::DIRECTOR;

    const OUTSIDER: &str = "cccccccc-cccc-4ccc-8ccc-cccccccccccc";

    #[actix_web::test]
    async fn employees_cannot_open_the_page() {
        let api = MockApi::new();
        let result = load_employees_page(&api, &declarant("employee")).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn seniors_see_the_list_without_role_management() {
        let mut api = MockApi::new();
        api.expect_list_company_users().returning(|_| {
            Ok(vec![
                user(DIRECTOR, "director", "declarant"),
                user(EMPLOYEE, "senior", "declarant"),
            ])
        });

        let data = load_employees_page(&api, &declarant("senior")).await.unwrap();
        assert_eq!(data.employees.len(), 2);
        assert!(data.employees[1].is_self);
        assert_eq!(data.employees[0].role_label, "Директор");
        assert!(!data.can_manage_roles);
    }

    #[actix_web::test]
    async fn only_directors_assign_roles() {
        let api = MockApi::new();
        let form = AssignRoleForm {
            role: "senior".to_string(),
        };
        let result =
            assign_role(&api, &declarant("senior"), DIRECTOR.parse().unwrap(), form).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn directors_cannot_remove_themselves() {
        let mut api = MockApi::new();
        api.expect_remove_user().never();
        let form = RemoveEmployeeForm {
            reassign_to_id: EMPLOYEE.to_string(),
        };
        let result =
            remove_employee(&api, &declarant("director"), DIRECTOR.parse().unwrap(), form).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn removal_reassigns_to_a_colleague() {
        let mut api = MockApi::new();
        api.expect_get_user().returning(|id| {
            let id = id.to_string();
            Ok(user(&id, "employee", "declarant"))
        });
        api.expect_remove_user()
            .withf(|id, target| id.to_string() == EMPLOYEE && target.to_string() == OUTSIDER)
            .returning(|_, _| Ok(()));

        let form = RemoveEmployeeForm {
            reassign_to_id: OUTSIDER.to_string(),
        };
        let result =
            remove_employee(&api, &declarant("director"), EMPLOYEE.parse().unwrap(), form).await;
        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn users_of_other_companies_are_not_found() {
        let mut api = MockApi::new();
        api.expect_get_user().returning(|_| {
            let mut stranger = user(OUTSIDER, "employee", "declarant");
            stranger.user.company_id = None;
            Ok(stranger)
        });
        api.expect_block_user().never();

        let result = block_employee(&api, &declarant("director"), OUTSIDER.parse().unwrap()).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
