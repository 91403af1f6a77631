//! Declarations page: filtered list, creation, hand-over and grouping.

use crate::api::query::DeclarationListQuery;
use crate::api::sequencer::RequestSequencer;
use crate::api::{ClientApi, DeclarationApi, UserApi};
use crate::domain::declaration::{
    Declaration, DeclarationGroup, NewDeclaration, NewDeclarationGroup,
};
use crate::domain::types::{DeclarationId, GroupId, UserId};
use crate::dto::declarations::{
    DeclarationRow, DeclarationsPageData, DeclarationsQuery, mode_options, vehicle_type_options,
};
use crate::dto::{client_options, employee_options};
use crate::forms::declarations::{
    AddDeclarationForm, GroupForm, GroupMembersForm, GroupMembersPayload, RedirectForm,
};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::{
    Member, OwnerFilter, ServiceResult, ensure_colleague, ensure_declarant, non_blank,
    optional_date,
};

fn build_list_query(
    member: &Member,
    query: &DeclarationsQuery,
) -> (DeclarationListQuery, OwnerFilter) {
    let page = query.page.unwrap_or(1);
    let owner = OwnerFilter::parse(member, query.owner.as_deref());

    let mut list_query = DeclarationListQuery::new()
        .owner(owner.scope, owner.owner_id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = non_blank(query.search.clone()) {
        list_query = list_query.search(term);
    }
    if let Some(mode) = non_blank(query.mode.clone()).and_then(|m| m.parse().ok()) {
        list_query = list_query.mode(mode);
    }
    if let Some(client_id) = non_blank(query.client_id.clone()).and_then(|c| c.parse().ok()) {
        list_query = list_query.client(client_id);
    }
    if let Some(kind) = non_blank(query.vehicle_type.clone()).and_then(|v| v.parse().ok()) {
        list_query = list_query.vehicle_type(kind);
    }
    list_query.filters.post_number = non_blank(query.post_number.clone());
    list_query.filters.date_from = optional_date(&query.date_from);
    list_query.filters.date_to = optional_date(&query.date_to);

    (list_query, owner)
}

/// Loads one page of declarations with everything the filters and forms need.
///
/// Returns `None` when a newer load for the same view started meanwhile.
pub async fn load_declarations_page<A>(
    api: &A,
    member: &Member,
    query: DeclarationsQuery,
    sequencer: &RequestSequencer,
) -> ServiceResult<Option<DeclarationsPageData>>
where
    A: DeclarationApi + ClientApi + UserApi,
{
    ensure_declarant(member)?;

    let ticket = sequencer.issue();
    let (list_query, owner) = build_list_query(member, &query);

    let declarations = api.list_declarations(&list_query).await.map_err(|err| {
        log::error!("Failed to list declarations: {err}");
        err
    })?;
    let clients = api.list_clients(None).await?;
    let employees = api.list_company_users(member.company_id()).await?;
    let groups = api.list_groups().await.unwrap_or_else(|err| {
        log::warn!("Failed to list declaration groups: {err}");
        Vec::new()
    });

    let page = Paginated::new(
        declarations
            .data
            .into_iter()
            .map(|d| DeclarationRow::new(d, &clients, &employees))
            .collect(),
        declarations.page,
        declarations.total_pages,
    );

    let data = DeclarationsPageData {
        declarations: page,
        groups,
        clients: client_options(&clients),
        employees: employee_options(&employees),
        modes: mode_options(),
        vehicle_types: vehicle_type_options(),
        can_filter_by_employee: member.is_director_or_senior(),
        search_query: non_blank(query.search),
        owner: owner.as_param(),
    };

    Ok(sequencer.accept(ticket, data))
}

pub async fn create_declaration<A>(
    api: &A,
    member: &Member,
    form: AddDeclarationForm,
) -> ServiceResult<Declaration>
where
    A: DeclarationApi,
{
    ensure_declarant(member)?;

    let new_declaration = NewDeclaration::try_from(form)?;

    api.create_declaration(&new_declaration)
        .await
        .map_err(|err| {
            log::error!("Failed to create declaration: {err}");
            err.into()
        })
}

pub async fn delete_declaration<A>(
    api: &A,
    member: &Member,
    id: DeclarationId,
) -> ServiceResult<()>
where
    A: DeclarationApi,
{
    ensure_declarant(member)?;

    api.delete_declaration(id).await.map_err(|err| {
        log::error!("Failed to delete declaration {id}: {err}");
        err.into()
    })
}

/// Hands the declaration over to a colleague of the same company.
pub async fn redirect_declaration<A>(
    api: &A,
    member: &Member,
    id: DeclarationId,
    form: RedirectForm,
) -> ServiceResult<Declaration>
where
    A: DeclarationApi + UserApi,
{
    ensure_declarant(member)?;

    let to_user = UserId::try_from(form)?;
    ensure_colleague(api, member, to_user).await?;

    api.redirect_declaration(id, to_user).await.map_err(|err| {
        log::error!("Failed to redirect declaration {id}: {err}");
        err.into()
    })
}

pub async fn create_group<A>(
    api: &A,
    member: &Member,
    form: GroupForm,
) -> ServiceResult<DeclarationGroup>
where
    A: DeclarationApi,
{
    ensure_declarant(member)?;

    let group = NewDeclarationGroup::try_from(form)?;

    api.create_group(&group).await.map_err(|err| {
        log::error!("Failed to create declaration group: {err}");
        err.into()
    })
}

pub async fn add_to_group<A>(
    api: &A,
    member: &Member,
    group_id: GroupId,
    form: GroupMembersForm,
) -> ServiceResult<DeclarationGroup>
where
    A: DeclarationApi,
{
    ensure_declarant(member)?;

    let payload = GroupMembersPayload::try_from(form)?;

    api.add_to_group(group_id, payload.declaration_ids)
        .await
        .map_err(|err| {
            log::error!("Failed to add declarations to group {group_id}: {err}");
            err.into()
        })
}

pub async fn remove_from_group<A>(
    api: &A,
    member: &Member,
    group_id: GroupId,
    form: GroupMembersForm,
) -> ServiceResult<DeclarationGroup>
where
    A: DeclarationApi,
{
    ensure_declarant(member)?;

    let payload = GroupMembersPayload::try_from(form)?;

    api.remove_from_group(group_id, payload.declaration_ids)
        .await
        .map_err(|err| {
            log::error!("Failed to remove declarations from group {group_id}: {err}");
            err.into()
        })
}
