use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::sequencer::{ListSequencers, tab_token};
use crate::domain::types::CertificateId;
use crate::dto::certificates::CertificatesQuery;
use crate::forms::certificates::{
    AddCertificateForm, AttachPaymentForm, CertificateStatusForm, FillNumberForm,
};
use crate::forms::declarations::RedirectForm;
use crate::models::auth::MemberContext;
use crate::routes::{
    finish, member_context, page_error, page_link_suffix, parse_form, render_template,
};
use crate::services::certificates as certificates_service;

const BACK: &str = "/certificates";

#[get("/certificates")]
pub async fn show_certificates(
    ctx: MemberContext,
    query: web::Query<CertificatesQuery>,
    sequencers: web::Data<ListSequencers>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut filters = query.into_inner();
    let tab = tab_token(filters.tab.as_deref());
    filters.tab = Some(tab.to_string());
    let sequencer = sequencers.for_view(ctx.member.id(), "certificates", tab);
    let suffix = page_link_suffix(&CertificatesQuery {
        page: None,
        ..filters.clone()
    });

    match certificates_service::load_certificates_page(&ctx.api, &ctx.member, filters, &sequencer)
        .await
    {
        Ok(Some(data)) => {
            let mut context = member_context(&ctx, &flash_messages, BACK);
            context.insert("certificates", &data.certificates);
            context.insert("statuses", &data.statuses);
            context.insert("clients", &data.clients);
            context.insert("employees", &data.employees);
            context.insert("certifiers", &data.certifiers);
            context.insert("declarations", &data.declarations);
            context.insert("can_create", &data.can_create);
            context.insert("can_filter_by_employee", &data.can_filter_by_employee);
            context.insert("search_query", &data.search_query);
            context.insert("status", &data.status);
            context.insert("owner", &data.owner);
            context.insert("tab", &tab);
            context.insert("query_suffix", &suffix);

            render_template(&tera, "certificates/index.html", &context)
        }
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/certificates/add")]
pub async fn add_certificate(ctx: MemberContext, body: web::Bytes) -> impl Responder {
    let result = match parse_form::<AddCertificateForm>(&body) {
        Ok(form) => certificates_service::create_certificate(&ctx.api, &ctx.member, form).await,
        Err(err) => Err(err),
    };
    finish(
        result,
        "Сертификат отправлен.",
        "Ошибка при создании сертификата",
        BACK,
    )
}

#[post("/certificates/{certificate_id}/delete")]
pub async fn delete_certificate(
    ctx: MemberContext,
    certificate_id: web::Path<CertificateId>,
) -> impl Responder {
    let result = certificates_service::delete_certificate(
        &ctx.api,
        &ctx.member,
        certificate_id.into_inner(),
    )
    .await;
    finish(
        result,
        "Сертификат удалён.",
        "Ошибка при удалении сертификата",
        BACK,
    )
}

#[post("/certificates/{certificate_id}/redirect")]
pub async fn redirect_certificate(
    ctx: MemberContext,
    certificate_id: web::Path<CertificateId>,
    web::Form(form): web::Form<RedirectForm>,
) -> impl Responder {
    let result = certificates_service::redirect_certificate(
        &ctx.api,
        &ctx.member,
        certificate_id.into_inner(),
        form,
    )
    .await;
    finish(
        result,
        "Сертификат передан сотруднику.",
        "Ошибка при передаче сертификата",
        BACK,
    )
}

#[post("/certificates/{certificate_id}/confirm-payment")]
pub async fn confirm_payment(
    ctx: MemberContext,
    certificate_id: web::Path<CertificateId>,
) -> impl Responder {
    let result =
        certificates_service::confirm_payment(&ctx.api, &ctx.member, certificate_id.into_inner())
            .await;
    finish(
        result,
        "Оплата подтверждена.",
        "Ошибка при подтверждении оплаты",
        BACK,
    )
}

#[post("/certificates/{certificate_id}/confirm-review")]
pub async fn confirm_review(
    ctx: MemberContext,
    certificate_id: web::Path<CertificateId>,
) -> impl Responder {
    let result =
        certificates_service::confirm_review(&ctx.api, &ctx.member, certificate_id.into_inner())
            .await;
    finish(
        result,
        "Проверка подтверждена.",
        "Ошибка при подтверждении проверки",
        BACK,
    )
}

#[post("/certificates/{certificate_id}/fill-number")]
pub async fn fill_number(
    ctx: MemberContext,
    certificate_id: web::Path<CertificateId>,
    web::Form(form): web::Form<FillNumberForm>,
) -> impl Responder {
    let result = certificates_service::fill_number(
        &ctx.api,
        &ctx.member,
        certificate_id.into_inner(),
        form,
    )
    .await;
    finish(
        result,
        "Номер сертификата сохранён.",
        "Ошибка при сохранении номера",
        BACK,
    )
}

#[post("/certificates/{certificate_id}/attach-payment")]
pub async fn attach_payment(
    ctx: MemberContext,
    certificate_id: web::Path<CertificateId>,
    body: web::Bytes,
) -> impl Responder {
    let result = match parse_form::<AttachPaymentForm>(&body) {
        Ok(form) => {
            certificates_service::attach_payment(
                &ctx.api,
                &ctx.member,
                certificate_id.into_inner(),
                form,
            )
            .await
        }
        Err(err) => Err(err),
    };
    finish(
        result,
        "Платёжные документы прикреплены.",
        "Ошибка при прикреплении оплаты",
        BACK,
    )
}

#[post("/certificates/{certificate_id}/status")]
pub async fn change_status(
    ctx: MemberContext,
    certificate_id: web::Path<CertificateId>,
    body: web::Bytes,
) -> impl Responder {
    let result = match parse_form::<CertificateStatusForm>(&body) {
        Ok(form) => {
            certificates_service::change_status(
                &ctx.api,
                &ctx.member,
                certificate_id.into_inner(),
                form,
            )
            .await
        }
        Err(err) => Err(err),
    };
    finish(
        result,
        "Статус сертификата изменён.",
        "Ошибка при изменении статуса",
        BACK,
    )
}
