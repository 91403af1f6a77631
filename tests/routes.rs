use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use tera::Tera;

use customs_backoffice::api::http::ApiConnection;
use customs_backoffice::api::sequencer::ListSequencers;
use customs_backoffice::middleware::RedirectUnauthorized;
use customs_backoffice::dto::tasks::TasksQuery;
use customs_backoffice::routes::{
    admin, alert_level_to_str, auth, dashboard, declarations, page_link_suffix,
};
use customs_backoffice::services::notifications::Inboxes;

#[core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[core::prelude::v1::test]
fn templates_parse() {
    let tera = Tera::new("templates/**/*");
    assert!(tera.is_ok(), "{:?}", tera.err());
}

#[core::prelude::v1::test]
fn page_links_keep_filters_and_tab() {
    let filters = TasksQuery {
        search: Some("груз 7".to_string()),
        status: Some("new".to_string()),
        tab: Some("b7e1c1a2-0000-4000-8000-000000000001".to_string()),
        ..Default::default()
    };
    let suffix = page_link_suffix(&filters);
    assert!(suffix.starts_with("&search="));
    assert!(suffix.contains("&status=new"));
    assert!(suffix.ends_with("&tab=b7e1c1a2-0000-4000-8000-000000000001"));
    assert!(!suffix.contains("page="));

    assert_eq!(page_link_suffix(&TasksQuery::default()), "");
}

macro_rules! portal {
    ($($service:expr),+ $(,)?) => {{
        let key = Key::generate();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        let tera = Tera::new("templates/**/*").unwrap();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
                .app_data(web::Data::new(tera))
                // No request in these tests carries a token, so the backend is never reached.
                .app_data(web::Data::new(ApiConnection::new("http://127.0.0.1:9")))
                .app_data(web::Data::new(ListSequencers::new()))
                .app_data(web::Data::new(Inboxes::new()))
                $(.service($service))+,
        )
        .await
    }};
}

#[actix_web::test]
async fn login_page_renders() {
    let app = portal!(auth::show_login);

    let req = test::TestRequest::get().uri("/login").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("action=\"/login\""));
}

#[actix_web::test]
async fn root_points_to_login() {
    let app = portal!(auth::root);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn anonymous_visitor_is_sent_to_login() {
    let app = portal!(
        web::scope("")
            .wrap(RedirectUnauthorized::default())
            .service(dashboard::show_dashboard)
            .service(declarations::show_declarations)
    );

    for uri in ["/dashboard", "/declarations?owner=mine"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
    }
}

#[actix_web::test]
async fn anonymous_visitor_is_sent_to_admin_login() {
    let app = portal!(
        web::scope("/admin")
            .wrap(RedirectUnauthorized::to("/admin/login"))
            .service(admin::show_dashboard)
    );

    let req = test::TestRequest::get().uri("/admin/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/admin/login"
    );
}
