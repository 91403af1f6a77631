#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api::http::ApiConnection;
#[cfg(feature = "server")]
use crate::api::sequencer::ListSequencers;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::{
    admin, auth, certificates, clients, dashboard, declarations, documents, employees,
    notifications, partners, requests, settings, tasks,
};
#[cfg(feature = "server")]
use crate::services::notifications::Inboxes;

pub mod api;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod registry;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;
pub mod session;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let connection = ApiConnection::new(server_config.api_base_url.clone());

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let sequencers = web::Data::new(ListSequencers::new());
    let inboxes = web::Data::new(Inboxes::new());
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Serving the back office on {}:{} against {}",
        server_config.address,
        server_config.port,
        server_config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(actix_web::middleware::Compress::default())
            .wrap(actix_web::middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(auth::root)
            .service(auth::show_login)
            .service(auth::login)
            .service(auth::show_register)
            .service(auth::register)
            .service(auth::show_company_setup)
            .service(auth::register_company)
            .service(auth::join_company)
            .service(auth::pending_approval)
            .service(auth::show_admin_login)
            .service(auth::admin_login)
            .service(auth::forgot_password)
            .service(auth::show_reset_password)
            .service(auth::reset_password)
            .service(auth::logout)
            .service(settings::change_language)
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized::to("/admin/login"))
                    .service(admin::show_dashboard)
                    .service(admin::show_companies)
                    .service(admin::block_company)
                    .service(admin::unblock_company)
                    .service(admin::delete_company)
                    .service(admin::message_company)
                    .service(admin::show_users)
                    .service(admin::block_user)
                    .service(admin::unblock_user)
                    .service(admin::message_user)
                    .service(admin::show_requests)
                    .service(admin::accept_request)
                    .service(admin::reject_request),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized::default())
                    .service(dashboard::show_dashboard)
                    .service(declarations::show_declarations)
                    .service(declarations::add_declaration)
                    .service(declarations::delete_declaration)
                    .service(declarations::redirect_declaration)
                    .service(declarations::add_group)
                    .service(declarations::add_to_group)
                    .service(declarations::remove_from_group)
                    .service(certificates::show_certificates)
                    .service(certificates::add_certificate)
                    .service(certificates::delete_certificate)
                    .service(certificates::redirect_certificate)
                    .service(certificates::confirm_payment)
                    .service(certificates::confirm_review)
                    .service(certificates::fill_number)
                    .service(certificates::attach_payment)
                    .service(certificates::change_status)
                    .service(tasks::show_tasks)
                    .service(tasks::add_task)
                    .service(tasks::change_task_status)
                    .service(tasks::delete_task)
                    .service(documents::show_documents)
                    .service(documents::upload_document)
                    .service(documents::delete_document)
                    .service(documents::add_folder)
                    .service(documents::update_folder)
                    .service(documents::delete_folder)
                    .service(clients::show_clients)
                    .service(clients::add_client)
                    .service(clients::update_client)
                    .service(clients::delete_client)
                    .service(partners::show_partners)
                    .service(partners::request_partnership)
                    .service(partners::accept_partnership)
                    .service(partners::reject_partnership)
                    .service(partners::remove_partnership)
                    .service(employees::show_employees)
                    .service(employees::assign_role)
                    .service(employees::block_employee)
                    .service(employees::unblock_employee)
                    .service(employees::remove_employee)
                    .service(employees::message_employee)
                    .service(requests::show_requests)
                    .service(requests::accept_request)
                    .service(requests::reject_request)
                    .service(settings::show_settings)
                    .service(settings::update_profile)
                    .service(settings::update_email)
                    .service(settings::upload_avatar)
                    .service(settings::change_password)
                    .service(settings::verify_telegram_code)
                    .service(notifications::mark_read)
                    .service(notifications::mark_all_read)
                    .service(notifications::toggle_sound),
            )
            .default_service(web::to(routes::not_found))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(connection.clone()))
            .app_data(sequencers.clone())
            .app_data(inboxes.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
