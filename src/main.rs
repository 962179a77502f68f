mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::role::RequireRole;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // Checked here so a missing secret aborts at startup, not on the first
    // token request.
    env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set");

    log::info!("🚀 Starting dochouse service...");

    // Initialize MongoDB connection; created once, shared by every handler
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db);

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server.
    //
    // Route middleware applies inside-out: the wrap furthest from `.to()` runs
    // first, so AuthMiddleware is always registered after RequireRole. An
    // invalid token is rejected before the role gate ever touches the store.
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // Auth
            .route("/jwt", web::post().to(api::auth::issue_token))
            // Appointment catalog
            .route(
                "/appointmentOptions",
                web::get().to(api::appointments::list_options),
            )
            .route(
                "/appointmentOptions/{id}",
                web::put()
                    .to(api::appointments::update_option)
                    .wrap(RequireRole::admin())
                    .wrap(AuthMiddleware),
            )
            .route(
                "/appointmentSpeciality",
                web::get()
                    .to(api::appointments::specialties)
                    .wrap(RequireRole::doctor())
                    .wrap(AuthMiddleware),
            )
            .route(
                "/services",
                web::post()
                    .to(api::appointments::add_service)
                    .wrap(RequireRole::admin())
                    .wrap(AuthMiddleware),
            )
            // Bookings
            .service(
                web::resource("/bookings")
                    .route(
                        web::post()
                            .to(api::bookings::create_booking)
                            .wrap(AuthMiddleware),
                    )
                    .route(
                        web::get()
                            .to(api::bookings::list_bookings)
                            .wrap(AuthMiddleware),
                    ),
            )
            .route(
                "/bookings/{id}",
                web::delete()
                    .to(api::bookings::delete_booking)
                    .wrap(AuthMiddleware),
            )
            .route(
                "/bookingAppointments",
                web::get()
                    .to(api::bookings::list_all_bookings)
                    .wrap(RequireRole::admin())
                    .wrap(AuthMiddleware),
            )
            // Users
            .service(
                web::resource("/users")
                    .route(
                        web::get()
                            .to(api::users::list_users)
                            .wrap(RequireRole::admin())
                            .wrap(AuthMiddleware),
                    )
                    .route(web::post().to(api::users::create_user)),
            )
            .service(
                web::resource("/users/admin/{email}")
                    .route(web::get().to(api::users::is_admin).wrap(AuthMiddleware))
                    .route(
                        web::patch()
                            .to(api::users::make_admin)
                            .wrap(RequireRole::admin())
                            .wrap(AuthMiddleware),
                    ),
            )
            .service(
                web::resource("/users/doctor/{email}")
                    .route(web::get().to(api::users::is_doctor).wrap(AuthMiddleware))
                    .route(
                        web::patch()
                            .to(api::users::make_doctor)
                            .wrap(RequireRole::admin())
                            .wrap(AuthMiddleware),
                    ),
            )
            .route(
                "/users/admin/email/{email}",
                web::get()
                    .to(api::users::admin_status_by_email)
                    .wrap(RequireRole::admin())
                    .wrap(AuthMiddleware),
            )
            .route(
                "/users/check-email/{email}",
                web::get()
                    .to(api::users::check_email)
                    .wrap(RequireRole::admin())
                    .wrap(AuthMiddleware),
            )
            .route(
                "/users/email/{email}",
                web::get()
                    .to(api::users::review_by_email)
                    .wrap(AuthMiddleware),
            )
            .route(
                "/users/{id}",
                web::delete()
                    .to(api::users::delete_user)
                    .wrap(RequireRole::admin())
                    .wrap(AuthMiddleware),
            )
            // Doctors
            .route(
                "/addDoctorInfo",
                web::post()
                    .to(api::doctors::add_doctor_info)
                    .wrap(RequireRole::doctor())
                    .wrap(AuthMiddleware),
            )
            .route(
                "/doctorsInfo",
                web::get().to(api::doctors::list_doctors_info),
            )
            .service(
                web::resource("/doctors/{id}")
                    .route(
                        web::get()
                            .to(api::doctors::get_doctor)
                            .wrap(RequireRole::doctor())
                            .wrap(AuthMiddleware),
                    )
                    .route(
                        web::put()
                            .to(api::doctors::update_doctor)
                            .wrap(RequireRole::doctor())
                            .wrap(AuthMiddleware),
                    )
                    .route(
                        web::delete()
                            .to(api::doctors::delete_doctor)
                            .wrap(RequireRole::admin())
                            .wrap(AuthMiddleware),
                    ),
            )
            // Reviews
            .service(
                web::resource("/reviews")
                    .route(
                        web::post()
                            .to(api::reviews::create_review)
                            .wrap(AuthMiddleware),
                    )
                    .route(web::get().to(api::reviews::list_reviews)),
            )
            // Contacts
            .route("/contacts", web::post().to(api::contacts::create_contact))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
