use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dochouse API",
        version = "1.0.0",
        description = "REST backend for the dochouse medical-appointment booking application.\n\n**Authentication:** gated endpoints require a JWT Bearer token issued by `POST /jwt` (8 hour expiry). Admin and doctor endpoints additionally check the caller's stored role."
    ),
    paths(
        crate::api::auth::issue_token,
        crate::api::health::health_check,
        crate::api::bookings::create_booking,
        crate::api::bookings::list_bookings,
        crate::api::users::create_user,
        crate::api::users::is_admin,
        crate::api::users::is_doctor,
    ),
    components(
        schemas(
            crate::api::auth::TokenRequest,
            crate::api::auth::TokenResponse,
            crate::api::health::HealthResponse,
            crate::api::users::AdminStatus,
            crate::api::users::DoctorStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Token issuance."),
        (name = "Health", description = "Liveness probes."),
        (name = "Bookings", description = "Appointment bookings. One booking per (date, slot, treatment) tuple."),
        (name = "Users", description = "User records, role probes, and role promotion."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
