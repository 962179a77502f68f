use crate::database::MongoDB;
use crate::middleware::auth::deny;
use crate::models::Role;
use crate::services::token_service::Claims;
use crate::services::user_service;
use crate::utils::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Role gate. Must be registered inside `AuthMiddleware` so token
/// verification runs first; an invalid token never triggers a store lookup.
///
/// Resolves the caller's stored role and denies with 403 on mismatch. A store
/// failure maps to 500, never to a denial.
pub struct RequireRole {
    role: Role,
}

impl RequireRole {
    pub fn admin() -> Self {
        Self { role: Role::Admin }
    }

    pub fn doctor() -> Self {
        Self { role: Role::Doctor }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

pub struct RequireRoleService<S> {
    service: Rc<S>,
    role: Role,
}

/// The gate's decision, kept free of any store or request plumbing: the
/// resolved role must equal the required one exactly. An admin is not a
/// doctor and vice versa.
pub(crate) fn authorize(resolved: Role, required: Role) -> Result<(), AppError> {
    if resolved == required {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = self.role;

        let claims = req.extensions().get::<Claims>().cloned();
        let db = req.app_data::<web::Data<MongoDB>>().cloned();

        Box::pin(async move {
            let claims = match claims {
                Some(claims) => claims,
                // No verified principal on the request: the auth gate did not
                // run. Treat as unauthenticated rather than forbidden.
                None => return Ok(deny(req, &AppError::MissingToken)),
            };

            let db = match db {
                Some(db) => db,
                None => {
                    return Ok(deny(
                        req,
                        &AppError::Internal("store handle missing from app data".into()),
                    ))
                }
            };

            match user_service::resolve_role(&db, &claims.email).await {
                Ok(resolved) => match authorize(resolved, required) {
                    Ok(()) => service.call(req).await.map(ServiceResponse::map_into_left_body),
                    Err(e) => {
                        log::warn!(
                            "🔒 {} denied for {}: requires {} role",
                            req.path(),
                            claims.email,
                            required.as_str()
                        );
                        Ok(deny(req, &e))
                    }
                },
                Err(e) => Ok(deny(req, &e)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App, HttpResponse};

    async fn admin_only() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[test]
    fn test_plain_principal_is_denied_on_admin_gate() {
        let result = authorize(Role::None, Role::Admin);
        match result {
            Err(e) => assert_eq!(e.status_code(), actix_web::http::StatusCode::FORBIDDEN),
            Ok(()) => panic!("principal without the admin role must be denied"),
        }
    }

    #[test]
    fn test_roles_do_not_cross_grant() {
        assert!(authorize(Role::Doctor, Role::Admin).is_err());
        assert!(authorize(Role::Admin, Role::Doctor).is_err());
    }

    #[test]
    fn test_matching_role_is_admitted() {
        assert!(authorize(Role::Admin, Role::Admin).is_ok());
        assert!(authorize(Role::Doctor, Role::Doctor).is_ok());
    }

    #[actix_web::test]
    async fn test_role_gate_without_principal_is_unauthorized() {
        // RequireRole registered without AuthMiddleware: no Claims in the
        // request, so the gate must refuse before any store access.
        let app = actix_test::init_service(
            App::new().route("/admin", web::get().to(admin_only).wrap(RequireRole::admin())),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/admin").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
