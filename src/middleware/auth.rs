use crate::services::token_service::{self, Claims};
use crate::utils::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Bearer-token gate. Verifies the token's signature and expiry and stores
/// the decoded `Claims` in the request extensions for downstream checks.
/// Never touches the data store.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

pub(crate) fn deny<B>(req: ServiceRequest, err: &AppError) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    let response = err.to_response().map_into_right_body();
    ServiceResponse::new(request, response)
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let verified = match header.as_deref() {
            None => Err(AppError::MissingToken),
            Some(value) => match value.strip_prefix("Bearer ") {
                None => Err(AppError::InvalidToken),
                Some(token) => token_service::verify_token(token),
            },
        };

        match verified {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                let response = deny(req, &e);
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpRequest, HttpResponse};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<Claims>() {
            Some(claims) => HttpResponse::Ok().json(serde_json::json!({ "email": claims.email })),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new().route("/protected", web::get().to(whoami).wrap(AuthMiddleware)),
        )
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_garbage_token_is_unauthorized() {
        std::env::set_var("ACCESS_TOKEN_SECRET", "test-secret");
        let app = test::init_service(
            App::new().route("/protected", web::get().to(whoami).wrap(AuthMiddleware)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Bearer not.a.token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let app = test::init_service(
            App::new().route("/protected", web::get().to(whoami).wrap(AuthMiddleware)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_issued_token_round_trips_through_the_gate() {
        std::env::set_var("ACCESS_TOKEN_SECRET", "test-secret");
        let token = token_service::issue_token("a@b.com").unwrap();

        let app = test::init_service(
            App::new().route("/protected", web::get().to(whoami).wrap(AuthMiddleware)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["email"], "a@b.com");
    }
}
