use crate::error::AppError;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use uuid::Uuid;

pub const SESSION_HEADER: &str = "X-Session-Id";
pub const MAX_SESSION_ID_LEN: usize = 255;

/// Opaque per-visitor key that scopes cart, wishlist and game data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionId>()
                .cloned()
                .ok_or_else(|| AppError::InternalError("session middleware not installed".into()).into()),
        )
    }
}

/// Resolves the session key from the `X-Session-Id` header or the session
/// cookie, issuing a fresh UUID (and cookie) when neither is present.
#[derive(Clone)]
pub struct SessionMiddleware {
    cookie_name: String,
    secure: bool,
}

impl SessionMiddleware {
    pub fn new(cookie_name: impl Into<String>, secure: bool) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            secure,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service,
            cookie_name: self.cookie_name.clone(),
            secure: self.secure,
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
    cookie_name: String,
    secure: bool,
}

impl<S> SessionMiddlewareService<S> {
    fn presented_key(&self, req: &ServiceRequest) -> Option<String> {
        let from_header = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        from_header.or_else(|| {
            req.cookie(&self.cookie_name)
                .map(|c| c.value().trim().to_string())
                .filter(|v| !v.is_empty())
        })
    }
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let (session_id, issued) = match self.presented_key(&req) {
            Some(key) if key.len() > MAX_SESSION_ID_LEN => {
                let error = AppError::ValidationError(format!(
                    "session id must be at most {MAX_SESSION_ID_LEN} characters"
                ));
                return Box::pin(async move { Err(error.into()) });
            }
            Some(key) => (key, false),
            None => (Uuid::new_v4().to_string(), true),
        };

        req.extensions_mut().insert(SessionId(session_id.clone()));

        let cookie = issued.then(|| {
            Cookie::build(self.cookie_name.clone(), session_id.clone())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(self.secure)
                .finish()
        });

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if let Some(cookie) = cookie {
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    log::error!("failed to set session cookie: {e}");
                }
                if let Ok(value) = HeaderValue::from_str(&session_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static("x-session-id"), value);
                }
            }
            Ok(res)
        })
    }
}
