use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::Method;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// Which paths require an admin access token
struct ProtectedPaths {
    prefix_paths: Vec<&'static str>,
    // reachable without a token even under a protected prefix
    excluded_paths: Vec<&'static str>,
}

impl ProtectedPaths {
    fn new() -> Self {
        Self {
            prefix_paths: vec!["/api/admin"],
            excluded_paths: vec!["/api/admin/login", "/api/admin/refresh"],
        }
    }

    fn requires_auth(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        if self.excluded_paths.contains(&path) {
            return false;
        }
        self.prefix_paths
            .iter()
            .any(|&prefix| path == prefix || path.starts_with(&format!("{prefix}/")))
    }
}

/// Admin resolved from a verified access token
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl FromRequest for AdminIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AdminIdentity>()
                .cloned()
                .ok_or_else(|| AppError::AuthError("Missing access token".to_string()).into()),
        )
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            protected_paths: ProtectedPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    protected_paths: ProtectedPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        // CORS preflight
        if req.method() == Method::OPTIONS || !self.protected_paths.requires_auth(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);

        let Some(token) = token else {
            let error = AppError::AuthError("Missing access token".to_string());
            return Box::pin(async move { Err(error.into()) });
        };

        let identity = self
            .jwt_service
            .verify_access_token(token)
            .and_then(|claims| {
                Ok(AdminIdentity {
                    id: claims.admin_id()?,
                    username: claims.username,
                    role: claims.role,
                })
            });

        match identity {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                Box::pin(self.service.call(req))
            }
            Err(e) => {
                log::warn!("rejected admin request to {}: {e}", req.path());
                let error = AppError::AuthError("Invalid access token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths() {
        let paths = ProtectedPaths::new();
        assert!(paths.requires_auth("/api/admin/sales"));
        assert!(paths.requires_auth("/api/admin/inventory/3"));
        assert!(paths.requires_auth("/api/admin/me"));
        assert!(!paths.requires_auth("/api/admin/login"));
        assert!(!paths.requires_auth("/api/admin/refresh/"));
        assert!(!paths.requires_auth("/api/administrator"));
        assert!(!paths.requires_auth("/api/cart"));
        assert!(!paths.requires_auth("/swagger-ui/"));
    }
}
