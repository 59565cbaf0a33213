use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Extension, Router,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{AuthUser, Role};
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Per-route access policy, attached to routers as an `Extension`.
///
/// This is the explicit-configuration form of the backend's route-metadata
/// markers: `public` exempts a route from authentication entirely, and
/// `skip_permission` keeps authentication but bypasses the role check.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    pub public: bool,
    pub skip_permission: bool,
    pub allowed_roles: Vec<Role>,
}

impl RoutePolicy {
    pub fn public() -> Self {
        Self {
            public: true,
            ..Self::default()
        }
    }

    /// Any authenticated user, regardless of role.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn allow(roles: &[Role]) -> Self {
        Self {
            allowed_roles: roles.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_skip_permission(mut self) -> Self {
        self.skip_permission = true;
        self
    }
}

/// Guard middleware: consults the route's `RoutePolicy` before running
/// authentication and the permission check, then injects the validated
/// user into the request extensions.
pub async fn route_guard(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let policy = request
        .extensions()
        .get::<RoutePolicy>()
        .cloned()
        .unwrap_or_default();

    if policy.public {
        return Ok(next.run(request).await);
    }

    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let user = validate_token(bearer.token(), &config.jwt_secret).map_err(AppError::Auth)?;

    if !policy.skip_permission && !policy.allowed_roles.is_empty() {
        let role = user
            .role
            .ok_or_else(|| AppError::Forbidden("Account has no role".to_string()))?;

        if !policy.allowed_roles.contains(&role) {
            debug!("Role {} rejected by route policy", role);
            return Err(AppError::Forbidden(format!(
                "Role {} is not allowed on this route",
                role
            )));
        }
    }

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Attach a policy to a router and the guard that enforces it.
///
/// The policy extension is layered outside the guard so the guard sees it
/// on every request routed through `router`.
pub fn with_policy(router: Router, policy: RoutePolicy, config: Arc<AppConfig>) -> Router {
    router
        .layer(middleware::from_fn_with_state(config, route_guard))
        .layer(Extension(policy))
}

/// Extract the user injected by the guard from request extensions.
pub async fn extract_user<B>(request: &Request<B>) -> Result<AuthUser, AppError> {
    request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::Auth("User not found in request extensions".to_string()))
}
