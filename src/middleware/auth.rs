//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción y verificación de tokens y los controles
//! de rol. Token ausente -> 401; token inválido, expirado o rol insuficiente -> 403.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    models::admin_user::ROOT_USERNAME,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token, JwtClaims, Role},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &JwtClaims) -> Result<Self, AppError> {
        let id = claims
            .subject_id()
            .ok_or_else(|| AppError::Forbidden("Token con sujeto inválido".to_string()))?;

        Ok(Self {
            id,
            username: claims.username.clone(),
            email: claims.email.clone(),
            role: claims.role,
        })
    }

    pub fn is_root(&self) -> bool {
        self.role == Role::SuperAdmin && self.username.as_deref() == Some(ROOT_USERNAME)
    }
}

fn authenticate(state: &AppState, request: &Request) -> Result<AuthenticatedUser, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_token_from_header)
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let claims = verify_token(token, &state.jwt)?;
    AuthenticatedUser::from_claims(&claims)
}

async fn authorize(
    state: AppState,
    mut request: Request,
    next: Next,
    allowed: fn(&AuthenticatedUser) -> bool,
    denied_message: &str,
) -> Result<Response, AppError> {
    let user = authenticate(&state, &request)?;

    if !allowed(&user) {
        return Err(AppError::Forbidden(denied_message.to_string()));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Cualquier token válido
pub async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, AppError> {
    authorize(state, request, next, |_| true, "").await
}

/// Administradores del panel (incluye root)
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, AppError> {
    authorize(
        state,
        request,
        next,
        |user| user.role.is_staff(),
        "Se requieren permisos de administrador",
    )
    .await
}

/// Solo el superusuario
pub async fn require_root(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, AppError> {
    authorize(
        state,
        request,
        next,
        AuthenticatedUser::is_root,
        "Esta operación requiere permisos de root",
    )
    .await
}

pub async fn require_customer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(
        state,
        request,
        next,
        |user| user.role == Role::Customer,
        "Acceso solo para clientes",
    )
    .await
}
