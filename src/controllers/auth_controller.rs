use crate::dto::auth_dto::{ChangePasswordRequest, LoginRequest, LoginResponse, SessionUser, SetupRequest, VerifyResponse};
use crate::dto::user_dto::CreatedResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::auth_service::AuthService;
use crate::utils::errors::AppError;

pub struct AuthController {
    auth: AuthService,
}

impl AuthController {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        self.auth.admin_login(&request.username, &request.password).await
    }

    pub async fn setup(&self, request: SetupRequest) -> Result<CreatedResponse, AppError> {
        let admin = self
            .auth
            .setup(&request.username, &request.password, &request.email)
            .await?;
        Ok(CreatedResponse::new(admin.id, "Administrador creado. Ya puedes iniciar sesión"))
    }

    pub fn verify(&self, user: &AuthenticatedUser) -> VerifyResponse {
        VerifyResponse {
            success: true,
            user: SessionUser {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                full_name: None,
                role: user.role,
            },
        }
    }

    pub async fn change_password(&self, user: &AuthenticatedUser, request: ChangePasswordRequest) -> Result<(), AppError> {
        if user.is_root() {
            return Err(AppError::Forbidden(
                "La contraseña de root se gestiona con ROOT_PASSWORD_HASH".to_string(),
            ));
        }
        self.auth
            .change_password(user.id, &request.old_password, &request.new_password)
            .await
    }
}
