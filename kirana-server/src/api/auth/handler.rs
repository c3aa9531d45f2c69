//! 认证处理器

use axum::extract::State;
use axum::{Extension, Json};
use validator::Validate;

use shared::models::{LoginRequest, ROLE_CUSTOMER, RegisterRequest, TokenResponse, UserProfile};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{UserCreate, UserRecord};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// POST /api/auth/register - 注册并直接返回令牌
pub async fn register(
    State(state): State<ServerState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    request.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let record = repo
        .create(UserCreate {
            email: request.email,
            password: request.password,
            name: request.name,
            role: request.role.unwrap_or_else(|| ROLE_CUSTOMER.to_string()),
            phone: request.phone,
            address: request.address,
        })
        .await?;

    let token = issue_token(&state, &record)?;
    security_log!("info", "user_registered", email = record.email.as_str());

    Ok(Json(TokenResponse::bearer(token, record.into())))
}

/// POST /api/auth/login
///
/// 用户不存在与密码错误返回完全一致的 401。
pub async fn login(
    State(state): State<ServerState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let repo = UserRepository::new(state.db.clone());

    let Some(record) = repo
        .find_by_email(&request.email)
        .await?
        .filter(|record| record.verify_password(&request.password))
    else {
        security_log!("warn", "login_failed", email = request.email.as_str());
        return Err(AppError::InvalidCredentials);
    };

    let token = issue_token(&state, &record)?;
    security_log!("info", "login_success", email = record.email.as_str());

    Ok(Json(TokenResponse::bearer(token, record.into())))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<UserProfile> {
    Json(user.into())
}

fn issue_token(state: &ServerState, record: &UserRecord) -> AppResult<String> {
    let user_id = record
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("User record missing ID"))?;

    Ok(state.jwt_service.generate_token(&user_id, &record.role)?)
}
