//! 认证中间件
//!
//! `require_auth` 对所有 `/api/` 请求做 Bearer 令牌校验，校验通过后
//! 从数据库加载用户并写入请求扩展，后续处理器通过
//! `Extension<CurrentUser>` 获取当前用户。角色限制由 `require_admin` /
//! `require_roles` 在具体路由上叠加。

use std::future::Future;
use std::pin::Pin;

use axum::extract::{Request, State};
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::Response;

use shared::models::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_DELIVERY_AGENT};

use crate::auth::JwtService;
use crate::core::ServerState;
use crate::db::models::UserRecord;
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;
use crate::utils::AppError;

/// 当前登录用户（每个请求从数据库加载，角色变更即时生效）
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub delivery_zone_id: Option<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_agent(&self) -> bool {
        self.role == ROLE_DELIVERY_AGENT
    }

    pub fn is_customer(&self) -> bool {
        self.role == ROLE_CUSTOMER
    }
}

impl From<&UserRecord> for CurrentUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            email: record.email.clone(),
            name: record.name.clone(),
            role: record.role.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            delivery_zone_id: record.delivery_zone_id.clone(),
        }
    }
}

/// 无需令牌的公开路径
fn is_public_path(path: &str, method: &Method) -> bool {
    matches!(path, "/api/auth/register" | "/api/auth/login" | "/api/health")
        || (*method == Method::GET
            && (path == "/api/products"
                || path.starts_with("/api/products/")
                || path == "/api/categories"))
}

/// 全局认证中间件
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS 预检请求直接放行
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path().to_string();
    if !path.starts_with("/api/") || is_public_path(&path, req.method()) {
        return Ok(next.run(req).await);
    }

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = JwtService::extract_from_header(header_value)?;
    let claims = state.jwt_service.validate_token(token).map_err(|err| {
        security_log!("warn", "token_rejected", path = path.as_str());
        AppError::from(err)
    })?;

    // 令牌主体必须对应一个仍然存在的用户
    let repo = UserRepository::new(state.db.clone());
    let record = repo.find_by_id(&claims.sub).await.map_err(|err| match err {
        RepoError::Validation(_) => AppError::Unauthorized,
        other => AppError::from(other),
    })?;

    let Some(record) = record else {
        security_log!("warn", "token_user_missing", subject = claims.sub.as_str());
        return Err(AppError::Unauthorized);
    };

    req.extensions_mut().insert(CurrentUser::from(&record));
    Ok(next.run(req).await)
}

/// 仅管理员可通过
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin() {
        security_log!(
            "warn",
            "admin_denied",
            user = user.id.as_str(),
            role = user.role.as_str()
        );
        return Err(AppError::forbidden("Not enough permissions"));
    }

    Ok(next.run(req).await)
}

/// 角色白名单中间件工厂
///
/// ```ignore
/// .layer(middleware::from_fn(require_roles(&[ROLE_DELIVERY_AGENT, ROLE_ADMIN])))
/// ```
pub fn require_roles(
    allowed: &'static [&'static str],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>> + Clone
{
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::Unauthorized)?;

            if !allowed.contains(&user.role.as_str()) {
                security_log!(
                    "warn",
                    "role_denied",
                    user = user.id.as_str(),
                    role = user.role.as_str()
                );
                return Err(AppError::forbidden("Not enough permissions"));
            }

            Ok(next.run(req).await)
        })
    }
}
