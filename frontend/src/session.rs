// ====== 会话流程 (Session flow) ======
//
// 登录、恢复、注销、注册等跨端点的编排逻辑。不触碰任何
// UI 状态，auth 模块在信号层包装这里的结果，因此同一套
// 流程可以在原生端直接跑单元测试。

use std::fmt;

use leptos::logging::{log, warn};

use nexus_hub_shared::protocol::{
    AckResponse, CoreUserRegistration, HttpMethod, LoginRequest, LoginResponse, LogoutRequest,
    UpgradeRequest, UpgradeResponse, UserRow,
};
use nexus_hub_shared::{Client, ClientRegistration, SubscriptionPlan, User, UserRole};

use crate::api::clients::ClientsApi;
use crate::api::error::ApiError;
use crate::api::gateway::ApiGateway;
use crate::api::transport::HttpTransport;
use crate::web::storage::TokenStore;

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// 未登录就调用了需要会话的操作
    NotAuthenticated,
    /// 当前角色无权执行该操作
    Forbidden,
    /// 本地校验未通过,不发请求
    Validation(String),
    /// 服务端拒绝了创建请求
    CreateFailed,
    Api(ApiError),
}

impl SessionError {
    /// 页面提示用的文案
    pub fn message(&self) -> String {
        match self {
            SessionError::NotAuthenticated => "You need to sign in first.".to_string(),
            SessionError::Forbidden => "Your account cannot perform this action.".to_string(),
            SessionError::Validation(msg) => msg.clone(),
            SessionError::CreateFailed => "The server rejected the request.".to_string(),
            SessionError::Api(err) => err.ui_message(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotAuthenticated => write!(f, "not authenticated"),
            SessionError::Forbidden => write!(f, "role not allowed"),
            SessionError::Validation(msg) => write!(f, "validation failed: {msg}"),
            SessionError::CreateFailed => write!(f, "create rejected by server"),
            SessionError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        SessionError::Api(err)
    }
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// 升级成功后的最新订阅状态
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionUpdate {
    pub plan: SubscriptionPlan,
    pub expiry: Option<String>,
}

// =========================================================
// 流程编排
// =========================================================

pub struct SessionFlow<'a, T: HttpTransport, S: TokenStore> {
    gateway: &'a ApiGateway<T, S>,
}

impl<'a, T: HttpTransport, S: TokenStore> SessionFlow<'a, T, S> {
    pub fn new(gateway: &'a ApiGateway<T, S>) -> Self {
        Self { gateway }
    }

    /// 启动时根据已存令牌恢复会话。
    ///
    /// 本地没有访问令牌直接判为匿名,不发请求;令牌在但
    /// 服务端不认(网关刷新后仍失败)则清掉两枚令牌。
    pub async fn restore(&self) -> Option<User> {
        if self.gateway.tokens().access_token().is_none() {
            return None;
        }
        match self.gateway.get_json::<UserRow>("/api/auth/user/").await {
            Ok(row) => Some(User::from(row)),
            Err(err) => {
                if err.is_unauthorized() {
                    log!("stored session no longer valid, signing out");
                } else {
                    warn!("session restore failed: {}", err);
                }
                self.gateway.tokens().clear();
                None
            }
        }
    }

    /// 登录成功即持久化令牌对
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<User> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.gateway.post_json("/api/auth/login/", &body).await?;
        self.gateway
            .tokens()
            .store_pair(&response.token, &response.refresh);
        Ok(User::from(response.user))
    }

    /// 注销尽力通知服务端拉黑刷新令牌;本地令牌无条件清除,
    /// 服务端失败只记日志。
    pub async fn logout(&self) {
        if let Some(refresh) = self.gateway.tokens().refresh_token() {
            let body = LogoutRequest { refresh };
            match serde_json::to_string(&body) {
                Ok(json) => {
                    match self
                        .gateway
                        .send(HttpMethod::Post, "/api/auth/logout/", Some(json))
                        .await
                    {
                        Ok(response) if !response.is_success() => {
                            warn!("logout rejected with status {}", response.status);
                        }
                        Ok(_) => {}
                        Err(err) => warn!("logout request failed: {}", err),
                    }
                }
                Err(err) => warn!("logout body not serializable: {}", err),
            }
        }
        self.gateway.tokens().clear();
    }

    /// 核心用户自助注册,成功后由页面引导去登录
    pub async fn register(&self, registration: &CoreUserRegistration) -> SessionResult<()> {
        let _: AckResponse = self
            .gateway
            .post_json("/api/auth/register/", registration)
            .await?;
        Ok(())
    }

    /// 代表当前用户创建客户账号。
    ///
    /// 客户角色不能再创建客户;本地校验失败不发请求。
    pub async fn create_client(
        &self,
        user: Option<&User>,
        registration: &ClientRegistration,
    ) -> SessionResult<Client> {
        let user = user.ok_or(SessionError::NotAuthenticated)?;
        if user.role == UserRole::Client {
            return Err(SessionError::Forbidden);
        }
        registration.validate().map_err(SessionError::Validation)?;

        ClientsApi::new(self.gateway)
            .create(&registration.to_wire())
            .await
            .ok_or(SessionError::CreateFailed)
    }

    /// 订阅升级只对核心用户开放
    pub async fn upgrade_subscription(
        &self,
        user: Option<&User>,
        plan: SubscriptionPlan,
    ) -> SessionResult<SubscriptionUpdate> {
        let user = user.ok_or(SessionError::NotAuthenticated)?;
        if user.role != UserRole::CoreUser {
            return Err(SessionError::Forbidden);
        }
        let response: UpgradeResponse = self
            .gateway
            .post_json("/api/auth/upgrade-subscription/", &UpgradeRequest { plan })
            .await?;
        Ok(SubscriptionUpdate {
            plan: response.subscription.unwrap_or(plan),
            expiry: response.subscription_expiry,
        })
    }
}

#[cfg(test)]
mod tests;
