//! 认证模块
//!
//! 在信号层包装会话流程，管理全局登录状态。
//! 路由与页面只读取 Context 中的状态，写入都经过这里。

use leptos::prelude::*;
use leptos::task::spawn_local;

use nexus_hub_shared::{Client, ClientRegistration, SubscriptionPlan, User, UserRole};
use nexus_hub_shared::protocol::CoreUserRegistration;

use crate::api::gateway::AppGateway;
use crate::session::{SessionFlow, SubscriptionUpdate};

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 带拦截器的网关，匿名请求也走它
    pub gateway: AppGateway,
    /// 当前登录用户（匿名时为 None）
    pub user: Option<User>,
    /// 启动恢复是否仍在进行
    pub is_loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            gateway: AppGateway::from_config(),
            user: None,
            is_loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|user| user.role)
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::new());
        Self { state, set_state }
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 异步恢复已存会话；完成前 is_loading 保持 true，
/// 路由守卫在此期间不做跳转。
pub fn init_auth(ctx: &AuthContext) {
    let ctx = *ctx;
    spawn_local(async move {
        let gateway = ctx.state.get_untracked().gateway;
        let restored = SessionFlow::new(&gateway).restore().await;
        ctx.set_state.update(|state| {
            state.user = restored;
            state.is_loading = false;
        });
    });
}

/// 登录并写入全局状态，错误返回页面提示文案
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), String> {
    let gateway = ctx.state.get_untracked().gateway;
    match SessionFlow::new(&gateway).login(&email, &password).await {
        Ok(user) => {
            ctx.set_state.update(|state| {
                state.user = Some(user);
                state.is_loading = false;
            });
            Ok(())
        }
        Err(err) => Err(err.message()),
    }
}

/// 注销并清除状态
///
/// 服务端通知失败也照常清除，守卫会把用户送回登录页。
pub async fn logout(ctx: &AuthContext) {
    let gateway = ctx.state.get_untracked().gateway;
    SessionFlow::new(&gateway).logout().await;
    ctx.set_state.update(|state| state.user = None);
}

/// 核心用户注册，成功后由页面引导去登录
pub async fn register(ctx: &AuthContext, registration: CoreUserRegistration) -> Result<(), String> {
    let gateway = ctx.state.get_untracked().gateway;
    SessionFlow::new(&gateway)
        .register(&registration)
        .await
        .map_err(|err| err.message())
}

/// 以当前用户身份创建客户账号
pub async fn create_client(
    ctx: &AuthContext,
    registration: ClientRegistration,
) -> Result<Client, String> {
    let state = ctx.state.get_untracked();
    SessionFlow::new(&state.gateway)
        .create_client(state.user.as_ref(), &registration)
        .await
        .map_err(|err| err.message())
}

/// 升级订阅并同步全局用户状态
pub async fn upgrade_subscription(
    ctx: &AuthContext,
    plan: SubscriptionPlan,
) -> Result<SubscriptionUpdate, String> {
    let state = ctx.state.get_untracked();
    let update = SessionFlow::new(&state.gateway)
        .upgrade_subscription(state.user.as_ref(), plan)
        .await
        .map_err(|err| err.message())?;

    ctx.set_state.update(|state| {
        if let Some(user) = state.user.as_mut() {
            user.subscription = Some(update.plan);
            user.subscription_expiry = update.expiry.clone();
        }
    });
    Ok(update)
}
