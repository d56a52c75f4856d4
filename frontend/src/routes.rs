//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM。守卫组件据此决定放行、
//! 跳登录页还是提示无权限。

use std::fmt::Display;

use nexus_hub_shared::UserRole;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 营销首页 (默认路由)
    #[default]
    Landing,
    Login,
    Register,
    /// 角色分发的控制面板 (需要认证)
    Dashboard,
    /// 客户管理 (管理员与核心用户)
    Clients,
    /// 报表列表与查看器
    Reports,
    /// 平台用户管理 (仅管理员)
    Users,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，容忍末尾斜杠
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Landing,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/clients" => Self::Clients,
            "/reports" => Self::Reports,
            "/users" => Self::Users,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Clients => "/clients",
            Self::Reports => "/reports",
            Self::Users => "/users",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Clients | Self::Reports | Self::Users
        )
    }

    /// 已认证用户是否应该离开此路由（登录 / 注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 该角色是否允许访问此路由。
    ///
    /// 未列出的路由对所有已认证角色开放，未认证的情况由
    /// requires_auth 先行拦截。
    pub fn allows(&self, role: UserRole) -> bool {
        match self {
            Self::Clients => matches!(role, UserRole::Admin | UserRole::CoreUser),
            Self::Users => matches!(role, UserRole::Admin),
            _ => true,
        }
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录 / 注册页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 侧边栏导航项，按角色裁剪
    pub fn nav_items(role: UserRole) -> Vec<(Self, &'static str)> {
        match role {
            UserRole::Admin => vec![
                (Self::Dashboard, "Dashboard"),
                (Self::Clients, "Clients"),
                (Self::Users, "Users"),
            ],
            UserRole::CoreUser => vec![
                (Self::Dashboard, "Dashboard"),
                (Self::Clients, "Clients"),
            ],
            UserRole::Client => vec![
                (Self::Dashboard, "Dashboard"),
                (Self::Reports, "My Reports"),
            ],
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Landing,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Clients,
            AppRoute::Reports,
            AppRoute::Users,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn parsing_tolerates_trailing_slashes() {
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/"), AppRoute::Landing);
        assert_eq!(AppRoute::from_path(""), AppRoute::Landing);
    }

    #[test]
    fn unknown_paths_fall_to_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/dashboard/extra"), AppRoute::NotFound);
    }

    #[test]
    fn protected_routes_require_auth() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Clients.requires_auth());
        assert!(AppRoute::Reports.requires_auth());
        assert!(AppRoute::Users.requires_auth());

        assert!(!AppRoute::Landing.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
    }

    #[test]
    fn auth_pages_redirect_signed_in_users() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
        assert!(!AppRoute::Landing.should_redirect_when_authenticated());
        assert!(!AppRoute::Dashboard.should_redirect_when_authenticated());
    }

    #[test]
    fn role_matrix_matches_the_navigation() {
        assert!(AppRoute::Users.allows(UserRole::Admin));
        assert!(!AppRoute::Users.allows(UserRole::CoreUser));
        assert!(!AppRoute::Users.allows(UserRole::Client));

        assert!(AppRoute::Clients.allows(UserRole::Admin));
        assert!(AppRoute::Clients.allows(UserRole::CoreUser));
        assert!(!AppRoute::Clients.allows(UserRole::Client));

        for role in [UserRole::Admin, UserRole::CoreUser, UserRole::Client] {
            assert!(AppRoute::Dashboard.allows(role));
            assert!(AppRoute::Reports.allows(role));
        }
    }

    #[test]
    fn nav_items_are_role_scoped() {
        let admin: Vec<_> = AppRoute::nav_items(UserRole::Admin)
            .into_iter()
            .map(|(route, _)| route)
            .collect();
        assert_eq!(
            admin,
            vec![AppRoute::Dashboard, AppRoute::Clients, AppRoute::Users]
        );

        let core: Vec<_> = AppRoute::nav_items(UserRole::CoreUser)
            .into_iter()
            .map(|(route, _)| route)
            .collect();
        assert_eq!(core, vec![AppRoute::Dashboard, AppRoute::Clients]);

        let client = AppRoute::nav_items(UserRole::Client);
        assert_eq!(client[1].1, "My Reports");
    }
}
