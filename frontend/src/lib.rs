//! Nexus Hub 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `routes`: 路由定义与守卫矩阵（领域模型）
//! - `api`: REST 网关与资源客户端
//! - `session`: 会话流程（登录 / 恢复 / 注册 / 升级）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    mod client_dialog;
    pub mod clients;
    pub mod dashboard;
    mod icons;
    pub mod landing;
    pub mod layout;
    pub mod login;
    pub mod register;
    mod report_dialog;
    pub mod reports;
    mod toast;
    pub mod users;
}
mod config;
mod routes;
mod session;

// 浏览器原生 API 封装模块
pub(crate) mod web {
    pub mod storage;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::clients::ClientsPage;
use crate::components::dashboard::DashboardPage;
use crate::components::landing::LandingPage;
use crate::components::layout::AppLayout;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::reports::ReportsPage;
use crate::components::users::UsersPage;

use leptos::prelude::*;
use leptos_router::components::{A, ParentRoute, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化认证状态（用 LocalStorage 里的令牌恢复会话）
    init_auth(&auth_ctx);

    view! {
        <Router>
            <Routes fallback=|| {
                view! {
                    <div class="flex items-center justify-center min-h-screen bg-base-200">
                        <div class="text-center">
                            <h1 class="text-6xl font-bold text-error">"404"</h1>
                            <p class="text-xl mt-4">"Page not found"</p>
                            <A href="/" attr:class="btn btn-primary mt-6">
                                "Back to home"
                            </A>
                        </div>
                    </div>
                }
            }>
                <Route path=path!("/") view=LandingPage />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/register") view=RegisterPage />
                // 受守卫的应用外壳，未登录访问会被重定向到登录页
                <ParentRoute path=path!("") view=AppLayout>
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/clients") view=ClientsPage />
                    <Route path=path!("/reports") view=ReportsPage />
                    <Route path=path!("/users") view=UsersPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
