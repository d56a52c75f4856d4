//! 受保护区域的外壳
//!
//! 守卫顺序：恢复未完成先挂起，未认证重定向登录页，
//! 认证后渲染侧边栏、顶栏与子路由出口。角色裁决交给
//! `RoleGate`，按 `AppRoute::allows` 的矩阵放行。

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::{A, Outlet, Redirect};
use leptos_router::hooks::{use_location, use_navigate};

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::routes::AppRoute;

/// 登录 / 注册页在已登录时跳去控制面板
pub fn redirect_authenticated(route: AppRoute) {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let state = auth.state.get();
        if route.should_redirect_when_authenticated()
            && !state.is_loading
            && state.is_authenticated()
        {
            navigate(
                AppRoute::auth_success_redirect().to_path(),
                Default::default(),
            );
        }
    });
}

#[component]
pub fn AppLayout() -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;

    // 按路由表裁决,而不是假定外壳只挂在受保护路由下
    let allowed = move || {
        let route = AppRoute::from_path(&pathname.get());
        !route.requires_auth() || auth.state.get().is_authenticated()
    };

    view! {
        <Show
            when=move || !auth.state.get().is_loading
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <Show
                when=allowed
                fallback=|| view! {
                    <Redirect
                        path=AppRoute::auth_failure_redirect().to_path()
                        options=NavigateOptions { replace: true, ..Default::default() }
                    />
                }
            >
                <div class="min-h-screen bg-base-200 flex">
                    <Sidebar />
                    <div class="flex-1 flex flex-col min-w-0">
                        <Header />
                        <main class="flex-1 p-4 md:p-8 overflow-y-auto">
                            <Outlet />
                        </main>
                    </div>
                </div>
            </Show>
        </Show>
    }
}

/// 按路由的角色矩阵裁决页面内容
#[component]
pub fn RoleGate(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || {
                auth.state.get().role().is_some_and(|role| route.allows(role))
            }
            fallback=|| view! { <AccessDenied /> }
        >
            {children()}
        </Show>
    }
}

fn nav_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Clients => view! { <Building2 attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Reports => view! { <FileText attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Users => view! { <Users attr:class="h-5 w-5" /> }.into_any(),
        _ => view! { <></> }.into_any(),
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let auth = use_auth();

    let items = move || {
        auth.state
            .get()
            .role()
            .map(AppRoute::nav_items)
            .unwrap_or_default()
    };

    view! {
        <aside class="w-64 bg-base-100 shadow-xl hidden lg:flex flex-col">
            <div class="p-4 flex items-center gap-3 border-b border-base-200">
                <div class="p-2 bg-primary/10 rounded-xl text-primary">
                    <BarChart3 attr:class="h-6 w-6" />
                </div>
                <span class="text-xl font-bold">"Nexus Hub"</span>
            </div>
            <ul class="menu p-4 gap-1 flex-1">
                <For
                    each=items
                    key=|(route, _)| *route
                    children=move |(route, label)| {
                        view! {
                            <li>
                                <A href=route.to_path() exact=true>
                                    {nav_icon(route)}
                                    {label}
                                </A>
                            </li>
                        }
                    }
                />
            </ul>
        </aside>
    }
}

#[component]
fn Header() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let full_name = move || {
        auth.state
            .get()
            .user
            .as_ref()
            .map(|user| user.full_name())
            .unwrap_or_default()
    };
    let role_label = move || {
        auth.state
            .get()
            .role()
            .map(|role| role.label())
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            logout(&auth).await;
            navigate(AppRoute::Landing.to_path(), Default::default());
        });
    };

    view! {
        <header class="navbar bg-base-100 shadow-sm px-4 md:px-8">
            <div class="flex-1">
                <span class="lg:hidden flex items-center gap-2">
                    <BarChart3 attr:class="h-5 w-5 text-primary" />
                    <span class="font-bold">"Nexus Hub"</span>
                </span>
            </div>
            <div class="flex-none gap-3">
                <div class="text-right hidden sm:block">
                    <div class="font-semibold text-sm">{full_name}</div>
                    <div class="text-xs text-base-content/60">{role_label}</div>
                </div>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Sign Out"
                </button>
            </div>
        </header>
    }
}

#[component]
pub fn AccessDenied() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-24 text-center">
            <div class="p-4 bg-error/10 rounded-2xl text-error mb-4">
                <ShieldCheck attr:class="h-10 w-10" />
            </div>
            <h2 class="text-2xl font-bold">"Access denied"</h2>
            <p class="text-base-content/70 mt-2">
                "Your account does not have permission to view this page."
            </p>
            <A href=AppRoute::Dashboard.to_path() attr:class="btn btn-primary mt-6">
                "Back to Dashboard"
            </A>
        </div>
    }
}
