use crate::auth::{upgrade_subscription, use_auth};
use crate::components::icons::*;
use crate::components::toast::Toast;
use crate::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use nexus_hub_shared::protocol::UserCounts;
use nexus_hub_shared::{Report, SubscriptionPlan, User, UserRole, date};

use crate::api::clients::ClientsApi;
use crate::api::reports::ReportsApi;
use crate::api::users::UsersApi;

/// 按角色分发到对应的控制面板
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    view! {
        {move || match auth.state.get().role() {
            Some(UserRole::Admin) => view! { <AdminDashboard /> }.into_any(),
            Some(UserRole::CoreUser) => view! { <CoreUserDashboard /> }.into_any(),
            Some(UserRole::Client) => view! { <ClientDashboard /> }.into_any(),
            None => view! { <></> }.into_any(),
        }}
    }
}

// =========================================================
// 管理员
// =========================================================

#[component]
fn AdminDashboard() -> impl IntoView {
    let auth = use_auth();

    let (counts, set_counts) = signal(Option::<UserCounts>::None);
    let (recent, set_recent) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let gateway = auth.state.get_untracked().gateway;
        spawn_local(async move {
            let api = UsersApi::new(&gateway);
            set_counts.set(api.counts().await);
            let mut users = api.list().await;
            users.truncate(6);
            set_recent.set(users);
            set_loading.set(false);
        });
    });

    let stat = move |pick: fn(&UserCounts) -> u64| {
        counts
            .get()
            .as_ref()
            .map(pick)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Platform overview"</h1>
                <p class="text-base-content/70 mt-1">"Accounts across the whole hub."</p>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Users attr:class="w-8 h-8" />
                    </div>
                    <div class="stat-title">"Total users"</div>
                    <div class="stat-value text-primary">{move || stat(|c| c.total_users)}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <Building2 attr:class="w-8 h-8" />
                    </div>
                    <div class="stat-title">"Core users"</div>
                    <div class="stat-value text-secondary">{move || stat(|c| c.core_users)}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-accent">
                        <FileText attr:class="w-8 h-8" />
                    </div>
                    <div class="stat-title">"Client accounts"</div>
                    <div class="stat-value text-accent">{move || stat(|c| c.client_users)}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <div>
                            <h3 class="card-title">"Recent signups"</h3>
                            <p class="text-base-content/70 text-sm">
                                "The newest accounts on the platform."
                            </p>
                        </div>
                        <A href=AppRoute::Users.to_path() attr:class="btn btn-ghost btn-sm gap-2">
                            "All users" <ArrowRight attr:class="h-4 w-4" />
                        </A>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th class="hidden md:table-cell">"Role"</th>
                                    <th class="hidden md:table-cell">"Joined"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get() && recent.with(|r| r.is_empty())>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || recent.get()
                                    key=|user| user.id.clone()
                                    children=move |user| {
                                        let joined = date::format_date(&user.created_at);
                                        view! {
                                            <tr>
                                                <td class="font-semibold">{user.full_name()}</td>
                                                <td class="opacity-70">{user.email.clone()}</td>
                                                <td class="hidden md:table-cell">
                                                    <div class="badge badge-ghost">{user.role.label()}</div>
                                                </td>
                                                <td class="hidden md:table-cell opacity-70">{joined}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}

// =========================================================
// 核心用户
// =========================================================

#[component]
fn CoreUserDashboard() -> impl IntoView {
    let auth = use_auth();

    let (client_count, set_client_count) = signal(0usize);
    let (report_count, set_report_count) = signal(0usize);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let (upgrading, set_upgrading) = signal(false);

    Effect::new(move |_| {
        let gateway = auth.state.get_untracked().gateway;
        spawn_local(async move {
            set_client_count.set(ClientsApi::new(&gateway).list().await.len());
            set_report_count.set(ReportsApi::new(&gateway).list().await.len());
        });
    });

    let plan = move || {
        auth.state
            .get()
            .user
            .as_ref()
            .map(|user| user.plan())
            .unwrap_or_default()
    };
    let expiry = move || {
        auth.state
            .get()
            .user
            .as_ref()
            .and_then(|user| user.subscription_expiry.clone())
            .map(|stamp| date::format_date(&stamp))
    };
    let capacity = move || plan().client_limit();

    let handle_upgrade = move |target: SubscriptionPlan| {
        set_upgrading.set(true);
        spawn_local(async move {
            match upgrade_subscription(&auth, target).await {
                Ok(update) => {
                    set_notification.set(Some((
                        format!("Subscription upgraded to {}", update.plan.label()),
                        false,
                    )));
                }
                Err(msg) => set_notification.set(Some((msg, true))),
            }
            set_upgrading.set(false);
        });
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-8">
            <Toast notification=notification set_notification=set_notification />

            <div>
                <h1 class="text-3xl font-bold">"Your workspace"</h1>
                <p class="text-base-content/70 mt-1">
                    "Clients and reports managed by your account."
                </p>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Building2 attr:class="w-8 h-8" />
                    </div>
                    <div class="stat-title">"Clients"</div>
                    <div class="stat-value text-primary">{client_count}</div>
                    <div class="stat-desc">
                        {move || format!("of {} available", capacity())}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <FileText attr:class="w-8 h-8" />
                    </div>
                    <div class="stat-title">"Reports"</div>
                    <div class="stat-value text-secondary">{report_count}</div>
                    <div class="stat-desc">"published across clients"</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-accent">
                        <CreditCard attr:class="w-8 h-8" />
                    </div>
                    <div class="stat-title">"Plan"</div>
                    <div class="stat-value text-accent text-2xl">{move || plan().label()}</div>
                    <div class="stat-desc">
                        {move || match expiry() {
                            Some(date) => format!("renews {date}"),
                            None => "no expiry on record".to_string(),
                        }}
                    </div>
                </div>
            </div>

            <div class="grid md:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Quick actions"</h3>
                        <p class="text-base-content/70 text-sm">
                            "Jump straight to the screens you use most."
                        </p>
                        <div class="card-actions mt-4 flex-col items-stretch gap-2">
                            <A href=AppRoute::Clients.to_path() attr:class="btn btn-primary gap-2">
                                <Building2 attr:class="h-4 w-4" /> "Manage clients"
                            </A>
                            <A href=AppRoute::Reports.to_path() attr:class="btn btn-outline gap-2">
                                <FileText attr:class="h-4 w-4" /> "Browse reports"
                            </A>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Subscription"</h3>
                        <p class="text-base-content/70 text-sm">
                            {move || format!(
                                "The {} plan allows up to {} client accounts.",
                                plan().label(),
                                capacity(),
                            )}
                        </p>
                        <progress
                            class="progress progress-primary w-full mt-2"
                            value=move || client_count.get() as f64
                            max=move || capacity() as f64
                        ></progress>
                        <div class="card-actions mt-4 flex-col items-stretch gap-2">
                            <Show when=move || plan() == SubscriptionPlan::Free>
                                <button
                                    class="btn btn-primary"
                                    disabled=move || upgrading.get()
                                    on:click=move |_| handle_upgrade(SubscriptionPlan::Professional)
                                >
                                    "Upgrade to Professional"
                                </button>
                            </Show>
                            <Show when=move || plan() != SubscriptionPlan::Enterprise>
                                <button
                                    class="btn btn-outline"
                                    disabled=move || upgrading.get()
                                    on:click=move |_| handle_upgrade(SubscriptionPlan::Enterprise)
                                >
                                    "Upgrade to Enterprise"
                                </button>
                            </Show>
                            <Show when=move || plan() == SubscriptionPlan::Enterprise>
                                <div class="alert alert-success text-sm py-2">
                                    <span>"You are on the highest tier."</span>
                                </div>
                            </Show>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

// =========================================================
// 客户
// =========================================================

#[component]
fn ClientDashboard() -> impl IntoView {
    let auth = use_auth();

    let (reports, set_reports) = signal(Vec::<Report>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let gateway = auth.state.get_untracked().gateway;
        spawn_local(async move {
            set_reports.set(ReportsApi::new(&gateway).list().await);
            set_loading.set(false);
        });
    });

    let company = move || {
        auth.state
            .get()
            .user
            .as_ref()
            .and_then(|user| user.company_name.clone())
            .unwrap_or_else(|| "your workspace".to_string())
    };

    let _ = company;
    view! { <div></div> }
}

#[allow(dead_code)]
fn __diag_fallback() -> impl IntoView {
    view! {
        <Show
            when=|| true
            fallback=|| view! { <FileText attr:class="h-10 w-10" /> }
        >
            <div></div>
        </Show>
    }
}

#[allow(dead_code)]
fn __diag_for() -> impl IntoView {
    view! {
        <Show
            when=|| true
            fallback=|| view! {
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body items-center text-center py-12">
                        <FileText attr:class="h-10 w-10 text-base-content/30" />
                        <p class="text-base-content/60">
                            "No reports have been shared with you yet."
                        </p>
                    </div>
                </div>
            }
        >
        <For
            each=|| { let v: Vec<Report> = Vec::new(); v }
            key=|report| report.id.clone()
            children=move |report| {
                view! {
                    <div class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow">
                        <div class="card-body">
                            <div class="flex items-center gap-2">
                                <FileText attr:class="h-5 w-5 text-primary" />
                                <h3 class="card-title text-lg">{report.name.clone()}</h3>
                            </div>
                            <div class="badge badge-outline badge-sm">
                                {report.kind.label()}
                            </div>
                            <div class="card-actions justify-end mt-2">
                                <A
                                    href=AppRoute::Reports.to_path()
                                    attr:class="btn btn-primary btn-sm gap-2"
                                >
                                    "Open" <ArrowRight attr:class="h-4 w-4" />
                                </A>
                            </div>
                        </div>
                    </div>
                }
            }
        />
        </Show>
    }
}

#[allow(dead_code)]
fn __diag_orig() -> impl IntoView {
    let reports = RwSignal::new(Vec::<Report>::new());
    let loading = RwSignal::new(false);
    let company = move || "x".to_string();

    let _ = company;
    view! {
        <div class="max-w-7xl mx-auto space-y-8">
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="flex justify-center py-12"></div> }
            >
                <Show
                    when=move || reports.with(|r| !r.is_empty())
                    fallback=|| view! { <div class="card bg-base-100 shadow-md"></div> }
                >
                    <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
                        <For
                            each=move || reports.get()
                            key=|report| report.id.clone()
                            children=move |report| {
                                view! {
                                    <div class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow">
                                        <h3 class="card-title text-lg">{report.name.clone()}</h3>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
