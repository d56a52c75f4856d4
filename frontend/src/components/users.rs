use crate::api::users::UsersApi;
use crate::auth::use_auth;
use crate::components::icons::{RefreshCw, Search};
use crate::components::layout::RoleGate;
use crate::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use nexus_hub_shared::date;
use nexus_hub_shared::{User, UserRole};

// ====== 用户目录页（管理员） (Admin user directory) ======

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <RoleGate route=AppRoute::Users>
            <UsersView />
        </RoleGate>
    }
}

#[component]
fn UsersView() -> impl IntoView {
    let auth = use_auth();
    let (users, set_users) = signal(Vec::<User>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (search, set_search) = signal(String::new());

    let load_users = move || {
        let gateway = auth.state.get_untracked().gateway;
        set_is_loading.set(true);
        spawn_local(async move {
            let api = UsersApi::new(&gateway);
            set_users.set(api.list().await);
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| load_users());

    let filtered = move || {
        let term = search.get().to_lowercase();
        users
            .get()
            .into_iter()
            .filter(|user| {
                term.is_empty()
                    || user.full_name().to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold">"Users"</h1>
                    <p class="text-base-content/70">
                        {move || format!("{} accounts registered on the hub.", users.get().len())}
                    </p>
                </div>
                <div class="flex items-center gap-2">
                    <label class="input input-bordered flex items-center gap-2">
                        <Search attr:class="h-4 w-4 opacity-50" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search by name or email"
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            prop:value=search
                        />
                    </label>
                    <button class="btn btn-ghost btn-square" on:click=move |_| load_users()>
                        <RefreshCw attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>

            <Show
                when=move || !is_loading.get()
                fallback=|| {
                    view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                }
            >
                <Show
                    when=move || !filtered().is_empty()
                    fallback=|| {
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body items-center py-16 text-base-content/60">
                                    "No users match this search."
                                </div>
                            </div>
                        }
                    }
                >
                    <div class="card bg-base-100 shadow">
                        <div class="card-body p-0 overflow-x-auto">
                            <table class="table table-zebra">
                                <thead>
                                    <tr>
                                        <th>"User"</th>
                                        <th>"Role"</th>
                                        <th>"Company"</th>
                                        <th>"Plan"</th>
                                        <th>"Status"</th>
                                        <th>"Joined"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=filtered
                                        key=|user| user.id.clone()
                                        children=move |user| view! { <UserRow user /> }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn UserRow(user: User) -> impl IntoView {
    let role_badge = match user.role {
        UserRole::Admin => "badge badge-secondary badge-sm",
        UserRole::CoreUser => "badge badge-primary badge-sm",
        UserRole::Client => "badge badge-ghost badge-sm",
    };
    let plan = match user.role {
        UserRole::CoreUser => Some(user.plan().label().to_string()),
        _ => None,
    };
    let is_active = user
        .status
        .as_deref()
        .map(|status| status != "inactive")
        .unwrap_or(true);
    let status_dot = if is_active {
        "inline-block h-2 w-2 rounded-full bg-success"
    } else {
        "inline-block h-2 w-2 rounded-full bg-base-300"
    };
    let joined = date::format_date(&user.created_at);

    view! {
        <tr>
            <td>
                <div class="font-medium">{user.full_name()}</div>
                <div class="text-sm text-base-content/60">{user.email.clone()}</div>
            </td>
            <td>
                <span class=role_badge>{user.role.label()}</span>
            </td>
            <td>{user.company_name.clone().unwrap_or_else(|| "-".to_string())}</td>
            <td>
                {match plan {
                    Some(label) => view! { <span class="badge badge-outline badge-sm">{label}</span> }.into_any(),
                    None => view! { <span class="text-base-content/40">"-"</span> }.into_any(),
                }}
            </td>
            <td>
                <div class="flex items-center gap-2">
                    <span class=status_dot></span>
                    <span class="text-sm">{if is_active { "Active" } else { "Inactive" }}</span>
                </div>
            </td>
            <td class="text-sm text-base-content/60">{joined}</td>
        </tr>
    }
}
