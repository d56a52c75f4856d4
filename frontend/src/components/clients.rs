use std::collections::HashMap;

use crate::auth::{create_client, use_auth};
use crate::components::client_dialog::ClientDialog;
use crate::components::icons::*;
use crate::components::layout::RoleGate;
use crate::components::toast::Toast;
use crate::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use nexus_hub_shared::{
    Client, ClientRegistration, SubscriptionPlan, can_add_client, client_capacity, date,
};

use crate::api::clients::ClientsApi;

#[component]
pub fn ClientsPage() -> impl IntoView {
    view! {
        <RoleGate route=AppRoute::Clients>
            <ClientsView />
        </RoleGate>
    }
}

#[component]
fn ClientsView() -> impl IntoView {
    let auth = use_auth();

    let (clients, set_clients) = signal(Vec::<Client>::new());
    let (report_counts, set_report_counts) = signal(HashMap::<String, u64>::new());
    let (loading, set_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let load_clients = move || {
        let gateway = auth.state.get_untracked().gateway;
        set_loading.set(true);
        spawn_local(async move {
            let api = ClientsApi::new(&gateway);
            let list = api.list().await;
            let ids: Vec<String> = list.iter().map(|client| client.id.clone()).collect();
            set_clients.set(list);
            set_loading.set(false);

            // 徽标数字异步补齐,列表先渲染
            let counts = futures::future::join_all(ids.iter().map(|id| api.report_count(id))).await;
            set_report_counts.set(ids.into_iter().zip(counts).collect());
        });
    };

    Effect::new(move |_| load_clients());

    // 服务端已按创建者过滤,长度即当前账号的用量
    let can_add = move || {
        let state = auth.state.get();
        match state.user.as_ref() {
            Some(user) => can_add_client(
                user.role,
                user.subscription,
                clients.with(|list| list.len()),
            ),
            None => false,
        }
    };
    let capacity_label = move || {
        let state = auth.state.get();
        match state.user.as_ref() {
            Some(user) => match client_capacity(user.role, user.subscription) {
                None => "unlimited".to_string(),
                Some(limit) => limit.to_string(),
            },
            None => "0".to_string(),
        }
    };
    let on_free_plan = move || {
        auth.state
            .get()
            .user
            .as_ref()
            .is_some_and(|user| user.plan() == SubscriptionPlan::Free)
    };

    let filtered = move || {
        let needle = search.get().to_lowercase();
        clients.with(|list| {
            list.iter()
                .filter(|client| {
                    needle.is_empty()
                        || client.company_name.to_lowercase().contains(&needle)
                        || client.username.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let handle_create = move |registration: ClientRegistration| {
        spawn_local(async move {
            match create_client(&auth, registration).await {
                Ok(client) => {
                    set_notification.set(Some((
                        format!("Client \"{}\" created", client.company_name),
                        false,
                    )));
                    set_clients.update(|list| list.insert(0, client));
                }
                Err(msg) => set_notification.set(Some((msg, true))),
            }
        });
    };

    let handle_delete = move |id: String| {
        let gateway = auth.state.get_untracked().gateway;
        spawn_local(async move {
            if ClientsApi::new(&gateway).delete(&id).await {
                set_notification.set(Some(("Client deleted".to_string(), false)));
                set_clients.update(|list| list.retain(|client| client.id != id));
            } else {
                set_notification.set(Some(("Failed to delete client".to_string(), true)));
            }
        });
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <Toast notification=notification set_notification=set_notification />

            <div class="flex flex-wrap items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Clients"</h1>
                    <p class="text-base-content/70 mt-1">
                        {move || format!(
                            "{} of {} client accounts in use.",
                            clients.with(|list| list.len()),
                            capacity_label(),
                        )}
                    </p>
                </div>
                <ClientDialog on_create=handle_create disabled=Signal::derive(move || !can_add()) />
            </div>

            <Show when=move || !can_add() && on_free_plan()>
                <div role="alert" class="alert alert-warning">
                    <span>
                        "You have reached the client limit of the Free plan. "
                        "Upgrade from your dashboard to add more."
                    </span>
                    <A href=AppRoute::Dashboard.to_path() attr:class="btn btn-sm">
                        "View plans"
                    </A>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex flex-wrap items-center justify-between gap-3 p-6 pb-2">
                        <label class="input input-bordered flex items-center gap-2 w-full max-w-xs">
                            <Search attr:class="h-4 w-4 opacity-50" />
                            <input
                                type="text"
                                class="grow"
                                placeholder="Search by company or username"
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                                prop:value=search
                            />
                        </label>
                        <button
                            on:click=move |_| load_clients()
                            disabled=move || loading.get()
                            class="btn btn-ghost btn-circle"
                        >
                            <RefreshCw attr:class=move || {
                                if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                            } />
                        </button>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Company"</th>
                                    <th>"Username"</th>
                                    <th class="hidden md:table-cell">"Created"</th>
                                    <th>"Reports"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || {
                                    filtered().is_empty() && !loading.get()
                                }>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            "No clients found. Add one to get started."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || loading.get() && clients.with(|list| list.is_empty())>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=filtered
                                    key=|client| client.id.clone()
                                    children=move |client| {
                                        let id = client.id.clone();
                                        let delete_id = client.id.clone();
                                        let reports_href =
                                            format!("/reports?clientId={}", client.id);
                                        let created = date::relative_from_now(&client.created_at);
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-2 font-semibold">
                                                        <Building2 attr:class="h-4 w-4 opacity-50" />
                                                        {client.company_name.clone()}
                                                    </div>
                                                </td>
                                                <td class="font-mono text-sm opacity-70">
                                                    {client.username.clone()}
                                                </td>
                                                <td class="hidden md:table-cell opacity-70">
                                                    {created}
                                                </td>
                                                <td>
                                                    <div class="badge badge-neutral">
                                                        {move || {
                                                            report_counts
                                                                .with(|counts| counts.get(&id).copied())
                                                                .map(|n| n.to_string())
                                                                .unwrap_or_else(|| "-".to_string())
                                                        }}
                                                    </div>
                                                </td>
                                                <td>
                                                    <div class="dropdown dropdown-end">
                                                        <div tabindex="0" role="button" class="btn btn-ghost btn-sm btn-square">
                                                            <MoreHorizontal attr:class="h-4 w-4" />
                                                        </div>
                                                        <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                                                            <li>
                                                                <A href=reports_href>
                                                                    <FileText attr:class="mr-2 h-4 w-4" />
                                                                    "Manage Reports"
                                                                </A>
                                                            </li>
                                                            <li>
                                                                <a
                                                                    on:click=move |_| handle_delete(delete_id.clone())
                                                                    class="text-error hover:bg-error/10"
                                                                >
                                                                    <Trash2 attr:class="mr-2 h-4 w-4" />
                                                                    "Delete"
                                                                </a>
                                                            </li>
                                                        </ul>
                                                    </div>
                                                </td>
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
