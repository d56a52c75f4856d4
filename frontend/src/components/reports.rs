use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::report_dialog::ReportDialog;
use crate::components::toast::Toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use nexus_hub_shared::protocol::ReportCreate;
use nexus_hub_shared::{Client, Report, UserRole, date};

use crate::api::clients::ClientsApi;
use crate::api::reports::ReportsApi;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();

    let (reports, set_reports) = signal(Vec::<Report>::new());
    let (clients, set_clients) = signal(Vec::<Client>::new());
    let (loading, set_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let (selected, set_selected) = signal(Option::<Report>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    // ?clientId= 过滤,来自客户列表的 Manage Reports 入口
    let client_filter = move || query.with(|params| params.get("clientId"));

    let is_manager = move || {
        matches!(
            auth.state.get().role(),
            Some(UserRole::Admin) | Some(UserRole::CoreUser)
        )
    };

    // 过滤条件变化时重新拉取
    Effect::new(move |_| {
        let filter = client_filter();
        let gateway = auth.state.get_untracked().gateway;
        set_loading.set(true);
        spawn_local(async move {
            let api = ReportsApi::new(&gateway);
            let list = match filter.as_deref() {
                Some(id) => api.list_for_client(id).await,
                None => api.list().await,
            };
            set_reports.set(list);
            set_loading.set(false);
        });
    });

    // 客户名册,客户角色用不到
    Effect::new(move |_| {
        let state = auth.state.get_untracked();
        if state.role() == Some(UserRole::Client) {
            return;
        }
        let gateway = state.gateway;
        spawn_local(async move {
            set_clients.set(ClientsApi::new(&gateway).list().await);
        });
    });

    let client_name = move |id: &str| {
        clients.with(|list| {
            list.iter()
                .find(|client| client.id == id)
                .map(|client| client.company_name.clone())
        })
    };
    let filter_name = move || {
        client_filter().and_then(|id| client_name(&id))
    };

    let filtered = move || {
        let needle = search.get().to_lowercase();
        reports.with(|list| {
            list.iter()
                .filter(|report| {
                    needle.is_empty() || report.name.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let handle_create = move |body: ReportCreate| {
        let gateway = auth.state.get_untracked().gateway;
        spawn_local(async move {
            match ReportsApi::new(&gateway).create(&body).await {
                Some(report) => {
                    set_notification.set(Some((
                        format!("Report \"{}\" created", report.name),
                        false,
                    )));
                    set_reports.update(|list| list.insert(0, report));
                }
                None => {
                    set_notification.set(Some(("Failed to create report".to_string(), true)));
                }
            }
        });
    };

    let handle_delete = move |id: String| {
        let gateway = auth.state.get_untracked().gateway;
        spawn_local(async move {
            if ReportsApi::new(&gateway).delete(&id).await {
                set_notification.set(Some(("Report deleted".to_string(), false)));
                set_reports.update(|list| list.retain(|report| report.id != id));
                if selected.get_untracked().is_some_and(|report| report.id == id) {
                    set_selected.set(None);
                }
            } else {
                set_notification.set(Some(("Failed to delete report".to_string(), true)));
            }
        });
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <Toast notification=notification set_notification=set_notification />

            <div class="flex flex-wrap items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">
                        {move || if is_manager() { "Reports" } else { "My Reports" }}
                    </h1>
                    <Show when=move || filter_name().is_some()>
                        <div class="flex items-center gap-2 mt-2">
                            <div class="badge badge-primary badge-outline gap-1">
                                "Client: " {move || filter_name().unwrap_or_default()}
                            </div>
                            <A href="/reports" attr:class="btn btn-ghost btn-xs gap-1">
                                <X attr:class="h-3 w-3" /> "Clear filter"
                            </A>
                        </div>
                    </Show>
                </div>
                <Show when=is_manager>
                    <ReportDialog clients=clients on_create=handle_create />
                </Show>
            </div>

            // 选中报表的内嵌查看器
            <Show when=move || selected.get().is_some()>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-4">
                        <div class="flex items-center justify-between">
                            <div class="flex items-center gap-2">
                                <FileText attr:class="h-5 w-5 text-primary" />
                                <h3 class="card-title text-lg">
                                    {move || {
                                        selected.get().map(|report| report.name).unwrap_or_default()
                                    }}
                                </h3>
                            </div>
                            <div class="flex items-center gap-1">
                                <a
                                    class="btn btn-ghost btn-sm btn-circle"
                                    target="_blank"
                                    rel="noreferrer"
                                    href=move || {
                                        selected
                                            .get()
                                            .map(|report| report.power_bi_embed_url)
                                            .unwrap_or_default()
                                    }
                                >
                                    <ExternalLink attr:class="h-4 w-4" />
                                </a>
                                <button
                                    class="btn btn-ghost btn-sm btn-circle"
                                    on:click=move |_| set_selected.set(None)
                                >
                                    <X attr:class="h-4 w-4" />
                                </button>
                            </div>
                        </div>
                        <iframe
                            class="w-full rounded-lg border border-base-200 mt-2"
                            style="height: 70vh;"
                            src=move || {
                                selected
                                    .get()
                                    .map(|report| report.power_bi_embed_url)
                                    .unwrap_or_default()
                            }
                            allowfullscreen=true
                        ></iframe>
                    </div>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <label class="input input-bordered flex items-center gap-2 w-full max-w-xs">
                        <Search attr:class="h-4 w-4 opacity-50" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search reports"
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            prop:value=search
                        />
                    </label>

                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="flex justify-center py-12">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                    >
                        <Show
                            when=move || !filtered().is_empty()
                            fallback=|| view! {
                                <div class="text-center py-12 text-base-content/50">
                                    "No reports found."
                                </div>
                            }
                        >
                            <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4 mt-2">
                                <For
                                    each=filtered
                                    key=|report| report.id.clone()
                                    children=move |report| {
                                        let open_report = report.clone();
                                        let delete_id = report.id.clone();
                                        let owner_id = report.client_id.clone();
                                        let created = if report.created_at.is_empty() {
                                            String::new()
                                        } else {
                                            date::relative_from_now(&report.created_at)
                                        };
                                        view! {
                                            <div
                                                class="card bg-base-200 hover:bg-base-300 cursor-pointer transition-colors"
                                                on:click=move |_| set_selected.set(Some(open_report.clone()))
                                            >
                                                <div class="card-body p-4">
                                                    <div class="flex items-start justify-between">
                                                        <div class="flex items-center gap-2">
                                                            <FileText attr:class="h-5 w-5 text-primary shrink-0" />
                                                            <h3 class="font-semibold">{report.name.clone()}</h3>
                                                        </div>
                                                        <Show when=is_manager>
                                                            {
                                                                let delete_id = delete_id.clone();
                                                                view! {
                                                                    <button
                                                                        class="btn btn-ghost btn-xs btn-circle text-error"
                                                                        on:click=move |ev: leptos::web_sys::MouseEvent| {
                                                                            ev.stop_propagation();
                                                                            handle_delete(delete_id.clone());
                                                                        }
                                                                    >
                                                                        <Trash2 attr:class="h-4 w-4" />
                                                                    </button>
                                                                }
                                                            }
                                                        </Show>
                                                    </div>
                                                    <div class="flex items-center gap-2 mt-1">
                                                        <div class="badge badge-outline badge-sm">
                                                            {report.kind.label()}
                                                        </div>
                                                        {move || client_name(&owner_id).map(|name| view! {
                                                            <div class="badge badge-ghost badge-sm">{name}</div>
                                                        })}
                                                    </div>
                                                    <p class="text-xs text-base-content/50 mt-1">{created}</p>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </Show>
                    </Show>
                </div>
            </div>
        </div>
    }
}
