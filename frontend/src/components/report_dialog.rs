use crate::auth::use_auth;
use crate::components::icons::Plus;
use leptos::prelude::*;
use nexus_hub_shared::protocol::ReportCreate;
use nexus_hub_shared::{Client, ReportType};

#[component]
pub fn ReportDialog(
    clients: ReadSignal<Vec<Client>>,
    #[prop(into)] on_create: Callback<ReportCreate>,
) -> impl IntoView {
    let auth = use_auth();
    let (open, set_open) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 表单字段
    let (name, set_name) = signal(String::new());
    let (client_id, set_client_id) = signal(String::new());
    let (embed_url, set_embed_url) = signal(String::new());
    let (kind, set_kind) = signal(ReportType::Dashboard);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let reset_form = move || {
        set_name.set(String::new());
        set_client_id.set(String::new());
        set_embed_url.set(String::new());
        set_kind.set(ReportType::Dashboard);
        set_error_msg.set(None);
    };

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if client_id.get().is_empty() {
            set_error_msg.set(Some("Select a client for this report".to_string()));
            return;
        }
        set_error_msg.set(None);

        // 服务端以提交者记账
        let created_by = auth
            .state
            .get_untracked()
            .user
            .as_ref()
            .map(|user| user.id.clone())
            .unwrap_or_default();

        let body = ReportCreate {
            name: name.get(),
            client_id: client_id.get(),
            power_bi_embed_url: embed_url.get(),
            kind: kind.get(),
            created_by,
        };

        on_create.run(body);
        set_open.set(false);
        reset_form();
    };

    view! {
        // 触发按钮
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" /> "Add Report"
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Publish a report"</h3>
                <p class="py-4 text-base-content/70">
                    "Paste the Power BI embed URL and pick the client who should see it."
                </p>

                <form on:submit=on_submit class="space-y-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="report_name" class="label">
                            <span class="label-text">"Report name"</span>
                        </label>
                        <input
                            id="report_name"
                            required
                            type="text"
                            placeholder="Q3 Sales Dashboard"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="report_client" class="label">
                                <span class="label-text">"Client"</span>
                            </label>
                            <select
                                id="report_client"
                                required
                                class="select select-bordered w-full"
                                on:change=move |ev| set_client_id.set(event_target_value(&ev))
                            >
                                <option value="" disabled selected=move || client_id.get().is_empty()>
                                    "Select a client"
                                </option>
                                <For
                                    each=move || clients.get()
                                    key=|client| client.id.clone()
                                    children=move |client| {
                                        let id = client.id.clone();
                                        let value = client.id.clone();
                                        view! {
                                            <option
                                                value=value
                                                selected=move || client_id.get() == id
                                            >
                                                {client.company_name.clone()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                        </div>
                        <div class="form-control">
                            <label for="report_kind" class="label">
                                <span class="label-text">"Type"</span>
                            </label>
                            <select
                                id="report_kind"
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    set_kind.set(match event_target_value(&ev).as_str() {
                                        "Report" => ReportType::Report,
                                        _ => ReportType::Dashboard,
                                    });
                                }
                            >
                                <option value="Dashboard" selected=move || kind.get() == ReportType::Dashboard>
                                    "Dashboard"
                                </option>
                                <option value="Report" selected=move || kind.get() == ReportType::Report>
                                    "Report"
                                </option>
                            </select>
                        </div>
                    </div>

                    <div class="form-control">
                        <label for="report_url" class="label">
                            <span class="label-text">"Power BI embed URL"</span>
                        </label>
                        <input
                            id="report_url"
                            required
                            type="url"
                            placeholder="https://app.powerbi.com/view?r=..."
                            on:input=move |ev| set_embed_url.set(event_target_value(&ev))
                            prop:value=embed_url
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="modal-action">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            on:click=move |_| set_open.set(false)
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            "Publish Report"
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
