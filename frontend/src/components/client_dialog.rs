mod form_state;

use crate::components::icons::Plus;
use form_state::FormState;
use leptos::prelude::*;
use nexus_hub_shared::ClientRegistration;

#[component]
pub fn ClientDialog(
    #[prop(into)] on_create: Callback<ClientRegistration>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let form = FormState::new();

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

        // 与提交路径共用同一套校验,错误留在对话框里
        let registration = form.to_registration();
        if let Err(msg) = registration.validate() {
            set_error_msg.set(Some(msg));
            return;
        }
        set_error_msg.set(None);

        on_create.run(registration);
        set_open.set(false);
        form.reset();
    };

    view! {
        // 触发按钮
        <button
            class="btn btn-primary gap-2"
            disabled=disabled
            on:click=move |_| set_open.set(true)
        >
            <Plus attr:class="h-4 w-4" /> "Add Client"
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Add a new client"</h3>
                <p class="py-4 text-base-content/70">
                    "The client signs in with this username and password to view their reports."
                </p>

                <form on:submit=on_submit class="space-y-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="client_company" class="label">
                            <span class="label-text">"Company name"</span>
                        </label>
                        <input
                            id="client_company"
                            required
                            type="text"
                            placeholder="Acme Corporation"
                            on:input=move |ev| form.company_name.set(event_target_value(&ev))
                            prop:value=form.company_name
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="client_username" class="label">
                            <span class="label-text">"Username"</span>
                        </label>
                        <input
                            id="client_username"
                            required
                            type="text"
                            placeholder="acme_portal"
                            on:input=move |ev| form.username.set(event_target_value(&ev))
                            prop:value=form.username
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="client_password" class="label">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="client_password"
                                required
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                                prop:value=form.password
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="client_confirm" class="label">
                                <span class="label-text">"Confirm password"</span>
                            </label>
                            <input
                                id="client_confirm"
                                required
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| form.confirm_password.set(event_target_value(&ev))
                                prop:value=form.confirm_password
                                class="input input-bordered w-full"
                            />
                        </div>
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
                            "Create Client"
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
