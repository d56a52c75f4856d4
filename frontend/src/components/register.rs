use crate::auth::{register, use_auth};
use crate::components::icons::BarChart3;
use crate::components::layout::redirect_authenticated;
use crate::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use nexus_hub_shared::protocol::CoreUserRegistration;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone_number, set_phone_number) = signal(String::new());
    let (company_name, set_company_name) = signal(String::new());
    let (business_type, set_business_type) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    redirect_authenticated(AppRoute::Register);

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            if password.get().len() < 8 {
                set_error_msg.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if password.get() != confirm_password.get() {
                set_error_msg.set(Some("Passwords do not match".to_string()));
                return;
            }

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let registration = CoreUserRegistration {
                email: email.get(),
                password: password.get(),
                first_name: first_name.get(),
                last_name: last_name.get(),
                phone_number: phone_number.get(),
                company_name: company_name.get(),
                business_type: business_type.get(),
            };

            let navigate = navigate.clone();
            spawn_local(async move {
                match register(&auth, registration).await {
                    Ok(()) => navigate(AppRoute::Login.to_path(), Default::default()),
                    Err(msg) => set_error_msg.set(Some(msg)),
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200 py-8">
            <div class="hero-content flex-col w-full max-w-2xl">
                <div class="text-center mb-2">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <BarChart3 attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create your account"</h1>
                        <p class="text-base-content/70">
                            "Start sharing Power BI reports with your clients"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="first_name">
                                    <span class="label-text">"First name"</span>
                                </label>
                                <input
                                    id="first_name"
                                    type="text"
                                    placeholder="Ada"
                                    on:input=move |ev| set_first_name.set(event_target_value(&ev))
                                    prop:value=first_name
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="last_name">
                                    <span class="label-text">"Last name"</span>
                                </label>
                                <input
                                    id="last_name"
                                    type="text"
                                    placeholder="Lovelace"
                                    on:input=move |ev| set_last_name.set(event_target_value(&ev))
                                    prop:value=last_name
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@company.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="phone_number">
                                    <span class="label-text">"Phone number"</span>
                                </label>
                                <input
                                    id="phone_number"
                                    type="tel"
                                    placeholder="555-0101"
                                    on:input=move |ev| set_phone_number.set(event_target_value(&ev))
                                    prop:value=phone_number
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="business_type">
                                    <span class="label-text">"Business type"</span>
                                </label>
                                <input
                                    id="business_type"
                                    type="text"
                                    placeholder="Consulting"
                                    on:input=move |ev| set_business_type.set(event_target_value(&ev))
                                    prop:value=business_type
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="company_name">
                                <span class="label-text">"Company name"</span>
                            </label>
                            <input
                                id="company_name"
                                type="text"
                                placeholder="Lovelace Analytics"
                                on:input=move |ev| set_company_name.set(event_target_value(&ev))
                                prop:value=company_name
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="password">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="confirm_password">
                                    <span class="label-text">"Confirm password"</span>
                                </label>
                                <input
                                    id="confirm_password"
                                    type="password"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                                    prop:value=confirm_password
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "Already registered? "
                            <A href=AppRoute::Login.to_path() attr:class="link link-primary">
                                "Sign in"
                            </A>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
