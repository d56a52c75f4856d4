use crate::auth::{login, use_auth};
use crate::components::icons::BarChart3;
use crate::components::layout::redirect_authenticated;
use crate::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    redirect_authenticated(AppRoute::Login);

    let is_loading = move || auth.state.get().is_loading;

    view! {
        <Show
            when=move || !is_loading()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            {
                let navigate = navigate.clone();
                let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();
                    if email.get().is_empty() || password.get().is_empty() {
                        set_error_msg.set(Some("Please fill in all fields".to_string()));
                        return;
                    }

                    set_is_submitting.set(true);
                    set_error_msg.set(None);

                    let navigate = navigate.clone();
                    spawn_local(async move {
                        match login(&auth, email.get(), password.get()).await {
                            Ok(()) => {
                                navigate(
                                    AppRoute::auth_success_redirect().to_path(),
                                    Default::default(),
                                );
                            }
                            Err(msg) => set_error_msg.set(Some(msg)),
                        }
                        set_is_submitting.set(false);
                    });
                };

                view! {
                    <div class="hero min-h-screen bg-base-200">
                        <div class="hero-content flex-col w-full max-w-md">
                            <div class="text-center mb-4">
                                <div class="flex flex-col items-center gap-2">
                                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                        <BarChart3 attr:class="h-8 w-8" />
                                    </div>
                                    <h1 class="text-3xl font-bold">"Welcome back"</h1>
                                    <p class="text-base-content/70">
                                        "Sign in to your Nexus Hub account"
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
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                            } else {
                                                "Sign In".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <p class="text-center text-sm text-base-content/70 mt-2">
                                        "No account yet? "
                                        <A href=AppRoute::Register.to_path() attr:class="link link-primary">
                                            "Create one"
                                        </A>
                                    </p>
                                </form>
                            </div>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}
