//! 营销首页
//!
//! 唯一不进守卫的页面，已登录用户也能访问，导航栏按
//! 登录状态切换入口。

use leptos::prelude::*;
use leptos_router::components::A;

use nexus_hub_shared::PricingTier;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::routes::AppRoute;

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = move || auth.state.get().is_authenticated();

    view! {
        <div class="min-h-screen bg-base-100">
            <div class="navbar bg-base-100 shadow-sm px-4 md:px-8 sticky top-0 z-40">
                <div class="flex-1 gap-3">
                    <div class="p-2 bg-primary/10 rounded-xl text-primary">
                        <BarChart3 attr:class="h-6 w-6" />
                    </div>
                    <span class="text-xl font-bold">"Nexus Hub"</span>
                </div>
                <div class="flex-none gap-2">
                    <Show
                        when=is_authenticated
                        fallback=|| view! {
                            <A href=AppRoute::Login.to_path() attr:class="btn btn-ghost">
                                "Sign In"
                            </A>
                            <A href=AppRoute::Register.to_path() attr:class="btn btn-primary">
                                "Get Started"
                            </A>
                        }
                    >
                        <A
                            href=AppRoute::Dashboard.to_path()
                            attr:class="btn btn-primary gap-2"
                        >
                            "Go to Dashboard"
                            <ArrowRight attr:class="h-4 w-4" />
                        </A>
                    </Show>
                </div>
            </div>

            <div class="hero py-20 bg-base-200">
                <div class="hero-content text-center">
                    <div class="max-w-2xl">
                        <h1 class="text-5xl font-bold leading-tight">
                            "Share Power BI insights with every client"
                        </h1>
                        <p class="py-6 text-lg text-base-content/70">
                            "Nexus Hub gives your consultancy one place to manage client \
                             accounts and publish embedded Power BI reports, with role-based \
                             access out of the box."
                        </p>
                        <div class="flex justify-center gap-3">
                            <A
                                href=AppRoute::Register.to_path()
                                attr:class="btn btn-primary btn-lg gap-2"
                            >
                                "Start for free"
                                <ArrowRight attr:class="h-5 w-5" />
                            </A>
                            <A href=AppRoute::Login.to_path() attr:class="btn btn-outline btn-lg">
                                "Sign In"
                            </A>
                        </div>
                    </div>
                </div>
            </div>

            <div class="py-16 px-4 max-w-6xl mx-auto">
                <h2 class="text-3xl font-bold text-center mb-10">
                    "Everything a reporting portal needs"
                </h2>
                <div class="grid md:grid-cols-3 gap-6">
                    <FeatureCard
                        icon=view! { <Zap attr:class="h-7 w-7" /> }.into_any()
                        title="Instant embedding"
                        text="Paste a Power BI embed URL and your client sees a live report, \
                              no deployment step in between."
                    />
                    <FeatureCard
                        icon=view! { <ShieldCheck attr:class="h-7 w-7" /> }.into_any()
                        title="Role-based access"
                        text="Admins, core users and clients each get their own workspace. \
                              Clients only ever see the reports assigned to them."
                    />
                    <FeatureCard
                        icon=view! { <Globe attr:class="h-7 w-7" /> }.into_any()
                        title="One hub per client"
                        text="Every client account comes with its own sign-in and report list, \
                              managed from a single dashboard."
                    />
                </div>
            </div>

            <div class="py-16 px-4 bg-base-200">
                <h2 class="text-3xl font-bold text-center">"Simple pricing"</h2>
                <p class="text-center text-base-content/70 mt-2 mb-10">
                    "Scale the plan with the number of clients you serve."
                </p>
                <div class="grid md:grid-cols-3 gap-6 max-w-6xl mx-auto">
                    {PricingTier::all()
                        .into_iter()
                        .map(|tier| view! { <PricingCard tier /> })
                        .collect_view()}
                </div>
            </div>

            <footer class="footer footer-center p-8 bg-base-100 text-base-content/60">
                <p>"Nexus Hub. Power BI client portals for consultancies."</p>
            </footer>
        </div>
    }
}

#[component]
fn FeatureCard(icon: AnyView, title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body items-center text-center">
                <div class="p-3 bg-primary/10 rounded-2xl text-primary">{icon}</div>
                <h3 class="card-title mt-2">{title}</h3>
                <p class="text-base-content/70 text-sm">{text}</p>
            </div>
        </div>
    }
}

#[component]
fn PricingCard(tier: PricingTier) -> impl IntoView {
    let card_class = if tier.highlighted {
        "card bg-base-100 shadow-xl border-2 border-primary"
    } else {
        "card bg-base-100 shadow-md"
    };

    view! {
        <div class=card_class>
            <div class="card-body">
                <Show when=move || tier.highlighted>
                    <div class="badge badge-primary absolute -top-3 left-1/2 -translate-x-1/2">
                        "Most popular"
                    </div>
                </Show>
                <h3 class="card-title">{tier.plan.label()}</h3>
                <p class="text-sm text-base-content/70">{tier.tagline}</p>
                <div class="my-4">
                    <span class="text-4xl font-bold">{tier.price}</span>
                    <span class="text-base-content/60">{tier.period}</span>
                </div>
                <ul class="space-y-2 flex-1">
                    {tier
                        .features
                        .iter()
                        .map(|feature| view! {
                            <li class="flex items-center gap-2 text-sm">
                                <Check attr:class="h-4 w-4 text-success shrink-0" />
                                {*feature}
                            </li>
                        })
                        .collect_view()}
                </ul>
                <div class="card-actions mt-4">
                    <A
                        href=AppRoute::Register.to_path()
                        attr:class=if tier.highlighted {
                            "btn btn-primary w-full"
                        } else {
                            "btn btn-outline w-full"
                        }
                    >
                        "Choose " {tier.plan.label()}
                    </A>
                </div>
            </div>
        </div>
    }
}
