//! 页面右上角的浮动提示
//!
//! 信号内容为 (文案, 是否出错)，出现 3 秒后自动清除。

use leptos::prelude::*;

#[component]
pub fn Toast(
    notification: ReadSignal<Option<(String, bool)>>,
    set_notification: WriteSignal<Option<(String, bool)>>,
) -> impl IntoView {
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                // 清除时机先于卸载，闭包必须容忍 None
                <div class=move || match notification.get() {
                    Some((_, true)) => "alert alert-error shadow-lg",
                    _ => "alert alert-success shadow-lg",
                }>
                    <span>
                        {move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}
                    </span>
                </div>
            </div>
        </Show>
    }
}
