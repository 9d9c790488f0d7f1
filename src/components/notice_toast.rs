//! Notice Toast Component

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{NoticeKind, UiStateStoreFields};

#[component]
pub fn NoticeToast() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let ui = ctx.ui;

    view! {
        {move || ui.notice().get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Info => "notice-toast",
                NoticeKind::Error => "notice-toast error",
            };
            view! {
                <div class=class role="status" on:click=move |_| ui.notice().set(None)>
                    {notice.text}
                </div>
            }
        })}
    }
}
