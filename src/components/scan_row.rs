//! Scan Row Component
//!
//! One item: number, code, format, last-seen time, quantity controls
//! and delete. Actions are dispatched by item id through the context.

use chrono::Local;
use leptos::prelude::*;
use scan_core::ItemRow;

use crate::context::AppContext;

#[component]
pub fn ScanRow(row: ItemRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = row.item.id;
    let last_seen = row
        .item
        .last_seen_at
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string();

    view! {
        <li class="scan-row">
            <span class="row-number">{row.number}</span>
            <div class="row-main">
                <span class="row-code">{row.item.code.clone()}</span>
                <span class="row-meta">
                    <span class="row-format">{row.item.symbology.label()}</span>
                    <span class="row-time">{last_seen}</span>
                </span>
            </div>
            <div class="quantity-controls">
                <button class="qty-btn" title="Decrease" on:click=move |_| ctx.change_quantity(id, -1)>
                    "−"
                </button>
                <span class="quantity">{row.item.quantity()}</span>
                <button class="qty-btn" title="Increase" on:click=move |_| ctx.change_quantity(id, 1)>
                    "+"
                </button>
            </div>
            <button class="delete-btn" title="Delete" on:click=move |_| ctx.delete_item(id)>
                "×"
            </button>
        </li>
    }
}
