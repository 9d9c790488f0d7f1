//! Diagnostics Panel Component
//!
//! Collapsible view of recent log lines, for debugging camera problems on
//! devices without developer tools.

use leptos::prelude::*;
use rolling_logger::LogBuffer;

#[component]
pub fn DiagnosticsPanel(buffer: LogBuffer) -> impl IntoView {
    let (lines, set_lines) = signal(Vec::<String>::new());

    // Snapshot on open; the buffer itself is not reactive
    let refresh = move |_| {
        set_lines.set(buffer.recent().into_iter().map(|line| line.text).collect());
    };

    view! {
        <details class="diagnostics">
            <summary on:click=refresh>"Diagnostics"</summary>
            <pre class="log-lines">
                {move || lines.get().join("\n")}
            </pre>
        </details>
    }
}
