//! Logs Page
//!
//! Polls the newest log page while mounted. Leaving the page stops the
//! poller and asks the server to clear every log.

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use item_console_core::{
    LogEntry, LogLevel, LogViewState, LogViewerController, Liveness, SeverityFilter,
};

use crate::browser::format_local_timestamp;
use crate::components::Loader;
use crate::context::use_app_context;

fn level_class(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "log-level level-debug",
        LogLevel::Info => "log-level level-info",
        LogLevel::Warning => "log-level level-warning",
        LogLevel::Error => "log-level level-error",
        LogLevel::Critical => "log-level level-critical",
    }
}

fn service_class(service: &str) -> &'static str {
    match service {
        "frontend" => "log-service service-frontend",
        "collection.views" => "log-service service-collection",
        _ => "log-service",
    }
}

fn sleep(interval: Duration) -> TimeoutFuture {
    TimeoutFuture::new(u32::try_from(interval.as_millis()).unwrap_or(u32::MAX))
}

#[component]
fn LogRow(entry: LogEntry) -> impl IntoView {
    view! {
        <tr class="log-row">
            <td class="log-time">{format_local_timestamp(&entry.timestamp)}</td>
            <td><span class=level_class(entry.level)>{entry.level.as_str()}</span></td>
            <td><span class=service_class(&entry.service)>{entry.service.clone()}</span></td>
            <td class="log-message">{entry.message.clone()}</td>
        </tr>
    }
}

#[component]
pub fn LogsPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = ctx.api();
    let interval = Duration::from_millis(api.config().poll_interval_ms);
    let controller = LogViewerController::new(api, interval);
    let state = RwSignal::new(LogViewState::default());
    let alive = Liveness::new();

    spawn_local({
        let controller = controller.clone();
        let alive = alive.clone();
        async move {
            controller
                .run(&alive, sleep, |result| state.update(|s| s.finish_tick(result)))
                .await;
        }
    });

    on_cleanup(move || {
        alive.cancel();
        spawn_local(async move { controller.clear_on_leave().await });
    });

    view! {
        <div class="page logs-page">
            <div class="page-header">
                <h1>"System Logs"</h1>
                <div class="page-actions">
                    <label for="level-filter">"Level"</label>
                    <select
                        id="level-filter"
                        class="form-control"
                        prop:value=move || state.with(|s| s.filter().value())
                        on:change=move |ev| {
                            let filter = SeverityFilter::from_value(&event_target_value(&ev));
                            state.update(|s| s.set_filter(filter));
                        }
                    >
                        <option value=SeverityFilter::All.value()>"All Levels"</option>
                        {LogLevel::ALL
                            .iter()
                            .map(|level| view! { <option value=level.as_str()>{level.as_str()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <Show
                when=move || !state.with(|s| s.is_loading())
                fallback=|| view! { <Loader label="Loading logs…" /> }
            >
                <Show
                    when=move || state.with(|s| !s.visible().is_empty())
                    fallback=|| view! { <div class="empty-state"><p>"No logs to display"</p></div> }
                >
                    <table class="logs-table">
                        <thead>
                            <tr>
                                <th>"Time"</th>
                                <th>"Level"</th>
                                <th>"Service"</th>
                                <th>"Message"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|entry: &LogEntry| entry.id
                                children=|entry: LogEntry| view! { <LogRow entry=entry /> }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}
