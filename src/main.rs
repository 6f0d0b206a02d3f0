use std::rc::Rc;

use gloo::events::EventListener;
use leptos::*;

mod components;
mod error;
mod models;
mod utils;
mod views;

use components::OperatorTray;
use models::Project;
use utils::config::host_bridge_global;
use utils::decode_project_hash;
use utils::host::{HostBridge, WindowBridge};
use utils::log_trace::{clear_logs, download_logs, log_info, log_warn};
use utils::prefs::{open_prefs, PreferenceStore};
use views::WorkspaceViewer;

// ============================================
// アプリ全体のコンテキスト
// ============================================

/// ホストブリッジと設定ストア（コンポーネントへ注入）
#[derive(Clone)]
pub struct AppContext {
    pub bridge: Rc<dyn HostBridge>,
    pub prefs: Rc<dyn PreferenceStore>,
}

// URLハッシュから現在のプロジェクトを取得
fn read_hash_project() -> Option<Project> {
    let hash = web_sys::window()?.location().hash().ok()?;
    decode_project_hash(&hash)
}

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    let bridge = WindowBridge::new(host_bridge_global());
    if !bridge.is_available() {
        log_warn(
            "host-bridge",
            &format!("window.{} が見つかりません", host_bridge_global()),
        );
    }
    provide_context(AppContext {
        bridge: Rc::new(bridge),
        prefs: open_prefs(),
    });

    let (project, set_project) = create_signal(read_hash_project());
    let (viewer_open, set_viewer_open) = create_signal(false);

    // プロジェクト切替はURLハッシュで通知される
    if let Some(window) = web_sys::window() {
        let listener = EventListener::new(&window, "hashchange", move |_| {
            let next = read_hash_project();
            log_info(
                "app",
                &format!("プロジェクト切替: {:?}", next.as_ref().map(|p| p.id)),
            );
            set_project.set(next);
        });
        on_cleanup(move || drop(listener));
    }

    let project_id = Signal::derive(move || project.with(|p| p.as_ref().map(|p| p.id)));
    let on_close = Callback::new(move |_: ()| set_viewer_open.set(false));

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"ワークスペース"</h1>
                <span class="project-name">
                    {move || project.with(|p| {
                        p.as_ref()
                            .map(|p| p.name.clone())
                            .unwrap_or_else(|| "プロジェクト未選択".to_string())
                    })}
                </span>
                <nav class="tabs">
                    <button on:click=move |_| set_viewer_open.set(true)>"ファイルを表示"</button>
                    <button on:click=|_| download_logs()>"ログを保存"</button>
                    <button on:click=|_| clear_logs()>"ログを消去"</button>
                </nav>
            </header>

            <main class="container">
                <OperatorTray project_id=project_id />
            </main>

            <WorkspaceViewer open=viewer_open project=project on_close=on_close />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    log_info("app", "起動");
    mount_to_body(App);
}
