//! ワークスペースビューア（モーダル）
//!
//! プロジェクトの作業フォルダをツリー表示し、選択したファイルを読み取り専用で表示する。

use std::rc::Rc;

use gloo::events::EventListener;
use leptos::*;
use wasm_bindgen::JsCast;

use super::{FilePreview, FileTreePanel};
use crate::models::{FileViewState, Project, TreeState};
use crate::utils::config::TreeOptions;
use crate::utils::file_loader::load_file_content;
use crate::utils::file_tree::load_workspace_tree;
use crate::utils::log_trace::log_warn;
use crate::utils::request_seq::RequestSeq;
use crate::AppContext;

#[component]
pub fn WorkspaceViewer(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] project: Signal<Option<Project>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let (tree, set_tree) = create_signal(TreeState::default());
    let (file, set_file) = create_signal(FileViewState::default());
    let tree_seq = RequestSeq::new();
    let file_seq = RequestSeq::new();
    let options = Rc::new(TreeOptions::default());

    let base_folder = create_memo(move |_| {
        project.with(|p| p.as_ref().and_then(|p| p.base_folder().map(str::to_string)))
    });

    // 開いた時・作業フォルダが変わった時にツリーを作り直す
    {
        let bridge = ctx.bridge.clone();
        let tree_seq = tree_seq.clone();
        let file_seq = file_seq.clone();
        create_effect(move |_| {
            if !open.get() {
                tree_seq.invalidate();
                file_seq.invalidate();
                return;
            }
            let root = base_folder.get();
            let ticket = tree_seq.issue();
            file_seq.invalidate();
            set_file.set(FileViewState::default());
            set_tree.update(TreeState::begin);

            let bridge = bridge.clone();
            let seq = tree_seq.clone();
            let options = options.clone();
            spawn_local(async move {
                let result = load_workspace_tree(bridge.as_ref(), root.as_deref(), &options).await;
                if !seq.is_latest(ticket) {
                    return;
                }
                if let Err(e) = &result {
                    log_warn("workspace-tree", &e.to_string());
                }
                set_tree.update(|s| s.apply(result));
            });
        });
    }

    let on_select = {
        let bridge = ctx.bridge.clone();
        let seq = file_seq.clone();
        Callback::new(move |path: String| {
            let ticket = seq.issue();
            set_file.update(|s| s.begin(&path));

            let bridge = bridge.clone();
            let seq = seq.clone();
            spawn_local(async move {
                let result = load_file_content(bridge.as_ref(), &path).await;
                if !seq.is_latest(ticket) {
                    return;
                }
                set_file.update(|s| s.apply(result));
            });
        })
    };

    // Escapeキーで閉じる
    if let Some(window) = web_sys::window() {
        let listener = EventListener::new(&window, "keydown", move |ev| {
            let is_escape = ev
                .dyn_ref::<web_sys::KeyboardEvent>()
                .map(|k| k.key() == "Escape")
                .unwrap_or(false);
            if is_escape && open.get_untracked() {
                on_close.call(());
            }
        });
        on_cleanup(move || drop(listener));
    }

    let selected = Signal::derive(move || file.with(|s| s.selected_path.clone()));
    let project_name = move || {
        project.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default())
    };

    view! {
        <Show when=move || open.get()>
            <div class="workspace-overlay" on:click=move |_| on_close.call(())>
                <div
                    class="workspace-modal"
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <div class="viewer-toolbar">
                        <span class="doc-info">{project_name}</span>
                        <span class="base-folder">{move || base_folder.get().unwrap_or_default()}</span>
                        <button class="close-btn" title="閉じる (Esc)" on:click=move |_| on_close.call(())>
                            "✕"
                        </button>
                    </div>
                    <div class="workspace-body">
                        <FileTreePanel state=tree selected=selected on_select=on_select />
                        <FilePreview state=file />
                    </div>
                </div>
            </div>
        </Show>
    }
}
