//! オペレータートレイコンポーネント
//!
//! プロジェクトのオペレーター一覧をドラッグ可能なカードで表示する。
//! 折りたたみ状態はプロジェクトに関係なく保存される。

use leptos::*;

use super::OperatorCard;
use crate::error::BridgeError;
use crate::models::{Operator, OperatorListState, TrayMode};
use crate::utils::host::HostBridge;
use crate::utils::log_trace::{log_error, log_info};
use crate::utils::prefs::{load_tray_collapsed, toggle_tray_collapsed};
use crate::utils::request_seq::RequestSeq;
use crate::AppContext;

/// プロジェクト未選択なら呼び出さずに空一覧
pub async fn fetch_operators(
    bridge: &dyn HostBridge,
    project_id: Option<i64>,
) -> Result<Vec<Operator>, BridgeError> {
    match project_id {
        Some(id) => bridge.list_operators(id).await,
        None => Ok(Vec::new()),
    }
}

#[component]
pub fn OperatorTray(#[prop(into)] project_id: Signal<Option<i64>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let (state, set_state) = create_signal(OperatorListState::default());
    let (collapsed, set_collapsed) = create_signal(load_tray_collapsed(ctx.prefs.as_ref()));

    // プロジェクトが変わるたびに取得（初回マウント含む）
    {
        let bridge = ctx.bridge.clone();
        let seq = RequestSeq::new();
        create_effect(move |_| {
            let project_id = project_id.get();
            let ticket = seq.issue();
            let bridge = bridge.clone();
            let seq = seq.clone();
            set_state.update(OperatorListState::begin);

            spawn_local(async move {
                let result = fetch_operators(bridge.as_ref(), project_id).await;
                // 後から来た古い応答は捨てる
                if !seq.is_latest(ticket) {
                    return;
                }
                match &result {
                    Ok(operators) => log_info(
                        "operator-tray",
                        &format!("オペレーター {}件を取得 (project: {:?})", operators.len(), project_id),
                    ),
                    Err(e) => log_error("operator-tray", &format!("オペレーター取得失敗: {}", e)),
                }
                set_state.update(|s| s.apply(result));
            });
        });
    }

    let prefs = ctx.prefs.clone();
    let on_toggle = move |_: web_sys::MouseEvent| {
        let next = toggle_tray_collapsed(prefs.as_ref(), collapsed.get_untracked());
        set_collapsed.set(next);
    };

    view! {
        <aside class=move || format!("operator-tray {}", if collapsed.get() { "collapsed" } else { "expanded" })>
            <button class="tray-header" on:click=on_toggle>
                <span class="tray-title">"オペレーター"</span>
                <span class="tray-count">{move || state.with(|s| s.operators.len())}</span>
                <span class="tray-chevron">{move || if collapsed.get() { "▸" } else { "▾" }}</span>
            </button>

            {move || (!collapsed.get()).then(|| view! {
                <div class="tray-body">
                    {move || match state.with(OperatorListState::mode) {
                        TrayMode::Loading => view! {
                            <div class="tray-loading">
                                <span class="spinner"></span>
                                "読込中..."
                            </div>
                        }.into_view(),
                        TrayMode::Empty => view! {
                            <div class="tray-empty">
                                <p>"オペレーターがいません"</p>
                                <p class="hint">"プロジェクト設定からオペレーターを作成してください"</p>
                            </div>
                        }.into_view(),
                        TrayMode::Populated => view! {
                            <div class="operator-grid">
                                {state.with(|s| s.operators.clone()).into_iter().map(|op| view! {
                                    <OperatorCard operator=op />
                                }).collect_view()}
                            </div>
                        }.into_view(),
                    }}
                </div>
            })}
        </aside>
    }
}
