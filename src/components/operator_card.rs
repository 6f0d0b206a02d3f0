//! オペレーターカードコンポーネント

use leptos::*;

use crate::models::{AvatarKind, Operator, OperatorDragPayload};
use crate::utils::config::OPERATOR_DRAG_MIME;
use crate::utils::log_trace::{log_error, log_info};

/// カードのアクセント色（未設定ならテーマ既定色）
fn accent_style(color: &str) -> String {
    if color.trim().is_empty() {
        "--operator-color: var(--accent-default)".to_string()
    } else {
        format!("--operator-color: {}", color.trim())
    }
}

/// オペレーターカード
/// ドラッグ開始時に最小限の記述子を独自メディアタイプで転送データに載せる
#[component]
pub fn OperatorCard(operator: Operator) -> impl IntoView {
    let (dragging, set_dragging) = create_signal(false);
    let payload = OperatorDragPayload::from(&operator);

    let on_drag_start = move |ev: web_sys::DragEvent| {
        let Some(transfer) = ev.data_transfer() else {
            return;
        };
        match payload.to_transfer_json() {
            Ok(json) => {
                if transfer.set_data(OPERATOR_DRAG_MIME, &json).is_err() {
                    log_error("operator-tray", "ドラッグデータを設定できませんでした");
                    return;
                }
                transfer.set_effect_allowed("move");
                set_dragging.set(true);
                log_info("operator-tray", &format!("ドラッグ開始: {}", payload.name));
            }
            Err(e) => log_error("operator-tray", &format!("ドラッグデータの変換に失敗: {}", e)),
        }
    };

    // ドロップの成否にかかわらず見た目の状態だけ戻す
    let on_drag_end = move |_: web_sys::DragEvent| {
        set_dragging.set(false);
    };

    let avatar = match operator.avatar_kind() {
        AvatarKind::Image(src) => view! {
            <img class="operator-avatar image" src=src alt=operator.name.clone() draggable="false" />
        }
        .into_view(),
        AvatarKind::Glyph(glyph) => view! {
            <span class="operator-avatar glyph">{glyph}</span>
        }
        .into_view(),
    };

    view! {
        <div
            class=move || format!("operator-card {}", if dragging.get() { "dragging" } else { "" })
            style=accent_style(&operator.color)
            draggable="true"
            title=operator.description.clone().unwrap_or_default()
            on:dragstart=on_drag_start
            on:dragend=on_drag_end
        >
            {avatar}
            <div class="operator-info">
                <span class="operator-name">{operator.name.clone()}</span>
                {(!operator.role.is_empty()).then(|| view! {
                    <span class="operator-role">{operator.role.clone()}</span>
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_style_falls_back_to_theme_color() {
        assert_eq!(accent_style(""), "--operator-color: var(--accent-default)");
        assert_eq!(accent_style(" #fff "), "--operator-color: #fff");
    }
}
