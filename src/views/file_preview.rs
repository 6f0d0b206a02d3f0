//! ファイルプレビュー（メインペイン）

use leptos::*;

use crate::models::{file_name, FileContent, FileViewState, PaneMode};

/// 行番号の列（末尾の改行は行として数えない）
fn line_gutter(text: &str) -> String {
    let count = text.lines().count().max(1);
    (1..=count)
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// 読み取り専用のテキストビューア
/// 言語タグは外部のハイライタ用に data-language に載せる
#[component]
pub fn CodeViewer(text: String, language: &'static str) -> impl IntoView {
    let gutter = line_gutter(&text);

    view! {
        <div class="code-viewer" data-language=language>
            <pre class="code-gutter" aria-hidden="true">{gutter}</pre>
            <pre class="code-text"><code class=format!("language-{}", language)>{text}</code></pre>
        </div>
    }
}

/// メインペイン: 未選択 / 画像 / テキスト（読込中は上にスピナーを重ねる）
#[component]
pub fn FilePreview(state: ReadSignal<FileViewState>) -> impl IntoView {
    view! {
        <div class="workspace-main">
            {move || state.with(|s| s.selected_path.clone()).map(|path| view! {
                <div class="file-path-bar" title=path.clone()>{path}</div>
            })}

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <p class="status error">{e}</p>
            })}

            <div class="file-content">
                {move || match state.with(FileViewState::mode) {
                    PaneMode::NothingSelected => view! {
                        <div class="nothing-selected">
                            <p>"ファイルを選択してください"</p>
                        </div>
                    }.into_view(),
                    PaneMode::ImagePreview => {
                        let (uri, alt) = state.with(|s| {
                            let uri = match &s.content {
                                Some(FileContent::Image { data_uri }) => data_uri.clone(),
                                _ => String::new(),
                            };
                            let alt = s.selected_path.as_deref().map(file_name).unwrap_or_default().to_string();
                            (uri, alt)
                        });
                        view! {
                            <div class="image-preview">
                                <img src=uri alt=alt />
                            </div>
                        }.into_view()
                    }
                    PaneMode::TextViewer => {
                        let (text, language) = state.with(|s| match &s.content {
                            Some(FileContent::Text { text, language }) => (text.clone(), *language),
                            _ => (String::new(), "text"),
                        });
                        view! { <CodeViewer text=text language=language /> }.into_view()
                    }
                }}
            </div>

            {move || state.with(|s| s.loading).then(|| view! {
                <div class="loading-overlay">
                    <span class="spinner"></span>
                </div>
            })}
        </div>
    }
}
