//! 選択ファイルの読み込み

use crate::error::WorkspaceError;
use crate::models::{
    detect_content_kind, file_extension, image_media_type, language_for_path, ContentKind,
    FileContent,
};
use crate::utils::data_uri;
use crate::utils::host::HostBridge;
use crate::utils::log_trace::log_error_with_data;

/// 存在確認のあと、画像ならBase64、それ以外はテキストで読み込む
pub async fn load_file_content(
    bridge: &dyn HostBridge,
    path: &str,
) -> Result<FileContent, WorkspaceError> {
    let result = read_content(bridge, path).await;
    if let Err(e) = &result {
        log_error_with_data(
            "workspace-file",
            &format!("ファイルを読み込めません: {}", e),
            serde_json::json!({ "path": path }),
        );
    }
    result
}

async fn read_content(bridge: &dyn HostBridge, path: &str) -> Result<FileContent, WorkspaceError> {
    bridge.stat(path).await?;

    match detect_content_kind(path) {
        ContentKind::Image => {
            let ext = file_extension(path).unwrap_or_default();
            let encoded = bridge.read_file_base64(path).await?;
            Ok(FileContent::Image {
                data_uri: data_uri(&image_media_type(&ext), &encoded),
            })
        }
        ContentKind::Text => {
            let text = bridge.read_file(path).await?;
            Ok(FileContent::Text {
                text,
                language: language_for_path(path),
            })
        }
    }
}
