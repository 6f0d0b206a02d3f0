//! ホストプロセス連携
//!
//! オペレーター一覧とファイル操作はすべてホスト側で行う。
//! コンポーネントは `HostBridge` を通してのみ呼び出す（テストでは差し替え可能）。

use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::BridgeError;
use crate::models::{DirEntry, FileMetadata, Operator};
use crate::utils::log_trace::log_error;

pub trait HostBridge {
    /// operators.list(projectId)
    fn list_operators(&self, project_id: i64) -> LocalBoxFuture<'_, Result<Vec<Operator>, BridgeError>>;

    /// fs.readDir(path)
    fn read_dir<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<Vec<DirEntry>, BridgeError>>;

    /// fs.stat(path)
    fn stat<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<FileMetadata, BridgeError>>;

    /// fs.readFile(path)
    fn read_file<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, BridgeError>>;

    /// fs.readFileBase64(path)
    fn read_file_base64<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, BridgeError>>;
}

/// `window.<global>` に公開されたホストブリッジ
///
/// 形: `{ operators: { list }, fs: { readDir, stat, readFile, readFileBase64 } }`
/// 各関数は値またはPromiseを返す。
pub struct WindowBridge {
    global: String,
}

impl WindowBridge {
    pub fn new(global: impl Into<String>) -> Self {
        Self { global: global.into() }
    }

    /// ブリッジが公開されているか
    pub fn is_available(&self) -> bool {
        web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(&self.global)).ok())
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false)
    }

    fn resolve(&self, group: &str, name: &str) -> Result<(JsValue, js_sys::Function), BridgeError> {
        let qualified = format!("{}.{}.{}", self.global, group, name);
        let window = web_sys::window().ok_or_else(|| BridgeError::Unavailable("window".to_string()))?;

        let root = js_sys::Reflect::get(&window, &JsValue::from_str(&self.global))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .ok_or_else(|| BridgeError::Unavailable(self.global.clone()))?;

        let target = js_sys::Reflect::get(&root, &JsValue::from_str(group))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .ok_or_else(|| BridgeError::Unavailable(qualified.clone()))?;

        let func = js_sys::Reflect::get(&target, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or(BridgeError::Unavailable(qualified))?;

        Ok((target, func))
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        method: &'static str,
        group: &str,
        name: &str,
        arg: JsValue,
    ) -> Result<T, BridgeError> {
        let (this, func) = self.resolve(group, name)?;

        let returned = func.call1(&this, &arg).map_err(|e| BridgeError::Call {
            method,
            message: js_error_message(&e),
        })?;

        // Promiseなら解決を待つ
        let value = match returned.dyn_into::<js_sys::Promise>() {
            Ok(promise) => JsFuture::from(promise).await.map_err(|e| BridgeError::Call {
                method,
                message: js_error_message(&e),
            })?,
            Err(value) => value,
        };

        serde_wasm_bindgen::from_value(value).map_err(|e| {
            let err = BridgeError::Decode {
                method,
                message: e.to_string(),
            };
            log_error("host-bridge", &err.to_string());
            err
        })
    }
}

impl HostBridge for WindowBridge {
    fn list_operators(&self, project_id: i64) -> LocalBoxFuture<'_, Result<Vec<Operator>, BridgeError>> {
        Box::pin(async move {
            self.invoke("operators.list", "operators", "list", JsValue::from_f64(project_id as f64))
                .await
        })
    }

    fn read_dir<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<Vec<DirEntry>, BridgeError>> {
        Box::pin(async move {
            self.invoke("fs.readDir", "fs", "readDir", JsValue::from_str(path)).await
        })
    }

    fn stat<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<FileMetadata, BridgeError>> {
        Box::pin(async move { self.invoke("fs.stat", "fs", "stat", JsValue::from_str(path)).await })
    }

    fn read_file<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, BridgeError>> {
        Box::pin(async move {
            self.invoke("fs.readFile", "fs", "readFile", JsValue::from_str(path)).await
        })
    }

    fn read_file_base64<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, BridgeError>> {
        Box::pin(async move {
            self.invoke("fs.readFileBase64", "fs", "readFileBase64", JsValue::from_str(path))
                .await
        })
    }
}

/// JSの例外からメッセージを取り出す
fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
