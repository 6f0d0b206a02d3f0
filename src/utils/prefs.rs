//! 設定の永続化
//!
//! LocalStorageを直接触らず `PreferenceStore` 経由で読み書きする

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::utils::config::TRAY_COLLAPSED_KEY;
use crate::utils::log_trace::{log_info, log_warn};

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// ブラウザのLocalStorage
pub struct LocalStoragePrefs {
    storage: web_sys::Storage,
}

impl LocalStoragePrefs {
    pub fn open() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStoragePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            log_warn("preferences", &format!("{} を保存できませんでした", key));
        }
    }
}

/// メモリ上の設定（LocalStorageが使えない場合）
#[derive(Default)]
pub struct MemoryPrefs {
    values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// LocalStorageを優先し、使えなければメモリに退避
pub fn open_prefs() -> Rc<dyn PreferenceStore> {
    match LocalStoragePrefs::open() {
        Some(prefs) => Rc::new(prefs),
        None => {
            log_warn("preferences", "LocalStorageが使えないため設定は保存されません");
            Rc::new(MemoryPrefs::default())
        }
    }
}

/// トレイの折りたたみ状態（未保存なら折りたたみ）
pub fn load_tray_collapsed(store: &dyn PreferenceStore) -> bool {
    match store.get(TRAY_COLLAPSED_KEY).as_deref() {
        Some("false") => false,
        Some("true") | None => true,
        Some(other) => {
            log_warn("preferences", &format!("不正な折りたたみ設定値: {}", other));
            true
        }
    }
}

/// 折りたたみ状態を反転して保存
pub fn toggle_tray_collapsed(store: &dyn PreferenceStore, current: bool) -> bool {
    let next = !current;
    store.set(TRAY_COLLAPSED_KEY, if next { "true" } else { "false" });
    log_info("preferences", if next { "トレイを折りたたみ" } else { "トレイを展開" });
    next
}
