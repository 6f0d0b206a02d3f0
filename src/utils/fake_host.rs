//! テスト用のメモリ上ホストブリッジ

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use base64::Engine;
use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::error::BridgeError;
use crate::models::{DirEntry, FileMetadata, Operator};
use crate::utils::host::HostBridge;

#[derive(Default)]
pub struct FakeHost {
    dirs: HashMap<String, Vec<DirEntry>>,
    failing: HashSet<String>,
    texts: HashMap<String, String>,
    binaries: HashMap<String, Vec<u8>>,
    operators: HashMap<i64, Vec<Operator>>,
    calls: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn join(parent: &str, name: &str) -> String {
        format!("{}/{}", parent.trim_end_matches('/'), name)
    }

    fn push_entry(&mut self, parent: &str, name: &str, is_directory: bool) -> String {
        let path = Self::join(parent, name);
        self.dirs.entry(parent.to_string()).or_default().push(DirEntry {
            name: name.to_string(),
            path: path.clone(),
            is_directory,
        });
        if is_directory {
            self.dirs.entry(path.clone()).or_default();
        }
        path
    }

    /// 空のディレクトリを登録
    pub fn with_root(mut self, path: &str) -> Self {
        self.dirs.entry(path.to_string()).or_default();
        self
    }

    pub fn with_dir(mut self, parent: &str, name: &str) -> Self {
        self.push_entry(parent, name, true);
        self
    }

    pub fn with_text(mut self, parent: &str, name: &str, text: &str) -> Self {
        let path = self.push_entry(parent, name, false);
        self.texts.insert(path, text.to_string());
        self
    }

    pub fn with_binary(mut self, parent: &str, name: &str, bytes: &[u8]) -> Self {
        let path = self.push_entry(parent, name, false);
        self.binaries.insert(path, bytes.to_vec());
        self
    }

    /// readDir が失敗するディレクトリ
    pub fn failing_dir(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn with_operators(mut self, project_id: i64, operators: Vec<Operator>) -> Self {
        self.operators.insert(project_id, operators);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn not_found(method: &'static str, path: &str) -> BridgeError {
        BridgeError::Call {
            method,
            message: format!("ENOENT: {}", path),
        }
    }
}

impl HostBridge for FakeHost {
    fn list_operators(&self, project_id: i64) -> LocalBoxFuture<'_, Result<Vec<Operator>, BridgeError>> {
        self.record(format!("operators.list {}", project_id));
        let result = self.operators.get(&project_id).cloned().ok_or(BridgeError::Call {
            method: "operators.list",
            message: format!("unknown project {}", project_id),
        });
        future::ready(result).boxed_local()
    }

    fn read_dir<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<Vec<DirEntry>, BridgeError>> {
        self.record(format!("fs.readDir {}", path));
        let result = if self.failing.contains(path) {
            Err(BridgeError::Call {
                method: "fs.readDir",
                message: format!("EACCES: {}", path),
            })
        } else {
            self.dirs
                .get(path)
                .cloned()
                .ok_or_else(|| Self::not_found("fs.readDir", path))
        };
        future::ready(result).boxed_local()
    }

    fn stat<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<FileMetadata, BridgeError>> {
        self.record(format!("fs.stat {}", path));
        let result = if let Some(text) = self.texts.get(path) {
            Ok(FileMetadata {
                size: Some(text.len() as u64),
                is_directory: false,
            })
        } else if let Some(bytes) = self.binaries.get(path) {
            Ok(FileMetadata {
                size: Some(bytes.len() as u64),
                is_directory: false,
            })
        } else if self.dirs.contains_key(path) {
            Ok(FileMetadata {
                size: None,
                is_directory: true,
            })
        } else {
            Err(Self::not_found("fs.stat", path))
        };
        future::ready(result).boxed_local()
    }

    fn read_file<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, BridgeError>> {
        self.record(format!("fs.readFile {}", path));
        let result = self
            .texts
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found("fs.readFile", path));
        future::ready(result).boxed_local()
    }

    fn read_file_base64<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, BridgeError>> {
        self.record(format!("fs.readFileBase64 {}", path));
        let result = self
            .binaries
            .get(path)
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
            .ok_or_else(|| Self::not_found("fs.readFileBase64", path));
        future::ready(result).boxed_local()
    }
}
