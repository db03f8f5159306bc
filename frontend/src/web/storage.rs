//! LocalStorage 封装
//!
//! 令牌以原始字符串保存（不做 JSON 编码），与其他页面/工具直接读写
//! `localStorage` 的结果一致。

use gloo_storage::{LocalStorage, Storage};

use crate::transport::KeyValueStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        LocalStorage::raw().remove_item(key).is_ok()
    }
}
