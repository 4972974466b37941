//! LocalStorage 封装模块
//!
//! `StorageAdapter` 抽象键值存储，生产环境由 `gloo-storage` 的 LocalStorage 实现，
//! 测试环境使用内存实现 `MemoryStorage`。结构化值以 JSON 形式存取，
//! `*_raw` 方法直接读写字符串。

use gloo_storage::Storage as _;
use gloo_storage::errors::StorageError as GlooStorageError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[cfg(test)]
use std::{cell::RefCell, collections::HashMap, rc::Rc};

#[derive(Debug, Error)]
pub enum StorageError {
    /// 键存在但内容无法解析
    #[error("corrupt value under `{key}`: {reason}")]
    Corrupt { key: String, reason: String },
    /// 浏览器拒绝访问存储（隐私模式、配额等）
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// =========================================================
// 抽象接口定义
// =========================================================

pub trait StorageAdapter {
    /// 读取并反序列化；键不存在时返回 `Ok(None)`
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;
    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;
    /// 按原样读取字符串，不做 JSON 解码
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// 删除键；键不存在时无操作
    fn delete(&self, key: &str);
}

// =========================================================
// 生产环境实现 (LocalStorage)
// =========================================================

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl StorageAdapter for LocalStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match gloo_storage::LocalStorage::get::<T>(key) {
            Ok(value) => Ok(Some(value)),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(GlooStorageError::SerdeError(e)) => Err(StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        gloo_storage::LocalStorage::set(key, value)
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn delete(&self, key: &str) {
        gloo_storage::LocalStorage::delete(key);
    }
}

// =========================================================
// 测试环境实现 (MemoryStorage)
// =========================================================

/// 内存存储；克隆体共享同一份数据，模拟同一标签页内的 LocalStorage
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStorage {
    // 存储序列化后的 JSON 字符串，模拟真实存储的序列化边界
    map: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入原始字符串（用于构造损坏数据）
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.map
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.map.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }
}

#[cfg(test)]
impl StorageAdapter for MemoryStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let map = self.map.borrow();
        match map.get(key) {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| StorageError::Corrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        self.map.borrow_mut().insert(key.to_string(), raw);
        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert_raw(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }
}
