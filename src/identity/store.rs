//! 身份存储
//!
//! 按键名读写带过期时间的字符串，语义与浏览器 Cookie 相同：过期条目视为不存在。

use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// 持久化身份存储
#[cfg_attr(test, mockall::automock)]
pub trait IdentityStore: Send + Sync {
    /// 读取未过期的值
    fn get(&self, key: &str) -> Option<String>;

    /// 写入值，`ttl_days` 天后过期
    fn set(&self, key: &str, value: &str, ttl_days: u32) -> Result<()>;
}

/// 带过期时间的存储条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredValue {
    /// 过期时间超出可表示范围时返回 [`AppError::Store`]
    pub fn new(value: &str, ttl_days: u32, now: DateTime<Utc>) -> Result<Self> {
        let expires_at = Duration::try_days(i64::from(ttl_days))
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::Store(format!("ttl of {} days is out of range", ttl_days)))?;

        Ok(Self {
            value: value.to_string(),
            expires_at,
        })
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// 进程内存储
#[derive(Default)]
pub struct MemoryIdentityStore {
    entries: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已存在的值初始化
    pub fn with_value(key: &str, value: &str, ttl_days: u32) -> Result<Self> {
        let store = Self::new();
        store.set(key, value, ttl_days)?;
        Ok(store)
    }

    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries.read().values().filter(|v| v.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = Utc::now();
        self.entries
            .read()
            .get(key)
            .filter(|v| v.is_live(now))
            .map(|v| v.value.clone())
    }

    fn set(&self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        let entry = StoredValue::new(value, ttl_days, Utc::now())?;
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }
}

/// Cookie 文件式存储
///
/// 整个文件是一个 JSON 对象，键为名称，值为 [`StoredValue`]。值在写入时做百分号编码，
/// 读取时解码。文件缺失、损坏或无法读取时视为空，下一次写入会覆盖它。
pub struct FileIdentityStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileIdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, StoredValue> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "identity store unreadable");
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "identity store corrupt, ignoring");
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, StoredValue>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AppError::Store(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::Store(format!("{}: {}", self.path.display(), e)))
    }
}

impl IdentityStore for FileIdentityStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = Utc::now();
        let entry = self.read_entries().remove(key)?;
        if !entry.is_live(now) {
            debug!(key, "stored identity expired");
            return None;
        }

        match urlencoding::decode(&entry.value) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(e) => {
                warn!(key, error = %e, "stored identity is not valid UTF-8");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        let _guard = self.write_lock.lock();
        let now = Utc::now();

        let entry = StoredValue::new(&urlencoding::encode(value), ttl_days, now)?;

        let mut entries = self.read_entries();
        entries.retain(|_, v| v.is_live(now));
        entries.insert(key.to_string(), entry);

        self.write_entries(&entries)
    }
}
