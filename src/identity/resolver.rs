//! 身份解析
//!
//! 顺序：已存储的身份 → 交互式输入（成功则持久化） → 匿名身份。
//! 解析总是成功，返回非空字符串。

use tracing::{debug, info, warn};

use crate::config::IdentityConfig;
use crate::identity::prompt::Prompt;
use crate::identity::store::IdentityStore;

/// 匿名身份
pub const ANONYMOUS: &str = "anonymous";

/// 身份解析器
pub struct IdentityResolver {
    store: Box<dyn IdentityStore>,
    prompt: Box<dyn Prompt>,
    key: String,
    ttl_days: u32,
    message: String,
}

impl IdentityResolver {
    pub fn new(store: Box<dyn IdentityStore>, prompt: Box<dyn Prompt>, config: &IdentityConfig) -> Self {
        Self {
            store,
            prompt,
            key: config.cookie_name.clone(),
            ttl_days: config.ttl_days,
            message: config.prompt_message.clone(),
        }
    }

    /// 解析当前用户身份
    ///
    /// 如果需要持久化，写入在返回前完成；写入失败只记录日志。
    pub fn resolve(&self) -> String {
        let stored = self
            .store
            .get(&self.key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if let Some(stored) = stored {
            debug!(key = %self.key, "identity found in store");
            return stored;
        }

        let answer = self
            .prompt
            .prompt(&self.message)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        match answer {
            Some(identity) => {
                match self.store.set(&self.key, &identity, self.ttl_days) {
                    Ok(()) => info!(ttl_days = self.ttl_days, "identity persisted"),
                    Err(e) => warn!(key = %self.key, error = %e, "failed to persist identity"),
                }
                identity
            }
            None => {
                info!("no identity provided, continuing as {}", ANONYMOUS);
                ANONYMOUS.to_string()
            }
        }
    }
}
