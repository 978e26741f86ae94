//! 身份模块
//!
//! 提供持久化身份存储、交互式输入以及两者组合而成的身份解析器。

pub mod prompt;
pub mod resolver;
pub mod store;

pub use prompt::{NonInteractivePrompt, Prompt, StdinPrompt, create_prompt};
pub use resolver::{ANONYMOUS, IdentityResolver};
pub use store::{FileIdentityStore, IdentityStore, MemoryIdentityStore, StoredValue};

use crate::config::IdentityConfig;

/// 根据配置创建身份解析器：文件存储 + 终端输入
pub fn create_identity_resolver(config: &IdentityConfig) -> IdentityResolver {
    let store = FileIdentityStore::new(config.store_path.clone());
    let prompt = create_prompt(config.interactive);
    IdentityResolver::new(Box::new(store), prompt, config)
}
