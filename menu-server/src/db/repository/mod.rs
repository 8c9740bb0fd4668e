//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod menu_item;

// Re-exports
pub use menu_item::MenuItemRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 客户端拿到的 id 是 "menu_item:<key>" 字符串，路径参数既接受完整格式
// 也接受裸 key。格式非法 (空 key、非字母数字、表名不匹配) 属于客户端
// 错误 (Validation)，与 "不存在" (NotFound) 严格区分。

/// Parse and validate a client-supplied record id
///
/// Accepts "table:key" or a bare key. Returns the bare key.
pub fn parse_record_key(table: &str, id: &str) -> RepoResult<String> {
    let key = match id.split_once(':') {
        Some((tb, key)) => {
            if tb != table {
                return Err(RepoError::Validation(format!(
                    "Invalid id '{}': expected table '{}'",
                    id, table
                )));
            }
            key
        }
        None => id,
    };

    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(RepoError::Validation(format!("Invalid id format: '{}'", id)));
    }

    Ok(key.to_string())
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_full_and_bare_ids() {
        assert_eq!(parse_record_key("menu_item", "menu_item:abc123").unwrap(), "abc123");
        assert_eq!(parse_record_key("menu_item", "abc123").unwrap(), "abc123");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert!(parse_record_key("menu_item", "").is_err());
        assert!(parse_record_key("menu_item", "menu_item:").is_err());
        assert!(parse_record_key("menu_item", "product:abc123").is_err());
        assert!(parse_record_key("menu_item", "abc 123").is_err());
        assert!(parse_record_key("menu_item", "abc/../etc").is_err());
    }
}
