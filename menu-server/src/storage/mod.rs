//! File Storage
//!
//! 上传附件的持久化。[`MenuService`](crate::services::MenuService) 只依赖
//! [`FileStore`] 契约，本地文件系统实现可替换为任意 blob 存储后端。
//!
//! # 引用格式
//!
//! `store` 返回 `/uploads/<uuid>.<ext>` 形式的引用，既是记录里保存的
//! 值，也是静态文件服务下可直接访问的 URL 路径。

mod local;

pub use local::LocalFileStore;

use async_trait::async_trait;

use crate::utils::AppResult;

/// 上传文件存储契约
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist the bytes under a collision-free name derived from the
    /// original file name's extension; returns the reference.
    ///
    /// Must never overwrite an existing file.
    async fn store(&self, bytes: &[u8], original_name: &str) -> AppResult<String>;

    /// Remove the file for a previously returned reference.
    ///
    /// Returns `false` when the file was already absent — 记录可能被
    /// 重复删除，文件缺失按良性空操作处理，不是错误。
    async fn delete(&self, reference: &str) -> AppResult<bool>;
}
