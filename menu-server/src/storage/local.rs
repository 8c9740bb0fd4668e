//! Local Filesystem File Store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::FileStore;
use crate::utils::{AppError, AppResult};

/// 引用前缀，与静态文件路由保持一致
const PUBLIC_PREFIX: &str = "/uploads";

/// File store backed by a single directory on the local filesystem
///
/// 除本组件外没有任何代码直接写这个目录。
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Generate a collision-free file name: uuid token + original extension
    fn generate_name(original_name: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let ext: String = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                e.chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
            })
            .unwrap_or_default();

        if ext.is_empty() {
            token
        } else {
            format!("{}.{}", token, ext)
        }
    }

    /// Resolve a reference back to a file name inside the root
    ///
    /// 拒绝任何会逃出存储根目录的引用
    fn resolve(&self, reference: &str) -> AppResult<PathBuf> {
        let name = reference
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(reference);

        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::storage(format!(
                "Invalid file reference: '{}'",
                reference
            )));
        }

        Ok(self.root.join(name))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create uploads dir: {}", e)))?;

        let file_name = Self::generate_name(original_name);
        let path = self.root.join(&file_name);

        // create_new: 同名文件已存在时失败而不是覆盖
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create file: {}", e)))?;

        file.write_all(bytes)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write file: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| AppError::storage(format!("Failed to flush file: {}", e)))?;

        tracing::info!(
            original_name = %original_name,
            stored_as = %file_name,
            size = bytes.len(),
            "File stored"
        );

        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }

    async fn delete(&self, reference: &str) -> AppResult<bool> {
        let path = self.resolve(reference)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(reference = %reference, "File already absent, nothing to delete");
                Ok(false)
            }
            Err(e) => Err(AppError::storage(format!(
                "Failed to delete '{}': {}",
                reference, e
            ))),
        }
    }
}
