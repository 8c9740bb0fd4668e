//! Menu Service
//!
//! 组合 [`MenuItemRepository`] 与 [`FileStore`] 的业务层。
//! 只有这里知道 "删除记录意味着删除它的附件文件"。

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{MenuItem, MenuItemCreate};
use crate::db::repository::MenuItemRepository;
use crate::storage::FileStore;
use crate::utils::{AppError, AppResult};

/// 一个已上传的 multipart 文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// "add item" 请求的强类型输入
///
/// 所有字段在 HTTP 层原样收集，校验统一发生在服务层边界。
#[derive(Debug, Default)]
pub struct CreateMenuItemInput {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image: Option<UploadedFile>,
    pub model: Option<UploadedFile>,
}

#[derive(Clone)]
pub struct MenuService {
    repo: MenuItemRepository,
    files: Arc<dyn FileStore>,
}

impl MenuService {
    pub fn new(db: Surreal<Db>, files: Arc<dyn FileStore>) -> Self {
        Self {
            repo: MenuItemRepository::new(db),
            files,
        }
    }

    /// Create a menu item, storing uploaded attachments first
    ///
    /// 流程：
    /// 1. 校验必填字段 (失败时无任何副作用)
    /// 2. 依次存储 image、model 附件；存储失败则中止，不创建记录。
    ///    已存储的前一个文件不回滚 (非原子行为，与错误模型一致)
    /// 3. 持久化记录并返回
    pub async fn add_item(&self, input: CreateMenuItemInput) -> AppResult<MenuItem> {
        let name = required_text(input.name, "name")?;
        let description = required_text(input.description, "description")?;
        let price_raw = required_text(input.price, "price")?;
        let price = Decimal::from_str(price_raw.trim())
            .map_err(|_| AppError::validation(format!("price must be a number, got '{}'", price_raw)))?;

        let image = match &input.image {
            Some(file) => self.files.store(&file.bytes, &file.file_name).await?,
            None => String::new(),
        };
        let model = match &input.model {
            Some(file) => self.files.store(&file.bytes, &file.file_name).await?,
            None => String::new(),
        };

        let item = self
            .repo
            .create(MenuItemCreate {
                name,
                price,
                description,
                image,
                model,
            })
            .await?;

        tracing::info!(
            id = %item.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            name = %item.name,
            "Menu item created"
        );

        Ok(item)
    }

    /// List or search menu items
    ///
    /// `None` / 空查询返回所有记录
    pub async fn search(&self, query: Option<&str>) -> AppResult<Vec<MenuItem>> {
        let items = self.repo.find_by_name_substring(query.unwrap_or("")).await?;
        Ok(items)
    }

    /// Find a single menu item
    pub async fn find_item(&self, id: &str) -> AppResult<MenuItem> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))
    }

    /// Delete a menu item and clean up its stored files
    ///
    /// 记录删除是权威操作：文件清理失败 (缺失除外) 只记日志，
    /// 不会回滚已完成的记录删除。
    pub async fn delete_item(&self, id: &str) -> AppResult<MenuItem> {
        let deleted = self
            .repo
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;

        for reference in [&deleted.image, &deleted.model] {
            if reference.is_empty() {
                continue;
            }
            if let Err(e) = self.files.delete(reference).await {
                tracing::warn!(
                    reference = %reference,
                    error = %e,
                    "Failed to delete attachment, record already removed"
                );
            }
        }

        tracing::info!(id = %id, name = %deleted.name, "Menu item deleted");

        Ok(deleted)
    }
}

/// 必填文本字段：存在且去除空白后非空
fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::validation(format!("{} is required", field))),
    }
}
