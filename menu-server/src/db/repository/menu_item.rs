//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_key};
use crate::db::models::{MenuItem, MenuItemCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items ordered by creation time
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu items whose name contains the query (case-insensitive)
    ///
    /// 空查询等价于 "匹配所有"
    pub async fn find_by_name_substring(&self, query: &str) -> RepoResult<Vec<MenuItem>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.find_all().await;
        }

        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu_item \
                 WHERE string::contains(string::lowercase(name), $q) \
                 ORDER BY created_at",
            )
            .bind(("q", needle))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let key = parse_record_key(TABLE, id)?;
        let item: Option<MenuItem> = self.base.db().select((TABLE, key)).await?;
        Ok(item)
    }

    /// Create a new menu item — id assigned by the store
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            name: data.name,
            price: data.price,
            description: data.description,
            image: data.image,
            model: data.model,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Delete a menu item and return the deleted record
    ///
    /// 调用方需要被删记录里的文件引用来做后续清理
    pub async fn delete_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let key = parse_record_key(TABLE, id)?;
        let deleted: Option<MenuItem> = self.base.db().delete((TABLE, key)).await?;
        Ok(deleted)
    }
}
