//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type MenuItemId = Thing;

/// Menu item record
///
/// `image`/`model` 为空字符串表示没有附件，否则是 `/uploads/<file>`
/// 形式的引用，可直接作为下载 URL 使用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Record id，由数据库在创建时分配；对外序列化为 "menu_item:<key>"
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<MenuItemId>,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub model: String,
    /// 创建时间 (epoch 毫秒)，用于稳定的列表顺序
    #[serde(default)]
    pub created_at: i64,
}

/// Create DTO — 字段已通过服务层校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub model: String,
}
