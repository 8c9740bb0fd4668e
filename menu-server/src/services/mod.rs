//! 业务服务模块
//!
//! - [`MenuService`] - 菜单项生命周期编排 (唯一持有业务规则的组件)

pub mod menu;

pub use menu::{CreateMenuItemInput, MenuService, UploadedFile};
