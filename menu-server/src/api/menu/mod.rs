//! Menu API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/menu | POST | 创建菜单项 (multipart) |
//! | /api/menu | GET | 列表/搜索 (?search=) |
//! | /api/menu/{id} | DELETE | 删除菜单项及其附件 |
//! | /api/search | GET | 搜索 (?query=，参数必填) |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/menu", get(handler::list).post(handler::create))
        .route("/api/menu/{id}", delete(handler::delete))
        .route("/api/search", get(handler::search))
}
