//! Menu API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::MenuItem;
use crate::services::{CreateMenuItemInput, UploadedFile};
use crate::utils::{AppError, AppResult};

/// POST /api/menu 成功响应
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub message: String,
    pub menu: MenuItem,
}

/// DELETE /api/menu/{id} 成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_item: MenuItem,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// POST /api/menu - 创建菜单项 (multipart form)
///
/// 文本字段: name, price, description；可选文件字段: image, model。
/// 字段在这里原样收集，所有校验在 MenuService 边界进行。
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<CreateResponse>)> {
    let mut input = CreateMenuItemInput::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(|s| s.to_string()) else {
            continue;
        };

        match field_name.as_str() {
            "name" => input.name = Some(field.text().await?),
            "price" => input.price = Some(field.text().await?),
            "description" => input.description = Some(field.text().await?),
            "image" | "model" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                // 空文件字段视为未上传
                if bytes.is_empty() {
                    continue;
                }
                let file = UploadedFile { file_name, bytes };
                if field_name == "image" {
                    input.image = Some(file);
                } else {
                    input.model = Some(file);
                }
            }
            _ => {}
        }
    }

    let item = state.menu_service().add_item(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            message: "Menu item created successfully".to_string(),
            menu: item,
        }),
    ))
}

/// GET /api/menu?search= - 列表/搜索，search 为空返回所有
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.menu_service().search(params.search.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/search?query= - 搜索，query 参数必填
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let query = params
        .query
        .ok_or_else(|| AppError::validation("query parameter is required"))?;

    let items = state.menu_service().search(Some(&query)).await?;
    Ok(Json(items))
}

/// DELETE /api/menu/{id} - 删除菜单项并清理附件
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state.menu_service().delete_item(&id).await?;

    Ok(Json(DeleteResponse {
        message: "Menu item deleted successfully".to_string(),
        deleted_item: deleted,
    }))
}
