use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::services::MenuService;
use crate::storage::{FileStore, LocalFileStore};
use crate::utils::AppResult;

/// 服务器状态 - 持有所有长生命周期句柄的共享引用
///
/// ServerState 在启动时创建一次，之后按请求克隆 (Arc 浅拷贝)。
/// 请求之间没有其它共享可变状态。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | files | Arc<dyn FileStore> | 上传文件存储 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 文件存储 (本地文件系统，可替换实现)
    pub files: Arc<dyn FileStore>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: Surreal<Db>, files: Arc<dyn FileStore>) -> Self {
        Self { config, db, files }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/, uploads/)
    /// 2. 嵌入式数据库 (work_dir/database)
    /// 3. 文件存储 (work_dir/uploads)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| crate::AppError::internal(format!("Failed to create work dir: {}", e)))?;

        let db = DbService::new(&config.database_dir()).await?.db;

        let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(config.uploads_dir()));

        Ok(Self::new(config.clone(), db, files))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 构造菜单服务 (组合数据库与文件存储)
    pub fn menu_service(&self) -> MenuService {
        MenuService::new(self.db.clone(), self.files.clone())
    }
}
