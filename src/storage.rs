//! 媒体目录管理模块
//!
//! # 设计思路
//!
//! 统一管理转换结果的存放目录，支持用户自定义目录，
//! 并在目录不存在时自动创建。
//!
//! # 实现思路
//!
//! - 优先使用配置中的自定义目录。
//! - 未设置时回退到 `<数据目录>/paste-webp/media`。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::PathBuf;

use crate::error::PasteError;

const APP_DIR_NAME: &str = "paste-webp";

/// 获取媒体目录
///
/// # 参数
/// * `custom_dir` - 用户自定义目录（可选，空字符串视为未设置）
///
/// # 返回
/// - `Ok(PathBuf)`：可用的媒体目录
/// - `Err(PasteError::Config)`：无法确定默认数据目录
/// - `Err(PasteError::Io)`：无法创建目录
pub fn media_dir(custom_dir: Option<&str>) -> Result<PathBuf, PasteError> {
    let dir = match custom_dir.map(str::trim).filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_dir()
            .ok_or_else(|| PasteError::Config("无法获取系统数据目录".to_string()))?
            .join(APP_DIR_NAME)
            .join("media"),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        log::info!("📁 已创建媒体目录: {}", dir.display());
    }
    Ok(dir)
}

/// 随附 cwebp 所在目录：可执行文件旁的 `support` 子目录。
pub fn default_support_dir() -> Result<PathBuf, PasteError> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| PasteError::Config("无法确定程序所在目录".to_string()))?;
    Ok(dir.join("support"))
}
