//! # 临时文件守卫
//!
//! `TempFile` 采用 RAII 模式：构造时在系统临时目录创建唯一文件，
//! `Drop` 时删除。无论转换成功、失败还是被取消，离开作用域都会清理。
//! 文件句柄在创建后立即关闭，转换期间不持有描述符。

use std::path::Path;

use tempfile::TempPath;

use crate::error::PasteError;

/// 作用域临时文件。
pub struct TempFile {
    path: TempPath,
}

impl TempFile {
    /// 创建带 `.png` 后缀的临时文件。
    pub fn new() -> Result<Self, PasteError> {
        Self::with_suffix(".png")
    }

    pub fn with_suffix(suffix: &str) -> Result<Self, PasteError> {
        let file = tempfile::Builder::new()
            .prefix("paste_webp_")
            .suffix(suffix)
            .tempfile()?;
        let path = file.into_temp_path();
        log::debug!("📄 创建临时文件: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for TempFile {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}
