//! # 配置模块
//!
//! ## 设计思路
//!
//! 所有“可调策略”集中在 `PasteConfig`：编码质量、目标尺寸、额外 cwebp 参数、
//! 对话框触发策略以及菜单/按钮/快捷键开关。
//! 配置在启动时加载一次，以普通数据的形式注入 `ImageConverter`，转换过程中只读。
//!
//! ## 实现思路
//!
//! - `Default` 提供开箱可用的配置。
//! - 使用 `#[serde(default)]`，配置文件缺失的键回退到默认值。
//! - `load` 读取 JSON 文件；文件不存在时直接返回默认配置。
//! - `validate` 在启动时拒绝明显错误的值，避免运行到编码器才失败。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PasteError;
use crate::webp::ShowOptions;

/// 粘贴转换配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasteConfig {
    /// cwebp `-q` 参数（0~100）。
    pub image_quality: u8,
    /// 目标宽度（像素），0 交给 cwebp 按比例处理。
    pub image_width: u32,
    /// 目标高度（像素），0 交给 cwebp 按比例处理。
    pub image_height: u32,
    /// 原图小于目标尺寸时跳过缩放。
    pub avoid_upscaling: bool,
    /// 追加在 `-q` 之后的额外 cwebp 参数，按顺序透传。
    pub cwebp_args: Vec<String>,
    /// 何时弹出设置对话框。
    pub show_settings: ShowOptions,
    /// 是否在编辑器右键菜单中添加入口。
    pub context_menu_entry: bool,
    /// 是否在编辑器工具栏添加按钮。
    pub show_editor_button: bool,
    /// 快捷键，空字符串表示不注册。
    pub shortcut: String,
    /// 媒体目录，空字符串表示使用默认数据目录。
    pub media_dir: String,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            image_quality: 20,
            image_width: 0,
            image_height: 200,
            avoid_upscaling: true,
            cwebp_args: Vec::new(),
            show_settings: ShowOptions::Toolbar,
            context_menu_entry: true,
            show_editor_button: true,
            shortcut: "Ctrl+Alt+Shift+d".to_string(),
            media_dir: String::new(),
        }
    }
}

impl PasteConfig {
    /// 从 JSON 文件加载配置。
    ///
    /// 文件不存在时返回默认配置；存在但无法解析时返回 `PasteError::Config`。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use paste_webp::config::PasteConfig;
    ///
    /// let config = PasteConfig::load("config.json")?;
    /// # Ok::<(), paste_webp::error::PasteError>(())
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PasteError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("⚙️ 配置文件不存在，使用默认配置: {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        log::info!("⚙️ 已加载配置: {}", path.display());
        Ok(config)
    }

    /// 从 JSON 字符串解析并校验配置。
    pub fn from_json(content: &str) -> Result<Self, PasteError> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| PasteError::Config(format!("解析配置文件失败: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置取值范围。
    pub fn validate(&self) -> Result<(), PasteError> {
        if self.image_quality > 100 {
            return Err(PasteError::Config(format!(
                "image_quality 必须在 0~100 之间，当前为 {}",
                self.image_quality
            )));
        }
        if self.cwebp_args.iter().any(|arg| arg.trim().is_empty()) {
            return Err(PasteError::Config("cwebp_args 不能包含空参数".to_string()));
        }
        Ok(())
    }

    /// 是否配置了快捷键。
    pub fn shortcut(&self) -> Option<&str> {
        let trimmed = self.shortcut.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
