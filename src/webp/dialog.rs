//! # 设置对话框触发策略
//!
//! ## 设计思路
//!
//! “是否弹出对话框”是纯函数：只取决于配置的触发策略与本次转换的触发来源。
//! 对话框本身属于宿主 UI，通过 `SettingsDialog` 接口注入；
//! 它只能修改单次转换的参数快照，结果只有 `Accepted` / `Rejected` 两种。

use serde::{Deserialize, Serialize};

use super::source::{ConversionSettings, ImageDimensions};
use crate::error::PasteError;

/// 设置对话框的弹出策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowOptions {
    Never,
    Always,
    ContextMenu,
    Toolbar,
    Shortcut,
}

/// 触发本次转换的界面入口。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ContextMenu,
    Toolbar,
    Shortcut,
}

impl Action {
    /// 从外部字符串解析触发来源。
    pub fn from_str(action: &str) -> Result<Self, PasteError> {
        match action.trim().to_lowercase().replace('_', "-").as_str() {
            "context-menu" | "menu" => Ok(Self::ContextMenu),
            "toolbar" | "button" => Ok(Self::Toolbar),
            "shortcut" => Ok(Self::Shortcut),
            other => Err(PasteError::Config(format!(
                "未知触发来源：{}（可选：context-menu / toolbar / shortcut）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContextMenu => "context-menu",
            Self::Toolbar => "toolbar",
            Self::Shortcut => "shortcut",
        }
    }

    /// 与本入口对应的弹出策略。
    fn show_option(self) -> ShowOptions {
        match self {
            Self::ContextMenu => ShowOptions::ContextMenu,
            Self::Toolbar => ShowOptions::Toolbar,
            Self::Shortcut => ShowOptions::Shortcut,
        }
    }
}

/// 是否需要在转换前弹出设置对话框。
pub fn should_show_settings(policy: ShowOptions, action: Option<Action>) -> bool {
    match policy {
        ShowOptions::Always => true,
        ShowOptions::Never => false,
        other => action.is_some_and(|a| a.show_option() == other),
    }
}

/// 对话框结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Accepted,
    Rejected,
}

/// 宿主提供的模态设置对话框。
pub trait SettingsDialog {
    /// 展示图片尺寸与转换参数，阻塞直到用户确认或取消。
    ///
    /// 用户修改的宽/高/质量写回 `settings`，只影响本次转换。
    fn exec(&mut self, image: ImageDimensions, settings: &mut ConversionSettings) -> DialogResult;
}

/// 不显示界面、直接确认的对话框，用于无界面环境。
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoAccept;

impl SettingsDialog for AutoAccept {
    fn exec(&mut self, _image: ImageDimensions, _settings: &mut ConversionSettings) -> DialogResult {
        DialogResult::Accepted
    }
}
