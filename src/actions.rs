//! 编辑器入口注册模块
//!
//! # 设计思路
//!
//! 右键菜单、工具栏按钮、快捷键三种入口都调用同一条转换链路，
//! 只是携带不同的 `Action`，供对话框策略判断。注册本身是声明式的：
//! 根据配置决定向宿主注册哪些入口。
//!
//! # 实现思路
//!
//! - 宿主编辑器通过 `EditorHost` 接口注入。
//! - 开启工具栏按钮时快捷键绑定到按钮上；否则单独注册快捷键。
//! - `paste_as_webp` 负责“转换 → 插入 HTML → 失败提示”。

use crate::config::PasteConfig;
use crate::error::PasteError;
use crate::webp::{Action, ClipboardPayload, ImageConverter};

const ACTION_LABEL: &str = "Paste as WebP";
pub const BUTTON_ID: &str = "paste_webp_button";
pub const BUTTON_ICON: &str = "webp_icon.png";

/// 宿主编辑器接口。
pub trait EditorHost {
    fn add_context_menu_item(&mut self, label: &str, action: Action);

    fn add_toolbar_button(
        &mut self,
        id: &str,
        icon: &str,
        tooltip: &str,
        shortcut: Option<&str>,
        action: Action,
    );

    fn add_shortcut(&mut self, keys: &str, action: Action);

    /// 在光标位置插入 HTML。
    fn insert_html(&mut self, html: &str);

    /// 向用户提示一条消息。
    fn notify(&mut self, message: &str);
}

/// 将快捷键格式化为展示文本，如 `ctrl+shift+d` -> `Ctrl+Shift+D`。
pub fn shortcut_label(shortcut: &str) -> String {
    shortcut
        .split('+')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("+")
}

/// 入口提示文本。
pub fn action_tooltip(config: &PasteConfig) -> String {
    match config.shortcut() {
        Some(shortcut) => format!("{} ({})", ACTION_LABEL, shortcut_label(shortcut)),
        None => ACTION_LABEL.to_string(),
    }
}

/// 根据配置向宿主注册入口。
pub fn setup_menus(config: &PasteConfig, host: &mut dyn EditorHost) {
    let tooltip = action_tooltip(config);
    let shortcut = config.shortcut();

    if config.context_menu_entry {
        host.add_context_menu_item(&tooltip, Action::ContextMenu);
    }

    if config.show_editor_button {
        host.add_toolbar_button(BUTTON_ID, BUTTON_ICON, &tooltip, shortcut, Action::Toolbar);
    } else if let Some(keys) = shortcut {
        host.add_shortcut(keys, Action::Shortcut);
    }

    log::info!(
        "🧩 已注册入口 - context_menu={} button={} shortcut={:?}",
        config.context_menu_entry,
        config.show_editor_button,
        shortcut
    );
}

/// 生成插入编辑器的 `<img>` 标签。
pub fn image_html(filename: &str) -> String {
    let escaped = filename
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("<img src=\"{}\">", escaped)
}

/// 生成编辑器网页侧执行的插入脚本。
pub fn insert_html_script(html: &str) -> Result<String, PasteError> {
    let arg = serde_json::to_string(html)
        .map_err(|e| PasteError::Config(format!("序列化 HTML 失败: {}", e)))?;
    Ok(format!("setFormat(\"insertHtml\", {});", arg))
}

/// 入口回调：转换剪贴板图片并插入编辑器。
///
/// 失败只中止本次粘贴：取消仅记录日志，其余错误原样提示给用户。
/// 返回插入的文件名。
pub fn paste_as_webp(
    converter: &mut ImageConverter<'_>,
    payload: &dyn ClipboardPayload,
    host: &mut dyn EditorHost,
) -> Option<String> {
    match converter.convert(payload) {
        Ok(Some(_)) => {
            let filename = converter.filename()?;
            host.insert_html(&image_html(&filename));
            Some(filename)
        }
        Ok(None) => None,
        Err(PasteError::CanceledPaste) => {
            log::info!("粘贴已取消");
            None
        }
        Err(err) => {
            if err.is_user_facing() {
                log::warn!("⚠️ 粘贴中止: {}", err);
            } else {
                log::error!("❌ 粘贴失败: {}", err);
            }
            host.notify(&err.to_string());
            None
        }
    }
}
