//! # WebP 转换模块（webp）
//!
//! ## 设计思路
//!
//! 将“剪贴板识别 → 临时 PNG → 设置对话框 → 生成目标路径 → 调用 cwebp”
//! 按职责拆分为多个子模块，每个子模块只做一件事。
//!
//! - `encoder`：定位 cwebp、组装命令行并执行子进程
//! - `temp_file`：临时文件 RAII 守卫
//! - `file_paths`：目标文件名生成与去重
//! - `mime`：剪贴板载荷识别与候选图片
//! - `dialog`：设置对话框触发策略
//! - `converter`：编排整条转换流水线
//! - `source`：中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! actions::paste_as_webp
//!    ↓
//! converter.rs（统一编排 + 阶段耗时日志）
//!    ├─ temp_file.rs（作用域临时文件）
//!    ├─ mime.rs（候选图片，嵌入数据优先）
//!    ├─ dialog.rs（是否弹出设置对话框）
//!    ├─ file_paths.rs（唯一目标路径）
//!    └─ encoder.rs（cwebp 子进程）
//!    ↓
//! 返回 PasteError 给调用方
//! ```

mod converter;
mod dialog;
mod encoder;
mod file_paths;
pub(crate) mod mime;
mod source;
mod temp_file;

pub use converter::{ImageConverter, get_resize_args};
pub use dialog::{
    Action, AutoAccept, DialogResult, SettingsDialog, ShowOptions, should_show_settings,
};
pub use encoder::{CwebpEncoder, EncodeJob, WebpEncoder, find_cwebp, locate_cwebp};
pub use file_paths::{FilePathFactory, WEBP_EXT, ensure_unique, sanitize_base_name};
pub use mime::{ClipboardPayload, IMAGE_EXTENSIONS, image_candidates, image_like_filename};
pub use source::{ConversionSettings, ImageDimensions};
pub use temp_file::TempFile;
