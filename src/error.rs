//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `PasteError` 枚举，粘贴转换链路中的每一步都返回
//! `Result<T, PasteError>`，调用方按分支匹配即可区分“用户可恢复”与“环境故障”。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 前四个分支（`InvalidInput` / `ImageUnreadable` / `CanceledPaste` / `ConversionFailed`）
//!   是面向用户的可恢复情况，只中止本次粘贴，编辑器会话不受影响。
//! - 为 `std::io::Error` 与 `image::ImageError` 提供 `From` 转换，无需手动 map。

use std::path::PathBuf;

/// 粘贴转换统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    /// 剪贴板中没有可转换的图片，且引用的文件都不是图片
    #[error("不是图片文件: {0}")]
    InvalidInput(String),

    /// 载荷声称含有图片，但没有一个候选能解码保存
    #[error("无法保存图片: {0}")]
    ImageUnreadable(String),

    /// 用户在设置对话框中取消了本次粘贴
    #[error("已取消粘贴")]
    CanceledPaste,

    /// 编码器进程以非零状态退出
    ///
    /// `output` 为编码器合并后的 stdout + stderr，用于诊断。
    #[error("cwebp 转换失败（退出码 {code:?}）: {output}")]
    ConversionFailed { code: Option<i32>, output: String },

    /// 找不到可执行的编码器
    #[error("找不到 cwebp 可执行文件: {}", .0.display())]
    EncoderNotFound(PathBuf),

    /// 配置无效或无法解析
    #[error("配置错误: {0}")]
    Config(String),

    /// 剪贴板读取失败
    #[error("剪贴板操作失败: {0}")]
    Clipboard(String),

    /// 图片解码 / 编码失败
    #[error("图片处理失败: {0}")]
    Image(#[from] image::ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

impl PasteError {
    /// 是否属于需要提示给用户的可恢复错误。
    ///
    /// `CanceledPaste` 是用户主动行为，不需要提示。
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::ImageUnreadable(_) | Self::ConversionFailed { .. }
        )
    }
}
