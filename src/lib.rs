//! # 粘贴为 WebP：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 宿主编辑器（右键菜单 / 按钮 / 快捷键）    │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Action
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  actions ──── 入口注册 + paste_as_webp（插入 / 提示）     │
//! │       ↓                                                  │
//! │  webp::ImageConverter                                    │
//! │   ├─ mime        剪贴板候选图片                          │
//! │   ├─ temp_file   作用域临时 PNG                          │
//! │   ├─ dialog      设置对话框策略                          │
//! │   ├─ file_paths  唯一目标文件名                          │
//! │   └─ encoder     cwebp 子进程                            │
//! │                                                          │
//! │  config ── storage ── clipboard ── error                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `PasteError` |
//! | [`config`] | 配置加载、默认值与校验 |
//! | [`storage`] | 媒体目录与随附编码器目录 |
//! | [`clipboard`] | 基于 `arboard` 的系统剪贴板快照 |
//! | [`webp`] | 转换流水线 |
//! | [`actions`] | 编辑器入口注册与插入 |

pub mod actions;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod storage;
pub mod webp;
