//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageConverter` 只负责流程编排，不直接与宿主 UI 绑定。
//! 处理链路固定为：
//! 1. 申请作用域临时文件
//! 2. 取第一个能保存为 PNG 的候选图片，记录尺寸
//! 3. 按策略决定是否弹出设置对话框，取消则中止
//! 4. 生成唯一目标路径
//! 5. 组装 cwebp 参数并执行
//!
//! ## 实现思路
//!
//! - 配置以引用注入，单次转换内使用同一份 `ConversionSettings` 快照。
//! - 临时文件由 `TempFile` 守卫清理，任何提前返回都不会遗留文件。
//! - 记录 `save/encode/total` 阶段耗时，便于诊断。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::ImageFormat;

use super::dialog::{Action, AutoAccept, DialogResult, SettingsDialog, should_show_settings};
use super::encoder::{EncodeJob, WebpEncoder};
use super::file_paths::FilePathFactory;
use super::mime::{ClipboardPayload, has_image_indicator, image_candidates, reject_non_image_urls};
use super::source::{ConversionSettings, ImageDimensions};
use super::temp_file::TempFile;
use crate::config::PasteConfig;
use crate::error::PasteError;

/// 计算 cwebp 的缩放参数。
///
/// 以下情况不缩放：
/// - 宽高都为 0
/// - 开启 `avoid_upscaling` 且原图在任一方向上小于目标尺寸
///
/// 其余情况原样透传宽高（0 的含义由 cwebp 自行解释）。
pub fn get_resize_args(settings: &ConversionSettings, image: ImageDimensions) -> Vec<String> {
    if settings.avoid_upscaling && image.smaller_than(settings.width, settings.height) {
        return Vec::new();
    }

    if settings.width == 0 && settings.height == 0 {
        return Vec::new();
    }

    vec![
        "-resize".to_string(),
        settings.width.to_string(),
        settings.height.to_string(),
    ]
}

/// 组装完整的 cwebp 参数列表。
pub(crate) fn build_args(
    source: &Path,
    destination: &Path,
    settings: &ConversionSettings,
    image: ImageDimensions,
) -> Vec<String> {
    let mut args = vec![
        source.to_string_lossy().into_owned(),
        "-o".to_string(),
        destination.to_string_lossy().into_owned(),
        "-q".to_string(),
        settings.quality.to_string(),
    ];
    args.extend(settings.extra_args.iter().cloned());
    args.extend(get_resize_args(settings, image));
    args
}

/// 图片转换器。
pub struct ImageConverter<'a> {
    config: &'a PasteConfig,
    encoder: &'a dyn WebpEncoder,
    dialog: Box<dyn SettingsDialog + 'a>,
    action: Option<Action>,
    context: Option<String>,
    filepath_factory: FilePathFactory,
    image: Option<ImageDimensions>,
    filepath: Option<PathBuf>,
}

impl<'a> ImageConverter<'a> {
    /// 创建转换器，默认不弹出界面（`AutoAccept`）。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use paste_webp::config::PasteConfig;
    /// use paste_webp::webp::{Action, CwebpEncoder, ImageConverter};
    ///
    /// let config = PasteConfig::default();
    /// let encoder = CwebpEncoder::new("cwebp");
    /// let converter = ImageConverter::new(&config, &encoder, "/tmp/media")
    ///     .with_action(Action::Toolbar);
    /// ```
    pub fn new(
        config: &'a PasteConfig,
        encoder: &'a dyn WebpEncoder,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            encoder,
            dialog: Box::new(AutoAccept),
            action: None,
            context: None,
            filepath_factory: FilePathFactory::new(dest_dir),
            image: None,
            filepath: None,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_dialog(mut self, dialog: impl SettingsDialog + 'a) -> Self {
        self.dialog = Box::new(dialog);
        self
    }

    /// 设置编辑器上下文（用于生成文件名）。
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn dest_dir(&self) -> &Path {
        self.filepath_factory.dest_dir()
    }

    /// 最近一次成功转换的图片尺寸。
    pub fn image(&self) -> Option<ImageDimensions> {
        self.image
    }

    /// 最近一次成功转换的目标路径。
    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    /// 最近一次成功转换的目标文件名。
    pub fn filename(&self) -> Option<String> {
        self.filepath
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// 是否需要弹出设置对话框。
    pub fn should_show_settings(&self) -> bool {
        should_show_settings(self.config.show_settings, self.action)
    }

    /// 按策略弹出对话框，返回本次转换使用的参数快照。
    fn decide_show_settings(
        &mut self,
        image: ImageDimensions,
    ) -> Result<ConversionSettings, PasteError> {
        let mut settings = ConversionSettings::from(self.config);
        if !self.should_show_settings() {
            return Ok(settings);
        }

        match self.dialog.exec(image, &mut settings) {
            DialogResult::Accepted => Ok(settings),
            DialogResult::Rejected => {
                log::info!("🚫 用户取消了粘贴");
                Err(PasteError::CanceledPaste)
            }
        }
    }

    /// 将第一个可用候选保存为 PNG。
    ///
    /// 返回 `Ok(None)` 表示载荷中根本没有图片迹象；
    /// 有图片迹象却没有候选能保存时返回 `ImageUnreadable`。
    fn save_image(
        &self,
        tmp_path: &Path,
        payload: &dyn ClipboardPayload,
    ) -> Result<Option<ImageDimensions>, PasteError> {
        for image in image_candidates(payload).flatten() {
            match image.save_with_format(tmp_path, ImageFormat::Png) {
                Ok(()) => {
                    let dims = ImageDimensions::from(&image);
                    log::debug!("🖼️ 已保存候选图片 {} -> {}", dims, tmp_path.display());
                    return Ok(Some(dims));
                }
                Err(err) => log::warn!("⚠️ 候选图片保存失败，尝试下一个: {}", err),
            }
        }

        reject_non_image_urls(payload)?;
        if has_image_indicator(payload) {
            return Err(PasteError::ImageUnreadable(
                "剪贴板中的图片无法解码".to_string(),
            ));
        }
        Ok(None)
    }

    fn to_webp(
        &self,
        source: &Path,
        destination: &Path,
        image: ImageDimensions,
        settings: &ConversionSettings,
    ) -> Result<(), PasteError> {
        let job = EncodeJob {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            args: build_args(source, destination, settings, image),
        };

        if let Err(err) = self.encoder.encode(&job) {
            if destination.exists() {
                if let Err(rm_err) = fs::remove_file(destination) {
                    log::warn!("⚠️ 清理不完整的输出失败 {}: {}", destination.display(), rm_err);
                }
            }
            return Err(err);
        }
        Ok(())
    }

    /// 处理主入口：将载荷中的图片转换为 WebP。
    ///
    /// - `Ok(Some(path))`：转换成功，`path` 位于媒体目录
    /// - `Ok(None)`：载荷中没有图片，无事可做
    /// - `Err(..)`：`InvalidInput` / `ImageUnreadable` / `CanceledPaste` / `ConversionFailed` 等
    pub fn convert(
        &mut self,
        payload: &dyn ClipboardPayload,
    ) -> Result<Option<PathBuf>, PasteError> {
        let total_start = Instant::now();
        let tmp_file = TempFile::new()?;

        let save_start = Instant::now();
        let Some(image) = self.save_image(tmp_file.path(), payload)? else {
            log::debug!("📋 剪贴板中没有图片，跳过");
            return Ok(None);
        };
        let save_elapsed = save_start.elapsed();

        let settings = self.decide_show_settings(image)?;
        let webp_filepath = self
            .filepath_factory
            .make_unique_filepath(self.context.as_deref())?;

        let encode_start = Instant::now();
        self.to_webp(tmp_file.path(), &webp_filepath, image, &settings)?;
        let encode_elapsed = encode_start.elapsed();

        log::info!(
            "✅ 粘贴转换完成 - {} 尺寸: {} save={}ms encode={}ms total={}ms",
            webp_filepath.display(),
            image,
            save_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        self.image = Some(image);
        self.filepath = Some(webp_filepath.clone());
        Ok(Some(webp_filepath))
    }

    /// 将媒体目录中已有的图片文件转换为同名 WebP。
    ///
    /// 不弹出对话框，使用配置中的参数。
    pub fn convert_existing(&mut self, filename: &str) -> Result<PathBuf, PasteError> {
        let source = self.dest_dir().join(filename);
        let image = ImageDimensions::from(&image::open(&source)?);
        let destination = self.filepath_factory.sibling_filepath(&source)?;
        let settings = ConversionSettings::from(self.config);

        self.to_webp(&source, &destination, image, &settings)?;
        log::info!("✅ 已转换媒体文件 {} -> {}", source.display(), destination.display());

        self.image = Some(image);
        self.filepath = Some(destination.clone());
        Ok(destination)
    }
}
