//! # 中间数据模型
//!
//! - `ImageDimensions` 表示已解码图片的像素尺寸
//! - `ConversionSettings` 表示单次转换使用的参数快照（对话框可修改）

use image::{DynamicImage, GenericImageView};

use crate::config::PasteConfig;

/// 图片像素尺寸，创建后不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 是否在任一方向上小于请求尺寸。
    pub fn smaller_than(&self, width: u32, height: u32) -> bool {
        self.width < width || self.height < height
    }
}

impl From<&DynamicImage> for ImageDimensions {
    fn from(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 单次转换的参数快照。
///
/// 从 `PasteConfig` 复制而来，设置对话框只修改这份快照，全局配置保持只读。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSettings {
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    pub avoid_upscaling: bool,
    pub extra_args: Vec<String>,
}

impl From<&PasteConfig> for ConversionSettings {
    fn from(config: &PasteConfig) -> Self {
        Self {
            quality: config.image_quality,
            width: config.image_width,
            height: config.image_height,
            avoid_upscaling: config.avoid_upscaling,
            extra_args: config.cwebp_args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smaller_in_either_axis() {
        let dims = ImageDimensions::new(400, 300);
        assert!(dims.smaller_than(500, 0));
        assert!(dims.smaller_than(0, 301));
        assert!(!dims.smaller_than(400, 300));
        assert!(!dims.smaller_than(0, 0));
    }

    #[test]
    fn settings_snapshot_copies_config() {
        let mut config = PasteConfig::default();
        config.image_quality = 42;
        config.cwebp_args = vec!["-mt".to_string()];

        let settings = ConversionSettings::from(&config);
        assert_eq!(settings.quality, 42);
        assert_eq!(settings.extra_args, vec!["-mt"]);
        assert_eq!(settings.height, config.image_height);
    }
}
