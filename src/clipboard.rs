//! 系统剪贴板适配模块
//!
//! # 设计思路
//!
//! 通过 `arboard` 读取系统剪贴板，并实现 `ClipboardPayload` 能力接口，
//! 让转换器无需关心剪贴板后端。
//!
//! # 实现思路
//!
//! - 构造时一次性快照图片（RGBA）与文本，之后的查询都是只读的。
//! - 文本中以 `file://` 开头的行视为文件 URL（与 `text/uri-list` 格式一致）。
//! - 图片读取失败（剪贴板里没有图片）不是错误，只是快照中没有图片。

use arboard::Clipboard;
use image::{DynamicImage, RgbaImage};

use crate::error::PasteError;
use crate::webp::ClipboardPayload;

/// 剪贴板中的原始 RGBA 图片。
struct RawRgba {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

/// 系统剪贴板快照。
pub struct SystemClipboard {
    image: Option<RawRgba>,
    urls: Vec<String>,
}

impl SystemClipboard {
    /// 读取当前系统剪贴板。
    pub fn snapshot() -> Result<Self, PasteError> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| PasteError::Clipboard(format!("无法打开剪贴板: {}", e)))?;

        let image = match clipboard.get_image() {
            Ok(data) => {
                log::debug!("🖼️ 剪贴板图片: {}x{}", data.width, data.height);
                Some(RawRgba {
                    width: data.width,
                    height: data.height,
                    bytes: data.bytes.into_owned(),
                })
            }
            Err(e) => {
                log::debug!("剪贴板中没有图片: {}", e);
                None
            }
        };

        let urls = clipboard
            .get_text()
            .map(|text| parse_uri_list(&text))
            .unwrap_or_default();

        Ok(Self { image, urls })
    }
}

impl ClipboardPayload for SystemClipboard {
    fn has_embedded_image(&self) -> bool {
        self.image.is_some()
    }

    fn decode_embedded_image(&self) -> Option<DynamicImage> {
        let raw = self.image.as_ref()?;
        let (Ok(width), Ok(height)) = (u32::try_from(raw.width), u32::try_from(raw.height)) else {
            log::warn!("⚠️ 剪贴板图片尺寸超出范围: {}x{}", raw.width, raw.height);
            return None;
        };
        let buffer = RgbaImage::from_raw(width, height, raw.bytes.clone());
        if buffer.is_none() {
            log::warn!("⚠️ 剪贴板图片缓冲长度异常: {}x{}", raw.width, raw.height);
        }
        buffer.map(DynamicImage::ImageRgba8)
    }

    fn urls(&self) -> Vec<String> {
        self.urls.clone()
    }
}

/// 从剪贴板文本中提取 `file://` URL。
pub(crate) fn parse_uri_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter(|line| line.starts_with("file://"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_list_keeps_only_file_urls() {
        let text = "# comment\nfile:///tmp/a.png\r\nhttps://x.org/b.png\n  file:///tmp/c%20d.jpg  \nplain text";
        assert_eq!(
            parse_uri_list(text),
            vec!["file:///tmp/a.png", "file:///tmp/c%20d.jpg"]
        );
    }

    #[test]
    fn plain_text_has_no_urls() {
        assert!(parse_uri_list("hello world").is_empty());
    }

    #[test]
    fn malformed_buffer_decodes_to_none() {
        let clip = SystemClipboard {
            image: Some(RawRgba { width: 4, height: 4, bytes: vec![0; 3] }),
            urls: Vec::new(),
        };
        assert!(clip.has_embedded_image());
        assert!(clip.decode_embedded_image().is_none());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_dimensions_decode_to_none() {
        let clip = SystemClipboard {
            image: Some(RawRgba { width: u32::MAX as usize + 1, height: 1, bytes: Vec::new() }),
            urls: Vec::new(),
        };
        assert!(clip.decode_embedded_image().is_none());
    }

    #[test]
    fn snapshot_buffer_decodes_to_rgba() {
        let clip = SystemClipboard {
            image: Some(RawRgba { width: 2, height: 3, bytes: vec![255; 2 * 3 * 4] }),
            urls: Vec::new(),
        };
        let image = clip.decode_embedded_image().expect("decoded");
        assert_eq!((image.width(), image.height()), (2, 3));
    }

    #[test]
    #[ignore = "requires system clipboard access"]
    fn reads_system_clipboard() {
        let clip = SystemClipboard::snapshot().expect("clipboard");
        println!("image={} urls={:?}", clip.has_embedded_image(), clip.urls());
    }
}
