//! # 剪贴板载荷识别
//!
//! ## 设计思路
//!
//! 宿主剪贴板以 `ClipboardPayload` 能力接口表示，本模块只读检查，不产生副作用。
//! 候选图片按固定优先级惰性产出：嵌入的图片数据优先，其次是指向本地图片文件的 URL。

use std::path::PathBuf;

use image::DynamicImage;

use crate::error::PasteError;

/// 可识别为图片的文件扩展名（小写）。
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".tif", ".tiff", ".webp", ".ico", ".avif",
];

/// 剪贴板 / 拖放载荷能力接口。
pub trait ClipboardPayload {
    /// 是否包含嵌入的图片数据。
    fn has_embedded_image(&self) -> bool;

    /// 解码嵌入的图片数据，失败时返回 `None`。
    fn decode_embedded_image(&self) -> Option<DynamicImage>;

    /// 载荷中引用的 URL 列表（`file://` 或普通路径）。
    fn urls(&self) -> Vec<String>;
}

/// 文件名是否带有图片扩展名（大小写不敏感）。
pub fn image_like_filename(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// URL 的最后一段（文件名部分）。
fn url_file_name(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(without_query)
}

/// 将 `file://` URL 或普通路径转换为本地路径；远程 URL 返回 `None`。
pub(crate) fn local_path(url: &str) -> Option<PathBuf> {
    let trimmed = url.trim();
    if let Some(rest) = trimmed.strip_prefix("file://") {
        let decoded = urlencoding::decode(rest).ok()?.into_owned();
        let decoded = decoded.strip_prefix("localhost").unwrap_or(&decoded).to_string();
        // file:///C:/x 在 Windows 上对应 C:/x
        let is_drive_path = decoded.len() > 2
            && decoded.starts_with('/')
            && decoded.as_bytes()[2] == b':';
        let path = if cfg!(windows) && is_drive_path {
            decoded[1..].to_string()
        } else {
            decoded
        };
        return Some(PathBuf::from(path));
    }

    if trimmed.contains("://") {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

/// 按优先级惰性产出候选图片。
///
/// 解码失败的候选以 `None` 产出，由调用方跳过。
pub fn image_candidates<P: ClipboardPayload + ?Sized>(
    payload: &P,
) -> impl Iterator<Item = Option<DynamicImage>> + '_ {
    let embedded = payload
        .has_embedded_image()
        .then(|| payload.decode_embedded_image());

    let from_urls = payload
        .urls()
        .into_iter()
        .filter(|url| image_like_filename(url_file_name(url)))
        .filter_map(|url| local_path(&url))
        .map(|path| match image::open(&path) {
            Ok(image) => Some(image),
            Err(err) => {
                log::warn!("⚠️ 无法解码图片文件 {}: {}", path.display(), err);
                None
            }
        });

    embedded.into_iter().chain(from_urls)
}

/// 在没有任何候选成功时判断是否属于“非图片输入”。
///
/// 载荷引用了 URL 且全部不是图片扩展名时返回 `InvalidInput`；
/// 其余情况（例如载荷里根本没有图片迹象）视为无事可做。
pub(crate) fn reject_non_image_urls<P: ClipboardPayload + ?Sized>(
    payload: &P,
) -> Result<(), PasteError> {
    let urls = payload.urls();
    if !urls.is_empty() && urls.iter().all(|url| !image_like_filename(url_file_name(url))) {
        let names: Vec<&str> = urls.iter().map(|url| url_file_name(url)).collect();
        return Err(PasteError::InvalidInput(names.join(", ")));
    }
    Ok(())
}

/// 载荷是否带有任何图片迹象：嵌入图片，或指向图片扩展名的 URL（含远程 URL）。
pub(crate) fn has_image_indicator<P: ClipboardPayload + ?Sized>(payload: &P) -> bool {
    payload.has_embedded_image()
        || payload
            .urls()
            .iter()
            .any(|url| image_like_filename(url_file_name(url)))
}
