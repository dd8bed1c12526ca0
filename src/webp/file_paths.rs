//! # 目标路径生成
//!
//! ## 实现思路
//!
//! - 基础文件名优先取编辑器上下文（如笔记排序字段），清洗后截断。
//! - 无上下文时使用本地时间戳 `paste_%Y%m%d%H%M%S`。
//! - 目标已存在时追加 `_1`、`_2`……直到找到空闲文件名。
//!   尝试次数以目录条目数 + 1 为上限：按鸽巢原理，其中必有一个空闲。
//! - 选中的文件名以 `create_new` 立即占位（空文件），同名的后续调用不会再拿到它；
//!   编码器随后覆盖该文件，失败时由转换器删除。

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::PasteError;

pub const WEBP_EXT: &str = ".webp";
const MAX_BASE_NAME_CHARS: usize = 64;
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '[', ']', '#', '%'];

/// 目标文件路径工厂。
#[derive(Debug, Clone)]
pub struct FilePathFactory {
    dest_dir: PathBuf,
    ext: &'static str,
}

impl FilePathFactory {
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            ext: WEBP_EXT,
        }
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    pub fn ext(&self) -> &'static str {
        self.ext
    }

    /// 生成并占用目标目录中的一个空闲路径。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use paste_webp::webp::FilePathFactory;
    ///
    /// let factory = FilePathFactory::new("/tmp/media");
    /// let path = factory.make_unique_filepath(Some("Kanji: 日本"))?;
    /// # Ok::<(), paste_webp::error::PasteError>(())
    /// ```
    pub fn make_unique_filepath(&self, context: Option<&str>) -> Result<PathBuf, PasteError> {
        let base = context
            .map(sanitize_base_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(timestamp_base_name);
        let candidate = self.dest_dir.join(format!("{}{}", base, self.ext));
        ensure_unique(&candidate)
    }

    /// 与 `source` 同名（替换扩展名）的唯一 WebP 路径。
    pub fn sibling_filepath(&self, source: &Path) -> Result<PathBuf, PasteError> {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(timestamp_base_name);
        let dir = source.parent().unwrap_or(self.dest_dir.as_path());
        ensure_unique(&dir.join(format!("{}{}", stem, self.ext)))
    }
}

fn timestamp_base_name() -> String {
    Local::now().format("paste_%Y%m%d%H%M%S").to_string()
}

/// 清洗基础文件名：去掉文件系统非法字符、空白折叠为 `_`、限制长度。
pub fn sanitize_base_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c) && !c.is_control())
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .trim_matches('.')
        .chars()
        .take(MAX_BASE_NAME_CHARS)
        .collect()
}

/// 以 `create_new` 占用 `path`；已被占用时返回 `Ok(false)`。
fn reserve(path: &Path) -> Result<bool, PasteError> {
    match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// 占用 `path`；已存在时追加数字后缀，直到占用成功。
pub fn ensure_unique(path: &Path) -> Result<PathBuf, PasteError> {
    if reserve(path)? {
        return Ok(path.to_path_buf());
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_os_string());

    let limit = fs::read_dir(dir)?.count() + 1;
    for n in 1..=limit {
        let mut name = OsString::from(&stem);
        name.push(format!("_{}", n));
        if let Some(ext) = &ext {
            name.push(".");
            name.push(ext);
        }
        let candidate = path.with_file_name(name);
        if reserve(&candidate)? {
            log::debug!("🔁 文件名冲突，改用: {}", candidate.display());
            return Ok(candidate);
        }
    }

    Err(PasteError::Io(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("无法在 {} 中找到空闲文件名", dir.display()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn returns_candidate_when_free() {
        let dir = TempDir::new().expect("temp dir");
        let factory = FilePathFactory::new(dir.path());

        let path = factory.make_unique_filepath(Some("cat")).expect("path");
        assert_eq!(path, dir.path().join("cat.webp"));
    }

    #[test]
    fn appends_suffix_on_collision() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("cat.webp"), b"x").expect("write");
        fs::write(dir.path().join("cat_1.webp"), b"x").expect("write");

        let factory = FilePathFactory::new(dir.path());
        let path = factory.make_unique_filepath(Some("cat")).expect("path");
        assert_eq!(path, dir.path().join("cat_2.webp"));
    }

    #[test]
    fn falls_back_to_timestamp_without_context() {
        let dir = TempDir::new().expect("temp dir");
        let factory = FilePathFactory::new(dir.path());

        let path = factory.make_unique_filepath(None).expect("path");
        let name = path.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(name.starts_with("paste_"));
        assert!(name.ends_with(".webp"));

        let blank = factory.make_unique_filepath(Some("  ?? ")).expect("path");
        let name = blank.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(name.starts_with("paste_"));
    }

    #[test]
    fn sanitize_strips_forbidden_and_collapses_whitespace() {
        assert_eq!(sanitize_base_name("a/b: c  d"), "ab_c_d");
        assert_eq!(sanitize_base_name("..hidden.."), "hidden");
        assert_eq!(sanitize_base_name("日本 語"), "日本_語");
        assert_eq!(sanitize_base_name(&"x".repeat(200)).chars().count(), MAX_BASE_NAME_CHARS);
    }

    #[test]
    fn sibling_replaces_extension() {
        let dir = TempDir::new().expect("temp dir");
        let source = dir.path().join("photo.jpg");
        fs::write(&source, b"x").expect("write");
        fs::write(dir.path().join("photo.webp"), b"x").expect("write");

        let factory = FilePathFactory::new(dir.path());
        let path = factory.sibling_filepath(&source).expect("path");
        assert_eq!(path, dir.path().join("photo_1.webp"));
    }

    #[test]
    fn repeated_calls_produce_distinct_paths() {
        let dir = TempDir::new().expect("temp dir");
        let factory = FilePathFactory::new(dir.path());

        let first = factory.make_unique_filepath(Some("cat")).expect("path");
        let second = factory.make_unique_filepath(Some("cat")).expect("path");
        assert_eq!(first, dir.path().join("cat.webp"));
        assert_eq!(second, dir.path().join("cat_1.webp"));

        let mut seen = std::collections::HashSet::from([first, second]);
        for _ in 0..8 {
            let path = factory.make_unique_filepath(Some("cat")).expect("path");
            assert!(seen.insert(path));
        }
    }

    #[test]
    fn chosen_path_is_reserved_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = ensure_unique(&dir.path().join("dog.webp")).expect("path");

        assert_eq!(fs::metadata(&path).expect("metadata").len(), 0);
        assert_eq!(ensure_unique(&path).expect("path"), dir.path().join("dog_1.webp"));
    }
}
