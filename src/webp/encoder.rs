//! # 编码器模块
//!
//! ## 设计思路
//!
//! - 定位：优先使用 `PATH` 中的 `cwebp`，否则回退到随附的 `support/cwebp*`。
//!   定位结果在进程内只计算一次（`OnceCell`），之后以引用传递。
//! - 执行：`WebpEncoder` 是转换器与子进程之间的接缝，
//!   测试可替换为假实现；`CwebpEncoder` 负责真正的子进程调用。
//!
//! ## 实现思路
//!
//! 子进程同步等待，不设超时；stdout + stderr 合并后用于失败诊断。
//! Windows 上使用 `CREATE_NO_WINDOW`，避免弹出控制台窗口。

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use once_cell::sync::OnceCell;

use crate::error::PasteError;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

static CWEBP: OnceCell<PathBuf> = OnceCell::new();

/// 随附编码器的平台后缀。
fn bundled_suffix() -> &'static str {
    if cfg!(windows) {
        ".exe"
    } else if cfg!(target_os = "macos") {
        "_macos"
    } else {
        ""
    }
}

/// 查找 cwebp（不缓存）。
///
/// `support_dir` 为随附二进制所在目录。
pub fn find_cwebp(support_dir: &Path) -> Result<PathBuf, PasteError> {
    if let Ok(exe) = which::which("cwebp") {
        log::info!("🔍 使用系统 cwebp: {}", exe.display());
        return Ok(exe);
    }

    bundled_cwebp(support_dir)
}

/// 随附的 `support/cwebp{后缀}`，Unix 上同时补上可执行权限。
pub(crate) fn bundled_cwebp(support_dir: &Path) -> Result<PathBuf, PasteError> {
    let exe = support_dir.join(format!("cwebp{}", bundled_suffix()));
    if !exe.is_file() {
        return Err(PasteError::EncoderNotFound(exe));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755))?;
    }

    log::info!("🔍 使用随附 cwebp: {}", exe.display());
    Ok(exe)
}

/// 查找 cwebp，结果在进程生命周期内缓存。
///
/// # 示例
/// ```rust,no_run
/// use paste_webp::webp::locate_cwebp;
///
/// let cwebp = locate_cwebp(std::path::Path::new("support"))?;
/// # Ok::<(), paste_webp::error::PasteError>(())
/// ```
pub fn locate_cwebp(support_dir: &Path) -> Result<&'static Path, PasteError> {
    CWEBP
        .get_or_try_init(|| find_cwebp(support_dir))
        .map(PathBuf::as_path)
}

/// 单次编码任务。
///
/// `args` 为完整参数列表（不含可执行文件本身）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub args: Vec<String>,
}

/// WebP 编码器接口。
pub trait WebpEncoder {
    /// 执行编码；成功时 `job.destination` 已写入磁盘。
    fn encode(&self, job: &EncodeJob) -> Result<(), PasteError>;
}

/// 基于 cwebp 子进程的编码器。
#[derive(Debug, Clone)]
pub struct CwebpEncoder {
    path: PathBuf,
}

impl CwebpEncoder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用进程级缓存的 cwebp 路径创建编码器。
    pub fn locate(support_dir: &Path) -> Result<Self, PasteError> {
        locate_cwebp(support_dir).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.args(args);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd
    }
}

impl WebpEncoder for CwebpEncoder {
    fn encode(&self, job: &EncodeJob) -> Result<(), PasteError> {
        log::debug!("🛠️ cwebp 参数: {:?}", job.args);
        let start = Instant::now();

        let output = self.command(&job.args).output().map_err(|e| {
            PasteError::ConversionFailed {
                code: None,
                output: format!("无法启动 {}: {}", self.path.display(), e),
            }
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            log::error!(
                "❌ cwebp 失败 - 退出码: {:?} 输出: {}",
                output.status.code(),
                combined.trim()
            );
            return Err(PasteError::ConversionFailed {
                code: output.status.code(),
                output: combined,
            });
        }

        log::info!(
            "✅ cwebp 完成 - {} -> {} ({}ms)",
            job.source.display(),
            job.destination.display(),
            start.elapsed().as_millis()
        );
        Ok(())
    }
}
