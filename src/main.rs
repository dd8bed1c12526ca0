//! # 粘贴为 WebP：命令行入口
//!
//! 读取系统剪贴板中的图片，转换为 WebP 存入媒体目录，并输出插入用的 HTML。
//! 业务逻辑分布在库的各子模块中，详见 `lib.rs` 架构文档。

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use paste_webp::actions::{self, EditorHost};
use paste_webp::clipboard::SystemClipboard;
use paste_webp::config::PasteConfig;
use paste_webp::error::PasteError;
use paste_webp::storage;
use paste_webp::webp::{
    Action, ConversionSettings, CwebpEncoder, DialogResult, ImageConverter, ImageDimensions,
    SettingsDialog,
};

#[derive(Debug, Parser)]
#[command(name = "paste-webp", version, about = "Paste clipboard images as WebP")]
struct Cli {
    /// 配置文件（JSON）
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// 媒体目录，覆盖配置中的 media_dir
    #[arg(long)]
    media_dir: Option<String>,

    /// 随附 cwebp 所在目录，默认为程序旁的 support/
    #[arg(long)]
    support_dir: Option<PathBuf>,

    /// 触发来源：context-menu / toolbar / shortcut
    #[arg(long, value_parser = parse_action)]
    action: Option<Action>,

    /// 用于生成文件名的编辑器上下文
    #[arg(long)]
    context: Option<String>,

    /// 转换媒体目录中已有的文件，而不是剪贴板
    #[arg(long)]
    existing: Option<String>,

    /// 输出编辑器插入脚本而不是 HTML
    #[arg(long)]
    script: bool,

    /// 只打印按配置注册的入口
    #[arg(long)]
    show_triggers: bool,
}

fn parse_action(value: &str) -> Result<Action, String> {
    Action::from_str(value).map_err(|e| e.to_string())
}

/// 终端版设置对话框。
struct TerminalDialog;

/// 解析用户输入：`n` 取消；`q=NN` / `w=NN` / `h=NN` 修改参数；其余视为确认。
fn apply_answer(answer: &str, settings: &mut ConversionSettings) -> DialogResult {
    let answer = answer.trim().to_lowercase();
    if answer == "n" || answer == "no" {
        return DialogResult::Rejected;
    }

    for token in answer.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        let Ok(value) = value.parse::<u32>() else {
            log::warn!("忽略无效输入: {}", token);
            continue;
        };
        match key {
            "q" => settings.quality = value.min(100) as u8,
            "w" => settings.width = value,
            "h" => settings.height = value,
            _ => log::warn!("忽略未知参数: {}", key),
        }
    }
    DialogResult::Accepted
}

impl SettingsDialog for TerminalDialog {
    fn exec(&mut self, image: ImageDimensions, settings: &mut ConversionSettings) -> DialogResult {
        eprintln!(
            "图片 {} -> 目标 {}x{}，质量 {}",
            image, settings.width, settings.height, settings.quality
        );
        eprint!("继续？[Y/n]，或输入 q=NN w=NN h=NN 修改: ");
        if let Err(err) = io::stderr().flush() {
            log::debug!("刷新 stderr 失败: {}", err);
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return DialogResult::Rejected;
        }
        apply_answer(&line, settings)
    }
}

/// 命令行版宿主：HTML 输出到 stdout，提示输出到 stderr。
struct ConsoleHost {
    script: bool,
}

impl EditorHost for ConsoleHost {
    fn add_context_menu_item(&mut self, label: &str, action: Action) {
        println!("context-menu\t{}\t{}", label, action.as_str());
    }

    fn add_toolbar_button(
        &mut self,
        id: &str,
        icon: &str,
        tooltip: &str,
        shortcut: Option<&str>,
        action: Action,
    ) {
        println!(
            "button\t{}\t{}\t{}\t{}\t{}",
            id,
            icon,
            tooltip,
            shortcut.unwrap_or("-"),
            action.as_str()
        );
    }

    fn add_shortcut(&mut self, keys: &str, action: Action) {
        println!("shortcut\t{}\t{}", keys, action.as_str());
    }

    fn insert_html(&mut self, html: &str) {
        if self.script {
            match actions::insert_html_script(html) {
                Ok(script) => println!("{}", script),
                Err(e) => eprintln!("{}", e),
            }
        } else {
            println!("{}", html);
        }
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn run(cli: Cli) -> Result<bool, PasteError> {
    let config = PasteConfig::load(&cli.config)?;
    let mut host = ConsoleHost { script: cli.script };

    if cli.show_triggers {
        actions::setup_menus(&config, &mut host);
        return Ok(true);
    }

    let media_dir = storage::media_dir(cli.media_dir.as_deref().or(Some(config.media_dir.as_str())))?;
    let support_dir = match cli.support_dir {
        Some(dir) => dir,
        None => storage::default_support_dir()?,
    };
    let encoder = CwebpEncoder::locate(&support_dir)?;

    let mut converter = ImageConverter::new(&config, &encoder, media_dir).with_dialog(TerminalDialog);
    if let Some(action) = cli.action {
        converter = converter.with_action(action);
    }
    if let Some(context) = cli.context {
        converter = converter.with_context(context);
    }

    if let Some(existing) = cli.existing {
        let path = converter.convert_existing(&existing)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        host.insert_html(&actions::image_html(&filename));
        return Ok(true);
    }

    let payload = SystemClipboard::snapshot()?;
    Ok(actions::paste_as_webp(&mut converter, &payload, &mut host).is_some())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ConversionSettings {
        ConversionSettings::from(&PasteConfig::default())
    }

    #[test]
    fn empty_answer_accepts() {
        let mut s = settings();
        assert_eq!(apply_answer("\n", &mut s), DialogResult::Accepted);
        assert_eq!(s, settings());
    }

    #[test]
    fn no_rejects() {
        let mut s = settings();
        assert_eq!(apply_answer(" N\n", &mut s), DialogResult::Rejected);
    }

    #[test]
    fn edits_are_applied() {
        let mut s = settings();
        assert_eq!(apply_answer("q=150 w=640 h=x z=1", &mut s), DialogResult::Accepted);
        assert_eq!(s.quality, 100);
        assert_eq!(s.width, 640);
        assert_eq!(s.height, settings().height);
    }

    #[test]
    fn cli_parses_action() {
        let cli = Cli::parse_from(["paste-webp", "--action", "context-menu", "--script"]);
        assert_eq!(cli.action, Some(Action::ContextMenu));
        assert!(cli.script);
        assert!(Cli::try_parse_from(["paste-webp", "--action", "drag"]).is_err());
    }
}
