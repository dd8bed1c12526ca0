// Rejecting the settings dialog must leave nothing behind.
// Kept in its own test binary so no other test creates temp files concurrently.
use std::fs;
use std::path::PathBuf;

use image::DynamicImage;
use paste_webp::config::PasteConfig;
use paste_webp::error::PasteError;
use paste_webp::webp::{
    Action, ClipboardPayload, ConversionSettings, CwebpEncoder, DialogResult, ImageConverter,
    ImageDimensions, SettingsDialog, ShowOptions,
};
use tempfile::TempDir;

struct EmbeddedImage;

impl ClipboardPayload for EmbeddedImage {
    fn has_embedded_image(&self) -> bool {
        true
    }

    fn decode_embedded_image(&self) -> Option<DynamicImage> {
        Some(DynamicImage::new_rgba8(120, 80))
    }

    fn urls(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Notes which temp PNGs exist while the dialog is open, then rejects.
#[derive(Default)]
struct RejectAndWatch {
    seen_temp_files: Vec<PathBuf>,
    image: Option<ImageDimensions>,
}

impl SettingsDialog for &mut RejectAndWatch {
    fn exec(&mut self, image: ImageDimensions, _settings: &mut ConversionSettings) -> DialogResult {
        self.image = Some(image);
        self.seen_temp_files = fs::read_dir(std::env::temp_dir())
            .into_iter()
            .flatten()
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("paste_webp_") && n.ends_with(".png"))
            })
            .collect();
        DialogResult::Rejected
    }
}

#[test]
fn rejected_dialog_removes_temp_png_and_writes_nothing() {
    let media = TempDir::new().expect("temp dir");
    let config = PasteConfig {
        show_settings: ShowOptions::ContextMenu,
        ..PasteConfig::default()
    };
    // never spawned: the dialog rejects before encoding
    let encoder = CwebpEncoder::new("cwebp-not-needed");
    let mut dialog = RejectAndWatch::default();

    let result = ImageConverter::new(&config, &encoder, media.path())
        .with_action(Action::ContextMenu)
        .with_dialog(&mut dialog)
        .convert(&EmbeddedImage);

    assert!(matches!(result, Err(PasteError::CanceledPaste)));
    assert_eq!(dialog.image, Some(ImageDimensions::new(120, 80)));
    assert!(!dialog.seen_temp_files.is_empty(), "temp png should exist while the dialog is open");
    for path in &dialog.seen_temp_files {
        assert!(!path.exists(), "temp file left behind: {}", path.display());
    }
    assert_eq!(fs::read_dir(media.path()).expect("read dir").count(), 0);
}
