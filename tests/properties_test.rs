// Property tests for the resize rule and filename uniqueness
use std::collections::HashSet;
use std::fs;

use paste_webp::webp::{ConversionSettings, FilePathFactory, ImageDimensions, get_resize_args};
use proptest::prelude::*;
use tempfile::TempDir;

fn settings(width: u32, height: u32, avoid_upscaling: bool) -> ConversionSettings {
    ConversionSettings {
        quality: 20,
        width,
        height,
        avoid_upscaling,
        extra_args: Vec::new(),
    }
}

proptest! {
    #[test]
    fn zero_target_never_resizes(w in 0u32..10_000, h in 0u32..10_000, avoid in any::<bool>()) {
        let args = get_resize_args(&settings(0, 0, avoid), ImageDimensions::new(w, h));
        prop_assert!(args.is_empty());
    }

    #[test]
    fn smaller_source_never_upscales(
        tw in 1u32..5_000,
        th in 1u32..5_000,
        sw in 0u32..5_000,
        sh in 0u32..5_000,
    ) {
        prop_assume!(sw < tw || sh < th);
        let args = get_resize_args(&settings(tw, th, true), ImageDimensions::new(sw, sh));
        prop_assert!(args.is_empty());
    }

    #[test]
    fn resize_values_pass_through(
        tw in 0u32..5_000,
        th in 0u32..5_000,
        sw in 0u32..5_000,
        sh in 0u32..5_000,
    ) {
        prop_assume!(tw != 0 || th != 0);
        let args = get_resize_args(&settings(tw, th, false), ImageDimensions::new(sw, sh));
        prop_assert_eq!(args, vec!["-resize".to_string(), tw.to_string(), th.to_string()]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn unique_paths_skip_taken_names(base in "[a-z]{1,8}", taken in 0usize..6) {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join(format!("{base}.webp")), b"x").expect("write");
        for n in 1..=taken {
            fs::write(dir.path().join(format!("{base}_{n}.webp")), b"x").expect("write");
        }

        let factory = FilePathFactory::new(dir.path());
        let mut seen = HashSet::new();
        for i in 0..4 {
            let path = factory.make_unique_filepath(Some(base.as_str())).expect("path");
            prop_assert_eq!(path.parent(), Some(dir.path()));
            let expected = format!("{base}_{}.webp", taken + 1 + i);
            prop_assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(expected.as_str()));
            prop_assert!(seen.insert(path));
        }
    }
}
