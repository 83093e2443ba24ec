// src/gui/fonts.rs
//
// egui's bundled fonts carry no CJK glyphs and every item name is Japanese.
// Pick up a system font that does and put it behind the defaults.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

/// Override with a path to any .ttf/.otf/.ttc covering Japanese.
pub const FONT_ENV: &str = "CPI_WATCH_FONT";

const CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
];

fn candidates() -> impl Iterator<Item = PathBuf> {
    std::env::var_os(FONT_ENV)
        .map(PathBuf::from)
        .into_iter()
        .chain(CANDIDATES.iter().map(PathBuf::from))
}

pub fn install(ctx: &egui::Context) {
    let Some((path, bytes)) = candidates().find_map(|p| std::fs::read(&p).ok().map(|b| (p, b))) else {
        logw!("Fonts: no CJK font found; set ${} to one", FONT_ENV);
        return;
    };
    logf!("Fonts: using {}", path.display());

    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert("cjk".to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
}
