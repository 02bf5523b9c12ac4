//! Folder scanning and image decoding in front of [`Gallery`] construction.
//!
//! A file that fails to decode is logged and skipped rather than aborting the
//! whole load; the caller gets the skip count back in [`LoadSummary`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::core::pack_argb;
use crate::error::FadeloopResult;
use crate::gallery::{Gallery, SourceImage};

/// File extensions the folder scan accepts, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Lists image files directly inside `folder`, sorted by file name so playback
/// order is stable across platforms.
pub fn scan_folder(folder: &Path) -> FadeloopResult<Vec<PathBuf>> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("reading image folder {}", folder.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", folder.display()))?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Decodes one image into packed `0xAARRGGBB` pixels.
pub fn load_image(path: &Path) -> FadeloopResult<SourceImage> {
    let decoded =
        image::open(path).with_context(|| format!("decoding image {}", path.display()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .as_raw()
        .chunks_exact(4)
        .map(|px| pack_argb(px[3], px[0], px[1], px[2]))
        .collect();
    SourceImage::new(width, height, pixels)
}

/// Scans and decodes a folder. Unreadable images are skipped with a warning;
/// only an empty result is fatal, surfaced by [`Gallery::from_sources`].
pub fn load_folder(folder: &Path) -> FadeloopResult<(Vec<SourceImage>, LoadSummary)> {
    let paths = scan_folder(folder)?;
    let mut sources = Vec::with_capacity(paths.len());
    let mut summary = LoadSummary::default();
    for path in &paths {
        match load_image(path) {
            Ok(src) => {
                debug!(path = %path.display(), width = src.width, height = src.height, "loaded image");
                sources.push(src);
                summary.loaded += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable image");
                summary.skipped += 1;
            }
        }
    }
    Ok((sources, summary))
}

/// Convenience wrapper: scan, decode, and normalize in one call.
pub fn load_gallery(folder: &Path) -> FadeloopResult<(Gallery, LoadSummary)> {
    let (sources, summary) = load_folder(folder)?;
    let gallery = Gallery::from_sources(sources)?;
    Ok((gallery, summary))
}
