//! Font resolution with a process-wide cache.
//!
//! TrueType fonts are looked up from `RECEIPTGEN_FONTS_DIR` first, then a
//! short list of common system locations. Resolution failure is handled per
//! an explicit policy: fall back to the embedded bitmap font, or surface an
//! error.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rusttype::Font;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse font {0}")]
    Parse(String),
    #[error("no usable font found and fallback is disabled")]
    NoFont,
}

/// What to do when no TrueType font resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Use the embedded bitmap font, silently.
    #[default]
    Builtin,
    /// Surface [`FontError::NoFont`].
    Error,
}

impl FallbackPolicy {
    /// `RECEIPTGEN_FONT_FALLBACK=error` opts into strict mode.
    pub fn from_env() -> Self {
        match std::env::var("RECEIPTGEN_FONT_FALLBACK").as_deref() {
            Ok("error") | Ok("strict") => FallbackPolicy::Error,
            _ => FallbackPolicy::Builtin,
        }
    }
}

/// A resolved text face the renderer can draw with.
#[derive(Clone)]
pub enum FontHandle {
    Truetype(Arc<Font<'static>>),
    Builtin,
}

static FONT_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Font<'static>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn load_font_cached(path: &Path) -> Result<Arc<Font<'static>>, FontError> {
    if let Some(f) = FONT_CACHE.lock().get(path) {
        return Ok(Arc::clone(f));
    }

    let bytes = std::fs::read(path).map_err(|source| FontError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let f = Font::try_from_vec(bytes)
        .ok_or_else(|| FontError::Parse(path.display().to_string()))?;

    let f = Arc::new(f);
    FONT_CACHE.lock().insert(path.to_path_buf(), Arc::clone(&f));
    Ok(f)
}

/// Candidate font files, most specific first. The env override directory is
/// scanned in sorted order so resolution stays deterministic.
fn candidate_paths() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Ok(dir) = std::env::var("RECEIPTGEN_FONTS_DIR") {
        if let Ok(entries) = std::fs::read_dir(&dir) {
            let mut files: Vec<PathBuf> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    matches!(
                        p.extension().and_then(|e| e.to_str()),
                        Some("ttf") | Some("otf")
                    )
                })
                .collect();
            files.sort();
            out.extend(files);
        }
    }
    out.extend(
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/Library/Fonts/Arial.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .into_iter()
        .map(PathBuf::from),
    );
    out
}

/// Resolve a drawable font handle. Tries each candidate path in order; when
/// none parses, the policy decides between the embedded bitmap font and an
/// error.
pub fn resolve(policy: FallbackPolicy) -> Result<FontHandle, FontError> {
    for path in candidate_paths() {
        if !path.is_file() {
            continue;
        }
        if let Ok(f) = load_font_cached(&path) {
            return Ok(FontHandle::Truetype(f));
        }
    }
    match policy {
        FallbackPolicy::Builtin => Ok(FontHandle::Builtin),
        FallbackPolicy::Error => Err(FontError::NoFont),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_builtin() {
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::Builtin);
    }

    #[test]
    fn builtin_policy_always_yields_a_handle() {
        // Whatever fonts the host has, Builtin policy cannot fail.
        assert!(resolve(FallbackPolicy::Builtin).is_ok());
    }
}
