use std::path::{Path, PathBuf};

use log::info;

use crate::error::CaveError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FontFormat {
    TrueType,
    OpenType,
    Collection,
}

impl FontFormat {
    /// Identifies an sfnt container from its leading tag.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        let tag: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        match &tag {
            b"\x00\x01\x00\x00" | b"true" => Some(FontFormat::TrueType),
            b"OTTO" => Some(FontFormat::OpenType),
            b"ttcf" => Some(FontFormat::Collection),
            _ => None,
        }
    }
}

/// The font the game refuses to start without.
#[derive(Clone, Debug)]
pub struct FontAsset {
    pub path: PathBuf,
    pub format: FontFormat,
    pub byte_len: usize,
}

impl FontAsset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CaveError> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| CaveError::FontMissing {
            path: path.clone(),
            source,
        })?;
        let format =
            FontFormat::sniff(&bytes).ok_or_else(|| CaveError::FontFormat { path: path.clone() })?;
        info!(
            "Loaded font {} ({:?}, {} bytes)",
            path.display(),
            format,
            bytes.len()
        );
        Ok(Self {
            path,
            format,
            byte_len: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cave-escape-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write scratch font");
        path
    }

    #[test]
    fn sniff_recognises_sfnt_tags() {
        assert_eq!(
            FontFormat::sniff(&[0x00, 0x01, 0x00, 0x00, 0x00]),
            Some(FontFormat::TrueType)
        );
        assert_eq!(FontFormat::sniff(b"true...."), Some(FontFormat::TrueType));
        assert_eq!(FontFormat::sniff(b"OTTO"), Some(FontFormat::OpenType));
        assert_eq!(FontFormat::sniff(b"ttcf"), Some(FontFormat::Collection));
        assert_eq!(FontFormat::sniff(b"PK\x03\x04"), None);
        assert_eq!(FontFormat::sniff(b"OT"), None);
    }

    #[test]
    fn missing_font_is_reported() {
        let err = FontAsset::load("definitely-not-here/arial.ttf").unwrap_err();
        assert!(matches!(err, CaveError::FontMissing { .. }));
        assert!(err.to_string().contains("arial.ttf"));
    }

    #[test]
    fn garbage_font_is_rejected() {
        let path = scratch_file("garbage.ttf", b"not a font at all");
        let err = FontAsset::load(&path).unwrap_err();
        assert!(matches!(err, CaveError::FontFormat { .. }));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn truetype_font_loads() {
        let mut bytes = vec![0x00, 0x01, 0x00, 0x00];
        bytes.extend_from_slice(&[0u8; 60]);
        let path = scratch_file("good.ttf", &bytes);
        let font = FontAsset::load(&path).expect("font loads");
        assert_eq!(font.format, FontFormat::TrueType);
        assert_eq!(font.byte_len, 64);
        let _ = std::fs::remove_file(path);
    }
}
