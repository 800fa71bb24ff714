//! Comment texts and colours the spawner samples from.
//!
//! Both lists must be non-empty; the constructors reject empty input so the
//! spawner can always sample. Built-in defaults are used when nothing is
//! configured.
//!
//! # Comment files
//!
//! Either a bare JSON array or an object with a `comments` array:
//!
//! ```json
//! ["first!", "so smooth", "666"]
//! ```
//!
//! # Palette strings
//!
//! Comma-separated hex colours, `RRGGBB` or `RRGGBBAA`, with an optional
//! leading `#`: `FFFFFF, FF6B6B, #4ECDC480`.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use raylib::prelude::Color;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_COMMENTS: &[&str] = &[
    "前方高能",
    "哈哈哈哈哈哈",
    "awsl",
    "名场面",
    "泪目",
    "第一次看，有点懵",
    "this is fine",
    "first!",
    "2333333",
    "again!",
    "好听",
    "up主辛苦了",
    "so smooth",
    "打卡",
    "弹幕护体",
    "gg",
    "太真实了",
    "爷青回",
];

const DEFAULT_PALETTE: &[(u8, u8, u8)] = &[
    (0xFF, 0xFF, 0xFF),
    (0xFF, 0x6B, 0x6B),
    (0x4E, 0xCD, 0xC4),
    (0xFF, 0xE6, 0x6D),
    (0xA2, 0x9B, 0xFE),
    (0x55, 0xEF, 0xC4),
    (0xFD, 0x79, 0xA8),
    (0x74, 0xB9, 0xFF),
];

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid comment file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} list is empty")]
    Empty(&'static str),
    #[error("invalid colour {0:?}, expected RRGGBB or RRGGBBAA")]
    BadColor(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CommentFile {
    List(Vec<String>),
    Object { comments: Vec<String> },
}

/// Candidate comment texts.
#[derive(Resource, Debug, Clone)]
pub struct ContentSource {
    texts: Vec<String>,
}

impl Default for ContentSource {
    fn default() -> Self {
        Self {
            texts: DEFAULT_COMMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ContentSource {
    /// Build from `texts`, dropping blank entries.
    pub fn new(texts: Vec<String>) -> Result<Self, ContentError> {
        let texts: Vec<String> = texts
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            return Err(ContentError::Empty("comment"));
        }
        Ok(Self { texts })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let texts = match serde_json::from_str::<CommentFile>(json)? {
            CommentFile::List(texts) => texts,
            CommentFile::Object { comments } => comments,
        };
        Self::new(texts)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Pick one text uniformly.
    pub fn sample(&self, rng: &mut Rng) -> &str {
        &self.texts[rng.usize(0..self.texts.len())]
    }
}

/// Candidate comment colours.
#[derive(Resource, Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|&(r, g, b)| Color::new(r, g, b, 255))
                .collect(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, ContentError> {
        if colors.is_empty() {
            return Err(ContentError::Empty("palette"));
        }
        Ok(Self { colors })
    }

    /// Parse a comma-separated list of hex colours.
    pub fn parse_list(list: &str) -> Result<Self, ContentError> {
        let colors = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_hex_color)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Pick one colour uniformly.
    pub fn sample(&self, rng: &mut Rng) -> Color {
        self.colors[rng.usize(0..self.colors.len())]
    }

    /// Format as the comma-separated list accepted by [`Palette::parse_list`].
    pub fn to_list(&self) -> String {
        self.colors
            .iter()
            .map(|c| {
                if c.a == 255 {
                    format!("{:02X}{:02X}{:02X}", c.r, c.g, c.b)
                } else {
                    format!("{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
pub fn parse_hex_color(s: &str) -> Result<Color, ContentError> {
    let bad = || ContentError::BadColor(s.to_string());
    let hex = s.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok(Color::new(byte(0)?, byte(2)?, byte(4)?, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_non_empty() {
        assert!(!ContentSource::default().is_empty());
        assert!(!Palette::default().colors().is_empty());
    }

    #[test]
    fn empty_content_is_rejected() {
        let err = ContentSource::new(vec!["  ".into(), String::new()]).unwrap_err();
        assert!(matches!(err, ContentError::Empty("comment")));
    }

    #[test]
    fn json_array_and_object_forms_parse() {
        let list = ContentSource::from_json_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list.texts(), &["a".to_string(), "b".to_string()]);

        let obj = ContentSource::from_json_str(r#"{"comments": ["  c  "]}"#).unwrap();
        assert_eq!(obj.texts(), &["c".to_string()]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ContentSource::from_json_str("{nope").unwrap_err();
        assert!(matches!(err, ContentError::Json(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ContentSource::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn sample_only_returns_known_text() {
        let source = ContentSource::new(vec!["x".into(), "y".into()]).unwrap();
        let mut rng = Rng::with_seed(3);
        for _ in 0..50 {
            let text = source.sample(&mut rng);
            assert!(text == "x" || text == "y");
        }
    }

    #[test]
    fn hex_colors_parse() {
        let c = parse_hex_color("#FF8000").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 0, 255));
        let c = parse_hex_color("00000080").unwrap();
        assert_eq!(c.a, 128);
    }

    #[test]
    fn bad_hex_colors_are_rejected() {
        assert!(parse_hex_color("FFF").is_err());
        assert!(parse_hex_color("GGGGGG").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn palette_list_round_trips_through_to_list() {
        let palette = Palette::parse_list("FFFFFF, #FF6B6B, 4ECDC480").unwrap();
        assert_eq!(palette.colors().len(), 3);
        assert_eq!(palette.to_list(), "FFFFFF, FF6B6B, 4ECDC480");
    }

    #[test]
    fn empty_palette_list_is_rejected() {
        assert!(matches!(
            Palette::parse_list(" , "),
            Err(ContentError::Empty("palette"))
        ));
    }
}
