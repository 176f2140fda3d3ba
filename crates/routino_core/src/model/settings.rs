//! Process-wide editor settings.
//!
//! # Responsibility
//! - Hold the toolbar/status-bar toggles shared by every note.
//! - Validate values picked from the fixed toolbar catalogues.
//!
//! # Invariants
//! - Settings are not per-note and are never persisted across restarts.
//! - `font_size` is always one of `SUPPORTED_FONT_SIZES`.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Font sizes offered by the toolbar, in pixels.
pub const SUPPORTED_FONT_SIZES: &[u16] = &[12, 14, 16, 18, 20, 24];
pub const DEFAULT_FONT_SIZE: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Default,
    Arial,
    TimesNewRoman,
    CourierNew,
    Georgia,
}

impl FontFamily {
    /// CSS font stack handed to the rendering host.
    pub fn css_stack(self) -> &'static str {
        match self {
            Self::Default => "'Segoe UI', Tahoma, Geneva, Verdana, sans-serif",
            Self::Arial => "Arial, sans-serif",
            Self::TimesNewRoman => "'Times New Roman', serif",
            Self::CourierNew => "'Courier New', monospace",
            Self::Georgia => "Georgia, serif",
        }
    }

    /// Toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Arial => "Arial",
            Self::TimesNewRoman => "Times New Roman",
            Self::CourierNew => "Courier New",
            Self::Georgia => "Georgia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Editor-wide toggles and typography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    pub blur_enabled: bool,
    pub font_family: FontFamily,
    #[serde(deserialize_with = "deserialize_font_size")]
    font_size: u16,
    pub text_align: TextAlign,
    pub todo_mode: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            blur_enabled: true,
            font_family: FontFamily::Default,
            font_size: DEFAULT_FONT_SIZE,
            text_align: TextAlign::Left,
            todo_mode: false,
        }
    }
}

impl EditorSettings {
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Sets the font size.
    ///
    /// # Errors
    /// - Returns `UnsupportedFontSize` when `px` is not in the toolbar list;
    ///   the current size is kept.
    pub fn set_font_size(&mut self, px: u16) -> Result<(), SettingsError> {
        if !SUPPORTED_FONT_SIZES.contains(&px) {
            return Err(SettingsError::UnsupportedFontSize(px));
        }
        self.font_size = px;
        Ok(())
    }
}

fn deserialize_font_size<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let px = u16::deserialize(deserializer)?;
    if SUPPORTED_FONT_SIZES.contains(&px) {
        Ok(px)
    } else {
        Err(de::Error::custom(SettingsError::UnsupportedFontSize(px)))
    }
}

/// Settings validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    UnsupportedFontSize(u16),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFontSize(px) => write!(
                f,
                "font size {px}px is unsupported; expected one of {SUPPORTED_FONT_SIZES:?}"
            ),
        }
    }
}

impl Error for SettingsError {}
