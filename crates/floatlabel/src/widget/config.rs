//! Widget configuration and its change policy.
//!
//! [`WidgetConfig`] holds every visual parameter of a
//! [`PlaceholderTextEdit`](crate::widget::widgets::PlaceholderTextEdit). Each
//! field belongs to a [`ConfigField`], and each field maps to exactly one
//! [`ChangeEffect`]: structural fields (font sizes, placeholder text) rebuild
//! their sub-element from scratch, all others only schedule a layout pass.
//!
//! Configurations are serializable, so a widget can be restored from a TOML
//! UI description:
//!
//! ```
//! use floatlabel::widget::WidgetDescription;
//!
//! let desc = WidgetDescription::from_toml_str(r##"
//!     text = "hello"
//!     placeholder_text = "Comment"
//!     max_text_length = 140
//!     separator_enabled = true
//!     separator_color = "#FF0000"
//! "##).unwrap();
//! assert_eq!(desc.config.max_text_length, 140);
//! assert_eq!(desc.config.placeholder_offset_y, 20.0);
//! ```

use std::path::Path;

use floatlabel_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::font::SYSTEM_FONT_SIZE;
use crate::types::{Color, HorizontalAlign};

/// Visual parameters of the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub placeholder_text: String,
    pub placeholder_font_size: f32,
    pub placeholder_color: Color,
    pub placeholder_alignment: HorizontalAlign,
    /// Vertical offset of the placeholder while it rests inside the field.
    pub placeholder_offset_y: f32,
    pub text_font_size: f32,
    pub text_color: Color,
    /// Upper bound on the text length, in grapheme clusters.
    pub max_text_length: usize,
    pub text_alignment: HorizontalAlign,
    /// Line count at which the field stops growing and starts scrolling.
    pub max_lines_before_scroll: usize,
    pub separator_enabled: bool,
    pub separator_color: Color,
    pub separator_height: f32,
    pub separator_offset_x: f32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            placeholder_text: String::new(),
            placeholder_font_size: SYSTEM_FONT_SIZE,
            placeholder_color: Color::from_rgb8(128, 128, 128),
            placeholder_alignment: HorizontalAlign::Left,
            placeholder_offset_y: 20.0,
            text_font_size: SYSTEM_FONT_SIZE,
            text_color: Color::WHITE,
            max_text_length: 1024,
            text_alignment: HorizontalAlign::Left,
            max_lines_before_scroll: 5,
            separator_enabled: false,
            separator_color: Color::from_rgb8(166, 166, 166),
            separator_height: 1.0,
            separator_offset_x: 0.0,
        }
    }
}

/// Identifies one field of [`WidgetConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    PlaceholderText,
    PlaceholderFontSize,
    PlaceholderColor,
    PlaceholderAlignment,
    PlaceholderOffsetY,
    TextFontSize,
    TextColor,
    MaxTextLength,
    TextAlignment,
    MaxLinesBeforeScroll,
    SeparatorEnabled,
    SeparatorColor,
    SeparatorHeight,
    SeparatorOffsetX,
}

/// A sub-element of the widget that can be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubElement {
    TextSurface,
    Placeholder,
    Separator,
}

/// What writing a configuration field does to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEffect {
    /// Discard the sub-element and construct a new one.
    Rebuild(SubElement),
    /// Keep every sub-element and request a layout pass.
    Relayout,
}

impl ConfigField {
    /// The effect of writing this field.
    pub fn effect(self) -> ChangeEffect {
        match self {
            ConfigField::PlaceholderText | ConfigField::PlaceholderFontSize => {
                ChangeEffect::Rebuild(SubElement::Placeholder)
            }
            ConfigField::TextFontSize => ChangeEffect::Rebuild(SubElement::TextSurface),
            _ => ChangeEffect::Relayout,
        }
    }
}

/// A partial configuration: every `Some` field is written.
///
/// Deserializes from the same keys as [`WidgetConfig`], with missing keys
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub placeholder_text: Option<String>,
    pub placeholder_font_size: Option<f32>,
    pub placeholder_color: Option<Color>,
    pub placeholder_alignment: Option<HorizontalAlign>,
    pub placeholder_offset_y: Option<f32>,
    pub text_font_size: Option<f32>,
    pub text_color: Option<Color>,
    pub max_text_length: Option<usize>,
    pub text_alignment: Option<HorizontalAlign>,
    pub max_lines_before_scroll: Option<usize>,
    pub separator_enabled: Option<bool>,
    pub separator_color: Option<Color>,
    pub separator_height: Option<f32>,
    pub separator_offset_x: Option<f32>,
}

impl ConfigPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a patch from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

macro_rules! apply_fields {
    ($config:expr, $patch:expr, $written:ident; $($field:ident => $variant:ident),* $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $config.$field = value;
                $written.push(ConfigField::$variant);
            }
        )*
    };
}

impl WidgetConfig {
    /// Write every `Some` field of `patch`, returning the written fields in
    /// declaration order.
    ///
    /// A field counts as written even if its new value equals the old one.
    pub fn apply(&mut self, patch: ConfigPatch) -> Vec<ConfigField> {
        let mut written = Vec::new();
        apply_fields!(self, patch, written;
            placeholder_text => PlaceholderText,
            placeholder_font_size => PlaceholderFontSize,
            placeholder_color => PlaceholderColor,
            placeholder_alignment => PlaceholderAlignment,
            placeholder_offset_y => PlaceholderOffsetY,
            text_font_size => TextFontSize,
            text_color => TextColor,
            max_text_length => MaxTextLength,
            text_alignment => TextAlignment,
            max_lines_before_scroll => MaxLinesBeforeScroll,
            separator_enabled => SeparatorEnabled,
            separator_color => SeparatorColor,
            separator_height => SeparatorHeight,
            separator_offset_x => SeparatorOffsetX,
        );
        tracing::debug!(target: targets::CONFIG, fields = ?written, "applied config patch");
        written
    }
}

/// A serialized widget: its configuration plus initial text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescription {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub config: WidgetConfig,
}

impl WidgetDescription {
    /// Parse a description from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Encode this description as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Read a description from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading widget description");
        Self::from_toml_str(&source)
    }

    /// Write this description to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let encoded = self.to_toml_string()?;
        std::fs::write(path, encoded).map_err(|e| Error::io(path, e))
    }
}
