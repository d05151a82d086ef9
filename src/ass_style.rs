/*!
 * ASS style descriptors.
 *
 * Builds the base style from built-in defaults or a `key=value` override set,
 * and derives positional variants (left, right, bottom) from it.
 */

use std::fmt;
use std::str::FromStr;
use log::warn;
use crate::app_config::CustomConfig;
use crate::errors::OverrideError;

/// Numpad alignment codes used by the merge layouts
pub mod alignment {
    pub const BOTTOM_LEFT: i32 = 1;
    pub const BOTTOM_CENTER: i32 = 2;
    pub const BOTTOM_RIGHT: i32 = 3;
}

/// RGBA color. Alpha 0 is opaque, 255 fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parse `R,G,B,A` with each component in 0..=255
    pub fn parse(value: &str) -> Option<Self> {
        let parts = value.split(',')
            .map(|part| part.trim().parse::<u8>().ok())
            .collect::<Option<Vec<u8>>>()?;

        match parts.as_slice() {
            [r, g, b, a] => Some(Color::new(*r, *g, *b, *a)),
            _ => None,
        }
    }
}

/// Formats as `&HAABBGGRR`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&H{:02X}{:02X}{:02X}{:02X}", self.a, self.b, self.g, self.r)
    }
}

const DEFAULT_FONT_NAME: &str = "Roboto Medium";
const DEFAULT_PRIMARY: Color = Color::new(255, 255, 255, 0);
const DEFAULT_SECONDARY: Color = Color::new(0, 0, 255, 0);
const DEFAULT_OUTLINE: Color = Color::new(19, 7, 2, 0);
const DEFAULT_BACK: Color = Color::new(0, 0, 0, 0);

/// Rendering attributes of one named ASS style
#[derive(Debug, Clone, PartialEq)]
pub struct AssStyle {
    pub font_name: String,
    pub font_size: u32,
    pub primary_color: Color,
    pub secondary_color: Color,
    pub outline_color: Color,
    pub back_color: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    pub spacing: f64,
    pub angle: f64,
    pub border_style: i32,
    pub outline: f64,
    pub shadow: f64,
    pub alignment: i32,
    pub margin_l: i32,
    pub margin_r: i32,
    pub margin_v: i32,
    pub encoding: i32,
}

/// Fields a derived style replaces; `None` keeps the base value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    pub alignment: Option<i32>,
    pub margin_l: Option<i32>,
    pub margin_r: Option<i32>,
}

impl AssStyle {
    /// Built-in default style at the given font size
    pub fn default_with_size(font_size: u32) -> Self {
        AssStyle {
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size,
            primary_color: DEFAULT_PRIMARY,
            secondary_color: DEFAULT_SECONDARY,
            outline_color: DEFAULT_OUTLINE,
            back_color: DEFAULT_BACK,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
            border_style: 1,
            outline: 1.3,
            shadow: 0.0,
            alignment: alignment::BOTTOM_CENTER,
            margin_l: 20,
            margin_r: 20,
            margin_v: 23,
            encoding: 1,
        }
    }

    /// Build the base style.
    ///
    /// Without overrides this is the built-in default at `base_font_size`. With
    /// overrides every present field replaces its default; `fontsize` falls back
    /// to `base_font_size`. A malformed color only resets that color. Any other
    /// malformed field discards the whole override set with a warning.
    pub fn build(overrides: Option<&CustomConfig>, base_font_size: u32) -> Self {
        let Some(overrides) = overrides else {
            return Self::default_with_size(base_font_size);
        };

        match Self::apply_overrides(overrides, base_font_size) {
            Ok(style) => style,
            Err(e) => {
                warn!("Error applying custom style: {}. Using defaults.", e);
                Self::default_with_size(base_font_size)
            }
        }
    }

    fn apply_overrides(overrides: &CustomConfig, base_font_size: u32) -> Result<Self, OverrideError> {
        let defaults = Self::default_with_size(base_font_size);

        Ok(AssStyle {
            font_name: overrides.get("fontname").unwrap_or(DEFAULT_FONT_NAME).to_string(),
            font_size: field(overrides, "fontsize", defaults.font_size)?,
            primary_color: color_field(overrides, "primarycolor", DEFAULT_PRIMARY),
            secondary_color: color_field(overrides, "secondarycolor", DEFAULT_SECONDARY),
            outline_color: color_field(overrides, "outlinecolor", DEFAULT_OUTLINE),
            back_color: color_field(overrides, "backcolor", DEFAULT_BACK),
            bold: flag_field(overrides, "bold")?,
            italic: flag_field(overrides, "italic")?,
            underline: flag_field(overrides, "underline")?,
            strikeout: flag_field(overrides, "strikeout")?,
            scale_x: field(overrides, "scalex", defaults.scale_x)?,
            scale_y: field(overrides, "scaley", defaults.scale_y)?,
            spacing: field(overrides, "spacing", defaults.spacing)?,
            angle: field(overrides, "angle", defaults.angle)?,
            border_style: field(overrides, "borderstyle", defaults.border_style)?,
            outline: field(overrides, "outline", defaults.outline)?,
            shadow: field(overrides, "shadow", defaults.shadow)?,
            alignment: field(overrides, "alignment", defaults.alignment)?,
            margin_l: field(overrides, "marginl", defaults.margin_l)?,
            margin_r: field(overrides, "marginr", defaults.margin_r)?,
            margin_v: field(overrides, "marginv", defaults.margin_v)?,
            encoding: field(overrides, "encoding", defaults.encoding)?,
        })
    }

    /// New style copying every field of `self` except the overridden ones
    pub fn derive(&self, overrides: StyleOverrides) -> Self {
        AssStyle {
            alignment: overrides.alignment.unwrap_or(self.alignment),
            margin_l: overrides.margin_l.unwrap_or(self.margin_l),
            margin_r: overrides.margin_r.unwrap_or(self.margin_r),
            ..self.clone()
        }
    }

    /// Render as a `Style:` line of the `[V4+ Styles]` section
    pub fn to_ass_line(&self, name: &str) -> String {
        format!(
            "Style: {},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            name,
            self.font_name,
            self.font_size,
            self.primary_color,
            self.secondary_color,
            self.outline_color,
            self.back_color,
            ass_bool(self.bold),
            ass_bool(self.italic),
            ass_bool(self.underline),
            ass_bool(self.strikeout),
            ass_number(self.scale_x),
            ass_number(self.scale_y),
            ass_number(self.spacing),
            ass_number(self.angle),
            self.border_style,
            ass_number(self.outline),
            ass_number(self.shadow),
            self.alignment,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.encoding,
        )
    }
}

fn field<T: FromStr>(overrides: &CustomConfig, key: &str, default: T) -> Result<T, OverrideError> {
    match overrides.get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| OverrideError::InvalidField {
            field: key.to_string(),
            value: value.to_string(),
        }),
    }
}

// Flags are written as integers; any non-zero value is true
fn flag_field(overrides: &CustomConfig, key: &str) -> Result<bool, OverrideError> {
    field::<i64>(overrides, key, 0).map(|value| value != 0)
}

fn color_field(overrides: &CustomConfig, key: &str, default: Color) -> Color {
    match overrides.get(key) {
        None => default,
        Some(value) => Color::parse(value).unwrap_or_else(|| {
            warn!("Invalid color '{}' for {}, using default", value, key);
            default
        }),
    }
}

fn ass_bool(value: bool) -> i32 {
    if value { -1 } else { 0 }
}

// Whole numbers print without a fractional part ("100", not "100.0")
fn ass_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
