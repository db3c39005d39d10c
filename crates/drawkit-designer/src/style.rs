//! Colors, pens, brushes, fonts and text alignment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use drawkit_core::Error;

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// `#RRGGBB` for opaque colors, `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Dash pattern of a pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PenStyle {
    /// Nothing is stroked.
    NoPen,
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl PenStyle {
    pub fn token(self) -> &'static str {
        match self {
            PenStyle::NoPen => "none",
            PenStyle::Solid => "solid",
            PenStyle::Dash => "dash",
            PenStyle::Dot => "dot",
            PenStyle::DashDot => "dash-dot",
            PenStyle::DashDotDot => "dash-dot-dot",
        }
    }
}

impl FromStr for PenStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PenStyle::NoPen),
            "solid" => Ok(PenStyle::Solid),
            "dash" => Ok(PenStyle::Dash),
            "dot" => Ok(PenStyle::Dot),
            "dash-dot" => Ok(PenStyle::DashDot),
            "dash-dot-dot" => Ok(PenStyle::DashDotDot),
            _ => Err(Error::other(format!("Unknown pen style: {}", s))),
        }
    }
}

/// Stroke settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
    pub style: PenStyle,
}

impl Pen {
    pub fn new(color: Color, width: f64, style: PenStyle) -> Self {
        Self {
            color,
            width,
            style,
        }
    }

    pub fn solid(color: Color, width: f64) -> Self {
        Self::new(color, width, PenStyle::Solid)
    }

    pub fn none() -> Self {
        Self::new(Color::black(), 1.0, PenStyle::NoPen)
    }

    /// False for `NoPen` and fully transparent pens.
    pub fn is_visible(&self) -> bool {
        self.style != PenStyle::NoPen && !self.color.is_transparent()
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_style(mut self, style: PenStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for Pen {
    fn default() -> Self {
        Pen::solid(Color::black(), 1.0)
    }
}

/// Fill settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    pub color: Color,
}

impl Brush {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn none() -> Self {
        Self::new(Color::transparent())
    }

    /// A brush only paints when its alpha is non-zero.
    pub fn is_visible(&self) -> bool {
        !self.color.is_transparent()
    }
}

impl Default for Brush {
    fn default() -> Self {
        Brush::new(Color::white())
    }
}

/// Text font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 12.0,
            bold: false,
            italic: false,
            underline: false,
            strike_out: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

impl HorizontalAlignment {
    pub fn token(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl VerticalAlignment {
    pub fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Text alignment inside its layout rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Alignment {
    pub fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}
