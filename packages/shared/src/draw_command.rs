//! Draw Command: one drawing primitive issued by the turn holder.
//!
//! A `DrawCommand` travels as the JSON payload of a `DRAW` line:
//!
//! ```text
//! DRAW {"x1":10,"y1":10,"x2":50,"y2":40,"thickness":3,"colourHex":"#ff0000","shape":"rect","filled":false}
//! ```
//!
//! The server validates the payload before applying it and relays the
//! received line verbatim, so clients never see a re-serialized form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while decoding or validating a draw command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawCommandError {
    #[error("invalid draw payload: {0}")]
    InvalidPayload(String),

    #[error("invalid colour '{0}', expected #rrggbb")]
    InvalidColour(String),

    #[error("invalid shape '{0}'")]
    InvalidShape(String),

    #[error("thickness must be positive")]
    InvalidThickness,
}

/// Stroke colour, carried on the wire as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Colour {
    type Err = DrawCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DrawCommandError::InvalidColour(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Colour {
    type Error = DrawCommandError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The kind of primitive a draw command renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Shape {
    /// One freehand segment between two consecutive pointer samples
    Pencil,
    Line,
    Rect,
    Circle,
    /// Literal text anchored at `(x1, y1)`
    Text(String),
}

impl Shape {
    const TEXT_PREFIX: &'static str = "text:";

    /// Whether the `filled` flag applies to this shape.
    pub fn is_closed(&self) -> bool {
        matches!(self, Shape::Rect | Shape::Circle)
    }
}

impl FromStr for Shape {
    type Err = DrawCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pencil" => Ok(Shape::Pencil),
            "line" => Ok(Shape::Line),
            "rect" => Ok(Shape::Rect),
            "circle" => Ok(Shape::Circle),
            other => other
                .strip_prefix(Self::TEXT_PREFIX)
                .map(|literal| Shape::Text(literal.to_string()))
                .ok_or_else(|| DrawCommandError::InvalidShape(other.to_string())),
        }
    }
}

impl TryFrom<String> for Shape {
    type Error = DrawCommandError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> Self {
        shape.to_string()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Pencil => f.write_str("pencil"),
            Shape::Line => f.write_str("line"),
            Shape::Rect => f.write_str("rect"),
            Shape::Circle => f.write_str("circle"),
            Shape::Text(literal) => write!(f, "{}{}", Self::TEXT_PREFIX, literal),
        }
    }
}

/// One drawing primitive. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub thickness: u32,
    #[serde(rename = "colourHex", alias = "colour")]
    pub colour: Colour,
    pub shape: Shape,
    #[serde(default)]
    pub filled: bool,
}

impl DrawCommand {
    pub fn new(
        shape: Shape,
        start: (i32, i32),
        end: (i32, i32),
        colour: Colour,
        thickness: u32,
        filled: bool,
    ) -> Self {
        Self {
            x1: start.0,
            y1: start.1,
            x2: end.0,
            y2: end.1,
            thickness,
            colour,
            shape,
            filled,
        }
    }

    /// Decode and validate a `DRAW` payload.
    pub fn from_json(payload: &str) -> Result<Self, DrawCommandError> {
        let command: DrawCommand = serde_json::from_str(payload)
            .map_err(|e| DrawCommandError::InvalidPayload(e.to_string()))?;
        command.validate()?;
        Ok(command)
    }

    /// Encode as a `DRAW` payload.
    pub fn to_json(&self) -> Result<String, DrawCommandError> {
        serde_json::to_string(self).map_err(|e| DrawCommandError::InvalidPayload(e.to_string()))
    }

    fn validate(&self) -> Result<(), DrawCommandError> {
        if self.thickness == 0 {
            return Err(DrawCommandError::InvalidThickness);
        }
        Ok(())
    }
}
