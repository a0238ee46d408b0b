//! Prompt input parsing.
//!
//! Lines starting with `/` are slash commands; everything else is chat.
//!
//! | Input | Effect |
//! |---|---|
//! | `/end` | `ENDTURN` |
//! | `/clear` | `CLEAR` |
//! | `/line x1 y1 x2 y2`, `/pencil x1 y1 x2 y2` | stroked segment |
//! | `/rect x1 y1 x2 y2 [fill]`, `/circle x1 y1 x2 y2 [fill]` | box-bounded shape |
//! | `/text x y <literal>` | text anchored at `(x, y)` |
//! | `/colour #rrggbb`, `/thickness n` | change the pen |
//! | `/quit` | leave |

use std::str::FromStr;

use thiserror::Error;
use turnboard_shared::{
    ClientCommand, DrawCommand, DrawCommandError, Shape,
    draw_command::Colour,
};

const DEFAULT_THICKNESS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command '{0}', try /line /rect /circle /pencil /text /colour /thickness /end /clear /quit")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error(transparent)]
    DrawCommand(#[from] DrawCommandError),
}

/// Colour and thickness applied to the next draw commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub colour: Colour,
    pub thickness: u32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            colour: Colour::BLACK,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

/// What a prompt line asks the client to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Send(ClientCommand),
    SetPen(Pen),
    Quit,
}

/// Parse one prompt line using the current pen for draw commands.
pub fn parse_input(line: &str, pen: &Pen) -> Result<InputAction, InputError> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(InputAction::Send(ClientCommand::Chat(line.to_string())));
    };

    let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
    let args = args.trim();
    match name {
        "end" => Ok(InputAction::Send(ClientCommand::EndTurn)),
        "clear" => Ok(InputAction::Send(ClientCommand::Clear)),
        "quit" => Ok(InputAction::Quit),
        "line" => segment(Shape::Line, args, pen, "/line x1 y1 x2 y2"),
        "pencil" => segment(Shape::Pencil, args, pen, "/pencil x1 y1 x2 y2"),
        "rect" => boxed(Shape::Rect, args, pen, "/rect x1 y1 x2 y2 [fill]"),
        "circle" => boxed(Shape::Circle, args, pen, "/circle x1 y1 x2 y2 [fill]"),
        "text" => text(args, pen),
        "colour" | "color" => {
            let colour = Colour::from_str(args)?;
            Ok(InputAction::SetPen(Pen { colour, ..*pen }))
        }
        "thickness" => {
            let thickness: u32 = args
                .parse()
                .map_err(|_| InputError::InvalidNumber(args.to_string()))?;
            if thickness == 0 {
                return Err(DrawCommandError::InvalidThickness.into());
            }
            Ok(InputAction::SetPen(Pen { thickness, ..*pen }))
        }
        other => Err(InputError::UnknownCommand(format!("/{}", other))),
    }
}

fn segment(shape: Shape, args: &str, pen: &Pen, usage: &'static str) -> Result<InputAction, InputError> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let [x1, y1, x2, y2] = words.as_slice() else {
        return Err(InputError::Usage(usage));
    };
    draw(shape, (number(x1)?, number(y1)?), (number(x2)?, number(y2)?), pen, false)
}

fn boxed(shape: Shape, args: &str, pen: &Pen, usage: &'static str) -> Result<InputAction, InputError> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let (coords, filled) = match words.as_slice() {
        [coords @ .., "fill"] => (coords, true),
        coords => (coords, false),
    };
    let [x1, y1, x2, y2] = coords else {
        return Err(InputError::Usage(usage));
    };
    draw(shape, (number(x1)?, number(y1)?), (number(x2)?, number(y2)?), pen, filled)
}

fn text(args: &str, pen: &Pen) -> Result<InputAction, InputError> {
    const USAGE: &str = "/text x y <text>";
    let mut parts = args.splitn(3, ' ');
    let (Some(x), Some(y), Some(literal)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InputError::Usage(USAGE));
    };
    if literal.trim().is_empty() {
        return Err(InputError::Usage(USAGE));
    }
    let anchor = (number(x)?, number(y)?);
    draw(Shape::Text(literal.to_string()), anchor, anchor, pen, false)
}

fn draw(
    shape: Shape,
    start: (i32, i32),
    end: (i32, i32),
    pen: &Pen,
    filled: bool,
) -> Result<InputAction, InputError> {
    let payload = DrawCommand::new(shape, start, end, pen.colour, pen.thickness, filled).to_json()?;
    Ok(InputAction::Send(ClientCommand::Draw(payload)))
}

fn number(word: &str) -> Result<i32, InputError> {
    word.parse()
        .map_err(|_| InputError::InvalidNumber(word.to_string()))
}
