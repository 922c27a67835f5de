use crate::errors::{Error, Result};
use crate::fstr;

/// Path command families, one per letter pair of the path-data grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CubicCurveTo,
    SmoothCubicCurveTo,
    QuadraticCurveTo,
    SmoothQuadraticCurveTo,
    EllipticalArcTo,
    /// Non-standard: rotates the frame of reference for subsequent
    /// relative commands. See the (retired) SVG2 bearing proposal.
    Bearing,
    ClosePath,
    /// Reserved by the grammar ('R'/'r'); can be constructed but every
    /// evaluation fails.
    CatmullRom,
}

/// A command kind together with its absolute/relative mode.
///
/// In textual form the mode is carried by letter case: uppercase is
/// absolute, lowercase relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    pub kind: CommandKind,
    pub absolute: bool,
}

impl Command {
    pub fn new(kind: CommandKind, absolute: bool) -> Self {
        Self { kind, absolute }
    }

    pub fn from_letter(c: char) -> Result<Self> {
        use CommandKind::*;
        let kind = match c.to_ascii_uppercase() {
            'M' => MoveTo,
            'L' => LineTo,
            'H' => HorizontalLineTo,
            'V' => VerticalLineTo,
            'C' => CubicCurveTo,
            'S' => SmoothCubicCurveTo,
            'Q' => QuadraticCurveTo,
            'T' => SmoothQuadraticCurveTo,
            'A' => EllipticalArcTo,
            'B' => Bearing,
            'Z' => ClosePath,
            'R' => CatmullRom,
            _ => return Err(Error::NotASegment(c.to_string())),
        };
        Ok(Self::new(kind, c.is_ascii_uppercase()))
    }

    pub fn letter(&self) -> char {
        use CommandKind::*;
        let c = match self.kind {
            MoveTo => 'M',
            LineTo => 'L',
            HorizontalLineTo => 'H',
            VerticalLineTo => 'V',
            CubicCurveTo => 'C',
            SmoothCubicCurveTo => 'S',
            QuadraticCurveTo => 'Q',
            SmoothQuadraticCurveTo => 'T',
            EllipticalArcTo => 'A',
            Bearing => 'B',
            ClosePath => 'Z',
            CatmullRom => 'R',
        };
        if self.absolute {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }

    /// Number of operands the command requires
    pub fn arity(&self) -> usize {
        use CommandKind::*;
        match self.kind {
            ClosePath => 0,
            Bearing | HorizontalLineTo | VerticalLineTo => 1,
            MoveTo | LineTo | SmoothQuadraticCurveTo | CatmullRom => 2,
            QuadraticCurveTo | SmoothCubicCurveTo => 4,
            CubicCurveTo => 6,
            EllipticalArcTo => 7,
        }
    }
}

/// One path segment: a command plus its numeric operands.
///
/// Operand order follows the grammar, e.g. for an elliptical arc:
/// `rx ry x-axis-rotation large-arc-flag sweep-flag x y`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    command: Command,
    args: Vec<f64>,
}

impl PathSegment {
    /// Construct without checking operand count; `is_valid` reports
    /// whether the segment can take part in path operations.
    pub fn new(command: Command, args: Vec<f64>) -> Self {
        Self { command, args }
    }

    /// Construct, requiring the operand count to match the command's
    /// arity.
    pub fn try_new(command: Command, args: Vec<f64>) -> Result<Self> {
        if command.kind != CommandKind::ClosePath && args.len() != command.arity() {
            return Err(Error::Arity(format!(
                "'{}' takes {} operands, got {}",
                command.letter(),
                command.arity(),
                args.len()
            )));
        }
        Ok(Self::new(command, args))
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn kind(&self) -> CommandKind {
        self.command.kind
    }

    pub fn args(&self) -> &[f64] {
        &self.args
    }

    pub fn is_absolute(&self) -> bool {
        self.command.absolute
    }

    pub fn is_relative(&self) -> bool {
        !self.command.absolute
    }

    /// A segment is valid when its operand count matches its command's
    /// arity; closepath is always valid.
    pub fn is_valid(&self) -> bool {
        self.command.kind == CommandKind::ClosePath || self.args.len() == self.command.arity()
    }

    /// Terminal coordinate of the segment, where known.
    ///
    /// Bearing and closepath have no endpoint of their own; horizontal
    /// and vertical lines know only one axis (the other reads as None
    /// when absolute, 0 when relative). Invalid segments expose no
    /// endpoint.
    pub fn end_point(&self) -> Result<(Option<f64>, Option<f64>)> {
        use CommandKind::*;
        if self.kind() == CatmullRom {
            return Err(Error::UnsupportedSegment(
                self.command.letter().to_string(),
            ));
        }
        if !self.is_valid() {
            return Ok((None, None));
        }
        let a = &self.args;
        Ok(match self.kind() {
            MoveTo | LineTo | SmoothQuadraticCurveTo => (Some(a[0]), Some(a[1])),
            HorizontalLineTo => {
                if self.is_absolute() {
                    (Some(a[0]), None)
                } else {
                    (Some(a[0]), Some(0.))
                }
            }
            VerticalLineTo => {
                if self.is_absolute() {
                    (None, Some(a[0]))
                } else {
                    (Some(0.), Some(a[0]))
                }
            }
            CubicCurveTo => (Some(a[4]), Some(a[5])),
            SmoothCubicCurveTo | QuadraticCurveTo => (Some(a[2]), Some(a[3])),
            EllipticalArcTo => (Some(a[5]), Some(a[6])),
            Bearing | ClosePath => (None, None),
            CatmullRom => unreachable!(),
        })
    }

    /// Render the segment as path-data text. Invalid segments render
    /// to nothing.
    pub fn serialize(&self) -> String {
        use CommandKind::*;
        if !self.is_valid() {
            return String::new();
        }
        let letter = self.command.letter();
        let a = &self.args;
        match self.kind() {
            ClosePath => letter.to_string(),
            Bearing | HorizontalLineTo | VerticalLineTo => format!("{letter}{}", fstr(a[0])),
            MoveTo | LineTo | SmoothQuadraticCurveTo => {
                format!("{letter}{},{}", fstr(a[0]), fstr(a[1]))
            }
            CubicCurveTo | SmoothCubicCurveTo | QuadraticCurveTo | CatmullRom => {
                let pairs: Vec<String> = a
                    .chunks(2)
                    .map(|p| format!("{},{}", fstr(p[0]), fstr(p[1])))
                    .collect();
                format!("{letter}{}", pairs.join(" "))
            }
            EllipticalArcTo => format!(
                "{letter}{},{} {} {} {} {},{}",
                fstr(a[0]),
                fstr(a[1]),
                fstr(a[2]),
                fstr(a[3]),
                fstr(a[4]),
                fstr(a[5]),
                fstr(a[6])
            ),
        }
    }

    pub fn move_to(absolute: bool, x: f64, y: f64) -> Self {
        Self::new(Command::new(CommandKind::MoveTo, absolute), vec![x, y])
    }

    pub fn line_to(absolute: bool, x: f64, y: f64) -> Self {
        Self::new(Command::new(CommandKind::LineTo, absolute), vec![x, y])
    }

    pub fn horizontal_to(absolute: bool, x: f64) -> Self {
        Self::new(Command::new(CommandKind::HorizontalLineTo, absolute), vec![x])
    }

    pub fn vertical_to(absolute: bool, y: f64) -> Self {
        Self::new(Command::new(CommandKind::VerticalLineTo, absolute), vec![y])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cubic_to(absolute: bool, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        Self::new(
            Command::new(CommandKind::CubicCurveTo, absolute),
            vec![x1, y1, x2, y2, x, y],
        )
    }

    pub fn smooth_cubic_to(absolute: bool, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        Self::new(
            Command::new(CommandKind::SmoothCubicCurveTo, absolute),
            vec![x2, y2, x, y],
        )
    }

    pub fn quadratic_to(absolute: bool, x1: f64, y1: f64, x: f64, y: f64) -> Self {
        Self::new(
            Command::new(CommandKind::QuadraticCurveTo, absolute),
            vec![x1, y1, x, y],
        )
    }

    pub fn smooth_quadratic_to(absolute: bool, x: f64, y: f64) -> Self {
        Self::new(
            Command::new(CommandKind::SmoothQuadraticCurveTo, absolute),
            vec![x, y],
        )
    }

    /// The two flags are stored normalized to 0/1.
    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        absolute: bool,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        Self::new(
            Command::new(CommandKind::EllipticalArcTo, absolute),
            vec![
                rx,
                ry,
                rotation,
                if large_arc { 1. } else { 0. },
                if sweep { 1. } else { 0. },
                x,
                y,
            ],
        )
    }

    pub fn bearing(absolute: bool, degrees: f64) -> Self {
        Self::new(Command::new(CommandKind::Bearing, absolute), vec![degrees])
    }

    pub fn close(absolute: bool) -> Self {
        Self::new(Command::new(CommandKind::ClosePath, absolute), vec![])
    }

    // Family setters: each replaces the command tag and operand list
    // together, so a segment is never part-updated.

    pub fn set_move_to(&mut self, absolute: bool, x: f64, y: f64) {
        *self = Self::move_to(absolute, x, y);
    }

    pub fn set_line_to(&mut self, absolute: bool, x: f64, y: f64) {
        *self = Self::line_to(absolute, x, y);
    }

    pub fn set_horizontal_to(&mut self, absolute: bool, x: f64) {
        *self = Self::horizontal_to(absolute, x);
    }

    pub fn set_vertical_to(&mut self, absolute: bool, y: f64) {
        *self = Self::vertical_to(absolute, y);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_cubic_to(&mut self, absolute: bool, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        *self = Self::cubic_to(absolute, x1, y1, x2, y2, x, y);
    }

    pub fn set_smooth_cubic_to(&mut self, absolute: bool, x2: f64, y2: f64, x: f64, y: f64) {
        *self = Self::smooth_cubic_to(absolute, x2, y2, x, y);
    }

    pub fn set_quadratic_to(&mut self, absolute: bool, x1: f64, y1: f64, x: f64, y: f64) {
        *self = Self::quadratic_to(absolute, x1, y1, x, y);
    }

    pub fn set_smooth_quadratic_to(&mut self, absolute: bool, x: f64, y: f64) {
        *self = Self::smooth_quadratic_to(absolute, x, y);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_arc_to(
        &mut self,
        absolute: bool,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) {
        *self = Self::arc_to(absolute, rx, ry, rotation, large_arc, sweep, x, y);
    }

    pub fn set_bearing(&mut self, absolute: bool, degrees: f64) {
        *self = Self::bearing(absolute, degrees);
    }

    pub fn set_close(&mut self, absolute: bool) {
        *self = Self::close(absolute);
    }
}
