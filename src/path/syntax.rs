use super::segment::{Command, PathSegment};
use crate::errors::Result;
use crate::strp;

/// Command letters of the path-data grammar. 'R'/'r' (Catmull-Rom) is
/// reserved and deliberately absent: the scanner drops it like any
/// other unrecognized character.
const COMMANDS: &str = "MmLlHhVvZzCcSsQqTtAaBb";

pub struct SvgPathSyntax {
    data: Vec<char>,
    index: usize,
}

impl SvgPathSyntax {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.chars().collect(),
            index: 0,
        }
    }
}

impl PathSyntax for SvgPathSyntax {
    fn current(&self) -> Option<char> {
        self.data.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn at_end(&self) -> bool {
        self.index >= self.data.len()
    }
}

pub trait PathSyntax {
    fn current(&self) -> Option<char>;
    fn advance(&mut self);
    fn at_end(&self) -> bool;

    fn at_command(&self) -> bool {
        matches!(self.current(), Some(c) if COMMANDS.contains(c))
    }

    fn skip_whitespace(&mut self) {
        // SVG definition of whitespace is 0x20, 0x9, 0xA, 0xD. Rust's is_ascii_whitespace()
        // also includes 0xC, but is close enough and convenient.
        while matches!(self.current(), Some(c) if c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn skip_wsp_comma(&mut self) {
        self.skip_whitespace();
        if self.current() == Some(',') {
            self.advance();
            self.skip_whitespace();
        }
    }

    fn read_number(&mut self) -> Result<f64> {
        let mut mult = 1.;
        match self.current() {
            Some('-') => {
                mult = -1.;
                self.advance();
            }
            Some('+') => {
                self.advance();
            }
            _ => {}
        };
        Ok(mult * self.read_non_negative()?)
    }

    fn read_non_negative(&mut self) -> Result<f64> {
        let mut s = String::new();
        let mut dot_valid = true;
        let mut exp_valid = true;
        while let Some(ch) = self.current() {
            match ch {
                '0'..='9' => {
                    s.push(ch);
                    self.advance();
                }
                '.' if dot_valid => {
                    s.push(ch);
                    self.advance();
                    dot_valid = false;
                }
                'e' | 'E' if exp_valid && s.ends_with(|c: char| c.is_ascii_digit()) => {
                    s.push(ch);
                    self.advance();
                    // include sign character if present
                    if let Some(sign @ ('-' | '+')) = self.current() {
                        s.push(sign);
                        self.advance();
                    }
                    exp_valid = false;
                    dot_valid = false;
                }
                _ => break,
            }
        }
        self.skip_wsp_comma();
        strp(&s)
    }
}

/// Scan path-data text into a segment sequence.
///
/// Deliberately permissive: unrecognized command letters and malformed
/// numeric tokens are dropped rather than errored, matching lenient
/// path-data consumers. A command letter followed by several
/// arity-sized operand groups yields one segment per group; a trailing
/// group of the wrong length is dropped while the complete groups are
/// kept.
pub(crate) fn scan_path_data(data: &str) -> Vec<PathSegment> {
    let mut tokens = SvgPathSyntax::new(data);
    let mut segments = Vec::new();
    tokens.skip_whitespace();
    while !tokens.at_end() {
        if !tokens.at_command() {
            tokens.advance();
            continue;
        }
        let Some(letter) = tokens.current() else {
            break;
        };
        tokens.advance();
        tokens.skip_whitespace();
        let Ok(command) = Command::from_letter(letter) else {
            continue;
        };

        // the operand span runs to the next command letter (or end);
        // anything in it which is not a number is skipped
        let mut numbers = Vec::new();
        while !tokens.at_end() && !tokens.at_command() {
            match tokens.read_number() {
                Ok(n) => numbers.push(n),
                Err(_) => tokens.advance(),
            }
        }

        let arity = command.arity();
        if arity == 0 {
            // closepath takes no operands and produces exactly one
            // segment; stray numbers before the next command are junk
            segments.push(PathSegment::new(command, vec![]));
        } else {
            for group in numbers.chunks_exact(arity) {
                segments.push(PathSegment::new(command, group.to_vec()));
            }
        }
    }
    segments
}
