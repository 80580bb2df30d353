use std::fmt;

use crate::{
    foundation::{
        core::{Affine, Point, rotate_degrees, scale, translate},
        error::{PathMorphError, PathMorphResult},
    },
    path::command::CommandKind,
    script::lexer::{Token, TokenKind, lex},
};

/// One step of an op-script, bound to a single [`Mutator`](crate::Mutator) call.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// `RV sub`
    Reverse {
        /// Sub-path index.
        sub: usize,
    },
    /// `SB sub`
    ShiftBack {
        /// Sub-path index.
        sub: usize,
    },
    /// `SF sub`
    ShiftForward {
        /// Sub-path index.
        sub: usize,
    },
    /// `S sub cmd t1 [t2 ...]`
    Split {
        /// Sub-path index.
        sub: usize,
        /// Command index.
        cmd: usize,
        /// Split positions, strictly increasing inside `(0, 1)`.
        ts: Vec<f64>,
    },
    /// `SIH sub cmd`
    SplitInHalf {
        /// Sub-path index.
        sub: usize,
        /// Command index.
        cmd: usize,
    },
    /// `US sub cmd`
    Unsplit {
        /// Sub-path index.
        sub: usize,
        /// Command index.
        cmd: usize,
    },
    /// `CV sub cmd kind`
    Convert {
        /// Sub-path index.
        sub: usize,
        /// Command index.
        cmd: usize,
        /// Target kind.
        kind: CommandKind,
    },
    /// `UCV sub`
    Unconvert {
        /// Sub-path index.
        sub: usize,
    },
    /// `RT`
    Revert,
    /// `M from to`
    MoveSubPath {
        /// Current index of the sub-path.
        from: usize,
        /// Index it ends up at.
        to: usize,
    },
    /// `AC x y n`
    AddCollapsing {
        /// Where every point of the placeholder sits.
        point: Point,
        /// Command count, including the move.
        commands: usize,
    },
    /// `DC`
    DeleteCollapsing,
    /// `SSSP sub cmd`
    SplitStroked {
        /// Sub-path index.
        sub: usize,
        /// Last command of the head.
        cmd: usize,
    },
    /// `SFSP sub cmd new_sub`
    SplitFilled {
        /// Sub-path index.
        sub: usize,
        /// Command whose end the chord runs to.
        cmd: usize,
        /// Where the new half is inserted.
        new_sub: usize,
    },
    /// `DFSP sub`
    DeleteFilled {
        /// Sub-path index.
        sub: usize,
    },
    /// `DSPSS sub cmd`
    DeleteSplitSegment {
        /// Sub-path index that survives.
        sub: usize,
        /// Index of the chord.
        cmd: usize,
    },
    /// `DSSSP sub`, also accepted as `USFSP sub`
    DeleteStroked {
        /// Sub-path index.
        sub: usize,
    },
    /// `T (scale sx sy | rotate deg | translate tx ty)+`
    Transform(Vec<TransformOp>),
}

/// One link of a `T` transform chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Scale about the origin.
    Scale {
        /// Horizontal factor.
        sx: f64,
        /// Vertical factor.
        sy: f64,
    },
    /// Rotate about the origin.
    Rotate {
        /// Angle in degrees.
        degrees: f64,
    },
    /// Translate.
    Translate {
        /// Horizontal offset.
        tx: f64,
        /// Vertical offset.
        ty: f64,
    },
}

impl TransformOp {
    /// The matrix this link applies.
    pub fn to_affine(self) -> Affine {
        match self {
            Self::Scale { sx, sy } => scale(sx, sy),
            Self::Rotate { degrees } => rotate_degrees(degrees),
            Self::Translate { tx, ty } => translate(tx, ty),
        }
    }

    fn arity(name: &str) -> Option<usize> {
        match name {
            "scale" | "translate" => Some(2),
            "rotate" => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale { sx, sy } => write!(f, "scale {sx} {sy}"),
            Self::Rotate { degrees } => write!(f, "rotate {degrees}"),
            Self::Translate { tx, ty } => write!(f, "translate {tx} {ty}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reverse { sub } => write!(f, "RV {sub}"),
            Self::ShiftBack { sub } => write!(f, "SB {sub}"),
            Self::ShiftForward { sub } => write!(f, "SF {sub}"),
            Self::Split { sub, cmd, ts } => {
                write!(f, "S {sub} {cmd}")?;
                for t in ts {
                    write!(f, " {t}")?;
                }
                Ok(())
            }
            Self::SplitInHalf { sub, cmd } => write!(f, "SIH {sub} {cmd}"),
            Self::Unsplit { sub, cmd } => write!(f, "US {sub} {cmd}"),
            Self::Convert { sub, cmd, kind } => write!(f, "CV {sub} {cmd} {kind}"),
            Self::Unconvert { sub } => write!(f, "UCV {sub}"),
            Self::Revert => f.write_str("RT"),
            Self::MoveSubPath { from, to } => write!(f, "M {from} {to}"),
            Self::AddCollapsing { point, commands } => {
                write!(f, "AC {} {} {commands}", point.x, point.y)
            }
            Self::DeleteCollapsing => f.write_str("DC"),
            Self::SplitStroked { sub, cmd } => write!(f, "SSSP {sub} {cmd}"),
            Self::SplitFilled { sub, cmd, new_sub } => write!(f, "SFSP {sub} {cmd} {new_sub}"),
            Self::DeleteFilled { sub } => write!(f, "DFSP {sub}"),
            Self::DeleteSplitSegment { sub, cmd } => write!(f, "DSPSS {sub} {cmd}"),
            Self::DeleteStroked { sub } => write!(f, "DSSSP {sub}"),
            Self::Transform(ops) => {
                f.write_str("T")?;
                for op in ops {
                    write!(f, " {op}")?;
                }
                Ok(())
            }
        }
    }
}

/// Parse an op-script into typed instructions without touching any path.
///
/// Tokens are separated by whitespace. `S` consumes t-values while the next token is a number;
/// `T` consumes `scale`/`rotate`/`translate` groups while the next token names one.
pub fn parse_op_script(src: &str) -> PathMorphResult<Vec<Instruction>> {
    let mut p = Parser {
        tokens: lex(src),
        pos: 0,
    };
    let mut out = Vec::new();
    while p.peek().kind != TokenKind::Eof {
        out.push(p.parse_instruction()?);
    }
    Ok(out)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token<'a> {
        let t = self.tokens[self.pos].clone();
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn describe(t: &Token<'_>) -> String {
        match t.kind {
            TokenKind::Eof => "end of script".to_owned(),
            TokenKind::Word => format!("`{}`", t.text),
        }
    }

    fn arg_error(opcode: &Token<'_>, what: &str, found: &Token<'_>) -> PathMorphError {
        PathMorphError::invalid_op(format!(
            "`{}` (token {}, offset {}) expects {what}, found {} at token {}",
            opcode.text,
            opcode.index,
            opcode.span.start,
            Self::describe(found),
            found.index
        ))
    }

    fn index(&mut self, opcode: &Token<'_>, what: &str) -> PathMorphResult<usize> {
        let t = self.bump();
        t.text
            .parse::<usize>()
            .map_err(|_| Self::arg_error(opcode, what, &t))
    }

    fn number(&mut self, opcode: &Token<'_>, what: &str) -> PathMorphResult<f64> {
        let t = self.bump();
        parse_number(&t).ok_or_else(|| Self::arg_error(opcode, what, &t))
    }

    fn kind(&mut self, opcode: &Token<'_>) -> PathMorphResult<CommandKind> {
        let t = self.bump();
        t.text
            .parse::<CommandKind>()
            .map_err(|_| Self::arg_error(opcode, "a command kind (L, Q or C)", &t))
    }

    fn parse_instruction(&mut self) -> PathMorphResult<Instruction> {
        let op = self.bump();
        let ins = match op.text {
            "RV" => Instruction::Reverse {
                sub: self.index(&op, "a sub-path index")?,
            },
            "SB" => Instruction::ShiftBack {
                sub: self.index(&op, "a sub-path index")?,
            },
            "SF" => Instruction::ShiftForward {
                sub: self.index(&op, "a sub-path index")?,
            },
            "S" => {
                let sub = self.index(&op, "a sub-path index")?;
                let cmd = self.index(&op, "a command index")?;
                let mut ts = vec![self.number(&op, "a split position")?];
                while parse_number(self.peek()).is_some() {
                    ts.push(self.number(&op, "a split position")?);
                }
                Instruction::Split { sub, cmd, ts }
            }
            "SIH" => Instruction::SplitInHalf {
                sub: self.index(&op, "a sub-path index")?,
                cmd: self.index(&op, "a command index")?,
            },
            "US" => Instruction::Unsplit {
                sub: self.index(&op, "a sub-path index")?,
                cmd: self.index(&op, "a command index")?,
            },
            "CV" => Instruction::Convert {
                sub: self.index(&op, "a sub-path index")?,
                cmd: self.index(&op, "a command index")?,
                kind: self.kind(&op)?,
            },
            "UCV" => Instruction::Unconvert {
                sub: self.index(&op, "a sub-path index")?,
            },
            "RT" => Instruction::Revert,
            "M" => Instruction::MoveSubPath {
                from: self.index(&op, "a source sub-path index")?,
                to: self.index(&op, "a destination sub-path index")?,
            },
            "AC" => {
                let x = self.number(&op, "an x coordinate")?;
                let y = self.number(&op, "a y coordinate")?;
                let commands = self.index(&op, "a command count")?;
                Instruction::AddCollapsing {
                    point: Point::new(x, y),
                    commands,
                }
            }
            "DC" => Instruction::DeleteCollapsing,
            "SSSP" => Instruction::SplitStroked {
                sub: self.index(&op, "a sub-path index")?,
                cmd: self.index(&op, "a command index")?,
            },
            "SFSP" => Instruction::SplitFilled {
                sub: self.index(&op, "a sub-path index")?,
                cmd: self.index(&op, "a command index")?,
                new_sub: self.index(&op, "a destination sub-path index")?,
            },
            "DFSP" => Instruction::DeleteFilled {
                sub: self.index(&op, "a sub-path index")?,
            },
            "DSPSS" => Instruction::DeleteSplitSegment {
                sub: self.index(&op, "a sub-path index")?,
                cmd: self.index(&op, "a command index")?,
            },
            "DSSSP" | "USFSP" => Instruction::DeleteStroked {
                sub: self.index(&op, "a sub-path index")?,
            },
            "T" => Instruction::Transform(self.parse_transforms(&op)?),
            _ => {
                return Err(PathMorphError::invalid_op(format!(
                    "unknown opcode `{}` at token {} (offset {})",
                    op.text, op.index, op.span.start
                )));
            }
        };
        Ok(ins)
    }

    fn parse_transforms(&mut self, opcode: &Token<'_>) -> PathMorphResult<Vec<TransformOp>> {
        let mut ops = Vec::new();
        while let Some(arity) = TransformOp::arity(self.peek().text) {
            let name = self.bump();
            let mut args = [0.0; 2];
            for arg in args.iter_mut().take(arity) {
                let t = self.bump();
                *arg = parse_number(&t).ok_or_else(|| {
                    PathMorphError::invalid_transform_op(format!(
                        "`{}` at token {} expects a number, found {} at token {}",
                        name.text,
                        name.index,
                        Self::describe(&t),
                        t.index
                    ))
                })?;
            }
            ops.push(match name.text {
                "scale" => TransformOp::Scale {
                    sx: args[0],
                    sy: args[1],
                },
                "rotate" => TransformOp::Rotate { degrees: args[0] },
                _ => TransformOp::Translate {
                    tx: args[0],
                    ty: args[1],
                },
            });
        }

        if ops.is_empty() {
            let found = self.peek();
            return Err(PathMorphError::invalid_transform_op(format!(
                "`T` at token {} expects scale, rotate or translate, found {}",
                opcode.index,
                Self::describe(found)
            )));
        }
        Ok(ops)
    }
}

fn parse_number(t: &Token<'_>) -> Option<f64> {
    if t.kind != TokenKind::Word {
        return None;
    }
    t.text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/script/parser.rs"]
mod tests;
