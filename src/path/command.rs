use std::{
    fmt,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use kurbo::{CubicBez, Line, ParamCurve, PathSeg, QuadBez};
use smallvec::SmallVec;

use crate::foundation::{
    core::{Affine, Lerp, Point},
    error::{PathMorphError, PathMorphResult},
};

static NEXT_COMMAND_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique command identity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CommandId(pub u64);

impl CommandId {
    /// Mint an id no other command in this process carries.
    pub fn fresh() -> Self {
        Self(NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Drawing operator of a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CommandKind {
    /// `M`: start a sub-path.
    #[serde(rename = "M")]
    Move,
    /// `L`: straight line.
    #[serde(rename = "L")]
    Line,
    /// `Q`: quadratic Bézier.
    #[serde(rename = "Q")]
    Quad,
    /// `C`: cubic Bézier.
    #[serde(rename = "C")]
    Cubic,
    /// `Z`: straight line back to the sub-path start.
    #[serde(rename = "Z")]
    Close,
}

impl CommandKind {
    /// The SVG path-data letter for this kind.
    pub fn svg_char(self) -> char {
        match self {
            Self::Move => 'M',
            Self::Line => 'L',
            Self::Quad => 'Q',
            Self::Cubic => 'C',
            Self::Close => 'Z',
        }
    }

    /// Number of point slots, including the start slot.
    pub fn point_count(self) -> usize {
        match self {
            Self::Move | Self::Line | Self::Close => 2,
            Self::Quad => 3,
            Self::Cubic => 4,
        }
    }

    fn control_count(self) -> usize {
        self.point_count() - 2
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.svg_char())
    }
}

impl FromStr for CommandKind {
    type Err = PathMorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" | "m" => Ok(Self::Move),
            "L" | "l" => Ok(Self::Line),
            "Q" | "q" => Ok(Self::Quad),
            "C" | "c" => Ok(Self::Cubic),
            "Z" | "z" => Ok(Self::Close),
            _ => Err(PathMorphError::malformed_path(format!(
                "unknown command kind '{s}'"
            ))),
        }
    }
}

/// Bookkeeping a command carries about the edits that produced it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Lineage {
    pub(crate) split: Option<SplitLineage>,
    pub(crate) converted_from: Option<Arc<Command>>,
    pub(crate) chord: Option<Chord>,
}

/// `parent` restricted to the parameter range `t0..t1`.
#[derive(Clone, Debug)]
pub(crate) struct SplitLineage {
    pub(crate) parent: Arc<Command>,
    pub(crate) t0: f64,
    pub(crate) t1: f64,
}

/// Marks the closing segment a filled sub-path split introduces on both halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Chord {
    pub(crate) id: u64,
    // whether the sub-path that was cut ended with a `Z`
    pub(crate) closed_by_command: bool,
}

impl Lineage {
    fn map_points<F: Fn(Point) -> Point>(&self, f: &F) -> Self {
        Self {
            split: self.split.as_ref().map(|s| SplitLineage {
                parent: Arc::new(s.parent.map_points(f)),
                t0: s.t0,
                t1: s.t1,
            }),
            converted_from: self
                .converted_from
                .as_ref()
                .map(|c| Arc::new(c.map_points(f))),
            chord: self.chord,
        }
    }

    fn reversed(&self) -> Self {
        Self {
            split: self.split.as_ref().map(|s| SplitLineage {
                parent: Arc::new(s.parent.reversed()),
                t0: 1.0 - s.t1,
                t1: 1.0 - s.t0,
            }),
            converted_from: self.converted_from.as_ref().map(|c| Arc::new(c.reversed())),
            chord: self.chord,
        }
    }
}

/// One drawing instruction: a kind plus its control points.
///
/// Point slot 0 is the command's start. It is absent only for the very first move of a path.
/// Equality compares kind and point values; ids and edit lineage are ignored.
#[derive(Clone, Debug)]
pub struct Command {
    id: CommandId,
    kind: CommandKind,
    start: Option<Point>,
    controls: SmallVec<[Point; 2]>,
    end: Point,
    pub(crate) lineage: Lineage,
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.start == other.start
            && self.controls == other.controls
            && self.end == other.end
    }
}

impl Command {
    /// Build a command from its full point list, validating the per-kind layout.
    pub fn new(
        kind: CommandKind,
        points: impl IntoIterator<Item = Option<Point>>,
    ) -> PathMorphResult<Self> {
        let points: Vec<Option<Point>> = points.into_iter().collect();
        if points.len() != kind.point_count() {
            return Err(PathMorphError::malformed_path(format!(
                "command {kind} takes {} points, got {}",
                kind.point_count(),
                points.len()
            )));
        }
        if kind != CommandKind::Move && points[0].is_none() {
            return Err(PathMorphError::malformed_path(format!(
                "command {kind} is missing its start point"
            )));
        }
        let mut rest = Vec::with_capacity(points.len() - 1);
        for (slot, p) in points.iter().enumerate().skip(1) {
            let Some(p) = p else {
                return Err(PathMorphError::malformed_path(format!(
                    "command {kind} is missing point {slot}"
                )));
            };
            rest.push(*p);
        }
        let Some((end, controls)) = rest.split_last() else {
            return Err(PathMorphError::malformed_path(format!(
                "command {kind} has no end point"
            )));
        };
        Ok(Self::raw(kind, points[0], controls.iter().copied().collect(), *end))
    }

    fn raw(
        kind: CommandKind,
        start: Option<Point>,
        controls: SmallVec<[Point; 2]>,
        end: Point,
    ) -> Self {
        Self {
            id: CommandId::fresh(),
            kind,
            start,
            controls,
            end,
            lineage: Lineage::default(),
        }
    }

    /// Start a sub-path at `to`; `start` is the previous command's end, if any.
    pub fn move_to(start: Option<Point>, to: Point) -> Self {
        Self::raw(CommandKind::Move, start, SmallVec::new(), to)
    }

    /// Straight line from `start` to `end`.
    pub fn line_to(start: Point, end: Point) -> Self {
        Self::raw(CommandKind::Line, Some(start), SmallVec::new(), end)
    }

    /// Quadratic Bézier with one control point.
    pub fn quad_to(start: Point, ctrl: Point, end: Point) -> Self {
        Self::raw(
            CommandKind::Quad,
            Some(start),
            SmallVec::from_slice(&[ctrl]),
            end,
        )
    }

    /// Cubic Bézier with two control points.
    pub fn cubic_to(start: Point, ctrl1: Point, ctrl2: Point, end: Point) -> Self {
        Self::raw(
            CommandKind::Cubic,
            Some(start),
            SmallVec::from_slice(&[ctrl1, ctrl2]),
            end,
        )
    }

    /// `end` must be the start of the enclosing sub-path.
    pub fn close(start: Point, end: Point) -> Self {
        Self::raw(CommandKind::Close, Some(start), SmallVec::new(), end)
    }

    /// Identity, stable across non-structural edits such as transforms.
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Drawing operator.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Point slot 0; `None` only for the first move of a path.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Last point slot.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Control points between start and end.
    pub fn controls(&self) -> &[Point] {
        &self.controls
    }

    /// All point slots in order, slot 0 first.
    pub fn points(&self) -> SmallVec<[Option<Point>; 4]> {
        std::iter::once(self.start)
            .chain(self.controls.iter().copied().map(Some))
            .chain(std::iter::once(Some(self.end)))
            .collect()
    }

    /// Whether this command is one piece of a split.
    pub fn is_split(&self) -> bool {
        self.lineage.split.is_some()
    }

    /// Whether this command's kind was changed by a conversion.
    pub fn is_converted(&self) -> bool {
        self.lineage.converted_from.is_some()
    }

    /// Whether this command is the chord of a filled sub-path split.
    pub fn is_split_segment(&self) -> bool {
        self.lineage.chord.is_some()
    }

    pub(crate) fn start_or_end(&self) -> Point {
        self.start.unwrap_or(self.end)
    }

    pub(crate) fn is_degenerate(&self) -> bool {
        self.start_or_end() == self.end && self.controls.iter().all(|c| *c == self.end)
    }

    /// Same identity, same points, different kind. Only valid between kinds of equal arity.
    pub(crate) fn with_kind(&self, kind: CommandKind) -> Self {
        debug_assert_eq!(kind.point_count(), self.kind.point_count());
        Self {
            kind,
            ..self.clone()
        }
    }

    pub(crate) fn with_start(&self, start: Option<Point>) -> Self {
        Self {
            start,
            ..self.clone()
        }
    }

    pub(crate) fn with_end(&self, end: Point) -> Self {
        Self {
            end,
            ..self.clone()
        }
    }

    pub(crate) fn with_chord(mut self, chord: Chord) -> Self {
        self.lineage.chord = Some(chord);
        self
    }

    pub(crate) fn transformed(&self, affine: Affine) -> Self {
        self.map_points(&|p| affine * p)
    }

    fn map_points<F: Fn(Point) -> Point>(&self, f: &F) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            start: self.start.map(f),
            controls: self.controls.iter().map(|p| f(*p)).collect(),
            end: f(self.end),
            lineage: self.lineage.map_points(f),
        }
    }

    /// The same segment traversed end-to-start. Moves are returned unchanged.
    pub(crate) fn reversed(&self) -> Self {
        if self.kind == CommandKind::Move {
            return self.clone();
        }
        let mut controls = self.controls.clone();
        controls.reverse();
        Self {
            id: self.id,
            kind: self.kind,
            start: Some(self.end),
            controls,
            end: self.start_or_end(),
            lineage: self.lineage.reversed(),
        }
    }

    fn to_seg(&self) -> PathSeg {
        let p0 = self.start_or_end();
        match (self.kind, self.controls.as_slice()) {
            (CommandKind::Quad, [c]) => PathSeg::Quad(QuadBez::new(p0, *c, self.end)),
            (CommandKind::Cubic, [c1, c2]) => {
                PathSeg::Cubic(CubicBez::new(p0, *c1, *c2, self.end))
            }
            _ => PathSeg::Line(Line::new(p0, self.end)),
        }
    }

    fn from_seg(kind: CommandKind, seg: PathSeg) -> Self {
        match seg {
            PathSeg::Line(l) => Self::raw(kind, Some(l.p0), SmallVec::new(), l.p1),
            PathSeg::Quad(q) => Self::quad_to(q.p0, q.p1, q.p2),
            PathSeg::Cubic(c) => Self::cubic_to(c.p0, c.p1, c.p2, c.p3),
        }
    }

    /// Cut a drawing command at each of `ts` (strictly increasing, inside `(0, 1)`).
    ///
    /// Consecutive pieces share their joint point exactly. Splitting a `Z` yields lines followed
    /// by a final `Z`.
    pub(crate) fn split_at(&self, ts: &[f64]) -> Vec<Self> {
        let seg = self.to_seg();
        let parent = Arc::new(self.clone());
        let mut bounds = Vec::with_capacity(ts.len() + 2);
        bounds.push(0.0);
        bounds.extend_from_slice(ts);
        bounds.push(1.0);

        let joints: Vec<Point> = ts.iter().map(|t| seg.eval(*t)).collect();
        let n = bounds.len() - 1;
        (0..n)
            .map(|i| {
                let (t0, t1) = (bounds[i], bounds[i + 1]);
                let kind = if self.kind == CommandKind::Close && i + 1 < n {
                    CommandKind::Line
                } else {
                    self.kind
                };
                let mut piece = Self::from_seg(kind, seg.subsegment(t0..t1));
                piece.start = Some(if i == 0 {
                    self.start_or_end()
                } else {
                    joints[i - 1]
                });
                piece.end = if i + 1 == n { self.end } else { joints[i] };
                piece.lineage.split = Some(SplitLineage {
                    parent: Arc::clone(&parent),
                    t0,
                    t1,
                });
                piece
            })
            .collect()
    }

    /// Whether `self` is immediately followed by `next` within one split.
    pub(crate) fn is_split_sibling_of(&self, next: &Self) -> bool {
        match (&self.lineage.split, &next.lineage.split) {
            (Some(a), Some(b)) => a.parent.id == b.parent.id && a.t1 == b.t0,
            _ => false,
        }
    }

    /// Join two adjacent pieces of one split. `None` unless `first.is_split_sibling_of(second)`.
    pub(crate) fn merge_split_pieces(first: &Self, second: &Self) -> Option<Self> {
        if !first.is_split_sibling_of(second) {
            return None;
        }
        let a = first.lineage.split.as_ref()?;
        let b = second.lineage.split.as_ref()?;
        let (t0, t1) = (a.t0, b.t1);

        let mut merged = if t0 == 0.0 && t1 == 1.0 {
            (*a.parent).clone()
        } else {
            let kind = if a.parent.kind == CommandKind::Close && t1 < 1.0 {
                CommandKind::Line
            } else {
                a.parent.kind
            };
            let mut piece = Self::from_seg(kind, a.parent.to_seg().subsegment(t0..t1));
            piece.lineage.split = Some(SplitLineage {
                parent: Arc::clone(&a.parent),
                t0,
                t1,
            });
            piece
        };
        merged.start = first.start;
        merged.end = second.end;

        if first.kind == second.kind && first.kind != merged.kind && is_curve_kind(first.kind) {
            merged = merged.converted(first.kind);
        }
        Some(merged)
    }

    /// Change kind among line/quad/cubic, keeping the endpoints.
    ///
    /// Callers guarantee both kinds are curve kinds.
    pub(crate) fn converted(&self, kind: CommandKind) -> Self {
        if kind == self.kind {
            return self.clone();
        }
        let mut out = self.reshaped(kind);
        out.lineage.split = self.lineage.split.clone();
        out.lineage.converted_from = Some(
            self.lineage
                .converted_from
                .clone()
                .unwrap_or_else(|| Arc::new(self.clone())),
        );
        out
    }

    /// Undo a conversion. Commands that were never converted come back unchanged.
    pub(crate) fn unconverted(&self) -> Self {
        let Some(original) = &self.lineage.converted_from else {
            return self.clone();
        };
        if original.start == self.start && original.end == self.end {
            let mut restored = (**original).clone();
            restored.lineage.split = self.lineage.split.clone();
            return restored;
        }
        let mut out = self.reshaped(original.kind);
        out.lineage.split = self.lineage.split.clone();
        out
    }

    fn reshaped(&self, kind: CommandKind) -> Self {
        if kind == self.kind {
            return Self::raw(kind, self.start, self.controls.clone(), self.end);
        }
        let p0 = self.start_or_end();
        let p3 = self.end;
        let controls: SmallVec<[Point; 2]> = match (kind, self.to_seg()) {
            (CommandKind::Quad, PathSeg::Line(_)) => {
                SmallVec::from_slice(&[Lerp::lerp(&p0, &p3, 0.5)])
            }
            (CommandKind::Cubic, PathSeg::Line(_)) => SmallVec::from_slice(&[
                Lerp::lerp(&p0, &p3, 1.0 / 3.0),
                Lerp::lerp(&p0, &p3, 2.0 / 3.0),
            ]),
            (CommandKind::Cubic, PathSeg::Quad(q)) => {
                let c = q.raise();
                SmallVec::from_slice(&[c.p1, c.p2])
            }
            (CommandKind::Quad, PathSeg::Cubic(c)) => {
                // Best single control point; exact for cubics raised from quadratics.
                let v = (c.p1.to_vec2() + c.p2.to_vec2()) * 3.0 - (c.p0.to_vec2() + c.p3.to_vec2());
                SmallVec::from_slice(&[(v / 4.0).to_point()])
            }
            _ => SmallVec::new(),
        };
        debug_assert_eq!(controls.len(), kind.control_count());
        Self::raw(kind, self.start, controls, p3)
    }
}

pub(crate) fn is_curve_kind(kind: CommandKind) -> bool {
    matches!(
        kind,
        CommandKind::Line | CommandKind::Quad | CommandKind::Cubic
    )
}

#[cfg(test)]
#[path = "../../tests/unit/path/command.rs"]
mod tests;
