use std::{fmt, str::FromStr};

use kurbo::PathEl;

use crate::{
    foundation::{
        core::{BezPath, Point},
        error::{PathMorphError, PathMorphResult},
    },
    mutate::mutator::Mutator,
    path::{
        command::{Command, CommandKind},
        subpath::SubPath,
    },
};

/// An immutable vector path: ordered sub-paths of commands.
///
/// Every edit produces a new `Path`; existing values are never modified, so any number of them
/// (for example animation keyframes) can be held and shared across threads at once.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PathRepr", into = "PathRepr")]
pub struct Path {
    sub_paths: Vec<SubPath>,
}

impl Path {
    /// Parse SVG path data. Relative commands, `H`/`V`, smooth curves and arcs are normalized to
    /// absolute `M`/`L`/`Q`/`C`/`Z` commands.
    pub fn parse(text: &str) -> PathMorphResult<Self> {
        let bez = BezPath::from_svg(text)
            .map_err(|e| PathMorphError::malformed_path(format!("invalid path data: {e}")))?;
        Self::from_bez_path(&bez)
    }

    /// Convert a kurbo path, inserting the implicit move that follows a mid-path `Z`.
    pub fn from_bez_path(bez: &BezPath) -> PathMorphResult<Self> {
        let mut commands = Vec::new();
        let mut current: Option<Point> = None;
        let mut sub_start: Option<Point> = None;
        let mut needs_move = false;

        for el in bez.elements() {
            if let PathEl::MoveTo(p) = el {
                commands.push(Command::move_to(current, *p));
                current = Some(*p);
                sub_start = Some(*p);
                needs_move = false;
                continue;
            }

            let (Some(cur), Some(start)) = (current, sub_start) else {
                return Err(PathMorphError::malformed_path(
                    "path data must begin with a move",
                ));
            };
            if needs_move {
                // Drawing after `Z` continues from the sub-path start.
                commands.push(Command::move_to(Some(cur), start));
                needs_move = false;
            }

            let cmd = match el {
                PathEl::LineTo(p) => Command::line_to(cur, *p),
                PathEl::QuadTo(c, p) => Command::quad_to(cur, *c, *p),
                PathEl::CurveTo(c1, c2, p) => Command::cubic_to(cur, *c1, *c2, *p),
                PathEl::ClosePath => {
                    needs_move = true;
                    Command::close(cur, start)
                }
                PathEl::MoveTo(_) => continue,
            };
            current = Some(cmd.end());
            commands.push(cmd);
        }

        Self::from_commands(commands)
    }

    /// Group a flat command list into sub-paths, starting a new one at each move.
    pub fn from_commands(commands: Vec<Command>) -> PathMorphResult<Self> {
        let mut groups: Vec<Vec<Command>> = Vec::new();
        for (i, cmd) in commands.into_iter().enumerate() {
            if cmd.kind() == CommandKind::Move {
                groups.push(vec![cmd]);
                continue;
            }
            let Some(group) = groups.last_mut() else {
                return Err(PathMorphError::malformed_path(format!(
                    "command {i} ({}) precedes the first move",
                    cmd.kind()
                )));
            };
            group.push(cmd);
        }

        let sub_paths = groups
            .into_iter()
            .enumerate()
            .map(|(i, g)| SubPath::new(g).map_err(|e| e.with_context(format!("sub-path {i}"))))
            .collect::<PathMorphResult<Vec<_>>>()?;
        Self::from_sub_paths(sub_paths)
    }

    /// Only the first move of the path may omit its start point.
    ///
    /// Move starts are then relinked: the first becomes absent and each later one takes the
    /// previous sub-path's end, the same shape every edit commits.
    pub fn from_sub_paths(sub_paths: Vec<SubPath>) -> PathMorphResult<Self> {
        for (i, sp) in sub_paths.iter().enumerate().skip(1) {
            if sp.commands()[0].start().is_none() {
                return Err(PathMorphError::malformed_path(format!(
                    "sub-path {i}: only the first move may omit its start point"
                )));
            }
        }
        Ok(Self::relinked(sub_paths))
    }

    /// Wrap edited sub-paths, re-deriving each move's start from the previous command.
    pub(crate) fn relinked(mut sub_paths: Vec<SubPath>) -> Self {
        let mut prev_end = None;
        for sp in &mut sub_paths {
            sp.relink_move(prev_end);
            prev_end = Some(sp.end_point());
        }
        Self { sub_paths }
    }

    /// Sub-paths in drawing order.
    pub fn sub_paths(&self) -> &[SubPath] {
        &self.sub_paths
    }

    /// Sub-path `idx`, if it exists.
    pub fn sub_path(&self, idx: usize) -> Option<&SubPath> {
        self.sub_paths.get(idx)
    }

    /// Command `cmd_idx` of sub-path `sub_idx`, if it exists.
    pub fn command(&self, sub_idx: usize, cmd_idx: usize) -> Option<&Command> {
        self.sub_paths.get(sub_idx)?.commands().get(cmd_idx)
    }

    /// All commands, sub-path by sub-path.
    pub fn commands(&self) -> impl Iterator<Item = &Command> + '_ {
        self.sub_paths.iter().flat_map(|sp| sp.commands().iter())
    }

    /// Total number of commands across all sub-paths.
    pub fn command_count(&self) -> usize {
        self.sub_paths.iter().map(SubPath::len).sum()
    }

    /// Whether the path has no sub-paths.
    pub fn is_empty(&self) -> bool {
        self.sub_paths.is_empty()
    }

    /// Same sub-path count, same command count per sub-path and same kind per command.
    pub fn is_morphable_with(&self, other: &Path) -> bool {
        self.morph_mismatch(other).is_none()
    }

    /// Describes the first structural difference, if any.
    pub fn morph_mismatch(&self, other: &Path) -> Option<String> {
        if self.sub_paths.len() != other.sub_paths.len() {
            return Some(format!(
                "sub-path count differs ({} vs {})",
                self.sub_paths.len(),
                other.sub_paths.len()
            ));
        }
        for (s, (a, b)) in self.sub_paths.iter().zip(&other.sub_paths).enumerate() {
            if a.len() != b.len() {
                return Some(format!(
                    "sub-path {s}: command count differs ({} vs {})",
                    a.len(),
                    b.len()
                ));
            }
            for (c, (ca, cb)) in a.commands().iter().zip(b.commands()).enumerate() {
                if ca.kind() != cb.kind() {
                    return Some(format!(
                        "sub-path {s} command {c}: kind differs ({} vs {})",
                        ca.kind(),
                        cb.kind()
                    ));
                }
            }
        }
        None
    }

    /// Absolute SVG path data, one letter per command.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    /// Convert to a kurbo path for rendering or hit-testing.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        for cmd in self.commands() {
            match (cmd.kind(), cmd.controls()) {
                (CommandKind::Move, _) => bez.move_to(cmd.end()),
                (CommandKind::Quad, [c]) => bez.quad_to(*c, cmd.end()),
                (CommandKind::Cubic, [c1, c2]) => bez.curve_to(*c1, *c2, cmd.end()),
                (CommandKind::Close, _) => bez.close_path(),
                _ => bez.line_to(cmd.end()),
            }
        }
        bez
    }

    /// Start a single-use edit session with this path as the baseline.
    pub fn mutate(&self) -> Mutator {
        Mutator::new(self.clone())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for cmd in self.commands() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}", cmd.kind())?;
            if cmd.kind() == CommandKind::Close {
                continue;
            }
            for p in cmd.controls().iter().chain(std::iter::once(&cmd.end())) {
                write!(f, " {} {}", p.x, p.y)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathMorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&BezPath> for Path {
    type Error = PathMorphError;

    fn try_from(bez: &BezPath) -> Result<Self, Self::Error> {
        Self::from_bez_path(bez)
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PathRepr {
    sub_paths: Vec<Vec<CommandRepr>>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct CommandRepr {
    kind: CommandKind,
    points: Vec<Option<Point>>,
}

impl From<Path> for PathRepr {
    fn from(path: Path) -> Self {
        Self {
            sub_paths: path
                .sub_paths
                .iter()
                .map(|sp| {
                    sp.commands()
                        .iter()
                        .map(|c| CommandRepr {
                            kind: c.kind(),
                            points: c.points().into_vec(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

impl TryFrom<PathRepr> for Path {
    type Error = PathMorphError;

    fn try_from(repr: PathRepr) -> Result<Self, Self::Error> {
        fn sub_path(cmds: Vec<CommandRepr>) -> PathMorphResult<SubPath> {
            let commands = cmds
                .into_iter()
                .map(|c| Command::new(c.kind, c.points))
                .collect::<PathMorphResult<Vec<_>>>()?;
            SubPath::new(commands)
        }

        let sub_paths = repr
            .sub_paths
            .into_iter()
            .enumerate()
            .map(|(i, cmds)| sub_path(cmds).map_err(|e| e.with_context(format!("sub-path {i}"))))
            .collect::<PathMorphResult<Vec<_>>>()?;
        Self::from_sub_paths(sub_paths)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/model.rs"]
mod tests;
