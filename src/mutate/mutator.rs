use crate::{
    foundation::{
        core::{Affine, Point, compose_in_order},
        error::{PathMorphError, PathMorphResult},
    },
    mutate::split::{find_chord, join_filled, join_stroked, split_filled, split_stroked},
    path::{
        command::{Command, CommandKind, is_curve_kind},
        model::Path,
        subpath::{SplitRole, SplitStyle, SubPath, demote_inner_closes},
    },
};

/// Upper bound on the commands of one collapsing placeholder.
pub(crate) const MAX_COLLAPSING_COMMANDS: usize = 1 << 16;

/// A single-use edit session bound to one baseline [`Path`].
///
/// Each operation validates its indices against the current working path and either applies
/// fully or fails leaving the working path untouched. Operations chain:
///
/// ```
/// # fn main() -> pathmorph::PathMorphResult<()> {
/// let path: pathmorph::Path = "M 0 0 L 10 0 L 10 10 Z".parse()?;
/// let mut m = path.mutate();
/// m.split_command_in_half(0, 1)?.reverse_sub_path(0)?;
/// let edited = m.build();
/// assert_eq!(edited.command_count(), 5);
/// # Ok(())
/// # }
/// ```
///
/// A command-level edit (split, unsplit, convert) addressed at a sub-path's move applies to the
/// first drawing command of that sub-path, since a move has no extent of its own.
#[derive(Debug)]
pub struct Mutator {
    baseline: Path,
    working: Path,
}

impl Mutator {
    pub(crate) fn new(baseline: Path) -> Self {
        Self {
            working: baseline.clone(),
            baseline,
        }
    }

    /// The path this session started from.
    pub fn baseline(&self) -> &Path {
        &self.baseline
    }

    /// The current working path.
    pub fn path(&self) -> &Path {
        &self.working
    }

    fn sub_path_at(&self, op: &str, sub: usize) -> PathMorphResult<&SubPath> {
        self.working.sub_path(sub).ok_or_else(|| {
            PathMorphError::index_out_of_range(format!(
                "{op}: sub-path {sub} does not exist (path has {})",
                self.working.sub_paths().len()
            ))
        })
    }

    fn command_at(&self, op: &str, sub: usize, cmd: usize) -> PathMorphResult<&Command> {
        let sp = self.sub_path_at(op, sub)?;
        sp.commands().get(cmd).ok_or_else(|| {
            PathMorphError::index_out_of_range(format!(
                "{op}: command {cmd} does not exist in sub-path {sub} (has {})",
                sp.len()
            ))
        })
    }

    /// Resolve `cmd` to a drawing command index, redirecting the move to the first segment.
    fn drawing_index(&self, op: &str, sub: usize, cmd: usize) -> PathMorphResult<usize> {
        self.command_at(op, sub, cmd)?;
        if cmd > 0 {
            return Ok(cmd);
        }
        if self.sub_path_at(op, sub)?.len() < 2 {
            return Err(PathMorphError::invalid_edit(format!(
                "{op}: sub-path {sub} has no drawing command"
            )));
        }
        Ok(1)
    }

    fn commit(&mut self, sub_paths: Vec<SubPath>) -> &mut Self {
        self.working = Path::relinked(sub_paths);
        self
    }

    fn replace_sub_path(&mut self, sub: usize, sp: SubPath) -> &mut Self {
        let mut sub_paths = self.working.sub_paths().to_vec();
        sub_paths[sub] = sp;
        self.commit(sub_paths)
    }

    fn replace_commands(
        &mut self,
        sub: usize,
        range: std::ops::Range<usize>,
        with: Vec<Command>,
    ) -> &mut Self {
        let sp = &self.working.sub_paths()[sub];
        let mut commands = sp.commands().to_vec();
        commands.splice(range, with);
        demote_inner_closes(&mut commands);
        let sp = sp.with_commands(commands);
        self.replace_sub_path(sub, sp)
    }

    /// Reverse the traversal direction of sub-path `sub`.
    pub fn reverse_sub_path(&mut self, sub: usize) -> PathMorphResult<&mut Self> {
        let sp = self.sub_path_at("reverse_sub_path", sub)?.reversed();
        Ok(self.replace_sub_path(sub, sp))
    }

    /// Move the start of closed sub-path `sub` back by one segment.
    pub fn shift_sub_path_back(&mut self, sub: usize) -> PathMorphResult<&mut Self> {
        self.shift("shift_sub_path_back", sub, false)
    }

    /// Move the start of closed sub-path `sub` forward by one segment.
    pub fn shift_sub_path_forward(&mut self, sub: usize) -> PathMorphResult<&mut Self> {
        self.shift("shift_sub_path_forward", sub, true)
    }

    fn shift(&mut self, op: &str, sub: usize, forward: bool) -> PathMorphResult<&mut Self> {
        let sp = self.sub_path_at(op, sub)?;
        if !sp.is_closed() {
            return Err(PathMorphError::invalid_edit(format!(
                "{op}: sub-path {sub} is not closed"
            )));
        }
        let sp = sp.shifted(forward);
        Ok(self.replace_sub_path(sub, sp))
    }

    /// Subdivide a command at each of `ts`, which must be strictly increasing inside `(0, 1)`.
    pub fn split_command(
        &mut self,
        sub: usize,
        cmd: usize,
        ts: &[f64],
    ) -> PathMorphResult<&mut Self> {
        const OP: &str = "split_command";
        let cmd = self.drawing_index(OP, sub, cmd)?;
        if ts.is_empty() {
            return Err(PathMorphError::invalid_edit(format!(
                "{OP}: no split positions given"
            )));
        }
        if ts.iter().any(|t| !(t.is_finite() && *t > 0.0 && *t < 1.0))
            || ts.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(PathMorphError::invalid_edit(format!(
                "{OP}: split positions {ts:?} must be strictly increasing inside (0, 1)"
            )));
        }
        let pieces = self.command_at(OP, sub, cmd)?.split_at(ts);
        Ok(self.replace_commands(sub, cmd..cmd + 1, pieces))
    }

    /// Split a command at its parametric midpoint.
    pub fn split_command_in_half(&mut self, sub: usize, cmd: usize) -> PathMorphResult<&mut Self> {
        self.split_command(sub, cmd, &[0.5])
    }

    /// Merge a split piece with its adjacent sibling: the next one if it belongs to the same
    /// split, otherwise the previous one.
    pub fn unsplit_command(&mut self, sub: usize, cmd: usize) -> PathMorphResult<&mut Self> {
        const OP: &str = "unsplit_command";
        let cmd = self.drawing_index(OP, sub, cmd)?;
        let commands = self.sub_path_at(OP, sub)?.commands();

        let target = &commands[cmd];
        if !target.is_split() {
            return Err(PathMorphError::not_split(format!(
                "{OP}: command {cmd} of sub-path {sub} was not produced by a split"
            )));
        }
        let first = match commands.get(cmd + 1) {
            Some(next) if target.is_split_sibling_of(next) => cmd,
            _ if cmd > 1 && commands[cmd - 1].is_split_sibling_of(target) => cmd - 1,
            _ => {
                return Err(PathMorphError::not_split(format!(
                    "{OP}: command {cmd} of sub-path {sub} has no adjacent split sibling"
                )));
            }
        };
        let Some(merged) = Command::merge_split_pieces(&commands[first], &commands[first + 1])
        else {
            return Err(PathMorphError::not_split(format!(
                "{OP}: commands {first} and {} of sub-path {sub} are not siblings",
                first + 1
            )));
        };
        Ok(self.replace_commands(sub, first..first + 2, vec![merged]))
    }

    /// Change a command to `kind` (line, quad or cubic), keeping its endpoints.
    pub fn convert_command(
        &mut self,
        sub: usize,
        cmd: usize,
        kind: CommandKind,
    ) -> PathMorphResult<&mut Self> {
        const OP: &str = "convert_command";
        let cmd = self.drawing_index(OP, sub, cmd)?;
        let target = self.command_at(OP, sub, cmd)?;
        if !is_curve_kind(kind) {
            return Err(PathMorphError::invalid_edit(format!(
                "{OP}: cannot convert to {kind}"
            )));
        }
        if !is_curve_kind(target.kind()) {
            return Err(PathMorphError::invalid_edit(format!(
                "{OP}: command {cmd} of sub-path {sub} is a {} and cannot be converted",
                target.kind()
            )));
        }
        let converted = target.converted(kind);
        Ok(self.replace_commands(sub, cmd..cmd + 1, vec![converted]))
    }

    /// Return every converted command in sub-path `sub` to its original kind.
    pub fn unconvert_sub_path(&mut self, sub: usize) -> PathMorphResult<&mut Self> {
        let sp = self.sub_path_at("unconvert_sub_path", sub)?;
        let commands = sp.commands().iter().map(Command::unconverted).collect();
        let sp = sp.with_commands(commands);
        Ok(self.replace_sub_path(sub, sp))
    }

    /// Relocate sub-path `from` so that it ends up at index `to`.
    pub fn move_sub_path(&mut self, from: usize, to: usize) -> PathMorphResult<&mut Self> {
        const OP: &str = "move_sub_path";
        self.sub_path_at(OP, from)?;
        self.sub_path_at(OP, to)?;
        let mut sub_paths = self.working.sub_paths().to_vec();
        let sp = sub_paths.remove(from);
        sub_paths.insert(to, sp);
        Ok(self.commit(sub_paths))
    }

    /// Append a zero-length placeholder sub-path of `num_commands` commands at `point`.
    pub fn add_collapsing_sub_path(
        &mut self,
        point: Point,
        num_commands: usize,
    ) -> PathMorphResult<&mut Self> {
        if num_commands == 0 {
            return Err(PathMorphError::invalid_edit(
                "add_collapsing_sub_path: a sub-path needs at least its move",
            ));
        }
        if num_commands > MAX_COLLAPSING_COMMANDS {
            return Err(PathMorphError::invalid_edit(format!(
                "add_collapsing_sub_path: {num_commands} commands exceeds the limit of \
                 {MAX_COLLAPSING_COMMANDS}"
            )));
        }
        let mut commands = Vec::with_capacity(num_commands);
        commands.push(Command::move_to(None, point));
        commands.extend((1..num_commands).map(|_| Command::line_to(point, point)));
        let mut sp = SubPath::from_commands_unchecked(commands);
        sp.collapsing = true;

        let mut sub_paths = self.working.sub_paths().to_vec();
        sub_paths.push(sp);
        Ok(self.commit(sub_paths))
    }

    /// Remove every collapsing placeholder sub-path.
    pub fn delete_collapsing_sub_paths(&mut self) -> &mut Self {
        let sub_paths = self
            .working
            .sub_paths()
            .iter()
            .filter(|sp| !sp.is_collapsing())
            .cloned()
            .collect();
        self.commit(sub_paths)
    }

    fn check_cut(&self, op: &str, sub: usize, cmd: usize) -> PathMorphResult<()> {
        let len = self.sub_path_at(op, sub)?.len();
        self.command_at(op, sub, cmd)?;
        if cmd == 0 || cmd + 1 >= len {
            return Err(PathMorphError::invalid_edit(format!(
                "{op}: cutting sub-path {sub} after command {cmd} leaves an empty half"
            )));
        }
        Ok(())
    }

    /// Cut sub-path `sub` after command `cmd`; the tail becomes sub-path `sub + 1`.
    pub fn split_stroked_sub_path(&mut self, sub: usize, cmd: usize) -> PathMorphResult<&mut Self> {
        const OP: &str = "split_stroked_sub_path";
        self.check_cut(OP, sub, cmd)?;
        let (head, tail) = split_stroked(self.sub_path_at(OP, sub)?, cmd);
        let mut sub_paths = self.working.sub_paths().to_vec();
        sub_paths[sub] = head;
        sub_paths.insert(sub + 1, tail);
        Ok(self.commit(sub_paths))
    }

    /// Cut closed sub-path `sub` along the chord from its start to the end of command `cmd`;
    /// the new half is inserted at index `new_sub`.
    pub fn split_filled_sub_path(
        &mut self,
        sub: usize,
        cmd: usize,
        new_sub: usize,
    ) -> PathMorphResult<&mut Self> {
        const OP: &str = "split_filled_sub_path";
        self.check_cut(OP, sub, cmd)?;
        let count = self.working.sub_paths().len();
        if new_sub > count {
            return Err(PathMorphError::index_out_of_range(format!(
                "{OP}: destination {new_sub} is past the end (path has {count} sub-paths)"
            )));
        }
        let sp = self.sub_path_at(OP, sub)?;
        if !sp.is_closed() {
            return Err(PathMorphError::invalid_edit(format!(
                "{OP}: sub-path {sub} is not closed"
            )));
        }
        let (head, tail) = split_filled(sp, cmd);
        let mut sub_paths = self.working.sub_paths().to_vec();
        sub_paths[sub] = head;
        sub_paths.insert(new_sub, tail);
        Ok(self.commit(sub_paths))
    }

    /// Undo a stroked split: `sub` and its partner half are joined at the head's position.
    pub fn delete_stroked_sub_path(&mut self, sub: usize) -> PathMorphResult<&mut Self> {
        const OP: &str = "delete_stroked_sub_path";
        let sp = self.sub_path_at(OP, sub)?;
        let Some(marker) = sp.split.clone().filter(|m| m.style == SplitStyle::Stroked) else {
            return Err(PathMorphError::not_split(format!(
                "{OP}: sub-path {sub} was not produced by a stroked split"
            )));
        };
        let partner = self.working.sub_paths().iter().position(|other| {
            other.split.as_ref().is_some_and(|m| {
                m.group == marker.group && m.style == SplitStyle::Stroked && m.role != marker.role
            })
        });
        let Some(partner) = partner else {
            return Err(PathMorphError::not_split(format!(
                "{OP}: the other half of sub-path {sub} no longer exists"
            )));
        };
        let (head, tail) = match marker.role {
            SplitRole::Head => (sub, partner),
            SplitRole::Tail => (partner, sub),
        };

        let sub_paths = self.working.sub_paths();
        let joined = join_stroked(&sub_paths[head], &sub_paths[tail])
            .map_err(|e| e.with_context(OP))?;
        let mut sub_paths = sub_paths.to_vec();
        sub_paths[head] = joined;
        sub_paths.remove(tail);
        Ok(self.commit(sub_paths))
    }

    /// Undo a filled split: `sub` is merged into the sub-path it was cut from.
    pub fn delete_filled_sub_path(&mut self, sub: usize) -> PathMorphResult<&mut Self> {
        const OP: &str = "delete_filled_sub_path";
        let sp = self.sub_path_at(OP, sub)?;
        let Some(marker) = sp.split.clone().filter(|m| m.style == SplitStyle::Filled) else {
            return Err(PathMorphError::not_split(format!(
                "{OP}: sub-path {sub} was not produced by a filled split"
            )));
        };
        self.merge_across_chord(OP, marker.group, sub, false)
    }

    /// Remove the split chord at `cmd`, merging the sub-path across it into `sub`.
    pub fn delete_sub_path_split_segment(
        &mut self,
        sub: usize,
        cmd: usize,
    ) -> PathMorphResult<&mut Self> {
        const OP: &str = "delete_sub_path_split_segment";
        let Some(chord) = self.command_at(OP, sub, cmd)?.lineage.chord else {
            return Err(PathMorphError::not_split(format!(
                "{OP}: command {cmd} of sub-path {sub} is not a split segment"
            )));
        };
        self.merge_across_chord(OP, chord.id, sub, true)
    }

    fn merge_across_chord(
        &mut self,
        op: &str,
        chord: u64,
        sub: usize,
        sub_survives: bool,
    ) -> PathMorphResult<&mut Self> {
        let sub_paths = self.working.sub_paths();
        let partner = sub_paths
            .iter()
            .enumerate()
            .position(|(i, sp)| i != sub && find_chord(sp, chord).is_some());
        let Some(partner) = partner else {
            return Err(PathMorphError::not_split(format!(
                "{op}: no other sub-path shares the split segment of sub-path {sub}"
            )));
        };
        let (keep, drop) = if sub_survives {
            (sub, partner)
        } else {
            (partner, sub)
        };

        let joined =
            join_filled(&sub_paths[keep], &sub_paths[drop], chord).map_err(|e| e.with_context(op))?;
        let mut sub_paths = sub_paths.to_vec();
        sub_paths[keep] = joined;
        sub_paths.remove(drop);
        Ok(self.commit(sub_paths))
    }

    /// Apply `matrices` to every point, first matrix first.
    pub fn add_transforms(&mut self, matrices: &[Affine]) -> &mut Self {
        if matrices.is_empty() {
            return self;
        }
        let affine = compose_in_order(matrices);
        let sub_paths = self
            .working
            .sub_paths()
            .iter()
            .map(|sp| {
                let commands = sp.commands().iter().map(|c| c.transformed(affine)).collect();
                sp.with_commands(commands)
            })
            .collect();
        self.commit(sub_paths)
    }

    /// Discard every edit since the session started.
    pub fn revert(&mut self) -> &mut Self {
        tracing::debug!("reverting to baseline");
        self.working = self.baseline.clone();
        self
    }

    /// Finish the session and return the edited path.
    #[tracing::instrument(skip(self), fields(commands = self.working.command_count()))]
    pub fn build(self) -> Path {
        self.working
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mutate/mutator.rs"]
mod tests;
