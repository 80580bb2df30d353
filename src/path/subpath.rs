use std::sync::Arc;

use crate::{
    foundation::{
        core::Point,
        error::{PathMorphError, PathMorphResult},
    },
    path::command::{Command, CommandKind},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SplitStyle {
    Stroked,
    Filled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SplitRole {
    Head,
    Tail,
}

/// Records which sub-path split produced a sub-path.
#[derive(Clone, Debug)]
pub(crate) struct SplitMarker {
    pub(crate) group: u64,
    pub(crate) style: SplitStyle,
    pub(crate) role: SplitRole,
    pub(crate) closed_by_command: bool,
    // marker of the sub-path before it was cut
    pub(crate) previous: Option<Arc<SplitMarker>>,
}

/// A run of commands starting with a move: one continuous pen stroke.
///
/// Equality compares commands only.
#[derive(Clone, Debug)]
pub struct SubPath {
    commands: Vec<Command>,
    pub(crate) collapsing: bool,
    pub(crate) split: Option<Arc<SplitMarker>>,
}

impl PartialEq for SubPath {
    fn eq(&self, other: &Self) -> bool {
        self.commands == other.commands
    }
}

impl SubPath {
    /// Validate and wrap a command run.
    ///
    /// The first command must be a move, no other command may be a move, and a `Z` may only
    /// appear last and must end at the move's target.
    pub fn new(commands: Vec<Command>) -> PathMorphResult<Self> {
        let Some(first) = commands.first() else {
            return Err(PathMorphError::malformed_path("sub-path has no commands"));
        };
        if first.kind() != CommandKind::Move {
            return Err(PathMorphError::malformed_path(format!(
                "sub-path starts with {} instead of a move",
                first.kind()
            )));
        }
        let start = first.end();
        let last_idx = commands.len() - 1;
        for (i, cmd) in commands.iter().enumerate().skip(1) {
            match cmd.kind() {
                CommandKind::Move => {
                    return Err(PathMorphError::malformed_path(format!(
                        "command {i} is a move inside a sub-path"
                    )));
                }
                CommandKind::Close if i != last_idx => {
                    return Err(PathMorphError::malformed_path(format!(
                        "command {i} closes the sub-path before its last command"
                    )));
                }
                CommandKind::Close if cmd.end() != start => {
                    return Err(PathMorphError::malformed_path(format!(
                        "command {i} closes to {:?} but the sub-path starts at {start:?}",
                        cmd.end()
                    )));
                }
                _ => {}
            }
        }
        Ok(Self::from_commands_unchecked(commands))
    }

    pub(crate) fn from_commands_unchecked(commands: Vec<Command>) -> Self {
        Self {
            commands,
            collapsing: false,
            split: None,
        }
    }

    /// Commands, the leading move first.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of commands, including the move.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always false for a validated sub-path; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The move target.
    pub fn start_point(&self) -> Point {
        self.commands[0].end()
    }

    /// End point of the last command.
    pub fn end_point(&self) -> Point {
        self.commands[self.commands.len() - 1].end()
    }

    /// Closed when the last command is a `Z` or returns to the move target.
    pub fn is_closed(&self) -> bool {
        self.commands.len() > 1
            && (self.closed_by_command() || self.end_point() == self.start_point())
    }

    /// Whether this sub-path is a collapsing placeholder.
    pub fn is_collapsing(&self) -> bool {
        self.collapsing
    }

    /// Whether this sub-path is one half of a stroked or filled sub-path split.
    pub fn is_split(&self) -> bool {
        self.split.is_some()
    }

    pub(crate) fn closed_by_command(&self) -> bool {
        self.commands
            .last()
            .is_some_and(|c| c.kind() == CommandKind::Close)
    }

    /// Every command after the leading move.
    pub(crate) fn segments(&self) -> &[Command] {
        &self.commands[1..]
    }

    /// Replace the commands, keeping the markers.
    pub(crate) fn with_commands(&self, commands: Vec<Command>) -> Self {
        Self {
            commands,
            collapsing: self.collapsing,
            split: self.split.clone(),
        }
    }

    pub(crate) fn relink_move(&mut self, start: Option<Point>) {
        self.commands[0] = self.commands[0].with_start(start);
    }

    /// Traverse the same geometry backward.
    ///
    /// Closed sub-paths keep their move point. A zero-length closing `Z` stays pinned as the
    /// last command; any other closing segment travels as a line and the final segment becomes
    /// the `Z` if it is a line.
    pub(crate) fn reversed(&self) -> Self {
        let mv = &self.commands[0];
        let segments = self.segments();
        if segments.is_empty() {
            return self.clone();
        }

        let commands = if !self.is_closed() {
            let mut out = vec![mv.with_end(self.end_point())];
            out.extend(segments.iter().rev().map(Command::reversed));
            out
        } else if let Some((close, ring)) = pinned_close(segments) {
            let mut out = vec![mv.clone()];
            out.extend(ring.iter().rev().map(Command::reversed));
            out.push(close.clone());
            out
        } else {
            let ring = segments.iter().rev().map(Command::reversed).collect();
            close_ring(mv.clone(), ring, self.closed_by_command())
        };
        self.with_commands(commands)
    }

    /// Rotate the start of a closed sub-path by one drawing segment.
    pub(crate) fn shifted(&self, forward: bool) -> Self {
        let mv = &self.commands[0];
        let rotate = |ring: &mut Vec<Command>| {
            if forward {
                ring.rotate_left(1);
            } else {
                ring.rotate_right(1);
            }
        };

        if let Some((close, ring)) = pinned_close(self.segments()) {
            if ring.len() < 2 {
                return self.clone();
            }
            let mut ring = ring.to_vec();
            rotate(&mut ring);
            let target = ring[0].start_or_end();
            let mut out = vec![mv.with_end(target)];
            out.extend(ring);
            out.push(close.with_start(Some(target)).with_end(target));
            return self.with_commands(out);
        }

        let segments = self.segments();
        if segments.len() < 2 {
            return self.clone();
        }
        let mut ring = segments.to_vec();
        rotate(&mut ring);
        let target = ring[0].start_or_end();
        self.with_commands(close_ring(
            mv.with_end(target),
            ring,
            self.closed_by_command(),
        ))
    }
}

/// A trailing zero-length `Z`, split off from the rest of the drawing segments.
fn pinned_close(segments: &[Command]) -> Option<(&Command, &[Command])> {
    let (last, ring) = segments.split_last()?;
    (last.kind() == CommandKind::Close && last.is_degenerate()).then_some((last, ring))
}

/// Reassemble a closed loop: only the final segment may be a `Z`; when the loop was closed by
/// a command, a final line becomes the `Z`.
pub(crate) fn close_ring(mv: Command, ring: Vec<Command>, closed_by_command: bool) -> Vec<Command> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n + 1);
    out.push(mv);
    for (i, cmd) in ring.into_iter().enumerate() {
        let last = i + 1 == n;
        let cmd = match cmd.kind() {
            CommandKind::Close if !last => cmd.with_kind(CommandKind::Line),
            CommandKind::Line if last && closed_by_command => cmd.with_kind(CommandKind::Close),
            _ => cmd,
        };
        out.push(cmd);
    }
    out
}

/// Demote any `Z` that is no longer last to a line.
pub(crate) fn demote_inner_closes(commands: &mut [Command]) {
    let n = commands.len();
    for cmd in commands.iter_mut().take(n.saturating_sub(1)) {
        if cmd.kind() == CommandKind::Close {
            *cmd = cmd.with_kind(CommandKind::Line);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/subpath.rs"]
mod tests;
