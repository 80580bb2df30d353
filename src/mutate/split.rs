//! Cutting one sub-path into two and joining the halves back.
//!
//! A *stroked* split cuts an outline at a command boundary; the tail continues from where the
//! head stops. A *filled* split cuts a closed region along the chord from the move point to a
//! command's end point, so both halves stay closed regions sharing that chord.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    foundation::error::{PathMorphError, PathMorphResult},
    path::{
        command::{Chord, Command, CommandKind},
        subpath::{SplitMarker, SplitRole, SplitStyle, SubPath, close_ring, demote_inner_closes},
    },
};

static NEXT_SPLIT_GROUP: AtomicU64 = AtomicU64::new(1);

fn fresh_group() -> u64 {
    NEXT_SPLIT_GROUP.fetch_add(1, Ordering::Relaxed)
}

fn markers(sp: &SubPath, style: SplitStyle) -> (Arc<SplitMarker>, Arc<SplitMarker>) {
    let group = fresh_group();
    let head = SplitMarker {
        group,
        style,
        role: SplitRole::Head,
        closed_by_command: sp.closed_by_command(),
        previous: sp.split.clone(),
    };
    let tail = SplitMarker {
        role: SplitRole::Tail,
        previous: None,
        ..head.clone()
    };
    (Arc::new(head), Arc::new(tail))
}

fn with_marker(
    commands: Vec<Command>,
    from: &SubPath,
    marker: Option<Arc<SplitMarker>>,
) -> SubPath {
    let mut sp = from.with_commands(commands);
    sp.split = marker;
    sp
}

/// Cut after command `cmd` (`1 <= cmd <= len - 2`).
pub(crate) fn split_stroked(sp: &SubPath, cmd: usize) -> (SubPath, SubPath) {
    let commands = sp.commands();
    let (head_marker, tail_marker) = markers(sp, SplitStyle::Stroked);
    let joint = commands[cmd].end();

    let head = commands[..=cmd].to_vec();
    let mut tail = Vec::with_capacity(commands.len() - cmd);
    tail.push(Command::move_to(Some(joint), joint));
    tail.extend(commands[cmd + 1..].iter().map(|c| match c.kind() {
        // The tail starts elsewhere, so a `Z` would close to the wrong point.
        CommandKind::Close => c.with_kind(CommandKind::Line),
        _ => c.clone(),
    }));

    (
        with_marker(head, sp, Some(head_marker)),
        with_marker(tail, sp, Some(tail_marker)),
    )
}

/// Rejoin the halves of a stroked split.
pub(crate) fn join_stroked(head: &SubPath, tail: &SubPath) -> PathMorphResult<SubPath> {
    if head.end_point() != tail.start_point() {
        return Err(PathMorphError::invalid_edit(format!(
            "stroked halves no longer meet ({:?} vs {:?})",
            head.end_point(),
            tail.start_point()
        )));
    }
    let closed_by_command = head.split.as_ref().is_some_and(|m| m.closed_by_command);

    let mut commands = head.commands().to_vec();
    commands.extend(tail.segments().iter().cloned());
    demote_inner_closes(&mut commands);

    let start = head.start_point();
    if let Some(last) = commands.last_mut()
        && closed_by_command
        && last.kind() == CommandKind::Line
        && last.end() == start
    {
        *last = last.with_kind(CommandKind::Close);
    }

    let previous = head.split.as_ref().and_then(|m| m.previous.clone());
    Ok(with_marker(commands, head, previous))
}

/// Cut a closed region along the chord from its move point to the end of command `cmd`
/// (`1 <= cmd <= len - 2`).
pub(crate) fn split_filled(sp: &SubPath, cmd: usize) -> (SubPath, SubPath) {
    let commands = sp.commands();
    let (head_marker, tail_marker) = markers(sp, SplitStyle::Filled);
    let chord = Chord {
        id: head_marker.group,
        closed_by_command: sp.closed_by_command(),
    };
    let origin = sp.start_point();
    let joint = commands[cmd].end();

    let mut head = commands[..=cmd].to_vec();
    head.push(Command::close(joint, origin).with_chord(chord));

    let mut tail = Vec::with_capacity(commands.len() - cmd + 1);
    tail.push(Command::move_to(Some(joint), joint));
    tail.extend(commands[cmd + 1..].iter().cloned());
    demote_inner_closes(&mut tail);
    if let Some(last) = tail.last_mut()
        && last.kind() == CommandKind::Close
    {
        *last = last.with_kind(CommandKind::Line);
    }
    tail.push(Command::close(origin, joint).with_chord(chord));

    (
        with_marker(head, sp, Some(head_marker)),
        with_marker(tail, sp, Some(tail_marker)),
    )
}

/// Index of the drawing segment that is chord `id`, if `sp` has it.
pub(crate) fn find_chord(sp: &SubPath, id: u64) -> Option<usize> {
    sp.segments()
        .iter()
        .position(|c| c.lineage.chord.is_some_and(|ch| ch.id == id))
}

/// Merge `other` into `survivor` across their shared chord. The result keeps `survivor`'s move
/// point and markers.
pub(crate) fn join_filled(
    survivor: &SubPath,
    other: &SubPath,
    id: u64,
) -> PathMorphResult<SubPath> {
    let (Some(a), Some(b)) = (find_chord(survivor, id), find_chord(other, id)) else {
        return Err(PathMorphError::not_split(format!(
            "chord {id} is not shared by both sub-paths"
        )));
    };
    let xs = survivor.segments();
    let ys = other.segments();
    let (x, y) = (&xs[a], &ys[b]);
    if x.start() != Some(y.end()) || y.start() != Some(x.end()) {
        return Err(PathMorphError::invalid_edit(
            "filled halves no longer share their chord",
        ));
    }
    let closed_by_command = x.lineage.chord.is_some_and(|ch| ch.closed_by_command);

    let mut ring = Vec::with_capacity(xs.len() + ys.len() - 2);
    ring.extend_from_slice(&xs[..a]);
    ring.extend_from_slice(&ys[b + 1..]);
    ring.extend_from_slice(&ys[..b]);
    ring.extend_from_slice(&xs[a + 1..]);

    let commands = close_ring(survivor.commands()[0].clone(), ring, closed_by_command);
    let marker = match &survivor.split {
        Some(m) if m.group == id => m.previous.clone(),
        other => other.clone(),
    };
    Ok(with_marker(commands, survivor, marker))
}

#[cfg(test)]
#[path = "../../tests/unit/mutate/split.rs"]
mod tests;
