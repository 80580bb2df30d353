use crate::{
    foundation::error::PathMorphResult,
    mutate::mutator::Mutator,
    path::model::Path,
    script::parser::{Instruction, TransformOp, parse_op_script},
};

/// Run `instructions` against `mutator` in order.
///
/// Stops at the first failing instruction. Its error keeps its kind and is prefixed with the
/// instruction's position and text; the working path stays as the previous instruction left it.
#[tracing::instrument(skip_all, fields(count = instructions.len()))]
pub fn apply_instructions(
    mutator: &mut Mutator,
    instructions: &[Instruction],
) -> PathMorphResult<()> {
    for (i, ins) in instructions.iter().enumerate() {
        tracing::debug!(op = i, instruction = %ins, "applying");
        execute(mutator, ins).map_err(|e| e.with_context(format!("op #{i} `{ins}`")))?;
    }
    Ok(())
}

fn execute(m: &mut Mutator, ins: &Instruction) -> PathMorphResult<()> {
    match ins {
        Instruction::Reverse { sub } => m.reverse_sub_path(*sub).map(drop),
        Instruction::ShiftBack { sub } => m.shift_sub_path_back(*sub).map(drop),
        Instruction::ShiftForward { sub } => m.shift_sub_path_forward(*sub).map(drop),
        Instruction::Split { sub, cmd, ts } => m.split_command(*sub, *cmd, ts).map(drop),
        Instruction::SplitInHalf { sub, cmd } => m.split_command_in_half(*sub, *cmd).map(drop),
        Instruction::Unsplit { sub, cmd } => m.unsplit_command(*sub, *cmd).map(drop),
        Instruction::Convert { sub, cmd, kind } => m.convert_command(*sub, *cmd, *kind).map(drop),
        Instruction::Unconvert { sub } => m.unconvert_sub_path(*sub).map(drop),
        Instruction::Revert => {
            m.revert();
            Ok(())
        }
        Instruction::MoveSubPath { from, to } => m.move_sub_path(*from, *to).map(drop),
        Instruction::AddCollapsing { point, commands } => {
            m.add_collapsing_sub_path(*point, *commands).map(drop)
        }
        Instruction::DeleteCollapsing => {
            m.delete_collapsing_sub_paths();
            Ok(())
        }
        Instruction::SplitStroked { sub, cmd } => m.split_stroked_sub_path(*sub, *cmd).map(drop),
        Instruction::SplitFilled { sub, cmd, new_sub } => {
            m.split_filled_sub_path(*sub, *cmd, *new_sub).map(drop)
        }
        Instruction::DeleteFilled { sub } => m.delete_filled_sub_path(*sub).map(drop),
        Instruction::DeleteSplitSegment { sub, cmd } => {
            m.delete_sub_path_split_segment(*sub, *cmd).map(drop)
        }
        Instruction::DeleteStroked { sub } => m.delete_stroked_sub_path(*sub).map(drop),
        Instruction::Transform(ops) => {
            let matrices: Vec<_> = ops.iter().copied().map(TransformOp::to_affine).collect();
            m.add_transforms(&matrices);
            Ok(())
        }
    }
}

/// Parse `path_text`, run `op_script` against it and return the built path.
///
/// The script is parsed in full before any edit runs, so a malformed script never reaches the
/// path.
#[tracing::instrument(skip(path_text))]
pub fn from_path_op_string(path_text: &str, op_script: &str) -> PathMorphResult<Path> {
    let baseline = Path::parse(path_text)?;
    let instructions = parse_op_script(op_script)?;
    let mut mutator = baseline.mutate();
    apply_instructions(&mut mutator, &instructions)?;
    Ok(mutator.build())
}

#[cfg(test)]
#[path = "../../tests/unit/script/exec.rs"]
mod tests;
