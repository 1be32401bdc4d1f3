use crate::{
    catalog::ActionSet,
    error::{InputError, InputResult, xr_error},
    runtime::{ActionHandle, InputRuntime, SpaceHandle},
    slot::{ControllerSlot, Side, SidePair},
};
use openxr as xr;

pub fn create_reference_space<R: InputRuntime>(
    runtime: &mut R,
    pose_action: ActionHandle,
    side: Side,
    subaction_path: xr::Path,
) -> InputResult<SpaceHandle> {
    runtime
        .create_action_space(pose_action, subaction_path, xr::Posef::IDENTITY)
        .map_err(|code| {
            InputError::SpaceCreation(xr_error(
                format!("Cannot create {side:?} action space"),
                code,
            ))
        })
}

/// Creates the aim and grip spaces of both slots. On failure the spaces created so far are
/// destroyed again.
pub fn create_controller_slots<R: InputRuntime>(
    runtime: &mut R,
    action_set: &ActionSet,
    hand_paths: &SidePair<xr::Path>,
) -> InputResult<SidePair<ControllerSlot>> {
    let mut created = Vec::with_capacity(4);

    let result = SidePair::try_from_fn(|side| {
        let path = hand_paths[side];

        let aim_space = create_reference_space(runtime, action_set.aim_pose(), side, path)?;
        created.push(aim_space);
        let grip_space = create_reference_space(runtime, action_set.grip_pose(), side, path)?;
        created.push(grip_space);

        Ok(ControllerSlot {
            side,
            path,
            aim_space,
            grip_space,
        })
    });

    if result.is_err() {
        for space in created {
            runtime.destroy_space(space);
        }
    }

    result
}

pub fn destroy_controller_slots<R: InputRuntime>(
    runtime: &mut R,
    slots: &SidePair<ControllerSlot>,
) {
    for (_, slot) in slots.iter() {
        runtime.destroy_space(slot.aim_space);
        runtime.destroy_space(slot.grip_space);
    }
}
