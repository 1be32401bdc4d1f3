use crate::{
    catalog::ActionSet,
    error::{InputError, InputResult, xr_error},
    from_xr_pose,
    runtime::{ActionHandle, InputRuntime, SpaceHandle},
    slot::{ControllerSlot, Side, SidePair},
    snapshot::{ActionStateRecord, InputSnapshot, TrackedPose},
};
use openxr as xr;
use vrsample_common::{Pose, debug, error, glam::Vec2, warn};
use vrsample_session::LocateFailurePolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Syncing,
    Locating(Side),
}

/// Per-frame inputs produced by the session layer.
pub struct SyncRequest<'a, B> {
    pub base_space: &'a B,
    pub display_time: xr::Time,
    pub eye_poses: SidePair<Pose>,
    pub session_state: xr::SessionState,
}

fn fully_tracked(flags: xr::SpaceLocationFlags) -> bool {
    flags.contains(
        xr::SpaceLocationFlags::POSITION_VALID
            | xr::SpaceLocationFlags::POSITION_TRACKED
            | xr::SpaceLocationFlags::ORIENTATION_VALID
            | xr::SpaceLocationFlags::ORIENTATION_TRACKED,
    )
}

fn state_error(action: &'static str, side: Side) -> impl FnOnce(xr::sys::Result) -> InputError {
    move |code| InputError::Sync(xr_error(format!("Cannot query {action} on {side:?}"), code))
}

pub struct SyncEngine {
    locate_failure: LocateFailurePolicy,
    phase: SyncPhase,
    snapshot: InputSnapshot,
    valid: bool,
    last_error: Option<String>,
}

impl SyncEngine {
    pub fn new(locate_failure: LocateFailurePolicy) -> Self {
        Self {
            locate_failure,
            phase: SyncPhase::Idle,
            snapshot: InputSnapshot::default(),
            valid: true,
            last_error: None,
        }
    }

    #[cfg(test)]
    fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Last committed snapshot. Never partially updated.
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// False once any sync failed. Stays false.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn sync<R: InputRuntime>(
        &mut self,
        runtime: &mut R,
        action_set: &ActionSet,
        slots: &SidePair<ControllerSlot>,
        request: &SyncRequest<R::BaseSpace>,
    ) -> InputResult {
        let result = self.build_snapshot(runtime, action_set, slots, request);
        let phase = std::mem::replace(&mut self.phase, SyncPhase::Idle);

        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                Ok(())
            }
            Err(e) => {
                debug!("Sync aborted while {phase:?}");
                self.invalidate(&e);
                Err(e)
            }
        }
    }

    pub(crate) fn invalidate(&mut self, e: &InputError) {
        error!("{e}");
        self.valid = false;
        self.last_error = Some(e.to_string());
    }

    // Works on a copy of the committed snapshot so that fields of inactive poses carry over
    fn build_snapshot<R: InputRuntime>(
        &mut self,
        runtime: &mut R,
        action_set: &ActionSet,
        slots: &SidePair<ControllerSlot>,
        request: &SyncRequest<R::BaseSpace>,
    ) -> InputResult<InputSnapshot> {
        self.phase = SyncPhase::Syncing;
        runtime
            .sync_actions(action_set.handle())
            .map_err(|code| InputError::Sync(xr_error("Cannot sync action set", code)))?;

        let mut next = self.snapshot.clone();
        next.session_state = request.session_state;

        let eyes = &request.eye_poses;
        next.eyes = eyes.map(|_, pose| TrackedPose::new(*pose));
        next.head = TrackedPose::new(eyes.left.interpolate(&eyes.right, 0.5));

        for (side, slot) in slots.iter() {
            self.phase = SyncPhase::Locating(side);
            let controller = &mut next.controllers[side];

            self.update_pose(
                runtime,
                action_set.aim_pose(),
                slot,
                slot.aim_space,
                request,
                &mut controller.aim,
            )?;
            self.update_pose(
                runtime,
                action_set.grip_pose(),
                slot,
                slot.grip_space,
                request,
                &mut controller.grip,
            )?;

            // Queried even when inactive so that consumers see a defined value
            let grab = runtime
                .float_state(action_set.grab(), slot.path)
                .map_err(state_error("grab", side))?;
            controller.grab = ActionStateRecord::from_xr(grab, |value| value);

            let thumbstick = runtime
                .vector2_state(action_set.thumbstick(), slot.path)
                .map_err(state_error("thumbstick", side))?;
            controller.thumbstick = ActionStateRecord::from_xr(thumbstick, |v| Vec2::new(v.x, v.y));

            let menu = runtime
                .boolean_state(action_set.menu(), slot.path)
                .map_err(state_error("menu", side))?;
            controller.menu = ActionStateRecord::from_xr(menu, |value| value);

            let select = runtime
                .boolean_state(action_set.select(), slot.path)
                .map_err(state_error("select", side))?;
            controller.select = ActionStateRecord::from_xr(select, |value| value);
        }

        Ok(next)
    }

    fn update_pose<R: InputRuntime>(
        &self,
        runtime: &mut R,
        pose_action: ActionHandle,
        slot: &ControllerSlot,
        space: SpaceHandle,
        request: &SyncRequest<R::BaseSpace>,
        tracked: &mut TrackedPose,
    ) -> InputResult {
        let active = runtime
            .is_pose_active(pose_action, slot.path)
            .map_err(state_error("pose activity", slot.side))?;
        if !active {
            return Ok(());
        }

        match runtime.locate_space(space, request.base_space, request.display_time) {
            // Valid but untracked poses are extrapolated by the runtime and would snap
            Ok(location) if fully_tracked(location.location_flags) => {
                *tracked = TrackedPose::new(from_xr_pose(location.pose));
            }
            Ok(_) => (),
            Err(code) => {
                let e = InputError::Locate(xr_error(
                    format!("Cannot locate {:?} controller space", slot.side),
                    code,
                ));
                match self.locate_failure {
                    LocateFailurePolicy::FailFrame => return Err(e),
                    LocateFailurePolicy::RetainLastPose => warn!("{e}, keeping last pose"),
                }
            }
        }

        Ok(())
    }
}
