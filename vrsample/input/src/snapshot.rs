use crate::slot::SidePair;
use openxr as xr;
use std::time::Duration;
use vrsample_common::{
    Pose,
    glam::{Mat4, Vec2},
};

/// Last reported state of a non-pose action for one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionStateRecord<T> {
    pub value: T,
    pub is_active: bool,
    pub changed_since_last_sync: bool,
    pub last_change_time: Duration,
}

impl<T> ActionStateRecord<T> {
    pub(crate) fn from_xr<U>(state: xr::ActionState<U>, convert: impl FnOnce(U) -> T) -> Self {
        Self {
            value: convert(state.current_state),
            is_active: state.is_active,
            changed_since_last_sync: state.changed_since_last_sync,
            last_change_time: Duration::from_nanos(state.last_change_time.as_nanos().max(0) as u64),
        }
    }
}

impl ActionStateRecord<bool> {
    /// True only on the sync the button went down.
    pub fn just_pressed(&self) -> bool {
        self.is_active && self.value && self.changed_since_last_sync
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackedPose {
    pub pose: Pose,
    pub matrix: Mat4,
}

impl TrackedPose {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            matrix: pose.to_mat4(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerState {
    pub aim: TrackedPose,
    pub grip: TrackedPose,
    pub grab: ActionStateRecord<f32>,
    pub thumbstick: ActionStateRecord<Vec2>,
    pub menu: ActionStateRecord<bool>,
    pub select: ActionStateRecord<bool>,
}

/// Everything gameplay reads about the user's input for one frame. Only replaced as a whole by a
/// successful sync.
#[derive(Clone, Debug)]
pub struct InputSnapshot {
    pub head: TrackedPose,
    pub eyes: SidePair<TrackedPose>,
    pub controllers: SidePair<ControllerState>,
    pub session_state: xr::SessionState,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            head: TrackedPose::default(),
            eyes: SidePair::default(),
            controllers: SidePair::default(),
            session_state: xr::SessionState::UNKNOWN,
        }
    }
}
