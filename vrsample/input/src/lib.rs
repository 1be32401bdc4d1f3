mod bindings;
mod catalog;
mod error;
mod haptics;
mod openxr_runtime;
mod paths;
mod runtime;
mod slot;
mod snapshot;
mod spaces;
mod sync;

#[cfg(test)]
mod mock;

pub use bindings::{
    SuggestedBinding, binding_table, profile_path, suggest_bindings, suggest_profiles,
};
pub use catalog::{ActionSet, LogicalAction, create_action_set, declare_action, validate_identifier};
pub use error::*;
pub use haptics::*;
pub use openxr_runtime::*;
pub use paths::{resolve, resolve_hand_paths};
pub use runtime::*;
pub use slot::*;
pub use snapshot::*;
pub use spaces::{create_controller_slots, create_reference_space, destroy_controller_slots};
pub use sync::*;

use error::{is_unsupported, xr_error};
use openxr as xr;
use std::time::Duration;
use vrsample_common::{
    Pose,
    anyhow::anyhow,
    debug,
    glam::{Quat, Vec3},
    info,
};
use vrsample_session::{InputConfig, InteractionProfile};

pub fn from_xr_vec3(v: xr::Vector3f) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn from_xr_quat(q: xr::Quaternionf) -> Quat {
    Quat::from_xyzw(q.x, q.y, q.z, q.w)
}

pub fn from_xr_pose(p: xr::Posef) -> Pose {
    Pose {
        orientation: from_xr_quat(p.orientation),
        position: from_xr_vec3(p.position),
    }
}

pub fn to_xr_pose(pose: Pose) -> xr::Posef {
    let Pose {
        orientation: q,
        position: p,
    } = pose;

    xr::Posef {
        orientation: xr::Quaternionf {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        },
        position: xr::Vector3f {
            x: p.x,
            y: p.y,
            z: p.z,
        },
    }
}

pub fn to_xr_time(timestamp: Duration) -> xr::Time {
    xr::Time::from_nanos(timestamp.as_nanos() as _)
}

fn release_action_set<R: InputRuntime>(runtime: &mut R, action_set: &ActionSet) {
    runtime.destroy_action_set(action_set.handle());
    for action in action_set.teardown_order() {
        runtime.destroy_action(action);
    }
}

fn attach<R: InputRuntime>(runtime: &mut R, action_set: &ActionSet) -> InputResult {
    runtime.attach_action_set(action_set.handle()).map_err(|code| {
        let e = xr_error("Cannot attach action set", code);
        if is_unsupported(code) {
            InputError::FeatureNotSupported(e)
        } else {
            InputError::Binding {
                profile: None,
                source: e,
            }
        }
    })
}

/// Owns every input resource of a session: the action set with its actions, the controller spaces,
/// the last synced snapshot and the pending haptics.
///
/// Resources are released in a fixed order on drop: spaces, then the action set, then its actions.
pub struct InputContext<R: InputRuntime> {
    runtime: R,
    action_set: ActionSet,
    slots: SidePair<ControllerSlot>,
    bound_profiles: Vec<InteractionProfile>,
    engine: SyncEngine,
    haptics: HapticsQueue,
}

impl<R: InputRuntime> InputContext<R> {
    pub fn new(mut runtime: R, config: &InputConfig) -> InputResult<Self> {
        let hand_paths = paths::resolve_hand_paths(&mut runtime)?;

        let action_set = ActionSet::declare(
            &mut runtime,
            &config.action_set_name,
            &config.action_set_display_name,
            config.action_set_priority,
            &hand_paths,
        )?;

        let slots = bindings::suggest_profiles(
            &mut runtime,
            &action_set,
            &config.profiles,
            config.binding_failure,
        )
        .and_then(|bound_profiles| {
            attach(&mut runtime, &action_set)?;
            info!("Attached action set {}", config.action_set_name);

            let slots = spaces::create_controller_slots(&mut runtime, &action_set, &hand_paths)?;

            Ok((slots, bound_profiles))
        });

        let (slots, bound_profiles) = match slots {
            Ok(res) => res,
            Err(e) => {
                release_action_set(&mut runtime, &action_set);
                return Err(e);
            }
        };

        Ok(Self {
            runtime,
            action_set,
            slots,
            bound_profiles,
            engine: SyncEngine::new(config.locate_failure),
            haptics: HapticsQueue::new(&config.haptics),
        })
    }

    /// Synchronizes all actions and replaces the snapshot. `eye_views` must hold exactly the left
    /// and right views located for `predicted_display_time`. On failure the previous snapshot is
    /// kept and the context turns invalid for good.
    pub fn sync(
        &mut self,
        base_space: &R::BaseSpace,
        predicted_display_time: Duration,
        eye_views: &[xr::View],
        session_state: xr::SessionState,
    ) -> InputResult {
        let [left, right] = eye_views else {
            let e = InputError::Sync(anyhow!(
                "Expected 2 eye views, got {}",
                eye_views.len()
            ));
            self.engine.invalidate(&e);

            return Err(e);
        };

        self.engine.sync(
            &mut self.runtime,
            &self.action_set,
            &self.slots,
            &SyncRequest {
                base_space,
                display_time: to_xr_time(predicted_display_time),
                eye_poses: SidePair {
                    left: from_xr_pose(left.pose),
                    right: from_xr_pose(right.pose),
                },
                session_state,
            },
        )
    }

    pub fn is_valid(&self) -> bool {
        self.engine.is_valid()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.engine.last_error()
    }

    pub fn input_data(&self) -> &InputSnapshot {
        self.engine.snapshot()
    }

    pub fn haptics(&mut self) -> &mut HapticsQueue {
        &mut self.haptics
    }

    /// Snapshot and haptics queue borrowed together, for gameplay updates.
    pub fn frame_io(&mut self) -> (&InputSnapshot, &mut HapticsQueue) {
        (self.engine.snapshot(), &mut self.haptics)
    }

    pub fn apply_haptic_feedback_requests(&mut self) {
        self.haptics
            .flush(&mut self.runtime, self.action_set.vibrate(), &self.slots);
    }

    pub fn bound_profiles(&self) -> &[InteractionProfile] {
        &self.bound_profiles
    }

    pub fn action_set(&self) -> &ActionSet {
        &self.action_set
    }

    pub fn slots(&self) -> &SidePair<ControllerSlot> {
        &self.slots
    }

    #[cfg(test)]
    pub(crate) fn runtime(&self) -> &R {
        &self.runtime
    }
}

impl<R: InputRuntime> Drop for InputContext<R> {
    fn drop(&mut self) {
        spaces::destroy_controller_slots(&mut self.runtime, &self.slots);
        release_action_set(&mut self.runtime, &self.action_set);

        debug!("Input resources released");
    }
}
