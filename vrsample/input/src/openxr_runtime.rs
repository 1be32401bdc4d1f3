use crate::runtime::{
    ActionHandle, ActionKind, ActionSetHandle, InputRuntime, SpaceHandle, Vibration,
};
use openxr as xr;

enum AnyAction {
    Pose(xr::Action<xr::Posef>),
    Float(xr::Action<f32>),
    Vector2(xr::Action<xr::Vector2f>),
    Boolean(xr::Action<bool>),
    Vibration(xr::Action<xr::Haptic>),
}

impl AnyAction {
    fn as_binding(&self, path: xr::Path) -> xr::Binding<'_> {
        match self {
            AnyAction::Pose(action) => xr::Binding::new(action, path),
            AnyAction::Float(action) => xr::Binding::new(action, path),
            AnyAction::Vector2(action) => xr::Binding::new(action, path),
            AnyAction::Boolean(action) => xr::Binding::new(action, path),
            AnyAction::Vibration(action) => xr::Binding::new(action, path),
        }
    }
}

// Handles are 1-based indices into the slot vectors. Destroyed entries stay as None so that handles
// are never reused.
fn insert<T>(slots: &mut Vec<Option<T>>, value: T) -> u64 {
    slots.push(Some(value));
    slots.len() as u64
}

fn get<T>(slots: &[Option<T>], raw: u64) -> xr::Result<&T> {
    raw.checked_sub(1)
        .and_then(|index| slots.get(index as usize))
        .and_then(Option::as_ref)
        .ok_or(xr::sys::Result::ERROR_HANDLE_INVALID)
}

fn take<T>(slots: &mut [Option<T>], raw: u64) -> Option<T> {
    let index = raw.checked_sub(1)?;
    slots.get_mut(index as usize)?.take()
}

/// [`InputRuntime`] backed by a live OpenXR session. Dropping a handle's object releases the
/// runtime resource.
pub struct OpenXrRuntime<G: xr::Graphics> {
    instance: xr::Instance,
    session: xr::Session<G>,
    action_sets: Vec<Option<xr::ActionSet>>,
    actions: Vec<Option<AnyAction>>,
    spaces: Vec<Option<xr::Space>>,
}

impl<G: xr::Graphics> OpenXrRuntime<G> {
    pub fn new(instance: xr::Instance, session: xr::Session<G>) -> Self {
        Self {
            instance,
            session,
            action_sets: vec![],
            actions: vec![],
            spaces: vec![],
        }
    }

    pub fn session(&self) -> &xr::Session<G> {
        &self.session
    }

    fn action(&self, action: ActionHandle) -> xr::Result<&AnyAction> {
        get(&self.actions, action.0)
    }
}

impl<G: xr::Graphics> InputRuntime for OpenXrRuntime<G> {
    type BaseSpace = xr::Space;

    fn string_to_path(&mut self, path: &str) -> xr::Result<xr::Path> {
        self.instance.string_to_path(path)
    }

    fn create_action_set(
        &mut self,
        name: &str,
        display_name: &str,
        priority: u32,
    ) -> xr::Result<ActionSetHandle> {
        let set = self
            .instance
            .create_action_set(name, display_name, priority)?;

        Ok(ActionSetHandle(insert(&mut self.action_sets, set)))
    }

    fn create_action(
        &mut self,
        set: ActionSetHandle,
        name: &str,
        display_name: &str,
        kind: ActionKind,
        subaction_paths: &[xr::Path],
    ) -> xr::Result<ActionHandle> {
        let set = get(&self.action_sets, set.0)?;

        let action = match kind {
            ActionKind::Pose => {
                AnyAction::Pose(set.create_action(name, display_name, subaction_paths)?)
            }
            ActionKind::Float => {
                AnyAction::Float(set.create_action(name, display_name, subaction_paths)?)
            }
            ActionKind::Vector2 => {
                AnyAction::Vector2(set.create_action(name, display_name, subaction_paths)?)
            }
            ActionKind::Boolean => {
                AnyAction::Boolean(set.create_action(name, display_name, subaction_paths)?)
            }
            ActionKind::VibrationOutput => {
                AnyAction::Vibration(set.create_action(name, display_name, subaction_paths)?)
            }
        };

        Ok(ActionHandle(insert(&mut self.actions, action)))
    }

    fn suggest_bindings(
        &mut self,
        profile: xr::Path,
        bindings: &[(ActionHandle, xr::Path)],
    ) -> xr::Result<()> {
        let bindings = bindings
            .iter()
            .map(|&(action, path)| Ok(self.action(action)?.as_binding(path)))
            .collect::<xr::Result<Vec<_>>>()?;

        self.instance
            .suggest_interaction_profile_bindings(profile, &bindings)
    }

    fn attach_action_set(&mut self, set: ActionSetHandle) -> xr::Result<()> {
        let set = get(&self.action_sets, set.0)?;

        self.session.attach_action_sets(&[set])
    }

    fn create_action_space(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
        pose_in_action_space: xr::Posef,
    ) -> xr::Result<SpaceHandle> {
        let AnyAction::Pose(action) = self.action(action)? else {
            return Err(xr::sys::Result::ERROR_ACTION_TYPE_MISMATCH);
        };
        let space =
            action.create_space(self.session.clone(), subaction_path, pose_in_action_space)?;

        Ok(SpaceHandle(insert(&mut self.spaces, space)))
    }

    fn sync_actions(&mut self, set: ActionSetHandle) -> xr::Result<()> {
        let set = get(&self.action_sets, set.0)?;

        self.session.sync_actions(&[set.into()])
    }

    fn is_pose_active(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<bool> {
        let AnyAction::Pose(action) = self.action(action)? else {
            return Err(xr::sys::Result::ERROR_ACTION_TYPE_MISMATCH);
        };

        action.is_active(&self.session, subaction_path)
    }

    fn locate_space(
        &mut self,
        space: SpaceHandle,
        base: &xr::Space,
        time: xr::Time,
    ) -> xr::Result<xr::SpaceLocation> {
        get(&self.spaces, space.0)?.locate(base, time)
    }

    fn float_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<f32>> {
        let AnyAction::Float(action) = self.action(action)? else {
            return Err(xr::sys::Result::ERROR_ACTION_TYPE_MISMATCH);
        };

        action.state(&self.session, subaction_path)
    }

    fn vector2_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<xr::Vector2f>> {
        let AnyAction::Vector2(action) = self.action(action)? else {
            return Err(xr::sys::Result::ERROR_ACTION_TYPE_MISMATCH);
        };

        action.state(&self.session, subaction_path)
    }

    fn boolean_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<bool>> {
        let AnyAction::Boolean(action) = self.action(action)? else {
            return Err(xr::sys::Result::ERROR_ACTION_TYPE_MISMATCH);
        };

        action.state(&self.session, subaction_path)
    }

    fn apply_vibration(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
        vibration: &Vibration,
    ) -> xr::Result<()> {
        let AnyAction::Vibration(action) = self.action(action)? else {
            return Err(xr::sys::Result::ERROR_ACTION_TYPE_MISMATCH);
        };

        action.apply_feedback(
            &self.session,
            subaction_path,
            &xr::HapticVibration::new()
                .amplitude(vibration.amplitude)
                .duration(vibration.duration)
                .frequency(vibration.frequency),
        )
    }

    fn destroy_space(&mut self, space: SpaceHandle) {
        take(&mut self.spaces, space.0);
    }

    fn destroy_action_set(&mut self, set: ActionSetHandle) {
        take(&mut self.action_sets, set.0);
    }

    fn destroy_action(&mut self, action: ActionHandle) {
        take(&mut self.actions, action.0);
    }
}
