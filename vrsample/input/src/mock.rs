use crate::{
    from_xr_pose,
    runtime::{ActionHandle, ActionKind, ActionSetHandle, InputRuntime, SpaceHandle, Vibration},
    to_xr_pose,
};
use openxr as xr;
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};
use vrsample_common::{Pose, glam::Vec2};

type Code = xr::sys::Result;

pub(crate) struct ActionInfo {
    pub set: ActionSetHandle,
    pub name: String,
    pub kind: ActionKind,
    pub subaction_paths: Vec<xr::Path>,
}

pub(crate) struct SpaceInfo {
    pub action: ActionHandle,
    pub subaction_path: xr::Path,
    pub pose: Pose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Destroyed {
    Space(SpaceHandle),
    ActionSet(ActionSetHandle),
    Action(ActionHandle),
}

#[derive(Clone, Copy)]
struct ScriptedState<T> {
    value: T,
    changed: bool,
}

/// In-memory runtime. Rejects what a conformant runtime would reject and records every call that
/// tests assert on.
#[derive(Default)]
pub(crate) struct MockRuntime {
    paths: Vec<String>,
    next_handle: u64,
    action_sets: HashMap<ActionSetHandle, String>,
    actions: HashMap<ActionHandle, ActionInfo>,
    spaces: HashMap<SpaceHandle, SpaceInfo>,
    attached: HashSet<ActionSetHandle>,

    rejected_action_names: HashSet<String>,
    rejected_profiles: HashSet<String>,
    create_action_error: Option<Code>,
    attach_error: Option<Code>,
    space_creation_budget: Option<usize>,
    fail_sync: bool,
    failing_spaces: HashSet<SpaceHandle>,
    fail_state_queries: bool,
    fail_haptics: bool,

    pose_active: HashSet<(ActionHandle, xr::Path)>,
    locations: HashMap<SpaceHandle, (xr::SpaceLocationFlags, Pose)>,
    float_states: HashMap<(ActionHandle, xr::Path), ScriptedState<f32>>,
    vector2_states: HashMap<(ActionHandle, xr::Path), ScriptedState<Vec2>>,
    boolean_states: HashMap<(ActionHandle, xr::Path), ScriptedState<bool>>,
    last_change_time: i64,

    suggestions: Vec<(String, Vec<(ActionHandle, String)>)>,
    sync_count: usize,
    haptic_commands: Vec<(ActionHandle, xr::Path, Vibration)>,
    // Shared so that it can be inspected after the runtime was moved and dropped
    teardown_log: Rc<RefCell<Vec<Destroyed>>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_raw(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn path_string(&self, path: xr::Path) -> Option<&str> {
        let index = path.into_raw().checked_sub(1)?;
        self.paths.get(index as usize).map(String::as_str)
    }

    pub fn live_action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn live_action_set_count(&self) -> usize {
        self.action_sets.len()
    }

    pub fn live_space_count(&self) -> usize {
        self.spaces.len()
    }

    pub fn action_info(&self, action: ActionHandle) -> &ActionInfo {
        &self.actions[&action]
    }

    pub fn space_info(&self, space: SpaceHandle) -> &SpaceInfo {
        &self.spaces[&space]
    }

    pub fn is_attached(&self, set: ActionSetHandle) -> bool {
        self.attached.contains(&set)
    }

    pub fn suggestions(&self) -> Vec<(String, Vec<(ActionHandle, String)>)> {
        self.suggestions.clone()
    }

    pub fn sync_count(&self) -> usize {
        self.sync_count
    }

    pub fn haptic_commands(&self) -> &[(ActionHandle, xr::Path, Vibration)] {
        &self.haptic_commands
    }

    pub fn teardown_log(&self) -> Rc<RefCell<Vec<Destroyed>>> {
        Rc::clone(&self.teardown_log)
    }

    pub fn reject_action_name(&mut self, name: &str) {
        self.rejected_action_names.insert(name.to_owned());
    }

    pub fn reject_profile(&mut self, profile_path: &str) {
        self.rejected_profiles.insert(profile_path.to_owned());
    }

    pub fn fail_action_creation_with(&mut self, code: Code) {
        self.create_action_error = Some(code);
    }

    pub fn fail_attach_with(&mut self, code: Code) {
        self.attach_error = Some(code);
    }

    /// The space creation following `count` successful ones fails.
    pub fn fail_space_creation_after(&mut self, count: usize) {
        self.space_creation_budget = Some(count);
    }

    pub fn set_fail_sync(&mut self, fail: bool) {
        self.fail_sync = fail;
    }

    pub fn fail_locate(&mut self, space: SpaceHandle) {
        self.failing_spaces.insert(space);
    }

    pub fn set_fail_state_queries(&mut self, fail: bool) {
        self.fail_state_queries = fail;
    }

    pub fn set_fail_haptics(&mut self, fail: bool) {
        self.fail_haptics = fail;
    }

    pub fn set_pose_active(&mut self, action: ActionHandle, path: xr::Path, active: bool) {
        if active {
            self.pose_active.insert((action, path));
        } else {
            self.pose_active.remove(&(action, path));
        }
    }

    pub fn set_location(&mut self, space: SpaceHandle, flags: xr::SpaceLocationFlags, pose: Pose) {
        self.locations.insert(space, (flags, pose));
    }

    pub fn set_float_state(
        &mut self,
        action: ActionHandle,
        path: xr::Path,
        value: f32,
        changed: bool,
    ) {
        self.float_states.insert(
            (action, path),
            ScriptedState { value, changed },
        );
    }

    pub fn set_vector2_state(
        &mut self,
        action: ActionHandle,
        path: xr::Path,
        value: Vec2,
        changed: bool,
    ) {
        self.vector2_states.insert(
            (action, path),
            ScriptedState { value, changed },
        );
    }

    pub fn set_boolean_state(
        &mut self,
        action: ActionHandle,
        path: xr::Path,
        value: bool,
        changed: bool,
    ) {
        self.boolean_states.insert(
            (action, path),
            ScriptedState { value, changed },
        );
    }

    pub fn set_last_change_time(&mut self, nanos: i64) {
        self.last_change_time = nanos;
    }

    fn check_action(
        &self,
        action: ActionHandle,
        kind: ActionKind,
        subaction_path: xr::Path,
    ) -> xr::Result<()> {
        let info = self.actions.get(&action).ok_or(Code::ERROR_HANDLE_INVALID)?;
        if info.kind != kind {
            return Err(Code::ERROR_ACTION_TYPE_MISMATCH);
        }
        if !info.subaction_paths.contains(&subaction_path) {
            return Err(Code::ERROR_PATH_UNSUPPORTED);
        }
        if !self.attached.contains(&info.set) {
            return Err(Code::ERROR_ACTIONSET_NOT_ATTACHED);
        }

        Ok(())
    }

    fn state<T: Copy>(
        &self,
        scripted: Option<&ScriptedState<T>>,
        fallback: T,
    ) -> xr::Result<xr::ActionState<T>> {
        if self.fail_state_queries {
            return Err(Code::ERROR_RUNTIME_FAILURE);
        }

        Ok(match scripted {
            Some(state) => xr::ActionState {
                current_state: state.value,
                changed_since_last_sync: state.changed,
                last_change_time: xr::Time::from_nanos(self.last_change_time),
                is_active: true,
            },
            None => xr::ActionState {
                current_state: fallback,
                changed_since_last_sync: false,
                last_change_time: xr::Time::from_nanos(0),
                is_active: false,
            },
        })
    }
}

impl InputRuntime for MockRuntime {
    type BaseSpace = ();

    fn string_to_path(&mut self, path: &str) -> xr::Result<xr::Path> {
        let Some(rest) = path.strip_prefix('/') else {
            return Err(Code::ERROR_PATH_FORMAT_INVALID);
        };
        if rest.split('/').any(str::is_empty) {
            return Err(Code::ERROR_PATH_FORMAT_INVALID);
        }
        if !matches!(rest.split('/').next(), Some("user" | "interaction_profiles")) {
            return Err(Code::ERROR_PATH_UNSUPPORTED);
        }

        let index = match self.paths.iter().position(|p| p == path) {
            Some(index) => index,
            None => {
                self.paths.push(path.to_owned());
                self.paths.len() - 1
            }
        };

        Ok(xr::Path::from_raw(index as u64 + 1))
    }

    fn create_action_set(
        &mut self,
        name: &str,
        _: &str,
        _: u32,
    ) -> xr::Result<ActionSetHandle> {
        if self.action_sets.values().any(|n| n == name) {
            return Err(Code::ERROR_NAME_DUPLICATED);
        }

        let handle = ActionSetHandle(self.next_raw());
        self.action_sets.insert(handle, name.to_owned());

        Ok(handle)
    }

    fn create_action(
        &mut self,
        set: ActionSetHandle,
        name: &str,
        _: &str,
        kind: ActionKind,
        subaction_paths: &[xr::Path],
    ) -> xr::Result<ActionHandle> {
        if !self.action_sets.contains_key(&set) {
            return Err(Code::ERROR_HANDLE_INVALID);
        }
        if self.attached.contains(&set) {
            return Err(Code::ERROR_ACTIONSETS_ALREADY_ATTACHED);
        }
        if self.rejected_action_names.contains(name) {
            return Err(Code::ERROR_RUNTIME_FAILURE);
        }
        if let Some(code) = self.create_action_error {
            return Err(code);
        }
        if self
            .actions
            .values()
            .any(|info| info.set == set && info.name == name)
        {
            return Err(Code::ERROR_NAME_DUPLICATED);
        }

        let handle = ActionHandle(self.next_raw());
        self.actions.insert(
            handle,
            ActionInfo {
                set,
                name: name.to_owned(),
                kind,
                subaction_paths: subaction_paths.to_vec(),
            },
        );

        Ok(handle)
    }

    fn suggest_bindings(
        &mut self,
        profile: xr::Path,
        bindings: &[(ActionHandle, xr::Path)],
    ) -> xr::Result<()> {
        if !self.attached.is_empty() {
            return Err(Code::ERROR_ACTIONSETS_ALREADY_ATTACHED);
        }

        let profile = self
            .path_string(profile)
            .ok_or(Code::ERROR_PATH_INVALID)?
            .to_owned();
        if !profile.starts_with("/interaction_profiles/")
            || self.rejected_profiles.contains(&profile)
        {
            return Err(Code::ERROR_PATH_UNSUPPORTED);
        }

        let mut recorded = Vec::with_capacity(bindings.len());
        for &(action, path) in bindings {
            if !self.actions.contains_key(&action) {
                return Err(Code::ERROR_HANDLE_INVALID);
            }
            let path = self.path_string(path).ok_or(Code::ERROR_PATH_INVALID)?;
            if !path.starts_with("/user/") {
                return Err(Code::ERROR_PATH_UNSUPPORTED);
            }
            recorded.push((action, path.to_owned()));
        }

        self.suggestions.push((profile, recorded));

        Ok(())
    }

    fn attach_action_set(&mut self, set: ActionSetHandle) -> xr::Result<()> {
        if !self.action_sets.contains_key(&set) {
            return Err(Code::ERROR_HANDLE_INVALID);
        }
        if let Some(code) = self.attach_error {
            return Err(code);
        }
        if !self.attached.insert(set) {
            return Err(Code::ERROR_ACTIONSETS_ALREADY_ATTACHED);
        }

        Ok(())
    }

    fn create_action_space(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
        pose_in_action_space: xr::Posef,
    ) -> xr::Result<SpaceHandle> {
        let info = self.actions.get(&action).ok_or(Code::ERROR_HANDLE_INVALID)?;
        if info.kind != ActionKind::Pose {
            return Err(Code::ERROR_ACTION_TYPE_MISMATCH);
        }
        if !info.subaction_paths.contains(&subaction_path) {
            return Err(Code::ERROR_PATH_UNSUPPORTED);
        }

        match &mut self.space_creation_budget {
            Some(0) => return Err(Code::ERROR_RUNTIME_FAILURE),
            Some(budget) => *budget -= 1,
            None => (),
        }

        let handle = SpaceHandle(self.next_raw());
        self.spaces.insert(
            handle,
            SpaceInfo {
                action,
                subaction_path,
                pose: from_xr_pose(pose_in_action_space),
            },
        );

        Ok(handle)
    }

    fn sync_actions(&mut self, set: ActionSetHandle) -> xr::Result<()> {
        if !self.attached.contains(&set) {
            return Err(Code::ERROR_ACTIONSET_NOT_ATTACHED);
        }
        if self.fail_sync {
            return Err(Code::ERROR_SESSION_LOST);
        }

        self.sync_count += 1;

        Ok(())
    }

    fn is_pose_active(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<bool> {
        self.check_action(action, ActionKind::Pose, subaction_path)?;
        if self.fail_state_queries {
            return Err(Code::ERROR_RUNTIME_FAILURE);
        }

        Ok(self.pose_active.contains(&(action, subaction_path)))
    }

    fn locate_space(
        &mut self,
        space: SpaceHandle,
        _: &(),
        _: xr::Time,
    ) -> xr::Result<xr::SpaceLocation> {
        if !self.spaces.contains_key(&space) {
            return Err(Code::ERROR_HANDLE_INVALID);
        }
        if self.failing_spaces.contains(&space) {
            return Err(Code::ERROR_TIME_INVALID);
        }

        let (location_flags, pose) = self
            .locations
            .get(&space)
            .copied()
            .unwrap_or((xr::SpaceLocationFlags::EMPTY, Pose::IDENTITY));

        Ok(xr::SpaceLocation {
            location_flags,
            pose: to_xr_pose(pose),
        })
    }

    fn float_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<f32>> {
        self.check_action(action, ActionKind::Float, subaction_path)?;
        self.state(self.float_states.get(&(action, subaction_path)), 0.0)
    }

    fn vector2_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<xr::Vector2f>> {
        self.check_action(action, ActionKind::Vector2, subaction_path)?;
        let state = self.state(self.vector2_states.get(&(action, subaction_path)), Vec2::ZERO)?;

        Ok(xr::ActionState {
            current_state: xr::Vector2f {
                x: state.current_state.x,
                y: state.current_state.y,
            },
            changed_since_last_sync: state.changed_since_last_sync,
            last_change_time: state.last_change_time,
            is_active: state.is_active,
        })
    }

    fn boolean_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<bool>> {
        self.check_action(action, ActionKind::Boolean, subaction_path)?;
        self.state(self.boolean_states.get(&(action, subaction_path)), false)
    }

    fn apply_vibration(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
        vibration: &Vibration,
    ) -> xr::Result<()> {
        self.check_action(action, ActionKind::VibrationOutput, subaction_path)?;
        if self.fail_haptics {
            return Err(Code::ERROR_RUNTIME_FAILURE);
        }

        self.haptic_commands
            .push((action, subaction_path, *vibration));

        Ok(())
    }

    fn destroy_space(&mut self, space: SpaceHandle) {
        self.spaces.remove(&space);
        self.teardown_log.borrow_mut().push(Destroyed::Space(space));
    }

    fn destroy_action_set(&mut self, set: ActionSetHandle) {
        self.action_sets.remove(&set);
        self.attached.remove(&set);
        self.teardown_log.borrow_mut().push(Destroyed::ActionSet(set));
    }

    fn destroy_action(&mut self, action: ActionHandle) {
        self.actions.remove(&action);
        self.teardown_log.borrow_mut().push(Destroyed::Action(action));
    }
}
