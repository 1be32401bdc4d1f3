use openxr as xr;

macro_rules! runtime_handle {
    ($name:ident) => {
        /// Opaque handle handed out by an [`InputRuntime`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) u64);
    };
}

runtime_handle!(ActionSetHandle);
runtime_handle!(ActionHandle);
runtime_handle!(SpaceHandle);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Pose,
    Float,
    Vector2,
    Boolean,
    VibrationOutput,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vibration {
    pub amplitude: f32,
    pub duration: xr::Duration,
    pub frequency: f32,
}

/// The slice of an XR runtime the input subsystem talks to. Every call is synchronous and made from
/// the frame thread.
pub trait InputRuntime {
    /// Space the controller poses are expressed in. Owned by the caller.
    type BaseSpace;

    fn string_to_path(&mut self, path: &str) -> xr::Result<xr::Path>;

    fn create_action_set(
        &mut self,
        name: &str,
        display_name: &str,
        priority: u32,
    ) -> xr::Result<ActionSetHandle>;

    fn create_action(
        &mut self,
        set: ActionSetHandle,
        name: &str,
        display_name: &str,
        kind: ActionKind,
        subaction_paths: &[xr::Path],
    ) -> xr::Result<ActionHandle>;

    fn suggest_bindings(
        &mut self,
        profile: xr::Path,
        bindings: &[(ActionHandle, xr::Path)],
    ) -> xr::Result<()>;

    fn attach_action_set(&mut self, set: ActionSetHandle) -> xr::Result<()>;

    fn create_action_space(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
        pose_in_action_space: xr::Posef,
    ) -> xr::Result<SpaceHandle>;

    fn sync_actions(&mut self, set: ActionSetHandle) -> xr::Result<()>;

    fn is_pose_active(&mut self, action: ActionHandle, subaction_path: xr::Path)
    -> xr::Result<bool>;

    fn locate_space(
        &mut self,
        space: SpaceHandle,
        base: &Self::BaseSpace,
        time: xr::Time,
    ) -> xr::Result<xr::SpaceLocation>;

    fn float_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<f32>>;

    fn vector2_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<xr::Vector2f>>;

    fn boolean_state(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
    ) -> xr::Result<xr::ActionState<bool>>;

    fn apply_vibration(
        &mut self,
        action: ActionHandle,
        subaction_path: xr::Path,
        vibration: &Vibration,
    ) -> xr::Result<()>;

    fn destroy_space(&mut self, space: SpaceHandle);

    fn destroy_action_set(&mut self, set: ActionSetHandle);

    fn destroy_action(&mut self, action: ActionHandle);
}
