use crate::{
    error::{InputError, InputResult, is_unsupported, xr_error},
    runtime::{ActionHandle, ActionKind, ActionSetHandle, InputRuntime},
    slot::SidePair,
};
use openxr as xr;
use vrsample_common::{anyhow::anyhow, debug};

// Sizes include the null terminator
const MAX_NAME_SIZE: usize = 64;
const MAX_LOCALIZED_NAME_SIZE: usize = 128;

/// The logical actions gameplay reads, independent of any controller family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalAction {
    AimPose,
    GripPose,
    Grab,
    Thumbstick,
    Menu,
    Select,
    Vibrate,
}

impl LogicalAction {
    pub const ALL: [LogicalAction; 7] = [
        LogicalAction::AimPose,
        LogicalAction::GripPose,
        LogicalAction::Grab,
        LogicalAction::Thumbstick,
        LogicalAction::Menu,
        LogicalAction::Select,
        LogicalAction::Vibrate,
    ];

    pub fn kind(self) -> ActionKind {
        match self {
            LogicalAction::AimPose | LogicalAction::GripPose => ActionKind::Pose,
            LogicalAction::Grab => ActionKind::Float,
            LogicalAction::Thumbstick => ActionKind::Vector2,
            LogicalAction::Menu | LogicalAction::Select => ActionKind::Boolean,
            LogicalAction::Vibrate => ActionKind::VibrationOutput,
        }
    }

    pub fn identifier(self) -> &'static str {
        match self {
            LogicalAction::AimPose => "aim_pose",
            LogicalAction::GripPose => "grip_pose",
            LogicalAction::Grab => "grab",
            LogicalAction::Thumbstick => "thumbstick",
            LogicalAction::Menu => "menu",
            LogicalAction::Select => "select",
            LogicalAction::Vibrate => "vibrate",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LogicalAction::AimPose => "Aim pose",
            LogicalAction::GripPose => "Grip pose",
            LogicalAction::Grab => "Grab",
            LogicalAction::Thumbstick => "Thumbstick",
            LogicalAction::Menu => "Menu",
            LogicalAction::Select => "Select",
            LogicalAction::Vibrate => "Vibrate",
        }
    }
}

// Runtimes only accept lowercase ASCII letters, digits, '-', '_' and '.' in action and action set
// names. Checking here gives a precise error instead of a generic ERROR_PATH_FORMAT_INVALID.
pub fn validate_identifier(identifier: &str) -> Result<(), String> {
    if identifier.is_empty() {
        return Err("identifier is empty".into());
    }
    if identifier.len() >= MAX_NAME_SIZE {
        return Err(format!(
            "identifier {identifier:?} is longer than {} characters",
            MAX_NAME_SIZE - 1
        ));
    }
    if let Some(c) = identifier
        .chars()
        .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '.'))
    {
        return Err(format!(
            "identifier {identifier:?} contains invalid character {c:?}"
        ));
    }

    Ok(())
}

fn validate_names(identifier: &str, display_name: &str) -> InputResult {
    validate_identifier(identifier).map_err(|e| InputError::ActionCreation(anyhow!(e)))?;

    if display_name.is_empty() || display_name.len() >= MAX_LOCALIZED_NAME_SIZE {
        return Err(InputError::ActionCreation(anyhow!(
            "Invalid display name {display_name:?} for {identifier}"
        )));
    }

    Ok(())
}

fn creation_error(context: String, code: xr::sys::Result) -> InputError {
    if is_unsupported(code) {
        InputError::FeatureNotSupported(xr_error(context, code))
    } else {
        InputError::ActionCreation(xr_error(context, code))
    }
}

pub fn create_action_set<R: InputRuntime>(
    runtime: &mut R,
    name: &str,
    display_name: &str,
    priority: u32,
) -> InputResult<ActionSetHandle> {
    validate_names(name, display_name)?;

    runtime
        .create_action_set(name, display_name, priority)
        .map_err(|code| creation_error(format!("Cannot create action set {name}"), code))
}

/// Declares one action, filterable by every controller slot.
pub fn declare_action<R: InputRuntime>(
    runtime: &mut R,
    set: ActionSetHandle,
    identifier: &str,
    display_name: &str,
    kind: ActionKind,
    subaction_paths: &[xr::Path],
) -> InputResult<ActionHandle> {
    validate_names(identifier, display_name)?;

    runtime
        .create_action(set, identifier, display_name, kind, subaction_paths)
        .map_err(|code| creation_error(format!("Cannot create action {identifier}"), code))
}

/// The action set and every action declared in it.
pub struct ActionSet {
    handle: ActionSetHandle,
    aim_pose: ActionHandle,
    grip_pose: ActionHandle,
    grab: ActionHandle,
    thumbstick: ActionHandle,
    menu: ActionHandle,
    select: ActionHandle,
    vibrate: ActionHandle,
}

impl ActionSet {
    pub fn declare<R: InputRuntime>(
        runtime: &mut R,
        name: &str,
        display_name: &str,
        priority: u32,
        hand_paths: &SidePair<xr::Path>,
    ) -> InputResult<Self> {
        let handle = create_action_set(runtime, name, display_name, priority)?;
        let subaction_paths = [hand_paths.left, hand_paths.right];

        let mut declared = Vec::with_capacity(LogicalAction::ALL.len());
        for action in LogicalAction::ALL {
            match declare_action(
                runtime,
                handle,
                action.identifier(),
                action.display_name(),
                action.kind(),
                &subaction_paths,
            ) {
                Ok(action_handle) => declared.push(action_handle),
                Err(e) => {
                    // Nothing owns the partial set yet
                    runtime.destroy_action_set(handle);
                    for action_handle in declared {
                        runtime.destroy_action(action_handle);
                    }
                    return Err(e);
                }
            }
        }

        debug!("Declared {} actions in set {name}", declared.len());

        Ok(Self {
            handle,
            aim_pose: declared[0],
            grip_pose: declared[1],
            grab: declared[2],
            thumbstick: declared[3],
            menu: declared[4],
            select: declared[5],
            vibrate: declared[6],
        })
    }

    pub fn handle(&self) -> ActionSetHandle {
        self.handle
    }

    pub fn aim_pose(&self) -> ActionHandle {
        self.aim_pose
    }

    pub fn grip_pose(&self) -> ActionHandle {
        self.grip_pose
    }

    pub fn grab(&self) -> ActionHandle {
        self.grab
    }

    pub fn thumbstick(&self) -> ActionHandle {
        self.thumbstick
    }

    pub fn menu(&self) -> ActionHandle {
        self.menu
    }

    pub fn select(&self) -> ActionHandle {
        self.select
    }

    pub fn vibrate(&self) -> ActionHandle {
        self.vibrate
    }

    pub fn action(&self, action: LogicalAction) -> ActionHandle {
        match action {
            LogicalAction::AimPose => self.aim_pose,
            LogicalAction::GripPose => self.grip_pose,
            LogicalAction::Grab => self.grab,
            LogicalAction::Thumbstick => self.thumbstick,
            LogicalAction::Menu => self.menu,
            LogicalAction::Select => self.select,
            LogicalAction::Vibrate => self.vibrate,
        }
    }

    // Reverse declaration order
    pub(crate) fn teardown_order(&self) -> impl Iterator<Item = ActionHandle> + '_ {
        LogicalAction::ALL
            .into_iter()
            .rev()
            .map(|action| self.action(action))
    }
}
