use crate::{
    catalog::{ActionSet, LogicalAction},
    error::{InputError, InputResult, xr_error},
    paths,
    runtime::InputRuntime,
    slot::Side,
};
use vrsample_common::{
    ControllerInput, HTC_VIVE_PROFILE_PATH, KHR_SIMPLE_PROFILE_PATH, MICROSOFT_MOTION_PROFILE_PATH,
    OCULUS_TOUCH_PROFILE_PATH, VALVE_INDEX_PROFILE_PATH, anyhow::anyhow, debug, info, warn,
};
use vrsample_session::{BindingFailurePolicy, InteractionProfile};

/// One action-to-control association for one controller slot of a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SuggestedBinding {
    pub action: LogicalAction,
    pub side: Side,
    pub input: ControllerInput,
}

impl SuggestedBinding {
    pub fn path(&self) -> &'static str {
        self.side.input_path(self.input)
    }
}

pub fn profile_path(profile: InteractionProfile) -> &'static str {
    match profile {
        InteractionProfile::KhrSimple => KHR_SIMPLE_PROFILE_PATH,
        InteractionProfile::OculusTouch => OCULUS_TOUCH_PROFILE_PATH,
        InteractionProfile::HtcVive => HTC_VIVE_PROFILE_PATH,
        InteractionProfile::ValveIndex => VALVE_INDEX_PROFILE_PATH,
        InteractionProfile::MicrosoftMotion => MICROSOFT_MOTION_PROFILE_PATH,
    }
}

fn both(table: &mut Vec<SuggestedBinding>, action: LogicalAction, input: ControllerInput) {
    for side in Side::ALL {
        table.push(SuggestedBinding {
            action,
            side,
            input,
        });
    }
}

fn only(
    table: &mut Vec<SuggestedBinding>,
    side: Side,
    action: LogicalAction,
    input: ControllerInput,
) {
    table.push(SuggestedBinding {
        action,
        side,
        input,
    });
}

/// The bindings a profile's hardware can actually serve. Controls a family lacks are left out, the
/// corresponding action stays unbound on that hardware.
pub fn binding_table(profile: InteractionProfile) -> Vec<SuggestedBinding> {
    use ControllerInput as I;
    use LogicalAction as A;

    let mut table = Vec::with_capacity(14);

    // Identical on every profile
    both(&mut table, A::AimPose, I::AimPose);
    both(&mut table, A::GripPose, I::GripPose);
    both(&mut table, A::Vibrate, I::Haptic);

    match profile {
        // No squeeze and no thumbstick: the select button doubles as grab
        InteractionProfile::KhrSimple => {
            both(&mut table, A::Grab, I::SelectClick);
            both(&mut table, A::Menu, I::MenuClick);
            both(&mut table, A::Select, I::SelectClick);
        }
        InteractionProfile::OculusTouch => {
            both(&mut table, A::Grab, I::SqueezeValue);
            both(&mut table, A::Thumbstick, I::Thumbstick);
            // The menu button only exists on the left controller, A only on the right one
            only(&mut table, Side::Left, A::Menu, I::MenuClick);
            only(&mut table, Side::Right, A::Select, I::AClick);
        }
        // No thumbstick and no select button
        InteractionProfile::HtcVive => {
            both(&mut table, A::Grab, I::TriggerValue);
            both(&mut table, A::Menu, I::MenuClick);
        }
        InteractionProfile::ValveIndex => {
            both(&mut table, A::Grab, I::SqueezeForce);
            both(&mut table, A::Thumbstick, I::Thumbstick);
            both(&mut table, A::Menu, I::BClick);
            both(&mut table, A::Select, I::AClick);
        }
        // No select button, the menu button serves both
        InteractionProfile::MicrosoftMotion => {
            both(&mut table, A::Grab, I::SqueezeClick);
            both(&mut table, A::Thumbstick, I::Thumbstick);
            both(&mut table, A::Menu, I::MenuClick);
            both(&mut table, A::Select, I::MenuClick);
        }
    }

    table
}

/// Resolves every path of the profile's table and submits it as one suggestion.
pub fn suggest_bindings<R: InputRuntime>(
    runtime: &mut R,
    action_set: &ActionSet,
    profile: InteractionProfile,
) -> InputResult {
    let profile_handle =
        paths::resolve(runtime, profile_path(profile)).map_err(|e| e.for_profile(profile))?;

    let table = binding_table(profile);
    let mut bindings = Vec::with_capacity(table.len());
    for binding in &table {
        let path = paths::resolve(runtime, binding.path()).map_err(|e| e.for_profile(profile))?;
        bindings.push((action_set.action(binding.action), path));
    }

    runtime
        .suggest_bindings(profile_handle, &bindings)
        .map_err(|code| InputError::Binding {
            profile: Some(profile),
            source: xr_error(format!("Suggestion for {}", profile_path(profile)), code),
        })?;

    debug!(
        "Suggested {} bindings for {}",
        bindings.len(),
        profile_path(profile)
    );

    Ok(())
}

/// Suggests every requested profile independently. Returns the profiles the runtime accepted.
pub fn suggest_profiles<R: InputRuntime>(
    runtime: &mut R,
    action_set: &ActionSet,
    profiles: &[InteractionProfile],
    policy: BindingFailurePolicy,
) -> InputResult<Vec<InteractionProfile>> {
    let mut accepted = Vec::with_capacity(profiles.len());
    let mut last_error = None;

    for &profile in profiles {
        match suggest_bindings(runtime, action_set, profile) {
            Ok(()) => accepted.push(profile),
            Err(e) => match policy {
                BindingFailurePolicy::AbortStartup => return Err(e),
                BindingFailurePolicy::SkipProfile => {
                    warn!("Skipping profile {profile:?}: {e}");
                    last_error = Some(e);
                }
            },
        }
    }

    if accepted.is_empty() {
        return Err(last_error.unwrap_or_else(|| {
            InputError::FeatureNotSupported(anyhow!("No interaction profile requested"))
        }));
    }

    info!("Bound interaction profiles: {accepted:?}");

    Ok(accepted)
}
