use serde::{Deserialize, Serialize};

/// Controller families the sample ships binding tables for.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum InteractionProfile {
    KhrSimple,
    OculusTouch,
    HtcVive,
    ValveIndex,
    MicrosoftMotion,
}

impl InteractionProfile {
    pub const ALL: [InteractionProfile; 5] = [
        InteractionProfile::KhrSimple,
        InteractionProfile::OculusTouch,
        InteractionProfile::HtcVive,
        InteractionProfile::ValveIndex,
        InteractionProfile::MicrosoftMotion,
    ];
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum BindingFailurePolicy {
    // Any rejected profile aborts startup
    #[default]
    AbortStartup,
    // A rejected profile is logged and left unbound. Startup still fails if no profile was accepted
    SkipProfile,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum LocateFailurePolicy {
    #[default]
    FailFrame,
    RetainLastPose,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HapticsConfig {
    pub amplitude: f32,
    // None selects the shortest pulse the runtime supports
    pub duration_ms: Option<u64>,
    // None lets the runtime pick the frequency
    pub frequency: Option<f32>,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.3,
            duration_ms: None,
            frequency: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InputConfig {
    pub action_set_name: String,
    pub action_set_display_name: String,
    pub action_set_priority: u32,
    pub profiles: Vec<InteractionProfile>,
    pub binding_failure: BindingFailurePolicy,
    pub locate_failure: LocateFailurePolicy,
    pub haptics: HapticsConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            action_set_name: "gameplay".into(),
            action_set_display_name: "Gameplay".into(),
            action_set_priority: 0,
            profiles: InteractionProfile::ALL.to_vec(),
            binding_failure: BindingFailurePolicy::default(),
            locate_failure: LocateFailurePolicy::default(),
            haptics: HapticsConfig::default(),
        }
    }
}
