macro_rules! interaction_profile {
    ($ty:ident, $path:expr) => {
        paste::paste! {
            pub const [<$ty _PROFILE_PATH>]: &str = concat!("/interaction_profiles/", $path);
        }
    };
}

interaction_profile!(KHR_SIMPLE, "khr/simple_controller");
interaction_profile!(OCULUS_TOUCH, "oculus/touch_controller");
interaction_profile!(HTC_VIVE, "htc/vive_controller");
interaction_profile!(VALVE_INDEX, "valve/index_controller");
interaction_profile!(MICROSOFT_MOTION, "microsoft/motion_controller");

pub const HAND_LEFT_PATH: &str = "/user/hand/left";
pub const HAND_RIGHT_PATH: &str = "/user/hand/right";

macro_rules! controller_inputs {
    ($(($variant:ident, $name:ident, $suffix:literal),)*) => {
        paste::paste! {
            $(
                pub const [<LEFT_ $name _PATH>]: &str = concat!("/user/hand/left/", $suffix);
                pub const [<RIGHT_ $name _PATH>]: &str = concat!("/user/hand/right/", $suffix);
            )*

            /// Physical control found on at least one supported controller family.
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub enum ControllerInput {
                $($variant,)*
            }

            impl ControllerInput {
                pub const fn left_path(self) -> &'static str {
                    match self {
                        $(Self::$variant => [<LEFT_ $name _PATH>],)*
                    }
                }

                pub const fn right_path(self) -> &'static str {
                    match self {
                        $(Self::$variant => [<RIGHT_ $name _PATH>],)*
                    }
                }
            }
        }
    };
}

controller_inputs! {
    (AimPose, AIM_POSE, "input/aim/pose"),
    (GripPose, GRIP_POSE, "input/grip/pose"),
    (TriggerValue, TRIGGER_VALUE, "input/trigger/value"),
    (SqueezeValue, SQUEEZE_VALUE, "input/squeeze/value"),
    (SqueezeForce, SQUEEZE_FORCE, "input/squeeze/force"),
    (SqueezeClick, SQUEEZE_CLICK, "input/squeeze/click"),
    (Thumbstick, THUMBSTICK, "input/thumbstick"),
    (MenuClick, MENU_CLICK, "input/menu/click"),
    (SelectClick, SELECT_CLICK, "input/select/click"),
    (AClick, A_CLICK, "input/a/click"),
    (BClick, B_CLICK, "input/b/click"),
    (Haptic, HAPTIC, "output/haptic"),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_paths_are_rooted_at_the_hand() {
        assert_eq!(
            ControllerInput::SqueezeForce.left_path(),
            "/user/hand/left/input/squeeze/force"
        );
        assert_eq!(
            ControllerInput::Haptic.right_path(),
            "/user/hand/right/output/haptic"
        );
        assert!(ControllerInput::AClick.right_path().starts_with(HAND_RIGHT_PATH));
    }

    #[test]
    fn profile_paths() {
        assert_eq!(
            VALVE_INDEX_PROFILE_PATH,
            "/interaction_profiles/valve/index_controller"
        );
        assert_eq!(
            KHR_SIMPLE_PROFILE_PATH,
            "/interaction_profiles/khr/simple_controller"
        );
    }
}
