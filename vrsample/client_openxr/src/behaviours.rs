use std::time::Duration;
use vrsample_common::{debug, info};
use vrsample_input::{HapticsQueue, InputSnapshot};

const GRAB_THRESHOLD: f32 = 0.05;
const THUMBSTICK_DEADZONE: f32 = 0.05;

/// Gameplay logic driven once per frame. Implementations must not keep references into the
/// snapshot past the call.
pub trait GameBehaviour {
    fn update(
        &mut self,
        delta_time: Duration,
        game_time: Duration,
        input: &InputSnapshot,
        haptics: &mut HapticsQueue,
    );
}

/// Logs button and thumbstick activity and vibrates the controllers while they grab.
#[derive(Default)]
pub struct InputTesterBehaviour;

impl GameBehaviour for InputTesterBehaviour {
    fn update(
        &mut self,
        _: Duration,
        _: Duration,
        input: &InputSnapshot,
        haptics: &mut HapticsQueue,
    ) {
        for (side, controller) in input.controllers.iter() {
            let grab = controller.grab;
            if grab.is_active && grab.value > GRAB_THRESHOLD {
                debug!("{side:?} controller grabbing: {:.2}", grab.value);
                haptics.request_default(side);
            }

            if controller.select.is_active && controller.select.value {
                info!("{side:?} select pressed");
            }

            if controller.menu.is_active && controller.menu.value {
                info!("{side:?} menu pressed");
            }

            let stick = controller.thumbstick;
            if stick.is_active
                && (stick.value.x.abs() > THUMBSTICK_DEADZONE
                    || stick.value.y.abs() > THUMBSTICK_DEADZONE)
            {
                debug!(
                    "{side:?} thumbstick: x={:.2} y={:.2}",
                    stick.value.x, stick.value.y
                );
            }
        }
    }
}
