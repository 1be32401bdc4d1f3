use crate::{
    runtime::{ActionHandle, InputRuntime, Vibration},
    slot::{ControllerSlot, Side, SidePair},
};
use openxr as xr;
use std::time::Duration;
use vrsample_common::warn;
use vrsample_session::HapticsConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticDuration {
    // Shortest pulse the runtime can produce
    Minimum,
    Exact(Duration),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HapticsRequest {
    pub amplitude: f32,
    pub duration: HapticDuration,
    // None lets the runtime choose
    pub frequency: Option<f32>,
}

impl HapticsRequest {
    fn to_vibration(self) -> Vibration {
        Vibration {
            amplitude: self.amplitude,
            duration: match self.duration {
                HapticDuration::Minimum => xr::Duration::MIN_HAPTIC,
                HapticDuration::Exact(duration) => {
                    xr::Duration::from_nanos(duration.as_nanos() as _)
                }
            },
            frequency: self.frequency.unwrap_or(xr::sys::FREQUENCY_UNSPECIFIED),
        }
    }
}

/// Vibration requests collected during a frame, at most one per side.
pub struct HapticsQueue {
    pending: SidePair<Option<HapticsRequest>>,
    defaults: HapticsRequest,
}

impl HapticsQueue {
    pub fn new(config: &HapticsConfig) -> Self {
        Self {
            pending: SidePair::default(),
            defaults: HapticsRequest {
                amplitude: config.amplitude,
                duration: match config.duration_ms {
                    Some(ms) => HapticDuration::Exact(Duration::from_millis(ms)),
                    None => HapticDuration::Minimum,
                },
                frequency: config.frequency,
            },
        }
    }

    /// Replaces any request not yet flushed for this side. Amplitude is passed through unclamped.
    pub fn request(
        &mut self,
        side: Side,
        amplitude: f32,
        duration: HapticDuration,
        frequency: Option<f32>,
    ) {
        self.pending[side] = Some(HapticsRequest {
            amplitude,
            duration,
            frequency,
        });
    }

    pub fn request_default(&mut self, side: Side) {
        self.pending[side] = Some(self.defaults);
    }

    pub fn pending(&self, side: Side) -> Option<&HapticsRequest> {
        self.pending[side].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.left.is_none() && self.pending.right.is_none()
    }

    /// Sends one pulse per pending side, then clears the queue whatever the outcome. Failed pulses
    /// are not retried.
    pub fn flush<R: InputRuntime>(
        &mut self,
        runtime: &mut R,
        vibrate_action: ActionHandle,
        slots: &SidePair<ControllerSlot>,
    ) {
        for side in Side::ALL {
            let Some(request) = self.pending[side].take() else {
                continue;
            };

            if let Err(code) =
                runtime.apply_vibration(vibrate_action, slots[side].path, &request.to_vibration())
            {
                warn!("Haptic pulse on {side:?} controller failed: {code}");
            }
        }
    }
}
