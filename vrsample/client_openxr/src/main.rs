mod behaviours;
mod logging_backend;

use behaviours::{GameBehaviour, InputTesterBehaviour};
use openxr as xr;
use std::{
    path::Path,
    process::ExitCode,
    thread,
    time::{Duration, Instant},
};
use vrsample_common::{
    anyhow::{Result, anyhow, bail},
    error, info, warn,
};
use vrsample_input::{InputContext, OpenXrRuntime};
use vrsample_session::{SessionConfig, load_session};

const SESSION_FILE: &str = "session.json";
const VIEW_CONFIGURATION: xr::ViewConfigurationType = xr::ViewConfigurationType::PRIMARY_STEREO;
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

fn default_view() -> xr::View {
    xr::View {
        pose: xr::Posef::IDENTITY,
        fov: xr::Fovf {
            angle_left: -0.1,
            angle_right: 0.1,
            angle_up: 0.1,
            angle_down: -0.1,
        },
    }
}

fn from_xr_duration(time: xr::Time) -> Duration {
    Duration::from_nanos(time.as_nanos() as _)
}

fn run(config: &SessionConfig) -> Result<()> {
    let xr_entry = unsafe { xr::Entry::load() }
        .map_err(|e| anyhow!("Cannot load the OpenXR loader: {e}"))?;

    let available_extensions = xr_entry.enumerate_extensions()?;
    if !available_extensions.mnd_headless {
        bail!("The OpenXR runtime does not support headless sessions");
    }

    let mut exts = xr::ExtensionSet::default();
    exts.mnd_headless = true;

    let xr_instance = xr_entry.create_instance(
        &xr::ApplicationInfo {
            application_name: &config.application_name,
            application_version: 0,
            engine_name: "vrsample",
            engine_version: 0,
        },
        &exts,
        &[],
    )?;
    let xr_system = xr_instance.system(xr::FormFactor::HEAD_MOUNTED_DISPLAY)?;

    let (xr_session, mut xr_frame_waiter, mut xr_frame_stream) = unsafe {
        xr_instance
            .create_session::<xr::Headless>(xr_system, &xr::headless::SessionCreateInfo {})?
    };

    let reference_space =
        xr_session.create_reference_space(xr::ReferenceSpaceType::LOCAL, xr::Posef::IDENTITY)?;

    let mut input = InputContext::new(
        OpenXrRuntime::new(xr_instance.clone(), xr_session.clone()),
        &config.input,
    )?;

    let mut behaviours: Vec<Box<dyn GameBehaviour>> = vec![Box::new(InputTesterBehaviour)];

    let mut session_state = xr::SessionState::UNKNOWN;
    let mut session_running = false;
    let mut last_good_views = vec![default_view(), default_view()];
    let start_instant = Instant::now();
    let mut last_frame_instant = start_instant;

    let mut event_storage = xr::EventDataBuffer::new();
    'render_loop: loop {
        while let Some(event) = xr_instance.poll_event(&mut event_storage)? {
            match event {
                xr::Event::EventsLost(event) => {
                    error!("OpenXR: lost {} events!", event.lost_event_count());
                }
                xr::Event::InstanceLossPending(_) => break 'render_loop,
                xr::Event::SessionStateChanged(event) => {
                    session_state = event.state();
                    info!("Session state: {session_state:?}");

                    match session_state {
                        xr::SessionState::READY => {
                            xr_session.begin(VIEW_CONFIGURATION)?;
                            session_running = true;
                        }
                        xr::SessionState::STOPPING => {
                            xr_session.end()?;
                            session_running = false;
                        }
                        xr::SessionState::EXITING | xr::SessionState::LOSS_PENDING => {
                            break 'render_loop;
                        }
                        _ => (),
                    }
                }
                xr::Event::InteractionProfileChanged(_) => {
                    info!("Interaction profile changed");
                }
                _ => (),
            }
        }

        if !session_running {
            thread::sleep(IDLE_POLL_INTERVAL);
            continue;
        }

        let frame_state = xr_frame_waiter.wait()?;
        xr_frame_stream.begin()?;

        match xr_session.locate_views(
            VIEW_CONFIGURATION,
            frame_state.predicted_display_time,
            &reference_space,
        ) {
            Ok((flags, views)) if flags.contains(xr::ViewStateFlags::ORIENTATION_VALID) => {
                last_good_views = views;
            }
            Ok(_) => (),
            Err(e) => warn!("Cannot locate views: {e}"),
        }

        let sync_result = input.sync(
            &reference_space,
            from_xr_duration(frame_state.predicted_display_time),
            &last_good_views,
            session_state,
        );
        if let Err(e) = sync_result {
            xr_frame_stream.end(
                frame_state.predicted_display_time,
                xr::EnvironmentBlendMode::OPAQUE,
                &[],
            )?;

            return Err(e.into());
        }

        let now = Instant::now();
        let delta_time = now - last_frame_instant;
        last_frame_instant = now;

        let (input_data, haptics) = input.frame_io();
        for behaviour in &mut behaviours {
            behaviour.update(delta_time, now - start_instant, input_data, haptics);
        }
        input.apply_haptic_feedback_requests();

        xr_frame_stream.end(
            frame_state.predicted_display_time,
            xr::EnvironmentBlendMode::OPAQUE,
            &[],
        )?;
    }

    // Input resources reference the session, release them first
    drop(input);

    info!("Exiting");

    Ok(())
}

fn main() -> ExitCode {
    let (config, config_error) = match load_session(Path::new(SESSION_FILE)) {
        Ok(config) => (config, None),
        Err(e) => (SessionConfig::default(), Some(e)),
    };

    logging_backend::init_logging(config.log_level);

    if let Some(e) = config_error {
        warn!("Cannot load {SESSION_FILE}, using defaults: {e:#}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
