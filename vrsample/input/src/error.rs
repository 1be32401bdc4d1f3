use openxr as xr;
use std::{error::Error, fmt::Display};
use vrsample_common::anyhow::{self, anyhow};
use vrsample_session::InteractionProfile;

pub enum InputError {
    FeatureNotSupported(anyhow::Error),
    ActionCreation(anyhow::Error),
    Binding {
        // None when the path was not resolved on behalf of a specific profile
        profile: Option<InteractionProfile>,
        source: anyhow::Error,
    },
    SpaceCreation(anyhow::Error),
    Sync(anyhow::Error),
    Locate(anyhow::Error),
}

impl InputError {
    fn inner(&self) -> &anyhow::Error {
        match self {
            InputError::FeatureNotSupported(e)
            | InputError::ActionCreation(e)
            | InputError::Binding { source: e, .. }
            | InputError::SpaceCreation(e)
            | InputError::Sync(e)
            | InputError::Locate(e) => e,
        }
    }

    pub(crate) fn for_profile(self, profile: InteractionProfile) -> Self {
        match self {
            InputError::Binding { source, .. } => InputError::Binding {
                profile: Some(profile),
                source,
            },
            other => other,
        }
    }
}

impl Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let e = self.inner();
        match self {
            InputError::FeatureNotSupported(_) => write!(f, "Feature not supported: {e:#}"),
            InputError::ActionCreation(_) => write!(f, "Action creation failed: {e:#}"),
            InputError::Binding {
                profile: Some(profile),
                ..
            } => write!(f, "Bindings for {profile:?} rejected: {e:#}"),
            InputError::Binding { profile: None, .. } => write!(f, "Binding failed: {e:#}"),
            InputError::SpaceCreation(_) => write!(f, "Space creation failed: {e:#}"),
            InputError::Sync(_) => write!(f, "Action sync failed: {e:#}"),
            InputError::Locate(_) => write!(f, "Space locate failed: {e:#}"),
        }
    }
}

impl std::fmt::Debug for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&**self.inner())
    }
}

pub type InputResult<T = ()> = Result<T, InputError>;

// Result codes meaning the runtime lacks a capability rather than rejecting our input
pub(crate) fn is_unsupported(code: xr::sys::Result) -> bool {
    matches!(
        code,
        xr::sys::Result::ERROR_FEATURE_UNSUPPORTED
            | xr::sys::Result::ERROR_EXTENSION_NOT_PRESENT
            | xr::sys::Result::ERROR_PATH_UNSUPPORTED
            | xr::sys::Result::ERROR_FUNCTION_UNSUPPORTED
    )
}

pub(crate) fn xr_error(context: impl Display, code: xr::sys::Result) -> anyhow::Error {
    anyhow!("{context}: {code}")
}
