use crate::{
    error::{InputError, InputResult, xr_error},
    runtime::InputRuntime,
    slot::{Side, SidePair},
};
use openxr as xr;

/// Resolves a path string through the runtime. Nothing is cached, every call is a runtime query.
pub fn resolve<R: InputRuntime>(runtime: &mut R, path: &str) -> InputResult<xr::Path> {
    runtime
        .string_to_path(path)
        .map_err(|code| InputError::Binding {
            profile: None,
            source: xr_error(format!("Cannot resolve path {path}"), code),
        })
}

pub fn resolve_hand_paths<R: InputRuntime>(runtime: &mut R) -> InputResult<SidePair<xr::Path>> {
    SidePair::try_from_fn(|side: Side| resolve(runtime, side.user_path()))
}
