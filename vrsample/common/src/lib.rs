mod logging;
mod paths;
mod primitives;

pub use anyhow;
pub use glam;
pub use log;
pub use parking_lot;

pub use log::{debug, error, info, warn};
pub use logging::*;
pub use paths::*;
pub use primitives::*;
