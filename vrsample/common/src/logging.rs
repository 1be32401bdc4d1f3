use backtrace::Backtrace;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogSeverity {
    Error = 3,
    Warning = 2,
    #[default]
    Info = 1,
    Debug = 0,
}

impl LogSeverity {
    pub fn into_level_filter(self) -> log::LevelFilter {
        match self {
            LogSeverity::Error => log::LevelFilter::Error,
            LogSeverity::Warning => log::LevelFilter::Warn,
            LogSeverity::Info => log::LevelFilter::Info,
            LogSeverity::Debug => log::LevelFilter::Debug,
        }
    }
}

pub fn set_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!(
            "What happened:\n{panic_info}\n\nBacktrace:\n{:?}",
            Backtrace::new()
        );
    }))
}
