use std::{
    io::Write,
    sync::LazyLock,
    time::{Duration, Instant},
};
use vrsample_common::{LogSeverity, parking_lot::Mutex};

const LOG_REPEAT_TIMEOUT: Duration = Duration::from_secs(1);

struct RepeatedLogEvent {
    message: String,
    repetition_times: usize,
    initial_timestamp: Instant,
}

impl RepeatedLogEvent {
    fn empty(now: Instant) -> Self {
        Self {
            message: "".into(),
            repetition_times: 0,
            initial_timestamp: now,
        }
    }

    // Returns whether the message must be printed, and a summary of the run it ends if any
    fn record(&mut self, message: &str, now: Instant) -> (bool, Option<String>) {
        if self.message == message && self.initial_timestamp + LOG_REPEAT_TIMEOUT > now {
            self.repetition_times += 1;

            return (false, None);
        }

        let summary = (self.repetition_times > 1)
            .then(|| format!("Last log line repeated {} times", self.repetition_times));

        *self = RepeatedLogEvent {
            message: message.into(),
            repetition_times: 1,
            initial_timestamp: now,
        };

        (true, summary)
    }
}

static LAST_LOG_EVENT: LazyLock<Mutex<RepeatedLogEvent>> =
    LazyLock::new(|| Mutex::new(RepeatedLogEvent::empty(Instant::now())));

pub fn init_logging(filter_level: LogSeverity) {
    env_logger::builder()
        .filter_level(filter_level.into_level_filter())
        .format(|f, record| {
            let message = format!("{}", record.args());

            let (print, summary) = LAST_LOG_EVENT.lock().record(&message, Instant::now());
            if let Some(summary) = summary {
                writeln!(f, "[INFO] {summary}")?;
            }
            if print {
                writeln!(f, "[{}] {message}", record.level())?;
            }

            Ok(())
        })
        .try_init()
        .ok();

    vrsample_common::set_panic_hook();
}
