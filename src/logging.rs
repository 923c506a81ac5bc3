use crate::constants::DEFAULT_LOG_TARGET;
use log::{Level, Log, Metadata, Record};
use std::fmt;
use std::sync::Arc;

/// Level used for detail messages: parsed template texts, execution inputs
/// and rendered outputs.
pub const DETAIL_LEVEL: Level = Level::Debug;

#[derive(Clone)]
enum Sink {
    /// Whatever logger is installed in the `log` facade.
    Global,
    Custom(Arc<dyn Log>),
}

/// Handle to the logging sink used by templates.
///
/// Detail messages can be large (whole template bodies), so callers check
/// [`Logger::detail_enabled`] before formatting them.
#[derive(Clone)]
pub struct Logger {
    sink: Sink,
    target: String,
}

impl Logger {
    /// Creates a logger writing to the given sink under `target`.
    pub fn new(sink: Arc<dyn Log>, target: impl Into<String>) -> Self {
        Self {
            sink: Sink::Custom(sink),
            target: target.into(),
        }
    }

    /// Creates a logger writing to the logger installed in the `log` facade.
    pub fn global(target: impl Into<String>) -> Self {
        Self {
            sink: Sink::Global,
            target: target.into(),
        }
    }

    fn sink(&self) -> &dyn Log {
        match &self.sink {
            Sink::Global => log::logger(),
            Sink::Custom(sink) => sink.as_ref(),
        }
    }

    /// Whether detail messages would be recorded by the sink.
    pub fn detail_enabled(&self) -> bool {
        if matches!(self.sink, Sink::Global) && DETAIL_LEVEL > log::max_level() {
            return false;
        }
        let metadata = Metadata::builder()
            .level(DETAIL_LEVEL)
            .target(&self.target)
            .build();
        self.sink().enabled(&metadata)
    }

    /// Records a detail message. The message is dropped when detail messages
    /// are disabled.
    pub fn detail(&self, message: &str) {
        if !self.detail_enabled() {
            return;
        }
        self.sink().log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(DETAIL_LEVEL)
                .target(&self.target)
                .module_path(Some(module_path!()))
                .build(),
        );
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::global(DEFAULT_LOG_TARGET)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match self.sink {
            Sink::Global => "global",
            Sink::Custom(_) => "custom",
        };
        f.debug_struct("Logger")
            .field("sink", &sink)
            .field("target", &self.target)
            .finish()
    }
}
