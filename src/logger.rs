//! Logger handle carried by each tree.

use log::{Level, Log, Record};
use std::fmt;
use std::sync::Arc;

const TARGET: &str = "splay_collections";

/// Where a tree sends its log records.
///
/// By default records go through the process-wide `log` facade. A tree can instead be given its
/// own `log::Log` implementation, which travels with the tree when it is moved, swapped or
/// cloned.
///
/// # Examples
///
/// ```
/// use splay_collections::config::Config;
/// use splay_collections::compare::Natural;
/// use splay_collections::logger::Logger;
/// use splay_collections::splay_tree::SplayMap;
/// use std::sync::Arc;
///
/// let log: Arc<simplelog::SimpleLogger> = Arc::from(simplelog::SimpleLogger::new(
///     log::LevelFilter::Debug,
///     simplelog::Config::default(),
/// ));
/// let logger = Logger::new(log);
/// let mut map = SplayMap::with_config(Natural, Config::default().logger(logger));
/// map.insert(1, 1);
/// ```
#[derive(Clone, Default)]
pub struct Logger {
    inner: Option<Arc<dyn Log>>,
}

impl Logger {
    /// Returns a handle that writes to `log`.
    pub fn new(log: Arc<dyn Log>) -> Self {
        Logger { inner: Some(log) }
    }

    /// Returns a handle that writes to the global `log` facade.
    pub fn global() -> Self {
        Logger { inner: None }
    }

    pub fn log(&self, level: Level, args: fmt::Arguments) {
        match self.inner {
            Some(ref log) => {
                let record = Record::builder()
                    .args(args)
                    .level(level)
                    .target(TARGET)
                    .module_path_static(Some(module_path!()))
                    .build();
                if log.enabled(record.metadata()) {
                    log.log(&record);
                }
            },
            None => log::log!(target: TARGET, level, "{}", args),
        }
    }

    pub fn trace(&self, args: fmt::Arguments) {
        self.log(Level::Trace, args);
    }

    pub fn debug(&self, args: fmt::Arguments) {
        self.log(Level::Debug, args);
    }

    pub fn warn(&self, args: fmt::Arguments) {
        self.log(Level::Warn, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner {
            Some(_) => f.write_str("Logger(custom)"),
            None => f.write_str("Logger(global)"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Logger;
    use log::{Level, Log, Metadata, Record};
    use std::sync::{Arc, Mutex};

    /// Collects formatted records so tests can assert on them.
    #[derive(Default)]
    pub struct RecordingLog {
        pub records: Mutex<Vec<(Level, String)>>,
    }

    impl Log for RecordingLog {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_custom_logger_receives_records() {
        let log = Arc::new(RecordingLog::default());
        let logger = Logger::new(log.clone());
        logger.debug(format_args!("cleared {} nodes", 3));
        logger.trace(format_args!("splayed"));

        let records = log.records.lock().unwrap();
        assert_eq!(
            *records,
            vec![
                (Level::Debug, String::from("cleared 3 nodes")),
                (Level::Trace, String::from("splayed")),
            ],
        );
    }

    #[test]
    fn test_global_logger_is_silent_without_backend() {
        Logger::global().warn(format_args!("nobody is listening"));
    }
}
