// An invalid split name logs exactly one warning and falls back to train.
//
// Kept in its own test binary because it installs a global logger.

use std::sync::atomic::{AtomicUsize, Ordering};

use caltech_data::{CaltechConfig, Split};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CountingLogger {
    warnings: AtomicUsize,
}

impl Log for CountingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static LOGGER: CountingLogger = CountingLogger {
    warnings: AtomicUsize::new(0),
};

#[test]
fn invalid_split_warns_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    assert_eq!(Split::coerce("train"), Split::Train);
    assert_eq!(Split::coerce("test"), Split::Test);
    assert_eq!(LOGGER.warnings.load(Ordering::SeqCst), 0);

    let cfg = CaltechConfig::default().split_name("foo");
    assert_eq!(cfg.split, Split::Train);
    assert_eq!(cfg.manifest_path(), CaltechConfig::default().manifest_path());
    assert_eq!(LOGGER.warnings.load(Ordering::SeqCst), 1);
}
