use std::io::IsTerminal;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Install a stderr logger. `verbosity` counts `-v` flags.
pub fn init(verbosity: u8) {
    let result = if std::io::stderr().is_terminal() {
        log::set_boxed_logger(Box::new(ColorLogger))
    } else {
        log::set_boxed_logger(Box::new(PlainLogger))
    };
    if result.is_err() {
        return;
    }

    log::set_max_level(match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
}

/// Dumps everything to stderr.
struct PlainLogger;

impl Log for PlainLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("{}: {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Colorizes the level and writes to stderr.
struct ColorLogger;

impl Log for ColorLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        match record.level() {
            Level::Error => eprintln!("\x1b[1m\x1b[31merror\x1b[0m: {}", record.args()),
            Level::Warn => eprintln!("\x1b[1m\x1b[33mwarn\x1b[0m: {}", record.args()),
            Level::Info => eprintln!("\x1b[1m\x1b[32minfo\x1b[0m: {}", record.args()),
            Level::Debug => eprintln!("\x1b[1m\x1b[36mdebug\x1b[0m: {}", record.args()),
            Level::Trace => eprintln!("\x1b[1m\x1b[37mtrace\x1b[0m: {}", record.args()),
        }
    }

    fn flush(&self) {}
}
