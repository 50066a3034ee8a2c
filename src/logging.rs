//! Console logging.

use std::sync::Once;

/// Target for driver information that is printed regardless of the configured level.
pub const GL_INFO_TARGET: &str = "gl";

static INIT: Once = Once::new();

/// Formats one log line as `[time level target] message`.
fn format_line(
    time: &chrono::DateTime<chrono::Local>,
    level: log::Level,
    target: &str,
    message: &std::fmt::Arguments,
) -> String {
    format!(
        "[{} {:<5} {}] {}",
        time.format("%H:%M:%S%.3f"),
        level,
        target,
        message
    )
}

fn dispatch(level: log::LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                format_line(&chrono::Local::now(), record.level(), record.target(), message)
            ))
        })
        .level(level)
        .level_for(GL_INFO_TARGET, log::LevelFilter::Info)
}

/// Installs the global logger writing to stdout. Later calls are ignored.
pub fn init_logging(level: log::LevelFilter) {
    INIT.call_once(|| {
        if let Err(e) = dispatch(level).chain(std::io::stdout()).apply() {
            eprintln!("Failed to install logger: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use chrono::TimeZone;
    use log::Log;

    use super::*;

    #[test]
    fn test_line_format() {
        let time = chrono::Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let line = format_line(&time, log::Level::Info, "basic_quad", &format_args!("hello {}", 1));
        assert_eq!(line, "[03:04:05.000 INFO  basic_quad] hello 1");
    }

    #[test]
    fn test_gl_info_survives_quiet_level() {
        let (tx, rx) = mpsc::channel();
        let (_, logger) = dispatch(log::LevelFilter::Warn).chain(tx).into_log();

        logger.log(
            &log::Record::builder()
                .target(GL_INFO_TARGET)
                .level(log::Level::Info)
                .args(format_args!("3.3.0 Mesa"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .target("basic_quad::driver")
                .level(log::Level::Info)
                .args(format_args!("hidden"))
                .build(),
        );

        let lines: Vec<String> = rx.try_iter().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].trim_end().ends_with("gl] 3.3.0 Mesa"));
    }

    #[test]
    fn test_init_twice_keeps_first_level() {
        init_logging(log::LevelFilter::Warn);
        init_logging(log::LevelFilter::Debug);

        assert!(log::log_enabled!(log::Level::Warn));
        assert!(!log::log_enabled!(log::Level::Debug));
        assert!(log::log_enabled!(target: GL_INFO_TARGET, log::Level::Info));
    }
}
