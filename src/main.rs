use std::process::ExitCode;

use basic_quad::config::{CONFIG_FILE, Config};
use basic_quad::driver::Driver;
use basic_quad::logging::init_logging;

fn main() -> ExitCode {
    let (config, config_error) = match Config::load(CONFIG_FILE) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(config.log_level);
    if let Some(e) = config_error {
        log::warn!("Ignoring {}: {}", CONFIG_FILE, e);
    }

    let mut driver = Driver::new(config);
    match driver.run() {
        Ok(stats) => {
            log::info!(
                "Rendered {} frames ({} indices) in {:.2}s",
                stats.frames,
                stats.indices,
                stats.elapsed.as_secs_f32()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
