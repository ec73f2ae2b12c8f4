use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::{Error, StripSummary};

const LOG_CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S)} {h({l:<5})} {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(LOG_CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    match fallback_config() {
        Some(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Unable to initialize logging: {}", e);
            }
        }
        None => eprintln!("Unable to build the fallback logging configuration"),
    }
}

/// console logging on stderr, used when no config file is around
fn fallback_config() -> Option<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))
        .ok()
}

pub fn log_progress(processed: usize, total: usize) {
    log::info!("processed {}/{}", processed, total);
}

pub fn log_skipped_frame(error: &Error) {
    log::warn!("Skipping frame: {}", error);
}

pub fn log_strip_summary(summary: &StripSummary) {
    log::info!(
        "Saved '{}': {} frames, {}x{} px",
        summary.output_file.display(),
        summary.frame_count,
        summary.width,
        summary.height
    );
    if summary.proportional {
        log::info!("{:.3} px per frame", summary.bar_width);
    }
}
