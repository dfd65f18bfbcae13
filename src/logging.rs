//! Setup for the test run logging.
//!
//! It redirects the freeze scope events to the standard output with the
//! threshold defined in the configuration.
//!
//! - `Off`
//! - `Error`
//! - `Warn`
//! - `Info`
//! - `Debug`
//! - `Trace`
//!
//! At `info` a line is written when a scope is entered or exited, at `debug`
//! one for each accessor installed or restored.
use std::sync::Once;

use freezeclock_configuration::{Configuration, Style, Threshold};
use tracing::info;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// It redirects the log info to the standard output with the threshold and
/// style defined in the configuration. Only the first call in a process has an
/// effect.
pub fn setup(cfg: &Configuration) {
    let tracing_level = map_to_tracing_level_filter(&cfg.logging.threshold);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stdout_init(tracing_level, &TraceStyle::from(cfg.logging.style));
    });
}

fn map_to_tracing_level_filter(threshold: &Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stdout_init(filter: LevelFilter, style: &TraceStyle) {
    let builder = tracing_subscriber::fmt().with_max_level(filter).with_test_writer();

    // A subscriber may already be set by the test harness of the host crate.
    let result = match style {
        TraceStyle::Default => builder.try_init(),
        TraceStyle::Pretty(display_filename) => builder.pretty().with_file(*display_filename).try_init(),
        TraceStyle::Compact => builder.compact().try_init(),
        TraceStyle::Json => builder.json().try_init(),
    };

    if result.is_ok() {
        info!("Logging initialized: {style}");
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TraceStyle {
    Default,
    Pretty(bool),
    Compact,
    Json,
}

impl From<Style> for TraceStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Default => TraceStyle::Default,
            Style::Pretty => TraceStyle::Pretty(true),
            Style::Compact => TraceStyle::Compact,
            Style::Json => TraceStyle::Json,
        }
    }
}

impl std::fmt::Display for TraceStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let style = match self {
            TraceStyle::Default => "Default Style",
            TraceStyle::Pretty(true) => "Pretty Style with File Paths",
            TraceStyle::Pretty(false) => "Pretty Style without File Paths",
            TraceStyle::Compact => "Compact Style",
            TraceStyle::Json => "Json Format",
        };

        f.write_str(style)
    }
}

#[cfg(test)]
mod tests {
    use freezeclock_configuration::{Style, Threshold};
    use tracing::level_filters::LevelFilter;

    use super::{map_to_tracing_level_filter, TraceStyle};

    #[test]
    fn every_threshold_should_map_to_the_level_filter_of_the_same_name() {
        assert_eq!(map_to_tracing_level_filter(&Threshold::Off), LevelFilter::OFF);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Warn), LevelFilter::WARN);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn the_pretty_style_should_display_file_paths() {
        assert_eq!(TraceStyle::from(Style::Pretty), TraceStyle::Pretty(true));
        assert_eq!(TraceStyle::from(Style::Pretty).to_string(), "Pretty Style with File Paths");
    }
}
