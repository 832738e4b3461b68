use clap::{crate_version, value_parser, Arg, ArgAction, Command};
use log::{error, info};
use simplelog::{
    format_description, ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger,
    TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use arm_force_field::application;
use arm_force_field::utility::get_parameter;

fn main() {
    // Parse the command line arguments
    let matches = Command::new("arm force field")
        .version(crate_version!())
        .about("Maximum manual arm strength of both arms in a posture.")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Scenario file of the posture. Default is the scenario in the application parameters.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("percent_capable")
                .short('p')
                .long("percent-capable")
                .help("Percentage of the population capable of the strength to override the population file. Default is 0, which means no override.")
                .default_value("0")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("population")
                .short('o')
                .long("population")
                .help("Population file. Default is the population in the application parameters.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the result as JSON"),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("log-level")
                .help("Log level: 0 (Off), 1 (Error), 2 (Warn), 3 (Info), 4 (Debug), 5 (Trace)")
                .default_value("3")
                .value_parser(value_parser!(u32)),
        )
        .get_matches();

    let filepath_scenario = matches.get_one::<PathBuf>("input");
    let percent_capable = matches
        .get_one::<f64>("percent_capable")
        .copied()
        .unwrap_or(0.0);
    let filepath_population = matches.get_one::<PathBuf>("population");
    let is_json = matches.get_flag("json");

    // Check the log filter
    let log_filter = get_log_filter(matches.get_one::<u32>("level"));

    // Initiate the logger
    let log_file = get_parameter::<String>(Path::new("config/parameters_app.yaml"), "log_file")
        .unwrap_or_else(|_| String::from("application.log"));
    initiate_logger(log_filter, &log_file);
    info!("Log level: {log_filter}.");

    // Run the application
    if let Err(error) = application::run(
        filepath_scenario.map(PathBuf::as_path),
        percent_capable,
        filepath_population.map(PathBuf::as_path),
        is_json,
    ) {
        error!("{error}");
        process::exit(1);
    }
}

/// Get the log filter.
///
/// # Arguments
/// * `log_level` - Log level.
///
/// # Returns
/// Log filter.
fn get_log_filter(log_level: Option<&u32>) -> LevelFilter {
    match log_level {
        Some(level) => match level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Info,
    }
}

/// Initiate the logger.
///
/// # Arguments
/// * `level` - Log level.
/// * `filepath` - Log file path.
fn initiate_logger(level: LevelFilter, filepath: &str) {
    let config = ConfigBuilder::new()
        .set_time_format_custom(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second].[subsecond]"
        ))
        .build();

    // Log to the terminal and file
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    match File::create(filepath) {
        Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
        Err(error) => eprintln!("Failed to create the log file {filepath}: {error}."),
    }

    let _ = CombinedLogger::init(loggers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_filter() {
        assert_eq!(get_log_filter(Some(&0)), LevelFilter::Off);
        assert_eq!(get_log_filter(Some(&1)), LevelFilter::Error);
        assert_eq!(get_log_filter(Some(&2)), LevelFilter::Warn);
        assert_eq!(get_log_filter(Some(&3)), LevelFilter::Info);
        assert_eq!(get_log_filter(Some(&4)), LevelFilter::Debug);
        assert_eq!(get_log_filter(Some(&5)), LevelFilter::Trace);

        assert_eq!(get_log_filter(Some(&6)), LevelFilter::Info);

        assert_eq!(get_log_filter(None), LevelFilter::Info);
    }
}
