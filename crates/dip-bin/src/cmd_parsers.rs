/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::parser::ValueSource::CommandLine;
use clap::ArgMatches;
use log::{info, Level};

use crate::config::{RunConfig, SpectrumSource};
use crate::errors::RunErrors;

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

/// Build the run configuration from the command line
///
/// With `--config` the file is read first and any flag given on the
/// command line replaces the value from the file.
pub fn parse_config(options: &ArgMatches) -> Result<RunConfig, RunErrors> {
    let mut config = match options.get_one::<PathBuf>("config") {
        Some(path) => {
            info!("Reading configuration from {}", path.display());
            RunConfig::from_json_file(path)?
        }
        None => {
            let input = options
                .get_one::<PathBuf>("in")
                .ok_or_else(|| RunErrors::InvalidConfig("no input file given".to_string()))?;
            let output = options
                .get_one::<PathBuf>("out")
                .ok_or_else(|| RunErrors::InvalidConfig("no output directory given".to_string()))?;

            RunConfig::new(input, output)
        }
    };

    if let Some(input) = options.get_one::<PathBuf>("in") {
        config.input.clone_from(input);
    }
    if let Some(output) = options.get_one::<PathBuf>("out") {
        config.output_dir.clone_from(output);
    }
    if let Some(radii) = options.get_many::<f64>("radius") {
        config.radii = radii.copied().collect();
        info!("Radii from command line: {:?}", config.radii);
    }
    if options.value_source("spectrum-source") == Some(CommandLine) {
        if let Some(source) = options.get_one::<SpectrumSource>("spectrum-source") {
            config.spectrum_source = *source;
        }
    }
    if let Some(prefix) = options.get_one::<String>("prefix") {
        config.prefix.clone_from(prefix);
    }
    if let Some(width) = options.get_one::<usize>("max-width") {
        config.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        config.max_height = *height;
    }
    if options.get_flag("no-threads") {
        config.threads = false;
    }
    if options.get_flag("strict") {
        config.strict_mode = true;
    }
    config.validate()?;

    Ok(config)
}
