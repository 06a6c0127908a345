/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;
use std::process::exit;

use log::{error, info};

pub use crate::config::{Artifact, RunConfig, SpectrumSource, DEFAULT_RADII};
pub use crate::errors::RunErrors;
pub use crate::probe::probe_input;
pub use crate::workflow::{execute, run_radius, RadiusReport};

mod cmd_args;
mod cmd_parsers;
mod config;
mod errors;
mod probe;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::setup_logger(&options);

    if options.get_flag("probe") {
        let Some(input) = options.get_one::<PathBuf>("in") else {
            error!("--probe needs an input file");
            exit(-1);
        };
        match probe_input(input) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("Could not probe {}, reason {:?}", input.display(), err);
                exit(-1);
            }
        }
        return;
    }

    let result = cmd_parsers::parse_config(&options).and_then(|config| execute(&config));

    match result {
        Ok(results) => {
            let total = results.len();
            let mut failed = 0;

            for result in results {
                match result {
                    Ok(report) => {
                        info!(
                            "Radius {} written to {}",
                            report.radius,
                            report.low_pass.display()
                        );
                    }
                    Err(err) => {
                        failed += 1;
                        error!("{:?}", err);
                    }
                }
            }
            if failed > 0 {
                println!();
                error!(" {failed} of {total} radii failed");
                println!();
                exit(-1);
            }
        }
        Err(err) => {
            println!();
            error!(" Could not complete workflow, reason {:?}", err);
            println!();
            exit(-1);
        }
    }
}
