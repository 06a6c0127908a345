/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};

use crate::config::SpectrumSource;

impl ValueEnum for SpectrumSource {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Full, Self::PassBand]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Full => PossibleValue::new("full"),
            Self::PassBand => PossibleValue::new("pass-band")
        })
    }
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("dip")
        .about("Ideal low and high pass filtering of 8-bit grayscale bitmaps in the frequency domain")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input bitmap to read")
            .value_parser(value_parser!(PathBuf))
            .required_unless_present("config"))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Directory the filtered images are written to")
            .value_parser(value_parser!(PathBuf))
            .required_unless_present_any(["config", "probe"]))
        .arg(Arg::new("radius")
            .short('r')
            .long("radius")
            .help("Cutoff radius, may be given multiple times")
            .long_help("Cutoff radius in samples from the centre of the spectrum.\nMay be given multiple times, every radius produces its own set of images.\nDefaults to 10, 30, 60, 160 and 460")
            .action(ArgAction::Append)
            .value_parser(value_parser!(f64)))
        .arg(Arg::new("config")
            .long("config")
            .help("Read the run configuration from a JSON file")
            .long_help("Read the run configuration from a JSON file.\nValues given on the command line override the ones in the file")
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print the headers of the input as JSON and exit"))
        .arg(Arg::new("prefix")
            .long("prefix")
            .help_heading("OUTPUT")
            .help("Prefix prepended to every output file name"))
        .arg(Arg::new("spectrum-source")
            .long("spectrum-source")
            .help_heading("OUTPUT")
            .help("Plane the spectrum and phase images are rendered from")
            .value_parser(value_parser!(SpectrumSource)))
        .arg(Arg::new("no-threads")
            .long("no-threads")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Process radii one after the other"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Refuse bitmaps with inconsistent headers instead of warning"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Largest accepted image width")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Largest accepted image height")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding and filtering"))
}

#[cfg(test)]
mod tests {
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn command_is_well_formed() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn output_is_required_without_config() {
        assert!(create_cmd_args()
            .try_get_matches_from(["dip", "-i", "in.bmp"])
            .is_err());
        assert!(create_cmd_args()
            .try_get_matches_from(["dip", "-i", "in.bmp", "--probe"])
            .is_ok());
        assert!(create_cmd_args()
            .try_get_matches_from(["dip", "--config", "run.json"])
            .is_ok());
    }

    #[test]
    fn spectrum_source_values() {
        assert!(create_cmd_args()
            .try_get_matches_from(["dip", "-i", "a", "-o", "b", "--spectrum-source", "pass-band"])
            .is_ok());
        assert!(create_cmd_args()
            .try_get_matches_from(["dip", "-i", "a", "-o", "b", "--spectrum-source", "half"])
            .is_err());
    }
}
