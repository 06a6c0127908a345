/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use dip_bmp::BmpErrors;
use dip_fft::FftErrors;

/// Errors that stop a run, or a single radius of a run
pub enum RunErrors {
    /// The run configuration does not make sense
    InvalidConfig(String),
    /// A configuration file is not valid JSON for a run configuration
    ConfigParse(PathBuf, serde_json::Error),
    /// Producing JSON output failed
    JsonError(serde_json::Error),
    /// A file or directory could not be read or created
    IoError(PathBuf, std::io::Error),
    /// Loading the input or storing an artifact failed
    BmpErrors(BmpErrors),
    /// Transforming the image failed for the given radius
    FftErrors(f64, FftErrors),
    /// The thread running the given radius panicked
    WorkerPanicked(f64)
}

impl RunErrors {
    /// The radius this error belongs to, if it belongs to one
    pub fn radius(&self) -> Option<f64> {
        match self {
            RunErrors::FftErrors(radius, _) | RunErrors::WorkerPanicked(radius) => Some(*radius),
            _ => None
        }
    }
}

impl Debug for RunErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidConfig(reason) => {
                writeln!(f, "Invalid configuration: {reason}")
            }
            Self::ConfigParse(path, err) => {
                writeln!(f, "Could not parse config {}: {err}", path.display())
            }
            Self::JsonError(err) => {
                writeln!(f, "JSON error: {err}")
            }
            Self::IoError(path, err) => {
                writeln!(f, "I/O error on {}: {err}", path.display())
            }
            Self::BmpErrors(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::FftErrors(radius, err) => {
                writeln!(f, "Radius {radius}: {:?}", err)
            }
            Self::WorkerPanicked(radius) => {
                writeln!(f, "Radius {radius}: worker thread panicked")
            }
        }
    }
}

impl Display for RunErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for RunErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigParse(_, err) | Self::JsonError(err) => Some(err),
            Self::IoError(_, err) => Some(err),
            Self::BmpErrors(err) => Some(err),
            Self::FftErrors(_, err) => Some(err),
            _ => None
        }
    }
}

impl From<BmpErrors> for RunErrors {
    fn from(value: BmpErrors) -> Self {
        RunErrors::BmpErrors(value)
    }
}

impl From<serde_json::Error> for RunErrors {
    fn from(value: serde_json::Error) -> Self {
        RunErrors::JsonError(value)
    }
}
