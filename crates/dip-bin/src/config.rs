/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Run configuration
//!
//! A run reads one bitmap and, for every cutoff radius, writes four artifacts
//! into the output directory:
//!
//! | File              | Contents                                     |
//! |-------------------|----------------------------------------------|
//! | `ILPF_<r>.bmp`    | reconstruction of the samples within `r`     |
//! | `IHPF_<r>.bmp`    | reconstruction of the samples outside `r`    |
//! | `spectrum_<r>.bmp`| log scaled magnitude                         |
//! | `phase_<r>.bmp`   | phase angle                                  |
//!
//! Configurations are built from command line flags or read from JSON, e.g.
//! ```json
//! {
//!     "input": "lena.bmp",
//!     "output_dir": "out",
//!     "radii": [10, 30, 60],
//!     "spectrum_source": "pass-band"
//! }
//! ```
use std::path::{Path, PathBuf};

use dip_core::options::DecoderOptions;
use serde::{Deserialize, Serialize};

use crate::errors::RunErrors;

/// Cutoff radii used when none are configured
pub const DEFAULT_RADII: [f64; 5] = [10.0, 30.0, 60.0, 160.0, 460.0];

/// Which plane the spectrum and phase images are rendered from
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpectrumSource {
    /// The whole centred spectrum, identical for every radius
    #[default]
    Full,
    /// Only the samples outside the radius
    PassBand
}

/// The four images written per radius
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Artifact {
    LowPass,
    HighPass,
    Spectrum,
    Phase
}

impl Artifact {
    pub const fn name(self) -> &'static str {
        match self {
            Artifact::LowPass => "ILPF",
            Artifact::HighPass => "IHPF",
            Artifact::Spectrum => "spectrum",
            Artifact::Phase => "phase"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub input:           PathBuf,
    pub output_dir:      PathBuf,
    #[serde(default = "default_radii")]
    pub radii:           Vec<f64>,
    /// Run radii concurrently
    #[serde(default = "default_threads")]
    pub threads:         bool,
    #[serde(default)]
    pub spectrum_source: SpectrumSource,
    /// Prepended to every artifact file name
    #[serde(default)]
    pub prefix:          String,
    #[serde(default)]
    pub strict_mode:     bool,
    #[serde(default = "default_max_dimension")]
    pub max_width:       usize,
    #[serde(default = "default_max_dimension")]
    pub max_height:      usize
}

fn default_radii() -> Vec<f64> {
    DEFAULT_RADII.to_vec()
}

const fn default_threads() -> bool {
    true
}

fn default_max_dimension() -> usize {
    DecoderOptions::default().max_width()
}

impl RunConfig {
    /// A configuration with every optional field at its default
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output_dir: Q) -> RunConfig {
        RunConfig {
            input:           input.into(),
            output_dir:      output_dir.into(),
            radii:           default_radii(),
            threads:         default_threads(),
            spectrum_source: SpectrumSource::default(),
            prefix:          String::new(),
            strict_mode:     false,
            max_width:       default_max_dimension(),
            max_height:      default_max_dimension()
        }
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<RunConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a JSON configuration from `path`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<RunConfig, RunErrors> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| RunErrors::IoError(path.into(), e))?;

        RunConfig::from_json_str(&contents).map_err(|e| RunErrors::ConfigParse(path.into(), e))
    }

    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions::default()
            .set_max_width(self.max_width)
            .set_max_height(self.max_height)
            .set_strict_mode(self.strict_mode)
    }

    /// Where `artifact` for `radius` is written
    ///
    /// Radii are printed the shortest way that reads back the same,
    /// so `10.0` gives `ILPF_10.bmp` and `2.5` gives `ILPF_2.5.bmp`.
    pub fn artifact_path(&self, artifact: Artifact, radius: f64) -> PathBuf {
        self.output_dir
            .join(format!("{}{}_{radius}.bmp", self.prefix, artifact.name()))
    }

    /// Check the configuration before anything is read or written
    ///
    /// # Errors
    /// [`RunErrors::InvalidConfig`] when
    /// - there are no radii, or a radius is negative, `NaN` or infinite
    /// - a radius is listed twice, both runs would write the same files
    /// - the output directory is an existing file
    /// - an artifact would overwrite the input
    pub fn validate(&self) -> Result<(), RunErrors> {
        if self.radii.is_empty() {
            return Err(RunErrors::InvalidConfig("no cutoff radius given".to_string()));
        }
        for (i, radius) in self.radii.iter().enumerate() {
            if !radius.is_finite() || *radius < 0.0 {
                return Err(RunErrors::InvalidConfig(format!(
                    "radius {radius} is not a finite, non negative number"
                )));
            }
            if self.radii[..i].contains(radius) {
                return Err(RunErrors::InvalidConfig(format!(
                    "radius {radius} is listed more than once"
                )));
            }
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(RunErrors::InvalidConfig(format!(
                "prefix {:?} contains a path separator",
                self.prefix
            )));
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(RunErrors::InvalidConfig(format!(
                "output {} exists and is not a directory",
                self.output_dir.display()
            )));
        }
        let input = canonical(&self.input);

        for radius in &self.radii {
            for artifact in [
                Artifact::LowPass,
                Artifact::HighPass,
                Artifact::Spectrum,
                Artifact::Phase
            ] {
                let path = self.artifact_path(artifact, *radius);

                if canonical(&path) == input {
                    return Err(RunErrors::InvalidConfig(format!(
                        "{} would overwrite the input",
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// `path` with symlinks and `..` resolved when it exists, as given otherwise
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
