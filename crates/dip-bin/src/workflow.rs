/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! One filtering run
//!
//! Each radius goes through
//!
//! ```text
//! centre -> forward -> partition -> spectrum, phase
//!                                -> inverse(stop band) -> reconstruct -> ILPF
//!                                -> inverse(pass band) -> reconstruct -> IHPF
//! ```
//!
//! Radii only share the loaded bitmap, which is never mutated,
//! so they can run concurrently and one failing radius leaves the others alone.
use std::path::PathBuf;

use dip_bmp::Bitmap;
use dip_core::layout::PixelBuffer;
use dip_fft::{
    centre, forward, inverse, radial_partition, reconstruct, render_phase, render_spectrum,
    ComplexPlane, FftErrors, Partition
};
use log::{debug, info};

use crate::config::{Artifact, RunConfig, SpectrumSource};
use crate::errors::RunErrors;

/// Files written for one radius
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusReport {
    pub radius:    f64,
    pub low_pass:  PathBuf,
    pub high_pass: PathBuf,
    pub spectrum:  PathBuf,
    pub phase:     PathBuf
}

/// Filter `bitmap` with cutoff `radius` and write the four artifacts
///
/// Artifacts keep the headers, palette and any extra bytes of `bitmap`,
/// only their pixels differ.
pub fn run_radius(
    bitmap: &Bitmap, radius: f64, config: &RunConfig
) -> Result<RadiusReport, RunErrors> {
    let fft_error = |e: FftErrors| RunErrors::FftErrors(radius, e);

    let mut plane = ComplexPlane::from_pixels(bitmap.pixels());
    centre(&mut plane);
    forward(&mut plane).map_err(fft_error)?;

    let Partition {
        mut pass_band,
        mut stop_band
    } = radial_partition(&plane, radius);

    let rendered_from = match config.spectrum_source {
        SpectrumSource::Full => &plane,
        SpectrumSource::PassBand => &pass_band
    };
    let spectrum = render_spectrum(rendered_from).map_err(fft_error)?;
    let phase = render_phase(rendered_from).map_err(fft_error)?;

    inverse(&mut stop_band).map_err(fft_error)?;
    inverse(&mut pass_band).map_err(fft_error)?;

    let low_pass = reconstruct(&stop_band).map_err(fft_error)?;
    let high_pass = reconstruct(&pass_band).map_err(fft_error)?;

    debug!("Radius {radius}: filtered, storing artifacts");

    let report = RadiusReport {
        radius,
        low_pass: store(bitmap, low_pass, config.artifact_path(Artifact::LowPass, radius))?,
        high_pass: store(bitmap, high_pass, config.artifact_path(Artifact::HighPass, radius))?,
        spectrum: store(bitmap, spectrum, config.artifact_path(Artifact::Spectrum, radius))?,
        phase: store(bitmap, phase, config.artifact_path(Artifact::Phase, radius))?
    };
    info!("Radius {radius}: done");

    Ok(report)
}

fn store(bitmap: &Bitmap, pixels: PixelBuffer, path: PathBuf) -> Result<PathBuf, RunErrors> {
    dip_bmp::store(&path, &bitmap.with_pixels(pixels)?)?;
    Ok(path)
}

/// Execute a whole run
///
/// The configuration is validated and the input loaded once, failures there
/// are returned directly and leave the output directory untouched. After that every radius runs on its own and
/// gets its own entry in the result, in the order the radii were configured.
pub fn execute(config: &RunConfig) -> Result<Vec<Result<RadiusReport, RunErrors>>, RunErrors> {
    config.validate()?;

    let bitmap = dip_bmp::load_with_options(&config.input, config.decoder_options())?;

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| RunErrors::IoError(config.output_dir.clone(), e))?;

    info!(
        "Loaded {} ({}x{}), running {} radii",
        config.input.display(),
        bitmap.width(),
        bitmap.height(),
        config.radii.len()
    );
    let bitmap = &bitmap;

    if config.threads && config.radii.len() > 1 {
        debug!("Running radii on {} threads", config.radii.len());

        let results = std::thread::scope(|s| {
            let handles: Vec<_> = config
                .radii
                .iter()
                .map(|&radius| (radius, s.spawn(move || run_radius(bitmap, radius, config))))
                .collect();

            handles
                .into_iter()
                .map(|(radius, handle)| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(RunErrors::WorkerPanicked(radius)))
                })
                .collect::<Vec<_>>()
        });
        return Ok(results);
    }

    Ok(config
        .radii
        .iter()
        .map(|&radius| run_radius(bitmap, radius, config))
        .collect())
}
