/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::{Path, PathBuf};

use dip_bin::{execute, Artifact, RunConfig, RunErrors, SpectrumSource};
use dip_bmp::Bitmap;
use dip_core::layout::{PixelBuffer, PixelLayout};
use nanorand::Rng;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dip-bin-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_bitmap(path: &Path, width: usize, height: usize, function: fn(usize, usize) -> u8) {
    let layout = PixelLayout::new(width, height).unwrap();
    let bitmap = Bitmap::new_grayscale(PixelBuffer::from_fn(layout, function)).unwrap();
    dip_bmp::store(path, &bitmap).unwrap();
}

fn checkerboard(x: usize, y: usize) -> u8 {
    if (x + y) % 2 == 0 {
        200
    } else {
        100
    }
}

#[test]
fn checkerboard_run_writes_every_artifact() {
    let dir = scratch_dir("checkerboard");
    let input = dir.join("board.bmp");
    write_bitmap(&input, 8, 8, checkerboard);

    let mut config = RunConfig::new(&input, dir.join("out"));
    config.radii = vec![2.0];

    let results = execute(&config).unwrap();
    assert_eq!(results.len(), 1);

    let report = results.into_iter().next().unwrap().unwrap();
    assert_eq!(report.low_pass, dir.join("out/ILPF_2.bmp"));
    assert_eq!(report.high_pass, dir.join("out/IHPF_2.bmp"));

    let low_pass = dip_bmp::load(&report.low_pass).unwrap();
    low_pass
        .pixels()
        .for_each_pixel(|_, _, value| assert_eq!(value, 150));

    let high_pass = dip_bmp::load(&report.high_pass).unwrap();
    high_pass.pixels().for_each_pixel(|x, y, value| {
        assert_eq!(value, if (x + y) % 2 == 0 { 50 } else { 0 });
    });

    let spectrum = dip_bmp::load(&report.spectrum).unwrap();
    assert_eq!(spectrum.pixels().get(4, 4), Some(255));
    let mut brightest = 0;
    spectrum.pixels().for_each_pixel(|x, y, value| {
        if (x, y) != (4, 4) {
            brightest = brightest.max(value);
        }
    });
    assert!(brightest < 255);

    let phase = dip_bmp::load(&report.phase).unwrap();
    assert_eq!(phase.pixels().get(4, 4), Some(127));

    // artifacts carry the input's headers
    let original = dip_bmp::load(&input).unwrap();
    assert_eq!(low_pass.file_header(), original.file_header());
    assert_eq!(low_pass.info_header(), original.info_header());

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn threaded_and_sequential_runs_agree() {
    let dir = scratch_dir("threads");
    let input = dir.join("noise.bmp");

    let layout = PixelLayout::new(32, 16).unwrap();
    let mut pixels = PixelBuffer::new(layout);
    let mut rng = nanorand::WyRand::new_seed(77);
    for y in 0..16 {
        for x in 0..32 {
            pixels.set(x, y, rng.generate());
        }
    }
    dip_bmp::store(&input, &Bitmap::new_grayscale(pixels).unwrap()).unwrap();

    let mut threaded = RunConfig::new(&input, dir.join("threaded"));
    threaded.radii = vec![0.0, 3.0, 5.5, 40.0];
    threaded.spectrum_source = SpectrumSource::PassBand;

    let mut sequential = threaded.clone();
    sequential.output_dir = dir.join("sequential");
    sequential.threads = false;

    for result in execute(&threaded)
        .unwrap()
        .into_iter()
        .chain(execute(&sequential).unwrap())
    {
        assert!(result.is_ok());
    }

    for radius in &threaded.radii {
        for artifact in [
            Artifact::LowPass,
            Artifact::HighPass,
            Artifact::Spectrum,
            Artifact::Phase
        ] {
            let a = std::fs::read(threaded.artifact_path(artifact, *radius)).unwrap();
            let b = std::fs::read(sequential.artifact_path(artifact, *radius)).unwrap();
            assert_eq!(a, b, "{artifact:?} at radius {radius}");
        }
    }

    // a radius covering the whole plane leaves nothing for the high pass
    let high_pass = dip_bmp::load(threaded.artifact_path(Artifact::HighPass, 40.0)).unwrap();
    high_pass
        .pixels()
        .for_each_pixel(|_, _, value| assert_eq!(value, 0));

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn non_power_of_two_fails_every_radius_without_output() {
    let dir = scratch_dir("dimension");
    let input = dir.join("odd.bmp");
    write_bitmap(&input, 12, 8, checkerboard);

    let mut config = RunConfig::new(&input, dir.join("out"));
    config.radii = vec![1.0, 2.0];

    let results = execute(&config).unwrap();
    assert_eq!(results.len(), 2);

    for (result, radius) in results.iter().zip([1.0, 2.0]) {
        match result {
            Err(err @ RunErrors::FftErrors(..)) => assert_eq!(err.radius(), Some(radius)),
            other => panic!("expected a dimension error, got {other:?}")
        }
    }
    assert_eq!(std::fs::read_dir(dir.join("out")).unwrap().count(), 0);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn load_failures_stop_the_run() {
    let dir = scratch_dir("load");

    let config = RunConfig::new(dir.join("missing.bmp"), dir.join("out"));
    match execute(&config) {
        Err(RunErrors::BmpErrors(err)) => {
            assert!(!err.is_format_error());
            assert!(format!("{err}").contains("missing.bmp"));
        }
        other => panic!("expected a load error, got {other:?}")
    }
    assert!(!dir.join("out").exists());

    let not_bmp = dir.join("text.bmp");
    std::fs::write(&not_bmp, b"hello, this is not a bitmap at all").unwrap();
    match execute(&RunConfig::new(&not_bmp, dir.join("out"))) {
        Err(RunErrors::BmpErrors(err)) => assert!(err.is_format_error()),
        other => panic!("expected a format error, got {other:?}")
    }
    assert!(!dir.join("out").exists());

    std::fs::remove_dir_all(dir).unwrap();
}
