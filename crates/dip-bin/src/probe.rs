/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use dip_bmp::{BitmapFileHeader, BitmapInfoHeader, BmpDecoder};
use dip_core::options::DecoderOptions;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::errors::RunErrors;

struct Metadata<'a> {
    file:        &'a Path,
    size:        u64,
    file_header: &'a BitmapFileHeader,
    info_header: &'a BitmapInfoHeader
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("BitmapMetadata", 4)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("file_header", self.file_header)?;
        state.serialize_field("info_header", self.info_header)?;

        state.end()
    }
}

/// Read the headers of the bitmap at `path` and return them as pretty JSON
pub fn probe_input(path: &Path) -> Result<String, RunErrors> {
    let file = File::open(path).map_err(|e| RunErrors::IoError(path.into(), e))?;
    let size = file
        .metadata()
        .map_err(|e| RunErrors::IoError(path.into(), e))?
        .len();

    // set to high to remove restrictions.
    // We'll just be reading headers so it doesn't matter
    let options = DecoderOptions::default()
        .set_max_height(usize::MAX)
        .set_max_width(usize::MAX);

    let mut decoder = BmpDecoder::new_with_options(BufReader::new(file), options);
    decoder
        .decode_headers()
        .map_err(|e| RunErrors::BmpErrors(e.with_path(path)))?;

    match (decoder.file_header(), decoder.info_header()) {
        (Some(file_header), Some(info_header)) => {
            let metadata = Metadata {
                file: path,
                size,
                file_header,
                info_header
            };
            Ok(serde_json::to_string_pretty(&metadata)?)
        }
        _ => Err(RunErrors::InvalidConfig(format!(
            "no headers decoded from {}",
            path.display()
        )))
    }
}
