/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Loading and storing bitmaps on disk

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use dip_core::log::{debug, warn};
use dip_core::options::DecoderOptions;

use crate::{Bitmap, BmpDecoder, BmpEncoder, BmpErrors};

/// Load the bitmap stored at `path` with the default options
///
/// Errors carry the path, see [`BmpErrors::FileError`]
pub fn load<P: AsRef<Path>>(path: P) -> Result<Bitmap, BmpErrors> {
    load_with_options(path, DecoderOptions::default())
}

/// Load the bitmap stored at `path`
///
/// # Example
///  - Only accept images narrower than 1024 pixels and refuse any header
///  inconsistency
/// ```no_run
/// use dip_core::options::DecoderOptions;
///
/// let options = DecoderOptions::default().set_strict_mode(true).set_max_width(1024);
/// let bitmap = dip_bmp::load_with_options("testpattern1024.bmp", options).unwrap();
/// ```
pub fn load_with_options<P: AsRef<Path>>(
    path: P, options: DecoderOptions
) -> Result<Bitmap, BmpErrors> {
    let path = path.as_ref();

    debug!("Loading {}", path.display());

    let decode = || -> Result<Bitmap, BmpErrors> {
        let reader = BufReader::new(File::open(path)?);
        BmpDecoder::new_with_options(reader, options).decode()
    };
    decode().map_err(|e| e.with_path(path))
}

/// Store `bitmap` at `path`
///
/// Headers are written as they are, see [`BmpEncoder`].
///
/// The bitmap is first written to a temporary file next to `path` which is then
/// renamed over it, if any step fails `path` is left as it was.
pub fn store<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> Result<(), BmpErrors> {
    let path = path.as_ref();
    let temp_path = temporary_path(path);

    debug!("Storing {}", path.display());

    let result = write_and_rename(&temp_path, path, bitmap);

    if result.is_err() && temp_path.exists() {
        if let Err(err) = std::fs::remove_file(&temp_path) {
            warn!("Could not remove {}: {}", temp_path.display(), err);
        }
    }
    result.map_err(|e| e.with_path(path))
}

fn write_and_rename(temp_path: &Path, path: &Path, bitmap: &Bitmap) -> Result<(), BmpErrors> {
    let file = File::create(temp_path)?;
    let mut writer = BufWriter::new(file);

    BmpEncoder::new(bitmap).encode(&mut writer)?;

    let file = writer
        .into_inner()
        .map_err(|e| BmpErrors::from(e.into_error()))?;
    file.sync_all()?;

    std::fs::rename(temp_path, path)?;

    Ok(())
}

/// `dir/.name.<pid>.tmp` for `dir/name`
fn temporary_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::file::temporary_path;

    #[test]
    fn temporary_path_is_a_sibling() {
        let temp = temporary_path(Path::new("/some/dir/ILPF_10.bmp"));

        assert_eq!(temp.parent(), Some(Path::new("/some/dir")));
        assert!(temp
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(".ILPF_10.bmp."));
    }
}
