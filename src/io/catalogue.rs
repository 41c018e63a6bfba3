//! Durable snapshot of an initialised color pool
//!
//! A catalogue stores each luminance bucket in removal order so that loading
//! it reproduces exactly the pool [`ColorPool::full`] would build. Layout:
//! an 8-byte magic, 256 little-endian `u32` bucket lengths, then the colors
//! of every bucket as `r g b` byte triples.

use crate::algorithm::pool::ColorPool;
use crate::io::configuration::{CATALOGUE_DIR_NAME, CATALOGUE_FILE_NAME, CATALOGUE_MAGIC};
use crate::io::error::{Result, SynthesisError, file_system_error};
use crate::io::image::temp_path;
use crate::math::{Color, LUMINANCE_LEVELS};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const HEADER_LEN: usize = CATALOGUE_MAGIC.len() + LUMINANCE_LEVELS * 4;

/// Catalogue location under the user's home directory, if one is known
pub fn default_catalogue_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(CATALOGUE_DIR_NAME)
            .join(CATALOGUE_FILE_NAME)
    })
}

/// Serialize a pool into catalogue bytes
pub fn encode_catalogue(pool: &ColorPool) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + pool.size() * 3);
    bytes.extend_from_slice(CATALOGUE_MAGIC);

    for (_, colors) in pool.buckets() {
        bytes.extend_from_slice(&(colors.len() as u32).to_le_bytes());
    }
    for (_, colors) in pool.buckets() {
        for color in colors {
            bytes.extend_from_slice(&color.to_bytes());
        }
    }

    bytes
}

/// Rebuild a pool from catalogue bytes
///
/// # Errors
///
/// Returns [`SynthesisError::Catalogue`] if:
/// - The magic or header is missing
/// - The color data length disagrees with the bucket lengths
/// - A color sits in a bucket that doesn't match its luminance
/// - A color appears more than once
pub fn decode_catalogue(bytes: &[u8], path: &Path) -> Result<ColorPool> {
    let invalid = |reason: String| SynthesisError::Catalogue {
        path: path.to_path_buf(),
        reason,
    };

    if bytes.get(..CATALOGUE_MAGIC.len()) != Some(CATALOGUE_MAGIC.as_slice()) {
        return Err(invalid("missing catalogue header".to_string()));
    }

    let lengths: Vec<usize> = bytes
        .get(CATALOGUE_MAGIC.len()..HEADER_LEN)
        .ok_or_else(|| invalid("truncated bucket table".to_string()))?
        .chunks_exact(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            u32::from_le_bytes(word) as usize
        })
        .collect();

    let total: usize = lengths.iter().sum();
    let data = bytes.get(HEADER_LEN..).unwrap_or(&[]);
    if data.len() != total * 3 {
        return Err(invalid(format!(
            "expected {total} colors but found {} bytes of color data",
            data.len()
        )));
    }

    let mut colors = Vec::with_capacity(total);
    let mut triples = data.chunks_exact(3);
    for (key, &length) in lengths.iter().enumerate() {
        for triple in triples.by_ref().take(length) {
            let color = match *triple {
                [r, g, b] => Color::new(r, g, b),
                _ => return Err(invalid("truncated color".to_string())),
            };
            if color.luminance() as usize != key {
                return Err(invalid(format!(
                    "color {color} filed under luminance {key}"
                )));
            }
            colors.push(color);
        }
    }

    ColorPool::from_colors(colors).map_err(|e| invalid(e.to_string()))
}

/// Write a pool snapshot, replacing any existing catalogue atomically
///
/// # Errors
///
/// Returns an error if the directory, temporary file or rename fails
pub fn save_catalogue(pool: &ColorPool, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    let temp = temp_path(path);
    let file = std::fs::File::create(&temp).map_err(file_system_error(&temp, "create catalogue"))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&encode_catalogue(pool))
        .and_then(|()| writer.flush())
        .map_err(file_system_error(&temp, "write catalogue"))?;
    drop(writer);

    std::fs::rename(&temp, path).map_err(file_system_error(&temp, "rename catalogue"))?;
    info!("Saved {} colors to {}", pool.size(), path.display());

    Ok(())
}

/// Load a pool snapshot, or `None` if no catalogue exists at `path`
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is malformed
pub fn load_catalogue(path: &Path) -> Result<Option<ColorPool>> {
    if !path.is_file() {
        debug!("No catalogue at {}", path.display());
        return Ok(None);
    }

    let bytes = std::fs::read(path).map_err(file_system_error(path, "read catalogue"))?;
    let pool = decode_catalogue(&bytes, path)?;
    info!("Loaded {} colors from {}", pool.size(), path.display());

    Ok(Some(pool))
}
