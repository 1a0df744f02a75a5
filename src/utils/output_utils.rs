//! Feature output writers
//!
//! Serializes feature values and feature coordinates as CSV, JSON or NumPy
//! `.npy` files.

use std::fs::File;
use std::io::{BufWriter, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use log::info;

use crate::haar::coord::Feature;
use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::integral::Accumulator;
use crate::haar::topology::{Sign, Topology, FEATURE_TYPES};
use crate::utils::config::OutputFormat;

/// Save feature values to `path`
///
/// # Arguments
/// * `path` - Destination file
/// * `types` - Topology of each value, aligned by index
/// * `values` - Feature values
/// * `format` - Output format
pub fn save_feature_values<A: Accumulator>(
    path: &str,
    types: &[Topology],
    values: &[A],
    format: OutputFormat,
) -> HaarResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_feature_values(&mut writer, types, values, format)?;
    writer.flush()?;

    info!("Wrote {} feature values to {} ({})", values.len(), path, format);
    Ok(())
}

/// Save feature coordinates to `path`
pub fn save_feature_coordinates(
    path: &str,
    features: &[Feature],
    types: &[Topology],
    format: OutputFormat,
) -> HaarResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_feature_coordinates(&mut writer, features, types, format)?;
    writer.flush()?;

    info!("Wrote {} feature coordinates to {} ({})", features.len(), path, format);
    Ok(())
}

/// Write feature values in the requested format
///
/// # Errors
/// `ShapeMismatch` when `types` and `values` differ in length.
pub fn write_feature_values<W: Write, A: Accumulator>(
    writer: &mut W,
    types: &[Topology],
    values: &[A],
    format: OutputFormat,
) -> HaarResult<()> {
    if types.len() != values.len() {
        return Err(HaarError::ShapeMismatch { coordinates: values.len(), types: types.len() });
    }

    match format {
        OutputFormat::Csv => {
            writeln!(writer, "index,type,value")?;
            for (idx, (topology, value)) in types.iter().zip(values).enumerate() {
                writeln!(writer, "{},{},{}", idx, topology, value)?;
            }
        }
        OutputFormat::Json => {
            writeln!(writer, "{{")?;
            write!(writer, "  \"types\": [")?;
            write_joined(writer, types.iter().map(|t| format!("\"{}\"", t)))?;
            writeln!(writer, "],")?;
            write!(writer, "  \"values\": [")?;
            write_joined(writer, values.iter().map(|v| v.to_string()))?;
            writeln!(writer, "]")?;
            writeln!(writer, "}}")?;
        }
        OutputFormat::Npy => {
            write_npy_header(writer, A::NPY_DESCR, &format!("({},)", values.len()))?;
            for value in values {
                value.write_le(writer)?;
            }
        }
    }

    Ok(())
}

/// Write feature coordinates in the requested format
///
/// CSV and NPY emit one row per rectangle; the NPY layout is
/// `(feature, topology id, rect, row0, col0, row1, col1)` as `int64`, where
/// the topology id is the canonical position of the topology.
pub fn write_feature_coordinates<W: Write>(
    writer: &mut W,
    features: &[Feature],
    types: &[Topology],
    format: OutputFormat,
) -> HaarResult<()> {
    if features.len() != types.len() {
        return Err(HaarError::ShapeMismatch { coordinates: features.len(), types: types.len() });
    }

    match format {
        OutputFormat::Csv => {
            writeln!(writer, "index,type,rect,sign,row0,col0,row1,col1")?;
            for (idx, (feature, topology)) in features.iter().zip(types).enumerate() {
                for (idx_rect, rect) in feature.rects().iter().enumerate() {
                    let sign = match topology.sign(idx_rect) {
                        Sign::Positive => "+",
                        Sign::Negative => "-",
                    };
                    writeln!(writer, "{},{},{},{},{},{},{},{}",
                             idx, topology, idx_rect, sign, rect.row0, rect.col0, rect.row1, rect.col1)?;
                }
            }
        }
        OutputFormat::Json => {
            writeln!(writer, "[")?;
            for (idx, (feature, topology)) in features.iter().zip(types).enumerate() {
                write!(writer, "  {{\"type\": \"{}\", \"rects\": [", topology)?;
                write_joined(writer, feature.rects().iter().map(|rect| {
                    format!("[{}, {}, {}, {}]", rect.row0, rect.col0, rect.row1, rect.col1)
                }))?;
                if idx + 1 < features.len() {
                    writeln!(writer, "]}},")?;
                } else {
                    writeln!(writer, "]}}")?;
                }
            }
            writeln!(writer, "]")?;
        }
        OutputFormat::Npy => {
            let n_rects: usize = features.iter().map(|f| f.len()).sum();
            write_npy_header(writer, "<i8", &format!("({}, 7)", n_rects))?;
            for (idx, (feature, topology)) in features.iter().zip(types).enumerate() {
                let topology_id = FEATURE_TYPES.iter().position(|t| t == topology).unwrap_or(0);
                for (idx_rect, rect) in feature.rects().iter().enumerate() {
                    for field in [idx, topology_id, idx_rect, rect.row0, rect.col0, rect.row1, rect.col1] {
                        writer.write_i64::<LittleEndian>(field as i64)?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn write_joined<W: Write, I: Iterator<Item = String>>(writer: &mut W, items: I) -> HaarResult<()> {
    for (idx, item) in items.enumerate() {
        if idx > 0 {
            write!(writer, ", ")?;
        }
        write!(writer, "{}", item)?;
    }
    Ok(())
}

/// Write a NumPy format 1.0 header
///
/// The magic string, version, length field and header together are padded
/// to a multiple of 64 bytes.
fn write_npy_header<W: Write>(writer: &mut W, descr: &str, shape: &str) -> HaarResult<()> {
    let header_str = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': {}, }}",
        descr, shape
    );

    // 6 magic + 2 version + 2 length bytes, +1 for the trailing newline
    let header_len = header_str.len() + 1;
    let padding_len = (64 - ((header_len + 10) % 64)) % 64;
    let padded_header = format!("{}{}\n", header_str, " ".repeat(padding_len));

    writer.write_all(b"\x93NUMPY")?;
    writer.write_all(&[0x01, 0x00])?;
    writer.write_u16::<LittleEndian>(padded_header.len() as u16)?;
    writer.write_all(padded_header.as_bytes())?;
    Ok(())
}
