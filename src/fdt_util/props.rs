//! Ready made [`ParseFn`](crate::base::ParseFn) parsers for common property encodings.
//!
//! Each parser reads the whole property file and stores one property named after the file.
use core::mem::size_of;
use std::fs::File;
use std::io::Read;

use crate::base::{DevTreeDev, PropValue};
use crate::error::DevTreeError;
use crate::prelude::*;

fn read_all(file: &mut File) -> Result<Vec<u8>, DevTreeError> {
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

/// Stores the file as a string property.
///
/// Device tree strings are NUL terminated; trailing NUL bytes are not part of the value.
pub fn parse_string(dev: &mut DevTreeDev, file: &mut File, fname: &str) -> Result<(), DevTreeError> {
    let mut content = read_all(file)?;
    while content.last() == Some(&0) {
        content.pop();
    }
    let value = match String::from_utf8(content) {
        Ok(value) => value,
        Err(e) => return Err(e.utf8_error().into()),
    };
    dev.props_mut().add(fname, PropValue::String(value))
}

/// Stores a single big-endian cell as an integer property.
///
/// Files of any size other than 4 bytes are rejected.
pub fn parse_integer(dev: &mut DevTreeDev, file: &mut File, fname: &str) -> Result<(), DevTreeError> {
    let content = read_all(file)?;
    if content.len() != size_of::<u32>() {
        return Err(DevTreeError::ParseError);
    }
    let value = content.read_be_u32(0)?;
    dev.props_mut().add(fname, PropValue::Integer(value))
}

/// Stores an array of big-endian cells as a raw data property.
///
/// The cells can be read back with [`DevTreeDev::u32_property_at`].
pub fn parse_int_data(dev: &mut DevTreeDev, file: &mut File, fname: &str) -> Result<(), DevTreeError> {
    let content = read_all(file)?;
    if content.is_empty() || content.len() % size_of::<u32>() != 0 {
        return Err(DevTreeError::ParseError);
    }
    dev.props_mut()
        .add(fname, PropValue::Data(content.into_boxed_slice()))
}
