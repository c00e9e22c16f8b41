#[cfg(doc)]
use super::*;

use core::ops::Range;
use std::path::{Path, PathBuf};

use crate::base::prop::{DevTreeProps, PropValue};
use crate::error::DevTreeError;
use crate::priv_util::SliceRead;

/// Addresses are 32-bit, as read from one address cell.
pub type DevTreeAddr = u32;

/// The compatible strings of a device.
///
/// All strings live in one buffer; entries are spans into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compatible {
    buf: String,
    spans: Vec<Range<usize>>,
}

impl Compatible {
    /// The list of a device without a `compatible` property.
    pub const NONE: Compatible = Compatible {
        buf: String::new(),
        spans: Vec::new(),
    };

    /// Splits the raw contents of a `compatible` property file.
    ///
    /// The file holds NUL terminated strings back to back. A final unterminated string is kept as
    /// well. Invalid UTF-8 is replaced rather than rejected. Empty contents are an error.
    pub fn parse(raw: Vec<u8>) -> Result<Self, DevTreeError> {
        if raw.is_empty() {
            return Err(DevTreeError::ParseError);
        }

        let mut buf = String::with_capacity(raw.len());
        let mut spans = Vec::new();
        let mut offset = 0;
        while offset < raw.len() {
            let segment = match raw.read_bstring0(offset) {
                Ok(s) => s,
                Err(_) => &raw[offset..],
            };
            let start = buf.len();
            buf.push_str(&String::from_utf8_lossy(segment));
            spans.push(start..buf.len());
            // Skip the NUL byte.
            offset += segment.len() + 1;
        }

        Ok(Self { buf, spans })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|span| &self.buf[span.clone()])
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(move |span| &self.buf[span.clone()])
    }

    /// Returns `true` if one of the strings equals `compat` exactly.
    #[inline]
    #[must_use]
    pub fn is_compatible(&self, compat: &str) -> bool {
        self.iter().any(|s| s == compat)
    }
}

/// A device found while walking the device tree.
///
/// A [`DevTreeDev`] owns all of its data. Dropping it releases the name, the compatible list and
/// every property.
#[derive(Clone, Debug)]
pub struct DevTreeDev {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) base: DevTreeAddr,
    pub(crate) high: DevTreeAddr,
    pub(crate) compat: Compatible,
    pub(crate) props: DevTreeProps,
}

impl DevTreeDev {
    pub(crate) fn new(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            base: 0,
            high: 0,
            compat: Compatible::NONE,
            props: DevTreeProps::new(),
        }
    }

    /// Returns the name of the device (including the unit address).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the directory of this device.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> DevTreeAddr {
        self.base
    }

    /// Returns the highest address of the device.
    ///
    /// ```text
    /// base  := 0x81000000
    /// high  := 0x8100FFFF
    /// range := 0x00010000
    /// ```
    ///
    /// If `high <= base` the value is invalid (no usable `reg` was found).
    #[inline]
    #[must_use]
    pub fn high(&self) -> DevTreeAddr {
        self.high
    }

    #[inline]
    #[must_use]
    pub fn compat(&self) -> &Compatible {
        &self.compat
    }

    #[inline]
    #[must_use]
    pub fn props(&self) -> &DevTreeProps {
        &self.props
    }

    /// Mutable access to the properties, for binding parsers.
    #[inline]
    pub fn props_mut(&mut self) -> &mut DevTreeProps {
        &mut self.props
    }

    /// Returns `true` if this device is the root of the walk that produced it.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.integer_property(crate::spec::ISNODE_PROP) == Some(1)
    }

    #[inline]
    #[must_use]
    pub fn string_property(&self, name: &str) -> Option<&str> {
        self.props.get_str(name)
    }

    #[inline]
    #[must_use]
    pub fn integer_property(&self, name: &str) -> Option<u32> {
        self.props.get_u32(name)
    }

    /// Returns the raw data property `name`, failing if it is not `expected` bytes long.
    #[inline]
    pub fn data_property(&self, name: &str, expected: usize) -> Result<Option<&[u8]>, DevTreeError> {
        self.props.get_data(name, expected)
    }

    /// Reads the `index`th big-endian cell of the raw data property `name`.
    #[inline]
    pub fn u32_property_at(&self, name: &str, index: usize) -> Result<Option<u32>, DevTreeError> {
        self.props.get_u32_at(name, index)
    }

    #[inline]
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }
}
