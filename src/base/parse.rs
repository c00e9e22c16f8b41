//! Construction of [`DevTreeDev`] objects from device node directories.

use core::mem::size_of;
use std::fs::{self, File};
use std::path::Path;

use tracing::{trace, warn};

use crate::base::bindings::BindingTable;
use crate::base::dir::DirHandle;
use crate::base::node::{Compatible, DevTreeAddr, DevTreeDev};
use crate::base::path::PathStack;
use crate::base::prop::PropValue;
use crate::error::DevTreeError;
use crate::priv_util::SliceRead;
use crate::spec::{fdt_reg, COMPATIBLE_FILE, ISNODE_PROP, REG_FILE};

macro_rules! get_be32_field {
    ( $f:ident, $s:ident , $buf:expr ) => {
        $buf.read_be_u32(offset_of!($s, $f))
    };
}

/// Decodes the contents of a `reg` file into the device's `(base, high)` addresses.
///
/// Only a single `<address size>` pair of 32-bit cells is understood, any other length yields
/// `None`.
pub fn parse_reg(buf: &[u8]) -> Option<(DevTreeAddr, DevTreeAddr)> {
    if buf.len() != size_of::<fdt_reg>() {
        return None;
    }
    let base = get_be32_field!(address, fdt_reg, buf).ok()?;
    let size = get_be32_field!(size, fdt_reg, buf).ok()?;
    Some((base, base.wrapping_add(size).wrapping_sub(1)))
}

fn dev_parse_reg(dev: &mut DevTreeDev, fpath: &Path) -> Result<(), DevTreeError> {
    let content = fs::read(fpath)?;
    match parse_reg(&content) {
        Some((base, high)) => {
            dev.base = base;
            dev.high = high;
        }
        None => warn!(
            device = %dev.name,
            len = content.len(),
            "ignoring reg property of unexpected size"
        ),
    }
    Ok(())
}

fn dev_parse_compat(dev: &mut DevTreeDev, fpath: &Path) -> Result<(), DevTreeError> {
    dev.compat = Compatible::parse(fs::read(fpath)?)?;
    Ok(())
}

/// Runs every binding of `fname` over the file.
///
/// A failing parser only loses the properties it wrote itself; the device is still built.
fn dev_parse_bindings(
    dev: &mut DevTreeDev,
    bindings: &BindingTable,
    fpath: &Path,
    fname: &str,
) -> Result<(), DevTreeError> {
    for binding in bindings.lookup(fname) {
        let mut file = File::open(fpath)?;
        let saved = dev.props.clone();
        if let Err(e) = (binding.parse)(dev, &mut file, fname) {
            warn!(device = %dev.name, file = fname, error = %e, "binding parser failed");
            dev.props = saved;
        }
    }
    Ok(())
}

/// The name of the device at the top of `path`.
///
/// The root frame holds the whole path a walk was opened with, so only its last component
/// names the device. A root without one (`/`) keeps its full path.
fn dev_name(path: &PathStack) -> String {
    let top = path.top();
    let name = if path.depth() == 1 {
        Path::new(top).file_name().unwrap_or(top)
    } else {
        top
    };
    name.to_string_lossy().into_owned()
}

/// Builds the device of the directory at the top of `path`.
///
/// `dir` must be the open directory of that position. Its read position is consumed.
pub(crate) fn dev_from_dir(
    dir: &mut DirHandle,
    path: &PathStack,
    bindings: Option<&BindingTable>,
) -> Result<DevTreeDev, DevTreeError> {
    let mut dev = DevTreeDev::new(dev_name(path), path.join(None));

    let isnode = u32::from(path.depth() == 1);
    dev.props.add(ISNODE_PROP, PropValue::Integer(isnode))?;

    dir.rewind();
    while let Some(entry) = dir.read() {
        let fpath = path.join(Some(entry.as_os_str()));
        if !fs::metadata(&fpath)?.is_file() {
            continue;
        }

        let fname = match entry.to_str() {
            Some(fname) => fname,
            None => {
                trace!(path = %fpath.display(), "skipping non UTF-8 property file");
                continue;
            }
        };

        match fname {
            REG_FILE => dev_parse_reg(&mut dev, &fpath)?,
            COMPATIBLE_FILE => dev_parse_compat(&mut dev, &fpath)?,
            _ => {
                if let Some(bindings) = bindings {
                    dev_parse_bindings(&mut dev, bindings, &fpath, fname)?;
                }
            }
        }
    }

    trace!(
        device = %dev.name,
        base = dev.base,
        high = dev.high,
        props = dev.props.len(),
        "built device"
    );
    Ok(dev)
}
