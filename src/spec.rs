//! Definitions of the procfs device tree layout.
//!
//! The kernel publishes the flattened device tree under [`DEFAULT_ROOT`] with one directory per
//! node and one regular file per property. Property files hold the raw (big-endian) property
//! value exactly as it appears in the blob.
#![allow(non_camel_case_types)]

use endian_type::types::u32_be;

/// Where Linux exposes the device tree.
pub const DEFAULT_ROOT: &str = "/proc/device-tree";

/// Property file marking a directory as a device node.
pub const REG_FILE: &str = "reg";

/// Property file holding the NUL separated compatible strings.
pub const COMPATIBLE_FILE: &str = "compatible";

/// Integer property stored on every device, `1` for the root of a walk.
pub const ISNODE_PROP: &str = "isnode";

/// Longest accepted property name (in bytes).
pub const MAX_PROP_NAME_LEN: usize = 31;

/// A single `<address size>` pair as found in a `reg` property with one address cell and one
/// size cell.
#[repr(C)]
pub struct fdt_reg {
    pub address: u32_be,
    pub size: u32_be,
}

assert_eq_size!(fdt_reg, [u8; 8]);
