//! A device tree walker for embedded Linux, working on the directory hierarchy the kernel
//! publishes under `/proc/device-tree` rather than on a flattened device tree blob.
//!
//! Includes the following features:
//!
//! * [A resumable depth-first walk producing one device per call](base::DevTreeFs)
//! * [Lookup by name and by compatible string](prelude::DevTreeIterator)
//! * [Two-level iteration over the sub-trees of matching devices](base::subtree)
//! * [Extensible property parsing through binding tables](base::bindings)
//!
//! ## Examples
//!
//! ```no_run
//! use devtree_fs::prelude::*;
//! use devtree_fs::DevTreeFs;
//!
//! let mut devtree = DevTreeFs::from_root(devtree_fs::spec::DEFAULT_ROOT)?;
//! for dev in devtree.devices() {
//!     let dev = dev?;
//!     println!("{} at {:#010x}..{:#010x}", dev.name(), dev.base(), dev.high());
//!     for compat in dev.compat().iter() {
//!         println!("    {}", compat);
//!     }
//! }
//!
//! devtree.reset()?;
//! if let Some(uart) = devtree.find_compatible("ns16550a")? {
//!     println!("first uart: {}", uart.name());
//! }
//! # Ok::<(), devtree_fs::DevTreeError>(())
//! ```
//!
//! A handle is meant for single threaded use; it walks the tree through plain blocking
//! filesystem calls.
#![deny(clippy::all, clippy::cargo)]

extern crate endian_type_rs as endian_type;
#[macro_use]
extern crate memoffset;
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate static_assertions;

pub mod base;
pub mod error;
pub mod fdt_util;
pub mod prelude;
pub mod spec;

#[doc(hidden)]
pub mod common;

pub(crate) mod priv_util;

#[doc(inline)]
pub use base::{DevTreeDev, DevTreeFs};
#[doc(inline)]
pub use error::DevTreeError;
