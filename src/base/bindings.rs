//! Extension point for parsing properties the walker does not know about.
//!
//! A [`BindingTable`] maps property file names to parsers. While a device is being built, every
//! regular file whose name has a binding is opened and handed to the parser, which may store any
//! number of properties on the device.
//!
//! ```no_run
//! use devtree_fs::prelude::*;
//! use devtree_fs::base::{Binding, BindingTable, DevTreeFs};
//! use devtree_fs::fdt_util::props::{parse_integer, parse_string};
//!
//! let table = BindingTable::new(vec![
//!     Binding::new("instance", parse_string),
//!     Binding::new("value", parse_integer),
//! ]);
//! let mut devtree = DevTreeFs::with_bindings(&table);
//! devtree.open("/proc/device-tree")?;
//! if let Some(dev) = devtree.find_by_name("serial@84000000")? {
//!     println!("{:?}", dev.string_property("instance"));
//! }
//! # Ok::<(), devtree_fs::DevTreeError>(())
//! ```

use std::fs::File;

use crate::base::DevTreeDev;
use crate::error::DevTreeError;

/// Parses the open property file `fname` into properties of the device under construction.
pub type ParseFn = fn(dev: &mut DevTreeDev, file: &mut File, fname: &str) -> Result<(), DevTreeError>;

/// A (file name, parser) pair.
#[derive(Clone, Copy)]
pub struct Binding {
    pub name: &'static str,
    pub parse: ParseFn,
}

impl Binding {
    pub fn new(name: &'static str, parse: ParseFn) -> Self {
        Self { name, parse }
    }
}

#[derive(Clone, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    #[must_use]
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    pub fn push(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Returns the parsers bound to `fname`, in table order.
    pub fn lookup<'s>(&'s self, fname: &'s str) -> impl Iterator<Item = &'s Binding> + 's {
        self.bindings.iter().filter(move |b| b.name == fname)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
