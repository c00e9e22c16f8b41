//! Two-level iteration: collect the devices matching a name prefix, then walk the sub-tree of
//! each of them with its own, independent handle.
//!
//! ```no_run
//! use devtree_fs::prelude::*;
//! use devtree_fs::DevTreeFs;
//!
//! let mut devtree = DevTreeFs::from_root("/proc/device-tree")?;
//! devtree.match_prefix("i2c")?;
//! while let Some(bus) = devtree.next_match()? {
//!     while let Some(dev) = bus.next_dev()? {
//!         println!("{} (root: {})", dev.name(), dev.is_root());
//!     }
//! }
//! devtree.free_match();
//! # Ok::<(), devtree_fs::DevTreeError>(())
//! ```
use tracing::{debug, trace};

use crate::base::{DevTreeDev, DevTreeFs};
use crate::error::DevTreeError;
use crate::prelude::*;

/// A matched sub-tree whose walk has been handed out by [`DevTreeFs::next_match`].
pub(crate) struct Orphan<'b> {
    dev: Option<DevTreeDev>,
    sub: DevTreeFs<'b>,
}

impl<'b> DevTreeFs<'b> {
    /// Walks the rest of the tree and queues every device whose name starts with `prefix`.
    ///
    /// Devices which don't match are dropped. Matches of an earlier call that were not handed
    /// out yet are discarded. The queued sub-trees are handed out by [`DevTreeFs::next_match`].
    pub fn match_prefix(&mut self, prefix: &str) -> Result<&mut Self, DevTreeError> {
        self.pending.clear();
        while let Some(dev) = self.next_dev()? {
            if dev.name().starts_with(prefix) {
                trace!(device = %dev.name(), "queued matching sub-tree");
                self.pending.push_back(dev);
            }
        }
        debug!(prefix, pending = self.pending.len(), "matched sub-trees");
        Ok(self)
    }

    /// Opens a walk rooted at the oldest queued match and returns it.
    ///
    /// The returned handle stays owned by `self` until [`DevTreeFs::free_match`] or
    /// [`DevTreeFs::close`]. Returns `None` once every match has been handed out.
    pub fn next_match(&mut self) -> Result<Option<&mut DevTreeFs<'b>>, DevTreeError> {
        let dev = match self.pending.pop_front() {
            Some(dev) => dev,
            None => return Ok(None),
        };

        let mut sub = DevTreeFs::new();
        sub.bindings = self.bindings;
        let res = sub.open(dev.path());
        self.track(res)?;

        self.orphans.push(Orphan {
            dev: Some(dev),
            sub,
        });
        Ok(self.orphans.last_mut().map(|orphan| &mut orphan.sub))
    }

    /// Number of matches not yet handed out by [`DevTreeFs::next_match`].
    #[inline]
    #[must_use]
    pub fn pending_matches(&self) -> usize {
        self.pending.len()
    }

    /// The devices whose sub-trees have been handed out so far, in match order.
    pub fn matched(&self) -> impl Iterator<Item = &DevTreeDev> + '_ {
        self.orphans.iter().filter_map(|orphan| orphan.dev.as_ref())
    }

    /// Releases every sub-tree walk handed out by [`DevTreeFs::next_match`].
    pub fn free_match(&mut self) {
        if self.orphans.is_empty() {
            return;
        }
        debug!(count = self.orphans.len(), "releasing matched sub-trees");
        for mut orphan in self.orphans.drain(..) {
            if let Some(dev) = orphan.dev.take() {
                trace!(device = %dev.name(), "released matched sub-tree");
            }
            orphan.sub.close();
        }
    }
}
