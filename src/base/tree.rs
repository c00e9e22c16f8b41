use std::borrow::Cow;
use std::collections::VecDeque;
use std::path::Path;

use tracing::debug;

use crate::base::bindings::BindingTable;
use crate::base::iters::{Cursor, Devices};
use crate::base::subtree::Orphan;
use crate::base::DevTreeDev;
use crate::error::{DevTreeError, ErrorState};
use crate::prelude::*;

/// A walkable device tree, as published by the kernel under
/// [`DEFAULT_ROOT`](crate::spec::DEFAULT_ROOT).
///
/// A handle owns one resumable walk over the tree. Devices are produced one at a time by
/// [`DevTreeIterator::next_dev`] in depth-first order, a node's own device before the devices of
/// its children.
///
/// Every failing operation records its error in the handle's error state, which stays set until
/// the handle is successfully opened or reset again.
///
/// # Example
///
/// ```no_run
/// use devtree_fs::prelude::*;
/// use devtree_fs::DevTreeFs;
///
/// let mut devtree = DevTreeFs::from_root("/proc/device-tree")?;
/// while let Some(dev) = devtree.next_dev()? {
///     println!("{} at {:#010x}", dev.name(), dev.base());
/// }
/// # Ok::<(), devtree_fs::DevTreeError>(())
/// ```
pub struct DevTreeFs<'b> {
    pub(crate) error: ErrorState,
    cursor: Option<Cursor>,
    pub(crate) bindings: Option<&'b BindingTable>,
    pub(crate) pending: VecDeque<DevTreeDev>,
    pub(crate) orphans: Vec<Orphan<'b>>,
}

impl Default for DevTreeFs<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'b> DevTreeFs<'b> {
    /// Creates a closed handle. See [`DevTreeFs::open`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            error: ErrorState::default(),
            cursor: None,
            bindings: None,
            pending: VecDeque::new(),
            orphans: Vec::new(),
        }
    }

    /// Creates a closed handle which parses property files through `bindings`.
    #[must_use]
    pub fn with_bindings(bindings: &'b BindingTable) -> Self {
        let mut this = Self::new();
        this.bindings = Some(bindings);
        this
    }

    /// Creates a handle and opens the device tree at `root`.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Result<Self, DevTreeError> {
        let mut this = Self::new();
        this.open(root)?;
        Ok(this)
    }

    /// Opens the device tree rooted at the directory `root`.
    ///
    /// Clears the error state on success. Opening an already open handle fails with
    /// [`DevTreeError::Busy`], it must be [closed](Self::close) first.
    pub fn open<P: AsRef<Path>>(&mut self, root: P) -> Result<(), DevTreeError> {
        let root = root.as_ref();
        let res = if self.cursor.is_some() {
            Err(DevTreeError::Busy)
        } else if root.as_os_str().is_empty() {
            Err(DevTreeError::InvalidRoot)
        } else {
            Cursor::open(root)
        };

        let cursor = self.track(res)?;
        debug!(root = %root.display(), "opened device tree");
        self.cursor = Some(cursor);
        self.error.clear();
        Ok(())
    }

    /// Releases the walk and every matched sub-tree.
    ///
    /// Closing a closed handle does nothing.
    pub fn close(&mut self) {
        self.free_match();
        self.pending.clear();
        if let Some(cursor) = self.cursor.take() {
            debug!(root = %Path::new(cursor.root()).display(), "closed device tree");
        }
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// Returns `true` once every device has been produced.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor.as_ref().map_or(true, Cursor::is_exhausted)
    }

    /// Restarts the walk from the root directory.
    pub fn reset(&mut self) -> Result<(), DevTreeError> {
        let res = match self.cursor.as_mut() {
            Some(cursor) => cursor.reset(),
            None => Err(DevTreeError::NotOpen),
        };
        self.track(res)?;
        self.error.clear();
        debug!("reset device tree walk");
        Ok(())
    }

    /// Installs the parsers used for property files of subsequently built devices.
    #[inline]
    pub fn set_bindings(&mut self, bindings: &'b BindingTable) {
        self.bindings = Some(bindings);
    }

    #[inline]
    pub fn unset_bindings(&mut self) {
        self.bindings = None;
    }

    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_error()
    }

    /// Describes the last error of this handle.
    #[inline]
    #[must_use]
    pub fn error_string(&self) -> Cow<'static, str> {
        self.error.as_str()
    }

    #[inline]
    #[must_use]
    pub fn error_state(&self) -> &ErrorState {
        &self.error
    }

    /// Returns an iterator over the remaining devices.
    #[inline]
    pub fn devices(&mut self) -> Devices<'_, 'b> {
        Devices {
            fs: self,
            failed: false,
        }
    }

    /// Records the error of `res`, if any, in the error state.
    pub(crate) fn track<T>(&mut self, res: Result<T, DevTreeError>) -> Result<T, DevTreeError> {
        if let Err(e) = &res {
            self.error.set(e);
        }
        res
    }
}

impl DevTreeIterator for DevTreeFs<'_> {
    fn next_dev(&mut self) -> Result<Option<DevTreeDev>, DevTreeError> {
        let bindings = self.bindings;
        let res = match self.cursor.as_mut() {
            Some(cursor) => cursor.next_dev(bindings),
            None => Err(DevTreeError::NotOpen),
        };
        self.track(res)
    }
}
