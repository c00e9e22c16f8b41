//! The resumable depth-first walk over a device tree directory hierarchy.
//!
//! A walk is suspended after every device it yields. Its whole state is a [`PathStack`] and the
//! directory open at the top of it, so there is no recursion and a walk may be resumed at any
//! later point.
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::trace;

use crate::base::bindings::BindingTable;
use crate::base::dir::{is_dot_entry, DirHandle};
use crate::base::parse::dev_from_dir;
use crate::base::path::PathStack;
use crate::base::{DevTreeDev, DevTreeFs};
use crate::error::DevTreeError;
use crate::prelude::*;
use crate::spec::REG_FILE;

/// The position of a walk.
///
/// `dir` is `None` once the walk is exhausted.
#[derive(Debug)]
pub(crate) struct Cursor {
    path: PathStack,
    dir: Option<DirHandle>,
}

impl Cursor {
    pub(crate) fn open(root: &Path) -> Result<Self, DevTreeError> {
        let path = PathStack::new(root);
        let dir = DirHandle::open(path.join(None))?;
        Ok(Self {
            path,
            dir: Some(dir),
        })
    }

    #[inline]
    pub(crate) fn root(&self) -> &OsStr {
        self.path.root()
    }

    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.dir.is_none()
    }

    /// Moves back to the root directory.
    pub(crate) fn reset(&mut self) -> Result<(), DevTreeError> {
        self.dir = None;
        self.path.truncate_to_root();
        self.dir = Some(DirHandle::open(self.path.join(None))?);
        Ok(())
    }

    /// Advances the walk until the next device has been built or the walk is exhausted.
    pub(crate) fn next_dev(
        &mut self,
        bindings: Option<&BindingTable>,
    ) -> Result<Option<DevTreeDev>, DevTreeError> {
        while let Some(mut dir) = self.dir.take() {
            let mut dev = None;
            if dir_has_file(&mut dir, &self.path, REG_FILE)? {
                dev = Some(dev_from_dir(&mut dir, &self.path, bindings)?);
            }

            dir.rewind();
            self.dir = match self.go_next_dir(&mut dir)? {
                Some(next) => Some(next),
                None => self.go_up_next_dir()?,
            };

            if dev.is_some() {
                return Ok(dev);
            }
        }
        Ok(None)
    }

    /// Descends into the next subdirectory of `dir`, starting from its read position.
    fn go_next_dir(&mut self, dir: &mut DirHandle) -> Result<Option<DirHandle>, DevTreeError> {
        while let Some(entry) = dir.read() {
            if is_dot_entry(&entry) {
                continue;
            }
            if fs::metadata(self.path.join(Some(entry.as_os_str())))?.is_dir() {
                return self.open_child(entry.as_os_str()).map(Some);
            }
        }
        Ok(None)
    }

    fn open_child(&mut self, name: &OsStr) -> Result<DirHandle, DevTreeError> {
        self.path.push(name);
        match DirHandle::open(self.path.join(None)) {
            Ok(dir) => {
                trace!(path = %dir.path().display(), depth = self.path.depth(), "descend");
                Ok(dir)
            }
            Err(e) => {
                // Keep the stack consistent with the open directory.
                self.path.pop();
                Err(e.into())
            }
        }
    }

    /// Backtracks until a not yet visited sibling directory of some ancestor is found.
    ///
    /// Returns `None` when the root itself has been exhausted.
    fn go_up_next_dir(&mut self) -> Result<Option<DirHandle>, DevTreeError> {
        loop {
            // The root is never popped.
            let dname = match self.path.pop() {
                Some(dname) => dname,
                None => return Ok(None),
            };

            let mut parent = DirHandle::open(self.path.join(None))?;
            trace!(path = %parent.path().display(), depth = self.path.depth(), "backtrack");
            parent.seek_past(&dname);

            if let Some(next) = self.go_next_dir(&mut parent)? {
                return Ok(Some(next));
            }
        }
    }
}

/// Returns `true` if `dir` contains a regular file called `fname`.
fn dir_has_file(dir: &mut DirHandle, path: &PathStack, fname: &str) -> Result<bool, DevTreeError> {
    dir.rewind();
    while let Some(entry) = dir.read() {
        if entry.as_os_str() != OsStr::new(fname) {
            continue;
        }
        if fs::metadata(path.join(Some(entry.as_os_str())))?.is_file() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// An iterator over the remaining devices of a [`DevTreeFs`].
///
/// Iteration stops after the first error, which is also recorded in the handle's error state.
pub struct Devices<'a, 'b> {
    pub(crate) fs: &'a mut DevTreeFs<'b>,
    pub(crate) failed: bool,
}

impl Iterator for Devices<'_, '_> {
    type Item = Result<DevTreeDev, DevTreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.fs.next_dev() {
            Ok(dev) => dev.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
