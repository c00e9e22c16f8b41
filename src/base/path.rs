use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// The current position of a walk, stored as one fragment per directory level.
///
/// The bottom frame is the root directory the walk was opened with. It is never popped: a
/// [`PathStack`] is never empty once created.
#[derive(Clone, Debug)]
pub struct PathStack {
    frames: Vec<OsString>,
}

impl PathStack {
    pub fn new<S: AsRef<OsStr>>(root: S) -> Self {
        Self {
            frames: vec![root.as_ref().to_os_string()],
        }
    }

    #[inline]
    pub fn push<S: AsRef<OsStr>>(&mut self, fragment: S) {
        self.frames.push(fragment.as_ref().to_os_string());
    }

    /// Removes and returns the top fragment, or `None` if only the root remains.
    #[inline]
    pub fn pop(&mut self) -> Option<OsString> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Pops every frame but the root.
    pub fn truncate_to_root(&mut self) {
        self.frames.truncate(1);
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn top(&self) -> &OsStr {
        // The root frame is never removed.
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &OsStr {
        &self.frames[0]
    }

    /// Builds the path of the current position, optionally followed by `name`.
    #[must_use]
    pub fn join(&self, name: Option<&OsStr>) -> PathBuf {
        let mut path: PathBuf = self.frames.iter().collect();
        if let Some(name) = name {
            path.push(name);
        }
        path
    }
}
