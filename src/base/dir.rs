use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An open directory with a rewindable read position.
///
/// The entry names are read once when the directory is opened, so rewinding and rescanning
/// always observe the same (filesystem defined) order.
#[derive(Debug)]
pub(crate) struct DirHandle {
    path: PathBuf,
    entries: Vec<OsString>,
    pos: usize,
}

impl DirHandle {
    pub(crate) fn open(path: PathBuf) -> io::Result<Self> {
        let entries = fs::read_dir(&path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<io::Result<Vec<_>>>()?;
        Ok(Self {
            path,
            entries,
            pos: 0,
        })
    }

    #[inline]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub(crate) fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Returns the next entry name, or `None` at the end of the directory.
    #[inline]
    pub(crate) fn read(&mut self) -> Option<OsString> {
        let entry = self.entries.get(self.pos)?.clone();
        self.pos += 1;
        Some(entry)
    }

    /// Moves the read position just past the entry called `name`.
    ///
    /// If there is no such entry, the position ends up at the end of the directory.
    pub(crate) fn seek_past(&mut self, name: &OsStr) {
        while let Some(entry) = self.read() {
            if entry.as_os_str() == name {
                break;
            }
        }
    }
}

#[inline]
pub(crate) fn is_dot_entry(name: &OsStr) -> bool {
    name == "." || name == ".."
}
