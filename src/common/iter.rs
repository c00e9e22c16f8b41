use crate::base::DevTreeDev;
use crate::error::DevTreeError;

/// A source of devices, walked one device per call.
///
/// `Ok(None)` means the walk is exhausted. Errors abort the current call and are never retried.
pub trait DevTreeIterator {
    /// Returns the next device of the walk.
    fn next_dev(&mut self) -> Result<Option<DevTreeDev>, DevTreeError>;

    /// Advances the walk to the next device matching `predicate` and returns it.
    ///
    /// Devices which don't match are dropped.
    fn find_next<F>(&mut self, predicate: F) -> Result<Option<DevTreeDev>, DevTreeError>
    where
        F: Fn(&DevTreeDev) -> bool,
        Self: Sized,
    {
        while let Some(dev) = self.next_dev()? {
            if predicate(&dev) {
                return Ok(Some(dev));
            }
        }
        Ok(None)
    }

    /// Returns the next device called `name`.
    ///
    /// An empty name never matches and leaves the walk untouched.
    fn find_by_name(&mut self, name: &str) -> Result<Option<DevTreeDev>, DevTreeError>
    where
        Self: Sized,
    {
        if name.is_empty() {
            return Ok(None);
        }
        self.find_next(|dev| dev.name() == name)
    }

    /// Returns the next device with `compat` in its compatible list.
    ///
    /// An empty string never matches and leaves the walk untouched.
    fn find_compatible(&mut self, compat: &str) -> Result<Option<DevTreeDev>, DevTreeError>
    where
        Self: Sized,
    {
        if compat.is_empty() {
            return Ok(None);
        }
        self.find_next(|dev| dev.compat().is_compatible(compat))
    }
}
