//! Module exporting traits of this library.
pub(crate) use crate::priv_util::SliceRead;

pub use crate::common::iter::DevTreeIterator;
