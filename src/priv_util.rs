use core::convert::TryInto;
use core::mem::size_of;

/// A read outside of the bounds of a slice, or an unterminated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceReadError;

pub trait SliceRead {
    fn read_be_u32(&self, pos: usize) -> Result<u32, SliceReadError>;
    fn read_bstring0(&self, pos: usize) -> Result<&[u8], SliceReadError>;
}

impl SliceRead for [u8] {
    #[inline]
    fn read_be_u32(&self, pos: usize) -> Result<u32, SliceReadError> {
        let end = pos.checked_add(size_of::<u32>()).ok_or(SliceReadError)?;
        let raw: [u8; 4] = self
            .get(pos..end)
            .ok_or(SliceReadError)?
            .try_into()
            .or(Err(SliceReadError))?;
        Ok(u32::from_be_bytes(raw))
    }

    /// Returns the bytes from `pos` up to (not including) the next NUL byte.
    #[inline]
    fn read_bstring0(&self, pos: usize) -> Result<&[u8], SliceReadError> {
        let tail = self.get(pos..).ok_or(SliceReadError)?;
        match tail.iter().position(|&b| b == 0) {
            Some(len) => Ok(&tail[..len]),
            None => Err(SliceReadError),
        }
    }
}
