use std::collections::hash_map::{HashMap, Iter};

use crate::error::DevTreeError;
use crate::priv_util::SliceRead;
use crate::spec::MAX_PROP_NAME_LEN;

/// The value of a device property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropValue {
    Integer(u32),
    String(String),
    /// Raw property data, as read from the property file.
    Data(Box<[u8]>),
}

impl PropValue {
    #[inline]
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            PropValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PropValue::Data(d) => Some(&d[..]),
            _ => None,
        }
    }

    /// Length of the value in bytes. Integers own no separate storage and report `0`.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        match self {
            PropValue::Integer(_) => 0,
            PropValue::String(s) => s.len(),
            PropValue::Data(d) => d.len(),
        }
    }
}

/// The properties of a single device, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DevTreeProps {
    props: HashMap<String, PropValue>,
}

impl DevTreeProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, replacing any previous value of that name.
    pub fn add(&mut self, name: &str, value: PropValue) -> Result<(), DevTreeError> {
        if name.len() > MAX_PROP_NAME_LEN {
            return Err(DevTreeError::PropNameTooLong);
        }
        self.props.insert(name.to_owned(), value);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    #[inline]
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    #[inline]
    #[must_use]
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.get(name).and_then(PropValue::as_u32)
    }

    /// Returns the raw data of the property `name` if it holds exactly `expected` bytes.
    ///
    /// `Ok(None)` is returned if no such property exists.
    pub fn get_data(&self, name: &str, expected: usize) -> Result<Option<&[u8]>, DevTreeError> {
        match self.get(name) {
            None => Ok(None),
            Some(PropValue::Data(d)) if d.len() == expected => Ok(Some(&d[..])),
            Some(PropValue::Data(d)) => Err(DevTreeError::PropSizeMismatch {
                expected,
                found: d.len(),
            }),
            Some(_) => Err(DevTreeError::PropTypeMismatch),
        }
    }

    /// Reads the `index`th big-endian cell of the raw data property `name`.
    pub fn get_u32_at(&self, name: &str, index: usize) -> Result<Option<u32>, DevTreeError> {
        match self.get(name) {
            None => Ok(None),
            Some(PropValue::Data(d)) => {
                let offset = index
                    .checked_mul(core::mem::size_of::<u32>())
                    .ok_or(DevTreeError::ParseError)?;
                Ok(Some(d.read_be_u32(offset)?))
            }
            Some(_) => Err(DevTreeError::PropTypeMismatch),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, PropValue> {
        self.props.iter()
    }
}

impl<'a> IntoIterator for &'a DevTreeProps {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_typed() {
        let mut props = DevTreeProps::new();
        props.add("value", PropValue::Integer(7)).unwrap();
        props
            .add("instance", PropValue::String("uart0".into()))
            .unwrap();

        assert_eq!(props.get_u32("value"), Some(7));
        assert_eq!(props.get_str("value"), None);
        assert_eq!(props.get_str("instance"), Some("uart0"));
        assert_eq!(props.get_u32("missing"), None);
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn long_names_are_rejected() {
        let mut props = DevTreeProps::new();
        let name = "x".repeat(MAX_PROP_NAME_LEN + 1);
        assert!(matches!(
            props.add(&name, PropValue::Integer(0)),
            Err(DevTreeError::PropNameTooLong)
        ));
        assert!(props.is_empty());
    }

    #[test]
    fn data_size_is_checked() {
        let mut props = DevTreeProps::new();
        let raw: &[u8] = &[0, 0, 0, 3, 0, 0, 0, 1];
        props.add("gpios", PropValue::Data(raw.into())).unwrap();

        assert_eq!(props.get_data("gpios", 8).unwrap(), Some(raw));
        assert!(matches!(
            props.get_data("gpios", 4),
            Err(DevTreeError::PropSizeMismatch {
                expected: 4,
                found: 8
            })
        ));
        assert_eq!(props.get_data("absent", 8).unwrap(), None);
        assert_eq!(props.get_u32_at("gpios", 1).unwrap(), Some(1));
        assert!(props.get_u32_at("gpios", 2).is_err());
    }
}
