//! Case-insensitive field sets.
//!
//! The gateway treats field names case-insensitively (requests go out as
//! `brq_amount`, responses come back as `BRQ_AMOUNT`). [`FieldMap`] normalizes
//! every name to lower case when it is inserted and keeps the original
//! spelling next to the value, so lookups are plain exact matches while the
//! wire output and the signature input still use the name as given.
//!
//! Iteration follows the order of the normalized names, which is the order the
//! signature scheme canonicalizes in.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use url::form_urlencoded;

use crate::error::FieldMapError;

/// Normalized lookup key for a field name.
pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase()
}

#[derive(Clone, PartialEq, Eq)]
struct Field {
    name: String,
    value: String,
}

/// A set of named string fields with case-insensitive names.
///
/// # Example
///
/// ```rust
/// use brq::FieldMap;
///
/// let fields = FieldMap::new()
///     .with("BRQ_STATUSCODE", "190")
///     .with("brq_amount", "10.00");
///
/// assert_eq!(fields.get("brq_statuscode"), Some("190"));
/// assert_eq!(fields.encode_form(), "brq_amount=10.00&BRQ_STATUSCODE=190");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: BTreeMap<String, Field>,
}

impl FieldMap {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field set from name/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`FieldMapError::DuplicateField`] if two names are equal once
    /// case is ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, FieldMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = BTreeMap::new();
        for (name, value) in pairs {
            let name = name.into();
            match entries.entry(normalize(&name)) {
                Entry::Occupied(_) => return Err(FieldMapError::DuplicateField { name }),
                Entry::Vacant(slot) => {
                    slot.insert(Field {
                        name,
                        value: value.into(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    ///
    /// An empty body yields an empty set. A pair without `=` becomes a field
    /// with an empty value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldMapError::DuplicateField`] if the body repeats a name.
    pub fn decode_form(body: &str) -> Result<Self, FieldMapError> {
        Self::from_pairs(form_urlencoded::parse(body.as_bytes()).into_owned())
    }

    /// Encodes the fields as an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn encode_form(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Sets a field, replacing any field with the same name regardless of its
    /// case. Returns the replaced value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        self.entries
            .insert(
                normalize(&name),
                Field {
                    name,
                    value: value.into(),
                },
            )
            .map(|previous| previous.value)
    }

    /// Builder form of [`FieldMap::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&normalize(name))
            .map(|field| field.value.as_str())
    }

    /// Returns the name of a field as it was inserted.
    #[must_use]
    pub fn original_name(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&normalize(name))
            .map(|field| field.name.as_str())
    }

    /// Returns `true` if the field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize(name))
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries
            .remove(&normalize(name))
            .map(|field| field.value)
    }

    /// Returns a copy of this set without the given field.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        let mut copy = self.clone();
        copy.remove(name);
        copy
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs, names in their original casing,
    /// ordered by case-insensitive name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .values()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }

    /// Iterates over `(normalized name, original name, value)` triples.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.entries.iter().map(|(key, field)| {
            (key.as_str(), field.name.as_str(), field.value.as_str())
        })
    }
}

impl fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Collects pairs with [`FieldMap::insert`] semantics: a later field replaces
/// an earlier one with the same name.
impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}

impl<K, V> Extend<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Serializes as a map keyed by the original field names.
impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
