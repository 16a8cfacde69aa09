// core/src/model/ids.rs

//! The single identifier type used for schools, grades, classes, equipment
//! items and cart entries.
//!
//! The catalog endpoints emit numeric ids while the cart backend stores them as
//! strings. `EntityId` is an opaque string on our side; the number/string
//! difference is absorbed by its `Deserialize` impl and never leaks past the
//! transport boundary.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
  pub fn new(raw: impl Into<String>) -> Self {
    EntityId(raw.into())
  }

  /// Fresh time-ordered token for a new cart entry.
  pub fn generate() -> Self {
    EntityId(uuid::Uuid::now_v7().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_blank(&self) -> bool {
    self.0.trim().is_empty()
  }
}

impl fmt::Display for EntityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for EntityId {
  fn from(raw: &str) -> Self {
    EntityId(raw.to_string())
  }
}

impl From<String> for EntityId {
  fn from(raw: String) -> Self {
    EntityId(raw)
  }
}

impl From<u64> for EntityId {
  fn from(raw: u64) -> Self {
    EntityId(raw.to_string())
  }
}

impl PartialEq<str> for EntityId {
  fn eq(&self, other: &str) -> bool {
    self.0 == other
  }
}

impl PartialEq<&str> for EntityId {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}

impl Serialize for EntityId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    // Always a string on the wire.
    serializer.serialize_str(&self.0)
  }
}

struct EntityIdVisitor;

impl<'de> Visitor<'de> for EntityIdVisitor {
  type Value = EntityId;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("a string or integer identifier")
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityId, E> {
    Ok(EntityId(v.to_string()))
  }

  fn visit_string<E: de::Error>(self, v: String) -> Result<EntityId, E> {
    Ok(EntityId(v))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityId, E> {
    Ok(EntityId(v.to_string()))
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntityId, E> {
    Ok(EntityId(v.to_string()))
  }
}

impl<'de> Deserialize<'de> for EntityId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(EntityIdVisitor)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numeric_and_string_ids_decode_to_the_same_value() {
    let from_number: EntityId = serde_json::from_str("101").unwrap();
    let from_string: EntityId = serde_json::from_str("\"101\"").unwrap();
    assert_eq!(from_number, from_string);
    assert_eq!(from_number, "101");
  }

  #[test]
  fn ids_are_always_emitted_as_strings() {
    let id = EntityId::from(6u64);
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"6\"");
  }

  #[test]
  fn generated_ids_are_unique() {
    let a = EntityId::generate();
    let b = EntityId::generate();
    assert_ne!(a, b);
    assert!(!a.is_blank());
  }

  #[test]
  fn floats_are_rejected() {
    assert!(serde_json::from_str::<EntityId>("1.5").is_err());
  }
}
