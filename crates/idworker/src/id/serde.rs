use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::SnowflakeId;

/// Serializes as the native integer representation.
impl Serialize for SnowflakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(s)
    }
}

/// Deserializes from the native integer representation, rejecting values with
/// the reserved sign bit set.
impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(d)?;
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(de::Error::custom(format_args!(
                "snowflake id {raw} has the reserved bit set"
            )));
        }
        Ok(id)
    }
}
