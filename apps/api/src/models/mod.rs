pub mod company;
pub mod job;

use serde::{Deserialize, Deserializer};

/// Lets an `Option<Option<T>>` field tell an explicit `null` (`Some(None)`)
/// apart from a missing key (`None`, via `#[serde(default)]`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
