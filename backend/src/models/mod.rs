pub mod attendance;
pub mod performance;
pub mod schedule;

pub use attendance::*;
pub use performance::*;
pub use schedule::*;

use serde::{Deserialize, Deserializer};

/// The portal encodes empty lists as `null`; treat that as the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
