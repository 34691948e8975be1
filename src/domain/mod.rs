//! Domain layer - Envelopes, money conversion and upstream shapes.
//!
//! Nothing in here performs I/O. Upstream aggregates are explicit
//! structs whose well-known fields are optional and whose remaining
//! fields ride along in a flattened map, so a relayed payload keeps
//! everything the platform sent.

pub mod envelope;
pub mod kalshi;
pub mod money;
pub mod polymarket;

pub use envelope::{Envelope, OrderOutcome};
pub use money::{cents_as_f64, cents_to_dollars, format_usd};

use serde::{Deserialize, Deserializer};

/// Deserialize a possibly-`null` field into its `Default` value.
///
/// Upstream list endpoints send `null` or omit the array when a page
/// is empty; the relayed result always carries `[]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
