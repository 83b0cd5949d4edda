//! Peer percentile placement.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Percentile of `value` within a peer distribution.
///
/// Defined as `(count of peers <= value) / peer count * 100`, ties counted
/// inclusively, which makes the result monotonic in `value` for a fixed
/// peer set. Returns `None` for an empty peer set; missing peer data is an
/// unavailability reason upstream, never an error here.
#[must_use]
pub fn peer_percentile(peers: &[Decimal], value: Decimal) -> Option<Decimal> {
    if peers.is_empty() {
        return None;
    }
    let at_or_below = peers.iter().filter(|p| **p <= value).count();
    Some(Decimal::from(at_or_below) / Decimal::from(peers.len()) * dec!(100))
}
