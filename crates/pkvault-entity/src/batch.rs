//! Batch operations over record collections.
//!
//! Records share no state, so every operation here touches each record from
//! exactly one worker. With the `parallel` feature the work runs on rayon's
//! pool; without it, sequentially. Output order always matches input order.

use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::convert::{convert, Conversion};
use crate::entity::Entity;
use crate::format::FormatDescriptor;
use crate::Result;

/// Convert every record to `target`.
pub fn convert_all(records: &[Entity], target: &'static FormatDescriptor) -> Vec<Conversion> {
    #[cfg(feature = "parallel")]
    let converted: Vec<_> = records.par_iter().map(|r| convert(r, target)).collect();
    #[cfg(not(feature = "parallel"))]
    let converted: Vec<_> = records.iter().map(|r| convert(r, target)).collect();

    let lossy = converted.iter().filter(|c| !c.is_lossless()).count();
    debug!(
        target = target.name,
        total = converted.len(),
        lossy,
        "converted batch"
    );
    converted
}

/// Recompute every checksum.
///
/// Returns how many records had a stale checksum beforehand.
pub fn refresh_all(records: &mut [Entity]) -> usize {
    let stale = AtomicUsize::new(0);
    let refresh = |record: &mut Entity| {
        if !record.checksum_valid() {
            stale.fetch_add(1, Ordering::Relaxed);
        }
        record.refresh_checksum();
    };

    #[cfg(feature = "parallel")]
    records.par_iter_mut().for_each(refresh);
    #[cfg(not(feature = "parallel"))]
    records.iter_mut().for_each(refresh);

    let stale = stale.load(Ordering::Relaxed);
    debug!(total = records.len(), stale, "refreshed checksums");
    stale
}

/// Encode every record to its stored form, refreshing checksums.
pub fn encode_all(records: &mut [Entity]) -> Vec<Vec<u8>> {
    #[cfg(feature = "parallel")]
    let encoded: Vec<_> = records.par_iter_mut().map(Entity::encode).collect();
    #[cfg(not(feature = "parallel"))]
    let encoded: Vec<_> = records.iter_mut().map(Entity::encode).collect();

    debug!(total = encoded.len(), "encoded batch");
    encoded
}

/// Decode a batch of stored records of one format.
///
/// Fails on the first buffer of the wrong length.
pub fn decode_all<B>(format: &'static FormatDescriptor, stored: &[B]) -> Result<Vec<Entity>>
where
    B: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "parallel")]
    let decoded: Result<Vec<_>> = stored
        .par_iter()
        .map(|bytes| Entity::decode(format, bytes.as_ref()))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let decoded: Result<Vec<_>> = stored
        .iter()
        .map(|bytes| Entity::decode(format, bytes.as_ref()))
        .collect();

    let decoded = decoded?;
    let invalid = decoded.iter().filter(|e| !e.is_valid()).count();
    debug!(
        format = format.name,
        total = decoded.len(),
        invalid,
        "decoded batch"
    );
    Ok(decoded)
}
