use log::error;

use crate::collectors::BestFitIndex;
use crate::entities::Bin;
use crate::util::Amount;

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

pub fn bin_is_consistent<A: Amount>(bin: &Bin<A>) -> bool {
    let piece_sum = A::total_of(bin.pieces().iter().copied());
    if piece_sum != bin.total() {
        error!("bin total {} does not match the sum of its pieces {}", bin.total(), piece_sum);
        return false;
    }
    if bin.total() > bin.max_capacity() {
        error!("bin total {} exceeds its max capacity {}", bin.total(), bin.max_capacity());
        return false;
    }
    !bin.capacities().is_empty()
}

/// Checks that the sum of all pieces equals the sum of all bin totals (up to float accumulation error)
pub fn pieces_conserved<A: Amount>(pieces_before: A, bins: &[Bin<A>]) -> bool {
    let packed = A::total_of(bins.iter().map(|b| b.total()));
    match pieces_before.approx_eq(packed) {
        true => true,
        false => {
            error!("{pieces_before} worth of pieces went in, {packed} came out");
            false
        }
    }
}

/// Checks that every bin in the index is stored under its current remaining capacity, exactly once
pub fn index_is_consistent<A: Amount>(index: &BestFitIndex<A>) -> bool {
    index.buckets().all(|(key, queue)| {
        !queue.is_empty()
            && queue
                .iter()
                .all(|bin| bin.max_remaining_capacity().key() == *key)
    })
}
