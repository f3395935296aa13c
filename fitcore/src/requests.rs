use crate::utils::*;

/// Share of the total free space that the generated requests must reach.
/// Expressed as a ratio so that the target stays in integer arithmetic.
const DEMAND_RATIO: (ByteSteps, ByteSteps) = (4, 5);

/// Draws a sequence of request sizes calibrated to some free regions.
///
/// Sizes are uniform in `[min / 3, max]` of the given capacities (with
/// the lower bound clamped to 1). Drawing stops as soon as the total
/// demand reaches 80% of the total free space; the last request may
/// overshoot the target. At least one request is always drawn.
pub fn generate_requests<R: Rng + ?Sized>(
    free_capacities:    &[ByteSteps],
    rng:                &mut R,
) -> Result<RequestList> {
    let (min_cap, max_cap) = match free_capacities.iter().minmax().into_option() {
        Some((&lo, &hi)) => (lo, hi),
        None => {
            return Err(InvalidInput::new(Culprit::FreeCapacities, "No free regions to request memory from."));
        }
    };
    if min_cap == 0 {
        return Err(InvalidInput::new(Culprit::FreeCapacities, "Free region with 0 capacity found!"));
    }

    let total_free = free_capacities.iter()
        .try_fold(0 as ByteSteps, |acc, &c| acc.checked_add(c))
        .ok_or_else(|| InvalidInput::new(Culprit::FreeCapacities, "Total free space overflows."))?;
    let (num, den) = DEMAND_RATIO;
    // Same as `total_free * num / den`, without the overflow.
    let target = total_free / den * num + total_free % den * num / den;
    let lower = (min_cap / 3).max(1);

    let mut res = vec![];
    let mut total: ByteSteps = 0;
    loop {
        let req = rng.gen_range(lower..=max_cap);
        res.push(req);
        total = total.saturating_add(req);
        if total >= target { break; }
    }

    debug!(
        "{} requests totalling {} units (target {}, sizes in [{}, {}])",
        res.len(), total, target, lower, max_cap
    );

    Ok(res)
}

/// Saturates at `ByteSteps::MAX` instead of wrapping.
pub fn total_demand(requests: &[ByteSteps]) -> ByteSteps {
    requests.iter().copied().fold(0, ByteSteps::saturating_add)
}
