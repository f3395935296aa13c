use crate::utils::*;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RegionKind {
    Used,
    Free,
    /// Carved out of a free region by some [FitStrategy].
    Placed,
}

/// A half-open interval `[start, end)` of the address space.
///
/// Regions are never mutated. Placing requests into a free region
/// spawns new [RegionKind::Placed] regions instead.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Region {
    pub start:  ByteSteps,
    pub end:    ByteSteps,
    pub kind:   RegionKind,
}

impl Region {
    pub fn new(start: ByteSteps, end: ByteSteps, kind: RegionKind) -> Self {
        debug_assert!(end > start, "Empty region.");
        Self { start, end, kind }
    }

    pub fn capacity(&self) -> ByteSteps {
        self.end - self.start
    }

    pub fn contains(&self, addr: ByteSteps) -> bool {
        self.start <= addr && addr < self.end
    }
}

/// Knobs of [generate_layout].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub memory_size:    ByteSteps,
    pub block_min:      ByteSteps,
    pub block_max:      ByteSteps,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            memory_size:    1000,
            block_min:      50,
            block_max:      200,
        }
    }
}

impl LayoutConfig {
    pub fn new(memory_size: ByteSteps, block_min: ByteSteps, block_max: ByteSteps) -> Self {
        Self { memory_size, block_min, block_max }
    }

    /// Rejects configurations for which layout generation
    /// would never terminate or draw from an empty range.
    pub fn validate(&self) -> Result<()> {
        if self.memory_size == 0 {
            Err(InvalidInput::new(Culprit::MemorySize, "Memory size must be positive."))
        } else if self.block_min == 0 {
            Err(InvalidInput::new(
                Culprit::BlockRange { min: self.block_min, max: self.block_max },
                "Minimum block size must be positive."
            ))
        } else if self.block_min > self.block_max {
            Err(InvalidInput::new(
                Culprit::BlockRange { min: self.block_min, max: self.block_max },
                "Minimum block size exceeds maximum block size."
            ))
        } else { Ok(()) }
    }
}

/// A snapshot of memory: used and free regions which, together,
/// tile `[0, memory_size)`. Both vectors are sorted by ascending start.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Layout {
    pub memory_size:    ByteSteps,
    pub used:           Vec<Region>,
    pub free:           Vec<Region>,
}

impl Layout {
    pub fn free_capacities(&self) -> Vec<ByteSteps> {
        self.free
            .iter()
            .map(|r| r.capacity())
            .collect()
    }

    pub fn total_free(&self) -> ByteSteps {
        self.free
            .iter()
            .map(|r| r.capacity())
            .sum()
    }

    /// Used and free regions, merged back into address order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.used
            .iter()
            .merge_by(self.free.iter(), |a, b| a.start < b.start)
    }

    /// Returns `true` if used and free regions alternate (starting with
    /// a used one) and cover `[0, memory_size)` without gaps or overlaps.
    pub fn is_tiling(&self) -> bool {
        let mut expected_start = 0;
        for (idx, r) in self.regions().enumerate() {
            let expected_kind = if idx % 2 == 0 { RegionKind::Used } else { RegionKind::Free };
            if r.kind != expected_kind || r.start != expected_start || r.end <= r.start {
                return false;
            }
            expected_start = r.end;
        }

        expected_start == self.memory_size
    }
}

/// Partitions `[0, memory_size)` into blocks of random length in
/// `[block_min, block_max]`. Blocks alternate between used and free,
/// the first one being used. The last block is cut short at
/// `memory_size`, and may thus be smaller than `block_min`.
pub fn generate_layout<R: Rng + ?Sized>(cfg: &LayoutConfig, rng: &mut R) -> Result<Layout> {
    cfg.validate()?;

    let mut boundaries: Vec<ByteSteps> = vec![];
    let mut total: ByteSteps = 0;
    while total < cfg.memory_size {
        boundaries.push(total);
        total = total.saturating_add(rng.gen_range(cfg.block_min..=cfg.block_max));
    }
    // Clamp the overshoot.
    boundaries.push(cfg.memory_size);

    let (used, free): (Vec<Region>, Vec<Region>) = boundaries.iter()
        .tuple_windows()
        .enumerate()
        .map(|(idx, (&start, &end))| {
            let kind = if idx % 2 == 0 { RegionKind::Used } else { RegionKind::Free };
            Region::new(start, end, kind)
        })
        .partition(|r| r.kind == RegionKind::Used);

    debug!(
        "Layout of {} units: {} used, {} free ({} units free)",
        cfg.memory_size,
        used.len(),
        free.len(),
        free.iter().map(|r| r.capacity()).sum::<ByteSteps>()
    );

    Ok(Layout {
        memory_size: cfg.memory_size,
        used,
        free,
    })
}
