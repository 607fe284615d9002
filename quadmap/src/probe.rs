// The maximum probe length for table operations.
//
// The first `2 * capacity` offsets cover every slot of a power-of-two table,
// so no walk needs to go further than that.
macro_rules! probe_limit {
    ($capacity:expr) => {
        $capacity.saturating_mul(2)
    };
}

// Offset of the `i`th probe from the home slot.
//
// Integer halving makes the first two offsets both zero, so the home slot is
// visited twice before the walk moves on.
#[inline]
pub fn offset(i: usize) -> usize {
    (i / 2).wrapping_add(i.wrapping_mul(i) / 2)
}

// A quadratic probe sequence over a power-of-two table.
pub struct Probe {
    // The current index in the probe sequence.
    pub i: usize,
    // The number of probes taken so far.
    pub len: usize,
    // The home slot, as derived from the full hash.
    home: usize,
    // Mask for the length of the table.
    mask: usize,
}

impl Probe {
    // Initialize the probe sequence, returning the maximum probe limit.
    #[inline]
    pub fn start(hash: u64, capacity: usize) -> (Probe, usize) {
        debug_assert!(capacity.is_power_of_two());

        let home = hash as usize;
        let mask = capacity - 1;
        let probe = Probe {
            i: home & mask,
            len: 0,
            home,
            mask,
        };

        (probe, probe_limit!(capacity))
    }

    // Increment the probe sequence.
    #[inline]
    pub fn next(&mut self) {
        self.len += 1;
        self.i = self.home.wrapping_add(offset(self.len)) & self.mask;
    }
}
