use rand::Rng;

/// One left/right decision per pin row, packed into an integer with the
/// first decision in the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNumber {
    value: u32,
    rows: usize,
}

impl PathNumber {
    pub fn new(value: u32, rows: usize) -> Option<Self> {
        if rows == 0 || rows >= u32::BITS as usize || value >= 1 << rows {
            return None;
        }
        Some(Self { value, rows })
    }

    /// Uniform over all `2^rows` paths.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, rows: usize) -> Self {
        let value = rng.gen_range(0..1u32 << rows);
        Self { value, rows }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Decisions from the apex down; `true` moves one column right.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.rows).rev().map(move |shift| (self.value >> shift) & 1 == 1)
    }

    /// Final column, i.e. the number of right moves.
    pub fn bin_index(&self) -> usize {
        self.value.count_ones() as usize
    }
}

/// Running count of dots per bin, handed out as particles are created.
#[derive(Debug, Clone, Default)]
pub struct BinStacks {
    counts: Vec<u32>,
}

impl BinStacks {
    pub fn new(bins: usize) -> Self {
        Self {
            counts: vec![0; bins],
        }
    }

    /// Reserves the next slot in `bin` and returns its 1-based position.
    pub fn push(&mut self, bin: usize) -> u32 {
        self.counts[bin] += 1;
        self.counts[bin]
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bits_are_most_significant_first() {
        let path = PathNumber::new(0b1000001, 7).unwrap();
        let bits: Vec<bool> = path.bits().collect();
        assert_eq!(bits, vec![true, false, false, false, false, false, true]);
        assert_eq!(path.bin_index(), 2);
    }

    #[test]
    fn leading_zeros_are_kept() {
        let path = PathNumber::new(1, 7).unwrap();
        assert_eq!(path.bits().count(), 7);
        assert_eq!(path.bits().filter(|b| !b).count(), 6);
    }

    #[test]
    fn rejects_values_outside_range() {
        assert!(PathNumber::new(128, 7).is_none());
        assert!(PathNumber::new(127, 7).is_some());
        assert!(PathNumber::new(0, 0).is_none());
    }

    #[test]
    fn random_paths_cover_every_bin() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 8];
        for _ in 0..2000 {
            let path = PathNumber::random(&mut rng, 7);
            assert!(path.value() < 128);
            seen[path.bin_index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn stacks_count_per_bin() {
        let mut stacks = BinStacks::new(3);
        assert_eq!(stacks.push(1), 1);
        assert_eq!(stacks.push(1), 2);
        assert_eq!(stacks.push(0), 1);
        assert_eq!(stacks.counts(), &[1, 2, 0]);
    }
}
