//! RNG module - deterministic randomness and the bag-shuffle piece stream.
//!
//! `BagShuffle` deals shape indices as back-to-back full permutations of
//! `0..size` ("bags"): every index appears exactly once per bag, and the
//! first draw of a bag is re-rolled while it equals the previous bag's last
//! draw, so the stream never repeats an index across a bag boundary.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Infinite shape-index stream with the cross-bag no-repeat constraint.
///
/// One draw removes a uniformly chosen element from the unconsumed prefix
/// of the working array by swapping the prefix's last element into the
/// chosen slot. There is no seek; restart by constructing a new value.
#[derive(Debug, Clone)]
pub struct BagShuffle {
    deck: Vec<u8>,
    /// Unconsumed prefix length; 0 means the next draw opens a new bag.
    remaining: usize,
    /// Final draw of the previous bag.
    last: Option<u8>,
    rng: SimpleRng,
}

impl BagShuffle {
    pub fn new(size: usize, seed: u32) -> Self {
        assert!(size > 0, "bag size must be at least 1");
        Self {
            deck: (0..size as u8).collect(),
            remaining: 0,
            last: None,
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next shape index.
    pub fn next(&mut self) -> u8 {
        if self.remaining == 0 {
            for (i, slot) in self.deck.iter_mut().enumerate() {
                *slot = i as u8;
            }
            self.remaining = self.deck.len();
        }

        let tail = self.remaining - 1;
        let opening_draw = self.remaining == self.deck.len() && self.deck.len() > 1;
        let mut pick;
        loop {
            pick = self.rng.next_range(self.remaining as u32) as usize;
            if !(opening_draw && Some(self.deck[pick]) == self.last) {
                break;
            }
        }

        let drawn = self.deck[pick];
        self.deck[pick] = self.deck[tail];
        self.remaining = tail;
        if self.remaining == 0 {
            self.last = Some(drawn);
        }
        drawn
    }

    /// Number of distinct indices per bag.
    pub fn size(&self) -> usize {
        self.deck.len()
    }
}
