//! Test helpers

use bitflip_core::{BitSampler, BitVector};

pub(crate) fn bits(raw: &[u8]) -> BitVector {
    raw.iter().map(|&b| b == 1).collect()
}

/// Sampler that replays a fixed list of vectors, wrapping around at the
/// end. Reseeding restarts from the first vector.
pub(crate) struct ScriptedSampler {
    n: usize,
    script: Vec<BitVector>,
    cursor: usize,
}

impl ScriptedSampler {
    pub(crate) fn new(n: usize, script: &[&[u8]]) -> Self {
        Self {
            n,
            script: script.iter().map(|raw| bits(raw)).collect(),
            cursor: 0,
        }
    }
}

impl BitSampler for ScriptedSampler {
    fn n(&self) -> usize {
        self.n
    }

    fn sample(&mut self) -> BitVector {
        let next = self.script[self.cursor % self.script.len()].clone();
        self.cursor += 1;
        next
    }

    fn seed(&mut self, _seed: u64) {
        self.cursor = 0;
    }
}
