/// Single-tap Fibonacci linear-feedback shift register
use std::collections::VecDeque;
use std::fmt;

use crate::error::LfsrError;

/// Register of `N` bits and a tap counted from the right end.
///
/// Each step XORs the leftmost bit with the tapped bit, drops the leftmost
/// bit and appends the XOR result on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lfsr {
    register: VecDeque<u8>,
    tap: usize,
}

impl Lfsr {
    /// Build a register from a string of '0'/'1', read left to right
    pub fn new(seed: &str, tap: usize) -> Result<Self, LfsrError> {
        let len = seed.chars().count();
        if len == 0 {
            return Err(LfsrError::EmptySeed);
        }
        if tap >= len {
            return Err(LfsrError::TapOutOfRange { tap, len });
        }

        let register = seed
            .chars()
            .enumerate()
            .map(|(index, ch)| match ch {
                '0' => Ok(0),
                '1' => Ok(1),
                _ => Err(LfsrError::InvalidSeedChar { ch, index }),
            })
            .collect::<Result<VecDeque<u8>, _>>()?;

        Ok(Self { register, tap })
    }

    /// Advance the register by one position and return the feedback bit
    pub fn step(&mut self) -> u8 {
        let len = self.register.len();
        let feedback = self.register[0] ^ self.register[len - 1 - self.tap];
        self.register.pop_front();
        self.register.push_back(feedback);
        feedback
    }

    /// Run `k` steps and pack the bits most-significant first.
    ///
    /// Only the low 32 bits survive when `k > 32`.
    pub fn generate(&mut self, k: u32) -> u32 {
        (0..k).fold(0u32, |value, _| (value << 1) | u32::from(self.step()))
    }

    /// Endless stream of `generate(bits)` words
    pub fn keystream(&mut self, bits: u32) -> Keystream<'_> {
        Keystream { lfsr: self, bits }
    }

    /// Copy of the current register, index 0 first
    pub fn register(&self) -> Vec<u8> {
        self.register.iter().copied().collect()
    }

    pub fn tap(&self) -> usize {
        self.tap
    }

    pub fn len(&self) -> usize {
        self.register.len()
    }

    /// Always false: construction rejects empty seeds
    pub fn is_empty(&self) -> bool {
        self.register.is_empty()
    }

    pub fn to_bit_string(&self) -> String {
        self.register
            .iter()
            .map(|&bit| if bit == 1 { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for Lfsr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Iterator returned by [`Lfsr::keystream`]
pub struct Keystream<'a> {
    lfsr: &'a mut Lfsr,
    bits: u32,
}

impl Iterator for Keystream<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.lfsr.generate(self.bits))
    }
}
