//! Independent bit-flip noise.
//!
//! Each observed bit is replaced by its complement with probability `q`,
//! independently of every other bit. Every consumer takes an explicit
//! `&mut impl Rng`; seed a `rand::rngs::StdRng` for reproducible runs.
use crate::waveform::{
    data::Observations,
    errors::{WaveError, WaveResult},
};
use ndarray::Array1;
use rand::Rng;

/// Return `1 - bit` with probability `q`, otherwise `bit`.
///
/// `q` is not validated here; values at or below 0 never flip and values at
/// or above 1 always flip. Use [`BitFlipChannel`] for a checked channel.
pub fn flip_bit<R: Rng + ?Sized>(bit: u8, q: f64, rng: &mut R) -> u8 {
    if q <= 0.0 {
        return bit;
    }
    if q >= 1.0 || rng.gen_bool(q) { 1 - bit } else { bit }
}

/// Binary symmetric channel with a validated flip probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitFlipChannel {
    q: f64,
}

impl BitFlipChannel {
    /// Errors
    /// ------
    /// - `WaveError::InvalidFlipProbability` unless `q` is finite and in `[0, 1]`.
    pub fn new(q: f64) -> WaveResult<Self> {
        if !q.is_finite() || !(0.0..=1.0).contains(&q) {
            return Err(WaveError::InvalidFlipProbability { value: q });
        }
        Ok(BitFlipChannel { q })
    }

    /// A channel that never flips.
    pub fn noiseless() -> Self {
        BitFlipChannel { q: 0.0 }
    }

    pub fn flip_probability(&self) -> f64 {
        self.q
    }

    /// Pass a single bit through the channel.
    pub fn transmit<R: Rng + ?Sized>(&self, bit: u8, rng: &mut R) -> u8 {
        flip_bit(bit, self.q, rng)
    }

    /// Pass every bit of `obs` through the channel, keeping the times.
    pub fn apply<R: Rng + ?Sized>(&self, obs: &Observations, rng: &mut R) -> WaveResult<Observations> {
        let bits: Array1<u8> = obs.bits().iter().map(|&b| self.transmit(b, rng)).collect();
        obs.with_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use rand::{rngs::StdRng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Empirical flip rate of `flip_bit`.
    // - Degenerate flip probabilities 0 and 1.
    // - Validation and whole-series application of `BitFlipChannel`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The empirical flip rate matches `q`.
    //
    // Given
    // -----
    // - 100 000 transmissions of bit 1 with q = 0.3 under a fixed seed.
    //
    // Expect
    // ------
    // - Fraction of zeros within 0.01 of 0.3.
    fn flip_rate_matches_probability() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(7);
        let n = 100_000;

        // Act
        let flipped = (0..n).filter(|_| flip_bit(1, 0.3, &mut rng) == 0).count();

        // Assert
        let rate = flipped as f64 / n as f64;
        assert!((rate - 0.3).abs() < 0.01, "rate {rate}");
    }

    #[test]
    // Purpose
    // -------
    // q = 0 is the identity and q = 1 is the complement.
    fn extreme_probabilities_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        for bit in [0_u8, 1] {
            assert_eq!(flip_bit(bit, 0.0, &mut rng), bit);
            assert_eq!(flip_bit(bit, 1.0, &mut rng), 1 - bit);
        }
    }

    #[test]
    // Purpose
    // -------
    // Flip probabilities outside [0, 1] or non-finite are rejected.
    fn channel_rejects_invalid_probability() {
        for q in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                BitFlipChannel::new(q),
                Err(WaveError::InvalidFlipProbability { .. })
            ));
        }
        assert!(BitFlipChannel::new(0.5).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Applying a channel keeps the times, stays binary, and is reproducible
    // under the same seed.
    fn channel_apply_is_seeded_and_keeps_times() {
        // Arrange
        let times = Array1::linspace(0.0, 1.0, 500);
        let bits = Array1::from_elem(500, 1_u8);
        let obs = Observations::new(times, bits).expect("valid");
        let channel = BitFlipChannel::new(0.2).expect("valid q");

        // Act
        let a = channel.apply(&obs, &mut StdRng::seed_from_u64(42)).expect("apply");
        let b = channel.apply(&obs, &mut StdRng::seed_from_u64(42)).expect("apply");

        // Assert
        assert_eq!(a, b);
        assert_eq!(a.times(), obs.times());
        assert!(a.ones_fraction() < 1.0);
        assert_eq!(BitFlipChannel::noiseless().apply(&obs, &mut StdRng::seed_from_u64(0)).unwrap(), obs);
    }
}
