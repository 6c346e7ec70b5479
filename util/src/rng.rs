use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use glam::{ivec2, IVec2};
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Construct a throwaway random number generator seeded by a noise value.
///
/// Good for short-term use in immutable contexts given a varying source of
/// noise like map position coordinates.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

/// Seed strings that are normalized to be case, whitespace and punctuation
/// insensitive, so that an added space in a typed-in seed gives the same
/// world.
///
/// ```
/// # use util::{Logos, srng};
/// use rand::prelude::*;
///
/// assert_eq!(
///   srng(&Logos::new("pAss Word")).gen_range(0..1000),
///   srng(&Logos::new("password")).gen_range(0..1000));
/// ```
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Logos(String);

impl Logos {
    const MAX_LEN: usize = 64;

    pub fn new(s: impl AsRef<str>) -> Self {
        Logos(
            s.as_ref()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_uppercase())
                .take(Self::MAX_LEN)
                .collect(),
        )
    }

    /// Generate a random logos of `len` characters.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Logos {
        const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRTUVWXYZ";
        Logos(
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect(),
        )
    }

    /// Turn the logos into a seeded game RNG.
    pub fn rng(&self) -> XorShiftRng {
        srng(self)
    }
}

impl fmt::Display for Logos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Logos {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Logos::new(s))
    }
}

pub trait RngExt {
    /// Uniformly random step in `{-1, 0, 1}²`, zero vector included.
    fn step_or_stay(&mut self) -> IVec2;
}

impl<T: Rng + ?Sized> RngExt for T {
    fn step_or_stay(&mut self) -> IVec2 {
        ivec2(self.gen_range(-1..=1), self.gen_range(-1..=1))
    }
}
