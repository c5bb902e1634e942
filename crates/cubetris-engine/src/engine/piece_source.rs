use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Catalog, ShapeKind};

/// Seed for deterministic piece selection.
///
/// A 128-bit seed for the piece generator. Games created with the same seed
/// and variant draw the same sequence of shapes. Seeds are written as 32
/// hexadecimal characters, both in JSON and on the command line.
///
/// # Example
///
/// ```
/// use cubetris_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    Length(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    Digits(#[error(not(source))] String),
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length(s.len()));
        }
        // `from_str_radix` tolerates a leading sign, so check the digits first.
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseSeedError::Digits(s.to_owned()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::Digits(s.to_owned()))?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Draws shapes uniformly at random from a catalog.
///
/// # Example
///
/// ```
/// use cubetris_engine::{Catalog, PieceSeed, PieceSource};
///
/// let seed = PieceSeed::from_u128(42);
/// let mut a = PieceSource::with_seed(Catalog::Classic, seed);
/// let mut b = PieceSource::with_seed(Catalog::Classic, seed);
///
/// for _ in 0..10 {
///     let kind = a.next_kind();
///     assert_eq!(kind, b.next_kind());
///     assert!(Catalog::Classic.kinds().contains(&kind));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: Pcg32,
    seed: PieceSeed,
    catalog: Catalog,
}

impl PieceSource {
    /// Creates a source with a random seed.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_seed(catalog, rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(catalog: Catalog, seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            seed,
            catalog,
        }
    }

    /// The seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// Picks the next shape, every kind of the catalog being equally likely.
    pub fn next_kind(&mut self) -> ShapeKind {
        let kinds = self.catalog.kinds();
        kinds[self.rng.random_range(0..kinds.len())]
    }
}
