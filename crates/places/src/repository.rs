//! Place sources.

use crate::error::Result;
use crate::generator::PlaceGenerator;
use crate::model::Place;
use nearby_core::config::GeneratorConfig;
use nearby_geo::Coordinate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// A source of places around a coordinate.
///
/// Implementations may block; callers that must stay responsive run them on
/// a blocking worker.
pub trait PlacesRepository: Send + Sync {
    /// Returns places near `origin`.
    fn fetch_nearby(&self, origin: Coordinate) -> Result<Vec<Place>>;
}

/// Repository backed by [`PlaceGenerator`] instead of a places search API.
#[derive(Debug, Clone, Default)]
pub struct MockPlacesRepository {
    generator: PlaceGenerator,
    seed: Option<u64>,
}

impl MockPlacesRepository {
    /// Repository with default generator settings and fresh entropy per call
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every lookup replays the same RNG stream
    pub fn with_seed(seed: u64) -> Self {
        Self {
            generator: PlaceGenerator::default(),
            seed: Some(seed),
        }
    }

    /// Builds a repository from configuration, honoring `seed` if set.
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let seed = config.seed;
        Ok(Self {
            generator: PlaceGenerator::new(config)?,
            seed,
        })
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl PlacesRepository for MockPlacesRepository {
    fn fetch_nearby(&self, origin: Coordinate) -> Result<Vec<Place>> {
        origin.validate()?;
        let radius_km = self.generator.max_distance_km(origin)?;

        // Each call owns its RNG, so concurrent lookups share nothing.
        let mut rng = self.rng();
        let places = self.generator.generate(origin, &mut rng);

        debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            count = places.len(),
            radius_km,
            seeded = self.seed.is_some(),
            "Generated mock places"
        );

        Ok(places)
    }
}
