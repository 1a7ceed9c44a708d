//! Mock place generation.
//!
//! Places are scattered uniformly inside a square of `max_offset_degrees` on
//! each side of the origin. The square is measured in plain degrees, so its
//! east-west extent in kilometers shrinks toward the poles.

use crate::catalog::CATALOG;
use crate::error::Result;
use crate::model::Place;
use nearby_core::config::GeneratorConfig;
use nearby_geo::{haversine_distance, BoundingBox, Coordinate};
use rand::Rng;

/// Produces a random set of catalog places around an origin.
///
/// The generator holds no randomness of its own; every call takes the RNG
/// to draw from, so a seeded RNG reproduces the same places.
#[derive(Debug, Clone, Default)]
pub struct PlaceGenerator {
    config: GeneratorConfig,
}

impl PlaceGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings in use
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Farthest a generated place can land from `origin`, in kilometers.
    pub fn max_distance_km(&self, origin: Coordinate) -> Result<f64> {
        let bbox = BoundingBox::around(origin, self.config.max_offset_degrees)?;
        Ok(bbox.half_diagonal_km())
    }

    /// Generates between `min_places` and `max_places` places around `origin`.
    ///
    /// Per place, draws a latitude offset, a longitude offset and a catalog
    /// index, in that order. Ids run `place_0`, `place_1`, ... and restart
    /// on every call. Output is in generation order.
    ///
    /// # Example
    /// ```
    /// use nearby_geo::Coordinate;
    /// use nearby_places::PlaceGenerator;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let places = PlaceGenerator::default().generate(Coordinate::new(48.8566, 2.3522), &mut rng);
    /// assert_eq!(places[0].id, "place_0");
    /// ```
    pub fn generate<R: Rng + ?Sized>(&self, origin: Coordinate, rng: &mut R) -> Vec<Place> {
        let count = rng.gen_range(self.config.min_places..=self.config.max_places);
        let half = self.config.max_offset_degrees;

        (0..count)
            .map(|i| {
                let d_lat = rng.gen_range(-half..half);
                let d_lon = rng.gen_range(-half..half);
                let position = origin.offset(d_lat, d_lon);

                let entry = CATALOG[rng.gen_range(0..CATALOG.len())];

                Place {
                    id: format!("place_{i}"),
                    name: entry.name.to_string(),
                    latitude: position.latitude,
                    longitude: position.longitude,
                    distance: haversine_distance(&origin, &position),
                    category: entry.category,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::is_catalog_pair;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const SAN_FRANCISCO: Coordinate = Coordinate::new(37.7749, -122.4194);

    fn assert_invariants(origin: Coordinate, places: &[Place]) {
        assert!((10..=15).contains(&places.len()), "count {}", places.len());

        let ids: HashSet<_> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), places.len(), "duplicate ids");

        let bbox = BoundingBox::around(origin, 0.01).unwrap();
        for place in places {
            let expected = haversine_distance(&origin, &place.coordinate());
            assert!((place.distance - expected).abs() < 1e-9);
            assert!(is_catalog_pair(&place.name, place.category), "{place:?}");
            assert!(bbox.contains(&place.coordinate()), "{place:?} outside box");
        }
    }

    #[test]
    fn test_san_francisco_scenario() {
        let generator = PlaceGenerator::default();
        let mut rng = StdRng::seed_from_u64(2024);

        let places = generator.generate(SAN_FRANCISCO, &mut rng);
        assert_invariants(SAN_FRANCISCO, &places);

        for place in &places {
            assert!((37.7649..=37.7849).contains(&place.latitude));
            assert!((-122.4294..=-122.4094).contains(&place.longitude));
            assert!(place.distance <= 1.6, "distance {}", place.distance);
        }
    }

    #[test]
    fn test_places_stay_within_max_distance() {
        let generator = PlaceGenerator::default();
        let radius = generator.max_distance_km(SAN_FRANCISCO).unwrap();
        assert!(radius > 1.3 && radius < 1.6, "radius {radius}");

        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..50 {
            let places = generator.generate(SAN_FRANCISCO, &mut rng);
            assert!(places.iter().all(|p| p.distance <= radius + 1e-9));
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(1);
        let places = PlaceGenerator::default().generate(SAN_FRANCISCO, &mut rng);
        for (i, place) in places.iter().enumerate() {
            assert_eq!(place.id, format!("place_{i}"));
        }
    }

    #[test]
    fn test_full_count_range_is_reached() {
        let generator = PlaceGenerator::default();
        let mut rng = StdRng::seed_from_u64(99);
        let counts: HashSet<usize> = (0..500)
            .map(|_| generator.generate(SAN_FRANCISCO, &mut rng).len())
            .collect();
        let expected: HashSet<usize> = (10..=15).collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_same_seed_same_places() {
        let generator = PlaceGenerator::default();
        let first = generator.generate(SAN_FRANCISCO, &mut StdRng::seed_from_u64(5));
        let second = generator.generate(SAN_FRANCISCO, &mut StdRng::seed_from_u64(5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_calls_each_valid() {
        let generator = PlaceGenerator::default();
        let mut rng = StdRng::seed_from_u64(3);
        let first = generator.generate(SAN_FRANCISCO, &mut rng);
        let second = generator.generate(SAN_FRANCISCO, &mut rng);
        assert_invariants(SAN_FRANCISCO, &first);
        assert_invariants(SAN_FRANCISCO, &second);
        // ids restart per call
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn test_custom_config() {
        let config = GeneratorConfig {
            min_places: 3,
            max_places: 3,
            max_offset_degrees: 0.001,
            seed: None,
        };
        let generator = PlaceGenerator::new(config).unwrap();
        let places = generator.generate(SAN_FRANCISCO, &mut StdRng::seed_from_u64(8));
        assert_eq!(places.len(), 3);
        let bbox = BoundingBox::around(SAN_FRANCISCO, 0.001).unwrap();
        assert!(places.iter().all(|p| bbox.contains(&p.coordinate())));
    }

    #[test]
    fn test_offsets_span_both_sides_of_origin() {
        let generator = PlaceGenerator::default();
        let mut rng = StdRng::seed_from_u64(17);
        let places: Vec<Place> = (0..20)
            .flat_map(|_| generator.generate(SAN_FRANCISCO, &mut rng))
            .collect();

        let d_lats: Vec<f64> = places.iter().map(|p| p.latitude - SAN_FRANCISCO.latitude).collect();
        let d_lons: Vec<f64> = places.iter().map(|p| p.longitude - SAN_FRANCISCO.longitude).collect();

        assert!(d_lats.iter().all(|d| (-0.01..0.01 + 1e-12).contains(d)));
        assert!(d_lons.iter().all(|d| (-0.01..0.01 + 1e-12).contains(d)));
        assert!(d_lats.iter().any(|d| *d < 0.0) && d_lats.iter().any(|d| *d > 0.0));
        assert!(d_lons.iter().any(|d| *d < 0.0) && d_lons.iter().any(|d| *d > 0.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            min_places: 9,
            max_places: 2,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            PlaceGenerator::new(config),
            Err(crate::PlacesError::InvalidConfig(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_any_valid_origin(
            lat in -89.0f64..=89.0,
            lon in -179.0f64..=179.0,
            seed in any::<u64>(),
        ) {
            let origin = Coordinate::new(lat, lon);
            let mut rng = StdRng::seed_from_u64(seed);
            let places = PlaceGenerator::default().generate(origin, &mut rng);

            prop_assert!((10..=15).contains(&places.len()));
            let ids: HashSet<_> = places.iter().map(|p| p.id.clone()).collect();
            prop_assert_eq!(ids.len(), places.len());

            for place in &places {
                let expected = haversine_distance(&origin, &place.coordinate());
                prop_assert!((place.distance - expected).abs() < 1e-9);
                prop_assert!(is_catalog_pair(&place.name, place.category));
                prop_assert!((place.latitude - lat).abs() <= 0.01);
                prop_assert!((place.longitude - lon).abs() <= 0.01);
            }
        }
    }
}
