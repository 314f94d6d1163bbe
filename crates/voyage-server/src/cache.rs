//! Weather observation cache keyed by rounded coordinate.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use voyage_core::{Coordinate, WeatherObservation};

pub trait CacheEntry {
    fn fetched_at(&self) -> Instant;
}

/// Drop entries older than `max_age`, then the oldest until at most `max_entries` remain.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize, max_age: Duration)
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    let now = Instant::now();
    let mut live: Vec<(K, Instant)> = Vec::with_capacity(cache.len());
    cache.retain(|key, value| {
        let fetched_at = value.fetched_at();
        let fresh = now.duration_since(fetched_at) <= max_age;
        if fresh {
            live.push((key.clone(), fetched_at));
        }
        fresh
    });

    if live.len() <= max_entries {
        return;
    }
    live.sort_by_key(|(_, fetched_at)| *fetched_at);
    let excess = live.len() - max_entries;
    for (key, _) in live.into_iter().take(excess) {
        cache.remove(&key);
    }
}

/// Coordinate rounded to two decimal places (about 0.6 nm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat_centi: i64,
    lon_centi: i64,
}

impl From<Coordinate> for CacheKey {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            lat_centi: (coordinate.lat * 100.0).round() as i64,
            lon_centi: (coordinate.lon * 100.0).round() as i64,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedObservation {
    fetched_at: Instant,
    observation: WeatherObservation,
}

impl CacheEntry for CachedObservation {
    fn fetched_at(&self) -> Instant {
        self.fetched_at
    }
}

pub struct WeatherCache {
    entries: DashMap<CacheKey, CachedObservation>,
    ttl: Duration,
    max_entries: usize,
}

impl WeatherCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Fresh observation for the coordinate's cell, if any.
    pub fn get(&self, coordinate: Coordinate) -> Option<WeatherObservation> {
        let key = CacheKey::from(coordinate);
        let entry = self.entries.get(&key)?;
        if entry.fetched_at.elapsed() <= self.ttl {
            return Some(entry.observation.clone());
        }
        drop(entry);
        self.entries.remove(&key);
        None
    }

    pub fn insert(&self, coordinate: Coordinate, observation: WeatherObservation) {
        self.entries.insert(
            CacheKey::from(coordinate),
            CachedObservation {
                fetched_at: Instant::now(),
                observation,
            },
        );
        if self.entries.len() > self.max_entries {
            prune_cache(&self.entries, self.max_entries, self.ttl);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn observation(lat: f64, lon: f64) -> WeatherObservation {
        WeatherObservation::default_conditions(Coordinate { lat, lon }, Utc::now())
    }

    #[test]
    fn nearby_points_share_a_cell() {
        let cache = WeatherCache::new(Duration::from_secs(600), 16);
        cache.insert(Coordinate { lat: 51.9244, lon: 4.4777 }, observation(51.9244, 4.4777));

        assert!(cache.get(Coordinate { lat: 51.921, lon: 4.481 }).is_some());
        assert!(cache.get(Coordinate { lat: 51.95, lon: 4.4777 }).is_none());
    }

    #[test]
    fn expired_entries_are_not_served() {
        let cache = WeatherCache::new(Duration::ZERO, 16);
        cache.insert(Coordinate { lat: 1.0, lon: 1.0 }, observation(1.0, 1.0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(Coordinate { lat: 1.0, lon: 1.0 }).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_prunes_to_max_entries() {
        let cache = WeatherCache::new(Duration::from_secs(600), 3);
        for i in 0..5 {
            let lat = i as f64;
            cache.insert(Coordinate { lat, lon: 0.0 }, observation(lat, 0.0));
            std::thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(cache.len(), 3);
        // Oldest cells go first.
        assert!(cache.get(Coordinate { lat: 0.0, lon: 0.0 }).is_none());
        assert!(cache.get(Coordinate { lat: 4.0, lon: 0.0 }).is_some());
    }

    #[test]
    fn prune_drops_stale_then_oldest() {
        struct Stamp(Instant);
        impl CacheEntry for Stamp {
            fn fetched_at(&self) -> Instant {
                self.0
            }
        }

        let now = Instant::now();
        let map = DashMap::new();
        map.insert("stale", Stamp(now - Duration::from_millis(120)));
        map.insert("old", Stamp(now - Duration::from_millis(20)));
        map.insert("new", Stamp(now));

        prune_cache(&map, 1, Duration::from_millis(60));
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("new"));
    }
}
