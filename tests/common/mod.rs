//! Deterministic collaborators shared by the integration tests

#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;
use travelguide::{
    AttractionsProvider, Coordinates, Coordinator, CurrentWeather, Geocoder, WeatherProvider,
};

/// Geocoder that knows a fixed set of places and counts lookups
pub struct StaticGeocoder {
    places: HashMap<&'static str, Coordinates>,
    pub lookups: AtomicUsize,
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        let places = [
            ("Paris", Coordinates::new(48.8566, 2.3522, "Paris, Île-de-France, France")),
            ("Bangalore", Coordinates::new(12.9716, 77.5946, "Bengaluru, Karnataka, India")),
            ("New York", Coordinates::new(40.7128, -74.006, "New York, United States")),
            ("Reykjavik", Coordinates::new(64.1466, -21.9426, "Reykjavík, Iceland")),
        ]
        .into_iter()
        .collect();

        Self {
            places,
            lookups: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.places.get(place_name).cloned())
    }
}

/// Holds every lookup until `parties` lookups are in flight at once
pub struct BarrierGeocoder {
    inner: StaticGeocoder,
    barrier: Barrier,
}

impl BarrierGeocoder {
    pub fn new(parties: usize) -> Self {
        Self {
            inner: StaticGeocoder::default(),
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl Geocoder for BarrierGeocoder {
    async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>> {
        self.barrier.wait().await;
        self.inner.resolve(place_name).await
    }
}

pub struct UnreachableGeocoder;

#[async_trait]
impl Geocoder for UnreachableGeocoder {
    async fn resolve(&self, _place_name: &str) -> Result<Option<Coordinates>> {
        bail!("error sending request for url (https://nominatim.openstreetmap.org/search)")
    }
}

/// Same conditions everywhere
pub struct FixedWeather {
    pub temperature: f64,
    pub precipitation_probability: u8,
    pub calls: AtomicUsize,
}

impl FixedWeather {
    pub fn new(temperature: f64, precipitation_probability: u8) -> Self {
        Self {
            temperature,
            precipitation_probability,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current(&self, _lat: f64, _lon: f64) -> Result<CurrentWeather> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CurrentWeather {
            temperature: self.temperature,
            unit: "°C".to_string(),
            precipitation_probability: self.precipitation_probability,
            observed_at: None,
        })
    }
}

pub struct PanickingWeather;

#[async_trait]
impl WeatherProvider for PanickingWeather {
    async fn current(&self, _lat: f64, _lon: f64) -> Result<CurrentWeather> {
        panic!("weather provider crashed");
    }
}

/// Same attractions everywhere
pub struct FixedAttractions {
    pub names: Vec<&'static str>,
    pub calls: AtomicUsize,
}

impl FixedAttractions {
    pub fn new(names: Vec<&'static str>) -> Self {
        Self {
            names,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AttractionsProvider for FixedAttractions {
    async fn nearby(&self, _lat: f64, _lon: f64, limit: usize) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.iter().take(limit).map(|n| n.to_string()).collect()
    }
}

pub fn paris_attractions() -> Vec<&'static str> {
    vec![
        "Eiffel Tower",
        "Louvre Museum",
        "Musée d'Orsay",
        "Sacré-Cœur",
        "Arc de Triomphe",
        "Jardin du Luxembourg",
    ]
}

/// Coordinator over the default fakes: 24°C, 35% rain, the Paris attractions
pub fn coordinator() -> Coordinator {
    Coordinator::new(
        Arc::new(StaticGeocoder::default()),
        Arc::new(FixedWeather::new(24.0, 35)),
        Arc::new(FixedAttractions::new(paris_attractions())),
    )
}
