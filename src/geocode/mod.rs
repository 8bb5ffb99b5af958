mod nominatim;
mod resolver;
#[cfg(test)]
mod tests;

pub use nominatim::NominatimClient;
pub use resolver::{label_from_response, PlaceResolver};

use crate::error::GeocodeError;
use crate::state::Coordinate;
use async_trait::async_trait;
use serde::Deserialize;

/// Reverse geocoding reply; only the address parts the label needs
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub address: Option<GeocodeAddress>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GeocodeAddress {
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// A network service turning coordinates into an address
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, coordinate: Coordinate) -> Result<GeocodeResponse, GeocodeError>;
}
