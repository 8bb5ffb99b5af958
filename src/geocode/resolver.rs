use super::{GeocodeResponse, ReverseGeocoder};
use crate::state::{Coordinate, PlaceLabel, SharedState};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Pick the label for a successful lookup: suburb, then city, then the site sentinel
pub fn label_from_response(response: &GeocodeResponse) -> PlaceLabel {
    let address = match &response.address {
        Some(address) => address,
        None => return PlaceLabel::Site,
    };

    [&address.suburb, &address.city]
        .into_iter()
        .flatten()
        .map(|name| name.trim())
        .find(|name| !name.is_empty())
        .map(PlaceLabel::named)
        .unwrap_or(PlaceLabel::Site)
}

/// Turns coordinates into place labels. Every failure becomes `PlaceLabel::Offline`.
#[derive(Clone)]
pub struct PlaceResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    timeout: Duration,
}

impl PlaceResolver {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>, timeout: Duration) -> Self {
        Self { geocoder, timeout }
    }

    /// One lookup attempt, bounded by the resolver timeout
    pub async fn resolve(&self, coordinate: Coordinate) -> PlaceLabel {
        match tokio::time::timeout(self.timeout, self.geocoder.reverse(coordinate)).await {
            Ok(Ok(response)) => {
                let label = label_from_response(&response);
                debug!("Resolved {} to {}", coordinate.display(), label);
                label
            }
            Ok(Err(e)) => {
                warn!("Place lookup failed for {}: {}", coordinate.display(), e);
                PlaceLabel::Offline
            }
            Err(_) => {
                warn!(
                    "Place lookup for {} exceeded {:?}",
                    coordinate.display(),
                    self.timeout
                );
                PlaceLabel::Offline
            }
        }
    }

    /// Resolve and publish into the shared state
    pub async fn resolve_into(&self, coordinate: Coordinate, state: &SharedState) {
        let label = self.resolve(coordinate).await;
        state.set_place_label(label);
    }
}
