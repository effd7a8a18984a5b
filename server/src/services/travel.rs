//! Booking.com RapidAPI client — destination and hotel lookups.
//!
//! DESIGN
//! ======
//! Two-step search: resolve the free-text destination to a `dest_id`, then
//! query hotels for that id. Upstream photo payloads are inconsistent
//! (`photos` array vs a single `max_photo_url`), so results are normalized
//! into a uniform photo list before they reach API clients.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_HOST: &str = "booking-com15.p.rapidapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// Upstream requires a stay window; these mirror the values the web app sent.
const DEFAULT_CHECKIN: &str = "2024-09-27";
const DEFAULT_CHECKOUT: &str = "2024-09-28";

#[derive(Debug, thiserror::Error)]
pub enum TravelError {
    #[error("travel API request failed: {0}")]
    Request(String),
    #[error("travel API error: status {status}")]
    Upstream { status: u16, body: String },
    #[error("travel API response parse failed: {0}")]
    Parse(String),
    #[error("no destinations found for \"{0}\"")]
    NoDestination(String),
    #[error("no hotels found for this destination")]
    NoHotels,
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DestinationHit {
    pub dest_id: String,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub url_max: Option<String>,
    #[serde(default)]
    pub url_1440: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHotel {
    #[serde(default)]
    pub hotel_id: Option<i64>,
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub review_score: Option<f64>,
    #[serde(default)]
    pub min_total_price: Option<f64>,
    #[serde(default)]
    pub max_photo_url: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<RawPhoto>>,
}

/// Photo with both size variants always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelPhoto {
    pub url_max: String,
    pub url_1440: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hotel {
    pub hotel_id: Option<i64>,
    pub hotel_name: Option<String>,
    pub review_score: Option<f64>,
    pub min_total_price: Option<f64>,
    pub photos: Vec<HotelPhoto>,
}

#[derive(Debug, Serialize)]
pub struct HotelSearchResult {
    pub destination: DestinationHit,
    pub hotels: Vec<Hotel>,
}

/// Optional stay parameters for a hotel search.
#[derive(Debug, Default, Deserialize)]
pub struct StayParams {
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub adults: Option<u32>,
    pub room_qty: Option<u32>,
    pub currency_code: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct TravelApi {
    http: reqwest::Client,
    api_key: String,
    api_host: String,
}

impl TravelApi {
    /// Build a client against the given RapidAPI host.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: String, api_host: String) -> Result<Self, TravelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TravelError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, api_host })
    }

    /// Load from `RAPIDAPI_KEY` and `RAPIDAPI_HOST`.
    /// Returns `None` if the key is missing (hotel lookups will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("RAPIDAPI_KEY").ok()?;
        let api_host = std::env::var("RAPIDAPI_HOST").unwrap_or_else(|_| DEFAULT_API_HOST.to_owned());
        Self::new(api_key, api_host).ok()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TravelError> {
        let url = format!("https://{}/api/v1/hotels/{path}", self.api_host);
        let response = self
            .http
            .get(url)
            .query(query)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await
            .map_err(|e| TravelError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TravelError::Request(e.to_string()))?;
        if status != 200 {
            return Err(TravelError::Upstream { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| TravelError::Parse(e.to_string()))
    }

    /// Resolve a free-text destination to candidate hits.
    pub async fn search_destination(&self, query: &str) -> Result<Vec<DestinationHit>, TravelError> {
        let envelope: Envelope<DestinationHit> =
            self.get_json("searchDestination", &[("query", query)]).await?;
        Ok(envelope.data)
    }

    /// Search hotels for a resolved destination id.
    pub async fn search_hotels(
        &self,
        dest_id: &str,
        stay: &StayParams,
    ) -> Result<Vec<Hotel>, TravelError> {
        let adults = stay.adults.unwrap_or(2).to_string();
        let room_qty = stay.room_qty.unwrap_or(1).to_string();
        let query = [
            ("destination_id", dest_id),
            ("checkin", stay.checkin.as_deref().unwrap_or(DEFAULT_CHECKIN)),
            ("checkout", stay.checkout.as_deref().unwrap_or(DEFAULT_CHECKOUT)),
            ("adults", adults.as_str()),
            ("room_qty", room_qty.as_str()),
            ("currency_code", stay.currency_code.as_deref().unwrap_or("USD")),
        ];
        let envelope: Envelope<RawHotel> = self.get_json("search", &query).await?;
        Ok(envelope.data.into_iter().map(normalize_hotel).collect())
    }

    /// Two-step lookup: destination text to dest_id, then hotels.
    pub async fn find_hotels(
        &self,
        destination: &str,
        stay: &StayParams,
    ) -> Result<HotelSearchResult, TravelError> {
        let hits = self.search_destination(destination).await?;
        let Some(hit) = hits.into_iter().next() else {
            return Err(TravelError::NoDestination(destination.to_owned()));
        };

        let hotels = self.search_hotels(&hit.dest_id, stay).await?;
        if hotels.is_empty() {
            return Err(TravelError::NoHotels);
        }

        Ok(HotelSearchResult { destination: hit, hotels })
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

fn normalize_hotel(raw: RawHotel) -> Hotel {
    let photos = normalize_photos(raw.photos.as_deref(), raw.max_photo_url.as_deref());
    Hotel {
        hotel_id: raw.hotel_id,
        hotel_name: raw.hotel_name,
        review_score: raw.review_score,
        min_total_price: raw.min_total_price,
        photos,
    }
}

/// Fill both photo size slots from whichever URLs the upstream provided.
pub(crate) fn normalize_photos(photos: Option<&[RawPhoto]>, max_photo_url: Option<&str>) -> Vec<HotelPhoto> {
    if let Some(photos) = photos {
        if !photos.is_empty() {
            return photos
                .iter()
                .map(|p| {
                    let fallback = p.url.as_deref().unwrap_or_default();
                    HotelPhoto {
                        url_max: p.url_max.clone().unwrap_or_else(|| fallback.to_owned()),
                        url_1440: p.url_1440.clone().unwrap_or_else(|| fallback.to_owned()),
                    }
                })
                .collect();
        }
    }

    match max_photo_url {
        Some(url) => vec![HotelPhoto { url_max: url.to_owned(), url_1440: url.to_owned() }],
        None => Vec::new(),
    }
}

#[cfg(test)]
#[path = "travel_test.rs"]
mod tests;
