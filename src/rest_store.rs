// HotelStore backed by the managed backend's REST interface (PostgREST conventions)

use crate::models::{Booking, Hotel, NewBooking, Room, RoomWithHotel};
use crate::store::{HotelStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{header, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::env;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const ENV_STORE_URL: &str = "HOTEL_STORE_URL";
pub const ENV_STORE_KEY: &str = "HOTEL_STORE_KEY";
pub const ENV_STORE_TIMEOUT_MS: &str = "HOTEL_STORE_TIMEOUT_MS";

const REST_PATH: &str = "rest/v1";

// Connection settings for the store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: String,
    // No timeout unless the operator asks for one
    pub timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            timeout_ms: None,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Build the config from any key lookup (environment, secrets file, test map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup(ENV_STORE_URL).unwrap_or_else(|| {
            info!("{ENV_STORE_URL} not set, using default: {}", defaults.base_url);
            defaults.base_url.clone()
        });

        let api_key = lookup(ENV_STORE_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                warn!("{ENV_STORE_KEY} not set");
                StoreError::Config(format!("{ENV_STORE_KEY} is required"))
            })?;

        let timeout_ms = match lookup(ENV_STORE_TIMEOUT_MS) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                warn!("Invalid {ENV_STORE_TIMEOUT_MS} value: {e}");
                StoreError::Config(format!("{ENV_STORE_TIMEOUT_MS}: {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout_ms,
        })
    }
}

// Request statistics for the REST store
#[derive(Debug, Default, Clone)]
pub struct StoreStats {
    pub requests_sent: usize,
    pub requests_succeeded: usize,
    pub requests_failed: usize,
    pub average_response_time_ms: f64,
    pub max_response_time_ms: f64,
}

impl StoreStats {
    fn record(&mut self, elapsed: Duration, succeeded: bool) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

        self.requests_sent += 1;
        if succeeded {
            self.requests_succeeded += 1;
        } else {
            self.requests_failed += 1;
        }

        let n = self.requests_sent as f64;
        self.average_response_time_ms += (elapsed_ms - self.average_response_time_ms) / n;
        self.max_response_time_ms = self.max_response_time_ms.max(elapsed_ms);
    }
}

pub struct RestStore {
    client: reqwest::Client,
    config: StoreConfig,
    stats: Mutex<StoreStats>,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        if config.base_url.trim().is_empty() {
            return Err(StoreError::Config("base_url is empty".to_string()));
        }
        if config.api_key.trim().is_empty() {
            return Err(StoreError::Config("api_key is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self {
            client,
            config,
            stats: Mutex::new(StoreStats::default()),
        })
    }

    pub fn stats(&self) -> StoreStats {
        self.stats.lock().clone()
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            REST_PATH,
            table
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    fn select(&self, table: &str, query: &[(&str, String)]) -> RequestBuilder {
        self.authorize(self.client.get(self.table_url(table)).query(query))
    }

    fn list_hotels_request(&self) -> RequestBuilder {
        self.select(
            "hotels",
            &[
                ("select", "*".to_string()),
                ("order", "rating.desc".to_string()),
            ],
        )
    }

    fn get_hotel_request(&self, hotel_id: &str) -> RequestBuilder {
        self.select(
            "hotels",
            &[
                ("select", "*".to_string()),
                ("id", format!("eq.{hotel_id}")),
            ],
        )
    }

    fn list_rooms_request(&self, hotel_id: &str) -> RequestBuilder {
        self.select(
            "rooms",
            &[
                ("select", "*".to_string()),
                ("hotel_id", format!("eq.{hotel_id}")),
                ("available", "eq.true".to_string()),
            ],
        )
    }

    fn get_room_with_hotel_request(&self, room_id: &str) -> RequestBuilder {
        self.select(
            "rooms",
            &[
                ("select", "*,hotels(*)".to_string()),
                ("id", format!("eq.{room_id}")),
            ],
        )
    }

    fn insert_booking_request(&self, booking: &NewBooking) -> RequestBuilder {
        self.authorize(self.client.post(self.table_url("bookings")))
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, "application/json")
            .json(booking)
    }

    // Send one request and decode the JSON body. No retries.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, StoreError> {
        let started = Instant::now();
        let result = self.execute(request).await;
        let elapsed = started.elapsed();
        self.stats.lock().record(elapsed, result.is_ok());

        match &result {
            Ok(_) => debug!(
                operation,
                elapsed_ms = elapsed.as_millis() as u64,
                "store request succeeded"
            ),
            Err(e) => warn!(operation, error = %e, "store request failed"),
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(response.url().path().to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl HotelStore for RestStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        self.send("list_hotels", self.list_hotels_request()).await
    }

    async fn get_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>, StoreError> {
        let rows: Vec<Hotel> = self
            .send("get_hotel", self.get_hotel_request(hotel_id))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_rooms(&self, hotel_id: &str) -> Result<Vec<Room>, StoreError> {
        self.send("list_rooms", self.list_rooms_request(hotel_id)).await
    }

    async fn get_room_with_hotel(
        &self,
        room_id: &str,
    ) -> Result<Option<RoomWithHotel>, StoreError> {
        let rows: Vec<RoomWithHotel> = self
            .send(
                "get_room_with_hotel",
                self.get_room_with_hotel_request(room_id),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let rows: Vec<Booking> = self
            .send("insert_booking", self.insert_booking_request(&booking))
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }
}
