// Data access for the managed hotel store
// Views talk to the store only through this trait so the backend can be swapped for tests

use crate::models::{Booking, Hotel, NewBooking, Room, RoomWithHotel};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Store error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::Api {
                status_code: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

#[async_trait]
pub trait HotelStore: Send + Sync + 'static {
    // All hotels, highest rating first
    async fn list_hotels(&self) -> Result<Vec<Hotel>, StoreError>;

    // One hotel by id, None if the store has no such row
    async fn get_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>, StoreError>;

    // Rooms of a hotel that are flagged available
    async fn list_rooms(&self, hotel_id: &str) -> Result<Vec<Room>, StoreError>;

    // Room by id with its hotel embedded, None if the room is absent
    async fn get_room_with_hotel(&self, room_id: &str) -> Result<Option<RoomWithHotel>, StoreError>;

    // Insert a booking and return it with the id the store generated
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError>;
}
