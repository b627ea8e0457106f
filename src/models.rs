// Records held by the hotel store: hotels, their rooms and the bookings made against them
use serde::{Deserialize, Serialize};
use std::fmt;

// Hotel row as returned by the store
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub image_url: String,
    pub rating: f64,
}

impl Hotel {
    // "city, country" line shown under the hotel name
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    // Full address line used on the detail page
    pub fn full_address(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub room_type: String,
    #[serde(default)]
    pub description: String,
    pub price_per_night: f64,
    pub capacity: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    pub available: bool,
}

// Room row with its owning hotel embedded, the shape of `select=*,hotels(*)`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomWithHotel {
    #[serde(flatten)]
    pub room: Room,
    #[serde(rename = "hotels")]
    pub hotel: Hotel,
}

impl RoomWithHotel {
    pub fn into_parts(self) -> (Room, Hotel) {
        (self.room, self.hotel)
    }
}

// Booking status label. Only `Confirmed` is ever written by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Confirmed,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Other(label) => label,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(label: String) -> Self {
        if label == "confirmed" {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Other(label)
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Insert payload for the bookings collection; the store assigns the id
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewBooking {
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: String,
    pub check_out: String,
    pub total_price: f64,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: String,
    pub check_out: String,
    pub total_price: f64,
    pub status: BookingStatus,
}

impl Booking {
    // Attach a store-generated id to an insert payload
    pub fn from_new(id: String, new_booking: NewBooking) -> Self {
        Self {
            id,
            room_id: new_booking.room_id,
            guest_name: new_booking.guest_name,
            guest_email: new_booking.guest_email,
            guest_phone: new_booking.guest_phone,
            check_in: new_booking.check_in,
            check_out: new_booking.check_out,
            total_price: new_booking.total_price,
            status: new_booking.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM_WITH_HOTEL_JSON: &str = r#"{
        "id": "room-1",
        "hotel_id": "hotel-1",
        "room_type": "Deluxe King",
        "description": "Spacious room with king bed",
        "price_per_night": 180.0,
        "capacity": 2,
        "amenities": ["WiFi", "Mini Bar"],
        "image_url": "https://img.example.com/room-1.jpg",
        "available": true,
        "created_at": "2024-01-01T00:00:00Z",
        "hotels": {
            "id": "hotel-1",
            "name": "Grand Palace",
            "description": "Historic hotel",
            "address": "1 Rue de Rivoli",
            "city": "Paris",
            "country": "France",
            "image_url": "https://img.example.com/hotel-1.jpg",
            "rating": 4.8
        }
    }"#;

    #[test]
    fn test_room_with_embedded_hotel_decodes() {
        let record: RoomWithHotel = serde_json::from_str(ROOM_WITH_HOTEL_JSON).unwrap();
        let (room, hotel) = record.into_parts();

        assert_eq!(room.id, "room-1");
        assert_eq!(room.amenities, vec!["WiFi", "Mini Bar"]);
        assert_eq!(room.price_per_night, 180.0);
        assert_eq!(hotel.city, "Paris");
        assert_eq!(hotel.location(), "Paris, France");
        assert_eq!(hotel.full_address(), "1 Rue de Rivoli, Paris, France");
    }

    #[test]
    fn test_booking_status_labels() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");

        let status: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, BookingStatus::Other("cancelled".to_string()));
        assert_eq!(status.to_string(), "cancelled");
    }

    #[test]
    fn test_new_booking_serializes_store_columns() {
        let new_booking = NewBooking {
            room_id: "room-1".to_string(),
            guest_name: "Jane Doe".to_string(),
            guest_email: "jane@example.com".to_string(),
            guest_phone: "+1 555 000 0000".to_string(),
            check_in: "2024-03-01".to_string(),
            check_out: "2024-03-04".to_string(),
            total_price: 300.0,
            status: BookingStatus::Confirmed,
        };

        let value = serde_json::to_value(&new_booking).unwrap();
        assert_eq!(value["room_id"], "room-1");
        assert_eq!(value["total_price"], 300.0);
        assert_eq!(value["status"], "confirmed");
        assert!(value.get("id").is_none());
    }
}
