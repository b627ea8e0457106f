// Hotel search and booking client library

// Records and data access
pub mod memory_store;
pub mod models;
pub mod rest_store;
pub mod store;

// Application logic
pub mod booking;
pub mod pricing;
pub mod routes;
pub mod search;
pub mod views;

// Re-export key types for convenience
pub use booking::{
    submit_booking, BookingError, BookingForm, BookingSummary, BookingView, Confirmation, Notice,
    NoticeVariant, SubmissionPhase,
};
pub use memory_store::InMemoryStore;
pub use models::{Booking, BookingStatus, Hotel, NewBooking, Room, RoomWithHotel};
pub use pricing::{calculate_total, nights, quote, Quote};
pub use rest_store::{RestStore, StoreConfig, StoreStats};
pub use routes::{HotelId, Route, RouteError, RoomId};
pub use search::{filter_by_city, listing_heading, CityQuery};
pub use store::{HotelStore, StoreError};
pub use views::{HotelCard, HotelDetail, HotelDetailView, HotelListView, Listing, RoomCard, ViewState};
