// In-process HotelStore
// Used for local runs and tests; supports injected failures and latency like a flaky backend

use crate::models::{Booking, Hotel, NewBooking, Room, RoomWithHotel};
use crate::store::{HotelStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

#[derive(Default)]
pub struct InMemoryStore {
    hotels: RwLock<Vec<Hotel>>,
    rooms: RwLock<Vec<Room>>,
    bookings: DashMap<String, Booking>,
    fail_next_requests: AtomicUsize,
    insert_count: AtomicUsize,
    delay_ms: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(hotels: Vec<Hotel>, rooms: Vec<Room>) -> Self {
        let store = Self::new();
        *store.hotels.write() = hotels;
        *store.rooms.write() = rooms;
        store
    }

    pub fn add_hotel(&self, hotel: Hotel) {
        self.hotels.write().push(hotel);
    }

    pub fn add_room(&self, room: Room) {
        self.rooms.write().push(room);
    }

    // The next `count` requests of any kind fail with a network error
    pub fn fail_next_requests(&self, count: usize) {
        self.fail_next_requests.store(count, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn booking(&self, booking_id: &str) -> Option<Booking> {
        self.bookings.get(booking_id).map(|entry| entry.value().clone())
    }

    // Insert attempts that reached the store, failed or not
    pub fn insert_count(&self) -> usize {
        self.insert_count.load(Ordering::SeqCst)
    }

    async fn simulate_request(&self) -> Result<(), StoreError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let failed = self
            .fail_next_requests
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(StoreError::Network("Service unavailable".to_string()));
        }
        Ok(())
    }

    fn generate_booking_id(&self) -> String {
        loop {
            let id = format!("booking-{:08x}", rand::random::<u32>());
            if !self.bookings.contains_key(&id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl HotelStore for InMemoryStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        self.simulate_request().await?;

        let mut hotels = self.hotels.read().clone();
        hotels.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(CmpOrdering::Equal));
        Ok(hotels)
    }

    async fn get_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>, StoreError> {
        self.simulate_request().await?;

        Ok(self.hotels.read().iter().find(|h| h.id == hotel_id).cloned())
    }

    async fn list_rooms(&self, hotel_id: &str) -> Result<Vec<Room>, StoreError> {
        self.simulate_request().await?;

        Ok(self
            .rooms
            .read()
            .iter()
            .filter(|r| r.hotel_id == hotel_id && r.available)
            .cloned()
            .collect())
    }

    async fn get_room_with_hotel(
        &self,
        room_id: &str,
    ) -> Result<Option<RoomWithHotel>, StoreError> {
        self.simulate_request().await?;

        let room = match self.rooms.read().iter().find(|r| r.id == room_id) {
            Some(room) => room.clone(),
            None => return Ok(None),
        };
        let hotel = self
            .hotels
            .read()
            .iter()
            .find(|h| h.id == room.hotel_id)
            .cloned();

        Ok(hotel.map(|hotel| RoomWithHotel { room, hotel }))
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        self.insert_count.fetch_add(1, Ordering::SeqCst);
        self.simulate_request().await?;

        let id = self.generate_booking_id();
        let booking = Booking::from_new(id.clone(), booking);
        self.bookings.insert(id, booking.clone());
        debug!(booking_id = %booking.id, room_id = %booking.room_id, "booking stored");
        Ok(booking)
    }
}
