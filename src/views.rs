// View models for the listing and hotel detail pages
// Each view fetches its own data and resolves to an explicit ViewState; nothing is shared between views

use crate::models::{Hotel, Room};
use crate::routes::{HotelId, Route, RouteError, RoomId};
use crate::search::{listing_heading, CityQuery};
use crate::store::{HotelStore, StoreError};
use tracing::{debug, warn};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const LOAD_FAILED_MESSAGE: &str = "Something went wrong while loading. Please try again.";
pub const HOTEL_NOT_FOUND_MESSAGE: &str = "We couldn't find that hotel.";
pub const NO_HOTELS_MESSAGE: &str = "No hotels found. Try adjusting your search.";
pub const NO_ROOMS_MESSAGE: &str = "No rooms available at the moment.";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    NotFound,
    // Generic user-facing message; store detail is logged, never shown
    Failed(String),
    Loaded(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(&T) -> U>(&self, f: F) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::NotFound => ViewState::NotFound,
            ViewState::Failed(message) => ViewState::Failed(message.clone()),
            ViewState::Loaded(value) => ViewState::Loaded(f(value)),
        }
    }

    // Only a missing row is NotFound. A NotFound error means the store path itself is gone.
    pub(crate) fn from_lookup(result: Result<Option<T>, StoreError>, what: &str) -> Self {
        match result {
            Ok(Some(value)) => ViewState::Loaded(value),
            Ok(None) => ViewState::NotFound,
            Err(e) => {
                warn!(error = %e, "failed to load {}", what);
                ViewState::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        }
    }
}

// Hotel tile on the listing page
#[derive(Debug, Clone, PartialEq)]
pub struct HotelCard {
    pub hotel_id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub rating: String,
}

impl From<&Hotel> for HotelCard {
    fn from(hotel: &Hotel) -> Self {
        Self {
            hotel_id: hotel.id.clone(),
            name: hotel.name.clone(),
            location: hotel.location(),
            description: hotel.description.clone(),
            image_url: hotel.image_url.clone(),
            rating: hotel.rating.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomCard {
    pub room_id: String,
    pub room_type: String,
    pub description: String,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub image_url: String,
    pub price_label: String,
}

impl From<&Room> for RoomCard {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.clone(),
            room_type: room.room_type.clone(),
            description: room.description.clone(),
            capacity: room.capacity,
            amenities: room.amenities.clone(),
            image_url: room.image_url.clone(),
            price_label: format!("${} / night", room.price_per_night),
        }
    }
}

impl RoomCard {
    // "Book Now" target
    pub fn booking_route(&self) -> Result<Route, RouteError> {
        RoomId::parse(&self.room_id).map(Route::Booking)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Empty(&'static str),
    Cards(Vec<T>),
}

impl<T> Listing<T> {
    fn from_cards(cards: Vec<T>, empty_message: &'static str) -> Self {
        if cards.is_empty() {
            Listing::Empty(empty_message)
        } else {
            Listing::Cards(cards)
        }
    }
}

// Home page: every hotel, best rated first, narrowed by the city search box
#[derive(Debug, Default)]
pub struct HotelListView {
    hotels: ViewState<Vec<Hotel>>,
    query: String,
}

impl HotelListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<S: HotelStore + ?Sized>(&mut self, store: &S) {
        self.hotels = match store.list_hotels().await {
            Ok(hotels) => {
                debug!(count = hotels.len(), "hotels loaded");
                ViewState::Loaded(hotels)
            }
            Err(e) => {
                warn!(error = %e, "failed to load hotels");
                ViewState::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn state(&self) -> &ViewState<Vec<Hotel>> {
        &self.hotels
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn heading(&self) -> String {
        listing_heading(&self.query)
    }

    pub fn content(&self) -> ViewState<Listing<HotelCard>> {
        let query = CityQuery::new(&self.query);
        self.hotels.map(|hotels| {
            let cards = hotels
                .iter()
                .filter(|h| query.matches(h))
                .map(HotelCard::from)
                .collect();
            Listing::from_cards(cards, NO_HOTELS_MESSAGE)
        })
    }

    pub fn select(&self, hotel_id: &str) -> Result<Route, RouteError> {
        HotelId::parse(hotel_id).map(Route::HotelDetail)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelDetail {
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}

// Hotel page: the hotel and its available rooms
#[derive(Debug)]
pub struct HotelDetailView {
    hotel_id: HotelId,
    state: ViewState<HotelDetail>,
}

impl HotelDetailView {
    pub fn new(hotel_id: HotelId) -> Self {
        Self {
            hotel_id,
            state: ViewState::Loading,
        }
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn state(&self) -> &ViewState<HotelDetail> {
        &self.state
    }

    pub async fn load<S: HotelStore + ?Sized>(&mut self, store: &S) {
        let id = self.hotel_id.as_str();
        let (hotel, rooms) = futures::join!(store.get_hotel(id), store.list_rooms(id));

        // A failed room query leaves the hotel visible with no rooms listed
        let rooms = rooms.unwrap_or_else(|e| {
            warn!(hotel_id = id, error = %e, "failed to load rooms");
            Vec::new()
        });

        self.state = ViewState::from_lookup(hotel, "hotel").map(|hotel| HotelDetail {
            hotel: hotel.clone(),
            rooms: rooms.iter().filter(|r| r.available).cloned().collect(),
        });
    }

    pub fn rooms(&self) -> ViewState<Listing<RoomCard>> {
        self.state.map(|detail| {
            let cards = detail.rooms.iter().map(RoomCard::from).collect();
            Listing::from_cards(cards, NO_ROOMS_MESSAGE)
        })
    }

    pub fn back_route(&self) -> Route {
        Route::Home
    }
}
