// Booking form and submission
//
// Submitting recomputes the total from the form dates, refuses non-positive totals without
// touching the store, and otherwise inserts exactly one booking with status "confirmed".
// There is no in-flight guard or idempotency key: submitting twice books twice.

use crate::models::{Booking, BookingStatus, NewBooking, RoomWithHotel};
use crate::pricing::{self, Quote};
use crate::routes::{Route, RoomId};
use crate::store::{HotelStore, StoreError};
use crate::views::ViewState;
use thiserror::Error;
use tracing::{info, warn};

pub const SUBMIT_LABEL: &str = "Confirm Booking";
pub const SUBMITTING_LABEL: &str = "Processing...";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid stay dates")]
    InvalidDates,

    #[error("Room details are not loaded")]
    RoomNotLoaded,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

// Toast shown to the guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: NoticeVariant,
}

impl Notice {
    pub const CONFIRMED: Notice = Notice {
        title: "Booking Confirmed!",
        description: "Your reservation has been successfully created.",
        variant: NoticeVariant::Default,
    };

    pub const INVALID_DATES: Notice = Notice {
        title: "Invalid Dates",
        description: "Please select valid check-in and check-out dates.",
        variant: NoticeVariant::Destructive,
    };

    pub const MISSING_DETAILS: Notice = Notice {
        title: "Missing Details",
        description: "Please fill in all guest information.",
        variant: NoticeVariant::Destructive,
    };

    pub const FAILED: Notice = Notice {
        title: "Booking Failed",
        description: "There was an error creating your booking. Please try again.",
        variant: NoticeVariant::Destructive,
    };
}

impl BookingError {
    // Only generic text reaches the guest
    pub fn notice(&self) -> Notice {
        match self {
            BookingError::MissingField(_) => Notice::MISSING_DETAILS,
            BookingError::InvalidDates => Notice::INVALID_DATES,
            BookingError::RoomNotLoaded | BookingError::Store(_) => Notice::FAILED,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: String,
    pub check_out: String,
}

impl BookingForm {
    // First required field left blank, in form order
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("guest_name", &self.guest_name),
            ("guest_email", &self.guest_email),
            ("guest_phone", &self.guest_phone),
            ("check_in", &self.check_in),
            ("check_out", &self.check_out),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    pub fn total(&self, price_per_night: f64) -> f64 {
        pricing::calculate_total(&self.check_in, &self.check_out, price_per_night)
    }

    pub fn quote(&self, price_per_night: f64) -> Option<Quote> {
        pricing::quote(&self.check_in, &self.check_out, price_per_night)
    }

    fn to_new_booking(&self, room_id: &RoomId, total_price: f64) -> NewBooking {
        NewBooking {
            room_id: room_id.as_str().to_string(),
            guest_name: self.guest_name.clone(),
            guest_email: self.guest_email.clone(),
            guest_phone: self.guest_phone.clone(),
            check_in: self.check_in.clone(),
            check_out: self.check_out.clone(),
            total_price,
            status: BookingStatus::Confirmed,
        }
    }
}

// Validate the form and insert one booking. No retry on failure.
pub async fn submit_booking<S: HotelStore + ?Sized>(
    store: &S,
    room_id: &RoomId,
    price_per_night: f64,
    form: &BookingForm,
) -> Result<Booking, BookingError> {
    if let Some(field) = form.missing_field() {
        return Err(BookingError::MissingField(field));
    }

    let total = form.total(price_per_night);
    if total <= 0.0 {
        return Err(BookingError::InvalidDates);
    }

    let booking = store
        .insert_booking(form.to_new_booking(room_id, total))
        .await?;
    info!(booking_id = %booking.id, room_id = %room_id, total, "booking confirmed");
    Ok(booking)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
}

// Left-hand card of the booking page
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub hotel_name: String,
    pub room_type: String,
    pub description: String,
    pub image_url: String,
    pub price_per_night: f64,
    // Present once both dates are filled in
    pub quote: Option<Quote>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub booking: Booking,
    pub navigate_to: Route,
}

// Booking page for one room
#[derive(Debug)]
pub struct BookingView {
    room_id: RoomId,
    room: ViewState<RoomWithHotel>,
    form: BookingForm,
    phase: SubmissionPhase,
    notice: Option<Notice>,
}

impl BookingView {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            room: ViewState::Loading,
            form: BookingForm::default(),
            phase: SubmissionPhase::Idle,
            notice: None,
        }
    }

    pub async fn load<S: HotelStore + ?Sized>(&mut self, store: &S) {
        let result = store.get_room_with_hotel(self.room_id.as_str()).await;
        self.room = ViewState::from_lookup(result, "room");
    }

    pub fn room(&self) -> &ViewState<RoomWithHotel> {
        &self.room
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase != SubmissionPhase::Idle
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // Current derived total, 0 until the room and both dates are known
    pub fn total(&self) -> f64 {
        self.room
            .loaded()
            .map_or(0.0, |r| self.form.total(r.room.price_per_night))
    }

    pub fn summary(&self) -> ViewState<BookingSummary> {
        self.room.map(|record| BookingSummary {
            hotel_name: record.hotel.name.clone(),
            room_type: record.room.room_type.clone(),
            description: record.room.description.clone(),
            image_url: record.room.image_url.clone(),
            price_per_night: record.room.price_per_night,
            quote: self.form.quote(record.room.price_per_night),
        })
    }

    // "Back" returns to the room's hotel when it is known
    pub fn back_route(&self) -> Route {
        self.room
            .loaded()
            .and_then(|r| crate::routes::HotelId::parse(&r.hotel.id).ok())
            .map_or(Route::Home, Route::HotelDetail)
    }

    pub async fn submit<S: HotelStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<Confirmation, BookingError> {
        self.phase = SubmissionPhase::Validating;
        let result = self.run_submission(store).await;
        self.phase = SubmissionPhase::Idle;

        match &result {
            Ok(_) => self.notice = Some(Notice::CONFIRMED),
            Err(e) => {
                if let BookingError::Store(store_error) = e {
                    warn!(room_id = %self.room_id, error = %store_error, "booking insert failed");
                }
                self.notice = Some(e.notice());
            }
        }
        result
    }

    async fn run_submission<S: HotelStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<Confirmation, BookingError> {
        let price_per_night = self
            .room
            .loaded()
            .map(|r| r.room.price_per_night)
            .ok_or(BookingError::RoomNotLoaded)?;

        // Checked again by submit_booking; repeated here so the phase stays Validating until they pass
        if let Some(field) = self.form.missing_field() {
            return Err(BookingError::MissingField(field));
        }
        if self.form.total(price_per_night) <= 0.0 {
            return Err(BookingError::InvalidDates);
        }

        self.phase = SubmissionPhase::Submitting;
        let booking = submit_booking(store, &self.room_id, price_per_night, &self.form).await?;

        Ok(Confirmation {
            booking,
            navigate_to: Route::Home,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::fixtures::sample_store;
    use crate::memory_store::InMemoryStore;
    use tokio_test::{assert_err, assert_ok};

    fn filled_form(check_in: &str, check_out: &str) -> BookingForm {
        BookingForm {
            guest_name: "Jane Doe".to_string(),
            guest_email: "jane@example.com".to_string(),
            guest_phone: "+1 (555) 000-0000".to_string(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
        }
    }

    async fn loaded_view(store: &InMemoryStore, room_id: &str) -> BookingView {
        let mut view = BookingView::new(RoomId::parse(room_id).unwrap());
        view.load(store).await;
        view
    }

    #[tokio::test]
    async fn test_scenario_a_summary() {
        let store = sample_store();
        let mut view = loaded_view(&store, "room-p1").await;
        *view.form_mut() = filled_form("2024-03-01", "2024-03-04");

        let summary = view.summary().loaded().cloned().unwrap();
        assert_eq!(summary.hotel_name, "Grand Palace");
        assert_eq!(summary.price_per_night, 100.0);
        assert_eq!(
            summary.quote,
            Some(Quote {
                nights: Some(3),
                total: 300.0
            })
        );
        assert_eq!(view.total(), 300.0);
    }

    #[tokio::test]
    async fn test_scenario_b_reversed_dates_blocked() {
        let store = sample_store();
        let mut view = loaded_view(&store, "room-p1").await;
        *view.form_mut() = filled_form("2024-03-04", "2024-03-01");

        assert_eq!(view.total(), 0.0);
        let err = assert_err!(view.submit(&store).await);
        assert_eq!(err, BookingError::InvalidDates);
        assert_eq!(view.notice(), Some(&Notice::INVALID_DATES));
        assert_eq!(store.insert_count(), 0);
        assert_eq!(view.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_scenario_d_confirmed_booking() {
        let store = sample_store();
        let mut view = loaded_view(&store, "room-p1").await;
        *view.form_mut() = filled_form("2024-03-01", "2024-03-04");

        let confirmation = assert_ok!(view.submit(&store).await);
        assert_eq!(confirmation.navigate_to, Route::Home);
        assert_eq!(confirmation.booking.status, BookingStatus::Confirmed);
        assert_eq!(confirmation.booking.total_price, view.total());
        assert_eq!(confirmation.booking.room_id, "room-p1");
        assert_eq!(confirmation.booking.check_in, "2024-03-01");
        assert_eq!(view.notice(), Some(&Notice::CONFIRMED));

        let stored = store.booking(&confirmation.booking.id).unwrap();
        assert_eq!(stored, confirmation.booking);
    }

    #[tokio::test]
    async fn test_scenario_e_store_failure_keeps_form() {
        let store = sample_store();
        let mut view = loaded_view(&store, "room-p1").await;
        let form = filled_form("2024-03-01", "2024-03-04");
        *view.form_mut() = form.clone();
        store.fail_next_requests(1);

        let err = assert_err!(view.submit(&store).await);
        assert!(matches!(err, BookingError::Store(StoreError::Network(_))));
        assert_eq!(view.notice(), Some(&Notice::FAILED));
        assert_eq!(view.form(), &form);
        assert_eq!(view.button_label(), SUBMIT_LABEL);
        assert!(store.bookings().is_empty());

        // Same form can be sent again
        let confirmation = assert_ok!(view.submit(&store).await);
        assert_eq!(confirmation.booking.total_price, 300.0);
        assert_eq!(store.insert_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_guest_details_blocked() {
        let store = sample_store();
        let mut view = loaded_view(&store, "room-p1").await;
        *view.form_mut() = filled_form("2024-03-01", "2024-03-04");
        view.form_mut().guest_email = "  ".to_string();

        let err = assert_err!(view.submit(&store).await);
        assert_eq!(err, BookingError::MissingField("guest_email"));
        assert_eq!(view.notice(), Some(&Notice::MISSING_DETAILS));
        assert_eq!(store.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_before_room_loaded() {
        let store = sample_store();
        let mut view = BookingView::new(RoomId::parse("room-p1").unwrap());
        *view.form_mut() = filled_form("2024-03-01", "2024-03-04");

        assert_eq!(view.total(), 0.0);
        let err = assert_err!(view.submit(&store).await);
        assert_eq!(err, BookingError::RoomNotLoaded);
        assert_eq!(store.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_room_not_found() {
        let store = sample_store();
        let view = loaded_view(&store, "room-missing").await;
        assert_eq!(view.room(), &ViewState::NotFound);
        assert_eq!(view.summary(), ViewState::NotFound);
        assert_eq!(view.back_route(), Route::Home);
    }

    #[tokio::test]
    async fn test_back_route_to_hotel() {
        let store = sample_store();
        let view = loaded_view(&store, "room-l1").await;
        assert_eq!(view.back_route().path(), "/hotel/hotel-london");
    }

    // Known limitation: nothing stops a second submission of the same form
    #[tokio::test]
    async fn test_double_submission_books_twice() {
        let store = sample_store();
        let mut view = loaded_view(&store, "room-p1").await;
        *view.form_mut() = filled_form("2024-03-01", "2024-03-04");

        let first = assert_ok!(view.submit(&store).await);
        let second = assert_ok!(view.submit(&store).await);
        assert_ne!(first.booking.id, second.booking.id);
        assert_eq!(store.bookings().len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_submissions_both_insert() {
        let store = sample_store();
        store.set_delay(10);
        let room_id = RoomId::parse("room-p1").unwrap();
        let form = filled_form("2024-03-01", "2024-03-04");

        let (a, b) = futures::join!(
            submit_booking(&store, &room_id, 100.0, &form),
            submit_booking(&store, &room_id, 100.0, &form)
        );
        assert_ok!(a);
        assert_ok!(b);
        assert_eq!(store.bookings().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_booking_directly() {
        let store = sample_store();
        let room_id = RoomId::parse("room-p3").unwrap();

        // daylight-saving gap still books two nights
        let form = filled_form("2024-03-09T00:00:00-05:00", "2024-03-11T00:00:00-04:00");
        let booking = assert_ok!(submit_booking(&store, &room_id, 180.0, &form).await);
        assert_eq!(booking.total_price, 360.0);

        let empty_dates = filled_form("2024-03-01", "not a date");
        let err = assert_err!(submit_booking(&store, &room_id, 180.0, &empty_dates).await);
        assert_eq!(err, BookingError::InvalidDates);
    }

    #[test]
    fn test_missing_field_order() {
        let mut form = BookingForm::default();
        assert_eq!(form.missing_field(), Some("guest_name"));
        form = filled_form("2024-03-01", "");
        assert_eq!(form.missing_field(), Some("check_out"));
        form.check_out = "2024-03-02".to_string();
        assert_eq!(form.missing_field(), None);
    }
}
