// Typed navigation targets
// Paths are parsed and their identifiers validated once, here; views receive typed ids

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

fn validate_identifier(raw: &str) -> Result<String, RouteError> {
    let valid = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(raw.to_string())
    } else {
        Err(RouteError::InvalidIdentifier(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HotelId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl HotelId {
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        validate_identifier(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RoomId {
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        validate_identifier(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    HotelDetail(HotelId),
    Booking(RoomId),
    NotFound(String),
}

impl Route {
    // Resolve a path. Unknown paths and malformed ids both land on NotFound.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Ok(Route::Home),
            ["hotel", id] => HotelId::parse(id).map(Route::HotelDetail),
            ["booking", id] => RoomId::parse(id).map(Route::Booking),
            _ => return Route::NotFound(path.to_string()),
        };

        route.unwrap_or_else(|_| Route::NotFound(path.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::HotelDetail(id) => format!("/hotel/{}", id),
            Route::Booking(id) => format!("/booking/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
