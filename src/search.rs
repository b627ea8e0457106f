// Client-side city search over the already-fetched hotel list

use crate::models::Hotel;

pub const FEATURED_HEADING: &str = "Featured Hotels";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityQuery {
    needle: String,
}

impl CityQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    // Case-insensitive substring match on the city; an empty query matches everything
    pub fn matches(&self, hotel: &Hotel) -> bool {
        self.is_empty() || hotel.city.to_lowercase().contains(&self.needle)
    }
}

// Hotels whose city contains the query, in their original order
pub fn filter_by_city(hotels: &[Hotel], query: &str) -> Vec<Hotel> {
    let query = CityQuery::new(query);
    hotels.iter().filter(|h| query.matches(h)).cloned().collect()
}

// Section heading above the hotel grid
pub fn listing_heading(query: &str) -> String {
    if query.is_empty() {
        FEATURED_HEADING.to_string()
    } else {
        format!("Hotels in {}", query)
    }
}
