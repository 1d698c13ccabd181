use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityType {
    Restaurant,
    Cafe,
    FastFood,
    Bar,
    Pub,
    FoodCourt,
    Biergarten,
    All,
}

const ALL_OSM_AMENITIES: [&str; 7] = [
    "restaurant",
    "cafe",
    "fast_food",
    "bar",
    "pub",
    "food_court",
    "biergarten",
];

impl AmenityType {
    /// Unknown keys fall back to every food category.
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some("restaurant") => AmenityType::Restaurant,
            Some("cafe") => AmenityType::Cafe,
            Some("fast_food") => AmenityType::FastFood,
            Some("bar") => AmenityType::Bar,
            Some("pub") => AmenityType::Pub,
            Some("food_court") => AmenityType::FoodCourt,
            Some("biergarten") => AmenityType::Biergarten,
            _ => AmenityType::All,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AmenityType::Restaurant => "restaurant",
            AmenityType::Cafe => "cafe",
            AmenityType::FastFood => "fast_food",
            AmenityType::Bar => "bar",
            AmenityType::Pub => "pub",
            AmenityType::FoodCourt => "food_court",
            AmenityType::Biergarten => "biergarten",
            AmenityType::All => "all",
        }
    }

    /// OSM `amenity=*` values matched by this category.
    pub fn osm_values(&self) -> Vec<&'static str> {
        match self {
            AmenityType::All => ALL_OSM_AMENITIES.to_vec(),
            other => vec![other.key()],
        }
    }

    /// Google Places `type` filter. `None` means search by keyword instead.
    pub fn google_type(&self) -> Option<&'static str> {
        match self {
            AmenityType::Restaurant | AmenityType::FoodCourt => Some("restaurant"),
            AmenityType::Cafe => Some("cafe"),
            AmenityType::FastFood => Some("meal_takeaway"),
            AmenityType::Bar | AmenityType::Pub | AmenityType::Biergarten => Some("bar"),
            AmenityType::All => None,
        }
    }
}
