use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct OverpassResponseCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize, Serialize)]
pub struct OverpassResponseElement {
    pub r#type: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<OverpassResponseCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Deserialize, Serialize)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassResponseElement>,
}
