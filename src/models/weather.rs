use serde::{Deserialize, Serialize};

/// Display-only weather for the main screen. Deserialized from the catalog's
/// snake_case wire shape, serialized camelCase towards the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct WeatherSnapshot {
    pub temperature_high: f64,
    pub weather_condition: String,
    pub precipitation_chance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEnvelope {
    pub success: bool,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default)]
    pub error: Option<String>,
}
