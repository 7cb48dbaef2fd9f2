//! Weather API.
//!
//! The backend proxies a third-party weather service; payloads are passed
//! through untyped.

use serde::Serialize;

use crate::client::BlogClient;
use crate::error::Result;

#[derive(Serialize)]
struct IpQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    ip: Option<&'a str>,
}

#[derive(Serialize)]
struct CityQuery<'a> {
    city: &'a str,
}

/// Weather proxy API client.
pub struct WeatherApi {
    client: BlogClient,
}

impl WeatherApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// Locate an IP address (the caller's own when `ip` is `None`).
    pub async fn ip_location(&self, ip: Option<&str>) -> Result<serde_json::Value> {
        self.client
            .get_with_query("weather/ip", &IpQuery { ip })
            .await
    }

    /// Current weather for a city.
    pub async fn forecast(&self, city: &str) -> Result<serde_json::Value> {
        self.client
            .get_with_query("weather/data", &CityQuery { city })
            .await
    }
}
