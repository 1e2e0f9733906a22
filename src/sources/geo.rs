use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const LOOKUP_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct LookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Resolve approximate coordinates from the public IP.
///
/// This stands in for a positioning service: it is only consulted when no
/// fixed coordinates are configured, and a failure here surfaces as the
/// weather widget's error state rather than anything fatal.
pub fn lookup(client: &Client) -> Result<Coordinates> {
    let resp: LookupResponse = super::get_json(client, LOOKUP_URL)?;
    let latitude = resp.latitude.context("geolocation response has no latitude")?;
    let longitude = resp
        .longitude
        .context("geolocation response has no longitude")?;
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_response_parses_coordinates() {
        let resp: LookupResponse =
            serde_json::from_str(r#"{"ip":"1.2.3.4","latitude":52.52,"longitude":13.405}"#)
                .unwrap();
        assert_eq!(resp.latitude, Some(52.52));
        assert_eq!(resp.longitude, Some(13.405));
    }

    #[test]
    fn missing_fields_deserialize_to_none() {
        let resp: LookupResponse = serde_json::from_str(r#"{"ip":"1.2.3.4"}"#).unwrap();
        assert!(resp.latitude.is_none());
    }
}
