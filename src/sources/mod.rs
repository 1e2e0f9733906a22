//! Clients for the public APIs the widgets draw from. Each module exposes a
//! URL builder, the typed response shape and a blocking fetch helper.

pub mod anime;
pub mod geo;
pub mod github;
pub mod steam;
pub mod weather;

use anyhow::Result;
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("homedash/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client shared by the data sources.
pub fn http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}

/// GET `url` and parse the JSON body, treating non-success statuses as
/// errors.
pub(crate) fn get_json<T: serde::de::DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("GET {url} returned {status}");
    }
    let text = resp.text()?;
    let data = serde_json::from_str(&text)?;
    Ok(data)
}
