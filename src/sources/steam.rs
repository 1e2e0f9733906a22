use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const GAMES_URL: &str = "https://www.cheapshark.com/api/1.0/games";

/// Steam's store id in CheapShark's catalogue.
const STEAM_STORE_ID: &str = "1";

/// Price lookups keyed by the requested game id.
pub type GameListings = HashMap<String, GameListing>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameListing {
    pub info: GameInfo,
    #[serde(rename = "cheapestPriceEver")]
    pub cheapest_price_ever: PricePoint,
    #[serde(default)]
    pub deals: Vec<Deal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub title: String,
    #[serde(rename = "steamAppID", default)]
    pub steam_app_id: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: String,
    #[serde(default)]
    pub date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(rename = "storeID")]
    pub store_id: String,
    pub price: String,
    #[serde(default)]
    pub savings: String,
}

impl GameListing {
    /// The Steam-store deal, if the game is currently listed there.
    pub fn steam_deal(&self) -> Option<&Deal> {
        self.deals.iter().find(|d| d.store_id == STEAM_STORE_ID)
    }

    pub fn store_url(&self) -> Option<String> {
        self.info
            .steam_app_id
            .as_deref()
            .map(|id| format!("https://store.steampowered.com/app/{id}"))
    }
}

impl Deal {
    pub fn price_value(&self) -> Option<f64> {
        self.price.parse().ok()
    }

    /// Percentage off, rounded; `None` when not discounted.
    pub fn savings_percent(&self) -> Option<u32> {
        let savings: f64 = self.savings.parse().ok()?;
        if savings > 0.0 {
            Some(savings.round() as u32)
        } else {
            None
        }
    }
}

pub fn games_url(ids: &[String]) -> String {
    format!("{GAMES_URL}?ids={}", ids.join(","))
}

pub fn fetch_games(client: &Client, ids: &[String]) -> Result<GameListings> {
    super::get_json(client, &games_url(ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameListings {
        serde_json::from_str(
            r#"{
                "612": {
                    "info": {"title": "Demo Game", "steamAppID": "252490", "thumb": "https://cdn.example/t.jpg"},
                    "cheapestPriceEver": {"price": "4.99", "date": 1500000000},
                    "deals": [
                        {"storeID": "23", "price": "19.99", "savings": "0.0"},
                        {"storeID": "1", "price": "9.99", "savings": "50.12"}
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn games_url_joins_ids() {
        let ids = vec!["612".to_string(), "128".to_string()];
        assert_eq!(
            games_url(&ids),
            "https://www.cheapshark.com/api/1.0/games?ids=612,128"
        );
    }

    #[test]
    fn steam_deal_is_selected_by_store_id() {
        let listings = sample();
        let listing = &listings["612"];
        let deal = listing.steam_deal().unwrap();
        assert_eq!(deal.price_value(), Some(9.99));
        assert_eq!(deal.savings_percent(), Some(50));
    }

    #[test]
    fn zero_savings_means_not_on_sale() {
        let listings = sample();
        let other = &listings["612"].deals[0];
        assert!(other.savings_percent().is_none());
    }

    #[test]
    fn store_url_requires_app_id() {
        let listings = sample();
        assert_eq!(
            listings["612"].store_url().as_deref(),
            Some("https://store.steampowered.com/app/252490")
        );
    }
}
