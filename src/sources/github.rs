use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const SEARCH_URL: &str = "https://api.github.com/search/repositories";

/// Repositories created in the last 30 days, most-starred first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoSearchResponse {
    #[serde(default)]
    pub items: Vec<Repo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

pub fn trending_url(since: NaiveDate) -> String {
    let query = format!("created:>{since}");
    format!(
        "{SEARCH_URL}?q={}&sort=stars&order=desc",
        urlencoding::encode(&query)
    )
}

pub fn fetch_trending(client: &Client) -> Result<RepoSearchResponse> {
    let since = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(30))
        .unwrap_or_else(|| Utc::now().date_naive());
    super::get_json(client, &trending_url(since))
}
