use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const SEASON_URL: &str = "https://api.jikan.moe/v4/seasons/now?limit=25";

/// Jikan's listing of the season currently airing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonResponse {
    #[serde(default)]
    pub data: Vec<Anime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub mal_id: u64,
    pub url: String,
    #[serde(default)]
    pub images: Images,
    #[serde(default)]
    pub title_japanese: Option<String>,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub webp: ImageSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Anime {
    pub fn cover_url(&self) -> Option<&str> {
        self.images.webp.image_url.as_deref()
    }

    /// Preferred display title: Japanese first, the English one as fallback.
    pub fn display_title(&self) -> Option<&str> {
        self.title_japanese
            .as_deref()
            .or(self.title_english.as_deref())
    }
}

pub fn fetch_season(client: &Client) -> Result<SeasonResponse> {
    super::get_json(client, SEASON_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_response_parses_sparse_entries() {
        let json = r#"{
            "data": [{
                "mal_id": 1,
                "url": "https://myanimelist.net/anime/1",
                "images": {"webp": {"image_url": "https://cdn.example/1.webp"}},
                "title_japanese": "テスト",
                "score": 8.31
            }]
        }"#;
        let resp: SeasonResponse = serde_json::from_str(json).unwrap();
        let anime = &resp.data[0];
        assert_eq!(anime.cover_url(), Some("https://cdn.example/1.webp"));
        assert_eq!(anime.display_title(), Some("テスト"));
        assert!(anime.rating.is_none());
    }

    #[test]
    fn display_title_falls_back_to_english() {
        let anime = Anime {
            mal_id: 2,
            url: String::new(),
            images: Images::default(),
            title_japanese: None,
            title_english: Some("Fallback".into()),
            rating: None,
            score: None,
        };
        assert_eq!(anime.display_title(), Some("Fallback"));
    }
}
