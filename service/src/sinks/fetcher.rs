//! Imagery fetcher with a sha1-keyed disk cache.
//!
//! Resolves player portraits and team badges through TheSportsDB
//! search API, narrows ambiguous player hits via
//! [`crate::player_match`], and caches downloaded bytes on disk so
//! repeat events for the same player or team cost nothing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::DynamicImage;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::{ImageFetcher, ImageKind};
use crate::player_match::{self, Candidate};

const DEFAULT_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("no usable image for {0}")]
    NotFound(String),
}

pub struct CachingFetcher {
    client: reqwest::Client,
    cache_dir: PathBuf,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PlayerSearch {
    player: Option<Vec<PlayerHit>>,
}

#[derive(Debug, Deserialize)]
struct PlayerHit {
    #[serde(rename = "strPlayer")]
    name: Option<String>,
    #[serde(rename = "strSport")]
    sport: Option<String>,
    #[serde(rename = "strTeam")]
    team: Option<String>,
    #[serde(rename = "strNationality")]
    nationality: Option<String>,
    #[serde(rename = "strCutout")]
    cutout: Option<String>,
    #[serde(rename = "strThumb")]
    thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamSearch {
    teams: Option<Vec<TeamHit>>,
}

#[derive(Debug, Deserialize)]
struct TeamHit {
    #[serde(rename = "strTeamBadge")]
    badge: Option<String>,
}

impl CachingFetcher {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache_dir: data_dir.join("image-cache"),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    fn hash_url(url: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Fetch a single image URL, disk cache first, sized for its use.
    async fn fetch(&self, url: &str, kind: ImageKind) -> Result<DynamicImage, FetchError> {
        let cached = self.cache_dir.join(Self::hash_url(url));

        let bytes = match std::fs::read(&cached) {
            Ok(bytes) => bytes,
            Err(_) => {
                let bytes = self
                    .client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?
                    .to_vec();
                std::fs::create_dir_all(&self.cache_dir)?;
                if let Err(e) = std::fs::write(&cached, &bytes) {
                    tracing::debug!(url, error = %e, "Image cache write failed");
                }
                bytes
            }
        };

        let img = image::load_from_memory(&bytes)?;
        let (w, h) = match kind {
            ImageKind::PlayerCutout | ImageKind::PlayerThumb => score_render::PORTRAIT_SIZE,
            ImageKind::TeamBadge => score_render::BADGE_SIZE,
        };
        Ok(img.resize_exact(w, h, image::imageops::FilterType::Lanczos3))
    }

    async fn search_players(&self, term: &str) -> Result<Vec<PlayerHit>, FetchError> {
        let url = format!("{}/searchplayers.php?p={}", self.base_url, urlencode(term));
        let result = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<PlayerSearch>()
            .await?;
        Ok(result.player.unwrap_or_default())
    }

    async fn search_badge_url(&self, team: &str) -> Result<String, FetchError> {
        let url = format!("{}/searchteams.php?t={}", self.base_url, urlencode(team));
        let result = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<TeamSearch>()
            .await?;
        result
            .teams
            .unwrap_or_default()
            .into_iter()
            .find_map(|t| t.badge)
            .ok_or_else(|| FetchError::NotFound(team.to_string()))
    }
}

#[async_trait]
impl ImageFetcher for CachingFetcher {
    async fn player_portrait(
        &self,
        player: &str,
        home_team: &str,
        away_team: &str,
    ) -> Result<DynamicImage, anyhow::Error> {
        let term = normalize_player(player);
        // search on the surname; "A. Smith" finds nothing verbatim
        let search = term
            .split_once('.')
            .map(|(_, rest)| rest.trim())
            .unwrap_or(&term);

        let hits = self.search_players(search).await?;
        let candidates: Vec<Candidate> = hits
            .iter()
            .map(|h| Candidate {
                name: h.name.clone().unwrap_or_default(),
                sport: h.sport.clone().unwrap_or_default(),
                team: h.team.clone(),
                nationality: h.nationality.clone(),
            })
            .collect();

        let chosen = player_match::identify(&candidates, &term, [home_team, away_team])
            .ok_or_else(|| FetchError::NotFound(term.clone()))?;
        let index = candidates
            .iter()
            .position(|c| std::ptr::eq(c, chosen))
            .unwrap_or(0);

        let hit = &hits[index];
        let (url, kind) = if let Some(cutout) = hit.cutout.as_deref().filter(|s| !s.is_empty()) {
            (cutout, ImageKind::PlayerCutout)
        } else if let Some(thumb) = hit.thumb.as_deref().filter(|s| !s.is_empty()) {
            (thumb, ImageKind::PlayerThumb)
        } else {
            return Err(FetchError::NotFound(term).into());
        };

        Ok(self.fetch(url, kind).await?)
    }

    async fn team_badge(&self, team: &str) -> Result<DynamicImage, anyhow::Error> {
        let url = self.search_badge_url(team).await?;
        Ok(self.fetch(&url, ImageKind::TeamBadge).await?)
    }
}

/// Strip the penalty marker some feeds append to scorer names.
fn normalize_player(player: &str) -> String {
    player
        .trim()
        .trim_end_matches("(pen)")
        .trim()
        .to_string()
}

fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
