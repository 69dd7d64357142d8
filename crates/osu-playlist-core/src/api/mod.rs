//! osu! web API (v2) client
//!
//! Authenticates with the client-credentials grant and resolves beatmap ids
//! into beatmap records with their parent beatmapset.

mod model;

pub use model::*;

use reqwest::blocking::Client;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::playlist::Properties;

/// The API accepts at most this many ids per `/beatmaps` request
const BEATMAPS_PER_REQUEST: usize = 50;

/// OAuth client credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Read `client_id` and `client_secret` from a properties file
    pub fn load(path: &Path) -> Result<Self> {
        let props = Properties::load(path)?;
        let get = |key: &str| {
            props
                .get(key)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .ok_or_else(|| Error::MissingCredential(key.to_string()))
        };

        Ok(Self {
            client_id: get("client_id")?,
            client_secret: get("client_secret")?,
        })
    }
}

/// Resolves beatmap ids into API records
pub trait BeatmapLookup {
    /// Return one record per id, in the order of `ids`
    fn beatmaps(&self, ids: &[u32]) -> Result<Vec<ApiBeatmap>>;
}

/// Blocking osu! API client
pub struct OsuApi {
    client: Client,
    base_url: String,
    token: String,
}

impl OsuApi {
    /// Obtain an access token and build a client
    pub fn authenticate(
        credentials: &Credentials,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let token: TokenResponse = client
            .post(format!("{}/oauth/token", base_url))
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("grant_type", "client_credentials"),
                ("scope", "public"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        tracing::debug!("Obtained API token valid for {}s", token.expires_in);

        Ok(Self {
            client,
            base_url,
            token: token.access_token,
        })
    }

    fn fetch_chunk(&self, ids: &[u32]) -> Result<Vec<ApiBeatmap>> {
        let query: Vec<(&str, String)> = ids.iter().map(|id| ("ids[]", id.to_string())).collect();

        let response: BeatmapsResponse = self
            .client
            .get(format!("{}/api/v2/beatmaps", self.base_url))
            .bearer_auth(&self.token)
            .query(&query)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.beatmaps)
    }
}

impl BeatmapLookup for OsuApi {
    fn beatmaps(&self, ids: &[u32]) -> Result<Vec<ApiBeatmap>> {
        let mut found = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(BEATMAPS_PER_REQUEST) {
            tracing::debug!("Requesting {} beatmaps", chunk.len());
            for beatmap in self.fetch_chunk(chunk)? {
                found.insert(beatmap.id, beatmap);
            }
        }
        order_by_ids(ids, found)
    }
}

/// Arrange API results in request order, failing on any missing id
pub(crate) fn order_by_ids(
    ids: &[u32],
    mut found: HashMap<u32, ApiBeatmap>,
) -> Result<Vec<ApiBeatmap>> {
    ids.iter()
        .map(|id| found.remove(id).ok_or(Error::BeatmapNotReturned(*id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beatmap(id: u32) -> ApiBeatmap {
        ApiBeatmap {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_order_by_ids() {
        let found: HashMap<_, _> = [3, 1, 2].into_iter().map(|id| (id, beatmap(id))).collect();
        let ordered = order_by_ids(&[2, 3, 1], found).unwrap();
        let ids: Vec<_> = ordered.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_order_by_ids_missing() {
        let found: HashMap<_, _> = [(1, beatmap(1))].into_iter().collect();
        let err = order_by_ids(&[1, 7], found).unwrap_err();
        assert!(matches!(err, Error::BeatmapNotReturned(7)));
    }

    #[test]
    fn test_credentials_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("osu.properties");

        std::fs::write(&path, "client_id=123\nclient_secret=s3cret\n").unwrap();
        let creds = Credentials::load(&path).unwrap();
        assert_eq!(creds.client_id, "123");
        assert_eq!(creds.client_secret, "s3cret");

        std::fs::write(&path, "client_id=123\nclient_secret=\n").unwrap();
        let err = Credentials::load(&path).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(ref k) if k == "client_secret"));
    }
}
