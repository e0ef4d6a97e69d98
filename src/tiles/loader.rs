use crate::{
    core::{config::TileLoadingConfig, constants::DEFAULT_USER_AGENT, geo::TileCoord},
    prelude::{Duration, HashSet},
    MapError, Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::thread;

/// Shared blocking HTTP client for the default user agent. Building the
/// client once avoids TLS and connection pool setup for every loader.
static HTTP_CLIENT: Lazy<Option<Client>> = Lazy::new(|| match build_client(DEFAULT_USER_AGENT) {
    Ok(client) => Some(client),
    Err(e) => {
        log::error!("failed to build tile HTTP client: {}", e);
        None
    }
});

fn build_client(user_agent: &str) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(MapError::from)?)
}

fn client_for(user_agent: &str) -> Result<Client> {
    if user_agent == DEFAULT_USER_AGENT {
        if let Some(client) = HTTP_CLIENT.as_ref() {
            return Ok(client.clone());
        }
    }
    build_client(user_agent)
}

/// Outcome of one tile download, after all retries
#[derive(Debug)]
pub struct TileResult {
    pub coord: TileCoord,
    pub data: Result<Vec<u8>>,
}

/// Fetches tiles on detached threads and hands the bytes back over a channel.
///
/// Results are collected with [`TileLoader::drain`] on the owning thread, so
/// nothing else about the map is shared with the workers.
pub struct TileLoader {
    client: Client,
    tx: Sender<TileResult>,
    rx: Receiver<TileResult>,
    in_flight: HashSet<TileCoord>,
    max_concurrent: usize,
    max_retries: u32,
    retry_delay: Duration,
}

impl TileLoader {
    pub fn new(config: &TileLoadingConfig) -> Result<Self> {
        let (tx, rx) = unbounded();
        Ok(Self {
            client: client_for(&config.user_agent)?,
            tx,
            rx,
            in_flight: HashSet::default(),
            max_concurrent: config.max_concurrent.max(1),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    pub fn is_loading(&self, coord: &TileCoord) -> bool {
        self.in_flight.contains(coord)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn has_capacity(&self) -> bool {
        self.in_flight.len() < self.max_concurrent
    }

    /// Starts downloading `coord` from `url`. Returns `false` when the tile is
    /// already on its way or the concurrency cap is reached.
    pub fn request(&mut self, coord: TileCoord, url: String) -> bool {
        if self.is_loading(&coord) || !self.has_capacity() {
            return false;
        }
        self.in_flight.insert(coord);

        let client = self.client.clone();
        let tx = self.tx.clone();
        let attempts = self.max_retries + 1;
        let retry_delay = self.retry_delay;

        thread::spawn(move || {
            let mut attempt = 0;
            let data = loop {
                attempt += 1;
                log::debug!("fetch tile {:?} attempt {}", coord, attempt);
                match fetch(&client, &url) {
                    Ok(bytes) => {
                        log::debug!("downloaded tile {:?} ({} bytes)", coord, bytes.len());
                        break Ok(bytes);
                    }
                    Err(e) => {
                        log::warn!("tile {:?} download failed on attempt {}: {}", coord, attempt, e);
                        if attempt >= attempts {
                            break Err(e);
                        }
                        thread::sleep(retry_delay);
                    }
                }
            };
            // The receiver is gone once the map is dropped
            let _ = tx.send(TileResult { coord, data });
        });

        true
    }

    /// Collects finished downloads without blocking
    pub fn drain(&mut self) -> Vec<TileResult> {
        let results: Vec<TileResult> = self.rx.try_iter().collect();
        for result in &results {
            self.in_flight.remove(&result.coord);
        }
        results
    }
}

fn fetch(client: &Client, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url).send().map_err(MapError::from)?;
    if !resp.status().is_success() {
        return Err(MapError::Tile(format!("HTTP {} for {}", resp.status(), url)).into());
    }
    Ok(resp.bytes().map_err(MapError::from)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> TileLoadingConfig {
        TileLoadingConfig {
            url_template: "http://127.0.0.1:9/{z}/{x}/{y}.png".to_string(),
            subdomains: Vec::new(),
            max_concurrent: 2,
            max_retries: 0,
            ..TileLoadingConfig::default()
        }
    }

    #[test]
    fn test_request_bookkeeping() {
        let mut loader = TileLoader::new(&unreachable_config()).unwrap();
        let first = TileCoord::new(0, 0, 1);

        assert!(loader.request(first, "http://127.0.0.1:9/1/0/0.png".into()));
        assert!(loader.is_loading(&first));
        // Same tile is not requested twice while in flight
        assert!(!loader.request(first, "http://127.0.0.1:9/1/0/0.png".into()));

        assert!(loader.request(TileCoord::new(1, 0, 1), "http://127.0.0.1:9/1/1/0.png".into()));
        assert!(!loader.has_capacity());
        assert!(!loader.request(TileCoord::new(1, 1, 1), "http://127.0.0.1:9/1/1/1.png".into()));
        assert_eq!(loader.in_flight(), 2);
    }
}
