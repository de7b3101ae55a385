use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::TileCoord;
use crate::http::HttpClient;
use crate::map::{LayerKey, MapView, VisibleTile};

/// Image bytes for one tile that loaded successfully
#[derive(Debug, Clone)]
pub struct LoadedTile {
    pub layer_id: Option<LayerKey>,
    pub coord: TileCoord,
    pub url: String,
    pub bytes: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
}

/// Fetches the raster tiles a map currently shows
///
/// Failed tiles are logged and left out of the result; a missing tile is simply
/// absent from the view.
pub struct TileLoader {
    client: Arc<dyn HttpClient>,
}

impl TileLoader {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch every tile covering the current viewport
    pub async fn load_visible(&self, map: &MapView) -> Vec<LoadedTile> {
        let wanted = map.visible_tiles();
        tracing::debug!("Loading {} visible tiles", wanted.len());

        let mut loaded = Vec::with_capacity(wanted.len());
        for tile in wanted {
            if let Some(tile) = self.load(tile).await {
                loaded.push(tile);
            }
        }
        loaded
    }

    /// Fetch a single tile, or `None` if it could not be loaded
    pub async fn load(&self, tile: VisibleTile) -> Option<LoadedTile> {
        let response = match self.client.get(&tile.url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Tile {} failed to load: {}", tile.url, e);
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!("Tile {} returned HTTP {}", tile.url, response.status);
            return None;
        }

        Some(LoadedTile {
            layer_id: tile.layer_id,
            coord: tile.coord,
            url: tile.url,
            bytes: response.body,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpError, HttpResponse, HttpResult};
    use crate::map::{Layer, Size, View, XyzSource};
    use crate::projection::Projected;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves tiles from "ok" hosts and fails everything else
    struct MockHttpClient {
        requested: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        fn new() -> Self {
            Self {
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> HttpResult<HttpResponse> {
            self.requested.lock().unwrap().push(url.to_string());
            if url.contains("down.example") {
                return Err(HttpError::Network {
                    message: "connection refused".to_string(),
                });
            }
            let status = if url.contains("missing.example") { 404 } else { 200 };
            Ok(HttpResponse {
                status,
                body: url.as_bytes().to_vec(),
                headers: HashMap::new(),
            })
        }

        async fn test_connectivity(&self, _url: &str) -> HttpResult<()> {
            Ok(())
        }
    }

    fn map_with(templates: &[&str]) -> MapView {
        let view = View::new(Projected::new(0.0, 0.0), 0.0, 0.0, 18.0)
            .with_size(Size::new(256.0, 256.0));
        let mut map = MapView::new("olmap", view);
        for (i, template) in templates.iter().enumerate() {
            map.add_layer(Layer::tile(Some((i as u32).into()), XyzSource::new(*template)));
        }
        map
    }

    #[tokio::test]
    async fn test_loads_visible_tiles() {
        let client = Arc::new(MockHttpClient::new());
        let loader = TileLoader::new(client.clone());
        let map = map_with(&["https://ok.example/{z}/{x}/{y}.png"]);

        let tiles = loader.load_visible(&map).await;
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].coord, TileCoord::new(0, 0, 0));
        assert_eq!(tiles[0].bytes, b"https://ok.example/0/0/0.png".to_vec());
        assert_eq!(tiles[0].layer_id, Some(LayerKey::from(0)));
    }

    #[tokio::test]
    async fn test_failed_tiles_are_dropped() {
        let client = Arc::new(MockHttpClient::new());
        let loader = TileLoader::new(client.clone());
        let map = map_with(&[
            "https://down.example/{z}/{x}/{y}.png",
            "https://missing.example/{z}/{x}/{y}.png",
            "https://ok.example/{z}/{x}/{y}.png",
        ]);

        let tiles = loader.load_visible(&map).await;
        assert_eq!(tiles.len(), 1);
        assert!(tiles[0].url.starts_with("https://ok.example"));
        assert_eq!(client.requested.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_vector_layers_need_no_tiles() {
        let client = Arc::new(MockHttpClient::new());
        let loader = TileLoader::new(client.clone());
        let mut map = map_with(&[]);
        map.add_layer(Layer::vector(Some("pts".into())));

        assert!(loader.load_visible(&map).await.is_empty());
        assert!(client.requested.lock().unwrap().is_empty());
    }
}
