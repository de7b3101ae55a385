use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use map_facade::http::create_default_client;
use map_facade::{
    HeadlessDocument, HeadlessEngine, MapConfig, MapFacade, MarkerParams, Pixel, Size, TileLoader,
};

#[derive(Parser)]
#[command(name = "map-cli")]
#[command(about = "Build a headless map, place markers, click it and optionally fetch its tiles")]
struct Args {
    /// Map configuration as a JSON object (keys as in the JS options object)
    #[arg(short, long, default_value = "{}")]
    config: String,

    /// Marker as "longitude,latitude,content"; may be repeated
    #[arg(short, long)]
    marker: Vec<String>,

    /// Pixel to click, as "x,y"
    #[arg(long)]
    click: Option<String>,

    /// Viewport size, as "width,height"
    #[arg(long, default_value = "800,600")]
    size: String,

    /// Fetch the tiles covering the viewport
    #[arg(long)]
    fetch: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_pair(text: &str) -> Result<(f64, f64), String> {
    let (a, b) = text
        .split_once(',')
        .ok_or_else(|| format!("expected 'a,b', got '{}'", text))?;
    let a = a.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let b = b.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((a, b))
}

fn parse_marker(text: &str) -> Result<MarkerParams, String> {
    let mut parts = text.splitn(3, ',');
    let lon = parts.next().unwrap_or_default().trim();
    let lat = parts.next().unwrap_or_default().trim();
    let content = parts.next().unwrap_or_default();

    let lon = lon.parse::<f64>().map_err(|e| format!("bad longitude '{}': {}", lon, e))?;
    let lat = lat.parse::<f64>().map_err(|e| format!("bad latitude '{}': {}", lat, e))?;
    Ok(MarkerParams::new(lon, lat).with_content(content))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let config = MapConfig::from_json(&args.config).map_err(|e| e.to_string())?;
    let (width, height) = parse_pair(&args.size)?;
    let document = HeadlessDocument::new()
        .with_sized_element(config.target.clone(), Size::new(width, height))
        .with_element(config.popup_element.clone());

    let mut facade =
        MapFacade::new(config, HeadlessEngine::new(), document).map_err(|e| e.to_string())?;

    if !args.marker.is_empty() {
        facade.add_vector_layer("markers");
        for text in &args.marker {
            let params = parse_marker(text)?;
            facade
                .add_marker("markers", params)
                .map_err(|e| e.to_string())?;
        }
        info!("Placed {} markers", args.marker.len());
    }

    let view = facade.map().view();
    let center = view.center().to_lon_lat();
    info!(
        "View center ({:.5}, {:.5}) zoom {} resolution {:.2} m/px",
        center.lon,
        center.lat,
        view.zoom(),
        view.resolution()
    );

    if let Some(click) = &args.click {
        let (x, y) = parse_pair(click)?;
        facade
            .click_at(Pixel::new(x, y))
            .map_err(|e| e.to_string())?;

        let popup = facade.popup().filter(|popup| popup.is_visible());
        match popup.and_then(|popup| Some((popup.position()?, popup.element()))) {
            Some((position, element)) => info!(
                "Popup shown at ({:.2}, {:.2}): {}",
                position.x,
                position.y,
                facade.document().inner_html(element).unwrap_or_default()
            ),
            None => info!("Click at ({}, {}) hit no marker; popup hidden", x, y),
        }
    }

    if args.fetch {
        let client = create_default_client().map_err(|e| e.to_string())?;
        let loader = TileLoader::new(client);
        let wanted = facade.map().visible_tiles().len();
        let tiles = loader.load_visible(facade.map()).await;

        if tiles.is_empty() && wanted > 0 {
            error!("None of the {} visible tiles could be loaded", wanted);
        } else if tiles.len() < wanted {
            warn!("Loaded {} of {} tiles", tiles.len(), wanted);
        } else {
            info!("Loaded all {} tiles", wanted);
        }

        for tile in &tiles {
            info!(
                "{}/{}/{}: {} bytes at {}",
                tile.coord.z,
                tile.coord.x,
                tile.coord.y,
                tile.bytes.len(),
                tile.fetched_at.to_rfc3339()
            );
        }
    }

    for attribution in facade.map().attributions() {
        info!("Attribution: {}", attribution);
    }

    Ok(())
}
