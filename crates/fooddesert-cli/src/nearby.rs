//! `nearby` command: look up grocery stores around a point and print them.

use std::time::Duration;

use fooddesert_core::{AppConfig, GeoPoint, Store};
use fooddesert_places::{NearbySearch, PlacesClient, TokioPause};
use tokio::sync::watch;

/// Runs a nearby search and prints the stores to stdout.
///
/// Ctrl-C during the pause between pages aborts the search; nothing is
/// printed in that case.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the search fails, or the
/// output cannot be serialized.
pub(crate) async fn run_nearby(
    config: &AppConfig,
    lng: f64,
    lat: f64,
    radius: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let client = PlacesClient::with_base_url(
        &config.places_api_key,
        config.places_request_timeout_secs,
        &config.places_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?;

    let (interrupt_tx, interrupt_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received; stopping nearby search");
            let _ = interrupt_tx.send(true);
        }
    });

    let search = NearbySearch::new(client, TokioPause::interruptible(interrupt_rx))
        .with_page_delay(Duration::from_millis(config.places_page_delay_ms))
        .with_max_pages(config.places_max_pages);

    let origin = GeoPoint::new(lng, lat);
    let radius = radius.unwrap_or(config.default_radius_meters);

    tracing::info!(%origin, radius, "searching for nearby grocery stores");
    let stores = search.nearby_query(origin, radius).await?;
    tracing::info!(count = stores.len(), "nearby search finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&stores)?);
    } else {
        print!("{}", render_table(&stores));
    }
    Ok(())
}

/// One line per store: name, then the location as `(lat, lng)`.
fn render_table(stores: &[Store]) -> String {
    if stores.is_empty() {
        return "no grocery stores found\n".to_string();
    }
    let width = stores.iter().map(|s| s.name.len()).max().unwrap_or(0);
    stores
        .iter()
        .map(|s| {
            format!(
                "{:<width$}  ({:.6}, {:.6})\n",
                s.name,
                s.location.latitude(),
                s.location.longitude()
            )
        })
        .collect()
}
