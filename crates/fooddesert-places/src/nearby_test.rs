use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::*;
use crate::types::{LatLng, PlaceType, RawResult};

/// A request the fake service received.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Search(NearbySearchRequest),
    NextPage(String),
}

/// Fake service that replays a fixed script of page responses.
#[derive(Default)]
struct ScriptedApi {
    pages: Mutex<VecDeque<Result<SearchResponse, PlacesError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    fn new(pages: Vec<Result<SearchResponse, PlacesError>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Call) -> Result<SearchResponse, PlacesError> {
        self.calls.lock().unwrap().push(call);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("fake service ran out of scripted pages")
    }
}

#[async_trait]
impl PlacesApi for ScriptedApi {
    async fn search(&self, request: &NearbySearchRequest) -> Result<SearchResponse, PlacesError> {
        self.next(Call::Search(request.clone()))
    }

    async fn search_next_page(&self, token: &str) -> Result<SearchResponse, PlacesError> {
        self.next(Call::NextPage(token.to_owned()))
    }
}

/// Fake service that always has another page.
#[derive(Default)]
struct EndlessApi {
    requests: AtomicUsize,
}

#[async_trait]
impl PlacesApi for EndlessApi {
    async fn search(&self, _request: &NearbySearchRequest) -> Result<SearchResponse, PlacesError> {
        let n = self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(page("endless", n, 20, Some(&format!("T{n}"))))
    }

    async fn search_next_page(&self, token: &str) -> Result<SearchResponse, PlacesError> {
        let n = self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(page(token, n, 20, Some(&format!("T{n}"))))
    }
}

/// Records every requested pause instead of sleeping.
#[derive(Default)]
struct RecordingPause {
    pauses: Mutex<Vec<Duration>>,
    interrupt_on: Option<usize>,
}

impl RecordingPause {
    fn interrupting_on(nth: usize) -> Arc<Self> {
        Arc::new(Self {
            pauses: Mutex::new(Vec::new()),
            interrupt_on: Some(nth),
        })
    }

    fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) -> Result<(), PlacesError> {
        let mut pauses = self.pauses.lock().unwrap();
        pauses.push(duration);
        if self.interrupt_on == Some(pauses.len()) {
            return Err(PlacesError::Interrupted);
        }
        Ok(())
    }
}

/// Builds a page of `count` results named `{label}-{page_no}-{i}` at distinct
/// coordinates.
fn page(label: &str, page_no: usize, count: usize, token: Option<&str>) -> SearchResponse {
    #[allow(clippy::cast_precision_loss)]
    let results = (0..count)
        .map(|i| RawResult {
            name: format!("{label}-{page_no}-{i}"),
            location: LatLng::new(34.0 + i as f64 * 0.001, -81.0 - page_no as f64 * 0.01),
        })
        .collect();
    SearchResponse {
        results,
        next_page_token: token.map(str::to_owned),
    }
}

fn remote_error(status: &str) -> PlacesError {
    PlacesError::RemoteService {
        status: status.to_owned(),
        message: "rejected".to_owned(),
    }
}

fn columbia() -> GeoPoint {
    GeoPoint::new(-81.0348, 34.0007)
}

#[tokio::test]
async fn single_page_returns_results_in_order_without_pausing() {
    let api = ScriptedApi::new(vec![Ok(page("store", 1, 5, None))]);
    let pause = Arc::new(RecordingPause::default());
    let search = NearbySearch::new(Arc::clone(&api), Arc::clone(&pause));

    let stores = search.nearby_query(columbia(), 1600).await.unwrap();

    let names: Vec<&str> = stores.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["store-1-0", "store-1-1", "store-1-2", "store-1-3", "store-1-4"]
    );
    assert!(pause.pauses().is_empty(), "no pause expected for one page");
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn first_request_is_grocery_search_with_lat_first_origin() {
    let api = ScriptedApi::new(vec![Ok(page("store", 1, 1, None))]);
    let search = NearbySearch::new(Arc::clone(&api), Arc::new(RecordingPause::default()));

    search
        .nearby_query(GeoPoint::new(-122.4, 37.8), 500)
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![Call::Search(NearbySearchRequest {
            origin: LatLng::new(37.8, -122.4),
            radius_meters: 500,
            place_type: PlaceType::GroceryOrSupermarket,
        })]
    );
}

#[tokio::test]
async fn result_locations_are_converted_back_to_geo_points() {
    let response = SearchResponse {
        results: vec![RawResult {
            name: "Food Lion".to_owned(),
            location: LatLng::new(33.99, -81.02),
        }],
        next_page_token: None,
    };
    let api = ScriptedApi::new(vec![Ok(response)]);
    let search = NearbySearch::new(api, Arc::new(RecordingPause::default()));

    let stores = search.nearby_query(columbia(), 1600).await.unwrap();

    assert_eq!(
        stores,
        vec![Store::new("Food Lion", GeoPoint::new(-81.02, 33.99))]
    );
}

#[tokio::test]
async fn three_pages_are_concatenated_with_two_pauses() {
    let api = ScriptedApi::new(vec![
        Ok(page("p", 1, 20, Some("T1"))),
        Ok(page("p", 2, 20, Some("T2"))),
        Ok(page("p", 3, 20, None)),
    ]);
    let pause = Arc::new(RecordingPause::default());
    let search = NearbySearch::new(Arc::clone(&api), Arc::clone(&pause));

    let stores = search.nearby_query(columbia(), 1600).await.unwrap();

    assert_eq!(stores.len(), 60);
    let expected: Vec<String> = (1..=3)
        .flat_map(|p| (0..20).map(move |i| format!("p-{p}-{i}")))
        .collect();
    let names: Vec<String> = stores.into_iter().map(|s| s.name).collect();
    assert_eq!(names, expected);

    assert_eq!(pause.pauses(), vec![DEFAULT_PAGE_DELAY, DEFAULT_PAGE_DELAY]);

    let calls = api.calls();
    assert!(matches!(calls[0], Call::Search(_)));
    assert_eq!(calls[1], Call::NextPage("T1".to_owned()));
    assert_eq!(calls[2], Call::NextPage("T2".to_owned()));
}

#[tokio::test]
async fn custom_page_delay_is_used_for_every_pause() {
    let api = ScriptedApi::new(vec![
        Ok(page("p", 1, 2, Some("T1"))),
        Ok(page("p", 2, 2, None)),
    ]);
    let pause = Arc::new(RecordingPause::default());
    let search = NearbySearch::new(api, Arc::clone(&pause))
        .with_page_delay(Duration::from_millis(2500));

    search.nearby_query(columbia(), 1600).await.unwrap();

    assert_eq!(pause.pauses(), vec![Duration::from_millis(2500)]);
}

#[tokio::test]
async fn zero_results_page_yields_empty_set() {
    let api = ScriptedApi::new(vec![Ok(SearchResponse::default())]);
    let search = NearbySearch::new(api, Arc::new(RecordingPause::default()));

    let stores = search.nearby_query(columbia(), 1600).await.unwrap();
    assert!(stores.is_empty());
}

#[tokio::test]
async fn remote_error_on_second_page_discards_first_page() {
    let api = ScriptedApi::new(vec![
        Ok(page("p", 1, 20, Some("T1"))),
        Err(remote_error("OVER_QUERY_LIMIT")),
    ]);
    let search = NearbySearch::new(Arc::clone(&api), Arc::new(RecordingPause::default()));

    let result = search.nearby_query(columbia(), 1600).await;

    assert!(
        matches!(result, Err(PlacesError::RemoteService { ref status, .. }) if status == "OVER_QUERY_LIMIT"),
        "expected RemoteService, got: {result:?}"
    );
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn remote_error_on_first_page_is_propagated() {
    let api = ScriptedApi::new(vec![Err(remote_error("REQUEST_DENIED"))]);
    let pause = Arc::new(RecordingPause::default());
    let search = NearbySearch::new(api, Arc::clone(&pause));

    let result = search.nearby_query(columbia(), 1600).await;

    assert!(matches!(result, Err(PlacesError::RemoteService { .. })));
    assert!(pause.pauses().is_empty());
}

#[tokio::test]
async fn interrupted_pause_aborts_before_next_request() {
    let api = ScriptedApi::new(vec![Ok(page("p", 1, 20, Some("T1")))]);
    let search = NearbySearch::new(Arc::clone(&api), RecordingPause::interrupting_on(1));

    let result = search.nearby_query(columbia(), 1600).await;

    assert!(matches!(result, Err(PlacesError::Interrupted)), "got: {result:?}");
    assert_eq!(api.calls().len(), 1, "no request may follow an interrupted pause");
}

#[tokio::test]
async fn endless_continuation_fails_with_protocol_violation() {
    let api = Arc::new(EndlessApi::default());
    let pause = Arc::new(RecordingPause::default());
    let search = NearbySearch::new(Arc::clone(&api), Arc::clone(&pause));

    let result = search.nearby_query(columbia(), 1600).await;

    assert!(
        matches!(result, Err(PlacesError::ProtocolViolation { max_pages: 3 })),
        "expected ProtocolViolation, got: {result:?}"
    );
    assert_eq!(api.requests.load(Ordering::SeqCst), 3);
    assert_eq!(pause.pauses().len(), 2, "no pause after the last allowed page");
}

#[tokio::test]
async fn max_pages_bound_is_configurable() {
    let api = Arc::new(EndlessApi::default());
    let search = NearbySearch::new(Arc::clone(&api), Arc::new(RecordingPause::default()))
        .with_max_pages(5);

    let result = search.nearby_query(columbia(), 1600).await;

    assert!(matches!(result, Err(PlacesError::ProtocolViolation { max_pages: 5 })));
    assert_eq!(api.requests.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn max_pages_of_zero_still_fetches_one_page() {
    let api = ScriptedApi::new(vec![Ok(page("p", 1, 3, None))]);
    let search = NearbySearch::new(api, Arc::new(RecordingPause::default())).with_max_pages(0);

    let stores = search.nearby_query(columbia(), 1600).await.unwrap();
    assert_eq!(stores.len(), 3);
}

#[tokio::test]
async fn zero_radius_is_rejected_before_any_request() {
    let api = ScriptedApi::new(vec![]);
    let search = NearbySearch::new(Arc::clone(&api), Arc::new(RecordingPause::default()));

    let result = search.nearby_query(columbia(), 0).await;

    assert!(matches!(
        result,
        Err(PlacesError::InvalidRadius { radius_meters: 0, .. })
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn radius_above_service_maximum_is_rejected() {
    let api = ScriptedApi::new(vec![]);
    let search = NearbySearch::new(api, Arc::new(RecordingPause::default()));

    let result = search.nearby_query(columbia(), MAX_RADIUS_METERS + 1).await;
    assert!(matches!(result, Err(PlacesError::InvalidRadius { .. })));
}

#[tokio::test]
async fn swapped_origin_is_rejected() {
    let api = ScriptedApi::new(vec![]);
    let search = NearbySearch::new(Arc::clone(&api), Arc::new(RecordingPause::default()));

    // Latitude placed in x: y = -122.4 is outside [-90, 90].
    let result = search.nearby_query(GeoPoint::new(37.8, -122.4), 1600).await;

    assert!(matches!(result, Err(PlacesError::InvalidOrigin { .. })));
    assert!(api.calls().is_empty());
}
