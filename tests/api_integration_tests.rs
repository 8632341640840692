//! Integration Tests for the API client and REPL
//!
//! Runs the client against a local axum stand-in for PokeAPI that counts
//! the requests it serves, so cache hits are observable.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tokio::io::BufReader;

use pokedex::repl::{self, GOODBYE};
use pokedex::{Cache, Config, Error, PokeClient, Session};

// == Mock PokeAPI ==

const AREAS: &[&str] = &[
    "canalave-city-area",
    "eterna-city-area",
    "pastoria-city-area",
    "sunyshore-city-area",
    "sinnoh-pokemon-league-area",
];

#[derive(Clone)]
struct MockApi {
    base: String,
    hits: Arc<AtomicUsize>,
}

async fn list_areas(
    State(api): State<MockApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);

    let page_url = |offset: usize| {
        format!("{}/location-area?offset={}&limit={}", api.base, offset, limit)
    };
    let results: Vec<Value> = AREAS
        .iter()
        .skip(offset)
        .take(limit)
        .map(|name| json!({ "name": name, "url": "" }))
        .collect();
    let next = (offset + limit < AREAS.len()).then(|| page_url(offset + limit));
    let previous = (offset > 0).then(|| page_url(offset.saturating_sub(limit)));

    Json(json!({
        "count": AREAS.len(),
        "next": next,
        "previous": previous,
        "results": results,
    }))
}

async fn area(State(api): State<MockApi>, Path(name): Path<String>) -> Json<Value> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "id": 1,
        "name": name,
        "pokemon_encounters": [
            { "pokemon": { "name": "tentacool", "url": "" } },
            { "pokemon": { "name": "pidgey", "url": "" } }
        ]
    }))
}

async fn pokemon(
    State(api): State<MockApi>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    if name == "missingno" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": 16,
        "name": name,
        "base_experience": 1,
        "height": 3,
        "weight": 18,
        "stats": [ { "base_stat": 40, "effort": 0, "stat": { "name": "hp", "url": "" } } ],
        "types": [ { "slot": 1, "type": { "name": "normal", "url": "" } } ]
    })))
}

/// Starts the mock API and returns its base URL and hit counter.
async fn spawn_mock_api() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let base = format!("http://{}/api/v2", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockApi {
        base: base.clone(),
        hits: hits.clone(),
    };

    let app = Router::new()
        .route("/api/v2/location-area", get(list_areas))
        .route("/api/v2/location-area/:name", get(area))
        .route("/api/v2/pokemon/:name", get(pokemon))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base, hits)
}

fn client_for(base: &str, cache: Cache) -> PokeClient {
    let config = Config {
        base_url: base.to_string(),
        request_timeout: 5,
        page_size: 2,
        ..Config::default()
    };
    PokeClient::new(&config, cache).unwrap()
}

// == Client Tests ==

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let (base, hits) = spawn_mock_api().await;
    let client = client_for(&base, Cache::new(Duration::from_secs(60)).unwrap());

    let first = client.pokemon("pikachu").await.unwrap();
    let second = client.pokemon("pikachu").await.unwrap();

    assert_eq!(first.name, "pikachu");
    assert_eq!(second.name, "pikachu");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(client.cache().len().await, 1);
}

#[tokio::test]
async fn test_expired_response_is_refetched() {
    let (base, hits) = spawn_mock_api().await;
    let client = client_for(&base, Cache::new(Duration::from_millis(50)).unwrap());

    client.location_area("eterna-city-area").await.unwrap();
    // Two ticks guarantee one sweep saw the entry older than the interval
    tokio::time::sleep(Duration::from_millis(160)).await;
    client.location_area("eterna-city-area").await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_error_status_is_not_cached() {
    let (base, hits) = spawn_mock_api().await;
    let client = client_for(&base, Cache::new(Duration::from_secs(60)).unwrap());

    for _ in 0..2 {
        let result = client.pokemon("missingno").await;
        assert!(matches!(result, Err(Error::Status { status: 404, .. })));
    }

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(client.cache().is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_share_cache() {
    let (base, hits) = spawn_mock_api().await;
    let cache = Cache::new(Duration::from_secs(60)).unwrap();
    let client = client_for(&base, cache.clone());

    // Warm the cache so every concurrent read of these keys is a hit
    for name in ["bulbasaur", "charmander"] {
        client.pokemon(name).await.unwrap();
    }

    let mut handles = Vec::new();
    for task in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            for round in 0..10 {
                let shared = if round % 2 == 0 { "bulbasaur" } else { "charmander" };
                let pokemon = client.pokemon(shared).await.unwrap();
                assert_eq!(pokemon.name, shared);

                let own = format!("task{}", task);
                let pokemon = client.pokemon(&own).await.unwrap();
                assert_eq!(pokemon.name, own);
            }
        }));
    }

    tokio::time::timeout(Duration::from_secs(10), async {
        for handle in handles {
            handle.await.unwrap();
        }
    })
    .await
    .expect("Concurrent clients should not deadlock");

    // Two warm-up requests, then at most a few racing misses per own key
    let served = hits.load(Ordering::SeqCst);
    assert!(served >= 2 + 8, "served {}", served);
    assert!(served <= 2 + 8 * 10, "served {}", served);
    assert_eq!(cache.len().await, 2 + 8);
}

// == REPL Tests ==

#[tokio::test]
async fn test_repl_session_end_to_end() {
    let (base, hits) = spawn_mock_api().await;
    let client = client_for(&base, Cache::new(Duration::from_secs(60)).unwrap());
    let mut session = Session::with_rng(client, StdRng::seed_from_u64(3));

    let script = "map\nmap\nmapb\nexplore pastoria-city-area\ncatch Pidgey\ninspect pidgey\npokedex\nexit\n";
    let mut out = Vec::new();
    repl::run(&mut session, BufReader::new(script.as_bytes()), &mut out)
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("canalave-city-area\neterna-city-area\n"));
    assert!(out.contains("pastoria-city-area\nsunyshore-city-area\n"));
    assert!(out.contains("Exploring pastoria-city-area...\nFound Pokemon:\n - tentacool\n - pidgey\n"));
    assert!(out.contains("pidgey was caught!\n"));
    assert!(out.contains("Name: pidgey\nHeight: 3\nWeight: 18\n"));
    assert!(out.contains("Your Pokedex:\n - pidgey\n"));
    assert!(out.ends_with(&format!("{}\n", GOODBYE)));

    // mapb revisits the first page, which is still cached
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_repl_reports_api_errors() {
    let (base, _) = spawn_mock_api().await;
    let client = client_for(&base, Cache::new(Duration::from_secs(60)).unwrap());
    let mut session = Session::new(client);

    let mut out = Vec::new();
    repl::run(
        &mut session,
        BufReader::new("catch missingno\nexit\n".as_bytes()),
        &mut out,
    )
    .await
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("failed with status 404"));
    assert!(out.ends_with(&format!("{}\n", GOODBYE)));
}
