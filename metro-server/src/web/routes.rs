//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{Coordinate, LineId};
use crate::network::{LoadError, TransitGraph};
use crate::planner::{Planner, RouteError};
use crate::stations::{Resolution, StationResolver};

use super::dto::*;
use super::state::AppState;

/// Default number of results for search-style endpoints.
const DEFAULT_LIMIT: usize = 10;

/// Upper bound on requested result counts.
const MAX_LIMIT: usize = 50;

/// Default radius for nearby station search.
const DEFAULT_RADIUS_KM: f64 = 1.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/resolve", get(resolve_station))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/autocomplete", get(autocomplete_stations))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/stations/:name", get(station_info))
        .route("/api/lines", get(list_lines))
        .route("/api/lines/:id", get(line_info))
        .route("/api/route", post(plan_route))
        .route("/api/reachability", get(reachability))
        .route("/api/network/reload", post(reload_network))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn limit(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

fn resolver<'g>(state: &AppState, graph: &'g TransitGraph) -> StationResolver<'g> {
    StationResolver::with_config(graph, state.resolver.as_ref().clone())
}

/// Resolve free text to a station, or fail with 404.
///
/// Fuzzy suggestions are accepted; the returned [`ResolveResponse`] says
/// whether one was used.
fn require_station(
    names: &StationResolver<'_>,
    raw: &str,
) -> Result<(String, ResolveResponse), AppError> {
    let resolution = names.resolve(raw);
    let response = ResolveResponse::from_resolution(raw, &resolution);
    match resolution {
        Resolution::Exact(name) | Resolution::Suggestion(name) => Ok((name, response)),
        Resolution::NoMatch => Err(AppError::NotFound {
            message: format!("Unknown station: {raw}"),
        }),
    }
}

/// Resolve a typed station name.
async fn resolve_station(
    State(state): State<AppState>,
    Query(req): Query<StationQuery>,
) -> Json<ResolveResponse> {
    let graph = state.network.snapshot();
    let resolution = resolver(&state, &graph).resolve(&req.q);
    Json(ResolveResponse::from_resolution(&req.q, &resolution))
}

/// Fuzzy search over station names.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationQuery>,
) -> Json<StationSearchResponse> {
    let graph = state.network.snapshot();
    let stations = resolver(&state, &graph)
        .suggestions(&req.q, limit(req.limit))
        .into_iter()
        .map(StationMatchResult::from)
        .collect();

    Json(StationSearchResponse { stations })
}

/// Complete a partially typed station name.
async fn autocomplete_stations(
    State(state): State<AppState>,
    Query(req): Query<StationQuery>,
) -> Json<AutocompleteResponse> {
    let graph = state.network.snapshot();
    let suggestions = resolver(&state, &graph).autocomplete(&req.q, limit(req.limit));

    Json(AutocompleteResponse { suggestions })
}

/// Stations with known locations near a point.
async fn nearby_stations(
    State(state): State<AppState>,
    Query(req): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, AppError> {
    let point = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let radius = req.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius.is_finite() || radius < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {radius}"),
        });
    }

    let graph = state.network.snapshot();
    let stations = graph
        .nearby(point, radius)
        .into_iter()
        .take(limit(req.limit))
        .map(|(distance_km, station)| NearbyResult {
            name: station.name().to_string(),
            distance_km,
            lines: station.lines().iter().map(|l| l.to_string()).collect(),
        })
        .collect();

    Ok(Json(NearbyResponse { stations }))
}

/// Details of one station, looked up by exact or case-insensitive name.
async fn station_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StationInfo>, AppError> {
    let graph = state.network.snapshot();
    match resolver(&state, &graph).resolve(&name) {
        Resolution::Exact(canonical) => {
            let station = graph.station(&canonical).ok_or_else(|| AppError::Internal {
                message: format!("Resolved station missing from graph: {canonical}"),
            })?;
            Ok(Json(StationInfo::from_station(&graph, station)))
        }
        Resolution::Suggestion(suggestion) => Err(AppError::NotFound {
            message: format!("Unknown station: {name} (did you mean {suggestion}?)"),
        }),
        Resolution::NoMatch => Err(AppError::NotFound {
            message: format!("Unknown station: {name}"),
        }),
    }
}

/// All lines, sorted by id.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let graph = state.network.snapshot();
    let lines = graph.lines().map(LineSummary::from_line).collect();
    Json(LinesResponse { lines })
}

/// One line with its stations.
async fn line_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LineDetail>, AppError> {
    let line_id = LineId::parse(&id).map_err(|e| AppError::BadRequest {
        message: format!("Invalid line id {id:?}: {e}"),
    })?;
    let graph = state.network.snapshot();
    let line = graph.line(&line_id).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown line: {line_id}"),
    })?;

    Ok(Json(LineDetail::from_line(line)))
}

/// Plan a route between two typed station names.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<PlanRouteRequest>,
) -> Result<Json<PlanRouteResponse>, AppError> {
    let graph = state.network.snapshot();
    let names = resolver(&state, &graph);
    let (from, from_resolution) = require_station(&names, &req.from)?;
    let (to, to_resolution) = require_station(&names, &req.to)?;

    let planner = Planner::new(&graph, &state.planner);
    let route = planner.plan(&from, &to, req.mode)?;
    let alternates = planner.alternates(&route)?;

    Ok(Json(PlanRouteResponse {
        from: from_resolution,
        to: to_resolution,
        mode: req.mode,
        route: RouteResult::from_route(&route),
        alternates: alternates.iter().map(RouteResult::from_route).collect(),
    }))
}

/// Whether two stations are connected.
async fn reachability(
    State(state): State<AppState>,
    Query(req): Query<ReachabilityQuery>,
) -> Result<Json<ReachabilityResponse>, AppError> {
    let graph = state.network.snapshot();
    let names = resolver(&state, &graph);
    let (from, _) = require_station(&names, &req.from)?;
    let (to, _) = require_station(&names, &req.to)?;

    Ok(Json(ReachabilityResponse {
        reachable: graph.is_reachable(&from, &to),
        nearest_common_station: graph
            .find_nearest_common_station(&from, &to)
            .map(str::to_string),
        direct_lines: graph
            .common_lines(&from, &to)
            .into_iter()
            .map(|l| l.id().to_string())
            .collect(),
        from,
        to,
    }))
}

/// Re-read the network definition file and swap in the new graph.
async fn reload_network(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let stations = Arc::clone(&state.network).reload_blocking().await?;
    info!(stations, "Network reloaded via API");
    Ok(Json(ReloadResponse { stations }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::UnknownStation(_) | RouteError::Unreachable { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::NoSource => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::network::{NetworkDefinition, NetworkHandle, build_graph};
    use crate::planner::{PlannerConfig, RouteMode};
    use crate::stations::ResolverConfig;

    fn definition() -> NetworkDefinition {
        NetworkDefinition::new()
            .with_line(
                "Yellow Line",
                &["Kashmere Gate", "Chandni Chowk", "New Delhi", "Rajiv Chowk", "Patel Chowk"],
            )
            .with_line("blue", &["Karol Bagh", "Rajiv Chowk", "Barakhamba Road", "Mandi House"])
            .with_line("violet", &["Kashmere Gate", "Mandi House"])
            .with_line("grey", &["Dwarka", "Nangli"])
            .with_coordinate("Rajiv Chowk", 28.6328, 77.2197)
            .with_coordinate("New Delhi", 28.6430, 77.2223)
            .with_coordinate("Patel Chowk", 28.6229, 77.2141)
    }

    fn state() -> AppState {
        let graph = build_graph(&definition()).unwrap();
        AppState::new(
            NetworkHandle::new(graph),
            PlannerConfig::default(),
            ResolverConfig::default(),
        )
    }

    fn query(q: &str) -> Query<StationQuery> {
        Query(StationQuery {
            q: q.to_string(),
            limit: None,
        })
    }

    fn route_request(from: &str, to: &str, mode: RouteMode) -> Json<PlanRouteRequest> {
        Json(PlanRouteRequest {
            from: from.to_string(),
            to: to.to_string(),
            mode,
        })
    }

    #[test]
    fn router_builds() {
        let _router = create_router(state());
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn resolve_exact_and_suggested() {
        let Json(exact) = resolve_station(State(state()), query("rajiv   chowk")).await;
        assert!(exact.matched);
        assert_eq!(exact.canonical_name.as_deref(), Some("Rajiv Chowk"));
        assert!(!exact.was_suggestion);

        let Json(suggested) = resolve_station(State(state()), query("rajeev chok")).await;
        assert_eq!(suggested.canonical_name.as_deref(), Some("Rajiv Chowk"));
        assert!(suggested.was_suggestion);

        let Json(none) = resolve_station(State(state()), query("Mars Station")).await;
        assert!(!none.matched);
        assert_eq!(none.canonical_name, None);
    }

    #[tokio::test]
    async fn search_and_autocomplete() {
        let Json(found) = search_stations(State(state()), query("chandi chawk")).await;
        assert_eq!(found.stations[0].name, "Chandni Chowk");

        let Json(completed) = autocomplete_stations(State(state()), query("kash")).await;
        assert_eq!(completed.suggestions, vec!["Kashmere Gate"]);
    }

    #[tokio::test]
    async fn nearby_sorted_and_validated() {
        let req = NearbyQuery {
            lat: 28.6328,
            lon: 77.2197,
            radius_km: Some(1.5),
            limit: None,
        };
        let Json(near) = nearby_stations(State(state()), Query(req)).await.unwrap();
        let names: Vec<&str> = near.stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rajiv Chowk", "New Delhi", "Patel Chowk"]);
        assert_eq!(near.stations[0].lines, vec!["blue", "yellow"]);

        let bad = NearbyQuery {
            lat: 95.0,
            lon: 0.0,
            radius_km: None,
            limit: None,
        };
        let err = nearby_stations(State(state()), Query(bad)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn station_info_by_name() {
        let Json(info) = station_info(State(state()), Path("rajiv chowk".into()))
            .await
            .unwrap();
        assert_eq!(info.name, "Rajiv Chowk");
        assert!(info.is_interchange);

        let err = station_info(State(state()), Path("rajeev chok".into()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::NotFound { message } if message.contains("did you mean Rajiv Chowk")
        ));
    }

    #[tokio::test]
    async fn lines_listed_and_looked_up() {
        let Json(all) = list_lines(State(state())).await;
        let ids: Vec<&str> = all.lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["blue", "grey", "violet", "yellow"]);

        let Json(yellow) = line_info(State(state()), Path("Yellow Line".into()))
            .await
            .unwrap();
        assert_eq!(yellow.name, "Yellow Line");
        assert_eq!(yellow.stations.len(), 5);

        let missing = line_info(State(state()), Path("pink".into())).await.unwrap_err();
        assert!(matches!(missing, AppError::NotFound { .. }));
        let invalid = line_info(State(state()), Path("???".into())).await.unwrap_err();
        assert!(matches!(invalid, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn plan_route_with_interchange() {
        let Json(plan) = plan_route(
            State(state()),
            route_request("new dehli", "barakhamba road", RouteMode::FewestHops),
        )
        .await
        .unwrap();

        assert!(plan.from.was_suggestion);
        assert_eq!(plan.from.canonical_name.as_deref(), Some("New Delhi"));
        assert_eq!(plan.route.stations, vec!["New Delhi", "Rajiv Chowk", "Barakhamba Road"]);
        assert_eq!(plan.route.interchanges.len(), 1);
        assert_eq!(
            plan.route.interchanges[0].instruction,
            "At Rajiv Chowk, change from Yellow Line to Blue Line"
        );
        assert_eq!(plan.route.fare, 10);
        assert_eq!(plan.route.estimated_minutes, 3.0);
        assert!(!plan.alternates.is_empty());
        assert!(
            plan.alternates
                .iter()
                .all(|alt| alt.station_count >= plan.route.station_count)
        );
    }

    #[tokio::test]
    async fn plan_route_errors() {
        let err = plan_route(
            State(state()),
            route_request("Mars Station", "Rajiv Chowk", RouteMode::FewestHops),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = plan_route(
            State(state()),
            route_request("Dwarka", "Rajiv Chowk", RouteMode::ShortestDistance),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound { message } if message.starts_with("no route")));
    }

    #[tokio::test]
    async fn reachability_between_stations() {
        let req = ReachabilityQuery {
            from: "karol bagh".into(),
            to: "kashmere gate".into(),
        };
        let Json(res) = reachability(State(state()), Query(req)).await.unwrap();
        assert!(res.reachable);
        assert!(res.direct_lines.is_empty());
        assert!(res.nearest_common_station.is_some());

        let req = ReachabilityQuery {
            from: "Dwarka".into(),
            to: "Rajiv Chowk".into(),
        };
        let Json(res) = reachability(State(state()), Query(req)).await.unwrap();
        assert!(!res.reachable);
        assert_eq!(res.nearest_common_station, None);
    }

    #[tokio::test]
    async fn reload_requires_a_source_file() {
        let err = reload_network(State(state())).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"lines": [{{"id": "red", "stations": ["A1", "A2", "A3"]}}]}}"#).unwrap();
        let network = NetworkHandle::from_file(file.path()).unwrap();
        let state = AppState::new(network, PlannerConfig::default(), ResolverConfig::default());

        let Json(res) = reload_network(State(state)).await.unwrap();
        assert_eq!(res.stations, 3);
    }

    #[test]
    fn route_errors_map_to_status() {
        let not_found: AppError = RouteError::UnknownStation("X".into()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let internal: AppError = RouteError::EmptyPath.into();
        assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bad: AppError = LoadError::NoSource.into();
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
