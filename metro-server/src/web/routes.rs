//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::StationId;
use crate::network::Network;
use crate::planner::{
    NarrationError, PathOutcome, SolverError, connected_components, is_connected,
    minimum_spanning_forest, minimum_spanning_tree, narrate, shortest_path_between,
};

use super::dto::*;
use super::state::{AppState, ReloadError};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/network", get(network_summary))
        .route("/network/spanning-tree", get(spanning_tree))
        .route("/network/reload", post(reload_network))
        .route("/journey/plan", post(plan_journey))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All station names with their node ids.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let network = state.network.snapshot().await;
    Json(StationsResponse::from_network(&network))
}

/// Size, connectivity and lines of the loaded network.
async fn network_summary(State(state): State<AppState>) -> Json<NetworkSummary> {
    let network = state.network.snapshot().await;

    let lines = network
        .termini()
        .iter()
        .map(|(line, termini)| LineSummary {
            line: line.to_string(),
            termini: termini.to_vec(),
        })
        .collect();

    Json(NetworkSummary {
        stations: network.station_count(),
        edges: network.edge_count(),
        bridges: network.bridge_count(),
        connected: is_connected(&network),
        components: connected_components(&network).len(),
        lines,
    })
}

/// Plan the fastest journey between two station names.
async fn plan_journey(
    State(state): State<AppState>,
    Json(req): Json<PlanJourneyRequest>,
) -> Result<Json<PlanJourneyResponse>, AppError> {
    let network = state.network.snapshot().await;

    let from = resolve_station(&network, &req.from)?;
    let to = resolve_station(&network, &req.to)?;

    let route = match shortest_path_between(&network, &from, &to)? {
        PathOutcome::Found(route) => route,
        PathOutcome::NoPathFound => {
            return Err(AppError::NotFound {
                message: format!("no path found between {} and {}", req.from, req.to),
            });
        }
    };

    let narration = narrate(&network, &route.stations)?;

    let path = route
        .stations
        .iter()
        .filter_map(|&id| network.station(id))
        .map(PathStop::from_station)
        .collect();

    Ok(Json(PlanJourneyResponse {
        duration_minutes: route.distance,
        duration: route.travel_time().to_string(),
        path,
        instructions: narration.lines(),
        warnings: narration.warnings.iter().map(ToString::to_string).collect(),
    }))
}

/// Minimum spanning tree (Prim) or forest (Kruskal).
async fn spanning_tree(
    State(state): State<AppState>,
    Query(query): Query<SpanningTreeQuery>,
) -> Result<Json<SpanningTreeResponse>, AppError> {
    let network = state.network.snapshot().await;

    let response = match query.algorithm {
        SpanningAlgorithm::Prim => {
            let tree = minimum_spanning_tree(&network).ok_or_else(|| AppError::NotFound {
                message: "network has no stations".to_string(),
            })?;
            SpanningTreeResponse::from_tree(&tree)
        }
        SpanningAlgorithm::Kruskal => SpanningTreeResponse::from_forest(
            &minimum_spanning_forest(&network),
            network.station_count(),
        ),
    };

    Ok(Json(response))
}

/// Rebuild the network from its data files.
async fn reload_network(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let network = state.reload().await?;

    info!(
        stations = network.station_count(),
        edges = network.edge_count(),
        "Network reloaded"
    );

    Ok(Json(ReloadResponse {
        stations: network.station_count(),
        edges: network.edge_count(),
        bridges: network.bridge_count(),
    }))
}

/// Every node carrying a station name; interchanges have one per line.
fn resolve_station(network: &Network, name: &str) -> Result<Vec<StationId>, AppError> {
    let ids = network.stations_named(name);
    if ids.is_empty() {
        return Err(AppError::NotFound {
            message: format!("unknown station: {name}"),
        });
    }
    Ok(ids)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SolverError> for AppError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::UnknownStation(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            SolverError::NegativeCycleDetected => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<NarrationError> for AppError {
    fn from(e: NarrationError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<ReloadError> for AppError {
    fn from(e: ReloadError) -> Self {
        AppError::Internal {
            message: e.to_string(),
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

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, Station};
    use crate::network::{NetworkBuilder, NetworkConfig};
    use std::io::Write;

    fn line(s: &str) -> LineId {
        LineId::parse(s).unwrap()
    }

    /// A - B on L1, B' (interchange) - C - Z on L2, and an isolated I.
    fn state() -> AppState {
        let network = NetworkBuilder::new()
            .station(Station::new(StationId(1), "A", line("L1")).terminus())
            .station(Station::new(StationId(2), "B", line("L1")).terminus())
            .station(Station::new(StationId(3), "B", line("L2")).terminus())
            .station(Station::new(StationId(4), "C", line("L2")))
            .station(Station::new(StationId(5), "Z", line("L2")).terminus())
            .station(Station::new(StationId(6), "I", line("L3")))
            .edge(1, 2, 60.0)
            .edge(2, 3, 30.0)
            .edge(3, 4, 90.0)
            .edge(4, 5, 60.0)
            .build()
            .unwrap();
        AppState::new(network, NetworkConfig::default())
    }

    fn plan(from: &str, to: &str) -> Json<PlanJourneyRequest> {
        Json(PlanJourneyRequest {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    #[tokio::test]
    async fn plans_journey_with_change() {
        let Json(resp) = plan_journey(State(state()), plan("A", "C")).await.unwrap();

        assert_eq!(resp.duration_minutes, 3.0);
        assert_eq!(resp.duration, "3 min 0 sec");
        let ids: Vec<_> = resp.path.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(
            resp.instructions,
            vec![
                "At A, board line L1 toward B.",
                "At B, change and board line L2 toward Z.",
                "Alight at C.",
            ]
        );
        assert!(resp.warnings.is_empty());
    }

    #[tokio::test]
    async fn journey_from_interchange_boards_the_right_line() {
        let Json(resp) = plan_journey(State(state()), plan("B", "C")).await.unwrap();

        assert_eq!(resp.duration_minutes, 1.5);
        assert_eq!(resp.duration, "1 min 30 sec");
        let ids: Vec<_> = resp.path.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(
            resp.instructions,
            vec!["At B, board line L2 toward Z.", "Alight at C."]
        );
    }

    #[tokio::test]
    async fn journey_to_interchange_stops_before_transfer() {
        let Json(resp) = plan_journey(State(state()), plan("A", "B")).await.unwrap();

        assert_eq!(resp.duration_minutes, 1.0);
        let ids: Vec<_> = resp.path.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(
            resp.instructions,
            vec!["At A, board line L1 toward B.", "Alight at B."]
        );
    }

    #[tokio::test]
    async fn interchange_to_itself_is_already_there() {
        let Json(resp) = plan_journey(State(state()), plan("B", "B")).await.unwrap();

        assert_eq!(resp.duration_minutes, 0.0);
        assert_eq!(resp.instructions, vec!["You are already at B."]);
    }

    #[tokio::test]
    async fn same_station_is_already_there() {
        let Json(resp) = plan_journey(State(state()), plan("C", "C")).await.unwrap();

        assert_eq!(resp.duration_minutes, 0.0);
        assert_eq!(resp.instructions, vec!["You are already at C."]);
    }

    #[tokio::test]
    async fn unknown_and_unreachable_stations_are_not_found() {
        let err = plan_journey(State(state()), plan("A", "Nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref message } if message.contains("Nowhere")));

        let err = plan_journey(State(state()), plan("A", "I")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref message } if message.contains("no path")));
    }

    #[tokio::test]
    async fn summary_reports_disconnection() {
        let Json(summary) = network_summary(State(state())).await;

        assert_eq!(summary.stations, 6);
        assert_eq!(summary.edges, 4);
        assert!(!summary.connected);
        assert_eq!(summary.components, 2);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].termini, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn stations_are_listed_once_per_name() {
        let Json(resp) = list_stations(State(state())).await;

        let names: Vec<_> = resp.stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "I", "Z"]);
        assert_eq!(resp.stations[1].ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn spanning_tree_algorithms() {
        let Json(prim) = spanning_tree(
            State(state()),
            Query(SpanningTreeQuery {
                algorithm: SpanningAlgorithm::Prim,
            }),
        )
        .await
        .unwrap();
        assert_eq!(prim.stations, 5);
        assert_eq!(prim.edges.len(), 4);
        assert_eq!(prim.total_weight, 4.0);

        let Json(kruskal) = spanning_tree(
            State(state()),
            Query(SpanningTreeQuery {
                algorithm: SpanningAlgorithm::Kruskal,
            }),
        )
        .await
        .unwrap();
        assert_eq!(kruskal.stations, 6);
        assert_eq!(kruskal.total_weight, 4.0);
    }

    #[tokio::test]
    async fn reload_swaps_network() {
        let mut stations = tempfile::NamedTempFile::new().unwrap();
        stations
            .write_all(b"AAA 1 A 1;True 0\nBBB 2 B 1;True 1\n")
            .unwrap();
        let mut edges = tempfile::NamedTempFile::new().unwrap();
        edges.write_all(b"E 1 2 60\n").unwrap();

        let state = AppState::new(
            Network::default(),
            NetworkConfig::new(stations.path(), edges.path()),
        );
        let Json(resp) = reload_network(State(state.clone())).await.unwrap();

        assert_eq!(resp.stations, 2);
        assert_eq!(resp.edges, 1);
        assert_eq!(state.network.snapshot().await.station_count(), 2);
    }

    #[test]
    fn error_status_codes() {
        let resp = AppError::NotFound {
            message: "x".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::from(SolverError::NegativeCycleDetected).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = AppError::from(SolverError::UnknownStation(StationId(1))).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
