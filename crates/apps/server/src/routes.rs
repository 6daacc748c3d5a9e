use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use canvas::{
    apply_click, CanvasStats, ClickDraft, ClickOutcome, LocationDraft, Pixel, PixelDraft, PALETTE,
};
use foundation::GeoBounds;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;

pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

pub async fn list_pixels(State(state): State<AppState>) -> Json<Vec<Pixel>> {
    Json(state.store.all_pixels())
}

pub async fn pixels_in_bounds(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Pixel>>, ApiError> {
    let bounds = parse_bounds(&params)?;
    Ok(Json(state.store.pixels_in_bounds(bounds)))
}

fn parse_bounds(params: &HashMap<String, String>) -> Result<GeoBounds, ApiError> {
    let raw = |key: &str| {
        params
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };
    let (Some(north), Some(south), Some(east), Some(west)) =
        (raw("north"), raw("south"), raw("east"), raw("west"))
    else {
        return Err(ApiError::BadRequest("Missing bounds parameters".into()));
    };

    let num = |v: &str| v.parse::<f64>().ok().filter(|x| x.is_finite());
    match (num(north), num(south), num(east), num(west)) {
        (Some(n), Some(s), Some(e), Some(w)) => Ok(GeoBounds::new(n, s, e, w)),
        _ => Err(ApiError::BadRequest("Invalid bounds parameters".into())),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

pub async fn recent_pixels(
    State(state): State<AppState>,
    params: Result<Query<RecentParams>, QueryRejection>,
) -> Result<Json<Vec<Pixel>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let limit = params.limit.unwrap_or(state.config.recent_default_limit);
    Ok(Json(state.store.recent_pixels(limit)))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ExtentBody {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

pub async fn pixel_extent(State(state): State<AppState>) -> Json<ExtentBody> {
    let b = state.store.extent();
    Json(ExtentBody {
        north: b.north,
        south: b.south,
        east: b.east,
        west: b.west,
    })
}

pub async fn create_pixel(
    State(state): State<AppState>,
    payload: Result<Json<PixelDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Pixel>), ApiError> {
    let Json(draft) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = draft.validate()?;
    let pixel = state.store.create_pixel(new);
    debug!(id = %pixel.id, lat = pixel.latitude, lng = pixel.longitude, "pixel placed");
    Ok((StatusCode::CREATED, Json(pixel)))
}

pub async fn delete_pixel(
    State(state): State<AppState>,
    payload: Result<Json<LocationDraft>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(draft) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Some(at) = draft.position() else {
        return Err(ApiError::BadRequest("Missing latitude or longitude".into()));
    };

    if state.store.delete_pixel_at(at.lat, at.lng) {
        Ok(Json(json!({ "message": "Pixel deleted successfully" })))
    } else {
        Err(ApiError::NotFound("No pixel found at this location".into()))
    }
}

pub async fn click(
    State(state): State<AppState>,
    payload: Result<Json<ClickDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let click = draft.validate()?;
    match apply_click(&state.store, click)? {
        ClickOutcome::Placed(pixel) => Ok((
            StatusCode::CREATED,
            Json(json!({ "outcome": "placed", "pixel": pixel })),
        )
            .into_response()),
        ClickOutcome::Erased(pixel) => {
            Ok(Json(json!({ "outcome": "erased", "pixel": pixel })).into_response())
        }
        ClickOutcome::NothingToErase => Err(ApiError::NotFound(
            "No pixel found at this location".into(),
        )),
    }
}

pub async fn stats(State(state): State<AppState>) -> Json<CanvasStats> {
    Json(state.store.stats(state.config.stats_recent_limit))
}

pub async fn palette() -> Json<&'static [&'static str]> {
    let colours: &'static [&'static str] = &PALETTE;
    Json(colours)
}

pub fn log_startup(state: &AppState) {
    info!(
        pixels = state.store.pixel_count(),
        addr = %state.config.addr,
        "canvas ready"
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use canvas::{PixelStore, SAMPLE_PIXELS};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::ServerConfig;

    fn state() -> AppState {
        AppState {
            store: Arc::new(PixelStore::new()),
            config: Arc::new(ServerConfig::default()),
        }
    }

    fn draft(v: Value) -> Result<Json<PixelDraft>, JsonRejection> {
        Ok(Json(serde_json::from_value(v).unwrap()))
    }

    fn location(v: Value) -> Result<Json<LocationDraft>, JsonRejection> {
        Ok(Json(serde_json::from_value(v).unwrap()))
    }

    fn query(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
        Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    async fn place(state: &AppState, lat: f64, lng: f64, color: &str) -> Pixel {
        let (status, Json(p)) = create_pixel(
            State(state.clone()),
            draft(json!({"latitude": lat, "longitude": lng, "color": color, "brushSize": 1})),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        p
    }

    #[tokio::test]
    async fn create_then_list() {
        let s = state();
        let p = place(&s, 40.7128, -74.0060, "#ff0000").await;
        let Json(all) = list_pixels(State(s.clone())).await;
        assert_eq!(all, vec![p]);
    }

    #[tokio::test]
    async fn invalid_bodies_never_reach_the_store() {
        let s = state();
        let bodies = [
            json!({"latitude": 0, "longitude": 0, "color": "red", "brushSize": 1}),
            json!({"latitude": 0, "longitude": 0, "color": "#000000", "brushSize": 11}),
            json!({"latitude": 91, "longitude": 0, "color": "#000000", "brushSize": 1}),
        ];
        for body in bodies {
            let err = create_pixel(State(s.clone()), draft(body)).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(s.store.pixel_count(), 0);
    }

    #[tokio::test]
    async fn bounds_requires_all_four_params() {
        let s = state();
        let err = pixels_in_bounds(
            State(s.clone()),
            query(&[("north", "41"), ("south", "40"), ("east", "-73")]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Missing bounds parameters"));

        let err = pixels_in_bounds(
            State(s),
            query(&[("north", "x"), ("south", "40"), ("east", "-73"), ("west", "-75")]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn bounds_filters_pixels() {
        let s = state();
        let nyc = place(&s, 40.7128, -74.0060, "#ff0000").await;
        place(&s, 51.5074, -0.1278, "#00ff00").await;
        let Json(hits) = pixels_in_bounds(
            State(s),
            query(&[("north", "41"), ("south", "40"), ("east", "-73"), ("west", "-75")]),
        )
        .await
        .unwrap();
        assert_eq!(hits, vec![nyc]);
    }

    #[tokio::test]
    async fn delete_reports_not_found_distinctly() {
        let s = state();
        place(&s, 40.7128, -74.0060, "#ff0000").await;

        let Json(body) = delete_pixel(
            State(s.clone()),
            location(json!({"latitude": 40.7128, "longitude": -74.0060})),
        )
        .await
        .unwrap();
        assert_eq!(body, json!({"message": "Pixel deleted successfully"}));

        let err = delete_pixel(
            State(s.clone()),
            location(json!({"latitude": 40.7128, "longitude": -74.0060})),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = delete_pixel(State(s), location(json!({"latitude": 40.7128})))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn click_snaps_and_erases() {
        let s = state();
        let paint: ClickDraft = serde_json::from_value(json!({
            "latitude": 40.71281, "longitude": -74.00601, "brushSize": 1, "color": "#123456"
        }))
        .unwrap();
        let resp = click(State(s.clone()), Ok(Json(paint))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(s.store.pixel_count(), 1);

        let erase: ClickDraft = serde_json::from_value(json!({
            "latitude": 40.71282, "longitude": -74.00602, "brushSize": 1, "mode": "erase"
        }))
        .unwrap();
        let resp = click(State(s.clone()), Ok(Json(erase.clone())))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(s.store.pixel_count(), 0);

        let err = click(State(s), Ok(Json(erase))).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn stats_on_seeded_store() {
        let s = AppState {
            store: Arc::new(PixelStore::seeded()),
            config: Arc::new(ServerConfig::default()),
        };
        let Json(st) = stats(State(s)).await;
        assert_eq!(st.total_pixels, SAMPLE_PIXELS.len());
        assert_eq!(st.recent_pixels.len(), 5);
        assert_eq!(st.contributors, 100);
        // Rio de Janeiro was seeded last.
        assert_eq!(st.recent_pixels[0].latitude, -22.9068);
    }

    #[tokio::test]
    async fn recent_uses_default_limit() {
        let s = AppState {
            store: Arc::new(PixelStore::seeded()),
            config: Arc::new(ServerConfig::default()),
        };
        let Json(all) = recent_pixels(State(s.clone()), Ok(Query(RecentParams { limit: None })))
            .await
            .unwrap();
        assert_eq!(all.len(), SAMPLE_PIXELS.len());
        let Json(two) = recent_pixels(State(s), Ok(Query(RecentParams { limit: Some(2) })))
            .await
            .unwrap();
        assert_eq!(two.len(), 2);
    }

    #[tokio::test]
    async fn malformed_recent_limit_is_a_json_bad_request() {
        let uri: axum::http::Uri = "/api/pixels/recent?limit=-1".parse().unwrap();
        let params = Query::<RecentParams>::try_from_uri(&uri);
        assert!(params.is_err());

        let err = recent_pixels(State(state()), params).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn extent_of_empty_canvas_is_world() {
        let Json(body) = pixel_extent(State(state())).await;
        assert_eq!(
            body,
            ExtentBody {
                north: 90.0,
                south: -90.0,
                east: 180.0,
                west: -180.0
            }
        );
    }

    #[tokio::test]
    async fn palette_lists_colours() {
        let Json(colours) = palette().await;
        assert_eq!(colours.len(), 17);
        assert_eq!(colours[0], "#ff0000");
    }
}
