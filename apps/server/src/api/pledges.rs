use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{CatalogResponse, RecentQuery, StatsResponse, SubmitPledgeResponse},
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pledgewall_core::{NewPledge, PublicPledge};

async fn submit_pledge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPledge>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmitPledgeResponse>)> {
    let Json(new_pledge) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let pledge = state.pledge_service.submit_pledge(new_pledge).await?;
    tracing::info!("Pledge #{} recorded", pledge.pledge_number);
    Ok((StatusCode::CREATED, Json(SubmitPledgeResponse::from(pledge))))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsResponse>> {
    let stats = state.pledge_service.fetch_stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}

async fn get_recent_pledges(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PublicPledge>>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let pledges = state
        .pledge_service
        .fetch_recent_pledges(query.limit())
        .await?;
    Ok(Json(pledges))
}

async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from(&state.catalog))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pledges", post(submit_pledge))
        .route("/pledges/stats", get(get_stats))
        .route("/pledges/recent", get(get_recent_pledges))
        .route("/pledges/catalog", get(get_catalog))
}
