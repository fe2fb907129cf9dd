use axum::Json;
use axum::extract::State;
use quotes_core::statistics::StatisticsReport;

use crate::error::ApiError;
use crate::AppState;

pub async fn report(State(state): State<AppState>) -> Result<Json<StatisticsReport>, ApiError> {
    Ok(Json(state.catalog.statistics().await?))
}
