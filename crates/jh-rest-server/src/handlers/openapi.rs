//! OpenAPI specification endpoint

use crate::ServerResult;
use axum::response::Json;

/// Component schemas of the REST contract
pub async fn openapi_spec() -> ServerResult<Json<utoipa::openapi::OpenApi>> {
    let mut spec = jh_api_contract::openapi_schema();
    spec.info.version = env!("CARGO_PKG_VERSION").to_string();
    Ok(Json(spec))
}
