use axum::Json;
use axum::extract::{Path, Query};
use lanewright_core::AppError;
use lanewright_domain::{AutomationTemplate, find_template};

use crate::dto::{RuleCategoryQuery, TemplateCatalogResponse};
use crate::error::ApiResult;

pub async fn template_catalog_handler(
    Query(query): Query<RuleCategoryQuery>,
) -> Json<TemplateCatalogResponse> {
    Json(TemplateCatalogResponse::from(query.category()))
}

pub async fn template_handler(
    Path(template_id): Path<String>,
) -> ApiResult<Json<&'static AutomationTemplate>> {
    let template = find_template(template_id.as_str())
        .ok_or_else(|| AppError::NotFound(format!("template '{template_id}' not found")))?;

    Ok(Json(template))
}
