use actix_web::{HttpResponse, get, http::header::ContentType, web};

use crate::database::ResultStore;
use crate::web::error::ServiceError;
use crate::web::history::{self, DAILY_SUMMARY_DAYS, DEFAULT_HISTORY_LIMIT};

macros_utils::routes! {
    route summary_route,
    route status_route,
    route daily_route,
}

/// Recent results as an HTML page
#[get("/")]
pub async fn summary_route(store: web::Data<dyn ResultStore>) -> Result<HttpResponse, ServiceError> {
    let page = history::get_summary(store.get_ref(), DEFAULT_HISTORY_LIMIT).await?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(page))
}

/// Recent results as JSON, newest first
#[get("/status")]
pub async fn status_route(store: web::Data<dyn ResultStore>) -> Result<HttpResponse, ServiceError> {
    let results = history::get_status(store.get_ref(), DEFAULT_HISTORY_LIMIT).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/daily")]
pub async fn daily_route(store: web::Data<dyn ResultStore>) -> Result<HttpResponse, ServiceError> {
    let daily = history::get_daily(store.get_ref(), DAILY_SUMMARY_DAYS).await?;
    Ok(HttpResponse::Ok().json(daily))
}
