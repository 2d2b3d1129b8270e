use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sales_method_dashboard::api::{self, DashboardResponse};
use sales_method_dashboard::data::load_dataset;
use sales_method_dashboard::models::{QueryWarning, SalesMethod};
use sales_method_dashboard::service::{DashboardService, FilterOptions};
use std::sync::Arc;
use tower::ServiceExt;

const SAMPLE_CSV: &str = "\
Retailer,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin,Sales Method
Walmart,New York,Men's Street Footwear,2021-01-15,100,50,0.5,Online
Walmart,New York,Men's Street Footwear,2021-01-20,50,10,0.2,Outlet
Amazon,Texas,Women's Apparel,2021-02-10,200,60,0.3,Online
";

fn app() -> axum::Router {
    let dataset = load_dataset(SAMPLE_CSV.as_bytes()).unwrap();
    api::router(Arc::new(DashboardService::new(Arc::new(dataset))))
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn post_dashboard(body: serde_json::Value) -> (StatusCode, DashboardResponse) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/dashboard")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let parsed: DashboardResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    (status, parsed)
}

#[tokio::test]
async fn health_check_returns_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn filter_options_list_sorted_values() {
    let response = app()
        .oneshot(Request::builder().uri("/api/filters").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let options: FilterOptions = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(options.regions, vec!["New York", "Texas"]);
    assert_eq!(options.retailers, vec!["Amazon", "Walmart"]);
    assert_eq!(options.channels, vec!["Online", "Outlet"]);
    assert_eq!(
        options.date_bounds,
        Some((
            NaiveDate::from_ymd_opt(2021, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 10).unwrap()
        ))
    );
}

#[tokio::test]
async fn empty_request_uses_default_selection() {
    let (status, response) = post_dashboard(serde_json::json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.success);

    let snapshot = response.snapshot.unwrap();
    assert_eq!(snapshot.row_count, 3);
    assert_eq!(snapshot.kpis.total_sales, BigDecimal::from(350));
    assert_eq!(snapshot.kpis.total_profit, BigDecimal::from(120));
    assert_eq!(snapshot.sales_by_channel.len(), 2);
    assert_eq!(snapshot.monthly_sales_by_channel.len(), 3);
}

#[tokio::test]
async fn region_and_channel_narrow_the_snapshot() {
    let (status, response) = post_dashboard(serde_json::json!({
        "region": "New York",
        "channels": ["outlet"],
    }))
    .await;
    assert_eq!(status, StatusCode::OK);

    let snapshot = response.snapshot.unwrap();
    assert_eq!(snapshot.row_count, 1);
    assert_eq!(snapshot.kpis.total_sales, BigDecimal::from(50));
    assert_eq!(snapshot.sales_by_channel[0].channel, SalesMethod::Outlet);
}

#[tokio::test]
async fn empty_selection_reports_undefined_margin() {
    let (status, response) = post_dashboard(serde_json::json!({ "retailers": [] })).await;
    assert_eq!(status, StatusCode::OK);

    let snapshot = response.snapshot.unwrap();
    assert_eq!(snapshot.row_count, 0);
    assert_eq!(snapshot.kpis.average_margin, None);
    assert_eq!(snapshot.warnings, vec![QueryWarning::EmptyResult]);
}

#[tokio::test]
async fn inverted_dates_are_not_an_error() {
    let (status, response) = post_dashboard(serde_json::json!({
        "start": "2021-02-28",
        "end": "2021-01-01",
    }))
    .await;
    assert_eq!(status, StatusCode::OK);

    let snapshot = response.snapshot.unwrap();
    assert_eq!(snapshot.row_count, 0);
    assert!(snapshot.warnings.contains(&QueryWarning::InvertedInterval));
}

#[tokio::test]
async fn unknown_channel_is_a_bad_request() {
    let (status, response) = post_dashboard(serde_json::json!({ "channels": ["Catalog"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!response.success);
    assert!(response.snapshot.is_none());
}
