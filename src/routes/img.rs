use std::time::Duration;

use actix_web::{web, HttpResponse, Responder};
use reqwest::header::CONTENT_TYPE;
use serde_json::json;
use url::Url;

/*
    /img?url=https://...

    Proxy for provider-hosted images so the frontend never mixes origins.
    Only plain http(s) targets are fetched.
*/

#[derive(serde::Deserialize)]
pub struct QueryParams {
    url: String,
}

pub async fn proxy_image(params: web::Query<QueryParams>) -> impl Responder {
    let target = match Url::parse(&params.url) {
        Ok(url) => url,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": "url is not valid" }))
        }
    };
    if target.scheme() != "http" && target.scheme() != "https" {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "url must be http or https" }));
    }

    let client = reqwest::Client::new();
    let response = match client
        .get(target)
        .timeout(Duration::from_secs(20))
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            eprintln!("Image fetch failed for {}: {}", params.url, err);
            return HttpResponse::BadGateway().json(json!({ "error": "upstream fetch failed" }));
        }
    };

    if !response.status().is_success() {
        eprintln!(
            "Image upstream returned {} for {}",
            response.status(),
            params.url
        );
        return HttpResponse::BadGateway().json(json!({ "error": "upstream fetch failed" }));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    match response.bytes().await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(content_type)
            .body(bytes.to_vec()),
        Err(err) => {
            eprintln!("Image body read failed for {}: {}", params.url, err);
            HttpResponse::BadGateway().json(json!({ "error": "upstream fetch failed" }))
        }
    }
}
