//! Product creation on the inventory backend.

use gloo_net::http::Request;

use crate::types::{AppError, AppResult, CreateProductPayload};

pub fn products_url(api_url: &str) -> String {
    format!("{}/products", api_url.trim_end_matches('/'))
}

/// POST the payload to `{api_url}/products`. Any 2xx counts as saved.
pub async fn create_product(payload: &CreateProductPayload, api_url: &str) -> AppResult<()> {
    let request = Request::post(&products_url(api_url))
        .json(payload)
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    if !response.ok() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Server {
            status: response.status(),
            message,
        });
    }

    log::info!(
        "✅ Product {} saved ({} attributes)",
        payload.scanned_id,
        payload.attributes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_url() {
        assert_eq!(
            products_url("http://localhost:8080/api/v1"),
            "http://localhost:8080/api/v1/products"
        );
        assert_eq!(products_url("https://erp.example/"), "https://erp.example/products");
    }
}
