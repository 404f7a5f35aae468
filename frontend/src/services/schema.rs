//! Form schema provider.
//!
//! Returns the field list for a product type, either from the bundled
//! mock schemas (after a simulated network delay) or from the backend.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use crate::config::{SchemaSource, API_URL, SCHEMA_LATENCY_MS, SCHEMA_SOURCE};
use crate::types::{validate_schema, AppError, AppResult, FieldOption, FormField, ProductType};

/// Schema service bound to one source.
#[derive(Clone, Debug)]
pub struct SchemaService {
    source: SchemaSource,
    base_url: String,
}

impl Default for SchemaService {
    fn default() -> Self {
        Self::new(SCHEMA_SOURCE, API_URL)
    }
}

impl SchemaService {
    pub fn new(source: SchemaSource, base_url: &str) -> Self {
        Self {
            source,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the schema for `product_type`.
    pub async fn fetch(&self, product_type: ProductType) -> AppResult<Vec<FormField>> {
        log::info!("📋 Fetching form schema for: {}", product_type.as_str());

        match self.source {
            SchemaSource::Mock => {
                TimeoutFuture::new(SCHEMA_LATENCY_MS).await;
                Ok(mock_schema(product_type))
            }
            SchemaSource::Remote => self.fetch_remote(product_type).await,
        }
    }

    pub fn schema_url(&self, product_type: ProductType) -> String {
        format!("{}/inventory/schemas/{}", self.base_url, product_type.as_str())
    }

    async fn fetch_remote(&self, product_type: ProductType) -> AppResult<Vec<FormField>> {
        let response = Request::get(&self.schema_url(product_type))
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

        let schema = response
            .json::<Vec<FormField>>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))?;

        validate_schema(&schema)?;
        Ok(schema)
    }
}

/// Bundled schema for each product type.
pub fn mock_schema(product_type: ProductType) -> Vec<FormField> {
    match product_type {
        ProductType::LooseGemstone => vec![
            FormField::number("carat", "Carat Weight", true),
            FormField::select("color", "Color", true, options(&[
                ("D", "D"),
                ("E", "E"),
                ("F", "F"),
                ("G", "G"),
            ])),
            FormField::select("clarity", "Clarity", true, options(&[
                ("IF", "Internally Flawless (IF)"),
                ("VVS1", "VVS1"),
                ("VVS2", "VVS2"),
                ("VS1", "VS1"),
            ])),
            FormField::text("origin", "Origin", false),
        ],
        ProductType::FinishedJewelry => vec![
            FormField::select("metal_type", "Metal Type", true, options(&[
                ("GOLD", "Gold"),
                ("SILVER", "Silver"),
                ("PLATINUM", "Platinum"),
            ])),
            FormField::number("gross_weight", "Gross Weight (grams)", true),
            FormField::number("main_stone_carat", "Main Stone Carat", true),
        ],
        ProductType::IdolCarving => vec![
            FormField::text("deity", "Deity", true),
            FormField::select("material", "Material", true, options(&[
                ("MARBLE", "Marble"),
                ("BRONZE", "Bronze"),
                ("WOOD", "Wood"),
                ("JADE", "Jade"),
            ])),
            FormField::number("height_cm", "Height (cm)", false),
            FormField::media("photo", "Photo", false),
        ],
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(value, label)| FieldOption::new(*value, *label))
        .collect()
}
