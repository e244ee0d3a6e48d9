// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product search through an external catalogue API.
//!
//! The free-form query is first reduced to a search term by the completion
//! service, then sent as the `q` parameter of a GET. Upstream records are
//! loosely typed: every field but the identifier may be missing or carry an
//! unexpected JSON type, and either way it is defaulted. Only a record that is
//! not an object is skipped.

use std::sync::Arc;
use std::time::Duration;

use sairen_config::model::{ReplyStyle, SearchConfig};
use sairen_core::traits::ProviderAdapter;
use sairen_core::{CompletionRequest, SairenError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::response::AgentResponse;

/// Returned as `{error}` when the catalogue cannot be queried.
pub const SEARCH_FAILED: &str = "Failed to retrieve search results";

/// Reply when the catalogue returns no products.
pub const NO_PRODUCTS: &str = "No relevant products found.";

/// One normalized product in a search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    pub availability_status: String,
    pub return_policy: String,
    pub reviews: Vec<Review>,
    pub warranty_information: String,
    pub shipping_information: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogueResponse {
    #[serde(default)]
    products: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawProduct {
    id: serde_json::Value,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    price: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    rating: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    stock: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    brand: Option<String>,
    #[serde(deserialize_with = "lenient")]
    images: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    category: Option<String>,
    #[serde(deserialize_with = "lenient")]
    discount_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    availability_status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    return_policy: Option<String>,
    #[serde(deserialize_with = "lenient")]
    reviews: Option<Vec<Review>>,
    #[serde(deserialize_with = "lenient")]
    warranty_information: Option<String>,
    #[serde(deserialize_with = "lenient")]
    shipping_information: Option<String>,
}

/// Reads a field as `T`, treating a value of any other JSON type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn text_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl From<RawProduct> for SearchResultItem {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            description: text_or(raw.description, "No description available"),
            price: raw.price,
            rating: raw.rating,
            stock: raw.stock,
            brand: raw.brand,
            images: raw.images.unwrap_or_default(),
            category: raw.category,
            discount_percentage: raw.discount_percentage,
            availability_status: text_or(raw.availability_status, "Unknown"),
            return_policy: text_or(raw.return_policy, "Standard return policy applies"),
            reviews: raw.reviews.unwrap_or_default(),
            warranty_information: text_or(raw.warranty_information, "Standard warranty applies"),
            shipping_information: text_or(raw.shipping_information, "Standard shipping applies"),
        }
    }
}

impl SearchResultItem {
    /// `2 x rating + 10 / price + 1 if in stock`.
    ///
    /// A missing rating counts as 0; a missing or non-positive price adds
    /// nothing.
    pub fn score(&self) -> f64 {
        let rating = self.rating.unwrap_or(0.0);
        let value = match self.price {
            Some(price) if price > 0.0 => 10.0 / price,
            _ => 0.0,
        };
        let availability = if self.stock.unwrap_or(0) > 0 { 1.0 } else { 0.0 };
        2.0 * rating + value + availability
    }

    fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("Unnamed product")
    }

    fn price_text(&self) -> String {
        self.price
            .map(|p| format!("${p}"))
            .unwrap_or_else(|| "price unavailable".to_string())
    }
}

/// The highest-scoring item; the first one wins ties.
pub fn best_match(items: &[SearchResultItem]) -> Option<&SearchResultItem> {
    let mut best: Option<(&SearchResultItem, f64)> = None;
    for item in items {
        let score = item.score();
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((item, score)),
        }
    }
    best.map(|(item, _)| item)
}

/// Natural-language summary of `items` in the given style.
pub fn compose_reply(items: &[SearchResultItem], style: ReplyStyle) -> String {
    let pick = match style {
        ReplyStyle::TopResult => items.first(),
        ReplyStyle::Recommendation => best_match(items),
    };
    let Some(item) = pick else {
        return NO_PRODUCTS.to_string();
    };

    match style {
        ReplyStyle::TopResult => format!(
            "Top result: {} ({}) - {}",
            item.title_text(),
            item.price_text(),
            item.description
        ),
        ReplyStyle::Recommendation => {
            let stock = if item.stock.unwrap_or(0) > 0 {
                "in stock"
            } else {
                "currently out of stock"
            };
            let rating = item
                .rating
                .map(|r| format!("rated {r} out of 5"))
                .unwrap_or_else(|| "not yet rated".to_string());
            format!(
                "I recommend {} ({}). It is {rating} and {stock}. {}",
                item.title_text(),
                item.price_text(),
                item.description
            )
        }
    }
}

pub struct SearchHandler {
    provider: Arc<dyn ProviderAdapter>,
    http: reqwest::Client,
    endpoint: String,
    reply_style: ReplyStyle,
}

impl SearchHandler {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        config: &SearchConfig,
    ) -> Result<Self, SairenError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SairenError::Search {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            provider,
            http,
            endpoint: config.endpoint.clone(),
            reply_style: config.reply_style,
        })
    }

    /// The instruction used to reduce `input` to a search term.
    pub fn term_prompt(input: &str) -> String {
        format!(
            "Extract the main search query from the following user input. \
             Return only the extracted query, nothing else: \"{input}\""
        )
    }

    /// Searches the catalogue for `query`. Never fails: upstream errors
    /// become an `{error}` response.
    pub async fn search(&self, query: &str) -> AgentResponse {
        let term = self.search_term(query).await;
        match self.fetch_products(&term).await {
            Ok(results) => {
                let reply = compose_reply(&results, self.reply_style);
                debug!(term = %term, count = results.len(), "search completed");
                AgentResponse::Search { reply, results }
            }
            Err(e) => {
                warn!(term = %term, error = %e, "product search failed");
                AgentResponse::error(SEARCH_FAILED)
            }
        }
    }

    /// Asks the model for a focused term, falling back to the raw query.
    async fn search_term(&self, query: &str) -> String {
        match self
            .provider
            .complete(CompletionRequest::prompt(Self::term_prompt(query)))
            .await
        {
            Ok(response) if !response.content.trim().is_empty() => {
                response.content.trim().to_string()
            }
            Ok(_) => query.to_string(),
            Err(e) => {
                warn!(error = %e, "search term extraction failed, using raw query");
                query.to_string()
            }
        }
    }

    async fn fetch_products(&self, term: &str) -> Result<Vec<SearchResultItem>, SairenError> {
        let url = reqwest::Url::parse_with_params(&self.endpoint, &[("q", term)]).map_err(|e| {
            SairenError::Search {
                message: format!("invalid search endpoint: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        let response = self.http.get(url).send().await.map_err(|e| SairenError::Search {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SairenError::Search {
                message: format!("catalogue returned {status}"),
                source: None,
            });
        }

        let body: CatalogueResponse = response.json().await.map_err(|e| SairenError::Search {
            message: format!("failed to parse catalogue response: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(body
            .products
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<RawProduct>(record) {
                Ok(raw) => Some(SearchResultItem::from(raw)),
                Err(e) => {
                    warn!(error = %e, "skipping product record that is not an object");
                    None
                }
            })
            .collect())
    }
}
