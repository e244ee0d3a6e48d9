// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order status lookup.
//!
//! No order system is consulted. The completion service extracts an order id
//! from the message and the status comes from the configured policy.

use std::sync::Arc;

use rand::seq::SliceRandom;
use sairen_config::model::{OrdersConfig, StatusPolicy};
use sairen_core::traits::ProviderAdapter;
use sairen_core::CompletionRequest;
use tracing::{info, warn};

use crate::response::AgentResponse;

/// Sentinel the model is told to answer with when there is no order id.
pub const NO_ORDER_ID: &str = "NO_ORDER_ID_FOUND";

pub const MISSING_ID_REPLY: &str = "I couldn't find an order ID in your message. \
                                    Please provide a valid order ID to check its status.";

pub const LOOKUP_FAILED_REPLY: &str = "I'm sorry, but I encountered an error while processing \
                                       your order status request. Please try again later or \
                                       contact customer support.";

pub struct OrderHandler {
    provider: Arc<dyn ProviderAdapter>,
    orders: OrdersConfig,
}

impl OrderHandler {
    pub fn new(provider: Arc<dyn ProviderAdapter>, orders: OrdersConfig) -> Self {
        Self { provider, orders }
    }

    pub fn extraction_prompt(input: &str) -> String {
        format!(
            "Extract the order ID from the following text. If there's no clear order ID, \
             respond with \"{NO_ORDER_ID}\". Text: \"{input}\""
        )
    }

    pub async fn check_order(&self, input: &str, user_id: &str) -> AgentResponse {
        let extracted = match self
            .provider
            .complete(CompletionRequest::prompt(Self::extraction_prompt(input)))
            .await
        {
            Ok(response) => response.content.trim().to_string(),
            Err(e) => {
                warn!(user_id, error = %e, "order id extraction failed");
                return AgentResponse::Order {
                    order_id: None,
                    reply: LOOKUP_FAILED_REPLY.to_string(),
                };
            }
        };

        if extracted.is_empty() || extracted == NO_ORDER_ID {
            return AgentResponse::Order {
                order_id: None,
                reply: MISSING_ID_REPLY.to_string(),
            };
        }

        let status = self.status();
        info!(user_id, order_id = %extracted, status, "order status reported");
        AgentResponse::Order {
            reply: format!("The status of your order {extracted} is: {status}"),
            order_id: Some(extracted),
        }
    }

    fn status(&self) -> &str {
        match self.orders.status_policy {
            StatusPolicy::Fixed => &self.orders.fixed_status,
            StatusPolicy::Random => self
                .orders
                .statuses
                .choose(&mut rand::thread_rng())
                .unwrap_or(&self.orders.fixed_status),
        }
    }
}
