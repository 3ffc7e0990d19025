//! HTTP handlers.
//!
//! ## Endpoints
//! | Method | Path      | Handler       |
//! |--------|-----------|---------------|
//! | POST   | `/cart`   | `create_cart` |
//! | GET    | `/health` | `health`      |

use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use ts_rs::TS;

use cartwise_core::{EvaluatedCart, EvaluatedLineItem, Money};

use crate::error::{ApiError, ApiResult};
use crate::params::cart_params;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "cart-api";

// =============================================================================
// Responses
// =============================================================================

/// Body of a successful `POST /cart`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CartResponse {
    pub cart: CartBody,
}

/// The evaluated cart as rendered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartBody {
    pub reference: String,
    pub line_items: Vec<EvaluatedLineItem>,
    #[ts(type = "number")]
    pub total_price: Money,
}

impl From<EvaluatedCart> for CartResponse {
    fn from(evaluated: EvaluatedCart) -> Self {
        CartResponse {
            cart: CartBody {
                reference: evaluated.reference,
                line_items: evaluated.line_items,
                total_price: evaluated.total_price,
            },
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub server_time: DateTime<Utc>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /cart`: checks the request structure, then evaluates the cart.
pub async fn create_cart(
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CartResponse>> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(status = %rejection.status(), "Rejected unreadable body");
        ApiError::from(rejection)
    })?;

    let cart = cart_params(&body).map_err(|e| {
        debug!(error = %e, "Rejected cart request");
        e
    })?;

    let evaluated = cart.evaluate().map_err(|e| {
        warn!(
            reference = %cart.reference,
            errors = e.messages().len(),
            "Cart failed validation"
        );
        ApiError::from(e)
    })?;

    info!(
        reference = %evaluated.reference,
        items = evaluated.line_items.len(),
        eligible = evaluated.discount.eligible_count,
        rate = %evaluated.discount.rate,
        total = %evaluated.total_price,
        "Cart evaluated"
    );

    Ok(Json(CartResponse::from(evaluated)))
}

/// `GET /health`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        server_time: Utc::now(),
    })
}
