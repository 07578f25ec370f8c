use axum::response::Json;
use serde_json::{Value, json};

/// Liveness probe for an account's callback listener. With two listeners on
/// two ports, the answer tells you which one actually came up.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
