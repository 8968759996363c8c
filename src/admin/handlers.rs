use axum::{extract::State, Json};
use serde::Serialize;

use crate::compiler::CompiledTable;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub table_entries: usize,
    pub vendor_bangs: bool,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        table_entries: state.store.load().len(),
        vendor_bangs: state.config.load().search.use_vendor_bangs,
    })
}

/// The live compiled table.
pub async fn get_table(State(state): State<AppState>) -> Json<CompiledTable> {
    Json(CompiledTable::clone(&state.store.load()))
}
