//! Profile API 模块

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/profile", profile_routes())
}

fn profile_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get_profile).put(handler::update_profile))
}
