pub use std::collections::HashSet;

pub use actix_web::http::header::ContentType;
pub use actix_web::{get, post, web, HttpRequest, HttpResponse};
pub use sea_orm::ConnectionTrait;
pub use serde::{Deserialize, Serialize};

pub use morpion_db as db;

pub use crate::engine::{self, Feedback, TeamEntry};
pub use crate::handlers::tmpl_data::*;
pub use crate::http_types::*;
pub use crate::roster::{TeamGame, TeamRef, TeamWithMorpions};
pub use crate::server_state::*;
pub use crate::stats::CompletedGame;

pub fn render(state: &ServerState, name: &str, data: &impl Serialize) -> HttpResult {
    let html = state.tmpl.render(name, data).map_err(|e| {
        log::error!("Failed to render {name} template: {e}");
        AppHttpError::Internal
    })?;
    Ok(HttpResponse::Ok()
        .append_header(ContentType(mime::TEXT_HTML))
        .body(html))
}
