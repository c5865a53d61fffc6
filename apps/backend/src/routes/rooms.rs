//! Room creation and the public room listing.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::{rules, RoomSettings, Visibility};
use crate::error::AppError;
use crate::room::{GetSummary, RoomSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoomBody {
    pub name: Option<String>,
    pub visibility: Option<Visibility>,
    pub max_players: Option<usize>,
    pub password: Option<String>,
}

async fn create_room(
    state: web::Data<AppState>,
    body: Option<web::Json<CreateRoomBody>>,
) -> Result<HttpResponse, AppError> {
    let body = body.map(|b| b.into_inner());
    let defaults = RoomSettings::default();

    let max_players = body
        .as_ref()
        .and_then(|b| b.max_players)
        .unwrap_or(defaults.max_players);
    if !(rules::MIN_PLAYERS..=rules::MAX_PLAYERS).contains(&max_players) {
        return Err(AppError::BadRequest(format!(
            "max_players must be within {}..={}",
            rules::MIN_PLAYERS,
            rules::MAX_PLAYERS
        )));
    }

    let settings = RoomSettings {
        name: body
            .as_ref()
            .and_then(|b| b.name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(defaults.name),
        visibility: body
            .as_ref()
            .and_then(|b| b.visibility)
            .unwrap_or(defaults.visibility),
        max_players,
        password: body.and_then(|b| b.password).filter(|p| !p.is_empty()),
    };

    let room_id = state.registry().create_room(settings);
    info!(%room_id, "room created");
    Ok(HttpResponse::Created().json(json!({ "room_id": room_id })))
}

async fn list_rooms(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut summaries: Vec<RoomSummary> = Vec::new();
    for (_, addr) in state.registry().addrs() {
        // A room may stop between listing and query; skip the losers.
        if let Ok(summary) = addr.send(GetSummary).await {
            if summary.visibility == Visibility::Public {
                summaries.push(summary);
            }
        }
    }
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(HttpResponse::Ok().json(summaries))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_room))
        .route("", web::get().to(list_rooms));
}
