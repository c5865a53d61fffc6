//! Websocket upgrade endpoint: attach a session to an existing room.

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::ws::WsSession;

async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let room_id = path.into_inner();
    let room = state
        .registry()
        .get(room_id)
        .ok_or(AppError::RoomNotFound)?;
    ws::start(WsSession::new(room), &req, stream)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{room_id}", web::get().to(upgrade));
}
