//! Per-connection websocket session actor: heartbeat, JSON parsing, and
//! forwarding between the socket and the room's mailbox.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::room::{Connect, Disconnect, GameRoom, Inbound, OutboundFrame};
use crate::services::game_flow::GameEvent;
use crate::ws::protocol::ClientCommand;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub struct WsSession {
    conn_id: Uuid,
    room: Addr<GameRoom>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(room: Addr<GameRoom>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            room,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: &str, message: &str) {
        let event = GameEvent::Error {
            code: code.to_string(),
            message: message.to_string(),
        };
        if let Ok(payload) = serde_json::to_string(&event) {
            ctx.text(payload);
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        debug!(conn_id = %self.conn_id, "session started");
        self.room.do_send(Connect {
            conn_id: self.conn_id,
            addr: ctx.address().recipient(),
        });
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!(conn_id = %self.conn_id, "session stopped");
        self.room.do_send(Disconnect {
            conn_id: self.conn_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                // Malformed commands are dropped with an error to this
                // connection only.
                match serde_json::from_str::<ClientCommand>(&text) {
                    Ok(command) => self.room.do_send(Inbound {
                        conn_id: self.conn_id,
                        command,
                    }),
                    Err(err) => {
                        Self::send_error(ctx, "bad_request", &format!("malformed command: {err}"));
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, "bad_request", "binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "websocket protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<OutboundFrame> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: OutboundFrame, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}
