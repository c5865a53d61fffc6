//! Process-wide registry of live rooms. The only state shared between rooms
//! is this map of actor addresses.

use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::config::TimingConfig;
use crate::domain::{GameId, RoomSettings};

use super::actor::GameRoom;

pub struct RoomRegistry {
    rooms: DashMap<GameId, Addr<GameRoom>>,
    timing: TimingConfig,
}

impl RoomRegistry {
    pub fn new(timing: TimingConfig) -> Arc<Self> {
        Arc::new(Self {
            rooms: DashMap::new(),
            timing,
        })
    }

    /// Spawn a room actor and register its address.
    pub fn create_room(self: &Arc<Self>, settings: RoomSettings) -> GameId {
        let id = Uuid::new_v4();
        let room = GameRoom::new(id, settings, self.timing, Arc::clone(self)).start();
        self.rooms.insert(id, room);
        id
    }

    /// Re-register a room rebuilt from an exported state snapshot.
    pub fn adopt_room(self: &Arc<Self>, state: super::handoff::RoomState) -> GameId {
        let id = state.game.id;
        let room = GameRoom::restore(state, self.timing, Arc::clone(self)).start();
        self.rooms.insert(id, room);
        id
    }

    pub fn get(&self, id: GameId) -> Option<Addr<GameRoom>> {
        self.rooms.get(&id).map(|entry| entry.value().clone())
    }

    /// Called by a room when it stops.
    pub fn remove(&self, id: GameId) {
        self.rooms.remove(&id);
    }

    pub fn addrs(&self) -> Vec<(GameId, Addr<GameRoom>)> {
        self.rooms
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
