//! Room selection policy for application approval.
//!
//! The policy is a pure function so the persistence adapter, the in-memory
//! test store, and the unit tests all share one implementation. The
//! capacity check it performs is advisory; the adapter re-checks it with a
//! conditional increment when committing, which is what closes the
//! concurrent-approval race.

use super::hostel::{Room, RoomId};

/// Choose the room an approved application should occupy.
///
/// Preference order:
/// 1. The specifically requested room, when it still has spare capacity.
/// 2. The first room with spare capacity in `hostel_rooms`, which callers
///    must supply in persisted order so the fallback is deterministic.
///
/// Returns `None` when every room in the hostel is full; the application is
/// then approved without an allocation.
pub fn select_room(requested: Option<&RoomId>, hostel_rooms: &[Room]) -> Option<RoomId> {
    if let Some(requested_id) = requested
        && let Some(room) = hostel_rooms.iter().find(|room| room.id() == requested_id)
        && room.has_vacancy()
    {
        return Some(*room.id());
    }

    hostel_rooms
        .iter()
        .find(|room| room.has_vacancy())
        .map(|room| *room.id())
}
