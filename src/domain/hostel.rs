//! Hostel and room inventory entities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{College, UserId};

/// Validation errors returned by the hostel constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostelValidationError {
    #[error("hostel name must not be empty")]
    EmptyName,
    #[error("hostel must have at least one room")]
    NoRooms,
    #[error("room number must not be empty")]
    EmptyRoomNumber,
    #[error("room capacity must be at least 1")]
    ZeroCapacity,
    #[error("room occupancy {occupied} exceeds capacity {capacity}")]
    OccupancyExceedsCapacity { occupied: i32, capacity: i32 },
}

/// Stable hostel identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostelId(Uuid);

impl HostelId {
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HostelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HostelId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Stable room identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(Uuid);

impl RoomId {
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Human-readable room label within a hostel ("R1".."Rn").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Validate and construct a [`RoomNumber`] from owned input.
    pub fn new(value: impl Into<String>) -> Result<Self, HostelValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(HostelValidationError::EmptyRoomNumber);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for RoomNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RoomNumber> for String {
    fn from(value: RoomNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for RoomNumber {
    type Error = HostelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Generate the sequential room numbers for a new hostel: "R1".."Rn".
pub fn room_numbers(total_rooms: u32) -> Vec<RoomNumber> {
    (1..=total_rooms)
        .map(|n| RoomNumber(format!("R{n}")))
        .collect()
}

/// Managed residential facility with a fixed room inventory.
///
/// `available_rooms` is a denormalised counter maintained by the allocation
/// engine; it equals `total_rooms` minus the rooms currently occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostel {
    id: HostelId,
    name: String,
    college: College,
    warden_id: UserId,
    total_rooms: i32,
    available_rooms: i32,
}

impl Hostel {
    pub fn new(
        id: HostelId,
        name: impl Into<String>,
        college: College,
        warden_id: UserId,
        total_rooms: i32,
        available_rooms: i32,
    ) -> Result<Self, HostelValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HostelValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            college,
            warden_id,
            total_rooms,
            available_rooms,
        })
    }

    pub fn id(&self) -> &HostelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn college(&self) -> &College {
        &self.college
    }

    pub fn warden_id(&self) -> &UserId {
        &self.warden_id
    }

    pub fn total_rooms(&self) -> i32 {
        self.total_rooms
    }

    pub fn available_rooms(&self) -> i32 {
        self.available_rooms
    }
}

/// Unit of occupancy within a hostel.
///
/// ## Invariants
/// - `occupied <= capacity` at all times; the persistence layer enforces
///   this with conditional increments, and the constructor rejects rows
///   that violate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    hostel_id: HostelId,
    room_number: RoomNumber,
    capacity: i32,
    occupied: i32,
    facilities: Option<String>,
    damage: Option<String>,
}

impl Room {
    pub fn new(
        id: RoomId,
        hostel_id: HostelId,
        room_number: RoomNumber,
        capacity: i32,
        occupied: i32,
        facilities: Option<String>,
        damage: Option<String>,
    ) -> Result<Self, HostelValidationError> {
        if capacity < 1 {
            return Err(HostelValidationError::ZeroCapacity);
        }
        if occupied > capacity {
            return Err(HostelValidationError::OccupancyExceedsCapacity { occupied, capacity });
        }
        Ok(Self {
            id,
            hostel_id,
            room_number,
            capacity,
            occupied,
            facilities,
            damage,
        })
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn hostel_id(&self) -> &HostelId {
        &self.hostel_id
    }

    pub fn room_number(&self) -> &RoomNumber {
        &self.room_number
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn occupied(&self) -> i32 {
        self.occupied
    }

    pub fn facilities(&self) -> Option<&str> {
        self.facilities.as_deref()
    }

    pub fn damage(&self) -> Option<&str> {
        self.damage.as_deref()
    }

    /// Whether at least one occupant can still be placed in this room.
    pub fn has_vacancy(&self) -> bool {
        self.occupied < self.capacity
    }
}

/// New hostel awaiting insertion together with its generated rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHostel {
    pub id: HostelId,
    pub name: String,
    pub college: College,
    pub warden_id: UserId,
    pub total_rooms: i32,
}

/// New room awaiting insertion as part of hostel provisioning.
///
/// `ordinal` is the room's position within the hostel (1 for "R1"); the
/// allocation fallback scans rooms in ascending ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub id: RoomId,
    pub hostel_id: HostelId,
    pub room_number: RoomNumber,
    pub ordinal: i32,
    pub capacity: i32,
}

/// Warden-editable room attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetailsUpdate {
    pub capacity: i32,
    pub facilities: Option<String>,
    pub damage: Option<String>,
}

/// Photo metadata tied to a hostel room; file storage lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomPhoto {
    pub hostel_id: HostelId,
    pub room_id: RoomId,
    pub warden_id: UserId,
    pub filename: String,
}
