//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{applications, attendance, hostels, room_photos, rooms, users};

/// Row struct for reading account state from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub college: String,
    pub approved: bool,
    pub room_id: Option<Uuid>,
}

/// Insertable struct for new registrations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub college: &'a str,
    pub approved: bool,
}

/// Insertable struct for new hostels.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hostels)]
pub(crate) struct NewHostelRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub college: &'a str,
    pub warden_id: Uuid,
    pub total_rooms: i32,
    pub available_rooms: i32,
}

/// Row struct for reading room inventory.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub room_number: String,
    pub capacity: i32,
    pub occupied: i32,
    pub facilities: Option<String>,
    pub damage: Option<String>,
}

/// Insertable struct for generated rooms.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub(crate) struct NewRoomRow<'a> {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub room_number: &'a str,
    pub ordinal: i32,
    pub capacity: i32,
    pub occupied: i32,
}

/// Changeset struct for warden room edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomDetailsChangeset<'a> {
    pub capacity: i32,
    pub facilities: Option<&'a str>,
    pub damage: Option<&'a str>,
}

/// Row struct for reading applications.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Option<Uuid>,
    pub status: String,
}

/// Insertable struct for new applications.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub(crate) struct NewApplicationRow<'a> {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Option<Uuid>,
    pub status: &'a str,
}

/// Insertable struct for attendance entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attendance)]
pub(crate) struct NewAttendanceRow<'a> {
    pub id: Uuid,
    pub student_id: Uuid,
    pub warden_id: Uuid,
    pub date: NaiveDate,
    pub status: &'a str,
}

/// Insertable struct for room photo metadata.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = room_photos)]
pub(crate) struct NewRoomPhotoRow<'a> {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Uuid,
    pub warden_id: Uuid,
    pub filename: &'a str,
}
