//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them
//! for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts across all roles.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        role -> Varchar,
        college -> Varchar,
        approved -> Bool,
        /// Room the student currently occupies, set by the allocation engine.
        room_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hostels owned by wardens.
    hostels (id) {
        id -> Uuid,
        name -> Varchar,
        college -> Varchar,
        warden_id -> Uuid,
        total_rooms -> Int4,
        /// Denormalised counter decremented on every room allocation.
        available_rooms -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Room inventory. `occupied <= capacity` is maintained with
    /// conditional updates, never unconditional increments.
    rooms (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        room_number -> Varchar,
        /// Position within the hostel; the fallback scan walks ascending
        /// ordinals so "R1" fills before "R2".
        ordinal -> Int4,
        capacity -> Int4,
        occupied -> Int4,
        facilities -> Nullable<Text>,
        damage -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Housing applications; `status` is `pending` or `approved`.
    applications (id) {
        id -> Uuid,
        student_id -> Uuid,
        hostel_id -> Uuid,
        room_id -> Nullable<Uuid>,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only attendance log kept by wardens.
    attendance (id) {
        id -> Uuid,
        student_id -> Uuid,
        warden_id -> Uuid,
        date -> Date,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Room photo metadata; file contents live outside the database.
    room_photos (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        room_id -> Uuid,
        warden_id -> Uuid,
        filename -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(rooms -> hostels (hostel_id));
diesel::joinable!(applications -> hostels (hostel_id));
diesel::joinable!(applications -> users (student_id));
diesel::joinable!(room_photos -> hostels (hostel_id));
diesel::joinable!(room_photos -> rooms (room_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    hostels,
    rooms,
    applications,
    attendance,
    room_photos,
);
