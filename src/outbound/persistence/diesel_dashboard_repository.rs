//! PostgreSQL-backed `DashboardRepository` implementation.
//!
//! Every method here is a single read-only query; the per-role aggregation
//! into dashboard payloads happens in the domain service. Tuple rows come
//! back as primitives and are parsed into the validated view types before
//! leaving the adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::application::{ApplicationId, ApplicationStatus};
use crate::domain::attendance::AttendanceStatus;
use crate::domain::dashboard::{
    AttendanceView, HostelView, PendingApplicationView, PendingRegistrationView, RoomPhotoView,
    RoomView, StudentView,
};
use crate::domain::hostel::{HostelId, RoomId, RoomNumber};
use crate::domain::ports::{DashboardRepository, PersistenceError};
use crate::domain::user::{College, Role, UserId, Username};

use super::diesel_error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{applications, attendance, hostels, room_photos, rooms, users};

/// Diesel-backed implementation of the `DashboardRepository` port.
#[derive(Clone)]
pub struct DieselDashboardRepository {
    pool: DbPool,
}

impl DieselDashboardRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type RegistrationRow = (Uuid, String, String, String);
type ApplicationJoinRow = (Uuid, Uuid, String, Uuid, String, Option<String>);
type RoomJoinRow = (
    Uuid,
    Uuid,
    String,
    String,
    i32,
    i32,
    Option<String>,
    Option<String>,
);
type AttendanceJoinRow = (String, NaiveDate, String);
type PhotoJoinRow = (String, String, String);

fn registration_view(row: RegistrationRow) -> Result<PendingRegistrationView, PersistenceError> {
    let (user_id, username, role, college) = row;
    Ok(PendingRegistrationView {
        user_id: UserId::from_uuid(user_id),
        username: Username::new(username).map_err(|err| corrupt_row("username", err))?,
        role: role.parse::<Role>().map_err(|err| corrupt_row("role", err))?,
        college: College::new(college).map_err(|err| corrupt_row("college", err))?,
    })
}

fn application_view(row: ApplicationJoinRow) -> Result<PendingApplicationView, PersistenceError> {
    let (application_id, student_id, student_username, hostel_id, hostel_name, room_number) = row;
    Ok(PendingApplicationView {
        application_id: ApplicationId::from_uuid(application_id),
        student_id: UserId::from_uuid(student_id),
        student_username: Username::new(student_username)
            .map_err(|err| corrupt_row("username", err))?,
        hostel_id: HostelId::from_uuid(hostel_id),
        hostel_name,
        room_number: room_number
            .map(RoomNumber::new)
            .transpose()
            .map_err(|err| corrupt_row("room_number", err))?,
    })
}

fn room_view(row: RoomJoinRow) -> Result<RoomView, PersistenceError> {
    let (room_id, hostel_id, hostel_name, room_number, capacity, occupied, facilities, damage) =
        row;
    Ok(RoomView {
        room_id: RoomId::from_uuid(room_id),
        hostel_id: HostelId::from_uuid(hostel_id),
        hostel_name,
        room_number: RoomNumber::new(room_number).map_err(|err| corrupt_row("room_number", err))?,
        capacity,
        occupied,
        facilities,
        damage,
    })
}

fn attendance_view(row: AttendanceJoinRow) -> Result<AttendanceView, PersistenceError> {
    let (student_username, date, status) = row;
    Ok(AttendanceView {
        student_username: Username::new(student_username)
            .map_err(|err| corrupt_row("username", err))?,
        date,
        status: status
            .parse::<AttendanceStatus>()
            .map_err(|err| corrupt_row("status", err))?,
    })
}

fn photo_view(row: PhotoJoinRow) -> Result<RoomPhotoView, PersistenceError> {
    let (filename, room_number, hostel_name) = row;
    Ok(RoomPhotoView {
        filename,
        room_number: RoomNumber::new(room_number).map_err(|err| corrupt_row("room_number", err))?,
        hostel_name,
    })
}

const ROOM_VIEW_COLUMNS: (
    rooms::id,
    rooms::hostel_id,
    hostels::name,
    rooms::room_number,
    rooms::capacity,
    rooms::occupied,
    rooms::facilities,
    rooms::damage,
) = (
    rooms::id,
    rooms::hostel_id,
    hostels::name,
    rooms::room_number,
    rooms::capacity,
    rooms::occupied,
    rooms::facilities,
    rooms::damage,
);

#[async_trait]
impl DashboardRepository for DieselDashboardRepository {
    async fn pending_registrations(
        &self,
        college: &College,
    ) -> Result<Vec<PendingRegistrationView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RegistrationRow> = users::table
            .filter(users::approved.eq(false))
            .filter(users::college.eq(college.as_ref()))
            .order(users::created_at.asc())
            .select((users::id, users::username, users::role, users::college))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(registration_view).collect()
    }

    async fn pending_applications(
        &self,
        college: &College,
    ) -> Result<Vec<PendingApplicationView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ApplicationJoinRow> = applications::table
            .inner_join(users::table)
            .inner_join(hostels::table)
            .left_join(rooms::table.on(rooms::id.nullable().eq(applications::room_id)))
            .filter(applications::status.eq(ApplicationStatus::Pending.as_str()))
            .filter(hostels::college.eq(college.as_ref()))
            .order(applications::created_at.asc())
            .select((
                applications::id,
                users::id,
                users::username,
                hostels::id,
                hostels::name,
                rooms::room_number.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(application_view).collect()
    }

    async fn approved_student_count(&self, college: &College) -> Result<i64, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::approved.eq(true))
            .filter(users::role.eq(Role::Student.as_str()))
            .filter(users::college.eq(college.as_ref()))
            .select(count_star())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn approved_students(
        &self,
        college: &College,
    ) -> Result<Vec<StudentView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, String)> = users::table
            .filter(users::approved.eq(true))
            .filter(users::role.eq(Role::Student.as_str()))
            .filter(users::college.eq(college.as_ref()))
            .order(users::username.asc())
            .select((users::id, users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(user_id, username)| {
                Ok(StudentView {
                    user_id: UserId::from_uuid(user_id),
                    username: Username::new(username)
                        .map_err(|err| corrupt_row("username", err))?,
                })
            })
            .collect()
    }

    async fn rooms_for_college(
        &self,
        college: &College,
    ) -> Result<Vec<RoomView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoomJoinRow> = rooms::table
            .inner_join(hostels::table)
            .filter(hostels::college.eq(college.as_ref()))
            .order((rooms::created_at.asc(), rooms::id.asc()))
            .select(ROOM_VIEW_COLUMNS)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(room_view).collect()
    }

    async fn allocated_room(
        &self,
        student_id: &UserId,
    ) -> Result<Option<RoomView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let room_id: Option<Option<Uuid>> = users::table
            .filter(users::id.eq(student_id.as_uuid()))
            .select(users::room_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(room_id) = room_id.flatten() else {
            return Ok(None);
        };

        let row: Option<RoomJoinRow> = rooms::table
            .inner_join(hostels::table)
            .filter(rooms::id.eq(room_id))
            .select(ROOM_VIEW_COLUMNS)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(room_view).transpose()
    }

    async fn attendance_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<AttendanceView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AttendanceJoinRow> = attendance::table
            .inner_join(users::table.on(users::id.eq(attendance::student_id)))
            .filter(attendance::student_id.eq(student_id.as_uuid()))
            .order((attendance::date.desc(), attendance::created_at.desc()))
            .select((users::username, attendance::date, attendance::status))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(attendance_view).collect()
    }

    async fn attendance_for_warden(
        &self,
        warden_id: &UserId,
    ) -> Result<Vec<AttendanceView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AttendanceJoinRow> = attendance::table
            .inner_join(users::table.on(users::id.eq(attendance::student_id)))
            .filter(attendance::warden_id.eq(warden_id.as_uuid()))
            .order((attendance::date.desc(), attendance::created_at.desc()))
            .select((users::username, attendance::date, attendance::status))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(attendance_view).collect()
    }

    async fn hostels_for_warden(
        &self,
        warden_id: &UserId,
    ) -> Result<Vec<HostelView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, String, i32, i32)> = hostels::table
            .filter(hostels::warden_id.eq(warden_id.as_uuid()))
            .order(hostels::created_at.asc())
            .select((
                hostels::id,
                hostels::name,
                hostels::total_rooms,
                hostels::available_rooms,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(hostel_id, name, total_rooms, available_rooms)| HostelView {
                hostel_id: HostelId::from_uuid(hostel_id),
                name,
                total_rooms,
                available_rooms,
            })
            .collect())
    }

    async fn rooms_for_warden(
        &self,
        warden_id: &UserId,
    ) -> Result<Vec<RoomView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoomJoinRow> = rooms::table
            .inner_join(hostels::table)
            .filter(hostels::warden_id.eq(warden_id.as_uuid()))
            .order((rooms::created_at.asc(), rooms::id.asc()))
            .select(ROOM_VIEW_COLUMNS)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(room_view).collect()
    }

    async fn photos_for_college(
        &self,
        college: &College,
    ) -> Result<Vec<RoomPhotoView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PhotoJoinRow> = room_photos::table
            .inner_join(rooms::table)
            .inner_join(hostels::table)
            .filter(hostels::college.eq(college.as_ref()))
            .order(room_photos::created_at.desc())
            .select((room_photos::filename, rooms::room_number, hostels::name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(photo_view).collect()
    }

    async fn photos_for_warden(
        &self,
        warden_id: &UserId,
        college: &College,
    ) -> Result<Vec<RoomPhotoView>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PhotoJoinRow> = room_photos::table
            .inner_join(rooms::table)
            .inner_join(hostels::table)
            .filter(room_photos::warden_id.eq(warden_id.as_uuid()))
            .filter(hostels::college.eq(college.as_ref()))
            .order(room_photos::created_at.desc())
            .select((room_photos::filename, rooms::room_number, hostels::name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(photo_view).collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn registration_rows_parse_into_views() {
        let view = registration_view((
            Uuid::new_v4(),
            "asha".to_owned(),
            "warden".to_owned(),
            "MNR College".to_owned(),
        ))
        .expect("valid row");
        assert_eq!(view.role, Role::Warden);
    }

    #[rstest]
    fn corrupt_role_in_registration_row_is_refused() {
        let err = registration_view((
            Uuid::new_v4(),
            "asha".to_owned(),
            "registrar".to_owned(),
            "MNR College".to_owned(),
        ))
        .expect_err("corrupt role refused");
        assert!(matches!(err, PersistenceError::Query { .. }));
    }

    #[rstest]
    fn application_rows_keep_the_missing_room_number() {
        let view = application_view((
            Uuid::new_v4(),
            Uuid::new_v4(),
            "ravi".to_owned(),
            Uuid::new_v4(),
            "North Block".to_owned(),
            None,
        ))
        .expect("valid row");
        assert_eq!(view.room_number, None);
    }

    #[rstest]
    fn attendance_rows_parse_their_status() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date");
        let view = attendance_view(("ravi".to_owned(), date, "absent".to_owned()))
            .expect("valid row");
        assert_eq!(view.status, AttendanceStatus::Absent);
        assert_eq!(view.date, date);
    }
}
