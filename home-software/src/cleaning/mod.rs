//! Cleaning routines: data model, due computation, room grouping

pub mod due;
pub mod model;
pub mod rooms;

pub use due::{compute_expected, compute_statuses, is_due, RoutineStatus};
pub use model::{
    last_recorded_label, ExpectedRoutine, Record, RecordId, Routine, RoutineId, RoutineTitle,
    Titled, NEVER_RECORDED,
};
pub use rooms::{group_by_room, room_reports, rooms, Room, RoomReport};
