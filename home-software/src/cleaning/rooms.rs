//! Room grouping and display ordering
//!
//! Rooms needing the least attention come first. Inside a room, routines
//! that are done come before due ones, and each group runs from the oldest
//! completion (or never) to the most recent.

use super::due::RoutineStatus;
use super::model::{ExpectedRoutine, Routine, Titled};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Partition items by room name.
///
/// Every item lands in exactly one bucket; keys are exactly the distinct
/// rooms, in name order.
pub fn group_by_room<T: Titled>(items: impl IntoIterator<Item = T>) -> BTreeMap<String, Vec<T>> {
    let mut rooms: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        rooms
            .entry(item.title().room().to_string())
            .or_default()
            .push(item);
    }
    rooms
}

/// All routines of one room with their evaluated state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub routines: Vec<RoutineStatus>,
}

impl Room {
    pub fn done_count(&self) -> usize {
        self.routines.iter().filter(|status| !status.due).count()
    }

    pub fn due_count(&self) -> usize {
        self.routines.len() - self.done_count()
    }

    pub fn is_done(&self) -> bool {
        self.due_count() == 0
    }

    /// `"✅ Kitchen (2/2)"` or `"⏳ Kitchen (1/2)"`
    pub fn heading(&self) -> String {
        let marker = if self.is_done() { "✅" } else { "⏳" };
        format!(
            "{} {} ({}/{})",
            marker,
            self.name,
            self.done_count(),
            self.routines.len()
        )
    }
}

fn compare_statuses(a: &RoutineStatus, b: &RoutineStatus) -> Ordering {
    a.due
        .cmp(&b.due)
        .then_with(|| a.last_recorded_at.cmp(&b.last_recorded_at))
        .then_with(|| a.routine.title.task().cmp(b.routine.title.task()))
}

/// Group evaluated routines into rooms, ordered for display
pub fn rooms(statuses: Vec<RoutineStatus>) -> Vec<Room> {
    let mut rooms: Vec<Room> = group_by_room(statuses)
        .into_iter()
        .map(|(name, mut routines)| {
            routines.sort_by(compare_statuses);
            Room { name, routines }
        })
        .collect();

    // Stable sort: equal due counts keep name order
    rooms.sort_by_key(Room::due_count);
    rooms
}

/// Due routines of one room, alongside the room's size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomReport {
    pub name: String,
    pub total: usize,
    pub expected: Vec<ExpectedRoutine>,
}

impl RoomReport {
    pub fn done_count(&self) -> usize {
        self.total - self.expected.len()
    }
}

/// Combine all routines with the due subset into per-room reports.
///
/// Rooms are ordered by ascending due count, due routines by oldest
/// completion first.
pub fn room_reports(routines: Vec<Routine>, expected: Vec<ExpectedRoutine>) -> Vec<RoomReport> {
    let mut due_by_room = group_by_room(expected);

    let mut reports: Vec<RoomReport> = group_by_room(routines)
        .into_iter()
        .map(|(name, routines)| {
            let mut expected = due_by_room.remove(&name).unwrap_or_default();
            expected.sort_by(|a, b| {
                a.last_recorded_at
                    .cmp(&b.last_recorded_at)
                    .then_with(|| a.title.task().cmp(b.title.task()))
            });
            RoomReport {
                name,
                total: routines.len(),
                expected,
            }
        })
        .collect();

    reports.sort_by_key(|report| report.expected.len());
    reports
}
