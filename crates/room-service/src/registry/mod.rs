//! Room registry.
//!
//! Owns every room and is the only code allowed to change a room's booking
//! status or participant list. Rooms are seeded once at startup and are never
//! created or destroyed afterwards.
//!
//! Invariants held after every operation:
//!
//! - the available count equals the number of rooms whose status is Open
//!   (it is derived from room statuses on every read);
//! - an Open room has no participants;
//! - a room never holds more participants than its maximum capacity.
//!
//! The registry performs no locking of its own; callers serialize access
//! (see `routes::AppState`).

use crate::errors::RoomServiceError;
use crate::models::{RoomDetail, RoomStatus};
use std::collections::BTreeMap;
use tracing::debug;

/// Room identifier, assigned 1..N at startup.
pub type RoomId = u32;

/// A bookable room with a fixed capacity.
#[derive(Debug, Clone)]
struct Room {
    id: RoomId,
    status: RoomStatus,
    max_capacity: usize,
    participants: Vec<String>,
}

impl Room {
    fn new(id: RoomId, max_capacity: usize) -> Self {
        Self {
            id,
            status: RoomStatus::Open,
            max_capacity,
            participants: Vec::new(),
        }
    }

    fn snapshot(&self) -> RoomDetail {
        RoomDetail {
            id: self.id,
            max_capacity: self.max_capacity,
            current_count: self.participants.len(),
            participants: self.participants.clone(),
        }
    }

    fn ensure_booked(&self) -> Result<(), RoomServiceError> {
        match self.status {
            RoomStatus::Booked => Ok(()),
            RoomStatus::Open => Err(RoomServiceError::RoomNotBooked(self.id)),
        }
    }
}

/// Aggregate availability view: how many rooms are open and which ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available_count: usize,
    pub open_rooms: Vec<RoomId>,
}

/// Outcome of a participant removal.
#[derive(Debug, Clone)]
pub struct Removal {
    /// Names actually removed, in request order.
    pub removed: Vec<String>,

    /// Number of names the caller asked to remove.
    pub requested: usize,

    /// Room state after the removal.
    pub room: RoomDetail,
}

impl Removal {
    /// True when every requested name matched a participant.
    pub fn is_complete(&self) -> bool {
        self.removed.len() == self.requested
    }
}

/// In-memory registry of all rooms, keyed by id.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomRegistry {
    /// Create a registry with one Open room per capacity, numbered from 1.
    pub fn with_capacities(capacities: &[usize]) -> Self {
        let rooms = (1..)
            .zip(capacities.iter().copied())
            .map(|(id, max_capacity)| (id, Room::new(id, max_capacity)))
            .collect();

        Self { rooms }
    }

    /// Number of rooms in the registry.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns the open-room count and the open room ids in ascending order.
    pub fn availability(&self) -> Availability {
        let open_rooms: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|room| room.status == RoomStatus::Open)
            .map(|room| room.id)
            .collect();

        Availability {
            available_count: open_rooms.len(),
            open_rooms,
        }
    }

    /// Booking status of every room, keyed by id.
    pub fn statuses(&self) -> BTreeMap<RoomId, RoomStatus> {
        self.rooms
            .iter()
            .map(|(id, room)| (*id, room.status))
            .collect()
    }

    pub fn room_status(&self, id: RoomId) -> Result<RoomStatus, RoomServiceError> {
        Ok(self.room(id)?.status)
    }

    pub fn room_detail(&self, id: RoomId) -> Result<RoomDetail, RoomServiceError> {
        Ok(self.room(id)?.snapshot())
    }

    /// Fails with `RoomNotBooked` unless the room is currently booked.
    pub fn ensure_booked(&self, id: RoomId) -> Result<(), RoomServiceError> {
        self.room(id)?.ensure_booked()
    }

    /// Transition a room from Open to Booked.
    ///
    /// A second call on the same room fails with `RoomAlreadyBooked` and
    /// leaves the room untouched.
    pub fn book(&mut self, id: RoomId) -> Result<RoomDetail, RoomServiceError> {
        let room = self.room_mut(id)?;

        if room.status == RoomStatus::Booked {
            return Err(RoomServiceError::RoomAlreadyBooked(id));
        }

        room.status = RoomStatus::Booked;
        debug!(target: "rooms.registry", room_id = id, "Room booked");

        Ok(room.snapshot())
    }

    /// Transition a room from Booked back to Open.
    ///
    /// Any participants still in the room are discarded.
    pub fn unbook(&mut self, id: RoomId) -> Result<RoomDetail, RoomServiceError> {
        let room = self.room_mut(id)?;
        room.ensure_booked()?;

        let discarded = room.participants.len();
        room.status = RoomStatus::Open;
        room.participants.clear();
        debug!(
            target: "rooms.registry",
            room_id = id,
            discarded_participants = discarded,
            "Room booking deleted"
        );

        Ok(room.snapshot())
    }

    /// Append participants to a booked room, one at a time.
    ///
    /// The first name that would exceed the room's capacity aborts the call
    /// with `RoomFull`. Names appended before that point stay in the room.
    /// Duplicate names are accepted and each one takes a seat.
    pub fn add_participants(
        &mut self,
        id: RoomId,
        names: &[String],
    ) -> Result<RoomDetail, RoomServiceError> {
        let room = self.room_mut(id)?;
        room.ensure_booked()?;
        ensure_names_present(names)?;

        for name in names {
            if room.participants.len() >= room.max_capacity {
                debug!(
                    target: "rooms.registry",
                    room_id = id,
                    max_capacity = room.max_capacity,
                    "Room full, rejecting remaining participants"
                );
                return Err(RoomServiceError::RoomFull(id));
            }
            room.participants.push(name.clone());
        }

        Ok(room.snapshot())
    }

    /// Remove the first matching occurrence of each requested name.
    ///
    /// Names with no match are skipped rather than treated as an error; use
    /// [`Removal::is_complete`] to tell full from partial removal.
    pub fn remove_participants(
        &mut self,
        id: RoomId,
        names: &[String],
    ) -> Result<Removal, RoomServiceError> {
        let room = self.room_mut(id)?;
        room.ensure_booked()?;
        ensure_names_present(names)?;

        let mut removed = Vec::new();
        for name in names {
            if let Some(position) = room.participants.iter().position(|p| p == name) {
                removed.push(room.participants.remove(position));
            }
        }

        Ok(Removal {
            removed,
            requested: names.len(),
            room: room.snapshot(),
        })
    }

    fn room(&self, id: RoomId) -> Result<&Room, RoomServiceError> {
        self.rooms
            .get(&id)
            .ok_or_else(|| RoomServiceError::RoomNotFound(id.to_string()))
    }

    fn room_mut(&mut self, id: RoomId) -> Result<&mut Room, RoomServiceError> {
        self.rooms
            .get_mut(&id)
            .ok_or_else(|| RoomServiceError::RoomNotFound(id.to_string()))
    }
}

fn ensure_names_present(names: &[String]) -> Result<(), RoomServiceError> {
    if names.is_empty() {
        return Err(RoomServiceError::InvalidRequest(
            "participants must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn seeded() -> RoomRegistry {
        RoomRegistry::with_capacities(&[15, 5, 3])
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn assert_availability_consistent(registry: &RoomRegistry) {
        let open = registry
            .statuses()
            .values()
            .filter(|s| **s == RoomStatus::Open)
            .count();
        assert_eq!(registry.availability().available_count, open);
    }

    #[test]
    fn test_seed_creates_open_rooms_with_capacities() {
        let registry = seeded();

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.availability(),
            Availability {
                available_count: 3,
                open_rooms: vec![1, 2, 3],
            }
        );
        assert_eq!(registry.room_detail(1).unwrap().max_capacity, 15);
        assert_eq!(registry.room_detail(2).unwrap().max_capacity, 5);
        assert_eq!(registry.room_detail(3).unwrap().max_capacity, 3);
    }

    #[test]
    fn test_unknown_room_is_not_found() {
        let mut registry = seeded();

        assert!(matches!(
            registry.room_status(4),
            Err(RoomServiceError::RoomNotFound(id)) if id == "4"
        ));
        assert!(matches!(
            registry.book(0),
            Err(RoomServiceError::RoomNotFound(_))
        ));
        assert!(matches!(
            registry.add_participants(9, &names(&["A"])),
            Err(RoomServiceError::RoomNotFound(_))
        ));
    }

    #[test]
    fn test_book_decrements_availability() {
        let mut registry = seeded();

        let room = registry.book(1).unwrap();
        assert_eq!(room.id, 1);
        assert_eq!(registry.room_status(1).unwrap(), RoomStatus::Booked);
        assert_eq!(
            registry.availability(),
            Availability {
                available_count: 2,
                open_rooms: vec![2, 3],
            }
        );
        assert_availability_consistent(&registry);
    }

    #[test]
    fn test_book_twice_fails_without_changing_state() {
        let mut registry = seeded();
        registry.book(2).unwrap();
        registry.add_participants(2, &names(&["Ann"])).unwrap();

        let result = registry.book(2);
        assert!(matches!(result, Err(RoomServiceError::RoomAlreadyBooked(2))));

        assert_eq!(registry.availability().available_count, 2);
        assert_eq!(registry.room_detail(2).unwrap().participants, names(&["Ann"]));
        assert_availability_consistent(&registry);
    }

    #[test]
    fn test_unbook_resets_participants() {
        let mut registry = seeded();
        registry.book(3).unwrap();
        registry.add_participants(3, &names(&["A", "B", "C"])).unwrap();

        let room = registry.unbook(3).unwrap();
        assert_eq!(room.current_count, 0);
        assert!(room.participants.is_empty());
        assert_eq!(registry.room_status(3).unwrap(), RoomStatus::Open);
        assert_eq!(registry.availability().available_count, 3);
        assert_availability_consistent(&registry);
    }

    #[test]
    fn test_unbook_open_room_fails() {
        let mut registry = seeded();

        let result = registry.unbook(1);
        assert!(matches!(result, Err(RoomServiceError::RoomNotBooked(1))));
        assert_eq!(registry.availability().available_count, 3);
    }

    #[test]
    fn test_add_participants_requires_booking() {
        let mut registry = seeded();

        let result = registry.add_participants(1, &names(&["Tom"]));
        assert!(matches!(result, Err(RoomServiceError::RoomNotBooked(1))));
        assert_eq!(registry.room_detail(1).unwrap().current_count, 0);
    }

    #[test]
    fn test_add_participants_checks_booking_before_payload() {
        let mut registry = seeded();

        let result = registry.add_participants(1, &[]);
        assert!(matches!(result, Err(RoomServiceError::RoomNotBooked(1))));
    }

    #[test]
    fn test_add_participants_empty_list_is_invalid() {
        let mut registry = seeded();
        registry.book(1).unwrap();

        let result = registry.add_participants(1, &[]);
        assert!(matches!(result, Err(RoomServiceError::InvalidRequest(_))));
    }

    #[test]
    fn test_add_participants_overflow_keeps_partial_apply() {
        let mut registry = seeded();
        registry.book(2).unwrap();

        let result = registry.add_participants(2, &names(&["A", "B", "C", "D", "E", "F"]));
        assert!(matches!(result, Err(RoomServiceError::RoomFull(2))));

        let room = registry.room_detail(2).unwrap();
        assert_eq!(room.current_count, 5);
        assert_eq!(room.participants, names(&["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_add_participants_to_full_room_adds_nothing() {
        let mut registry = seeded();
        registry.book(3).unwrap();
        registry.add_participants(3, &names(&["A", "B", "C"])).unwrap();

        let result = registry.add_participants(3, &names(&["D"]));
        assert!(matches!(result, Err(RoomServiceError::RoomFull(3))));
        assert_eq!(registry.room_detail(3).unwrap().current_count, 3);
    }

    #[test]
    fn test_add_participants_allows_duplicates() {
        let mut registry = seeded();
        registry.book(1).unwrap();

        let room = registry.add_participants(1, &names(&["Tom", "Tom"])).unwrap();
        assert_eq!(room.current_count, 2);
        assert_eq!(room.participants, names(&["Tom", "Tom"]));
    }

    #[test]
    fn test_remove_participants_removes_first_occurrence_only() {
        let mut registry = seeded();
        registry.book(1).unwrap();
        registry
            .add_participants(1, &names(&["Tom", "Jerry", "Tom"]))
            .unwrap();

        let removal = registry.remove_participants(1, &names(&["Tom"])).unwrap();
        assert!(removal.is_complete());
        assert_eq!(removal.removed, names(&["Tom"]));
        assert_eq!(removal.room.participants, names(&["Jerry", "Tom"]));
        assert_eq!(removal.room.current_count, 2);
    }

    #[test]
    fn test_remove_participants_skips_unknown_names() {
        let mut registry = seeded();
        registry.book(1).unwrap();
        registry.add_participants(1, &names(&["Tom", "Jerry"])).unwrap();

        let removal = registry
            .remove_participants(1, &names(&["Spike", "Jerry"]))
            .unwrap();
        assert!(!removal.is_complete());
        assert_eq!(removal.removed, names(&["Jerry"]));
        assert_eq!(removal.requested, 2);
        assert_eq!(removal.room.participants, names(&["Tom"]));
    }

    #[test]
    fn test_remove_same_name_twice_removes_two_occurrences() {
        let mut registry = seeded();
        registry.book(1).unwrap();
        registry
            .add_participants(1, &names(&["Tom", "Tom", "Tom"]))
            .unwrap();

        let removal = registry
            .remove_participants(1, &names(&["Tom", "Tom"]))
            .unwrap();
        assert!(removal.is_complete());
        assert_eq!(removal.room.participants, names(&["Tom"]));
    }

    #[test]
    fn test_remove_participants_requires_booking() {
        let mut registry = seeded();

        let result = registry.remove_participants(2, &names(&["Tom"]));
        assert!(matches!(result, Err(RoomServiceError::RoomNotBooked(2))));
    }

    #[test]
    fn test_book_add_unbook_scenario() {
        let mut registry = seeded();

        registry.book(1).unwrap();
        registry.add_participants(1, &names(&["Tom", "Jerry"])).unwrap();

        let room = registry.room_detail(1).unwrap();
        assert_eq!(room.current_count, 2);
        assert_eq!(room.participants, names(&["Tom", "Jerry"]));

        registry.unbook(1).unwrap();

        let room = registry.room_detail(1).unwrap();
        assert_eq!(room.current_count, 0);
        assert!(room.participants.is_empty());
        assert_availability_consistent(&registry);
    }

    #[test]
    fn test_availability_consistent_across_mixed_operations() {
        let mut registry = seeded();

        registry.book(1).unwrap();
        assert_availability_consistent(&registry);
        registry.book(3).unwrap();
        assert_availability_consistent(&registry);
        let _ = registry.book(3);
        assert_availability_consistent(&registry);
        registry.unbook(1).unwrap();
        assert_availability_consistent(&registry);
        let _ = registry.unbook(1);
        assert_availability_consistent(&registry);

        assert_eq!(registry.availability().open_rooms, vec![1, 2]);
        assert_eq!(registry.statuses()[&3], RoomStatus::Booked);
    }
}
