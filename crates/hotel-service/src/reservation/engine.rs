//! Booking engine.
//!
//! Create, checkout and delete touch two rows (the room flag and the
//! reservation) without a shared transaction. Each is ordered so the first
//! write can be undone if the second fails, and each runs on its own task so
//! an abandoned request cannot stop it halfway.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use hotel_core::config::ReservationConfig;
use hotel_database::store::{ReservationStore, RoomStore};
use hotel_entity::reservation::Reservation;
use hotel_entity::room::{Availability, Room};

use super::error::ReservationError;
use super::request::{Booking, BookingRequest, ReservationUpdateRequest};

/// Owns reservations and the availability flag of every room.
#[derive(Clone)]
pub struct ReservationEngine {
    rooms: Arc<dyn RoomStore>,
    reservations: Arc<dyn ReservationStore>,
    booking_timeout: Duration,
}

impl std::fmt::Debug for ReservationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationEngine")
            .field("booking_timeout", &self.booking_timeout)
            .finish_non_exhaustive()
    }
}

impl ReservationEngine {
    /// Creates a new engine.
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        reservations: Arc<dyn ReservationStore>,
        config: &ReservationConfig,
    ) -> Self {
        Self {
            rooms,
            reservations,
            booking_timeout: Duration::from_secs(config.booking_timeout_seconds),
        }
    }

    /// Books a room.
    ///
    /// The booking runs on its own task under the booking timeout. When the
    /// caller gives up the task still runs to completion, so a claimed room
    /// is either reserved or released and never left dangling.
    pub async fn create_reservation(
        &self,
        request: BookingRequest,
    ) -> Result<Reservation, ReservationError> {
        let booking = request.parse()?;
        let engine = self.clone();
        let task = tokio::spawn(async move { engine.book(booking).await });

        match tokio::time::timeout(self.booking_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!(error = %e, "Booking task failed");
                Err(ReservationError::Internal(
                    "Error while creating reservation".to_string(),
                ))
            }
            Err(_) => {
                warn!(
                    room_id = %booking.room_id,
                    timeout_secs = self.booking_timeout.as_secs(),
                    "Booking timed out"
                );
                Err(ReservationError::Timeout)
            }
        }
    }

    async fn book(&self, booking: Booking) -> Result<Reservation, ReservationError> {
        let room = self.load_room(booking.room_id).await?;
        if room.is_occupied() {
            return Err(ReservationError::RoomOccupied);
        }
        booking.stay.check_room(room.capacity, room.price)?;
        let changes = booking.stay.changes(room.price, false);

        if !self.rooms.claim_room(room.room_id).await? {
            warn!(room_id = %room.room_id, "Lost the race for room");
            return Err(ReservationError::RoomOccupied);
        }

        let now = Utc::now();
        let reservation = Reservation {
            reservation_id: Uuid::new_v4(),
            room_id: room.room_id,
            guest_id: booking.guest_id,
            check_in_time: changes.check_in_time,
            check_out_time: changes.check_out_time,
            deposit_amount: changes.deposit_amount,
            pending_amount: changes.pending_amount,
            numbers_of_guests: changes.numbers_of_guests,
            is_checked_out: false,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.reservations.insert_reservation(&reservation).await {
            warn!(room_id = %room.room_id, error = %e, "Reservation insert failed, releasing room");
            if let Err(release) = self
                .rooms
                .set_room_availability(room.room_id, Availability::Available)
                .await
            {
                error!(room_id = %room.room_id, error = %release, "Room left occupied after failed booking");
            }
            return Err(ReservationError::Internal(
                "Error while creating reservation".to_string(),
            ));
        }

        info!(
            reservation_id = %reservation.reservation_id,
            room_id = %room.room_id,
            guest_id = %reservation.guest_id,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Fetches a reservation.
    pub async fn get_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<Reservation, ReservationError> {
        self.reservations
            .find_reservation(reservation_id)
            .await?
            .ok_or(ReservationError::ReservationNotFound)
    }

    /// Replaces the mutable fields of an active reservation.
    ///
    /// `pending_amount` is recomputed from the room price. Setting the
    /// checkout flag releases the room; if that fails the reservation is
    /// restored. Runs detached like booking, so a dropped caller cannot stop
    /// it between the two writes.
    pub async fn update_reservation_details(
        &self,
        reservation_id: Uuid,
        request: ReservationUpdateRequest,
    ) -> Result<Reservation, ReservationError> {
        let engine = self.clone();
        detached(async move { engine.amend(reservation_id, request).await }).await
    }

    async fn amend(
        &self,
        reservation_id: Uuid,
        request: ReservationUpdateRequest,
    ) -> Result<Reservation, ReservationError> {
        let (stay, checked_out) = request.parse()?;

        let current = self.get_reservation(reservation_id).await?;
        if current.is_checked_out {
            return Err(ReservationError::AlreadyCheckedOut);
        }
        let room = self.load_room(current.room_id).await?;
        stay.check_room(room.capacity, room.price)?;

        let changes = stay.changes(room.price, checked_out);
        if !self
            .reservations
            .update_active_reservation(reservation_id, &changes)
            .await?
        {
            // Checked out or deleted since it was read.
            warn!(reservation_id = %reservation_id, "Reservation changed during amendment");
            return Err(
                match self.reservations.find_reservation(reservation_id).await? {
                    Some(_) => ReservationError::AlreadyCheckedOut,
                    None => ReservationError::ReservationNotFound,
                },
            );
        }

        if checked_out {
            if let Err(e) = self
                .update_room_availability(room.room_id, Availability::Available)
                .await
            {
                warn!(reservation_id = %reservation_id, error = %e, "Checkout release failed, restoring reservation");
                self.restore(&current).await;
                return Err(ReservationError::Internal(
                    "Error while releasing room".to_string(),
                ));
            }
            info!(reservation_id = %reservation_id, room_id = %room.room_id, "Guest checked out");
        } else {
            info!(reservation_id = %reservation_id, "Reservation updated");
        }

        let mut updated = current;
        changes.apply(&mut updated);
        Ok(updated)
    }

    /// Cancels a reservation and frees its room if it was still active.
    ///
    /// Whether to release is decided from the row the store removed, not
    /// from an earlier read.
    pub async fn delete_reservation(
        &self,
        reservation_id: Uuid,
        room_id: Uuid,
    ) -> Result<(), ReservationError> {
        let engine = self.clone();
        detached(async move { engine.cancel(reservation_id, room_id).await }).await
    }

    async fn cancel(&self, reservation_id: Uuid, room_id: Uuid) -> Result<(), ReservationError> {
        let reservation = self.get_reservation(reservation_id).await?;
        if reservation.room_id != room_id {
            return Err(ReservationError::validation(
                "Room id does not match the reservation",
            ));
        }

        let removed = self
            .reservations
            .delete_reservation(reservation_id)
            .await?
            .ok_or(ReservationError::ReservationNotFound)?;

        if removed.is_active() {
            let released = self
                .rooms
                .set_room_availability(room_id, Availability::Available)
                .await;
            match released {
                Ok(true) => {}
                Ok(false) => warn!(room_id = %room_id, "Room vanished before release"),
                Err(e) => {
                    warn!(reservation_id = %reservation_id, error = %e, "Room release failed, re-inserting reservation");
                    if let Err(e) = self.reservations.insert_reservation(&removed).await {
                        error!(reservation_id = %reservation_id, error = %e, "Reservation lost after failed release");
                    }
                    return Err(ReservationError::Internal(
                        "Error while deleting reservation".to_string(),
                    ));
                }
            }
        }

        info!(reservation_id = %reservation_id, room_id = %room_id, "Reservation deleted");
        Ok(())
    }

    /// Sets a room's availability. The only sanctioned writer of the flag.
    pub async fn update_room_availability(
        &self,
        room_id: Uuid,
        availability: Availability,
    ) -> Result<(), ReservationError> {
        if self
            .rooms
            .set_room_availability(room_id, availability)
            .await?
        {
            Ok(())
        } else {
            Err(ReservationError::RoomNotFound)
        }
    }

    async fn load_room(&self, room_id: Uuid) -> Result<Room, ReservationError> {
        self.rooms
            .find_room(room_id)
            .await?
            .ok_or(ReservationError::RoomNotFound)
    }

    async fn restore(&self, previous: &Reservation) {
        match self.reservations.reopen_reservation(previous).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(reservation_id = %previous.reservation_id, "Reservation changed before restore")
            }
            Err(e) => {
                error!(reservation_id = %previous.reservation_id, error = %e, "Could not restore reservation")
            }
        }
    }
}

/// Runs a two-write operation on its own task and waits for it.
///
/// If the waiting future is dropped the task still finishes, including any
/// compensation.
async fn detached<T, F>(operation: F) -> Result<T, ReservationError>
where
    F: Future<Output = Result<T, ReservationError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(operation).await.map_err(|e| {
        error!(error = %e, "Reservation task failed");
        ReservationError::Internal("Error while updating reservation".to_string())
    })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration as Days};
    use hotel_core::result::AppResult;
    use hotel_core::AppError;
    use hotel_database::MemoryStore;
    use hotel_entity::reservation::ReservationChanges;
    use hotel_entity::room::{NewRoom, RoomDetailsUpdate, RoomType};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Notify;

    use crate::reservation::request::CheckoutFlag;

    fn engine_with(
        rooms: Arc<dyn RoomStore>,
        reservations: Arc<dyn ReservationStore>,
        timeout_secs: u64,
    ) -> ReservationEngine {
        ReservationEngine::new(
            rooms,
            reservations,
            &ReservationConfig {
                booking_timeout_seconds: timeout_secs,
            },
        )
    }

    fn engine(store: &MemoryStore) -> ReservationEngine {
        engine_with(Arc::new(store.clone()), Arc::new(store.clone()), 100)
    }

    async fn seed_room(store: &MemoryStore, price: f64, capacity: i32) -> Room {
        let room = Room::from_new(NewRoom {
            branch_id: Uuid::new_v4(),
            room_number: 101,
            room_type: RoomType::Double,
            cleaning_status: None,
            price,
            capacity,
            images: vec![],
        });
        store.insert_room(&room).await.unwrap();
        room
    }

    fn booking(room_id: Uuid, deposit: f64, guests: i32) -> BookingRequest {
        let check_in: DateTime<Utc> = Utc::now();
        BookingRequest {
            room_id: Some(room_id),
            guest_id: Some(Uuid::new_v4()),
            check_in_time: Some(check_in),
            check_out_time: Some(check_in + Days::days(3)),
            deposit_amount: Some(deposit),
            numbers_of_guests: Some(guests),
        }
    }

    fn amendment(reservation: &Reservation, deposit: f64, checkout: &str) -> ReservationUpdateRequest {
        ReservationUpdateRequest {
            check_in_time: Some(reservation.check_in_time),
            check_out_time: Some(reservation.check_out_time),
            deposit_amount: Some(deposit),
            numbers_of_guests: Some(reservation.numbers_of_guests),
            is_checked_out: Some(CheckoutFlag::Text(checkout.to_string())),
        }
    }

    async fn availability(store: &MemoryStore, room_id: Uuid) -> Availability {
        store.find_room(room_id).await.unwrap().unwrap().availability
    }

    #[tokio::test]
    async fn test_pending_amount_is_price_minus_deposit() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;

        let reservation = engine(&store)
            .create_reservation(booking(room.room_id, 500.0, 2))
            .await
            .unwrap();

        assert_eq!(reservation.pending_amount, 300.0);
        assert!(!reservation.is_checked_out);
        assert_eq!(availability(&store, room.room_id).await, Availability::Occupied);
    }

    #[tokio::test]
    async fn test_occupied_room_rejected_without_row() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        engine
            .create_reservation(booking(room.room_id, 100.0, 1))
            .await
            .unwrap();

        let second = engine.create_reservation(booking(room.room_id, 100.0, 1)).await;
        assert!(matches!(second, Err(ReservationError::RoomOccupied)));
        assert_eq!(store.reservations_for_room(room.room_id).await, 1);
    }

    #[tokio::test]
    async fn test_capacity_and_deposit_rules() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);

        let crowded = engine.create_reservation(booking(room.room_id, 100.0, 3)).await;
        assert!(matches!(crowded, Err(ReservationError::CapacityExceeded)));

        let overpaid = engine.create_reservation(booking(room.room_id, 900.0, 1)).await;
        assert!(matches!(overpaid, Err(ReservationError::DepositExceedsPrice)));

        let missing = engine.create_reservation(booking(Uuid::new_v4(), 100.0, 1)).await;
        assert!(matches!(missing, Err(ReservationError::RoomNotFound)));

        assert_eq!(availability(&store, room.room_id).await, Availability::Available);
    }

    #[tokio::test]
    async fn test_create_then_delete_restores_room() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);

        let reservation = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();
        engine
            .delete_reservation(reservation.reservation_id, room.room_id)
            .await
            .unwrap();

        assert_eq!(availability(&store, room.room_id).await, Availability::Available);
        assert!(matches!(
            engine.get_reservation(reservation.reservation_id).await,
            Err(ReservationError::ReservationNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_with_wrong_room_rejected() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        let reservation = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();

        let result = engine
            .delete_reservation(reservation.reservation_id, Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(ReservationError::Validation(_))));
        assert_eq!(store.reservations_for_room(room.room_id).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bookings_one_winner() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                let request = booking(room.room_id, 100.0, 1);
                tokio::spawn(async move { engine.create_reservation(request).await })
            })
            .collect();

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(ReservationError::RoomOccupied) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.reservations_for_room(room.room_id).await, 1);
    }

    #[tokio::test]
    async fn test_update_recomputes_pending_and_checkout_releases() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        let reservation = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();

        let updated = engine
            .update_reservation_details(
                reservation.reservation_id,
                amendment(&reservation, 650.0, "false"),
            )
            .await
            .unwrap();
        assert_eq!(updated.pending_amount, 150.0);
        assert_eq!(availability(&store, room.room_id).await, Availability::Occupied);

        let checked_out = engine
            .update_reservation_details(
                reservation.reservation_id,
                amendment(&reservation, 800.0, "true"),
            )
            .await
            .unwrap();
        assert!(checked_out.is_checked_out);
        assert_eq!(checked_out.pending_amount, 0.0);
        assert_eq!(availability(&store, room.room_id).await, Availability::Available);

        let again = engine
            .update_reservation_details(
                reservation.reservation_id,
                amendment(&reservation, 800.0, "true"),
            )
            .await;
        assert!(matches!(again, Err(ReservationError::AlreadyCheckedOut)));
    }

    #[tokio::test]
    async fn test_update_rejects_bad_checkout_flag() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        let reservation = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();

        let result = engine
            .update_reservation_details(
                reservation.reservation_id,
                amendment(&reservation, 200.0, "maybe"),
            )
            .await;
        match result {
            Err(ReservationError::Validation(message)) => {
                assert_eq!(message, "Is check out must be true or false")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deleting_checked_out_reservation_keeps_room_state() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        let reservation = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();
        engine
            .update_reservation_details(
                reservation.reservation_id,
                amendment(&reservation, 200.0, "true"),
            )
            .await
            .unwrap();

        // A new guest takes the room; deleting the old stay must not free it.
        engine
            .create_reservation(booking(room.room_id, 200.0, 1))
            .await
            .unwrap();
        engine
            .delete_reservation(reservation.reservation_id, room.room_id)
            .await
            .unwrap();
        assert_eq!(availability(&store, room.room_id).await, Availability::Occupied);
    }

    /// Reservation store that refuses inserts.
    struct RejectingInserts(MemoryStore);

    #[async_trait]
    impl ReservationStore for RejectingInserts {
        async fn insert_reservation(&self, _reservation: &Reservation) -> AppResult<()> {
            Err(AppError::database("disk full"))
        }

        async fn find_reservation(&self, id: Uuid) -> AppResult<Option<Reservation>> {
            self.0.find_reservation(id).await
        }

        async fn update_active_reservation(
            &self,
            id: Uuid,
            changes: &ReservationChanges,
        ) -> AppResult<bool> {
            self.0.update_active_reservation(id, changes).await
        }

        async fn reopen_reservation(&self, previous: &Reservation) -> AppResult<bool> {
            self.0.reopen_reservation(previous).await
        }

        async fn delete_reservation(&self, id: Uuid) -> AppResult<Option<Reservation>> {
            self.0.delete_reservation(id).await
        }
    }

    #[tokio::test]
    async fn test_failed_insert_releases_room() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine_with(
            Arc::new(store.clone()),
            Arc::new(RejectingInserts(store.clone())),
            100,
        );

        let result = engine.create_reservation(booking(room.room_id, 100.0, 1)).await;
        assert!(matches!(result, Err(ReservationError::Internal(_))));
        assert_eq!(availability(&store, room.room_id).await, Availability::Available);
        assert_eq!(store.reservations_for_room(room.room_id).await, 0);
    }

    /// Room store whose availability writes fail; claims still work.
    struct StuckRooms {
        inner: MemoryStore,
        delay: Option<std::time::Duration>,
    }

    #[async_trait]
    impl RoomStore for StuckRooms {
        async fn find_room(&self, room_id: Uuid) -> AppResult<Option<Room>> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.inner.find_room(room_id).await
        }

        async fn room_number_taken(
            &self,
            branch_id: Uuid,
            room_number: i32,
            excluding: Option<Uuid>,
        ) -> AppResult<bool> {
            self.inner
                .room_number_taken(branch_id, room_number, excluding)
                .await
        }

        async fn insert_room(&self, room: &Room) -> AppResult<()> {
            self.inner.insert_room(room).await
        }

        async fn update_room_details(
            &self,
            room_id: Uuid,
            update: &RoomDetailsUpdate,
        ) -> AppResult<Option<Room>> {
            self.inner.update_room_details(room_id, update).await
        }

        async fn set_room_availability(&self, _room_id: Uuid, _a: Availability) -> AppResult<bool> {
            Err(AppError::database("connection reset"))
        }

        async fn claim_room(&self, room_id: Uuid) -> AppResult<bool> {
            self.inner.claim_room(room_id).await
        }

        async fn room_has_reservations(&self, room_id: Uuid) -> AppResult<bool> {
            self.inner.room_has_reservations(room_id).await
        }

        async fn delete_available_room(&self, room_id: Uuid) -> AppResult<bool> {
            self.inner.delete_available_room(room_id).await
        }
    }

    #[tokio::test]
    async fn test_failed_release_reinserts_reservation() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let rooms = StuckRooms {
            inner: store.clone(),
            delay: None,
        };
        let engine = engine_with(Arc::new(rooms), Arc::new(store.clone()), 100);
        let reservation = engine
            .create_reservation(booking(room.room_id, 100.0, 1))
            .await
            .unwrap();

        let result = engine
            .delete_reservation(reservation.reservation_id, room.room_id)
            .await;
        assert!(matches!(result, Err(ReservationError::Internal(_))));
        assert_eq!(
            engine.get_reservation(reservation.reservation_id).await.unwrap(),
            reservation
        );
    }

    #[tokio::test]
    async fn test_failed_checkout_release_restores_reservation() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let rooms = StuckRooms {
            inner: store.clone(),
            delay: None,
        };
        let engine = engine_with(Arc::new(rooms), Arc::new(store.clone()), 100);
        let reservation = engine
            .create_reservation(booking(room.room_id, 100.0, 1))
            .await
            .unwrap();

        let result = engine
            .update_reservation_details(
                reservation.reservation_id,
                amendment(&reservation, 100.0, "true"),
            )
            .await;
        assert!(matches!(result, Err(ReservationError::Internal(_))));
        let stored = engine.get_reservation(reservation.reservation_id).await.unwrap();
        assert!(!stored.is_checked_out);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_booking_times_out() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let rooms = StuckRooms {
            inner: store.clone(),
            delay: Some(std::time::Duration::from_secs(5)),
        };
        let engine = engine_with(Arc::new(rooms), Arc::new(store.clone()), 1);

        let result = engine.create_reservation(booking(room.room_id, 100.0, 1)).await;
        assert!(matches!(result, Err(ReservationError::Timeout)));
    }

    /// Holds the first call that passes through it until released.
    #[derive(Default)]
    struct Gate {
        armed: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    impl Gate {
        fn armed() -> Arc<Self> {
            let gate = Self::default();
            gate.armed.store(true, Ordering::SeqCst);
            Arc::new(gate)
        }

        async fn pass(&self) {
            if self.armed.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
        }
    }

    /// Room store whose first `find_room` waits on a gate.
    struct GatedRooms {
        inner: MemoryStore,
        gate: Arc<Gate>,
    }

    #[async_trait]
    impl RoomStore for GatedRooms {
        async fn find_room(&self, room_id: Uuid) -> AppResult<Option<Room>> {
            self.gate.pass().await;
            self.inner.find_room(room_id).await
        }

        async fn room_number_taken(
            &self,
            branch_id: Uuid,
            room_number: i32,
            excluding: Option<Uuid>,
        ) -> AppResult<bool> {
            self.inner
                .room_number_taken(branch_id, room_number, excluding)
                .await
        }

        async fn insert_room(&self, room: &Room) -> AppResult<()> {
            self.inner.insert_room(room).await
        }

        async fn update_room_details(
            &self,
            room_id: Uuid,
            update: &RoomDetailsUpdate,
        ) -> AppResult<Option<Room>> {
            self.inner.update_room_details(room_id, update).await
        }

        async fn set_room_availability(&self, room_id: Uuid, a: Availability) -> AppResult<bool> {
            self.inner.set_room_availability(room_id, a).await
        }

        async fn claim_room(&self, room_id: Uuid) -> AppResult<bool> {
            self.inner.claim_room(room_id).await
        }

        async fn room_has_reservations(&self, room_id: Uuid) -> AppResult<bool> {
            self.inner.room_has_reservations(room_id).await
        }

        async fn delete_available_room(&self, room_id: Uuid) -> AppResult<bool> {
            self.inner.delete_available_room(room_id).await
        }
    }

    /// Reservation store whose first delete waits on a gate.
    struct GatedDeletes {
        inner: MemoryStore,
        gate: Arc<Gate>,
    }

    #[async_trait]
    impl ReservationStore for GatedDeletes {
        async fn insert_reservation(&self, reservation: &Reservation) -> AppResult<()> {
            self.inner.insert_reservation(reservation).await
        }

        async fn find_reservation(&self, id: Uuid) -> AppResult<Option<Reservation>> {
            self.inner.find_reservation(id).await
        }

        async fn update_active_reservation(
            &self,
            id: Uuid,
            changes: &ReservationChanges,
        ) -> AppResult<bool> {
            self.inner.update_active_reservation(id, changes).await
        }

        async fn reopen_reservation(&self, previous: &Reservation) -> AppResult<bool> {
            self.inner.reopen_reservation(previous).await
        }

        async fn delete_reservation(&self, id: Uuid) -> AppResult<Option<Reservation>> {
            self.gate.pass().await;
            self.inner.delete_reservation(id).await
        }
    }

    #[tokio::test]
    async fn test_stale_amendment_cannot_undo_checkout() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        let first = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();

        let gate = Gate::armed();
        let slow = engine_with(
            Arc::new(GatedRooms {
                inner: store.clone(),
                gate: gate.clone(),
            }),
            Arc::new(store.clone()),
            100,
        );
        let request = amendment(&first, 300.0, "false");
        let id = first.reservation_id;
        let stale = tokio::spawn(async move { slow.update_reservation_details(id, request).await });
        gate.entered.notified().await;

        // Checkout and a new booking land while the amendment is stalled.
        engine
            .update_reservation_details(id, amendment(&first, 800.0, "true"))
            .await
            .unwrap();
        engine
            .create_reservation(booking(room.room_id, 200.0, 1))
            .await
            .unwrap();

        gate.release.notify_one();
        let result = stale.await.unwrap();
        assert!(matches!(result, Err(ReservationError::AlreadyCheckedOut)));

        let stored = engine.get_reservation(id).await.unwrap();
        assert!(stored.is_checked_out);
        assert_eq!(store.active_reservations_for_room(room.room_id).await, 1);
        assert!(matches!(
            engine.create_reservation(booking(room.room_id, 200.0, 1)).await,
            Err(ReservationError::RoomOccupied)
        ));
    }

    #[tokio::test]
    async fn test_stale_delete_does_not_free_rebooked_room() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        let first = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();

        let gate = Gate::armed();
        let slow = engine_with(
            Arc::new(store.clone()),
            Arc::new(GatedDeletes {
                inner: store.clone(),
                gate: gate.clone(),
            }),
            100,
        );
        let id = first.reservation_id;
        let room_id = room.room_id;
        let stale = tokio::spawn(async move { slow.delete_reservation(id, room_id).await });
        gate.entered.notified().await;

        // The stay ends and the room is rebooked while the delete is stalled.
        engine
            .update_reservation_details(id, amendment(&first, 800.0, "true"))
            .await
            .unwrap();
        engine
            .create_reservation(booking(room.room_id, 200.0, 1))
            .await
            .unwrap();

        gate.release.notify_one();
        stale.await.unwrap().unwrap();

        assert_eq!(availability(&store, room.room_id).await, Availability::Occupied);
        assert_eq!(store.active_reservations_for_room(room.room_id).await, 1);
        assert!(matches!(
            engine.create_reservation(booking(room.room_id, 200.0, 1)).await,
            Err(ReservationError::RoomOccupied)
        ));
    }

    #[tokio::test]
    async fn test_amendment_survives_dropped_caller() {
        let store = MemoryStore::new();
        let room = seed_room(&store, 800.0, 2).await;
        let engine = engine(&store);
        let first = engine
            .create_reservation(booking(room.room_id, 200.0, 2))
            .await
            .unwrap();

        let gate = Gate::armed();
        let slow = engine_with(
            Arc::new(GatedRooms {
                inner: store.clone(),
                gate: gate.clone(),
            }),
            Arc::new(store.clone()),
            100,
        );
        let id = first.reservation_id;
        let request = amendment(&first, 800.0, "true");
        let caller = tokio::spawn(async move { slow.update_reservation_details(id, request).await });
        gate.entered.notified().await;
        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());

        gate.release.notify_one();
        for _ in 0..100 {
            if availability(&store, room.room_id).await == Availability::Available {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(engine.get_reservation(id).await.unwrap().is_checked_out);
        assert_eq!(availability(&store, room.room_id).await, Availability::Available);
    }
}
