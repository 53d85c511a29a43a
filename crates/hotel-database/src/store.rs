//! Store traits consumed by the services.
//!
//! Every store is keyed by business identifiers (`room_id`, `guest_id`,
//! `reservation_id`). Implementations live in [`crate::repositories`]
//! (PostgreSQL) and [`crate::memory`] (in-process).

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_entity::guest::Guest;
use hotel_entity::principal::{AccessType, NewPrincipal, Principal, PrincipalRef};
use hotel_entity::reservation::{Reservation, ReservationChanges};
use hotel_entity::room::{Availability, Room, RoomDetailsUpdate};
use hotel_entity::verification::EmailVerification;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{
    GuestRepository, PrincipalRepository, ReservationRepository, RoomRepository,
    VerificationRepository,
};

/// Login lookups and token bookkeeping across every principal kind.
#[async_trait]
pub trait PrincipalStore: Send + Sync + 'static {
    /// Find a principal of the given kind by email (case-insensitive).
    async fn find_principal_by_email(
        &self,
        kind: AccessType,
        email: &str,
    ) -> AppResult<Option<Principal>>;

    /// Create a staff principal. Guests go through [`GuestStore::insert_guest`].
    async fn insert_principal(&self, principal: NewPrincipal) -> AppResult<Principal>;

    /// Overwrite the stored token pair and bump `updated_at`.
    ///
    /// Fails when the referenced row does not exist.
    async fn store_tokens(
        &self,
        principal: PrincipalRef,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<()>;
}

/// Guest records and the verification flag.
#[async_trait]
pub trait GuestStore: Send + Sync + 'static {
    /// Insert a new guest.
    async fn insert_guest(&self, guest: &Guest) -> AppResult<()>;

    /// Find a guest by id.
    async fn find_guest(&self, guest_id: Uuid) -> AppResult<Option<Guest>>;

    /// Find a guest by email (case-insensitive).
    async fn find_guest_by_email(&self, email: &str) -> AppResult<Option<Guest>>;

    /// Set `is_verified = true`. Idempotent.
    async fn mark_guest_verified(&self, guest_id: Uuid) -> AppResult<()>;
}

/// Rooms and their availability flag.
#[async_trait]
pub trait RoomStore: Send + Sync + 'static {
    /// Find a room by id.
    async fn find_room(&self, room_id: Uuid) -> AppResult<Option<Room>>;

    /// Whether another room in the branch already uses `room_number`.
    async fn room_number_taken(
        &self,
        branch_id: Uuid,
        room_number: i32,
        excluding: Option<Uuid>,
    ) -> AppResult<bool>;

    /// Insert a new room.
    async fn insert_room(&self, room: &Room) -> AppResult<()>;

    /// Apply a details update. Returns the updated room, `None` when absent.
    async fn update_room_details(
        &self,
        room_id: Uuid,
        update: &RoomDetailsUpdate,
    ) -> AppResult<Option<Room>>;

    /// Unconditionally set availability. Returns `false` when the room is absent.
    async fn set_room_availability(
        &self,
        room_id: Uuid,
        availability: Availability,
    ) -> AppResult<bool>;

    /// Atomically flip `available -> occupied`.
    ///
    /// Returns `false` when the room is absent or already occupied, in which
    /// case nothing was written.
    async fn claim_room(&self, room_id: Uuid) -> AppResult<bool>;

    /// Whether any reservation, active or checked out, references the room.
    async fn room_has_reservations(&self, room_id: Uuid) -> AppResult<bool>;

    /// Delete a room if it is available and has no reservation history.
    /// Returns `false` otherwise.
    async fn delete_available_room(&self, room_id: Uuid) -> AppResult<bool>;
}

/// Reservation rows.
#[async_trait]
pub trait ReservationStore: Send + Sync + 'static {
    /// Insert a reservation.
    async fn insert_reservation(&self, reservation: &Reservation) -> AppResult<()>;

    /// Find a reservation by id.
    async fn find_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Reservation>>;

    /// Overwrite the mutable fields of a reservation that is not checked out.
    ///
    /// Returns `false` when the reservation is absent or already checked
    /// out, in which case nothing was written.
    async fn update_active_reservation(
        &self,
        reservation_id: Uuid,
        changes: &ReservationChanges,
    ) -> AppResult<bool>;

    /// Put a checked-out reservation back to `previous`. Returns `false`
    /// when it is absent or no longer checked out.
    async fn reopen_reservation(&self, previous: &Reservation) -> AppResult<bool>;

    /// Delete a reservation and return the row as it was at deletion.
    async fn delete_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Reservation>>;
}

/// Pending email verifications, one per guest.
#[async_trait]
pub trait VerificationStore: Send + Sync + 'static {
    /// Insert or replace the guest's pending verification.
    async fn upsert_verification(&self, record: &EmailVerification) -> AppResult<()>;

    /// Find the guest's pending verification.
    async fn find_verification(&self, guest_id: Uuid) -> AppResult<Option<EmailVerification>>;

    /// Delete the guest's pending verification. Returns `false` when absent.
    async fn delete_verification(&self, guest_id: Uuid) -> AppResult<bool>;
}

/// Every store behind one handle, as wired into the services.
#[derive(Clone)]
pub struct Stores {
    // ── Principals ──
    pub principals: Arc<dyn PrincipalStore>,
    pub guests: Arc<dyn GuestStore>,
    pub verifications: Arc<dyn VerificationStore>,

    // ── Inventory ──
    pub rooms: Arc<dyn RoomStore>,
    pub reservations: Arc<dyn ReservationStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            principals: Arc::new(PrincipalRepository::new(pool.clone())),
            guests: Arc::new(GuestRepository::new(pool.clone())),
            verifications: Arc::new(VerificationRepository::new(pool.clone())),
            rooms: Arc::new(RoomRepository::new(pool.clone())),
            reservations: Arc::new(ReservationRepository::new(pool)),
        }
    }

    /// Stores backed by a single in-memory state.
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            principals: store.clone(),
            guests: store.clone(),
            verifications: store.clone(),
            rooms: store.clone(),
            reservations: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
