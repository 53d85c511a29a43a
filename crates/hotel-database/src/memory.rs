//! In-memory store using a Tokio mutex, for tests and single-node demos.
//!
//! One mutex guards all tables, so every trait method is atomic with
//! respect to every other; `claim_room` is a true compare-and-swap.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_entity::guest::Guest;
use hotel_entity::principal::{AccessType, NewPrincipal, Principal, PrincipalRef};
use hotel_entity::reservation::{Reservation, ReservationChanges};
use hotel_entity::room::{Availability, Room, RoomDetailsUpdate};
use hotel_entity::verification::EmailVerification;

use crate::store::{GuestStore, PrincipalStore, ReservationStore, RoomStore, VerificationStore};

#[derive(Debug, Default)]
struct InnerState {
    /// Staff principals keyed by (kind, id).
    staff: HashMap<PrincipalRef, Principal>,
    guests: HashMap<Uuid, Guest>,
    rooms: HashMap<Uuid, Room>,
    reservations: HashMap<Uuid, Reservation>,
    /// Keyed by guest id: one pending verification per guest.
    verifications: HashMap<Uuid, EmailVerification>,
}

/// In-memory implementation of every store trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reservations currently held for `room_id`.
    pub async fn reservations_for_room(&self, room_id: Uuid) -> usize {
        let state = self.state.lock().await;
        state
            .reservations
            .values()
            .filter(|r| r.room_id == room_id)
            .count()
    }

    /// Number of reservations for `room_id` that are not checked out.
    pub async fn active_reservations_for_room(&self, room_id: Uuid) -> usize {
        let state = self.state.lock().await;
        state
            .reservations
            .values()
            .filter(|r| r.room_id == room_id && r.is_active())
            .count()
    }
}

#[async_trait]
impl PrincipalStore for MemoryStore {
    async fn find_principal_by_email(
        &self,
        kind: AccessType,
        email: &str,
    ) -> AppResult<Option<Principal>> {
        let state = self.state.lock().await;
        if kind == AccessType::Guest {
            return Ok(state
                .guests
                .values()
                .find(|g| g.email.eq_ignore_ascii_case(email))
                .map(Guest::to_principal));
        }
        Ok(state
            .staff
            .values()
            .find(|p| p.access_type == kind && p.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_principal(&self, new: NewPrincipal) -> AppResult<Principal> {
        if new.access_type == AccessType::Guest {
            return Err(AppError::validation(
                "Guests must be created through the guest store",
            ));
        }
        let mut state = self.state.lock().await;
        let duplicate = state
            .staff
            .values()
            .any(|p| p.access_type == new.access_type && p.email.eq_ignore_ascii_case(&new.email));
        if duplicate {
            return Err(AppError::conflict(format!(
                "A {} with this email already exists",
                new.access_type
            )));
        }
        let now = Utc::now();
        let principal = Principal {
            id: Uuid::new_v4(),
            access_type: new.access_type,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            password_hash: new.password_hash,
            token: None,
            refresh_token: None,
            is_verified: true,
            created_at: now,
            updated_at: now,
        };
        state.staff.insert(principal.reference(), principal.clone());
        Ok(principal)
    }

    async fn store_tokens(
        &self,
        principal: PrincipalRef,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        if principal.kind == AccessType::Guest {
            let guest = state
                .guests
                .get_mut(&principal.id)
                .ok_or_else(|| AppError::database(format!("No row for {principal}")))?;
            guest.token = Some(access_token.to_string());
            guest.refresh_token = Some(refresh_token.to_string());
            guest.updated_at = now;
        } else {
            let staff = state
                .staff
                .get_mut(&principal)
                .ok_or_else(|| AppError::database(format!("No row for {principal}")))?;
            staff.token = Some(access_token.to_string());
            staff.refresh_token = Some(refresh_token.to_string());
            staff.updated_at = now;
        }
        Ok(())
    }
}

#[async_trait]
impl GuestStore for MemoryStore {
    async fn insert_guest(&self, guest: &Guest) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state
            .guests
            .values()
            .any(|g| g.email.eq_ignore_ascii_case(&guest.email))
        {
            return Err(AppError::conflict("Email already in use by another user."));
        }
        state.guests.insert(guest.guest_id, guest.clone());
        Ok(())
    }

    async fn find_guest(&self, guest_id: Uuid) -> AppResult<Option<Guest>> {
        Ok(self.state.lock().await.guests.get(&guest_id).cloned())
    }

    async fn find_guest_by_email(&self, email: &str) -> AppResult<Option<Guest>> {
        let state = self.state.lock().await;
        Ok(state
            .guests
            .values()
            .find(|g| g.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn mark_guest_verified(&self, guest_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let guest = state
            .guests
            .get_mut(&guest_id)
            .ok_or_else(|| AppError::not_found(format!("Guest {guest_id} not found")))?;
        guest.is_verified = true;
        guest.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn find_room(&self, room_id: Uuid) -> AppResult<Option<Room>> {
        Ok(self.state.lock().await.rooms.get(&room_id).cloned())
    }

    async fn room_number_taken(
        &self,
        branch_id: Uuid,
        room_number: i32,
        excluding: Option<Uuid>,
    ) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state.rooms.values().any(|r| {
            r.branch_id == branch_id
                && r.room_number == room_number
                && Some(r.room_id) != excluding
        }))
    }

    async fn insert_room(&self, room: &Room) -> AppResult<()> {
        self.state
            .lock()
            .await
            .rooms
            .insert(room.room_id, room.clone());
        Ok(())
    }

    async fn update_room_details(
        &self,
        room_id: Uuid,
        update: &RoomDetailsUpdate,
    ) -> AppResult<Option<Room>> {
        let mut state = self.state.lock().await;
        Ok(state.rooms.get_mut(&room_id).map(|room| {
            update.apply(room);
            room.clone()
        }))
    }

    async fn set_room_availability(
        &self,
        room_id: Uuid,
        availability: Availability,
    ) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(match state.rooms.get_mut(&room_id) {
            Some(room) => {
                room.availability = availability;
                room.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn claim_room(&self, room_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(match state.rooms.get_mut(&room_id) {
            Some(room) if room.availability == Availability::Available => {
                room.availability = Availability::Occupied;
                room.updated_at = Utc::now();
                true
            }
            _ => false,
        })
    }

    async fn room_has_reservations(&self, room_id: Uuid) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state.reservations.values().any(|r| r.room_id == room_id))
    }

    async fn delete_available_room(&self, room_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let available = state
            .rooms
            .get(&room_id)
            .is_some_and(|r| r.availability == Availability::Available)
            && !state.reservations.values().any(|r| r.room_id == room_id);
        if available {
            state.rooms.remove(&room_id);
        }
        Ok(available)
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn insert_reservation(&self, reservation: &Reservation) -> AppResult<()> {
        self.state
            .lock()
            .await
            .reservations
            .insert(reservation.reservation_id, reservation.clone());
        Ok(())
    }

    async fn find_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Reservation>> {
        Ok(self
            .state
            .lock()
            .await
            .reservations
            .get(&reservation_id)
            .cloned())
    }

    async fn update_active_reservation(
        &self,
        reservation_id: Uuid,
        changes: &ReservationChanges,
    ) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(match state.reservations.get_mut(&reservation_id) {
            Some(reservation) if !reservation.is_checked_out => {
                changes.apply(reservation);
                true
            }
            _ => false,
        })
    }

    async fn reopen_reservation(&self, previous: &Reservation) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(match state.reservations.get_mut(&previous.reservation_id) {
            Some(reservation) if reservation.is_checked_out => {
                *reservation = previous.clone();
                true
            }
            _ => false,
        })
    }

    async fn delete_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Reservation>> {
        Ok(self
            .state
            .lock()
            .await
            .reservations
            .remove(&reservation_id))
    }
}
