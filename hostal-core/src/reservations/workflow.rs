//! Multi-step reservation operations.
//!
//! The backend has no transactional endpoint for a reservation with its
//! rooms, so creation and edits are a sequence of calls. A failure midway
//! returns the error and leaves whatever already succeeded in place; the
//! caller reloads the reservation to see the resulting state.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::gateway::ReservationGateway;
use super::reconcile::plan_room_changes;
use super::status::{available_actions, check_transition, StatusAction};
use crate::error::{HostalError, HostalResult};
use crate::forms::ReservationForm;
use crate::models::{
    Client, Reservation, ReservationDetail, ReservationStatus, Room, RoomCategory,
};

#[derive(Debug, Clone, Serialize)]
pub struct CreatedReservation {
    pub reservation: Reservation,
    pub details: Vec<ReservationDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub reservation: Reservation,
    pub added: Vec<ReservationDetail>,
    /// Ids of the detail lines that were deleted.
    pub removed: Vec<i64>,
    pub kept: usize,
}

impl ReconcileReport {
    pub fn changed_rooms(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewLine {
    pub detail: ReservationDetail,
    /// Resolved room, absent when the lookup failed.
    pub room: Option<Room>,
}

impl OverviewLine {
    pub fn room_label(&self) -> String {
        match (&self.room, self.detail.room_id()) {
            (Some(room), _) => room.label(),
            (None, Some(id)) => format!("Room #{}", id),
            (None, None) => "Unknown room".to_string(),
        }
    }
}

/// Everything shown on the reservation detail screen.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationOverview {
    pub reservation: Reservation,
    pub client: Option<Client>,
    pub lines: Vec<OverviewLine>,
    pub nights: i64,
    pub total: f64,
    pub actions: Vec<StatusAction>,
}

impl ReservationOverview {
    pub fn status(&self) -> ReservationStatus {
        self.reservation.current_status()
    }

    /// Distinct rooms on the reservation, ascending.
    pub fn room_ids(&self) -> Vec<i64> {
        self.lines
            .iter()
            .filter_map(|l| l.detail.room_id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Creates a `PENDING` reservation and one priced detail line per selected room.
pub async fn create_reservation<G>(gateway: &G, form: &ReservationForm) -> HostalResult<CreatedReservation>
where
    G: ReservationGateway + ?Sized,
{
    let header = form.to_reservation(None, ReservationStatus::Pending)?;

    let mut room_ids = form.room_ids.clone();
    room_ids.sort_unstable();
    room_ids.dedup();
    let prices = fetch_prices(gateway, &room_ids).await?;

    let reservation = gateway.create_reservation(&header).await?;
    let reservation_id = reservation
        .id
        .ok_or_else(|| HostalError::ApiDecode("created reservation has no id".to_string()))?;
    info!(reservation_id, rooms = room_ids.len(), "Reservation created");

    let mut details = Vec::with_capacity(prices.len());
    for (room_id, price) in prices {
        let detail = ReservationDetail::new(reservation_id, room_id, price);
        details.push(gateway.create_detail(&detail).await?);
    }

    Ok(CreatedReservation {
        reservation,
        details,
    })
}

/// Saves the reservation header and reconciles its rooms with the form selection.
///
/// The current status is preserved; status changes go through [`advance`].
pub async fn edit_reservation<G>(
    gateway: &G,
    id: i64,
    form: &ReservationForm,
) -> HostalResult<ReconcileReport>
where
    G: ReservationGateway + ?Sized,
{
    let current = gateway.reservation(id).await?;
    let header = form.to_reservation(Some(id), current.current_status())?;

    let existing = gateway.details(id).await?;
    let plan = plan_room_changes(&form.room_ids, &existing);
    debug!(
        reservation_id = id,
        add = plan.to_add.len(),
        remove = plan.to_remove.len(),
        "Planned room changes"
    );

    let prices = fetch_prices(gateway, &plan.to_add).await?;
    let reservation = gateway.update_reservation(&header).await?;

    let mut added = Vec::with_capacity(prices.len());
    for (room_id, price) in prices {
        let detail = ReservationDetail::new(id, room_id, price);
        added.push(gateway.create_detail(&detail).await?);
    }

    let removed = plan.remove_ids();
    for detail_id in &removed {
        gateway.delete_detail(*detail_id).await?;
    }

    if !plan.is_empty() {
        info!(
            reservation_id = id,
            added = added.len(),
            removed = removed.len(),
            "Reservation rooms updated"
        );
    }

    Ok(ReconcileReport {
        reservation,
        added,
        removed,
        kept: plan.kept.len(),
    })
}

/// Loads a reservation together with its client, rooms and total.
///
/// The client and detail lookups run concurrently. A room that cannot be
/// resolved is shown from its detail line alone.
pub async fn load_overview<G>(gateway: &G, id: i64) -> HostalResult<ReservationOverview>
where
    G: ReservationGateway + ?Sized,
{
    let reservation = gateway.reservation(id).await?;

    let client_lookup = async {
        match reservation.client_id() {
            Some(client_id) => gateway.client(client_id).await.map(Some),
            None => Ok(None),
        }
    };
    let (client, mut details) = tokio::try_join!(client_lookup, gateway.details(id))?;
    details.sort_by_key(|d| d.id);

    let mut lookups: FuturesUnordered<_> = details
        .iter()
        .filter_map(|d| d.room_id())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|room_id| async move { (room_id, gateway.room(room_id).await) })
        .collect();

    let mut rooms = HashMap::new();
    while let Some((room_id, result)) = lookups.next().await {
        match result {
            Ok(room) => {
                rooms.insert(room_id, room);
            }
            Err(e) => warn!(room_id, error = %e, "Could not resolve room for reservation line"),
        }
    }

    let nights = reservation.nights();
    let nightly: f64 = details.iter().map(ReservationDetail::price).sum();
    let total = nightly * nights as f64;

    let lines = details
        .into_iter()
        .map(|detail| {
            let room = detail.room_id().and_then(|rid| rooms.get(&rid).cloned());
            OverviewLine { detail, room }
        })
        .collect();

    let actions = available_actions(reservation.current_status());

    Ok(ReservationOverview {
        reservation,
        client,
        lines,
        nights,
        total,
        actions,
    })
}

/// Applies a lifecycle action with a single status update.
///
/// The transition is checked against the freshly loaded status before
/// anything is sent.
pub async fn advance<G>(gateway: &G, id: i64, action: StatusAction) -> HostalResult<Reservation>
where
    G: ReservationGateway + ?Sized,
{
    let current = gateway.reservation(id).await?;
    let from = current.current_status();
    let target = check_transition(from, action)?;

    let updated = gateway.set_status(id, target).await?;
    info!(reservation_id = id, %from, to = %target, "Reservation status changed");
    Ok(updated)
}

async fn fetch_rooms<G>(gateway: &G, room_ids: &[i64]) -> HostalResult<HashMap<i64, Room>>
where
    G: ReservationGateway + ?Sized,
{
    let mut lookups: FuturesUnordered<_> = room_ids
        .iter()
        .map(|room_id| async move { gateway.room(*room_id).await.map(|room| (*room_id, room)) })
        .collect();

    let mut rooms = HashMap::with_capacity(room_ids.len());
    while let Some(result) = lookups.next().await {
        let (room_id, room) = result?;
        rooms.insert(room_id, room);
    }
    Ok(rooms)
}

/// Nightly price of each room, keyed and ordered by room id.
///
/// Rooms whose category arrives as a bare `{id}` reference get the price
/// from the category itself. A room that cannot be priced fails the whole
/// lookup.
async fn fetch_prices<G>(gateway: &G, room_ids: &[i64]) -> HostalResult<BTreeMap<i64, f64>>
where
    G: ReservationGateway + ?Sized,
{
    let rooms = fetch_rooms(gateway, room_ids).await?;

    let unpriced: BTreeSet<i64> = rooms
        .values()
        .filter_map(|room| match &room.category {
            Some(category) if category.base_price.is_none() => category.id,
            _ => None,
        })
        .collect();

    let mut lookups: FuturesUnordered<_> = unpriced
        .into_iter()
        .map(|category_id| async move {
            gateway
                .category(category_id)
                .await
                .map(|category| (category_id, category))
        })
        .collect();

    let mut category_prices = HashMap::new();
    while let Some(result) = lookups.next().await {
        let (category_id, category) = result?;
        let price = category.base_price.ok_or_else(|| {
            HostalError::ApiDecode(format!("category {} has no base price", category_id))
        })?;
        debug!(category_id, price, "Resolved category price");
        category_prices.insert(category_id, price);
    }

    rooms
        .into_iter()
        .map(|(room_id, room)| {
            let price = match &room.category {
                Some(RoomCategory {
                    base_price: Some(price),
                    ..
                }) => Some(*price),
                Some(category) => category
                    .id
                    .and_then(|id| category_prices.get(&id).copied()),
                None => None,
            };
            price
                .map(|price| (room_id, price))
                .ok_or_else(|| HostalError::Validation(format!("room {} has no category", room_id)))
        })
        .collect()
}
