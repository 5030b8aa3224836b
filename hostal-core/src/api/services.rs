//! Resource bindings and the few calls that only make sense for one resource.

use serde_json::json;

use super::pagination::PageRequest;
use super::resource::{Resource, ResourceService};
use crate::error::HostalResult;
use crate::models::{
    Client, Reservation, ReservationDetail, ReservationStatus, Room, RoomCategory, RoomState,
    SupportMessage,
};

const LOOKUP_PAGE_SIZE: u32 = 100;

impl Resource for Room {
    const PATH: &'static str = "habitacions";
    const LABEL: &'static str = "habitacion";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Resource for RoomCategory {
    const PATH: &'static str = "categoria-habitacions";
    const LABEL: &'static str = "categoriaHabitacion";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Resource for RoomState {
    const PATH: &'static str = "estado-habitacions";
    const LABEL: &'static str = "estadoHabitacion";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Resource for Reservation {
    const PATH: &'static str = "reservas";
    const LABEL: &'static str = "reserva";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Resource for ReservationDetail {
    const PATH: &'static str = "reserva-detalles";
    const LABEL: &'static str = "reservaDetalle";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Resource for Client {
    const PATH: &'static str = "clientes";
    const LABEL: &'static str = "cliente";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Resource for SupportMessage {
    const PATH: &'static str = "mensaje-soportes";
    const LABEL: &'static str = "mensajeSoporte";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl ResourceService<'_, Reservation> {
    /// Moves a reservation to `status` with a single partial update.
    pub async fn set_status(&self, id: i64, status: ReservationStatus) -> HostalResult<Reservation> {
        self.patch(id, json!({ "estado": status })).await
    }
}

impl ResourceService<'_, ReservationDetail> {
    /// Every detail line attached to a reservation.
    pub async fn for_reservation(&self, reservation_id: i64) -> HostalResult<Vec<ReservationDetail>> {
        let filters = [("reservaId.equals".to_string(), reservation_id.to_string())];
        let details = self.list_all_where(LOOKUP_PAGE_SIZE, &filters).await?;

        // Guard against backends that ignore the criteria parameter.
        Ok(details
            .into_iter()
            .filter(|d| d.reservation_id().map_or(true, |r| r == reservation_id))
            .collect())
    }
}

impl ResourceService<'_, SupportMessage> {
    /// Messages exchanged with one user, oldest first.
    pub async fn for_user(&self, user_id: &str) -> HostalResult<Vec<SupportMessage>> {
        let filters = [("userId.equals".to_string(), user_id.to_string())];
        let mut messages = self.list_all_where(LOOKUP_PAGE_SIZE, &filters).await?;
        messages.retain(|m| m.user_id.as_deref().map_or(true, |u| u == user_id));
        messages.sort_by_key(|m| m.sent_at);
        Ok(messages)
    }

    pub async fn mark_read(&self, id: i64) -> HostalResult<SupportMessage> {
        self.patch(id, json!({ "leido": true })).await
    }
}

impl ResourceService<'_, RoomCategory> {
    /// Active categories, used to populate the room form choices.
    pub async fn active(&self) -> HostalResult<Vec<RoomCategory>> {
        let page = self
            .list(&PageRequest::new(0, LOOKUP_PAGE_SIZE))
            .await?;
        Ok(page.items.into_iter().filter(|c| c.is_active()).collect())
    }
}

impl ResourceService<'_, RoomState> {
    pub async fn active(&self) -> HostalResult<Vec<RoomState>> {
        let page = self
            .list(&PageRequest::new(0, LOOKUP_PAGE_SIZE))
            .await?;
        Ok(page.items.into_iter().filter(|s| s.is_active()).collect())
    }
}
