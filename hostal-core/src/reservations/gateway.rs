use async_trait::async_trait;

use crate::api::ApiClient;
use crate::error::HostalResult;
use crate::models::{
    Client, Reservation, ReservationDetail, ReservationStatus, Room, RoomCategory,
};

/// Backend calls the reservation workflow depends on.
#[async_trait]
pub trait ReservationGateway: Send + Sync {
    async fn reservation(&self, id: i64) -> HostalResult<Reservation>;

    async fn create_reservation(&self, reservation: &Reservation) -> HostalResult<Reservation>;

    async fn update_reservation(&self, reservation: &Reservation) -> HostalResult<Reservation>;

    async fn set_status(&self, id: i64, status: ReservationStatus) -> HostalResult<Reservation>;

    async fn details(&self, reservation_id: i64) -> HostalResult<Vec<ReservationDetail>>;

    async fn create_detail(&self, detail: &ReservationDetail) -> HostalResult<ReservationDetail>;

    async fn delete_detail(&self, id: i64) -> HostalResult<()>;

    async fn room(&self, id: i64) -> HostalResult<Room>;

    async fn category(&self, id: i64) -> HostalResult<RoomCategory>;

    async fn client(&self, id: i64) -> HostalResult<Client>;
}

#[async_trait]
impl ReservationGateway for ApiClient {
    async fn reservation(&self, id: i64) -> HostalResult<Reservation> {
        self.reservations().get(id).await
    }

    async fn create_reservation(&self, reservation: &Reservation) -> HostalResult<Reservation> {
        self.reservations().create(reservation).await
    }

    async fn update_reservation(&self, reservation: &Reservation) -> HostalResult<Reservation> {
        self.reservations().update(reservation).await
    }

    async fn set_status(&self, id: i64, status: ReservationStatus) -> HostalResult<Reservation> {
        self.reservations().set_status(id, status).await
    }

    async fn details(&self, reservation_id: i64) -> HostalResult<Vec<ReservationDetail>> {
        self.reservation_details()
            .for_reservation(reservation_id)
            .await
    }

    async fn create_detail(&self, detail: &ReservationDetail) -> HostalResult<ReservationDetail> {
        self.reservation_details().create(detail).await
    }

    async fn delete_detail(&self, id: i64) -> HostalResult<()> {
        self.reservation_details().delete(id).await
    }

    async fn room(&self, id: i64) -> HostalResult<Room> {
        self.rooms().get(id).await
    }

    async fn category(&self, id: i64) -> HostalResult<RoomCategory> {
        self.categories().get(id).await
    }

    async fn client(&self, id: i64) -> HostalResult<Client> {
        self.clients().get(id).await
    }
}
