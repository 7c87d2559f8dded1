use async_trait::async_trait;
use lexcita_core::scheduling::{ResourceKey, Slot};
use mockall::mock;
use uuid::Uuid;

use crate::{
    models::NewAppointment,
    repositories::appointment::{AppointmentStore, Booking},
};

// Mock store for handler tests
mock! {
    pub AppointmentStore {}

    #[async_trait]
    impl AppointmentStore for AppointmentStore {
        async fn book(&self, resource: ResourceKey, new: NewAppointment) -> eyre::Result<Booking>;

        async fn reschedule(
            &self,
            resource: ResourceKey,
            id: Uuid,
            slot: Slot,
        ) -> eyre::Result<Booking>;
    }
}
