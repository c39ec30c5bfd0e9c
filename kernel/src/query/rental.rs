use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CarId, Rental, RentalId, RentalPeriod, SelectLimit, SelectOffset, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    /// Non-cancelled rentals of `car_id` whose window intersects `period`.
    async fn find_overlapping(
        &self,
        con: &mut Self::Transaction,
        car_id: &CarId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;

    async fn find_by_car_id(
        &self,
        con: &mut Self::Transaction,
        car_id: &CarId,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;

    async fn find_by_renter_id(
        &self,
        con: &mut Self::Transaction,
        renter_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_query(&self) -> &Self::RentalQuery;
}
