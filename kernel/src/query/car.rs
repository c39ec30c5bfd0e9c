use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Car, CarFilter, CarId, CarPlate};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CarQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError>;

    /// Like [`CarQuery::find_by_id`], and the car stays locked against other
    /// writers until `con` ends.
    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError>;

    async fn find_by_plate(
        &self,
        con: &mut Self::Transaction,
        plate: &CarPlate,
    ) -> error_stack::Result<Option<Car>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        filter: &CarFilter,
    ) -> error_stack::Result<Vec<Car>, KernelError>;
}

pub trait DependOnCarQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CarQuery: CarQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn car_query(&self) -> &Self::CarQuery;
}
