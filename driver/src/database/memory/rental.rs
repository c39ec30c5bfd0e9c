use error_stack::Report;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    CarId, Rental, RentalId, RentalPeriod, RentalStatus, SelectLimit, SelectOffset, UserId,
};
use kernel::KernelError;

use crate::database::memory::{page, InMemoryTransaction};

pub struct InMemoryRentalRepository;

fn newest_first(mut rentals: Vec<Rental>) -> Vec<Rental> {
    rentals.sort_by(|a, b| {
        b.created_at()
            .as_ref()
            .cmp(a.created_at().as_ref())
            .then_with(|| a.id().as_ref().cmp(b.id().as_ref()))
    });
    rentals
}

#[async_trait::async_trait]
impl RentalQuery for InMemoryRentalRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.working.rentals.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_overlapping(
        &self,
        con: &mut InMemoryTransaction,
        car_id: &CarId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        Ok(con
            .working
            .rentals
            .values()
            .filter(|rental| rental.car_id() == car_id)
            .filter(|rental| rental.status() != &RentalStatus::Cancelled)
            .filter(|rental| rental.period().overlaps(period))
            .cloned()
            .collect())
    }

    async fn find_by_car_id(
        &self,
        con: &mut InMemoryTransaction,
        car_id: &CarId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con
            .working
            .rentals
            .values()
            .filter(|rental| rental.car_id() == car_id)
            .cloned()
            .collect::<Vec<_>>();
        rentals.sort_by_key(|rental| *rental.period().start_date());
        Ok(rentals)
    }

    async fn find_by_renter_id(
        &self,
        con: &mut InMemoryTransaction,
        renter_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rentals = con
            .working
            .rentals
            .values()
            .filter(|rental| rental.renter_id() == renter_id)
            .cloned()
            .collect();
        Ok(page(newest_first(rentals), limit.as_ref(), offset.as_ref()))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rentals = con.working.rentals.values().cloned().collect();
        Ok(page(newest_first(rentals), limit.as_ref(), offset.as_ref()))
    }
}

#[async_trait::async_trait]
impl RentalModifier for InMemoryRentalRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if !con.working.cars.contains_key(rental.car_id()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("car {} does not exist", rental.car_id().as_ref())));
        }
        if con.working.rentals.contains_key(rental.id()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("rental {} already exists", rental.id().as_ref())));
        }
        con.working
            .rentals
            .insert(rental.id().clone(), rental.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.working.rentals.get_mut(rental.id()) {
            *stored = rental.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .payments
            .retain(|_, payment| payment.rental_id() != rental_id);
        con.working.rentals.remove(rental_id);
        Ok(())
    }
}
