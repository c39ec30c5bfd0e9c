use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    CarQuery, DependOnCarQuery, DependOnPaymentQuery, DependOnRentalQuery, PaymentQuery,
    RentalQuery,
};
use kernel::interface::update::{
    CarModifier, DependOnCarModifier, DependOnPaymentModifier, DependOnRentalModifier,
    PaymentModifier, RentalModifier,
};
use kernel::prelude::entity::{
    CarId, CarStatus, Payment, PaymentId, Rental, RentalId, RentalPeriod,
};
use kernel::KernelError;

use crate::service::{not_found, paging, unauthorized, LogRejection};
use crate::transfer::{CreateRentalDto, ListRentalsDto, RentalActionDto, RentalDto};

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClock
    + DependOnCarQuery
    + DependOnRentalQuery
    + DependOnRentalModifier
{
    async fn create_rental(&self, dto: CreateRentalDto) -> error_stack::Result<RentalDto, KernelError> {
        let period = RentalPeriod::new(dto.start_date, dto.end_date).log_rejection("create_rental")?;
        let car_id = CarId::new(dto.car_id);
        let renter_id = dto.caller.id().clone();

        let mut connection = self.database_connection().transact().await?;

        let car = self
            .car_query()
            .find_by_id_for_update(&mut connection, &car_id)
            .await?
            .ok_or_else(|| not_found("car", dto.car_id))
            .log_rejection("create_rental")?;

        let rental = Rental::book(
            RentalId::new(Uuid::new_v4()),
            &car,
            renter_id,
            period,
            self.clock().now(),
        )
        .log_rejection("create_rental")?;

        let overlapping = self
            .rental_query()
            .find_overlapping(&mut connection, &car_id, rental.period())
            .await?;
        if !overlapping.is_empty() {
            let taken = overlapping
                .iter()
                .map(|other| other.id().as_ref().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("car {} is already booked by {taken}", dto.car_id)))
            .log_rejection("create_rental");
        }

        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        connection.commit().await?;

        tracing::info!(
            rental_id = %rental.id().as_ref(),
            car_id = %dto.car_id,
            price_sum = %rental.price_sum().as_ref(),
            "Rental created"
        );
        Ok(RentalDto::from(rental))
    }
}

impl<T> CreateRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnClock
        + DependOnCarQuery
        + DependOnRentalQuery
        + DependOnRentalModifier
{
}

#[async_trait::async_trait]
pub trait StartRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClock
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnCarQuery
    + DependOnCarModifier
{
    async fn start_rental(&self, dto: RentalActionDto) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rental = self
            .rental_query()
            .find_by_id_for_update(&mut connection, &RentalId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("rental", dto.id))
            .log_rejection("start_rental")?;
        if !dto.caller.can_act_for(rental.renter_id()) {
            return Err(unauthorized("start this rental")).log_rejection("start_rental");
        }
        let rental = rental.start(self.clock().now()).log_rejection("start_rental")?;

        self.car_query()
            .find_by_id_for_update(&mut connection, rental.car_id())
            .await?;
        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        self.car_modifier()
            .update_status(&mut connection, rental.car_id(), &CarStatus::Unavailable)
            .await?;
        connection.commit().await?;

        tracing::info!(rental_id = %dto.id, "Rental started");
        Ok(RentalDto::from(rental))
    }
}

impl<T> StartRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnClock
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnCarQuery
        + DependOnCarModifier
{
}

#[async_trait::async_trait]
pub trait FinishRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClock
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnCarQuery
    + DependOnCarModifier
    + DependOnPaymentQuery
    + DependOnPaymentModifier
{
    /// Also issues the rental's payment unless one already exists.
    async fn finish_rental(&self, dto: RentalActionDto) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rental = self
            .rental_query()
            .find_by_id_for_update(&mut connection, &RentalId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("rental", dto.id))
            .log_rejection("finish_rental")?;
        if !dto.caller.can_act_for(rental.renter_id()) {
            return Err(unauthorized("finish this rental")).log_rejection("finish_rental");
        }
        let rental = rental.finish(self.clock().now()).log_rejection("finish_rental")?;

        self.car_query()
            .find_by_id_for_update(&mut connection, rental.car_id())
            .await?;
        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        self.car_modifier()
            .update_status(&mut connection, rental.car_id(), &CarStatus::Available)
            .await?;

        let issued = self
            .payment_query()
            .find_by_rental_id(&mut connection, rental.id())
            .await?;
        if issued.is_none() {
            let payment = Payment::issue(PaymentId::new(Uuid::new_v4()), &rental)?;
            self.payment_modifier()
                .create(&mut connection, &payment)
                .await?;
            tracing::info!(
                payment_id = %payment.id().as_ref(),
                amount = %payment.amount().as_ref(),
                "Payment issued"
            );
        }
        connection.commit().await?;

        tracing::info!(
            rental_id = %dto.id,
            price_sum = %rental.price_sum().as_ref(),
            "Rental finished"
        );
        Ok(RentalDto::from(rental))
    }
}

impl<T> FinishRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnClock
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnCarQuery
        + DependOnCarModifier
        + DependOnPaymentQuery
        + DependOnPaymentModifier
{
}

#[async_trait::async_trait]
pub trait CancelRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnCarQuery
    + DependOnCarModifier
{
    async fn cancel_rental(&self, dto: RentalActionDto) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rental = self
            .rental_query()
            .find_by_id_for_update(&mut connection, &RentalId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("rental", dto.id))
            .log_rejection("cancel_rental")?;
        if !dto.caller.can_act_for(rental.renter_id()) {
            return Err(unauthorized("cancel this rental")).log_rejection("cancel_rental");
        }
        let rental = rental.cancel().log_rejection("cancel_rental")?;

        self.car_query()
            .find_by_id_for_update(&mut connection, rental.car_id())
            .await?;
        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        self.car_modifier()
            .update_status(&mut connection, rental.car_id(), &CarStatus::Available)
            .await?;
        connection.commit().await?;

        tracing::info!(rental_id = %dto.id, "Rental cancelled");
        Ok(RentalDto::from(rental))
    }
}

impl<T> CancelRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnCarQuery
        + DependOnCarModifier
{
}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnDatabaseConnection + DependOnRentalQuery {
    async fn get_rental(&self, dto: RentalActionDto) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &RentalId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("rental", dto.id))
            .log_rejection("get_rental")?;
        if !dto.caller.can_act_for(rental.renter_id()) {
            return Err(unauthorized("read this rental")).log_rejection("get_rental");
        }
        Ok(RentalDto::from(rental))
    }

    async fn list_my_rentals(
        &self,
        dto: ListRentalsDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let (limit, offset) = paging(dto.limit, dto.offset)?;
        let mut connection = self.database_connection().transact().await?;

        let rentals = self
            .rental_query()
            .find_by_renter_id(&mut connection, dto.caller.id(), &limit, &offset)
            .await?;
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    async fn list_all_rentals(
        &self,
        dto: ListRentalsDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        if !dto.caller.is_admin() {
            return Err(unauthorized("list every rental")).log_rejection("list_all_rentals");
        }
        let (limit, offset) = paging(dto.limit, dto.offset)?;
        let mut connection = self.database_connection().transact().await?;

        let rentals = self
            .rental_query()
            .find_all(&mut connection, &limit, &offset)
            .await?;
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }
}

impl<T> GetRentalService for T where T: DependOnDatabaseConnection + DependOnRentalQuery {}
