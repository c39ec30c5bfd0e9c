use error_stack::{Report, ResultExt};
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{CarQuery, DependOnCarQuery, DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{
    CarModifier, DependOnCarModifier, DependOnRentalModifier, RentalModifier,
};
use kernel::prelude::entity::{
    Car, CarBrand, CarFilter, CarId, CarModel, CarPatch, CarPlate, CarPricePerDay, CarSeats,
    CarStatus, CarYear, RentalStatus,
};
use kernel::KernelError;

use crate::service::{not_found, paging, unauthorized, LogRejection};
use crate::transfer::{CarDto, CreateCarDto, DeleteCarDto, GetCarDto, ListCarsDto, UpdateCarDto};

#[async_trait::async_trait]
pub trait GetCarService: 'static + Sync + Send + DependOnDatabaseConnection + DependOnCarQuery {
    async fn get_car(&self, dto: GetCarDto) -> error_stack::Result<CarDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let car = self
            .car_query()
            .find_by_id(&mut connection, &CarId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("car", dto.id))?;
        Ok(CarDto::from(car))
    }

    async fn list_cars(&self, dto: ListCarsDto) -> error_stack::Result<Vec<CarDto>, KernelError> {
        let status = dto
            .status
            .map(|status| status.to_uppercase().parse::<CarStatus>())
            .transpose()
            .change_context(KernelError::Validation)?;
        let price_from = dto.price_from.map(CarPricePerDay::parse).transpose()?;
        let price_to = dto.price_to.map(CarPricePerDay::parse).transpose()?;
        let seats = dto.seats.map(CarSeats::parse).transpose()?;
        let (limit, offset) = paging(dto.limit, dto.offset)?;
        let filter = CarFilter::new(
            status,
            dto.brand.map(CarBrand::new),
            price_from,
            price_to,
            seats,
            limit,
            offset,
        );
        let mut connection = self.database_connection().transact().await?;

        let cars = self.car_query().find_all(&mut connection, &filter).await?;
        Ok(cars.into_iter().map(CarDto::from).collect())
    }
}

impl<T> GetCarService for T where T: DependOnDatabaseConnection + DependOnCarQuery {}

#[async_trait::async_trait]
pub trait CreateCarService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClock
    + DependOnCarQuery
    + DependOnCarModifier
{
    async fn create_car(&self, dto: CreateCarDto) -> error_stack::Result<CarDto, KernelError> {
        if !dto.caller.can_manage_cars() {
            return Err(unauthorized("register cars")).log_rejection("create_car");
        }
        let now = self.clock().now();
        let car = Car::new(
            CarId::new(Uuid::new_v4()),
            CarBrand::parse(dto.brand)?,
            CarModel::parse(dto.model)?,
            CarPlate::parse(dto.plate)?,
            CarSeats::parse(dto.seats)?,
            CarYear::parse(dto.year, &now)?,
            CarPricePerDay::parse(dto.price_per_day)?,
            CarStatus::Available,
        );

        let mut connection = self.database_connection().transact().await?;

        if let Some(other) = self
            .car_query()
            .find_by_plate(&mut connection, car.plate())
            .await?
        {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "plate {} is already registered to car {}",
                car.plate().as_ref(),
                other.id().as_ref()
            )))
            .log_rejection("create_car");
        }
        self.car_modifier().create(&mut connection, &car).await?;
        connection.commit().await?;

        tracing::info!(car_id = %car.id().as_ref(), plate = %car.plate().as_ref(), "Car registered");
        Ok(CarDto::from(car))
    }
}

impl<T> CreateCarService for T where
    T: DependOnDatabaseConnection + DependOnClock + DependOnCarQuery + DependOnCarModifier
{
}

#[async_trait::async_trait]
pub trait UpdateCarService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClock
    + DependOnCarQuery
    + DependOnCarModifier
{
    async fn update_car(&self, dto: UpdateCarDto) -> error_stack::Result<CarDto, KernelError> {
        if !dto.caller.can_manage_cars() {
            return Err(unauthorized("edit cars")).log_rejection("update_car");
        }
        let now = self.clock().now();
        let patch = CarPatch::new(
            dto.brand.map(CarBrand::parse).transpose()?,
            dto.model.map(CarModel::parse).transpose()?,
            dto.plate.map(CarPlate::parse).transpose()?,
            dto.seats.map(CarSeats::parse).transpose()?,
            dto.year.map(|year| CarYear::parse(year, &now)).transpose()?,
            dto.price_per_day.map(CarPricePerDay::parse).transpose()?,
        );

        let mut connection = self.database_connection().transact().await?;

        let car = self
            .car_query()
            .find_by_id_for_update(&mut connection, &CarId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("car", dto.id))
            .log_rejection("update_car")?;
        if patch.is_empty() {
            return Ok(CarDto::from(car));
        }
        if let Some(plate) = patch.plate() {
            let owner = self.car_query().find_by_plate(&mut connection, plate).await?;
            if owner.is_some_and(|owner| owner.id() != car.id()) {
                return Err(Report::new(KernelError::Conflict)
                    .attach_printable(format!("plate {} is already registered", plate.as_ref())))
                .log_rejection("update_car");
            }
        }
        let car = car.patch(patch);
        self.car_modifier().update(&mut connection, &car).await?;
        connection.commit().await?;

        tracing::info!(car_id = %dto.id, "Car updated");
        Ok(CarDto::from(car))
    }
}

impl<T> UpdateCarService for T where
    T: DependOnDatabaseConnection + DependOnClock + DependOnCarQuery + DependOnCarModifier
{
}

#[async_trait::async_trait]
pub trait DeleteCarService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnCarQuery
    + DependOnCarModifier
    + DependOnRentalQuery
    + DependOnRentalModifier
{
    /// Historic rentals of the car and their payments go with it.
    async fn delete_car(&self, dto: DeleteCarDto) -> error_stack::Result<(), KernelError> {
        if !dto.caller.can_manage_cars() {
            return Err(unauthorized("delete cars")).log_rejection("delete_car");
        }
        let car_id = CarId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;

        self.car_query()
            .find_by_id_for_update(&mut connection, &car_id)
            .await?
            .ok_or_else(|| not_found("car", dto.id))
            .log_rejection("delete_car")?;

        let rentals = self
            .rental_query()
            .find_by_car_id(&mut connection, &car_id)
            .await?;
        let open = rentals
            .iter()
            .filter(|rental| {
                matches!(
                    rental.status(),
                    RentalStatus::NotStarted | RentalStatus::Active
                )
            })
            .count();
        if open > 0 {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "car {} still has {open} upcoming or active rentals",
                dto.id
            )))
            .log_rejection("delete_car");
        }

        for rental in &rentals {
            self.rental_modifier()
                .delete(&mut connection, rental.id())
                .await?;
        }
        self.car_modifier().delete(&mut connection, &car_id).await?;
        connection.commit().await?;

        tracing::info!(car_id = %dto.id, removed_rentals = rentals.len(), "Car deleted");
        Ok(())
    }
}

impl<T> DeleteCarService for T where
    T: DependOnDatabaseConnection
        + DependOnCarQuery
        + DependOnCarModifier
        + DependOnRentalQuery
        + DependOnRentalModifier
{
}
