use error_stack::Report;

use kernel::interface::query::CarQuery;
use kernel::interface::update::CarModifier;
use kernel::prelude::entity::{Car, CarFilter, CarId, CarPlate, CarStatus};
use kernel::KernelError;

use crate::database::memory::{page, InMemoryTransaction};

pub struct InMemoryCarRepository;

fn ensure_plate_free(
    con: &InMemoryTransaction,
    car: &Car,
) -> error_stack::Result<(), KernelError> {
    let taken = con
        .working
        .cars
        .values()
        .any(|other| other.plate() == car.plate() && other.id() != car.id());
    if taken {
        return Err(Report::new(KernelError::Conflict)
            .attach_printable(format!("plate {} is already registered", car.plate().as_ref())));
    }
    Ok(())
}

#[async_trait::async_trait]
impl CarQuery for InMemoryCarRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        Ok(con.working.cars.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_by_plate(
        &self,
        con: &mut InMemoryTransaction,
        plate: &CarPlate,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        Ok(con
            .working
            .cars
            .values()
            .find(|car| car.plate() == plate)
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        filter: &CarFilter,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        let mut cars = con
            .working
            .cars
            .values()
            .filter(|car| filter.status().as_ref().map_or(true, |status| car.status() == status))
            .filter(|car| {
                filter.brand().as_ref().map_or(true, |brand| {
                    car.brand().as_ref().to_lowercase() == brand.as_ref().to_lowercase()
                })
            })
            .filter(|car| {
                filter
                    .price_from()
                    .as_ref()
                    .map_or(true, |min| car.price_per_day() >= min)
            })
            .filter(|car| {
                filter
                    .price_to()
                    .as_ref()
                    .map_or(true, |max| car.price_per_day() <= max)
            })
            .filter(|car| filter.seats().as_ref().map_or(true, |seats| car.seats() == seats))
            .cloned()
            .collect::<Vec<_>>();
        cars.sort_by(|a, b| {
            (a.brand().as_ref(), a.model().as_ref(), a.id().as_ref()).cmp(&(
                b.brand().as_ref(),
                b.model().as_ref(),
                b.id().as_ref(),
            ))
        });
        Ok(page(cars, filter.limit().as_ref(), filter.offset().as_ref()))
    }
}

#[async_trait::async_trait]
impl CarModifier for InMemoryCarRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.cars.contains_key(car.id()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("car {} already exists", car.id().as_ref())));
        }
        ensure_plate_free(con, car)?;
        con.working.cars.insert(car.id().clone(), car.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        ensure_plate_free(con, car)?;
        if let Some(stored) = con.working.cars.get_mut(car.id()) {
            let status = *stored.status();
            *stored = car.clone().with_status(status);
        }
        Ok(())
    }

    async fn update_status(
        &self,
        con: &mut InMemoryTransaction,
        car_id: &CarId,
        status: &CarStatus,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.working.cars.get_mut(car_id) {
            *stored = stored.clone().with_status(*status);
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        car_id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        let referenced = con
            .working
            .rentals
            .values()
            .any(|rental| rental.car_id() == car_id);
        if referenced {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("car {} is still referenced by rentals", car_id.as_ref())));
        }
        con.working.cars.remove(car_id);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::CarQuery;
    use kernel::interface::update::CarModifier;
    use kernel::prelude::entity::{
        Car, CarBrand, CarFilter, CarId, CarModel, CarPlate, CarPricePerDay, CarSeats, CarStatus,
        CarYear, SelectLimit, SelectOffset,
    };
    use kernel::KernelError;

    use crate::database::memory::{InMemoryCarRepository, InMemoryDatabase};

    fn car(brand: &str, plate: &str, price: rust_decimal::Decimal, status: CarStatus) -> Car {
        Car::new(
            CarId::new(Uuid::new_v4()),
            CarBrand::new(brand),
            CarModel::new("Base"),
            CarPlate::new(plate),
            CarSeats::new(4),
            CarYear::new(2020),
            CarPricePerDay::new(price),
            status,
        )
    }

    #[tokio::test]
    async fn plate_is_unique() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        InMemoryCarRepository
            .create(&mut con, &car("Kia", "WA-1", dec!(20), CarStatus::Available))
            .await?;
        let err = InMemoryCarRepository
            .create(&mut con, &car("Seat", "WA-1", dec!(20), CarStatus::Available))
            .await
            .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Conflict);
        Ok(())
    }

    #[tokio::test]
    async fn filters_and_pages() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        for (brand, plate, price, status) in [
            ("Kia", "A-1", dec!(20), CarStatus::Available),
            ("kia", "A-2", dec!(60), CarStatus::Available),
            ("Kia", "A-3", dec!(25), CarStatus::Unavailable),
            ("Audi", "A-4", dec!(90), CarStatus::Available),
        ] {
            InMemoryCarRepository
                .create(&mut con, &car(brand, plate, price, status))
                .await?;
        }

        let filter = CarFilter::new(
            Some(CarStatus::Available),
            Some(CarBrand::new("KIA")),
            None,
            Some(CarPricePerDay::new(dec!(50))),
            None,
            SelectLimit::default(),
            SelectOffset::default(),
        );
        let cars = InMemoryCarRepository.find_all(&mut con, &filter).await?;
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].plate(), &CarPlate::new("A-1"));

        let range = CarFilter::new(
            None,
            None,
            Some(CarPricePerDay::new(dec!(25))),
            Some(CarPricePerDay::new(dec!(60))),
            Some(CarSeats::new(4)),
            SelectLimit::default(),
            SelectOffset::default(),
        );
        let cars = InMemoryCarRepository.find_all(&mut con, &range).await?;
        let plates = cars.iter().map(|car| car.plate().as_ref().as_str()).collect::<Vec<_>>();
        assert_eq!(plates.len(), 2);
        assert!(plates.contains(&"A-2") && plates.contains(&"A-3"));

        let roomy = CarFilter::new(
            None,
            None,
            None,
            None,
            Some(CarSeats::new(7)),
            SelectLimit::default(),
            SelectOffset::default(),
        );
        assert!(InMemoryCarRepository.find_all(&mut con, &roomy).await?.is_empty());

        let paged = CarFilter::new(
            None,
            None,
            None,
            None,
            None,
            SelectLimit::new(2),
            SelectOffset::new(1),
        );
        let cars = InMemoryCarRepository.find_all(&mut con, &paged).await?;
        assert_eq!(cars.len(), 2);
        Ok(())
    }
}
