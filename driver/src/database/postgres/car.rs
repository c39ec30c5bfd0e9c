use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use error_stack::Report;
use kernel::interface::query::CarQuery;
use kernel::interface::update::CarModifier;
use kernel::prelude::entity::{
    Car, CarBrand, CarFilter, CarId, CarModel, CarPlate, CarPricePerDay, CarSeats, CarStatus,
    CarYear,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresCarRepository;

#[async_trait::async_trait]
impl CarQuery for PostgresCarRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        PgCarInternal::find_by_id(con, id, false).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresConnection,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        PgCarInternal::find_by_id(con, id, true).await
    }

    async fn find_by_plate(
        &self,
        con: &mut PostgresConnection,
        plate: &CarPlate,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        PgCarInternal::find_by_plate(con, plate).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
        filter: &CarFilter,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        PgCarInternal::find_all(con, filter).await
    }
}

#[async_trait::async_trait]
impl CarModifier for PostgresCarRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::create(con, car).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::update(con, car).await
    }

    async fn update_status(
        &self,
        con: &mut PostgresConnection,
        car_id: &CarId,
        status: &CarStatus,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::update_status(con, car_id, status).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        car_id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::delete(con, car_id).await
    }
}

#[derive(sqlx::FromRow)]
struct CarRow {
    id: Uuid,
    brand: String,
    model: String,
    plate: String,
    seats: i32,
    year: i32,
    price_per_day: Decimal,
    status: String,
}

impl TryFrom<CarRow> for Car {
    type Error = Report<KernelError>;
    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        Ok(Car::new(
            CarId::new(row.id),
            CarBrand::new(row.brand),
            CarModel::new(row.model),
            CarPlate::new(row.plate),
            CarSeats::new(row.seats),
            CarYear::new(row.year),
            CarPricePerDay::new(row.price_per_day),
            row.status.parse()?,
        ))
    }
}

pub(in crate::database) struct PgCarInternal;

impl PgCarInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CarId,
        lock: bool,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        let query = if lock {
            // language=postgresql
            r#"
            SELECT id, brand, model, plate, seats, year, price_per_day, status
            FROM cars
            WHERE id = $1
            FOR UPDATE
            "#
        } else {
            // language=postgresql
            r#"
            SELECT id, brand, model, plate, seats, year, price_per_day, status
            FROM cars
            WHERE id = $1
            "#
        };
        let row = sqlx::query_as::<_, CarRow>(query)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(Car::try_from).transpose()
    }

    async fn find_by_plate(
        con: &mut PgConnection,
        plate: &CarPlate,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        let row = sqlx::query_as::<_, CarRow>(
            // language=postgresql
            r#"
            SELECT id, brand, model, plate, seats, year, price_per_day, status
            FROM cars
            WHERE plate = $1
            "#,
        )
        .bind(plate.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Car::try_from).transpose()
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &CarFilter,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        let rows = sqlx::query_as::<_, CarRow>(
            // language=postgresql
            r#"
            SELECT id, brand, model, plate, seats, year, price_per_day, status
            FROM cars
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR LOWER(brand) = LOWER($2))
              AND ($3::NUMERIC IS NULL OR price_per_day >= $3)
              AND ($4::NUMERIC IS NULL OR price_per_day <= $4)
              AND ($5::INTEGER IS NULL OR seats = $5)
            ORDER BY brand, model, id
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filter.status().as_ref().map(CarStatus::as_str))
        .bind(filter.brand().as_ref().map(|brand| brand.as_ref().as_str()))
        .bind(filter.price_from().as_ref().map(|price| *price.as_ref()))
        .bind(filter.price_to().as_ref().map(|price| *price.as_ref()))
        .bind(filter.seats().as_ref().map(|seats| *seats.as_ref()))
        .bind(filter.limit().as_ref())
        .bind(filter.offset().as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Car::try_from).collect()
    }

    async fn create(con: &mut PgConnection, car: &Car) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO cars (id, brand, model, plate, seats, year, price_per_day, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(car.id().as_ref())
        .bind(car.brand().as_ref())
        .bind(car.model().as_ref())
        .bind(car.plate().as_ref())
        .bind(car.seats().as_ref())
        .bind(car.year().as_ref())
        .bind(car.price_per_day().as_ref())
        .bind(car.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, car: &Car) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE cars
            SET brand = $2, model = $3, plate = $4, seats = $5, year = $6, price_per_day = $7
            WHERE id = $1
            "#,
        )
        .bind(car.id().as_ref())
        .bind(car.brand().as_ref())
        .bind(car.model().as_ref())
        .bind(car.plate().as_ref())
        .bind(car.seats().as_ref())
        .bind(car.year().as_ref())
        .bind(car.price_per_day().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update_status(
        con: &mut PgConnection,
        car_id: &CarId,
        status: &CarStatus,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE cars
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(car_id.as_ref())
        .bind(status.as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, car_id: &CarId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM cars
            WHERE id = $1
            "#,
        )
        .bind(car_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
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
        Car, CarBrand, CarFilter, CarId, CarModel, CarPatch, CarPlate, CarPricePerDay, CarSeats,
        CarStatus, CarYear, SelectLimit, SelectOffset,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresCarRepository, PostgresDatabase};

    fn car() -> Car {
        let id = Uuid::new_v4();
        Car::new(
            CarId::new(id),
            CarBrand::new("Volvo"),
            CarModel::new("V60"),
            CarPlate::new(id.simple().to_string()[..10].to_uppercase()),
            CarSeats::new(5),
            CarYear::new(2022),
            CarPricePerDay::new(dec!(80.00)),
            CarStatus::Available,
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let car = car();
        PostgresCarRepository.create(&mut con, &car).await?;

        let found = PostgresCarRepository.find_by_id(&mut con, car.id()).await?;
        assert_eq!(found, Some(car.clone()));
        let found = PostgresCarRepository
            .find_by_plate(&mut con, car.plate())
            .await?;
        assert_eq!(found, Some(car.clone()));

        let car = car.patch(CarPatch::new(
            None,
            Some(CarModel::new("XC60")),
            None,
            None,
            None,
            Some(CarPricePerDay::new(dec!(95.50))),
        ));
        PostgresCarRepository.update(&mut con, &car).await?;
        PostgresCarRepository
            .update_status(&mut con, car.id(), &CarStatus::Unavailable)
            .await?;
        let locked = PostgresCarRepository
            .find_by_id_for_update(&mut con, car.id())
            .await?;
        assert_eq!(locked, Some(car.clone().with_status(CarStatus::Unavailable)));

        let filter = CarFilter::new(
            Some(CarStatus::Unavailable),
            Some(CarBrand::new("volvo")),
            None,
            Some(CarPricePerDay::new(dec!(100))),
            None,
            SelectLimit::new(1000),
            SelectOffset::default(),
        );
        let listed = PostgresCarRepository.find_all(&mut con, &filter).await?;
        assert!(listed.iter().any(|c| c.id() == car.id()));

        PostgresCarRepository.delete(&mut con, car.id()).await?;
        let found = PostgresCarRepository.find_by_id(&mut con, car.id()).await?;
        assert!(found.is_none());
        Ok(())
    }
}
