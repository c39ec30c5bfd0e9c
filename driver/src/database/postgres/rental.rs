use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use error_stack::Report;
use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    CarId, CreatedAt, PriceForDay, PriceSum, Rental, RentalId, RentalPeriod, ReturnedAt,
    SelectLimit, SelectOffset, StartedAt, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id, false).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id, true).await
    }

    async fn find_overlapping(
        &self,
        con: &mut PostgresConnection,
        car_id: &CarId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_overlapping(con, car_id, period).await
    }

    async fn find_by_car_id(
        &self,
        con: &mut PostgresConnection,
        car_id: &CarId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_car_id(con, car_id).await
    }

    async fn find_by_renter_id(
        &self,
        con: &mut PostgresConnection,
        renter_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_renter_id(con, renter_id, limit, offset).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con, limit, offset).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::update(con, rental).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::delete(con, rental_id).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    car_id: Uuid,
    renter_id: Uuid,
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
    started_at: Option<OffsetDateTime>,
    returned_at: Option<OffsetDateTime>,
    price_for_day: Decimal,
    price_sum: Decimal,
    status: String,
    created_at: OffsetDateTime,
}

impl TryFrom<RentalRow> for Rental {
    type Error = Report<KernelError>;
    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        let period = RentalPeriod::new(row.start_date, row.end_date)
            .map_err(|report| report.change_context(KernelError::Internal))?;
        Ok(Rental::new(
            RentalId::new(row.id),
            CarId::new(row.car_id),
            UserId::new(row.renter_id),
            period,
            row.started_at.map(StartedAt::new),
            row.returned_at.map(ReturnedAt::new),
            PriceForDay::new(row.price_for_day),
            PriceSum::new(row.price_sum),
            row.status.parse()?,
            CreatedAt::new(row.created_at),
        ))
    }
}

fn into_rentals(rows: Vec<RentalRow>) -> error_stack::Result<Vec<Rental>, KernelError> {
    rows.into_iter().map(Rental::try_from).collect()
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
        lock: bool,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let query = if lock {
            // language=postgresql
            r#"
            SELECT id, car_id, renter_id, start_date, end_date, started_at, returned_at,
                   price_for_day, price_sum, status, created_at
            FROM rentals
            WHERE id = $1
            FOR UPDATE
            "#
        } else {
            // language=postgresql
            r#"
            SELECT id, car_id, renter_id, start_date, end_date, started_at, returned_at,
                   price_for_day, price_sum, status, created_at
            FROM rentals
            WHERE id = $1
            "#
        };
        let row = sqlx::query_as::<_, RentalRow>(query)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(Rental::try_from).transpose()
    }

    async fn find_overlapping(
        con: &mut PgConnection,
        car_id: &CarId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, car_id, renter_id, start_date, end_date, started_at, returned_at,
                   price_for_day, price_sum, status, created_at
            FROM rentals
            WHERE car_id = $1
              AND status <> 'CANCELLED'
              AND end_date > $2
              AND start_date < $3
            "#,
        )
        .bind(car_id.as_ref())
        .bind(period.start_date())
        .bind(period.end_date())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_rentals(rows)
    }

    async fn find_by_car_id(
        con: &mut PgConnection,
        car_id: &CarId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, car_id, renter_id, start_date, end_date, started_at, returned_at,
                   price_for_day, price_sum, status, created_at
            FROM rentals
            WHERE car_id = $1
            ORDER BY start_date
            "#,
        )
        .bind(car_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_rentals(rows)
    }

    async fn find_by_renter_id(
        con: &mut PgConnection,
        renter_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, car_id, renter_id, start_date, end_date, started_at, returned_at,
                   price_for_day, price_sum, status, created_at
            FROM rentals
            WHERE renter_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(renter_id.as_ref())
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_rentals(rows)
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, car_id, renter_id, start_date, end_date, started_at, returned_at,
                   price_for_day, price_sum, status, created_at
            FROM rentals
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_rentals(rows)
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rentals (id, car_id, renter_id, start_date, end_date, started_at,
                                 returned_at, price_for_day, price_sum, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.car_id().as_ref())
        .bind(rental.renter_id().as_ref())
        .bind(rental.period().start_date())
        .bind(rental.period().end_date())
        .bind(rental.started_at().as_ref().map(|at| *at.as_ref()))
        .bind(rental.returned_at().as_ref().map(|at| *at.as_ref()))
        .bind(rental.price_for_day().as_ref())
        .bind(rental.price_sum().as_ref())
        .bind(rental.status().as_str())
        .bind(rental.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET started_at = $2, returned_at = $3, price_sum = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.started_at().as_ref().map(|at| *at.as_ref()))
        .bind(rental.returned_at().as_ref().map(|at| *at.as_ref()))
        .bind(rental.price_sum().as_ref())
        .bind(rental.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM payments
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(rental_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::{CarModifier, RentalModifier};
    use kernel::prelude::entity::{
        Car, CarBrand, CarId, CarModel, CarPlate, CarPricePerDay, CarSeats, CarStatus, CarYear,
        Rental, RentalId, RentalPeriod, RentalStatus, SelectLimit, SelectOffset, UserId,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresCarRepository, PostgresDatabase, PostgresRentalRepository,
    };

    fn car() -> Car {
        let id = Uuid::new_v4();
        Car::new(
            CarId::new(id),
            CarBrand::new("Toyota"),
            CarModel::new("Corolla"),
            CarPlate::new(id.simple().to_string()[..10].to_uppercase()),
            CarSeats::new(5),
            CarYear::new(2020),
            CarPricePerDay::new(dec!(50.00)),
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

        let start = datetime!(2030-01-01 10:00 UTC);
        let period = RentalPeriod::new(start, start + Duration::days(4))?;
        let renter = UserId::new(Uuid::new_v4());
        let rental = Rental::book(
            RentalId::new(Uuid::new_v4()),
            &car,
            renter.clone(),
            period,
            start - Duration::days(1),
        )?;
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let found = PostgresRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?;
        assert_eq!(found.as_ref().map(Rental::id), Some(rental.id()));
        assert_eq!(
            found.as_ref().map(|r| *r.price_sum().as_ref()),
            Some(dec!(200.00))
        );

        let touching = RentalPeriod::new(start + Duration::days(4), start + Duration::days(5))?;
        let overlapping = PostgresRentalRepository
            .find_overlapping(&mut con, car.id(), &touching)
            .await?;
        assert!(overlapping.is_empty());

        let inside = RentalPeriod::new(start + Duration::days(1), start + Duration::days(2))?;
        let overlapping = PostgresRentalRepository
            .find_overlapping(&mut con, car.id(), &inside)
            .await?;
        assert_eq!(overlapping.len(), 1);

        let started = rental.start(start + Duration::hours(1))?;
        PostgresRentalRepository.update(&mut con, &started).await?;
        let locked = PostgresRentalRepository
            .find_by_id_for_update(&mut con, started.id())
            .await?;
        assert_eq!(
            locked.as_ref().map(Rental::status),
            Some(&RentalStatus::Active)
        );

        let mine = PostgresRentalRepository
            .find_by_renter_id(&mut con, &renter, &SelectLimit::default(), &SelectOffset::default())
            .await?;
        assert_eq!(mine.len(), 1);
        let by_car = PostgresRentalRepository
            .find_by_car_id(&mut con, car.id())
            .await?;
        assert_eq!(by_car.len(), 1);

        PostgresRentalRepository.delete(&mut con, started.id()).await?;
        let found = PostgresRentalRepository
            .find_by_id(&mut con, started.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
