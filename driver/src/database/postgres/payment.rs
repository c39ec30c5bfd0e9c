use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use error_stack::Report;
use kernel::interface::query::PaymentQuery;
use kernel::interface::update::PaymentModifier;
use kernel::prelude::entity::{PaidAt, Payment, PaymentAmount, PaymentId, RentalId, UserId};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresPaymentRepository;

#[async_trait::async_trait]
impl PaymentQuery for PostgresPaymentRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        PgPaymentInternal::find_by_id(con, id, false).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresConnection,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        PgPaymentInternal::find_by_id(con, id, true).await
    }

    async fn find_by_rental_id(
        &self,
        con: &mut PostgresConnection,
        rental_id: &RentalId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        PgPaymentInternal::find_by_rental_id(con, rental_id).await
    }

    async fn find_by_renter_id(
        &self,
        con: &mut PostgresConnection,
        renter_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_by_renter_id(con, renter_id).await
    }
}

#[async_trait::async_trait]
impl PaymentModifier for PostgresPaymentRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        PgPaymentInternal::create(con, payment).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        PgPaymentInternal::update(con, payment).await
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    rental_id: Uuid,
    amount: Decimal,
    status: String,
    paid_at: Option<OffsetDateTime>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = Report<KernelError>;
    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment::new(
            PaymentId::new(row.id),
            RentalId::new(row.rental_id),
            PaymentAmount::new(row.amount),
            row.status.parse()?,
            row.paid_at.map(PaidAt::new),
        ))
    }
}

pub(in crate::database) struct PgPaymentInternal;

impl PgPaymentInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &PaymentId,
        lock: bool,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        let query = if lock {
            // language=postgresql
            r#"
            SELECT id, rental_id, amount, status, paid_at
            FROM payments
            WHERE id = $1
            FOR UPDATE
            "#
        } else {
            // language=postgresql
            r#"
            SELECT id, rental_id, amount, status, paid_at
            FROM payments
            WHERE id = $1
            "#
        };
        let row = sqlx::query_as::<_, PaymentRow>(query)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(Payment::try_from).transpose()
    }

    async fn find_by_rental_id(
        con: &mut PgConnection,
        rental_id: &RentalId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, rental_id, amount, status, paid_at
            FROM payments
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Payment::try_from).transpose()
    }

    async fn find_by_renter_id(
        con: &mut PgConnection,
        renter_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT p.id, p.rental_id, p.amount, p.status, p.paid_at
            FROM payments p
            JOIN rentals r ON r.id = p.rental_id
            WHERE r.renter_id = $1
            ORDER BY r.created_at DESC, p.id
            "#,
        )
        .bind(renter_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO payments (id, rental_id, amount, status, paid_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(payment.id().as_ref())
        .bind(payment.rental_id().as_ref())
        .bind(payment.amount().as_ref())
        .bind(payment.status().as_str())
        .bind(payment.paid_at().as_ref().map(|at| *at.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE payments
            SET status = $2, paid_at = $3
            WHERE id = $1
            "#,
        )
        .bind(payment.id().as_ref())
        .bind(payment.status().as_str())
        .bind(payment.paid_at().as_ref().map(|at| *at.as_ref()))
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
    use kernel::interface::query::PaymentQuery;
    use kernel::interface::update::{CarModifier, PaymentModifier, RentalModifier};
    use kernel::prelude::entity::{
        Car, CarBrand, CarId, CarModel, CarPlate, CarPricePerDay, CarSeats, CarStatus, CarYear,
        Payment, PaymentId, PaymentStatus, Rental, RentalId, RentalPeriod, UserId,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresCarRepository, PostgresDatabase, PostgresPaymentRepository,
        PostgresRentalRepository,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let car_id = Uuid::new_v4();
        let car = Car::new(
            CarId::new(car_id),
            CarBrand::new("Mazda"),
            CarModel::new("3"),
            CarPlate::new(car_id.simple().to_string()[..10].to_uppercase()),
            CarSeats::new(5),
            CarYear::new(2018),
            CarPricePerDay::new(dec!(40.00)),
            CarStatus::Available,
        );
        PostgresCarRepository.create(&mut con, &car).await?;

        let start = datetime!(2030-02-01 9:00 UTC);
        let renter = UserId::new(Uuid::new_v4());
        let rental = Rental::book(
            RentalId::new(Uuid::new_v4()),
            &car,
            renter.clone(),
            RentalPeriod::new(start, start + Duration::days(2))?,
            start,
        )?;
        let rental = rental
            .start(start)?
            .finish(start + Duration::days(2))?;
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let payment = Payment::issue(PaymentId::new(Uuid::new_v4()), &rental)?;
        PostgresPaymentRepository.create(&mut con, &payment).await?;

        let found = PostgresPaymentRepository
            .find_by_rental_id(&mut con, rental.id())
            .await?;
        assert_eq!(found, Some(payment.clone()));

        let paid = payment.pay(&rental, start + Duration::days(3))?;
        PostgresPaymentRepository.update(&mut con, &paid).await?;
        let locked = PostgresPaymentRepository
            .find_by_id_for_update(&mut con, paid.id())
            .await?;
        assert_eq!(
            locked.as_ref().map(Payment::status),
            Some(&PaymentStatus::Paid)
        );

        let mine = PostgresPaymentRepository
            .find_by_renter_id(&mut con, &renter)
            .await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(*mine[0].amount().as_ref(), dec!(80.00));
        Ok(())
    }
}
