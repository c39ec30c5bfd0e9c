mod id;
mod period;
mod price;
mod returned_at;
mod started_at;
mod status;

pub use self::{id::*, period::*, price::*, returned_at::*, started_at::*, status::*};
use destructure::Destructure;
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{Car, CarId, CreatedAt, UserId};
use crate::KernelError;

/// A booking of one car by one renter.
///
/// Lifecycle: `NOT_STARTED -> ACTIVE -> FINISHED`, or `NOT_STARTED -> CANCELLED`.
/// Transitions consume the rental and hand back the next state, so a rejected
/// transition leaves the caller holding nothing to persist.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    car_id: CarId,
    renter_id: UserId,
    period: RentalPeriod,
    started_at: Option<StartedAt>,
    returned_at: Option<ReturnedAt>,
    price_for_day: PriceForDay,
    price_sum: PriceSum,
    status: RentalStatus,
    created_at: CreatedAt<Rental>,
}

impl Rental {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RentalId,
        car_id: CarId,
        renter_id: UserId,
        period: RentalPeriod,
        started_at: Option<StartedAt>,
        returned_at: Option<ReturnedAt>,
        price_for_day: PriceForDay,
        price_sum: PriceSum,
        status: RentalStatus,
        created_at: CreatedAt<Rental>,
    ) -> Self {
        Self {
            id,
            car_id,
            renter_id,
            period,
            started_at,
            returned_at,
            price_for_day,
            price_sum,
            status,
            created_at,
        }
    }

    /// Books `car` for `period`. Overlap with other bookings is checked by the
    /// caller against the store, under the car's row lock.
    pub fn book(
        id: RentalId,
        car: &Car,
        renter_id: UserId,
        period: RentalPeriod,
        now: OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError> {
        if !car.is_available() {
            return Err(Report::new(KernelError::Unavailable)
                .attach_printable(format!("car {} is {}", car.id().as_ref(), car.status())));
        }
        let price_for_day = PriceForDay::new(*car.price_per_day().as_ref());
        let price_sum = price_for_day.total(&BillableDays::from_duration(period.duration()))?;
        Ok(Self {
            id,
            car_id: car.id().clone(),
            renter_id,
            period,
            started_at: None,
            returned_at: None,
            price_for_day,
            price_sum,
            status: RentalStatus::NotStarted,
            created_at: CreatedAt::new(now),
        })
    }

    pub fn start(mut self, now: OffsetDateTime) -> error_stack::Result<Self, KernelError> {
        self.ensure_status(RentalStatus::NotStarted, "start")?;
        if now < *self.period.start_date() {
            return Err(Report::new(KernelError::TooEarly).attach_printable(format!(
                "rental {} can't be started before {}",
                self.id.as_ref(),
                self.period.start_date()
            )));
        }
        self.status = RentalStatus::Active;
        self.started_at = Some(StartedAt::new(now));
        Ok(self)
    }

    /// Bills the time the car was actually held, which may exceed the quote.
    pub fn finish(mut self, now: OffsetDateTime) -> error_stack::Result<Self, KernelError> {
        self.ensure_status(RentalStatus::Active, "finish")?;
        if now < *self.period.end_date() {
            return Err(Report::new(KernelError::TooEarly).attach_printable(format!(
                "rental {} can't be finished before {}",
                self.id.as_ref(),
                self.period.end_date()
            )));
        }
        let since = self
            .started_at
            .as_ref()
            .map(|started| *started.as_ref())
            .unwrap_or(*self.period.start_date());
        self.price_sum = self
            .price_for_day
            .total(&BillableDays::from_duration(now - since))?;
        self.status = RentalStatus::Finished;
        self.returned_at = Some(ReturnedAt::new(now));
        Ok(self)
    }

    pub fn cancel(mut self) -> error_stack::Result<Self, KernelError> {
        match self.status {
            RentalStatus::NotStarted => {
                self.status = RentalStatus::Cancelled;
                Ok(self)
            }
            RentalStatus::Active => Err(Report::new(KernelError::WrongState)
                .attach_printable("Cannot cancel an active rental")),
            RentalStatus::Finished | RentalStatus::Cancelled => {
                Err(Report::new(KernelError::WrongState)
                    .attach_printable("Cannot cancel a finished or already cancelled rental"))
            }
        }
    }

    fn ensure_status(
        &self,
        expected: RentalStatus,
        operation: &str,
    ) -> error_stack::Result<(), KernelError> {
        if self.status != expected {
            return Err(Report::new(KernelError::WrongState).attach_printable(format!(
                "Cannot {operation} rental {} in status {}",
                self.id.as_ref(),
                self.status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::datetime;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::entity::{
        CarBrand, CarModel, CarPlate, CarPricePerDay, CarSeats, CarStatus, CarYear,
    };

    const DAY0: OffsetDateTime = datetime!(2024-03-01 0:00 UTC);

    fn car(status: CarStatus) -> Car {
        Car::new(
            CarId::new(Uuid::new_v4()),
            CarBrand::new("Skoda"),
            CarModel::new("Octavia"),
            CarPlate::new("KR-5001"),
            CarSeats::new(5),
            CarYear::new(2021),
            CarPricePerDay::new(dec!(50.00)),
            status,
        )
    }

    fn booked(days: i64) -> Rental {
        let period = RentalPeriod::new(DAY0, DAY0 + time::Duration::days(days)).unwrap();
        Rental::book(
            RentalId::new(Uuid::new_v4()),
            &car(CarStatus::Available),
            UserId::new(Uuid::new_v4()),
            period,
            DAY0 - time::Duration::days(1),
        )
        .unwrap()
    }

    #[test]
    fn booking_quotes_whole_days() {
        let rental = booked(2);
        assert_eq!(rental.status(), &RentalStatus::NotStarted);
        assert_eq!(rental.price_for_day(), &PriceForDay::new(dec!(50.00)));
        assert_eq!(rental.price_sum(), &PriceSum::new(dec!(100.00)));
        assert!(rental.started_at().is_none());
    }

    #[test]
    fn booking_short_window_charges_one_day() {
        let period = RentalPeriod::new(DAY0, DAY0 + time::Duration::hours(3)).unwrap();
        let rental = Rental::book(
            RentalId::new(Uuid::new_v4()),
            &car(CarStatus::Available),
            UserId::new(Uuid::new_v4()),
            period,
            DAY0,
        )
        .unwrap();
        assert_eq!(rental.price_sum(), &PriceSum::new(dec!(50.00)));
    }

    #[test]
    fn booking_unavailable_car_fails() {
        let period = RentalPeriod::new(DAY0, DAY0 + time::Duration::days(1)).unwrap();
        let err = Rental::book(
            RentalId::new(Uuid::new_v4()),
            &car(CarStatus::Unavailable),
            UserId::new(Uuid::new_v4()),
            period,
            DAY0,
        )
        .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Unavailable);
    }

    #[test]
    fn start_requires_window_open() {
        let err = booked(2)
            .start(DAY0 - time::Duration::seconds(1))
            .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::TooEarly);

        let started = booked(2).start(DAY0).unwrap();
        assert_eq!(started.status(), &RentalStatus::Active);
        assert_eq!(started.started_at(), &Some(StartedAt::new(DAY0)));
    }

    #[test]
    fn start_twice_is_wrong_state() {
        let started = booked(2).start(DAY0).unwrap();
        let err = started.start(DAY0).unwrap_err();
        assert_eq!(err.current_context(), &KernelError::WrongState);
    }

    #[test]
    fn finish_bills_actual_use() {
        let started = booked(2).start(DAY0).unwrap();
        let returned = datetime!(2024-03-04 12:00 UTC);
        let finished = started.finish(returned).unwrap();

        assert_eq!(finished.status(), &RentalStatus::Finished);
        assert_eq!(finished.price_sum(), &PriceSum::new(dec!(200.00)));
        assert_eq!(finished.returned_at(), &Some(ReturnedAt::new(returned)));
    }

    #[test]
    fn finish_before_end_is_too_early() {
        let started = booked(2).start(DAY0).unwrap();
        let err = started
            .finish(DAY0 + time::Duration::days(1))
            .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::TooEarly);
    }

    #[test]
    fn finish_requires_active() {
        let err = booked(2).finish(DAY0 + time::Duration::days(3)).unwrap_err();
        assert_eq!(err.current_context(), &KernelError::WrongState);
    }

    #[test]
    fn finish_without_start_timestamp_bills_from_start_date() {
        let rental = booked(2);
        let DestructRental {
            id,
            car_id,
            renter_id,
            period,
            price_for_day,
            price_sum,
            created_at,
            ..
        } = rental.into_destruct();
        let migrated = Rental::new(
            id,
            car_id,
            renter_id,
            period,
            None,
            None,
            price_for_day,
            price_sum,
            RentalStatus::Active,
            created_at,
        );
        let finished = migrated.finish(DAY0 + time::Duration::days(5)).unwrap();
        assert_eq!(finished.price_sum(), &PriceSum::new(dec!(250.00)));
    }

    #[test]
    fn cancel_only_from_not_started() {
        let cancelled = booked(2).cancel().unwrap();
        assert_eq!(cancelled.status(), &RentalStatus::Cancelled);

        let err = cancelled.cancel().unwrap_err();
        assert_eq!(err.current_context(), &KernelError::WrongState);

        let active = booked(2).start(DAY0).unwrap();
        let err = active.clone().cancel().unwrap_err();
        assert_eq!(err.current_context(), &KernelError::WrongState);

        let finished = active.finish(DAY0 + time::Duration::days(2)).unwrap();
        let err = finished.cancel().unwrap_err();
        assert_eq!(err.current_context(), &KernelError::WrongState);
    }
}
