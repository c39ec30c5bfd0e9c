#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use error_stack::Report;
use rust_decimal::Decimal;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use application::service::CreateCarService;
use application::transfer::{CarDto, CreateCarDto};
use driver::database::{
    InMemoryCarRepository, InMemoryDatabase, InMemoryPaymentRepository, InMemoryRentalRepository,
    InMemoryTransaction,
};
use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnCarQuery, DependOnPaymentQuery, DependOnRentalQuery};
use kernel::interface::update::{
    DependOnCarModifier, DependOnPaymentModifier, DependOnRentalModifier, PaymentModifier,
};
use kernel::prelude::entity::{Caller, Payment, UserId, UserRole};
use kernel::KernelError;

pub const DAY0: OffsetDateTime = datetime!(2024-03-01 0:00 UTC);

pub fn day(n: i64) -> OffsetDateTime {
    DAY0 + Duration::days(n)
}

#[derive(Clone)]
pub struct SettableClock(Arc<Mutex<OffsetDateTime>>);

impl SettableClock {
    pub fn set(&self, now: OffsetDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for SettableClock {
    fn now(&self) -> OffsetDateTime {
        *self.0.lock().unwrap()
    }
}

#[derive(Clone)]
pub struct TestModule {
    database: InMemoryDatabase,
    clock: SettableClock,
}

impl TestModule {
    pub fn new() -> Self {
        Self {
            database: InMemoryDatabase::new(),
            clock: SettableClock(Arc::new(Mutex::new(DAY0 - Duration::days(1)))),
        }
    }

    pub fn set_now(&self, now: OffsetDateTime) {
        self.clock.set(now);
    }

    pub async fn car(&self, plate: &str, price_per_day: Decimal) -> CarDto {
        self.create_car(CreateCarDto {
            caller: agent(),
            brand: "Skoda".to_string(),
            model: "Octavia".to_string(),
            plate: plate.to_string(),
            seats: 5,
            year: 2021,
            price_per_day,
        })
        .await
        .unwrap()
    }
}

impl DependOnDatabaseConnection for TestModule {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &InMemoryDatabase {
        &self.database
    }
}

impl DependOnClock for TestModule {
    type Clock = SettableClock;
    fn clock(&self) -> &SettableClock {
        &self.clock
    }
}

impl DependOnCarQuery for TestModule {
    type CarQuery = InMemoryCarRepository;
    fn car_query(&self) -> &InMemoryCarRepository {
        &InMemoryCarRepository
    }
}

impl DependOnCarModifier for TestModule {
    type CarModifier = InMemoryCarRepository;
    fn car_modifier(&self) -> &InMemoryCarRepository {
        &InMemoryCarRepository
    }
}

impl DependOnRentalQuery for TestModule {
    type RentalQuery = InMemoryRentalRepository;
    fn rental_query(&self) -> &InMemoryRentalRepository {
        &InMemoryRentalRepository
    }
}

impl DependOnRentalModifier for TestModule {
    type RentalModifier = InMemoryRentalRepository;
    fn rental_modifier(&self) -> &InMemoryRentalRepository {
        &InMemoryRentalRepository
    }
}

impl DependOnPaymentQuery for TestModule {
    type PaymentQuery = InMemoryPaymentRepository;
    fn payment_query(&self) -> &InMemoryPaymentRepository {
        &InMemoryPaymentRepository
    }
}

impl DependOnPaymentModifier for TestModule {
    type PaymentModifier = InMemoryPaymentRepository;
    fn payment_modifier(&self) -> &InMemoryPaymentRepository {
        &InMemoryPaymentRepository
    }
}

/// Payment writes always fail, everything else goes to the wrapped module's store.
pub struct BrokenPaymentsModule(pub TestModule);

pub struct BrokenPaymentRepository;

#[async_trait::async_trait]
impl PaymentModifier for BrokenPaymentRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        _con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        Err(Report::new(KernelError::Internal)
            .attach_printable(format!("failed to insert payment {}", payment.id().as_ref())))
    }

    async fn update(
        &self,
        _con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        Err(Report::new(KernelError::Internal)
            .attach_printable(format!("failed to update payment {}", payment.id().as_ref())))
    }
}

impl DependOnDatabaseConnection for BrokenPaymentsModule {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &InMemoryDatabase {
        self.0.database_connection()
    }
}

impl DependOnClock for BrokenPaymentsModule {
    type Clock = SettableClock;
    fn clock(&self) -> &SettableClock {
        self.0.clock()
    }
}

impl DependOnCarQuery for BrokenPaymentsModule {
    type CarQuery = InMemoryCarRepository;
    fn car_query(&self) -> &InMemoryCarRepository {
        &InMemoryCarRepository
    }
}

impl DependOnCarModifier for BrokenPaymentsModule {
    type CarModifier = InMemoryCarRepository;
    fn car_modifier(&self) -> &InMemoryCarRepository {
        &InMemoryCarRepository
    }
}

impl DependOnRentalQuery for BrokenPaymentsModule {
    type RentalQuery = InMemoryRentalRepository;
    fn rental_query(&self) -> &InMemoryRentalRepository {
        &InMemoryRentalRepository
    }
}

impl DependOnRentalModifier for BrokenPaymentsModule {
    type RentalModifier = InMemoryRentalRepository;
    fn rental_modifier(&self) -> &InMemoryRentalRepository {
        &InMemoryRentalRepository
    }
}

impl DependOnPaymentQuery for BrokenPaymentsModule {
    type PaymentQuery = InMemoryPaymentRepository;
    fn payment_query(&self) -> &InMemoryPaymentRepository {
        &InMemoryPaymentRepository
    }
}

impl DependOnPaymentModifier for BrokenPaymentsModule {
    type PaymentModifier = BrokenPaymentRepository;
    fn payment_modifier(&self) -> &BrokenPaymentRepository {
        &BrokenPaymentRepository
    }
}

pub fn user() -> Caller {
    Caller::new(UserId::new(Uuid::new_v4()), UserRole::User)
}

pub fn agent() -> Caller {
    Caller::new(UserId::new(Uuid::new_v4()), UserRole::Agent)
}

pub fn admin() -> Caller {
    Caller::new(UserId::new(Uuid::new_v4()), UserRole::Admin)
}
