use std::ops::Deref;
use std::sync::Arc;

use driver::clock::SystemClock;
use driver::database::{
    PostgresCarRepository, PostgresDatabase, PostgresPaymentRepository, PostgresRentalRepository,
};
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnCarQuery, DependOnPaymentQuery, DependOnRentalQuery};
use kernel::interface::update::{
    DependOnCarModifier, DependOnPaymentModifier, DependOnRentalModifier,
};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    clock: SystemClock,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;

        Ok(Self {
            pgpool,
            clock: SystemClock,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &PostgresDatabase {
        &self.pgpool
    }
}

impl DependOnClock for Handler {
    type Clock = SystemClock;
    fn clock(&self) -> &SystemClock {
        &self.clock
    }
}

impl DependOnCarQuery for Handler {
    type CarQuery = PostgresCarRepository;
    fn car_query(&self) -> &PostgresCarRepository {
        &PostgresCarRepository
    }
}

impl DependOnCarModifier for Handler {
    type CarModifier = PostgresCarRepository;
    fn car_modifier(&self) -> &PostgresCarRepository {
        &PostgresCarRepository
    }
}

impl DependOnRentalQuery for Handler {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &PostgresRentalRepository {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier for Handler {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &PostgresRentalRepository {
        &PostgresRentalRepository
    }
}

impl DependOnPaymentQuery for Handler {
    type PaymentQuery = PostgresPaymentRepository;
    fn payment_query(&self) -> &PostgresPaymentRepository {
        &PostgresPaymentRepository
    }
}

impl DependOnPaymentModifier for Handler {
    type PaymentModifier = PostgresPaymentRepository;
    fn payment_modifier(&self) -> &PostgresPaymentRepository {
        &PostgresPaymentRepository
    }
}
