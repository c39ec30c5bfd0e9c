use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{Car, CarId, Payment, PaymentId, Rental, RentalId};
use kernel::KernelError;

pub use self::{car::*, payment::*, rental::*};

mod car;
mod payment;
mod rental;

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct MemoryState {
    cars: HashMap<CarId, Car>,
    rentals: HashMap<RentalId, Rental>,
    payments: HashMap<PaymentId, Payment>,
}

/// Process-local store with the same visibility rules as the postgres one.
///
/// Transactions are serialized: `transact` waits until the previous one is
/// committed or dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTransaction { guard, working })
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

fn page<T>(items: Vec<T>, limit: &i32, offset: &i32) -> Vec<T> {
    let offset = usize::try_from(*offset).unwrap_or(0);
    let limit = usize::try_from(*limit).unwrap_or(0);
    items.into_iter().skip(offset).take(limit).collect()
}
