mod id;
mod role;

pub use self::{id::*, role::*};
use destructure::Destructure;
use vodca::References;

/// Identity of whoever invokes an operation, as vouched for by the upstream
/// identity provider.
#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct Caller {
    id: UserId,
    role: UserRole,
}

impl Caller {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    /// Whether this caller may act on a record owned by `owner`.
    pub fn can_act_for(&self, owner: &UserId) -> bool {
        &self.id == owner || self.role == UserRole::Admin
    }

    pub fn can_manage_cars(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Agent)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
