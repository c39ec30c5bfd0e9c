mod car;
mod common;
mod payment;
mod rental;
mod user;

pub use self::{car::*, common::*, payment::*, rental::*, user::*};
