mod car;
mod payment;
mod rental;

pub use self::{car::*, payment::*, rental::*};
