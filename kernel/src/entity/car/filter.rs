use vodca::References;

use crate::entity::{CarBrand, CarPricePerDay, CarSeats, CarStatus, SelectLimit, SelectOffset};

/// Inventory search. Every `None` criterion matches all cars, price bounds are inclusive.
#[derive(Debug, Clone, Default, Eq, PartialEq, References)]
pub struct CarFilter {
    status: Option<CarStatus>,
    brand: Option<CarBrand>,
    price_from: Option<CarPricePerDay>,
    price_to: Option<CarPricePerDay>,
    seats: Option<CarSeats>,
    limit: SelectLimit,
    offset: SelectOffset,
}

impl CarFilter {
    pub fn new(
        status: Option<CarStatus>,
        brand: Option<CarBrand>,
        price_from: Option<CarPricePerDay>,
        price_to: Option<CarPricePerDay>,
        seats: Option<CarSeats>,
        limit: SelectLimit,
        offset: SelectOffset,
    ) -> Self {
        Self {
            status,
            brand,
            price_from,
            price_to,
            seats,
            limit,
            offset,
        }
    }
}
