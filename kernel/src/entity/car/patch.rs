use destructure::Destructure;

use crate::entity::{CarBrand, CarModel, CarPlate, CarPricePerDay, CarSeats, CarYear};

/// Partial update for a [`Car`](crate::entity::Car). `None` leaves the field as is.
#[derive(Debug, Clone, Default, Eq, PartialEq, Destructure)]
pub struct CarPatch {
    brand: Option<CarBrand>,
    model: Option<CarModel>,
    plate: Option<CarPlate>,
    seats: Option<CarSeats>,
    year: Option<CarYear>,
    price_per_day: Option<CarPricePerDay>,
}

impl CarPatch {
    pub fn new(
        brand: Option<CarBrand>,
        model: Option<CarModel>,
        plate: Option<CarPlate>,
        seats: Option<CarSeats>,
        year: Option<CarYear>,
        price_per_day: Option<CarPricePerDay>,
    ) -> Self {
        Self {
            brand,
            model,
            plate,
            seats,
            year,
            price_per_day,
        }
    }

    pub fn plate(&self) -> Option<&CarPlate> {
        self.plate.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.plate.is_none()
            && self.seats.is_none()
            && self.year.is_none()
            && self.price_per_day.is_none()
    }
}
