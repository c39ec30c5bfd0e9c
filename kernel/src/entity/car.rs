mod brand;
mod filter;
mod id;
mod model;
mod patch;
mod plate;
mod price;
mod seats;
mod status;
mod year;

pub use self::{
    brand::*, filter::*, id::*, model::*, patch::*, plate::*, price::*, seats::*, status::*,
    year::*,
};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Car {
    id: CarId,
    brand: CarBrand,
    model: CarModel,
    plate: CarPlate,
    seats: CarSeats,
    year: CarYear,
    price_per_day: CarPricePerDay,
    status: CarStatus,
}

impl Car {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CarId,
        brand: CarBrand,
        model: CarModel,
        plate: CarPlate,
        seats: CarSeats,
        year: CarYear,
        price_per_day: CarPricePerDay,
        status: CarStatus,
    ) -> Self {
        Self {
            id,
            brand,
            model,
            plate,
            seats,
            year,
            price_per_day,
            status,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == CarStatus::Available
    }

    /// Merges every field present in `patch` into this car.
    /// Availability is owned by the rental lifecycle and never patched.
    pub fn patch(mut self, patch: CarPatch) -> Self {
        let DestructCarPatch {
            brand,
            model,
            plate,
            seats,
            year,
            price_per_day,
        } = patch.into_destruct();
        if let Some(brand) = brand {
            self.brand = brand;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(plate) = plate {
            self.plate = plate;
        }
        if let Some(seats) = seats {
            self.seats = seats;
        }
        if let Some(year) = year {
            self.year = year;
        }
        if let Some(price_per_day) = price_per_day {
            self.price_per_day = price_per_day;
        }
        self
    }

    pub fn with_status(mut self, status: CarStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    fn car() -> Car {
        Car::new(
            CarId::new(Uuid::new_v4()),
            CarBrand::new("Toyota"),
            CarModel::new("Corolla"),
            CarPlate::new("WX-1234"),
            CarSeats::new(5),
            CarYear::new(2020),
            CarPricePerDay::new(dec!(50.00)),
            CarStatus::Available,
        )
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let car = car();
        let patch = CarPatch::new(
            None,
            Some(CarModel::new("Yaris")),
            None,
            None,
            None,
            Some(CarPricePerDay::new(dec!(42.50))),
        );
        let patched = car.clone().patch(patch);

        assert_eq!(patched.id(), car.id());
        assert_eq!(patched.brand(), car.brand());
        assert_eq!(patched.model(), &CarModel::new("Yaris"));
        assert_eq!(patched.plate(), car.plate());
        assert_eq!(patched.price_per_day(), &CarPricePerDay::new(dec!(42.50)));
        assert_eq!(patched.status(), &CarStatus::Available);
    }

    #[test]
    fn empty_patch_is_identity() {
        let car = car();
        assert!(CarPatch::default().is_empty());
        assert_eq!(car.clone().patch(CarPatch::default()), car);
    }
}
