mod common;

use rust_decimal_macros::dec;
use uuid::Uuid;

use application::service::{
    CreateCarService, CreateRentalService, DeleteCarService, FinishRentalService, GetCarService,
    GetPaymentService, GetRentalService, StartRentalService, UpdateCarService,
};
use application::transfer::{
    CreateCarDto, CreateRentalDto, DeleteCarDto, GetCarDto, ListCarsDto, RentalActionDto,
    UpdateCarDto,
};
use kernel::prelude::entity::Caller;
use kernel::KernelError;

use crate::common::{admin, agent, day, user, TestModule};

fn new_car(caller: Caller, plate: &str) -> CreateCarDto {
    CreateCarDto {
        caller,
        brand: "Toyota".to_string(),
        model: "Yaris".to_string(),
        plate: plate.to_string(),
        seats: 5,
        year: 2020,
        price_per_day: dec!(30.00),
    }
}

fn no_changes(caller: Caller, id: Uuid) -> UpdateCarDto {
    UpdateCarDto {
        caller,
        id,
        brand: None,
        model: None,
        plate: None,
        seats: None,
        year: None,
        price_per_day: None,
    }
}

#[tokio::test]
async fn registering_requires_elevated_role() {
    let module = TestModule::new();
    let err = module.create_car(new_car(user(), "T-1")).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Unauthorized);

    let car = module.create_car(new_car(admin(), "T-1")).await.unwrap();
    assert_eq!(car.status, "AVAILABLE");
}

#[tokio::test]
async fn plate_is_normalized_and_unique() {
    let module = TestModule::new();
    let car = module.create_car(new_car(agent(), "  ab-12 ")).await.unwrap();
    assert_eq!(car.plate, "AB-12");

    let err = module.create_car(new_car(agent(), "AB-12")).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Conflict);
}

#[tokio::test]
async fn invalid_fields_are_rejected() {
    let module = TestModule::new();

    let err = module.create_car(new_car(agent(), "AB 12")).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);

    let mut dto = new_car(agent(), "AB-13");
    dto.seats = 0;
    let err = module.create_car(dto).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);

    let mut dto = new_car(agent(), "AB-14");
    dto.year = 2030;
    let err = module.create_car(dto).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);

    let mut dto = new_car(agent(), "AB-15");
    dto.price_per_day = dec!(-1);
    let err = module.create_car(dto).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);

    let mut dto = new_car(agent(), "AB-16");
    dto.price_per_day = rust_decimal::Decimal::MAX;
    let err = module.create_car(dto).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);

    let mut dto = new_car(agent(), "AB-17");
    dto.price_per_day = dec!(100000000.00);
    let err = module.create_car(dto).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);
}

#[tokio::test]
async fn patch_merges_given_fields() {
    let module = TestModule::new();
    let car = module.create_car(new_car(agent(), "P-1")).await.unwrap();
    module.create_car(new_car(agent(), "P-2")).await.unwrap();

    let mut patch = no_changes(agent(), car.id);
    patch.model = Some("Corolla".to_string());
    patch.price_per_day = Some(dec!(45.50));
    let updated = module.update_car(patch).await.unwrap();
    assert_eq!(updated.model, "Corolla");
    assert_eq!(updated.price_per_day, dec!(45.50));
    assert_eq!(updated.brand, car.brand);
    assert_eq!(updated.plate, car.plate);
    assert_eq!(module.get_car(GetCarDto { id: car.id }).await.unwrap(), updated);

    let mut taken = no_changes(agent(), car.id);
    taken.plate = Some("p-2".to_string());
    let err = module.update_car(taken).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Conflict);

    let mut same = no_changes(agent(), car.id);
    same.plate = Some("P-1".to_string());
    module.update_car(same).await.unwrap();

    let err = module
        .update_car(no_changes(user(), car.id))
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Unauthorized);
    let err = module
        .update_car(no_changes(agent(), Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn list_filters_by_status_brand_and_price() {
    let module = TestModule::new();
    let cheap = module.car("L-1", dec!(20.00)).await;
    module.car("L-2", dec!(90.00)).await;
    let mut other = new_car(agent(), "L-3");
    other.brand = "Fiat".to_string();
    module.create_car(other).await.unwrap();

    let renter = user();
    let rental = module
        .create_rental(CreateRentalDto {
            caller: renter.clone(),
            car_id: cheap.id,
            start_date: day(0),
            end_date: day(1),
        })
        .await
        .unwrap();
    module.set_now(day(0));
    module
        .start_rental(RentalActionDto {
            caller: renter,
            id: rental.id,
        })
        .await
        .unwrap();

    let all = module.list_cars(ListCarsDto::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let skodas = module
        .list_cars(ListCarsDto {
            brand: Some("skoda".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(skodas.len(), 2);

    let available = module
        .list_cars(ListCarsDto {
            status: Some("available".to_string()),
            price_to: Some(dec!(50)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].plate, "L-3");

    let mid_range = module
        .list_cars(ListCarsDto {
            price_from: Some(dec!(25)),
            price_to: Some(dec!(95)),
            seats: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();
    let mut plates = mid_range.iter().map(|car| car.plate.as_str()).collect::<Vec<_>>();
    plates.sort();
    assert_eq!(plates, vec!["L-2", "L-3"]);

    let vans = module
        .list_cars(ListCarsDto {
            seats: Some(9),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(vans.is_empty());

    let err = module
        .list_cars(ListCarsDto {
            status: Some("broken".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);

    let err = module
        .list_cars(ListCarsDto {
            price_to: Some(dec!(-5)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);

    let err = module
        .list_cars(ListCarsDto {
            seats: Some(0),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Validation);
}

#[tokio::test]
async fn delete_is_blocked_by_open_rentals() {
    let module = TestModule::new();
    let car = module.car("D-1", dec!(40.00)).await;
    let renter = user();
    let rental = module
        .create_rental(CreateRentalDto {
            caller: renter.clone(),
            car_id: car.id,
            start_date: day(0),
            end_date: day(1),
        })
        .await
        .unwrap();
    let action = || RentalActionDto {
        caller: renter.clone(),
        id: rental.id,
    };

    let err = module
        .delete_car(DeleteCarDto {
            caller: user(),
            id: car.id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Unauthorized);

    let err = module
        .delete_car(DeleteCarDto {
            caller: agent(),
            id: car.id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::Conflict);

    module.set_now(day(0));
    module.start_rental(action()).await.unwrap();
    module.set_now(day(1));
    module.finish_rental(action()).await.unwrap();
    let payment = module.list_my_payments(renter.clone()).await.unwrap().remove(0);

    module
        .delete_car(DeleteCarDto {
            caller: agent(),
            id: car.id,
        })
        .await
        .unwrap();

    let err = module.get_car(GetCarDto { id: car.id }).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::NotFound);
    let err = module.get_rental(action()).await.unwrap_err();
    assert_eq!(err.current_context(), &KernelError::NotFound);
    let err = module
        .get_payment(application::transfer::PaymentActionDto {
            caller: renter,
            id: payment.id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &KernelError::NotFound);
}
