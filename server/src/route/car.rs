use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CreateCarService, DeleteCarService, GetCarService, UpdateCarService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::Identity;
use crate::request::{CarTransformer, CreateCarRequest, ListCarsRequest, UpdateCarRequest};
use crate::response::CarPresenter;

pub trait CarRouter {
    fn route_car(self) -> Self;
}

impl CarRouter for Router<AppModule> {
    fn route_car(self) -> Self {
        self.route(
            "/cars",
            get(
                |State(module): State<AppModule>, Query(req): Query<ListCarsRequest>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.list_cars(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Json(req): Json<CreateCarRequest>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .intake((caller, req))
                        .handle(|dto| async move { module.create_car(dto).await })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/cars/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .intake(id)
                        .handle(|dto| async move { module.get_car(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateCarRequest>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .intake((caller, id, req))
                        .handle(|dto| async move { module.update_car(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .intake((caller, id))
                        .handle(|dto| async move { module.delete_car(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
