use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    CancelRentalService, CreateRentalService, FinishRentalService, GetRentalService,
    StartRentalService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::Identity;
use crate::request::{CreateRentalRequest, PageRequest, RentalTransformer};
use crate::response::RentalPresenter;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Query(req): Query<PageRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake((caller, req))
                        .handle(|dto| async move { module.list_all_rentals(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Json(req): Json<CreateRentalRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake((caller, req))
                        .handle(|dto| async move { module.create_rental(dto).await })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/me",
            get(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Query(req): Query<PageRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake((caller, req))
                        .handle(|dto| async move { module.list_my_rentals(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake((caller, id))
                        .handle(|dto| async move { module.get_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id/start",
            post(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake((caller, id))
                        .handle(|dto| async move { module.start_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id/finish",
            post(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake((caller, id))
                        .handle(|dto| async move { module.finish_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id/cancel",
            post(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake((caller, id))
                        .handle(|dto| async move { module.cancel_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
