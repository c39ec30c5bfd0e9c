use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use application::service::{GetPaymentService, PayPaymentService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::Identity;
use crate::request::PaymentTransformer;
use crate::response::PaymentPresenter;

pub trait PaymentRouter {
    fn route_payment(self) -> Self;
}

impl PaymentRouter for Router<AppModule> {
    fn route_payment(self) -> Self {
        self.route(
            "/payments/me",
            get(
                |State(module): State<AppModule>, Identity(caller): Identity| async move {
                    Controller::new((), PaymentPresenter)
                        .bypass(|| async move { module.list_my_payments(caller).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/payments/:id",
            get(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(PaymentTransformer, PaymentPresenter)
                        .intake((caller, id))
                        .handle(|dto| async move { module.get_payment(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/payments/:id/pay",
            post(
                |State(module): State<AppModule>,
                 Identity(caller): Identity,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(PaymentTransformer, PaymentPresenter)
                        .intake((caller, id))
                        .handle(|dto| async move { module.pay_payment(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
