use uuid::Uuid;

use application::transfer::PaymentActionDto;
use kernel::prelude::entity::Caller;

use crate::controller::Intake;

pub struct PaymentTransformer;

impl Intake<(Caller, Uuid)> for PaymentTransformer {
    type To = PaymentActionDto;
    fn emit(&self, input: (Caller, Uuid)) -> Self::To {
        let (caller, id) = input;
        PaymentActionDto { caller, id }
    }
}
