use crate::domain::value::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Failed,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    pub fn is_failed(self) -> bool {
        self == Self::Failed
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Decoded gateway reply, shared by `SendSms` and `Balance`.
pub struct GatewayResponse {
    pub status: Status,
    pub message: Option<String>,
    pub cost: Option<Amount>,
    pub currency: Option<String>,
    pub follow_up_code: Option<String>,
    pub balance: Option<Amount>,
}
