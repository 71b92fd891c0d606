use serde::Serialize;

use crate::domain::{Method, OutboundMessage, Priority, SendBatch, Username};

#[derive(Debug, Serialize)]
struct ApiRequestJson<'a> {
    method: &'static str,
    userdata: UserDataJson<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msgdata: Option<Vec<MessageJson<'a>>>,
}

#[derive(Debug, Serialize)]
struct UserDataJson<'a> {
    username: &'a str,
    // Always `password` on the wire, even when the secret is an API key.
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct MessageJson<'a> {
    number: &'a str,
    message: &'a str,
    senderid: &'a str,
    priority: &'static str,
}

impl<'a> From<&'a OutboundMessage> for MessageJson<'a> {
    fn from(value: &'a OutboundMessage) -> Self {
        Self {
            number: value.number.as_str(),
            message: value.message.as_str(),
            senderid: value.sender_id.as_str(),
            priority: priority_code(value.priority),
        }
    }
}

const PRIORITY_CODES: [&str; 5] = ["0", "1", "2", "3", "4"];

fn priority_code(priority: Priority) -> &'static str {
    PRIORITY_CODES[usize::from(priority.code())]
}

/// Encode the JSON envelope for `method`. `batch` is only emitted as `msgdata`
/// for [`Method::SendSms`].
pub fn encode_request_json(
    method: Method,
    username: &Username,
    password: &str,
    batch: Option<&SendBatch>,
) -> Result<String, serde_json::Error> {
    let msgdata = match method {
        Method::SendSms => batch.map(|batch| {
            batch
                .messages()
                .iter()
                .map(MessageJson::from)
                .collect::<Vec<_>>()
        }),
        Method::Balance => None,
    };

    serde_json::to_string(&ApiRequestJson {
        method: method.as_str(),
        userdata: UserDataJson {
            username: username.as_str(),
            password,
        },
        msgdata,
    })
}
