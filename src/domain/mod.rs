//! Domain layer: strong types with validation and invariants (no I/O).

mod normalize;
mod request;
mod response;
mod validation;
mod value;

pub use normalize::NumberNormalizer;
pub use request::{Method, OutboundMessage, Priority, SendBatch, SendOptions, SendSms};
pub use response::{GatewayResponse, Status};
pub use validation::ValidationError;
pub use value::{Amount, CountryCode, MessageText, NormalizedNumber, Secret, SenderId, Username};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(matches!(
            Username::new("   "),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
    }

    #[test]
    fn secret_rejects_empty() {
        assert!(matches!(
            Secret::new(""),
            Err(ValidationError::Empty {
                field: Secret::FIELD
            })
        ));
    }

    #[test]
    fn send_sms_requires_numbers() {
        let msg = MessageText::new("hello").unwrap();
        let err = SendSms::new(Vec::<String>::new(), msg, SendOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: SendSms::NUMBERS_FIELD
            }
        );
    }

    #[test]
    fn send_sms_keeps_raw_numbers_until_dispatch() {
        let msg = MessageText::new("hello").unwrap();
        let request = SendSms::new(["bogus", "0772123456"], msg, SendOptions::default()).unwrap();
        assert_eq!(request.numbers(), ["bogus", "0772123456"]);
    }

    #[test]
    fn blank_per_call_sender_id_falls_back() {
        let options = SendOptions::default().with_sender_id("   ");
        assert!(options.sender_id.is_none());

        let options = SendOptions::default().with_sender_id("Shop");
        assert_eq!(options.sender_id.unwrap().as_str(), "Shop");
    }

    #[test]
    fn priority_codes_round_trip_and_default_to_highest() {
        assert_eq!(Priority::default(), Priority::Highest);
        assert_eq!(Priority::Highest.code(), 0);
        assert_eq!(Priority::Lowest.code(), 4);
        assert_eq!(Priority::from_code(2), Some(Priority::Medium));
        assert_eq!(Priority::from_code(5), None);
    }

    #[test]
    fn send_batch_is_never_empty() {
        let msg = MessageText::new("hello").unwrap();
        let sender = SenderId::default();
        assert!(
            SendBatch::new(Default::default(), &msg, &sender, Priority::High).is_none()
        );

        let numbers = NumberNormalizer::default().normalize(["0772123456", "0701234567"]);
        let batch = SendBatch::new(numbers, &msg, &sender, Priority::High).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.messages().iter().all(|m| m.priority == Priority::High
            && m.sender_id == sender
            && m.message == msg));
    }

    #[test]
    fn method_names_match_gateway() {
        assert_eq!(Method::SendSms.as_str(), "SendSms");
        assert_eq!(Method::Balance.as_str(), "Balance");
    }
}
