use std::io;

use egosms::{EgoSmsClientBuilder, SendOptions, SendOutcome, SendSms};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let phone = std::env::var("EGOSMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EGOSMS_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("EGOSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the egosms demo.".to_owned());

    let client = EgoSmsClientBuilder::from_env()?.build()?;
    let request = SendSms::new(
        phone.split(','),
        egosms::MessageText::new(message)?,
        SendOptions::default(),
    )?;

    match client.send(request).await? {
        SendOutcome::Sent(response) => {
            println!("sent, follow-up code: {:?}", response.follow_up_code)
        }
        SendOutcome::Rejected(response) => println!("rejected: {:?}", response.message),
        SendOutcome::NotAuthenticated => println!("credentials were not accepted"),
        SendOutcome::NoValidNumbers => println!("no valid numbers in {phone}"),
        SendOutcome::Undelivered(err) => println!("not delivered: {err}"),
    }

    Ok(())
}
