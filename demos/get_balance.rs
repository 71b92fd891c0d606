use egosms::EgoSmsClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = EgoSmsClientBuilder::from_env()?.build()?;
    match client.query_balance().await? {
        Some(response) => println!(
            "status: {:?}, balance: {:?}, message: {:?}",
            response.status, response.balance, response.message
        ),
        None => println!("credentials were not accepted"),
    }

    Ok(())
}
