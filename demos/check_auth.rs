use egosms::EgoSmsClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = EgoSmsClientBuilder::from_env()?.build()?;
    println!(
        "user: {}, endpoint: {}, authenticated: {}",
        client.credentials().username().as_str(),
        client.endpoint(),
        client.authenticate().await
    );

    Ok(())
}
