use std::io;

use nexmo_sms::{Credentials, Msisdn, NexmoClient};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = required_env("NEXMO_API_KEY")?;
    let api_secret = required_env("NEXMO_API_SECRET")?;
    let phone_raw = required_env("NEXMO_TO")?;
    let from = std::env::var("NEXMO_FROM").unwrap_or_default();
    let callback = std::env::var("NEXMO_CALLBACK").unwrap_or_default();
    let message = std::env::var("NEXMO_MESSAGE")
        .unwrap_or_else(|_| "Hello from the nexmo-sms demo.".to_owned());

    let client = NexmoClient::new(Credentials::new(api_key, api_secret, from));
    let to = Msisdn::parse(None, phone_raw)?;

    let response = nexmo_sms::send(&client, to.as_str(), &message, &callback).await?;
    println!("message-count: {:?}", response.message_count);
    for message in &response.messages {
        println!(
            "to: {:?}, id: {:?}, status: {:?}, error: {:?}, price: {:?}",
            message.to, message.message_id, message.status, message.error_text, message.message_price
        );
    }

    Ok(())
}
