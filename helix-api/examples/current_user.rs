use helix_api::{Client, HelixApiError, Request};
use secrecy::SecretString;

#[tokio::main]
pub async fn main() -> Result<(), HelixApiError> {
    let client = Client::new("client_id")?;
    client.set_bearer_token(SecretString::from("access_token"));

    let res = client.send(Request::users().current()).await?;
    println!("{:?}", res.into_first());
    Ok(())
}
