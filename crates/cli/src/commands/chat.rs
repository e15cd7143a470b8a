//! Chat command.

use campus_market::models::Sender;
use campus_market::routes::Route;
use campus_market_core::{ProductId, UserId};

use super::{App, CliError, enter};

/// Show the conversation with `seller` about `product`, sending `message` first if given.
///
/// # Errors
///
/// Returns an error without a session, for an unknown product or seller, or
/// for a blank message.
#[allow(clippy::print_stdout)]
pub async fn chat(
    market: &App,
    seller: UserId,
    product: ProductId,
    message: Option<&str>,
) -> Result<(), CliError> {
    enter(market, &Route::Chat { seller, product })?;

    let chat = market.chat();
    let thread = chat.open(seller, product).await?;
    let messages = match message {
        Some(text) => chat.send(seller, product, text).await?,
        None => thread.messages,
    };

    println!("{} · {} ({})", thread.seller.name, thread.product.title, thread.product.price);
    if messages.is_empty() {
        println!("No messages yet");
    }
    for message in &messages {
        let who = match message.sender {
            Sender::User => "You",
            Sender::Seller => thread.seller.name.as_str(),
        };
        println!("[{}] {who}: {}", message.timestamp.format("%H:%M"), message.text);
    }
    Ok(())
}
