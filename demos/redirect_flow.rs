//! Redirect flow example for the OAuth2 state store.
//!
//! This example demonstrates:
//! - Building a state store from JSON configuration
//! - Issuing a state value for an authorization redirect
//! - Redeeming the state on the callback and rejecting a replay
//!
//! Run with:
//! ```bash
//! RUST_LOG=oauth2_state=trace cargo run --example redirect_flow
//! ```

use std::sync::Arc;

use oauth2_state::{get_user_message, state_store, RedirectStateFlow, StateStoreConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .init();

    println!("=== OAuth2 State Redirect Example ===\n");

    println!("1. Building state store...");
    let config = StateStoreConfig::from_json(r#"{"token_bytes": 32, "initial_capacity": 64}"#)?;
    let store = Arc::new(state_store().config(config).build()?);
    let flow = RedirectStateFlow::new(Arc::clone(&store));

    println!("2. Issuing state for the authorization redirect...");
    let redirect = flow.authorization_url(
        "https://provider.example.com/authorize?client_id=demo&response_type=code",
        "https://app.example.com/dashboard",
    )?;
    println!("   Redirect to: {}", redirect.url);
    println!("   Pending states: {}", store.len());

    println!("3. Handling the callback...");
    let callback_url = format!(
        "https://app.example.com/callback?code=demo-code&state={}",
        redirect.state
    );
    let return_url = flow.complete_url(&callback_url)?;
    println!("   Sending user back to: {}", return_url);

    println!("4. Replaying the same callback...");
    match flow.complete_url(&callback_url) {
        Ok(_) => println!("   Unexpectedly accepted"),
        Err(err) => println!("   Rejected: {}", get_user_message(&err)),
    }

    println!("\nPending states: {}", store.len());
    Ok(())
}
