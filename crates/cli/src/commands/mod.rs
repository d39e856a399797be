//! CLI command implementations.

pub mod cart;
pub mod orders;

use metro_bites_cart::{CartStore, FileStore, TracingObserver};

use crate::config::CliConfig;

/// Open the file-backed cart described by `config` and load its state.
///
/// Unreadable cart lines are logged and dropped so the command can still
/// run. An unreadable order history is left on disk and moved aside by the
/// next checkout.
pub fn open_cart(config: &CliConfig) -> Result<CartStore, Box<dyn std::error::Error>> {
    let storage = FileStore::open(&config.data_dir)?;
    let mut cart = CartStore::with_keys(Box::new(storage), config.keys.clone());

    if let Err(e) = cart.hydrate() {
        if !e.is_degraded() {
            return Err(e.into());
        }
        tracing::warn!(
            data_dir = %config.data_dir.display(),
            "Stored cart data was only partly loaded: {e}"
        );
    }

    cart.subscribe(TracingObserver);
    Ok(cart)
}

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    println!("{text}");
}
