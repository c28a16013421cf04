use clap::Args;
use ventafacil_app::domain::checkout::{Checkout, CustomerDetails};

use crate::cli::{DatabaseArgs, cart::CartStoreArgs, notifier, output};

/// Place an online order for the file-backed cart
#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer full name
    #[arg(long)]
    name: String,

    /// Customer email
    #[arg(long)]
    email: String,

    /// Customer phone number
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    /// Optional notes for the order
    #[arg(long, default_value = "")]
    notes: String,

    #[command(flatten)]
    store: CartStoreArgs,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CheckoutArgs) -> Result<(), String> {
    let mut cart = args.store.open();
    let context = args.database.connect().await?;

    let details = CustomerDetails {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        notes: args.notes,
    };

    let order = Checkout::new(context.orders, notifier())
        .place_order(&mut cart, details)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!("order_id: {}", order.uuid);
    println!("status: {}", order.status);
    println!("total: {}", output::money(order.total));

    Ok(())
}
