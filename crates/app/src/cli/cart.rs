use std::{path::PathBuf, sync::Arc};

use clap::{Args, Subcommand};
use ventafacil::{cart::CartState, products::ProductId};
use ventafacil_app::{domain::carts::CartService, storage::FileStore};

use crate::cli::{DatabaseArgs, notifier, output};

/// Location of the file-backed cart.
#[derive(Debug, Args)]
pub(crate) struct CartStoreArgs {
    /// Directory the cart is persisted in
    #[arg(long, env = "VENTAFACIL_CART_DIR", default_value = ".ventafacil")]
    cart_dir: PathBuf,
}

impl CartStoreArgs {
    /// Opens the persisted cart.
    pub(crate) fn open(&self) -> CartService {
        let mut cart = CartService::new(Arc::new(FileStore::new(&self.cart_dir)), notifier());
        cart.initialize();

        cart
    }
}

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,

    #[command(flatten)]
    store: CartStoreArgs,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart contents
    Show,

    /// Add one unit of the product with this barcode
    Add {
        code: String,

        #[command(flatten)]
        database: DatabaseArgs,
    },

    /// Remove a product from the cart
    Remove { id: i64 },

    /// Set the quantity of a product; zero or less removes it
    Set {
        id: i64,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    let mut cart = command.store.open();

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { code, database } => {
            let context = database.connect().await?;

            let product = context
                .products
                .find_by_code(&code)
                .await
                .map_err(|error| format!("failed to find product: {error}"))?
                .ok_or_else(|| format!("no product with code {code}"))?;

            cart.add_to_cart(&product)
                .map_err(|error| format!("failed to add to cart: {error}"))?;
        }
        CartSubcommand::Remove { id } => cart.remove_from_cart(ProductId::new(id)),
        CartSubcommand::Set { id, quantity } => {
            cart.update_quantity(ProductId::new(id), quantity);
        }
        CartSubcommand::Clear => cart.clear_cart(),
    }

    println!("{}", render(cart.cart()));

    Ok(())
}

pub(crate) fn render(cart: &CartState) -> String {
    if cart.is_empty() {
        return "cart is empty".to_string();
    }

    let lines = output::table(
        ["ID", "Name", "Price", "Qty", "Subtotal"],
        cart.items().iter().map(|item| {
            [
                item.id().to_string(),
                item.name().to_string(),
                output::money(item.price()),
                item.quantity().to_string(),
                output::money(item.subtotal()),
            ]
        }),
        &[0, 2, 3, 4],
    );

    format!(
        "{lines}\n{} items, total {}",
        cart.item_count(),
        output::money(cart.total())
    )
}
