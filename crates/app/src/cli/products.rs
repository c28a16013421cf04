use clap::{Args, Subcommand};
use ventafacil_app::domain::products::{
    LOW_STOCK_THRESHOLD, ProductCatalog, records::ProductRecord,
};

use crate::cli::{DatabaseArgs, notifier, output};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the catalog
    List {
        /// Only show products whose name or category contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Look up a product by its barcode
    Find {
        code: String,
    },

    /// Products running out of stock, lowest first
    LowStock {
        /// Flag products with fewer units than this
        #[arg(long, default_value_t = LOW_STOCK_THRESHOLD)]
        threshold: i32,
    },
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    let context = command.database.connect().await?;
    let mut catalog = ProductCatalog::new(context.products, notifier());

    match command.command {
        ProductsSubcommand::List { search } => {
            catalog
                .refresh()
                .await
                .map_err(|error| format!("failed to list products: {error}"))?;

            let products = match search.as_deref() {
                Some(term) => catalog.search(term),
                None => catalog.products().iter().collect(),
            };

            if products.is_empty() {
                println!("no products found");
                return Ok(());
            }

            println!("{}", render(products));
        }
        ProductsSubcommand::Find { code } => {
            let product = catalog
                .find_by_code(&code)
                .await
                .map_err(|error| format!("failed to find product: {error}"))?
                .ok_or_else(|| format!("no product with code {code}"))?;

            println!("{}", render([&product]));
        }
        ProductsSubcommand::LowStock { threshold } => {
            catalog
                .refresh()
                .await
                .map_err(|error| format!("failed to list products: {error}"))?;

            let products = catalog.low_stock(threshold);

            if products.is_empty() {
                println!("stock ok: no product below {threshold} units");
                return Ok(());
            }

            println!("{}", render(products));
        }
    }

    Ok(())
}

fn render<'a>(products: impl IntoIterator<Item = &'a ProductRecord>) -> String {
    output::table(
        ["ID", "Code", "Name", "Category", "Price", "Stock"],
        products.into_iter().map(|product| {
            [
                product.id.to_string(),
                product.code.clone(),
                product.name.clone(),
                product.category.clone(),
                output::money(product.price),
                product.stock.to_string(),
            ]
        }),
        &[0, 4, 5],
    )
}
