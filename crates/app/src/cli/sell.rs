use clap::Args;
use ventafacil_app::domain::sales::PointOfSale;

use crate::cli::{DatabaseArgs, cart, notifier, output};

/// Ring up products at the counter and record the sale
#[derive(Debug, Args)]
pub(crate) struct SellArgs {
    /// Barcodes to scan, one unit per occurrence
    #[arg(required = true)]
    codes: Vec<String>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SellArgs) -> Result<(), String> {
    let context = args.database.connect().await?;
    let mut counter = PointOfSale::new(context.products, context.sales, notifier());

    for code in &args.codes {
        counter
            .scan(code)
            .await
            .map_err(|error| format!("failed to scan {code}: {error}"))?;
    }

    println!("{}", cart::render(counter.cart()));

    let sale = counter
        .checkout()
        .await
        .map_err(|error| format!("failed to record sale: {error}"))?;

    println!("sale_id: {}", sale.uuid);
    println!("total: {}", output::money(sale.total));

    Ok(())
}
