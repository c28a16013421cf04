use std::path::PathBuf;

use clap::{Args, Subcommand};
use jiff::{Timestamp, Zoned, tz::TimeZone};
use ventafacil_app::domain::sales::{SalesLedger, SalesPeriod, TOP_PRODUCTS, data::SalesFilter};

use crate::cli::{DatabaseArgs, notifier, output};

#[derive(Debug, Args)]
pub(crate) struct SalesCommand {
    #[command(subcommand)]
    command: SalesSubcommand,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Subcommand)]
enum SalesSubcommand {
    /// List recorded sales, newest first
    List {
        /// Only sales at or after this instant, e.g. 2025-03-14T00:00:00Z
        #[arg(long)]
        since: Option<Timestamp>,

        /// Only sales at or before this instant
        #[arg(long)]
        until: Option<Timestamp>,
    },

    /// Totals for a reporting period in the local time zone
    Stats {
        /// today, yesterday, week or month
        #[arg(long, default_value = "today")]
        period: SalesPeriod,
    },

    /// Best-selling products of a reporting period
    Top {
        /// today, yesterday, week or month
        #[arg(long, default_value = "today")]
        period: SalesPeriod,

        /// How many products to show
        #[arg(long, default_value_t = TOP_PRODUCTS)]
        limit: usize,
    },

    /// Export the sales of a reporting period as CSV
    Export {
        /// today, yesterday, week or month
        #[arg(long, default_value = "today")]
        period: SalesPeriod,

        /// File to write; defaults to sales-report-<period>.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub(crate) async fn run(command: SalesCommand) -> Result<(), String> {
    let context = command.database.connect().await?;
    let mut ledger = SalesLedger::new(context.sales, notifier());

    match command.command {
        SalesSubcommand::List { since, until } => {
            let sales = ledger
                .refresh(SalesFilter {
                    start: since,
                    end: until,
                })
                .await
                .map_err(|error| format!("failed to list sales: {error}"))?;

            if sales.is_empty() {
                println!("no sales found");
                return Ok(());
            }

            let table = output::table(
                ["Sale", "Date", "Items", "Total"],
                sales.iter().map(|sale| {
                    let units: u32 = sale.items.iter().map(|line| line.quantity).sum();

                    [
                        sale.uuid.to_string(),
                        sale.created_at
                            .to_zoned(TimeZone::system())
                            .strftime("%Y-%m-%d %H:%M")
                            .to_string(),
                        units.to_string(),
                        output::money(sale.total),
                    ]
                }),
                &[2, 3],
            );

            println!("{table}");
        }
        SalesSubcommand::Stats { period } => {
            let stats = ledger.stats(period).await;

            println!("period: {period}");
            println!("total_sales: {}", output::money(stats.total_sales));
            println!("transactions: {}", stats.transactions);
            println!("average_ticket: {}", output::money(stats.average_ticket));
        }
        SalesSubcommand::Top { period, limit } => {
            load_period(&mut ledger, period).await?;

            let top = ledger.report().top_products(limit);

            if top.is_empty() {
                println!("no sales found");
                return Ok(());
            }

            let table = output::table(
                ["#", "Product", "Units", "Revenue"],
                top.iter().enumerate().map(|(rank, product)| {
                    [
                        (rank + 1).to_string(),
                        product.name.clone(),
                        product.quantity.to_string(),
                        output::money(product.revenue),
                    ]
                }),
                &[0, 2, 3],
            );

            println!("{table}");
        }
        SalesSubcommand::Export {
            period,
            output: path,
        } => {
            load_period(&mut ledger, period).await?;

            let report = ledger.report();

            if report.is_empty() {
                return Err("no sales to export".to_string());
            }

            let path =
                path.unwrap_or_else(|| PathBuf::from(format!("sales-report-{period}.csv")));

            std::fs::write(&path, report.to_csv(&TimeZone::system()))
                .map_err(|error| format!("failed to write {}: {error}", path.display()))?;

            tracing::info!(path = %path.display(), sales = ledger.sales().len(), "sales exported");
            println!("exported {} sales to {}", ledger.sales().len(), path.display());
        }
    }

    Ok(())
}

async fn load_period(ledger: &mut SalesLedger, period: SalesPeriod) -> Result<(), String> {
    let window = period
        .window(&Zoned::now())
        .map_err(|error| format!("failed to resolve period {period}: {error}"))?;

    ledger
        .refresh(window.into())
        .await
        .map_err(|error| format!("failed to load sales: {error}"))?;

    Ok(())
}
