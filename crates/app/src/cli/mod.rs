use std::{io::IsTerminal, sync::Arc};

use clap::{Args, Parser, Subcommand};
use ventafacil_app::{
    context::AppContext,
    notifications::{Notifier, TracingNotifier},
};

mod cart;
mod checkout;
mod db;
pub(crate) mod logging;
mod orders;
mod output;
mod products;
mod sales;
mod sell;
mod settings;

#[derive(Debug, Parser)]
#[command(
    name = "ventafacil-app",
    about = "VentaFacil point of sale and storefront CLI",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: logging::LoggingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Products(products::ProductsCommand),
    Cart(cart::CartCommand),
    Checkout(checkout::CheckoutArgs),
    Sell(sell::SellArgs),
    Sales(sales::SalesCommand),
    Orders(orders::OrdersCommand),
    Settings(settings::SettingsCommand),
}

impl Cli {
    pub(crate) fn logging(&self) -> &logging::LoggingArgs {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Products(command) => products::run(command).await,
            Commands::Cart(command) => cart::run(command).await,
            Commands::Checkout(args) => checkout::run(args).await,
            Commands::Sell(args) => sell::run(args).await,
            Commands::Sales(command) => sales::run(command).await,
            Commands::Orders(command) => orders::run(command).await,
            Commands::Settings(command) => settings::run(command).await,
        }
    }
}

/// Backend connection settings shared by every command that talks to the database.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

/// Console output for people at a terminal, log events when piped.
pub(crate) fn notifier() -> Arc<dyn Notifier> {
    if std::io::stdout().is_terminal() {
        Arc::new(output::ConsoleNotifier)
    } else {
        Arc::new(TracingNotifier)
    }
}
