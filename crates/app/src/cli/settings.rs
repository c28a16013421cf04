use clap::{Args, Subcommand};
use ventafacil_app::domain::settings::{SettingsStore, StoreSettings};

use crate::cli::{DatabaseArgs, notifier};

#[derive(Debug, Args)]
pub(crate) struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Subcommand)]
enum SettingsSubcommand {
    /// Show the effective store settings
    Show,

    /// Store a setting, e.g. `set business_name "Ferretería Centro"`
    Set { key: String, value: String },
}

pub(crate) async fn run(command: SettingsCommand) -> Result<(), String> {
    let context = command.database.connect().await?;
    let mut store = SettingsStore::new(context.settings, notifier());

    store
        .refresh()
        .await
        .map_err(|error| format!("failed to load settings: {error}"))?;

    if let SettingsSubcommand::Set { key, value } = command.command {
        store
            .update(&key, &value)
            .await
            .map_err(|error| format!("failed to save setting: {error}"))?;
    }

    print_settings(store.settings());

    Ok(())
}

fn print_settings(settings: &StoreSettings) {
    let StoreSettings {
        theme,
        contact,
        business,
        notifications,
    } = settings;

    println!("business_name: {}", business.name);
    println!("currency_symbol: {}", business.currency_symbol);
    println!("tax_rate: {}", business.tax_rate);
    println!("order_confirmation_message: {}", business.confirmation_message);
    println!("admin_email: {}", contact.admin_email);
    println!("admin_phone: {}", contact.admin_phone);
    println!("business_address: {}", contact.business_address);
    println!("business_hours: {}", contact.business_hours);
    println!("theme_mode: {}", theme.mode);
    println!("theme_primary_color: {}", theme.primary_color);
    println!("theme_secondary_color: {}", theme.secondary_color);
    println!("email_notifications: {}", notifications.email_enabled);
    println!("enable_online_orders: {}", notifications.online_orders_enabled);
}
