use clap::{Args, Subcommand};
use jiff::tz::TimeZone;
use uuid::Uuid;
use ventafacil_app::domain::orders::{
    OrderChange, OrdersBoard, PgOrderFeed,
    records::{OrderRecord, OrderStatus, OrderUuid},
};

use crate::cli::{DatabaseArgs, notifier, output};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List online orders, newest first
    List {
        /// pending, approved or rejected
        #[arg(long)]
        status: Option<OrderStatus>,
    },

    /// Show the lines of an order
    Items { order: Uuid },

    /// Convert a pending order into a sale
    Approve { order: Uuid },

    /// Reject an order
    Reject { order: Uuid },

    /// Follow order changes as they happen
    Watch,
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    let context = command.database.connect().await?;
    let mut board = OrdersBoard::new(context.orders.clone(), notifier());

    match command.command {
        OrdersSubcommand::List { status } => {
            let orders = board
                .refresh(status)
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            if orders.is_empty() {
                println!("no orders found");
                return Ok(());
            }

            println!("{}", render(orders));
        }
        OrdersSubcommand::Items { order } => {
            let items = context
                .orders
                .list_order_items(OrderUuid::from_uuid(order))
                .await
                .map_err(|error| format!("failed to list order items: {error}"))?;

            let table = output::table(
                ["Code", "Product", "Price", "Qty", "Subtotal"],
                items.iter().map(|item| {
                    [
                        item.product_code.clone(),
                        item.product_name.clone(),
                        output::money(item.price),
                        item.quantity.to_string(),
                        output::money(item.subtotal()),
                    ]
                }),
                &[2, 3, 4],
            );

            println!("{table}");
        }
        OrdersSubcommand::Approve { order } => {
            let sale = board
                .approve(OrderUuid::from_uuid(order))
                .await
                .map_err(|error| format!("failed to approve order: {error}"))?;

            println!("sale_id: {sale}");
        }
        OrdersSubcommand::Reject { order } => {
            board
                .reject(OrderUuid::from_uuid(order))
                .await
                .map_err(|error| format!("failed to reject order: {error}"))?;
        }
        OrdersSubcommand::Watch => {
            let mut feed = PgOrderFeed::subscribe(&context.db)
                .await
                .map_err(|error| format!("failed to subscribe to orders: {error}"))?;

            board
                .refresh(None)
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            println!("watching orders, {} pending", board.pending_count());

            loop {
                let change = feed
                    .next()
                    .await
                    .map_err(|error| format!("order feed closed: {error}"))?;

                let event = match &change {
                    OrderChange::Inserted(_) => "new",
                    OrderChange::Updated(_) => "updated",
                    OrderChange::Deleted(_) => "deleted",
                };

                let order = change.order();
                println!(
                    "{event} order {} from {} ({}), status {}",
                    order.uuid,
                    order.customer_name,
                    output::money(order.total),
                    order.status
                );

                board.apply_change(change).await;

                println!("{} pending", board.pending_count());
            }
        }
    }

    Ok(())
}

fn render(orders: &[OrderRecord]) -> String {
    output::table(
        ["Order", "Date", "Customer", "Phone", "Status", "Total"],
        orders.iter().map(|order| {
            [
                order.uuid.to_string(),
                order
                    .created_at
                    .to_zoned(TimeZone::system())
                    .strftime("%Y-%m-%d %H:%M")
                    .to_string(),
                order.customer_name.clone(),
                order.customer_phone.clone(),
                order.status.to_string(),
                output::money(order.total),
            ]
        }),
        &[5],
    )
}
