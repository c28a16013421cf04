//! Console rendering.

use rust_decimal::Decimal;
use rusty_money::iso;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use ventafacil::pricing::format_price;
use ventafacil_app::notifications::Notifier;

/// Prints notifications for the person at the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✔ {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("✘ {message}");
    }
}

pub(crate) fn money(amount: Decimal) -> String {
    format_price(amount, iso::MXN)
}

/// Renders `rows` under `header`, right-aligning the columns in `numeric`.
pub(crate) fn table<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
    numeric: &[usize],
) -> String {
    let mut builder = Builder::default();

    builder.push_record(header);

    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    for &column in numeric {
        table.modify(Columns::new(column..=column), Alignment::right());
    }

    table.to_string()
}
