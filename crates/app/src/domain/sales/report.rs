//! Sales reports: best sellers and CSV export.

use jiff::tz::TimeZone;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::domain::sales::records::SaleRecord;

/// How many best sellers the reports page shows.
pub const TOP_PRODUCTS: usize = 5;

const CSV_HEADER: &str = "date,time,products,total";

/// Units and revenue of one product across a set of sales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSales {
    pub name: String,
    pub quantity: u64,
    pub revenue: Decimal,
}

/// Report over a list of sales, newest first as the ledger keeps them.
#[derive(Debug, Clone, Copy)]
pub struct SalesReport<'a> {
    sales: &'a [SaleRecord],
}

impl<'a> SalesReport<'a> {
    #[must_use]
    pub fn new(sales: &'a [SaleRecord]) -> Self {
        Self { sales }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// The `limit` products with the most units sold. Lines are grouped by product name;
    /// ties keep the order in which the products first appear.
    #[must_use]
    pub fn top_products(&self, limit: usize) -> Vec<ProductSales> {
        let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
        let mut totals: Vec<ProductSales> = Vec::new();

        for line in self.sales.iter().flat_map(|sale| &sale.items) {
            let position = *positions.entry(line.name.as_str()).or_insert_with(|| {
                totals.push(ProductSales {
                    name: line.name.clone(),
                    quantity: 0,
                    revenue: Decimal::ZERO,
                });

                totals.len() - 1
            });

            if let Some(entry) = totals.get_mut(position) {
                entry.quantity += u64::from(line.quantity);
                entry.revenue += line.subtotal();
            }
        }

        totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        totals.truncate(limit);

        totals
    }

    /// One CSV row per sale with its local date, time, `name (qty)` lines joined by
    /// `; `, and the total to two decimals.
    #[must_use]
    pub fn to_csv(&self, tz: &TimeZone) -> String {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');

        for sale in self.sales {
            let local = sale.created_at.to_zoned(tz.clone());
            let products = sale
                .items
                .iter()
                .map(|line| format!("{} ({})", line.name, line.quantity))
                .collect::<Vec<_>>()
                .join("; ");

            let row = [
                local.strftime("%Y-%m-%d").to_string(),
                local.strftime("%H:%M").to_string(),
                products,
                format!("{:.2}", sale.total),
            ];

            let row: Vec<_> = row.iter().map(|field| csv_field(field)).collect();

            csv.push_str(&row.join(","));
            csv.push('\n');
        }

        csv
    }
}

/// Quotes a field when it holds a separator, a quote or a line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::sales::records::{SaleLine, SaleUuid};

    use super::*;

    fn line(name: &str, price: Decimal, quantity: u32) -> SaleLine {
        SaleLine {
            code: name.to_lowercase(),
            name: name.to_string(),
            price,
            quantity,
        }
    }

    fn sale(created_at: &str, items: Vec<SaleLine>) -> SaleRecord {
        let total = items.iter().map(SaleLine::subtotal).sum();

        SaleRecord {
            uuid: SaleUuid::generate(),
            total,
            items,
            created_at: created_at.parse().unwrap_or(Timestamp::UNIX_EPOCH),
        }
    }

    fn sales() -> Vec<SaleRecord> {
        vec![
            sale(
                "2025-03-14T18:30:00Z",
                vec![
                    line("Coffee", Decimal::new(250, 2), 3),
                    line("Bagel", Decimal::new(400, 2), 1),
                ],
            ),
            sale(
                "2025-03-14T09:05:00Z",
                vec![
                    line("Bagel", Decimal::new(400, 2), 4),
                    line("Coffee", Decimal::new(250, 2), 1),
                    line("Juice", Decimal::new(300, 2), 2),
                ],
            ),
        ]
    }

    #[test]
    fn top_products_rank_by_units_with_revenue() {
        let sales = sales();
        let top = SalesReport::new(&sales).top_products(TOP_PRODUCTS);

        assert_eq!(
            top,
            [
                ProductSales {
                    name: "Bagel".to_string(),
                    quantity: 5,
                    revenue: Decimal::new(2000, 2),
                },
                ProductSales {
                    name: "Coffee".to_string(),
                    quantity: 4,
                    revenue: Decimal::new(1000, 2),
                },
                ProductSales {
                    name: "Juice".to_string(),
                    quantity: 2,
                    revenue: Decimal::new(600, 2),
                },
            ]
        );
    }

    #[test]
    fn top_products_are_capped_and_ties_keep_first_seen_order() {
        let sales = vec![sale(
            "2025-03-14T09:00:00Z",
            vec![
                line("Tea", Decimal::ONE, 1),
                line("Milk", Decimal::ONE, 1),
                line("Soda", Decimal::ONE, 1),
            ],
        )];

        let top = SalesReport::new(&sales).top_products(2);
        let names: Vec<_> = top.iter().map(|product| product.name.as_str()).collect();

        assert_eq!(names, ["Tea", "Milk"]);
        assert!(SalesReport::new(&[]).top_products(TOP_PRODUCTS).is_empty());
    }

    #[test]
    fn csv_has_one_row_per_sale_in_local_time() {
        let sales = sales();
        let csv = SalesReport::new(&sales).to_csv(&TimeZone::UTC);

        assert_eq!(
            csv,
            "date,time,products,total\n\
             2025-03-14,18:30,Coffee (3); Bagel (1),11.50\n\
             2025-03-14,09:05,Bagel (4); Coffee (1); Juice (2),24.50\n"
        );
    }

    #[test]
    fn csv_quotes_fields_with_separators() {
        let sales = vec![sale(
            "2025-03-14T09:00:00Z",
            vec![line("Nuts, \"salted\"", Decimal::new(150, 2), 2)],
        )];

        let csv = SalesReport::new(&sales).to_csv(&TimeZone::UTC);

        assert!(csv.ends_with("2025-03-14,09:00,\"Nuts, \"\"salted\"\" (2)\",3.00\n"));
    }

    #[test]
    fn empty_report_is_just_the_header() {
        let report = SalesReport::new(&[]);

        assert!(report.is_empty());
        assert_eq!(report.to_csv(&TimeZone::UTC), "date,time,products,total\n");
    }
}
