//! Sales Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::domain::sales::{
    data::SalesFilter,
    records::{SaleLine, SaleRecord, SaleTotal, SaleUuid},
};

const LIST_SALES_SQL: &str = include_str!("sql/list_sales.sql");
const CREATE_SALE_SQL: &str = include_str!("sql/create_sale.sql");
const CREATE_SALE_ITEM_SQL: &str = include_str!("sql/create_sale_item.sql");
const UPDATE_PRODUCT_STOCK_SQL: &str = include_str!("sql/update_product_stock.sql");
const SALES_BETWEEN_SQL: &str = include_str!("sql/sales_between.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSalesRepository;

impl PgSalesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: SalesFilter,
    ) -> Result<Vec<SaleRecord>, sqlx::Error> {
        query_as::<Postgres, SaleRecord>(LIST_SALES_SQL)
            .bind(filter.start.map(SqlxTimestamp::from))
            .bind(filter.end.map(SqlxTimestamp::from))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: SaleUuid,
        total: Decimal,
        items: &[SaleLine],
    ) -> Result<SaleRecord, sqlx::Error> {
        query_as::<Postgres, SaleRecord>(CREATE_SALE_SQL)
            .bind(sale.into_uuid())
            .bind(total)
            .bind(Json(items))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_sale_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: SaleUuid,
        line: &SaleLine,
        quantity: i32,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SALE_ITEM_SQL)
            .bind(sale.into_uuid())
            .bind(&line.code)
            .bind(&line.name)
            .bind(line.price)
            .bind(quantity)
            .bind(line.subtotal())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_product_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        quantity: i32,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_PRODUCT_STOCK_SQL)
            .bind(code)
            .bind(quantity)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn sales_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<SaleTotal>, sqlx::Error> {
        query_as::<Postgres, SaleTotal>(SALES_BETWEEN_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SaleRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SaleUuid::from_uuid(row.try_get::<Uuid, _>("id")?),
            total: row.try_get("total")?,
            items: row.try_get::<Json<Vec<SaleLine>>, _>("items")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SaleTotal {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total: row.try_get("total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
