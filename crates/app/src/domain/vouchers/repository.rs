//! Vouchers Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use thiserror::Error;

use crate::{
    database::{amount_to_i64, try_get_amount, try_get_timestamp},
    domain::vouchers::models::{NewVoucher, Voucher, VoucherKind, VoucherUuid},
};

const CREATE_VOUCHER_SQL: &str = include_str!("sql/create_voucher.sql");
const GET_VOUCHER_SQL: &str = include_str!("sql/get_voucher.sql");
const LIST_VOUCHERS_SQL: &str = include_str!("sql/list_vouchers.sql");
const REDEEM_VOUCHER_SQL: &str = include_str!("sql/redeem_voucher.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVouchersRepository;

impl PgVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: NewVoucher,
    ) -> Result<Voucher, sqlx::Error> {
        let percentage = match voucher.kind {
            VoucherKind::FreeShipping => None,
            VoucherKind::Percentage { percent } => Some(i16::from(percent)),
        };

        query_as::<Postgres, Voucher>(CREATE_VOUCHER_SQL)
            .bind(voucher.uuid.into_uuid())
            .bind(voucher.code)
            .bind(voucher.kind.as_str())
            .bind(percentage)
            .bind(amount_to_i64(voucher.remaining, "remaining")?)
            .bind(amount_to_i64(voucher.min_order_value, "min_order_value")?)
            .bind(amount_to_i64(voucher.max_discount, "max_discount")?)
            .bind(SqlxTimestamp::from(voucher.starts_at))
            .bind(SqlxTimestamp::from(voucher.ends_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<Voucher>, sqlx::Error> {
        query_as::<Postgres, Voucher>(GET_VOUCHER_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_vouchers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Voucher>, sqlx::Error> {
        query_as::<Postgres, Voucher>(LIST_VOUCHERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Consume one use of the voucher if it is redeemable for `subtotal` at
    /// `now`. Returns `None` when it is not, leaving `remaining` untouched.
    pub(crate) async fn redeem_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        subtotal: u64,
        now: Timestamp,
    ) -> Result<Option<Voucher>, sqlx::Error> {
        query_as::<Postgres, Voucher>(REDEEM_VOUCHER_SQL)
            .bind(code)
            .bind(amount_to_i64(subtotal, "subtotal")?)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }
}

#[derive(Debug, Error)]
#[error("invalid voucher kind {kind} with percentage {percentage:?}")]
struct InvalidVoucherKind {
    kind: String,
    percentage: Option<i16>,
}

fn voucher_kind(kind: String, percentage: Option<i16>) -> Result<VoucherKind, InvalidVoucherKind> {
    match (kind.as_str(), percentage.map(u8::try_from)) {
        ("free_shipping", None) => Ok(VoucherKind::FreeShipping),
        ("percentage", Some(Ok(percent))) => Ok(VoucherKind::Percentage { percent }),
        _ => Err(InvalidVoucherKind { kind, percentage }),
    }
}

impl<'r> FromRow<'r, PgRow> for Voucher {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind = voucher_kind(row.try_get("kind")?, row.try_get("percentage")?).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: VoucherUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            kind,
            remaining: try_get_amount(row, "remaining")?,
            min_order_value: try_get_amount(row, "min_order_value")?,
            max_discount: try_get_amount(row, "max_discount")?,
            starts_at: try_get_timestamp(row, "starts_at")?,
            ends_at: try_get_timestamp(row, "ends_at")?,
            active: row.try_get("active")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voucher_kind_requires_percentage_only_for_percentage_vouchers() {
        assert!(matches!(
            voucher_kind("free_shipping".to_string(), None),
            Ok(VoucherKind::FreeShipping)
        ));
        assert!(matches!(
            voucher_kind("percentage".to_string(), Some(15)),
            Ok(VoucherKind::Percentage { percent: 15 })
        ));
        assert!(voucher_kind("percentage".to_string(), None).is_err());
        assert!(voucher_kind("free_shipping".to_string(), Some(10)).is_err());
        assert!(voucher_kind("percentage".to_string(), Some(-1)).is_err());
    }
}
