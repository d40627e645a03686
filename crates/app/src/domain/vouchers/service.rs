//! Vouchers service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::vouchers::{
        errors::VouchersServiceError,
        models::{NewVoucher, Voucher, VoucherKind, VoucherPreview},
        repository::PgVouchersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgVouchersService {
    db: Db,
    repository: PgVouchersRepository,
}

impl PgVouchersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVouchersRepository::new(),
        }
    }
}

fn validate(voucher: &NewVoucher) -> Result<(), VouchersServiceError> {
    let percent_ok = match voucher.kind {
        VoucherKind::FreeShipping => true,
        VoucherKind::Percentage { percent } => (1..=100).contains(&percent),
    };

    if voucher.code.trim().is_empty() || voucher.ends_at <= voucher.starts_at || !percent_ok {
        return Err(VouchersServiceError::InvalidData);
    }

    Ok(())
}

#[async_trait]
impl VouchersService for PgVouchersService {
    #[tracing::instrument(
        name = "vouchers.service.create_voucher",
        skip(self, voucher),
        fields(voucher_uuid = %voucher.uuid, kind = voucher.kind.as_str()),
        err
    )]
    async fn create_voucher(&self, voucher: NewVoucher) -> Result<Voucher, VouchersServiceError> {
        validate(&voucher)?;

        let voucher = NewVoucher {
            code: voucher.code.trim().to_string(),
            ..voucher
        };

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_voucher(&mut tx, voucher).await?;

        tx.commit().await?;

        info!(voucher_uuid = %created.uuid, code = %created.code, "created voucher");

        Ok(created)
    }

    async fn get_voucher(&self, code: &str) -> Result<Voucher, VouchersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let voucher = self
            .repository
            .get_voucher(&mut tx, code.trim())
            .await?
            .ok_or(VouchersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(voucher)
    }

    async fn list_vouchers(&self) -> Result<Vec<Voucher>, VouchersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let vouchers = self.repository.list_vouchers(&mut tx).await?;

        tx.commit().await?;

        Ok(vouchers)
    }

    async fn apply_voucher(
        &self,
        code: &str,
        subtotal: Option<u64>,
    ) -> Result<VoucherPreview, VouchersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let voucher = self.repository.get_voucher(&mut tx, code.trim()).await?;

        tx.commit().await?;

        Ok(preview(voucher, subtotal, Timestamp::now()))
    }
}

fn preview(voucher: Option<Voucher>, subtotal: Option<u64>, now: Timestamp) -> VoucherPreview {
    let Some(voucher) = voucher else {
        return VoucherPreview {
            success: false,
            voucher: None,
            message: "voucher not found".to_string(),
        };
    };

    match voucher.check(subtotal, now) {
        Ok(()) => VoucherPreview {
            success: true,
            voucher: Some(voucher),
            message: "voucher can be applied".to_string(),
        },
        Err(rejection) => VoucherPreview {
            success: false,
            message: rejection.to_string(),
            voucher: Some(voucher),
        },
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// Creates a new voucher.
    async fn create_voucher(&self, voucher: NewVoucher) -> Result<Voucher, VouchersServiceError>;

    /// Retrieve a voucher by code.
    async fn get_voucher(&self, code: &str) -> Result<Voucher, VouchersServiceError>;

    async fn list_vouchers(&self) -> Result<Vec<Voucher>, VouchersServiceError>;

    /// Check whether a code could be redeemed now, without redeeming it.
    /// Unknown codes are reported in the preview rather than as an error.
    async fn apply_voucher(
        &self,
        code: &str,
        subtotal: Option<u64>,
    ) -> Result<VoucherPreview, VouchersServiceError>;
}
