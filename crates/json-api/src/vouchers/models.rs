//! Voucher request and response bodies.

use jiff::Timestamp;
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::vouchers::models::{NewVoucher, Voucher, VoucherKind, VoucherPreview};

use crate::extensions::*;

/// Voucher Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VoucherResponse {
    pub uuid: Uuid,
    pub code: String,

    /// `free_shipping` or `percentage`
    pub kind: String,

    /// Set for percentage vouchers
    pub percent: Option<u8>,

    /// Redemptions left
    pub remaining: u64,

    pub min_order_value: u64,
    pub max_discount: u64,
    pub starts_at: String,
    pub ends_at: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Voucher> for VoucherResponse {
    fn from(voucher: Voucher) -> Self {
        let percent = match voucher.kind {
            VoucherKind::Percentage { percent } => Some(percent),
            VoucherKind::FreeShipping => None,
        };

        Self {
            uuid: voucher.uuid.into(),
            code: voucher.code,
            kind: voucher.kind.as_str().to_string(),
            percent,
            remaining: voucher.remaining,
            min_order_value: voucher.min_order_value,
            max_discount: voucher.max_discount,
            starts_at: voucher.starts_at.to_string(),
            ends_at: voucher.ends_at.to_string(),
            active: voucher.active,
            created_at: voucher.created_at.to_string(),
            updated_at: voucher.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VouchersResponse {
    pub vouchers: Vec<VoucherResponse>,
}

/// Create Voucher Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVoucherRequest {
    pub uuid: Uuid,
    pub code: String,

    /// `free_shipping` or `percentage`
    pub kind: String,

    /// Required for percentage vouchers, 1 to 100
    pub percent: Option<u8>,

    pub remaining: u64,

    #[serde(default)]
    pub min_order_value: u64,

    pub max_discount: u64,

    /// RFC 3339 timestamp
    pub starts_at: String,

    /// RFC 3339 timestamp
    pub ends_at: String,
}

impl CreateVoucherRequest {
    pub(crate) fn into_new_voucher(self) -> Result<NewVoucher, StatusError> {
        let kind = match (self.kind.as_str(), self.percent) {
            ("free_shipping", None) => VoucherKind::FreeShipping,
            ("percentage", Some(percent)) if (1..=100).contains(&percent) => {
                VoucherKind::Percentage { percent }
            }
            _ => return Err(StatusError::bad_request().brief("Invalid voucher kind")),
        };

        let starts_at: Timestamp = self.starts_at.parse().or_400("Invalid starts_at")?;
        let ends_at: Timestamp = self.ends_at.parse().or_400("Invalid ends_at")?;

        Ok(NewVoucher {
            uuid: self.uuid.into(),
            code: self.code,
            kind,
            remaining: self.remaining,
            min_order_value: self.min_order_value,
            max_discount: self.max_discount,
            starts_at,
            ends_at,
        })
    }
}

/// Apply Voucher Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyVoucherRequest {
    /// Order subtotal to check the minimum order value against
    pub subtotal: Option<u64>,
}

/// Apply Voucher Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VoucherPreviewResponse {
    /// Whether the code could be redeemed now
    pub success: bool,

    pub voucher: Option<VoucherResponse>,
    pub message: String,
}

impl From<VoucherPreview> for VoucherPreviewResponse {
    fn from(preview: VoucherPreview) -> Self {
        Self {
            success: preview.success,
            voucher: preview.voucher.map(Into::into),
            message: preview.message,
        }
    }
}
