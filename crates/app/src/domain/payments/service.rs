//! Payments service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            models::{CartItem, CartItemUuid, CartUuid},
            repositories::PgCartsRepository,
        },
        notifications::{
            Notifier,
            models::{NewNotification, NotificationKind},
        },
        payments::{
            errors::PaymentsServiceError,
            models::{NewDirectPayment, NewPayment, Payment, PaymentStatus, PaymentUuid},
            repository::{PaymentRecord, PgPaymentsRepository},
            status,
            totals::{self, PaymentTotals},
        },
        products::repository::PgProductsRepository,
        users::models::UserUuid,
        vouchers::{models::Voucher, repository::PgVouchersRepository, rules::VoucherRejection},
    },
};

#[derive(Debug, Clone)]
pub struct PgPaymentsService {
    db: Db,
    repository: PgPaymentsRepository,
    carts_repository: PgCartsRepository,
    products_repository: PgProductsRepository,
    vouchers_repository: PgVouchersRepository,
    notifier: Notifier,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, notifier: Notifier) -> Self {
        Self {
            db,
            repository: PgPaymentsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            products_repository: PgProductsRepository::new(),
            vouchers_repository: PgVouchersRepository::new(),
            notifier,
        }
    }

    /// Redeem each distinct code that is eligible for `subtotal`. Ineligible
    /// codes are skipped; a code whose uses ran out is an error.
    async fn redeem_vouchers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        codes: &[String],
        subtotal: u64,
        now: Timestamp,
    ) -> Result<Vec<Voucher>, PaymentsServiceError> {
        let mut seen = FxHashSet::default();
        let mut redeemed = Vec::with_capacity(codes.len());

        for code in codes.iter().map(|code| code.trim()) {
            if code.is_empty() || !seen.insert(code) {
                continue;
            }

            if let Some(voucher) = self
                .vouchers_repository
                .redeem_voucher(tx, code, subtotal, now)
                .await?
            {
                redeemed.push(voucher);
                continue;
            }

            let rejection = self
                .vouchers_repository
                .get_voucher(tx, code)
                .await?
                .map(|voucher| voucher.check(Some(subtotal), now));

            match rejection {
                Some(Err(VoucherRejection::Exhausted)) => {
                    return Err(PaymentsServiceError::VoucherExhausted {
                        code: code.to_string(),
                    });
                }
                Some(rejection) => debug!(code, ?rejection, "skipping ineligible voucher"),
                None => debug!(code, "skipping unknown voucher"),
            }
        }

        Ok(redeemed)
    }

    /// Redeem vouchers, compute the totals and compare them with what the
    /// client quoted.
    async fn price_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subtotal: u64,
        delivery_fee: u64,
        voucher_codes: &[String],
        quoted_total: u64,
    ) -> Result<(PaymentTotals, Vec<Voucher>), PaymentsServiceError> {
        let now = Timestamp::now();

        let vouchers = self
            .redeem_vouchers(tx, voucher_codes, subtotal, now)
            .await?;

        let discounts: Vec<_> = vouchers
            .iter()
            .map(|voucher| voucher.discount(subtotal, delivery_fee))
            .collect();

        let totals = PaymentTotals::compute(subtotal, delivery_fee, &discounts);

        if totals.total != quoted_total {
            return Err(PaymentsServiceError::TotalMismatch {
                quoted: quoted_total,
                computed: totals.total,
            });
        }

        Ok((totals, vouchers))
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    #[tracing::instrument(
        name = "payments.service.create_payment",
        skip(self, payment),
        fields(
            user_uuid = %user,
            payment_uuid = %payment.uuid,
            cart_uuid = %payment.cart_uuid,
            items = payment.items.len()
        ),
        err
    )]
    async fn create_payment(
        &self,
        user: UserUuid,
        payment: NewPayment,
    ) -> Result<Payment, PaymentsServiceError> {
        let items = dedupe(payment.items);

        if payment.address.trim().is_empty() || items.is_empty() {
            return Err(PaymentsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_cart(&mut tx, payment.cart_uuid)
            .await?;

        if cart.user_uuid.is_some_and(|owner| owner != user) {
            return Err(PaymentsServiceError::NotFound);
        }

        let lines = self
            .repository
            .lock_checkout_items(&mut tx, cart.uuid, &items)
            .await?;

        if lines.len() != items.len() {
            return Err(PaymentsServiceError::NotFound);
        }

        let subtotal = totals::subtotal(lines.iter().map(|line| (line.unit_price, line.quantity)));

        let (totals, vouchers) = self
            .price_order(
                &mut tx,
                subtotal,
                payment.delivery_fee,
                &payment.voucher_codes,
                payment.quoted_total,
            )
            .await?;

        self.repository
            .create_payment(
                &mut tx,
                PaymentRecord {
                    uuid: payment.uuid,
                    user_uuid: user,
                    cart_uuid: cart.uuid,
                    address: payment.address.trim(),
                    totals,
                },
            )
            .await?;

        let voucher_uuids: Vec<_> = vouchers.iter().map(|voucher| voucher.uuid).collect();

        self.repository
            .link_vouchers(&mut tx, payment.uuid, &voucher_uuids)
            .await?;

        self.repository
            .pay_items(&mut tx, cart.uuid, &items, payment.uuid)
            .await?;

        let created = self.repository.get_payment(&mut tx, payment.uuid).await?;

        tx.commit().await?;

        info!(
            payment_uuid = %created.uuid,
            total = created.total,
            vouchers = created.voucher_uuids.len(),
            "created payment"
        );

        self.notifier
            .dispatch(payment_notifications(&created, &lines))
            .await;

        Ok(created)
    }

    #[tracing::instrument(
        name = "payments.service.create_direct_payment",
        skip(self, payment),
        fields(
            user_uuid = %user,
            payment_uuid = %payment.uuid,
            product_uuid = %payment.product_uuid
        ),
        err
    )]
    async fn create_direct_payment(
        &self,
        user: UserUuid,
        payment: NewDirectPayment,
    ) -> Result<Payment, PaymentsServiceError> {
        let quantity = u64::try_from(payment.quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(PaymentsServiceError::InvalidData)?;

        if payment.address.trim().is_empty() {
            return Err(PaymentsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product(&mut tx, payment.product_uuid)
            .await?;

        let cart = self
            .carts_repository
            .get_or_create_user_cart(&mut tx, CartUuid::new(), user)
            .await?;

        let subtotal = totals::subtotal([(product.price, quantity)]);

        let (totals, vouchers) = self
            .price_order(
                &mut tx,
                subtotal,
                payment.delivery_fee,
                &payment.voucher_codes,
                payment.quoted_total,
            )
            .await?;

        self.repository
            .create_payment(
                &mut tx,
                PaymentRecord {
                    uuid: payment.uuid,
                    user_uuid: user,
                    cart_uuid: cart.uuid,
                    address: payment.address.trim(),
                    totals,
                },
            )
            .await?;

        let voucher_uuids: Vec<_> = vouchers.iter().map(|voucher| voucher.uuid).collect();

        self.repository
            .link_vouchers(&mut tx, payment.uuid, &voucher_uuids)
            .await?;

        let item = self
            .repository
            .create_paid_item(
                &mut tx,
                payment.cart_item_uuid,
                cart.uuid,
                product.uuid,
                quantity,
                payment.uuid,
            )
            .await?;

        let created = self.repository.get_payment(&mut tx, payment.uuid).await?;

        tx.commit().await?;

        info!(
            payment_uuid = %created.uuid,
            cart_item_uuid = %item.uuid,
            total = created.total,
            "created direct payment"
        );

        self.notifier
            .dispatch(payment_notifications(&created, &[item]))
            .await;

        Ok(created)
    }

    async fn get_payment(&self, payment: PaymentUuid) -> Result<Payment, PaymentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let payment = self.repository.get_payment(&mut tx, payment).await?;

        tx.commit().await?;

        Ok(payment)
    }

    async fn list_payments(&self, user: UserUuid) -> Result<Vec<Payment>, PaymentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let payments = self.repository.list_payments(&mut tx, user).await?;

        tx.commit().await?;

        Ok(payments)
    }

    #[tracing::instrument(
        name = "payments.service.update_payment_status",
        skip(self),
        fields(payment_uuid = %payment, requested = %requested),
        err
    )]
    async fn update_payment_status(
        &self,
        payment: PaymentUuid,
        requested: PaymentStatus,
    ) -> Result<Payment, PaymentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_payment(&mut tx, payment).await?;

        if !status::can_transition(current.status, requested) {
            return Err(PaymentsServiceError::InvalidTransition {
                from: current.status,
                to: requested,
            });
        }

        self.repository
            .set_payment_status(&mut tx, payment, requested)
            .await?;

        let updated = self.repository.get_payment(&mut tx, payment).await?;

        tx.commit().await?;

        info!(
            payment_uuid = %updated.uuid,
            from = %current.status,
            to = %updated.status,
            "payment status changed"
        );

        self.notifier
            .dispatch([NewNotification::new(
                updated.user_uuid,
                NotificationKind::Payment,
                format!("Payment {} is now {}", updated.uuid, updated.status),
            )
            .with_status(updated.status.as_str())])
            .await;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "payments.service.update_cart_items_with_payment",
        skip(self),
        err
    )]
    async fn update_cart_items_with_payment(
        &self,
        cart: CartUuid,
        payment: PaymentUuid,
    ) -> Result<u64, PaymentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let payment = self.repository.get_payment(&mut tx, payment).await?;

        if payment.cart_uuid != cart {
            return Err(PaymentsServiceError::InvalidReference);
        }

        let stamped = self
            .repository
            .stamp_paid_items(&mut tx, cart, payment.uuid)
            .await?;

        tx.commit().await?;

        Ok(stamped)
    }
}

fn dedupe(items: Vec<CartItemUuid>) -> Vec<CartItemUuid> {
    let mut seen = FxHashSet::default();

    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

/// A receipt for the buyer and one summary per shop selling items in it.
fn payment_notifications(payment: &Payment, items: &[CartItem]) -> Vec<NewNotification> {
    let mut per_shop: FxHashMap<UserUuid, u64> = FxHashMap::default();

    for item in items {
        if let Some(shop) = item.shop_uuid {
            *per_shop.entry(shop).or_default() += item.quantity;
        }
    }

    let mut shops: Vec<_> = per_shop.into_iter().collect();
    shops.sort_unstable();

    let buyer = NewNotification::new(
        payment.user_uuid,
        NotificationKind::Payment,
        format!("Payment {} received, total {}", payment.uuid, payment.total),
    )
    .with_status(payment.status.as_str());

    std::iter::once(buyer)
        .chain(shops.into_iter().map(|(shop, quantity)| {
            NewNotification::new(
                shop,
                NotificationKind::Payment,
                format!("New order of {quantity} item(s) in payment {}", payment.uuid),
            )
            .with_status(payment.status.as_str())
        }))
        .collect()
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Check out unpaid items of a cart. Totals are recomputed from current
    /// prices and the request is refused when they differ from the quote.
    /// Voucher redemption, the payment and the paid items commit together.
    async fn create_payment(
        &self,
        user: UserUuid,
        payment: NewPayment,
    ) -> Result<Payment, PaymentsServiceError>;

    /// Buy a single product immediately.
    async fn create_direct_payment(
        &self,
        user: UserUuid,
        payment: NewDirectPayment,
    ) -> Result<Payment, PaymentsServiceError>;

    /// Retrieve a single payment.
    async fn get_payment(&self, payment: PaymentUuid) -> Result<Payment, PaymentsServiceError>;

    /// Payments made by `user`, newest first.
    async fn list_payments(&self, user: UserUuid) -> Result<Vec<Payment>, PaymentsServiceError>;

    async fn update_payment_status(
        &self,
        payment: PaymentUuid,
        requested: PaymentStatus,
    ) -> Result<Payment, PaymentsServiceError>;

    /// Attach the payment to paid items of its cart that carry no payment
    /// yet. Returns the number of items stamped.
    async fn update_cart_items_with_payment(
        &self,
        cart: CartUuid,
        payment: PaymentUuid,
    ) -> Result<u64, PaymentsServiceError>;
}
