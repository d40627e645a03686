//! Ratings service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        notifications::{
            Notifier,
            models::{NewNotification, NotificationKind},
        },
        orders::{models::OrderStatus, repository::PgOrdersRepository},
        products::{models::ProductUuid, repository::PgProductsRepository},
        ratings::{
            aggregate::average_rating,
            errors::RatingsServiceError,
            models::{NewRating, Rating},
            repository::PgRatingsRepository,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgRatingsService {
    db: Db,
    repository: PgRatingsRepository,
    orders_repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
    notifier: Notifier,
}

impl PgRatingsService {
    #[must_use]
    pub fn new(db: Db, notifier: Notifier) -> Self {
        Self {
            db,
            repository: PgRatingsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
            notifier,
        }
    }
}

#[async_trait]
impl RatingsService for PgRatingsService {
    #[tracing::instrument(
        name = "ratings.service.create_rating",
        skip(self, rating),
        fields(user_uuid = %user, cart_item_uuid = %rating.cart_item_uuid, score = rating.score),
        err
    )]
    async fn create_rating(
        &self,
        user: UserUuid,
        rating: NewRating,
    ) -> Result<Rating, RatingsServiceError> {
        if !(1..=5).contains(&rating.score) {
            return Err(RatingsServiceError::InvalidData);
        }

        let rating = NewRating {
            comment: rating
                .comment
                .map(|comment| comment.trim().to_string())
                .filter(|comment| !comment.is_empty()),
            ..rating
        };

        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .orders_repository
            .lock_order(&mut tx, rating.cart_item_uuid)
            .await?
            .ok_or(RatingsServiceError::NotFound)?;

        if order.status != OrderStatus::Complete || order.buyer_uuid != Some(user) {
            return Err(RatingsServiceError::NotRateable);
        }

        if self
            .repository
            .rating_exists(&mut tx, order.uuid)
            .await?
        {
            return Err(RatingsServiceError::AlreadyRated);
        }

        self.products_repository
            .lock_product(&mut tx, order.product_uuid)
            .await?;

        let created = self
            .repository
            .create_rating(&mut tx, user, order.product_uuid, rating)
            .await?;

        let scores = self
            .repository
            .product_scores(&mut tx, order.product_uuid)
            .await?;

        let average = average_rating(&scores);

        self.products_repository
            .set_average_rating(&mut tx, order.product_uuid, average)
            .await?;

        tx.commit().await?;

        info!(
            rating_uuid = %created.uuid,
            product_uuid = %created.product_uuid,
            average_rating = average,
            "created rating"
        );

        if let Some(shop) = order.shop_uuid {
            self.notifier
                .dispatch([NewNotification::new(
                    shop,
                    NotificationKind::Rating,
                    format!("Order {} received a {}-star rating", order.uuid, created.score),
                )
                .for_item(order.uuid)])
                .await;
        }

        Ok(created)
    }

    async fn list_product_ratings(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Rating>, RatingsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let ratings = self
            .repository
            .list_product_ratings(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(ratings)
    }
}

#[automock]
#[async_trait]
pub trait RatingsService: Send + Sync {
    /// Rate a completed order line bought by `user`, then refresh the
    /// product's average rating.
    async fn create_rating(
        &self,
        user: UserUuid,
        rating: NewRating,
    ) -> Result<Rating, RatingsServiceError>;

    /// Ratings of a product, newest first.
    async fn list_product_ratings(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Rating>, RatingsServiceError>;
}
