//! Ratings Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::try_get_timestamp,
    domain::{
        carts::models::CartItemUuid,
        products::models::ProductUuid,
        ratings::models::{NewRating, Rating, RatingUuid},
        users::models::UserUuid,
    },
};

const CREATE_RATING_SQL: &str = include_str!("sql/create_rating.sql");
const RATING_EXISTS_SQL: &str = include_str!("sql/rating_exists.sql");
const PRODUCT_SCORES_SQL: &str = include_str!("sql/product_scores.sql");
const LIST_PRODUCT_RATINGS_SQL: &str = include_str!("sql/list_product_ratings.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRatingsRepository;

impl PgRatingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        rating: NewRating,
    ) -> Result<Rating, sqlx::Error> {
        query_as::<Postgres, Rating>(CREATE_RATING_SQL)
            .bind(rating.uuid.into_uuid())
            .bind(rating.cart_item_uuid.into_uuid())
            .bind(product.into_uuid())
            .bind(user.into_uuid())
            .bind(i16::from(rating.score))
            .bind(rating.comment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn rating_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(RATING_EXISTS_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn product_scores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<u8>, sqlx::Error> {
        let scores = query_scalar::<Postgres, i16>(PRODUCT_SCORES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        scores.into_iter().map(score_from_i16).collect()
    }

    pub(crate) async fn list_product_ratings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<Rating>, sqlx::Error> {
        query_as::<Postgres, Rating>(LIST_PRODUCT_RATINGS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

fn score_from_i16(score: i16) -> Result<u8, sqlx::Error> {
    u8::try_from(score).map_err(|e| sqlx::Error::ColumnDecode {
        index: "score".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Rating {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RatingUuid::from_uuid(row.try_get("uuid")?),
            cart_item_uuid: CartItemUuid::from_uuid(row.try_get("cart_item_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            score: score_from_i16(row.try_get("score")?)?,
            comment: row.try_get("comment")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
