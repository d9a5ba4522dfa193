use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Recomputes a property's aggregate rating from its review rows. The mean
/// is rounded to one decimal; a property with no reviews goes back to
/// 0.0 / 0.
pub(crate) async fn refresh_property_rating(
    tx: &mut Transaction<'_, Postgres>,
    property_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE properties p
        SET average_rating = COALESCE(agg.avg_rating, 0),
            total_reviews = agg.review_count,
            updated_at = now()
        FROM (
            SELECT ROUND(AVG(rating)::numeric, 1)::float8 AS avg_rating,
                   COUNT(*)::int AS review_count
            FROM reviews
            WHERE property_id = $1
        ) agg
        WHERE p.id = $1
        "#,
    )
    .bind(property_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    // Mirror of the SQL aggregate above, used to pin the rounding contract:
    // mean of overall ratings, one decimal, half away from zero, 0.0 with no
    // reviews. `ROUND(numeric, 1)` behaves the same way.
    fn aggregate(ratings: &[i16]) -> (f64, i64) {
        if ratings.is_empty() {
            return (0.0, 0);
        }
        let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
        let mean = sum as f64 / ratings.len() as f64;
        ((mean * 10.0).round() / 10.0, ratings.len() as i64)
    }

    #[test]
    fn empty_set_resets_to_zero() {
        assert_eq!(aggregate(&[]), (0.0, 0));
    }

    // The lifecycle from the service contract: 5 -> 5.0, then 5,3 -> 4.0,
    // then dropping the 5 leaves 3.0.
    #[test]
    fn review_lifecycle_means() {
        assert_eq!(aggregate(&[5]), (5.0, 1));
        assert_eq!(aggregate(&[5, 3]), (4.0, 2));
        assert_eq!(aggregate(&[3]), (3.0, 1));
    }

    #[test]
    fn mean_rounds_to_one_decimal_half_away_from_zero() {
        // 13/3 = 4.333... -> 4.3, 14/3 = 4.666... -> 4.7
        assert_eq!(aggregate(&[5, 4, 4]), (4.3, 3));
        assert_eq!(aggregate(&[5, 5, 4]), (4.7, 3));
        // 9/2 = 4.5 stays 4.5 at one decimal
        assert_eq!(aggregate(&[5, 4]), (4.5, 2));
    }
}
