use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sort order for property listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Rating,
    #[default]
    Newest,
}

impl SortBy {
    /// The ORDER BY clause for this sort, against the aliased `properties p`
    /// table. A trailing id column keeps pagination deterministic when the
    /// sort key ties.
    pub fn order_clause(&self) -> &'static str {
        match self {
            SortBy::PriceAsc => "p.price_per_night ASC, p.id ASC",
            SortBy::PriceDesc => "p.price_per_night DESC, p.id ASC",
            SortBy::Rating => "p.average_rating DESC, p.id ASC",
            SortBy::Newest => "p.created_at DESC, p.id ASC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_query_string_values() {
        let sort: SortBy = serde_json::from_str("\"price_asc\"").unwrap();
        assert_eq!(sort, SortBy::PriceAsc);
        let sort: SortBy = serde_json::from_str("\"newest\"").unwrap();
        assert_eq!(sort, SortBy::Newest);
    }

    #[test]
    fn default_is_newest() {
        assert_eq!(SortBy::default(), SortBy::Newest);
    }

    #[test]
    fn every_order_clause_has_a_deterministic_tail() {
        for sort in [SortBy::PriceAsc, SortBy::PriceDesc, SortBy::Rating, SortBy::Newest] {
            assert!(sort.order_clause().ends_with("p.id ASC"));
        }
    }
}
