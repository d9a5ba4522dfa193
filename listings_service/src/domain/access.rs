//! Ownership and authorship rules. The auth service answers "who is this";
//! these checks answer "may they do that".

use models_listings::db::{Property, Review};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Only the listing's host may modify it")]
    NotOwner,

    #[error("Hosts cannot review their own listings")]
    OwnListing,

    #[error("Only the review's author may modify it")]
    NotAuthor,
}

pub fn ensure_property_owner(property: &Property, user_id: Uuid) -> Result<(), AccessError> {
    if property.host_id != user_id {
        return Err(AccessError::NotOwner);
    }
    Ok(())
}

pub fn ensure_can_review(property: &Property, user_id: Uuid) -> Result<(), AccessError> {
    if property.host_id == user_id {
        return Err(AccessError::OwnListing);
    }
    Ok(())
}

pub fn ensure_review_author(review: &Review, user_id: Uuid) -> Result<(), AccessError> {
    if review.user_id != user_id {
        return Err(AccessError::NotAuthor);
    }
    Ok(())
}

/// An inactive listing is invisible to everyone but its host.
pub fn can_view_property(property: &Property, viewer: Option<Uuid>) -> bool {
    property.is_active || viewer == Some(property.host_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models_listings::shared::{PlaceType, PropertyType, VerificationStatus};

    fn property(host_id: Uuid, is_active: bool) -> Property {
        Property {
            id: Uuid::now_v7(),
            title: "Sunny loft in the old town".to_string(),
            slug: "sunny-loft-in-the-old-town".to_string(),
            description: String::new(),
            property_type: PropertyType::Apartment,
            place_type: PlaceType::EntirePlace,
            bedrooms: 1,
            beds: 1,
            bathrooms: 1.0,
            max_guests: 2,
            max_adults: 2,
            max_children: 0,
            max_infants: 0,
            pets_allowed: false,
            price_per_night: 12500,
            currency: "USD".to_string(),
            cleaning_fee: 0,
            service_fee: 0,
            weekly_discount: 0,
            monthly_discount: 0,
            location_id: Uuid::now_v7(),
            is_active,
            is_featured: false,
            verification_status: VerificationStatus::Pending,
            instant_book: false,
            average_rating: 0.0,
            total_reviews: 0,
            host_id,
            host_name: "Maya Lindqvist".to_string(),
            host_email: "host@example.com".to_string(),
            host_avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            published_at: None,
        }
    }

    fn review(author_id: Uuid) -> Review {
        Review {
            id: Uuid::now_v7(),
            property_id: Uuid::now_v7(),
            user_id: author_id,
            rating: 5,
            comment: None,
            cleanliness_rating: None,
            accuracy_rating: None,
            communication_rating: None,
            location_rating: None,
            check_in_rating: None,
            value_rating: None,
            helpful_count: 0,
            reported: false,
            is_verified_stay: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn only_the_host_owns_the_listing() {
        let host = Uuid::now_v7();
        let stranger = Uuid::now_v7();
        let p = property(host, true);

        assert_eq!(ensure_property_owner(&p, host), Ok(()));
        assert_eq!(ensure_property_owner(&p, stranger), Err(AccessError::NotOwner));
    }

    #[test]
    fn hosts_cannot_review_their_own_listing() {
        let host = Uuid::now_v7();
        let guest = Uuid::now_v7();
        let p = property(host, true);

        assert_eq!(ensure_can_review(&p, host), Err(AccessError::OwnListing));
        assert_eq!(ensure_can_review(&p, guest), Ok(()));
    }

    #[test]
    fn only_the_author_may_touch_a_review() {
        let author = Uuid::now_v7();
        let r = review(author);

        assert_eq!(ensure_review_author(&r, author), Ok(()));
        assert_eq!(
            ensure_review_author(&r, Uuid::now_v7()),
            Err(AccessError::NotAuthor)
        );
    }

    #[test]
    fn inactive_listing_is_visible_only_to_its_host() {
        let host = Uuid::now_v7();
        let p = property(host, false);

        assert!(can_view_property(&p, Some(host)));
        assert!(!can_view_property(&p, Some(Uuid::now_v7())));
        assert!(!can_view_property(&p, None));

        let active = property(host, true);
        assert!(can_view_property(&active, None));
    }
}
