pub const SERVICE_NAME: &str = "listings_service";
