pub mod directions;
pub mod geocoder;
pub mod modes;
pub mod optimizer;
pub mod providers;
pub mod search;
pub mod tour_api;
