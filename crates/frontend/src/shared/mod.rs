pub mod api_client;
pub mod api_utils;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod number_format;
pub mod page_frame;
