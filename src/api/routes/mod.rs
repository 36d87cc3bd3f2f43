pub mod about;
pub mod auth;
pub mod expositions;
pub mod images;
pub mod textes;
pub mod travaux;
pub mod users;
