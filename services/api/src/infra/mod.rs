pub mod db;
pub mod media;
pub mod password;
