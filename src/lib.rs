pub mod db;
pub mod helpers;
pub mod logic;
pub mod model;
pub mod net;
pub mod settings;
