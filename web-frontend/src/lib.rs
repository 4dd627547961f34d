pub mod config;
pub mod handlers;
pub mod proxy;
pub mod services;
pub mod startup;
