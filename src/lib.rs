pub mod config;
pub mod constants;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod review;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;
