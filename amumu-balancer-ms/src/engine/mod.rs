pub mod service;

pub use self::service::BalancerService;
pub use self::service::run_service;
