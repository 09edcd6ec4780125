mod price_service;
mod webserver_service;

pub use price_service::PriceService;
pub use webserver_service::WebserverService;
