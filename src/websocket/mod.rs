mod ws_handler;

pub mod routes;

pub use routes::websocket_routes;
