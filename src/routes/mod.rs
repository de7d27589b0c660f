pub mod health_routes;
pub mod performance_routes;
pub mod route_routes;
pub mod vehicle_routes;
