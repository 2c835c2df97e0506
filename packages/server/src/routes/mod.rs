use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::cheese::*;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/cheeses", cheese_routes())
}

fn cheese_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_cheeses, create_cheese))
        .routes(routes!(get_cheese, update_cheese, delete_cheese))
        .routes(routes!(get_cheese_price))
        .routes(routes!(get_cheese_picture))
        .routes(routes!(get_cheese_cost))
}
