use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/photos", photo_routes())
        .nest("/admin", admin_routes())
        .routes(routes!(handlers::vote::cast_vote))
        .routes(routes!(handlers::leaderboard::leaderboard))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn photo_routes() -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::photo::upload_photo))
        .layer(handlers::photo::upload_body_limit());

    OpenApiRouter::new()
        .routes(routes!(handlers::photo::random_pair))
        .routes(routes!(handlers::photo::my_photos))
        .routes(routes!(handlers::photo::delete_photo))
        .routes(routes!(handlers::photo::photo_image))
        .merge(upload)
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::admin::admin_delete_photo))
        .routes(routes!(handlers::admin::ban_user))
        .routes(routes!(handlers::admin::unban_user))
        .routes(routes!(handlers::admin::list_users))
}
