pub mod drawing;
pub mod health;
pub mod image;
pub mod listing;
pub mod product;
pub mod property;
pub mod purchase;
pub mod room;
pub mod user;
pub mod visibility;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                               create
/// /users/{id}                          get
/// /seller-profile                      get, create, update (caller's own)
///
/// /properties                          list mine, create
/// /properties/{id}                     get, update, delete
/// /properties/{property_id}/rooms      list
/// /properties/{property_id}/drawings   list
///
/// /rooms/{id}                          get, update, delete
/// /rooms                               create
/// /rooms/{room_id}/products            list
///
/// /products                            create
/// /products/{id}                       get, update, delete
/// /products/{product_id}/specifications list
/// /products/{product_id}/dimensions    list
///
/// /specifications                      create
/// /specifications/{id}                 get, update, delete
/// /dimensions                          create
/// /dimensions/{id}                     get, update, delete
///
/// /drawings                            create
/// /drawings/{id}                       get, update, delete
///
/// /images                              list by parent (?parent_kind&parent_id), create
/// /images/{id}                         get, update, delete
///
/// /listings                            list mine, create
/// /listings/{id}                       get, update (draft only)
/// /listings/{id}/publish               publish (POST)
/// /listings/{id}/reserve               reserve (POST)
/// /listings/{id}/cancel                cancel (POST)
///
/// /purchases/complete                  payment completion signal (POST)
/// /purchases/history                   caller's purchases (GET)
///
/// /visibility                          visibility check (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::user_router())
        .nest("/seller-profile", user::seller_profile_router())
        .nest("/properties", property::router())
        .nest("/rooms", room::router())
        .nest("/products", product::router())
        .nest("/specifications", product::specification_router())
        .nest("/dimensions", product::dimension_router())
        .nest("/drawings", drawing::router())
        .nest("/images", image::router())
        .nest("/listings", listing::router())
        .nest("/purchases", purchase::router())
        .nest("/visibility", visibility::router())
}
