//! Integration tests for listings, the purchase ledger, and visibility gating.
//!
//! Exercises the repository layer against a real database:
//! - Listing lifecycle transitions and the publish onboarding gate
//! - Ledger idempotency under duplicate completion signals
//! - Scoped purchase coverage (property-wide vs per-room vs per-product)
//! - The full visibility cascade for anonymous, owner, buyer, and bystander

use assert_matches::assert_matches;
use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::visibility::{FieldClass, Visibility};
use roomspec_db::models::image::CreateImage;
use roomspec_db::models::listing::CreateListing;
use roomspec_db::models::product::{CreateProduct, CreateProductSpecification};
use roomspec_db::models::property::CreateProperty;
use roomspec_db::models::room::CreateRoom;
use roomspec_db::models::user::{CreateSellerProfile, CreateUser};
use roomspec_db::repositories::{
    ImageRepo, ListingRepo, ProductRepo, ProductSpecificationRepo, PropertyRepo, RoomRepo,
    SellerProfileRepo, TransactionRepo, UserRepo, VisibilityRepo,
};
use roomspec_db::RepoError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A property with two rooms, one product per room, and one specification
/// per product. Covers every coverage boundary the gating rules care about.
struct Fixture {
    seller_id: i64,
    property_id: i64,
    kitchen_id: i64,
    bedroom_id: i64,
    kitchen_product_id: i64,
    bedroom_product_id: i64,
    kitchen_spec_id: i64,
    bedroom_spec_id: i64,
}

async fn seed(pool: &PgPool) -> Fixture {
    let seller = UserRepo::create(
        pool,
        &CreateUser {
            display_name: "Aki".to_string(),
            role: "seller".to_string(),
        },
    )
    .await
    .unwrap();
    SellerProfileRepo::create(
        pool,
        &CreateSellerProfile {
            user_id: seller.id,
            payment_account_id: "acct_test_1".to_string(),
            charges_enabled: Some(true),
            payouts_enabled: Some(true),
        },
    )
    .await
    .unwrap();

    let property = PropertyRepo::create(
        pool,
        seller.id,
        &CreateProperty {
            name: "Sunny Flat".to_string(),
            address: None,
            description: None,
        },
    )
    .await
    .unwrap();

    let mut rooms = Vec::new();
    let mut products = Vec::new();
    let mut specs = Vec::new();
    for name in ["Kitchen", "Bedroom"] {
        let room = RoomRepo::create(
            pool,
            &CreateRoom {
                property_id: property.id,
                name: name.to_string(),
                floor_area_sqm: None,
            },
        )
        .await
        .unwrap();
        let product = ProductRepo::create(
            pool,
            &CreateProduct {
                room_id: room.id,
                name: format!("{name} fixture"),
                category: None,
                maker: None,
                model_number: None,
            },
        )
        .await
        .unwrap();
        let spec = ProductSpecificationRepo::create(
            pool,
            &CreateProductSpecification {
                product_id: product.id,
                label: "finish".to_string(),
                value: "matte".to_string(),
            },
        )
        .await
        .unwrap();
        rooms.push(room);
        products.push(product);
        specs.push(spec);
    }

    Fixture {
        seller_id: seller.id,
        property_id: property.id,
        kitchen_id: rooms[0].id,
        bedroom_id: rooms[1].id,
        kitchen_product_id: products[0].id,
        bedroom_product_id: products[1].id,
        kitchen_spec_id: specs[0].id,
        bedroom_spec_id: specs[1].id,
    }
}

async fn new_buyer(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: name.to_string(),
            role: "buyer".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn spec_listing(listing_type: &str, target: (Option<i64>, Option<i64>, Option<i64>)) -> CreateListing {
    CreateListing {
        listing_type: listing_type.to_string(),
        title: "Specs".to_string(),
        price: 5000,
        property_id: target.0,
        room_id: target.1,
        product_id: target.2,
    }
}

/// Create and publish a listing in one step.
async fn published_listing(
    pool: &PgPool,
    seller_id: i64,
    listing_type: &str,
    target: (Option<i64>, Option<i64>, Option<i64>),
) -> i64 {
    let listing = ListingRepo::create(pool, seller_id, &spec_listing(listing_type, target))
        .await
        .unwrap();
    ListingRepo::publish(pool, listing.id).await.unwrap();
    listing.id
}

// ---------------------------------------------------------------------------
// Test: Listing lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_lifecycle(pool: PgPool) {
    let fx = seed(&pool).await;

    let listing = ListingRepo::create(
        &pool,
        fx.seller_id,
        &spec_listing("property_specs", (Some(fx.property_id), None, None)),
    )
    .await
    .unwrap();
    assert_eq!(listing.status, "draft");

    let published = ListingRepo::publish(&pool, listing.id).await.unwrap();
    assert_eq!(published.status, "published");

    // Publishing twice is a disallowed transition and leaves the row alone.
    assert_matches!(
        ListingRepo::publish(&pool, listing.id).await,
        Err(RepoError::Core(CoreError::StateTransition {
            entity: "Listing",
            from: "published",
            to: "published",
        }))
    );

    let reserved = ListingRepo::reserve(&pool, listing.id).await.unwrap();
    assert_eq!(reserved.status, "reserved");

    let sold = ListingRepo::complete(&pool, listing.id).await.unwrap();
    assert_eq!(sold.status, "sold");

    // Sold is terminal.
    assert_matches!(
        ListingRepo::cancel(&pool, listing.id).await,
        Err(RepoError::Core(CoreError::StateTransition { from: "sold", .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_requires_complete_onboarding(pool: PgPool) {
    let seller = UserRepo::create(
        &pool,
        &CreateUser {
            display_name: "New seller".to_string(),
            role: "seller".to_string(),
        },
    )
    .await
    .unwrap();
    let property = PropertyRepo::create(
        &pool,
        seller.id,
        &CreateProperty {
            name: "Flat".to_string(),
            address: None,
            description: None,
        },
    )
    .await
    .unwrap();
    let listing = ListingRepo::create(
        &pool,
        seller.id,
        &spec_listing("property_specs", (Some(property.id), None, None)),
    )
    .await
    .unwrap();

    // No profile at all.
    assert_matches!(
        ListingRepo::publish(&pool, listing.id).await,
        Err(RepoError::Core(CoreError::Validation(_)))
    );

    // Profile with charges enabled but payouts still pending.
    SellerProfileRepo::create(
        &pool,
        &CreateSellerProfile {
            user_id: seller.id,
            payment_account_id: "acct_test_2".to_string(),
            charges_enabled: Some(true),
            payouts_enabled: None,
        },
    )
    .await
    .unwrap();
    assert_matches!(
        ListingRepo::publish(&pool, listing.id).await,
        Err(RepoError::Core(CoreError::Validation(_)))
    );

    let updated = ListingRepo::find_by_id(&pool, listing.id).await.unwrap().unwrap();
    assert_eq!(updated.status, "draft");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_mismatched_target(pool: PgPool) {
    let fx = seed(&pool).await;

    // room_specs with a property target.
    assert_matches!(
        ListingRepo::create(
            &pool,
            fx.seller_id,
            &spec_listing("room_specs", (Some(fx.property_id), None, None)),
        )
        .await,
        Err(RepoError::Core(CoreError::Validation(_)))
    );

    // property_specs with two targets set.
    assert_matches!(
        ListingRepo::create(
            &pool,
            fx.seller_id,
            &spec_listing(
                "property_specs",
                (Some(fx.property_id), Some(fx.kitchen_id), None),
            ),
        )
        .await,
        Err(RepoError::Core(CoreError::Validation(_)))
    );

    // Unknown type string.
    assert_matches!(
        ListingRepo::create(
            &pool,
            fx.seller_id,
            &spec_listing("bundle", (Some(fx.property_id), None, None)),
        )
        .await,
        Err(RepoError::Core(CoreError::Validation(_)))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_only_touches_drafts(pool: PgPool) {
    let fx = seed(&pool).await;
    let listing = ListingRepo::create(
        &pool,
        fx.seller_id,
        &spec_listing("property_specs", (Some(fx.property_id), None, None)),
    )
    .await
    .unwrap();

    let update = roomspec_db::models::listing::UpdateListing {
        title: Some("Full property specs".to_string()),
        price: Some(9000),
    };
    let updated = ListingRepo::update_draft(&pool, listing.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Full property specs");
    assert_eq!(updated.price, 9000);

    ListingRepo::publish(&pool, listing.id).await.unwrap();
    let after_publish = ListingRepo::update_draft(&pool, listing.id, &update)
        .await
        .unwrap();
    assert!(after_publish.is_none());
}

// ---------------------------------------------------------------------------
// Test: Ledger idempotency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_purchase_is_idempotent(pool: PgPool) {
    let fx = seed(&pool).await;
    let buyer = new_buyer(&pool, "Umi").await;
    let listing_id = published_listing(
        &pool,
        fx.seller_id,
        "property_specs",
        (Some(fx.property_id), None, None),
    )
    .await;

    let (first, inserted) = TransactionRepo::record_purchase(&pool, buyer, listing_id, 5000)
        .await
        .unwrap();
    assert!(inserted);
    // Redelivered completion signal, even with a different amount.
    let (second, inserted) = TransactionRepo::record_purchase(&pool, buyer, listing_id, 9999)
        .await
        .unwrap();
    assert!(!inserted);

    assert_eq!(second.id, first.id);
    assert_eq!(second.amount, 5000);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_history_is_per_buyer(pool: PgPool) {
    let fx = seed(&pool).await;
    let umi = new_buyer(&pool, "Umi").await;
    let ren = new_buyer(&pool, "Ren").await;
    let property_wide = published_listing(
        &pool,
        fx.seller_id,
        "property_specs",
        (Some(fx.property_id), None, None),
    )
    .await;
    let kitchen_only = published_listing(
        &pool,
        fx.seller_id,
        "room_specs",
        (None, Some(fx.kitchen_id), None),
    )
    .await;

    TransactionRepo::record_purchase(&pool, umi, property_wide, 5000)
        .await
        .unwrap();
    TransactionRepo::record_purchase(&pool, umi, kitchen_only, 2000)
        .await
        .unwrap();
    TransactionRepo::record_purchase(&pool, ren, kitchen_only, 2000)
        .await
        .unwrap();

    let umi_history = TransactionRepo::history_for(&pool, umi).await.unwrap();
    assert_eq!(umi_history.len(), 2);
    let ren_history = TransactionRepo::history_for(&pool, ren).await.unwrap();
    assert_eq!(ren_history.len(), 1);
    assert_eq!(ren_history[0].listing_id, kitchen_only);
}

// ---------------------------------------------------------------------------
// Test: Scoped purchase coverage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_property_purchase_covers_whole_subtree(pool: PgPool) {
    let fx = seed(&pool).await;
    let buyer = new_buyer(&pool, "Umi").await;
    let listing_id = published_listing(
        &pool,
        fx.seller_id,
        "property_specs",
        (Some(fx.property_id), None, None),
    )
    .await;
    TransactionRepo::record_purchase(&pool, buyer, listing_id, 5000)
        .await
        .unwrap();

    for target in [
        EntityRef::Property(fx.property_id),
        EntityRef::Room(fx.bedroom_id),
        EntityRef::Product(fx.kitchen_product_id),
        EntityRef::Specification(fx.bedroom_spec_id),
    ] {
        assert!(
            TransactionRepo::is_purchased(&pool, buyer, target)
                .await
                .unwrap(),
            "{target:?} should be covered by the property-wide purchase"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_room_purchase_is_bounded_to_that_room(pool: PgPool) {
    let fx = seed(&pool).await;
    let buyer = new_buyer(&pool, "Umi").await;
    let listing_id = published_listing(
        &pool,
        fx.seller_id,
        "room_specs",
        (None, Some(fx.kitchen_id), None),
    )
    .await;
    TransactionRepo::record_purchase(&pool, buyer, listing_id, 2000)
        .await
        .unwrap();

    // Everything under the kitchen is unlocked.
    assert!(TransactionRepo::is_purchased(&pool, buyer, EntityRef::Room(fx.kitchen_id))
        .await
        .unwrap());
    assert!(
        TransactionRepo::is_purchased(&pool, buyer, EntityRef::Specification(fx.kitchen_spec_id))
            .await
            .unwrap()
    );

    // Neither the sibling room nor the property above it.
    assert!(!TransactionRepo::is_purchased(&pool, buyer, EntityRef::Room(fx.bedroom_id))
        .await
        .unwrap());
    assert!(
        !TransactionRepo::is_purchased(&pool, buyer, EntityRef::Product(fx.bedroom_product_id))
            .await
            .unwrap()
    );
    assert!(
        !TransactionRepo::is_purchased(&pool, buyer, EntityRef::Property(fx.property_id))
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_purchase_covers_only_that_product(pool: PgPool) {
    let fx = seed(&pool).await;
    let buyer = new_buyer(&pool, "Umi").await;
    let listing_id = published_listing(
        &pool,
        fx.seller_id,
        "product_specs",
        (None, None, Some(fx.kitchen_product_id)),
    )
    .await;
    TransactionRepo::record_purchase(&pool, buyer, listing_id, 1000)
        .await
        .unwrap();

    assert!(
        TransactionRepo::is_purchased(&pool, buyer, EntityRef::Specification(fx.kitchen_spec_id))
            .await
            .unwrap()
    );
    assert!(!TransactionRepo::is_purchased(&pool, buyer, EntityRef::Room(fx.kitchen_id))
        .await
        .unwrap());
    assert!(
        !TransactionRepo::is_purchased(&pool, buyer, EntityRef::Product(fx.bedroom_product_id))
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_purchase_unlocks_nothing(pool: PgPool) {
    let fx = seed(&pool).await;
    let buyer = new_buyer(&pool, "Umi").await;
    let listing_id = published_listing(
        &pool,
        fx.seller_id,
        "consultation",
        (Some(fx.property_id), None, None),
    )
    .await;
    TransactionRepo::record_purchase(&pool, buyer, listing_id, 3000)
        .await
        .unwrap();

    assert!(
        !TransactionRepo::is_purchased(&pool, buyer, EntityRef::Property(fx.property_id))
            .await
            .unwrap()
    );
    assert!(
        !TransactionRepo::is_purchased(&pool, buyer, EntityRef::Specification(fx.kitchen_spec_id))
            .await
            .unwrap()
    );
}

// ---------------------------------------------------------------------------
// Test: Visibility cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_visibility_cascade_for_each_viewer(pool: PgPool) {
    let fx = seed(&pool).await;
    let buyer = new_buyer(&pool, "Umi").await;
    let bystander = new_buyer(&pool, "Ren").await;
    let listing_id = published_listing(
        &pool,
        fx.seller_id,
        "property_specs",
        (Some(fx.property_id), None, None),
    )
    .await;
    TransactionRepo::record_purchase(&pool, buyer, listing_id, 5000)
        .await
        .unwrap();

    let target = EntityRef::Specification(fx.kitchen_spec_id);

    // Public fields are visible to everyone, including anonymous viewers.
    assert_eq!(
        VisibilityRepo::decide_for(&pool, None, target, FieldClass::Public)
            .await
            .unwrap(),
        Visibility::Visible
    );

    // Premium fields: owner sees, buyer sees, bystander gets a blur,
    // anonymous gets a blur.
    assert_eq!(
        VisibilityRepo::decide_for(&pool, Some(fx.seller_id), target, FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Visible
    );
    assert_eq!(
        VisibilityRepo::decide_for(&pool, Some(buyer), target, FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Visible
    );
    assert_eq!(
        VisibilityRepo::decide_for(&pool, Some(bystander), target, FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Blurred
    );
    assert_eq!(
        VisibilityRepo::decide_for(&pool, None, target, FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Blurred
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unlisted_content_is_hidden(pool: PgPool) {
    let fx = seed(&pool).await;
    let viewer = new_buyer(&pool, "Umi").await;

    // No listing covers anything yet.
    assert_eq!(
        VisibilityRepo::decide_for(
            &pool,
            Some(viewer),
            EntityRef::Specification(fx.kitchen_spec_id),
            FieldClass::Premium,
        )
        .await
        .unwrap(),
        Visibility::Hidden
    );

    // A draft listing does not offer the content either.
    ListingRepo::create(
        &pool,
        fx.seller_id,
        &spec_listing("property_specs", (Some(fx.property_id), None, None)),
    )
    .await
    .unwrap();
    assert_eq!(
        VisibilityRepo::decide_for(
            &pool,
            Some(viewer),
            EntityRef::Specification(fx.kitchen_spec_id),
            FieldClass::Premium,
        )
        .await
        .unwrap(),
        Visibility::Hidden
    );

    // The owner still sees their own unlisted content.
    assert_eq!(
        VisibilityRepo::decide_for(
            &pool,
            Some(fx.seller_id),
            EntityRef::Specification(fx.kitchen_spec_id),
            FieldClass::Premium,
        )
        .await
        .unwrap(),
        Visibility::Visible
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancelled_listing_hides_content_again(pool: PgPool) {
    let fx = seed(&pool).await;
    let viewer = new_buyer(&pool, "Umi").await;
    let listing_id = published_listing(
        &pool,
        fx.seller_id,
        "property_specs",
        (Some(fx.property_id), None, None),
    )
    .await;

    let target = EntityRef::Specification(fx.kitchen_spec_id);
    assert_eq!(
        VisibilityRepo::decide_for(&pool, Some(viewer), target, FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Blurred
    );

    ListingRepo::cancel(&pool, listing_id).await.unwrap();
    assert_eq!(
        VisibilityRepo::decide_for(&pool, Some(viewer), target, FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Hidden
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_finest_covering_listing_wins(pool: PgPool) {
    let fx = seed(&pool).await;
    let viewer = new_buyer(&pool, "Umi").await;

    // A published property-wide listing and a cancelled kitchen listing.
    // For kitchen content the room listing is finer and its cancelled
    // status controls; bedroom content still falls to the property listing.
    published_listing(
        &pool,
        fx.seller_id,
        "property_specs",
        (Some(fx.property_id), None, None),
    )
    .await;
    let kitchen_listing = published_listing(
        &pool,
        fx.seller_id,
        "room_specs",
        (None, Some(fx.kitchen_id), None),
    )
    .await;
    ListingRepo::cancel(&pool, kitchen_listing).await.unwrap();

    assert_eq!(
        VisibilityRepo::decide_for(
            &pool,
            Some(viewer),
            EntityRef::Specification(fx.kitchen_spec_id),
            FieldClass::Premium,
        )
        .await
        .unwrap(),
        Visibility::Hidden
    );
    assert_eq!(
        VisibilityRepo::decide_for(
            &pool,
            Some(viewer),
            EntityRef::Specification(fx.bedroom_spec_id),
            FieldClass::Premium,
        )
        .await
        .unwrap(),
        Visibility::Blurred
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_main_image_is_a_teaser(pool: PgPool) {
    let fx = seed(&pool).await;
    let viewer = new_buyer(&pool, "Umi").await;
    published_listing(
        &pool,
        fx.seller_id,
        "room_specs",
        (None, Some(fx.kitchen_id), None),
    )
    .await;

    let main = ImageRepo::create(
        &pool,
        &CreateImage {
            url: "https://cdn.example/main.webp".to_string(),
            image_type: "main".to_string(),
            status: Some("completed".to_string()),
            property_id: None,
            room_id: Some(fx.kitchen_id),
            product_id: None,
            product_specification_id: None,
            drawing_id: None,
        },
    )
    .await
    .unwrap();
    let paid = ImageRepo::create(
        &pool,
        &CreateImage {
            url: "https://cdn.example/paid.webp".to_string(),
            image_type: "paid".to_string(),
            status: Some("completed".to_string()),
            property_id: None,
            room_id: Some(fx.kitchen_id),
            product_id: None,
            product_specification_id: None,
            drawing_id: None,
        },
    )
    .await
    .unwrap();

    // The main image previews the offer without a purchase; the paid one
    // stays blurred until bought.
    assert_eq!(
        VisibilityRepo::decide_for(&pool, Some(viewer), EntityRef::Image(main.id), FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Visible
    );
    assert_eq!(
        VisibilityRepo::decide_for(&pool, Some(viewer), EntityRef::Image(paid.id), FieldClass::Premium)
            .await
            .unwrap(),
        Visibility::Blurred
    );
}
