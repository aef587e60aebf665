use super::*;
use crate::db::repository::RepoError;
use shared::models::{OrderStatus, PaymentMethod, PaymentStatus, ProductUpdate};

#[tokio::test]
async fn order_is_created_pending_with_shipping_fee() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 2_000.0).await;

    let order = place_order(&db.pool, user_id, product_id, 2).await;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.payment_method, PaymentMethod::Cod);
    // 2 × 2000 = 4000, below the threshold, so the flat fee applies
    assert_eq!(order.total_amount, 4_500.0);
    assert!(order.order_number.starts_with("YC-"));
    assert_eq!(order.shipping_city, "Jaipur");
}

#[tokio::test]
async fn shipping_is_waived_above_threshold() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 16_000.0).await;

    let order = place_order(&db.pool, user_id, product_id, 1).await;

    assert_eq!(order.total_amount, 16_000.0);
}

#[tokio::test]
async fn item_price_is_a_snapshot() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 2_000.0).await;

    let order = place_order(&db.pool, user_id, product_id, 1).await;

    // Raising the product price later must not touch the order
    product::update(
        &db.pool,
        product_id,
        ProductUpdate {
            name: None,
            description: None,
            price: Some(9_999.0),
            original_price: None,
            category_id: None,
            artisan_name: None,
            image: None,
            stock_quantity: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let items = order::find_items(&db.pool, order.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].price, 2_000.0);

    let reloaded = order::find_by_id(&db.pool, order.id).await.unwrap().unwrap();
    assert_eq!(reloaded.total_amount, 2_500.0);
}

#[tokio::test]
async fn items_carry_product_display_fields() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 1_000.0).await;

    let order = place_order(&db.pool, user_id, product_id, 3).await;
    let items = order::find_items(&db.pool, order.id).await.unwrap();

    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].product_name, "Carved Bowl");
    assert_eq!(items[0].product_image, "/images/carved-bowl.jpg");
}

#[tokio::test]
async fn checkout_rejects_unknown_product() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;

    let err = order::create(
        &db.pool,
        user_id,
        OrderCreate {
            items: vec![CartItemInput {
                product_id: 424242,
                quantity: 1,
            }],
            shipping_address: address(),
            notes: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RepoError::NotFound(_)));
    // The whole checkout rolled back
    assert!(
        order::find_by_user(&db.pool, user_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn orders_list_newest_first() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 1_000.0).await;

    let first = place_order(&db.pool, user_id, product_id, 1).await;
    let second = place_order(&db.pool, user_id, product_id, 1).await;
    // Force distinct timestamps regardless of clock granularity
    order::set_created_at(&db.pool, first.id, first.created_at - 10_000)
        .await
        .unwrap();

    let mine = order::find_by_user(&db.pool, user_id).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, second.id);
    assert_eq!(mine[1].id, first.id);
}
