use super::*;
use crate::db::repository::RepoError;
use shared::models::OrderStatus;
use shared::models::OrderStatus::{Confirmed, Delivered, Pending, Shipped};

#[tokio::test]
async fn advance_walks_the_full_progression() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 2_000.0).await;
    let order = place_order(&db.pool, user_id, product_id, 1).await;

    for (from, to) in [(Pending, Confirmed), (Confirmed, Shipped), (Shipped, Delivered)] {
        let advanced = order::advance_status(&db.pool, order.id, from, to)
            .await
            .unwrap();
        assert_eq!(advanced.status, to);
    }
}

#[tokio::test]
async fn advance_is_guarded_by_expected_status() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 2_000.0).await;
    let order = place_order(&db.pool, user_id, product_id, 1).await;

    order::advance_status(&db.pool, order.id, Pending, Confirmed)
        .await
        .unwrap();

    // Replaying the same step finds the guard stale
    let err = order::advance_status(&db.pool, order.id, Pending, Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let reloaded = order::find_by_id(&db.pool, order.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, Confirmed);
}

#[tokio::test]
async fn cancel_beats_racing_advance() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 2_000.0).await;
    let order = place_order(&db.pool, user_id, product_id, 1).await;

    // User cancel lands first; the admin advance that raced it must
    // fail its guard instead of resurrecting the order
    order::cancel(&db.pool, order.id, user_id, shared::util::now_millis())
        .await
        .unwrap();

    let err = order::advance_status(&db.pool, order.id, Pending, Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let reloaded = order::find_by_id(&db.pool, order.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn advance_beats_racing_cancel() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 2_000.0).await;
    let order = place_order(&db.pool, user_id, product_id, 1).await;

    order::advance_status(&db.pool, order.id, Pending, Confirmed)
        .await
        .unwrap();
    order::advance_status(&db.pool, order.id, Confirmed, Shipped)
        .await
        .unwrap();
    order::advance_status(&db.pool, order.id, Shipped, Delivered)
        .await
        .unwrap();

    // The cancel that raced the delivery finds a terminal state
    let err = order::cancel(&db.pool, order.id, user_id, shared::util::now_millis())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotCancellable(_)));

    // Never a mixed state: the order stays delivered
    let reloaded = order::find_by_id(&db.pool, order.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, Delivered);
}

#[tokio::test]
async fn advance_missing_order_is_not_found() {
    let db = test_db().await;

    let err = order::advance_status(&db.pool, 424242, Pending, Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn admin_listing_paginates() {
    let db = test_db().await;
    let user_id = seed_user(&db.pool, "buyer@example.com").await;
    let product_id = seed_product(&db.pool, 2_000.0).await;
    for _ in 0..3 {
        place_order(&db.pool, user_id, product_id, 1).await;
    }

    let page = order::find_all(&db.pool, 2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    let rest = order::find_all(&db.pool, 2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
}
