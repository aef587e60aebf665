use crate::db::DbService;
use crate::db::repository::{order, product, user};
use shared::models::{CartItemInput, Order, OrderCreate, ProductCreate, ShippingAddress};
use sqlx::SqlitePool;

mod test_checkout;
mod test_transitions;

async fn test_db() -> DbService {
    DbService::open_in_memory().await.unwrap()
}

async fn seed_user(pool: &SqlitePool, email: &str) -> i64 {
    user::create(pool, "Test Buyer", email, "hash")
        .await
        .unwrap()
        .id
}

/// Category 1 ("Wood Carvings") comes from the seed migration
async fn seed_product(pool: &SqlitePool, price: f64) -> i64 {
    product::create(
        pool,
        ProductCreate {
            name: "Carved Bowl".to_string(),
            description: None,
            price,
            original_price: None,
            category_id: 1,
            artisan_name: "Test Artisan".to_string(),
            image: Some("/images/carved-bowl.jpg".to_string()),
            stock_quantity: Some(10),
        },
    )
    .await
    .unwrap()
    .id
}

fn address() -> ShippingAddress {
    ShippingAddress {
        street: "14 Carvers Lane".to_string(),
        city: "Jaipur".to_string(),
        state: "Rajasthan".to_string(),
        postal_code: "302001".to_string(),
        country: "India".to_string(),
        phone: "+91 98765 43210".to_string(),
    }
}

async fn place_order(pool: &SqlitePool, user_id: i64, product_id: i64, quantity: i32) -> Order {
    order::create(
        pool,
        user_id,
        OrderCreate {
            items: vec![CartItemInput {
                product_id,
                quantity,
            }],
            shipping_address: address(),
            notes: None,
        },
    )
    .await
    .unwrap()
}
