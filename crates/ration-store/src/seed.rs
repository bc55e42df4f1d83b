//! Bootstrap records loaded into a fresh [`Stores`](crate::Stores).
//!
//! Seeding writes the records directly; the seeded ledger entry does not
//! reduce the seeded stock.

use chrono::Utc;
use ration_shared::{AssignmentId, ProductId, UserId};

use crate::models::{Product, ProductAssignment, RoleProfile, User};

pub const SEED_PASSWORD: &str = "password";

pub fn products() -> Vec<Product> {
    let now = Utc::now();
    [
        ("1", "Rice", 45.0, 100, "kg"),
        ("2", "Wheat", 30.0, 150, "kg"),
        ("3", "Sugar", 50.0, 75, "kg"),
        ("4", "Oil", 120.0, 50, "liter"),
    ]
    .into_iter()
    .map(|(id, name, mrp, quantity, unit)| Product {
        id: ProductId::from(id),
        name: name.to_string(),
        mrp,
        quantity,
        unit: unit.to_string(),
        image: None,
        created_at: now,
    })
    .collect()
}

pub fn users() -> Vec<User> {
    let now = Utc::now();
    let user = |id: &str, name: &str, email: &str, profile, city: &str, contact: &str| User {
        id: UserId::from(id),
        name: name.to_string(),
        email: email.to_string(),
        password: SEED_PASSWORD.to_string(),
        profile,
        city: Some(city.to_string()),
        contact_number: Some(contact.to_string()),
        created_at: now,
    };

    vec![
        user(
            "1",
            "Admin User",
            "admin@example.com",
            RoleProfile::Admin,
            "Mumbai",
            "9876543210",
        ),
        user(
            "2",
            "Shop User",
            "shop@example.com",
            RoleProfile::Shopkeeper {
                aadhar_number: Some("123456789012".to_string()),
            },
            "Delhi",
            "9876543211",
        ),
        user(
            "3",
            "Customer User",
            "customer@example.com",
            RoleProfile::Customer {
                smart_card_number: Some("SC12345".to_string()),
            },
            "Bangalore",
            "9876543212",
        ),
    ]
}

pub fn assignments() -> Vec<ProductAssignment> {
    vec![ProductAssignment {
        id: AssignmentId::from("1"),
        product_id: ProductId::from("1"),
        product_name: "Rice".to_string(),
        recipient_id: UserId::from("3"),
        recipient_name: "Customer User".to_string(),
        issuer_id: UserId::from("1"),
        issuer_name: "Admin User".to_string(),
        quantity: 10,
        created_at: Utc::now(),
    }]
}
