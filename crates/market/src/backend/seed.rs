//! Seeded catalog served by [`super::MockBackend`].

use campus_market_core::{
    ActivityId, Category, Condition, NotificationId, Price, ProductId, ReviewId, UserId,
};

use crate::models::{
    Activity, Notification, NotificationKind, Product, Review, Seller, SellerRef,
};

/// Id of the seeded seller.
pub const SELLER_ID: UserId = UserId::new(123);
const SELLER_NAME: &str = "Alex Johnson";

struct SeedProduct {
    id: i64,
    title: &'static str,
    description: &'static str,
    price: i64,
    condition: Condition,
    location: &'static str,
    time_ago: &'static str,
    rating: f32,
    category: Category,
    image: &'static str,
    by_seller: bool,
}

const PRODUCTS: [SeedProduct; 10] = [
    SeedProduct {
        id: 1,
        title: "MacBook Pro 2019",
        description: "Great condition, barely used",
        price: 1100,
        condition: Condition::LikeNew,
        location: "West Campus",
        time_ago: "2 days ago",
        rating: 4.9,
        category: Category::Electronics,
        image: "https://images.unsplash.com/photo-1517336714731-489689fd1ca8",
        by_seller: true,
    },
    SeedProduct {
        id: 2,
        title: "Calculus Textbook 5th Edition",
        description: "No highlights or notes",
        price: 45,
        condition: Condition::Good,
        location: "Library",
        time_ago: "5 hours ago",
        rating: 4.7,
        category: Category::Books,
        image: "https://images.unsplash.com/photo-1544947950-fa07a98d237f",
        by_seller: false,
    },
    SeedProduct {
        id: 3,
        title: "Desk Chair - Ergonomic",
        description: "Perfect for studying long hours",
        price: 85,
        condition: Condition::Good,
        location: "North Dorms",
        time_ago: "1 day ago",
        rating: 4.5,
        category: Category::Furniture,
        image: "https://images.unsplash.com/photo-1580480055273-228ff5388ef8",
        by_seller: false,
    },
    SeedProduct {
        id: 4,
        title: "Sony WH-1000XM4 Headphones",
        description: "Noise cancelling, great for studying",
        price: 220,
        condition: Condition::LikeNew,
        location: "Engineering Building",
        time_ago: "3 days ago",
        rating: 5.0,
        category: Category::Electronics,
        image: "https://images.unsplash.com/photo-1546435770-a3e426bf472b",
        by_seller: true,
    },
    SeedProduct {
        id: 5,
        title: "Bike - Trek FX 2",
        description: "Great for getting around campus",
        price: 350,
        condition: Condition::Good,
        location: "Recreation Center",
        time_ago: "4 days ago",
        rating: 4.6,
        category: Category::Transportation,
        image: "https://images.unsplash.com/photo-1532298229144-0ec0c57515c7",
        by_seller: false,
    },
    SeedProduct {
        id: 6,
        title: "Mini Fridge",
        description: "Perfect for dorm rooms",
        price: 75,
        condition: Condition::Good,
        location: "East Hall",
        time_ago: "1 hour ago",
        rating: 4.2,
        category: Category::Electronics,
        image: "https://images.unsplash.com/photo-1571175443880-49e1d25b2bc5",
        by_seller: false,
    },
    SeedProduct {
        id: 7,
        title: "Physics Lab Manual",
        description: "For PHYS 2211",
        price: 20,
        condition: Condition::Fair,
        location: "Science Building",
        time_ago: "3 hours ago",
        rating: 4.0,
        category: Category::Books,
        image: "https://images.unsplash.com/photo-1592659762303-90081d34b277",
        by_seller: false,
    },
    SeedProduct {
        id: 8,
        title: "Study Desk Lamp",
        description: "Adjustable brightness, USB port",
        price: 28,
        condition: Condition::LikeNew,
        location: "South Apartments",
        time_ago: "6 hours ago",
        rating: 4.8,
        category: Category::Electronics,
        image: "https://images.unsplash.com/photo-1513506003901-1e6a229e2d15",
        by_seller: true,
    },
    SeedProduct {
        id: 9,
        title: "Acoustic Guitar",
        description: "Great for beginners",
        price: 150,
        condition: Condition::Good,
        location: "Music Building",
        time_ago: "12 hours ago",
        rating: 4.5,
        category: Category::Entertainment,
        image: "https://images.unsplash.com/photo-1558098329-a11cff621064",
        by_seller: false,
    },
    SeedProduct {
        id: 10,
        title: "Dorm Room Rug 5x7",
        description: "Soft and cozy",
        price: 40,
        condition: Condition::Good,
        location: "West Residence",
        time_ago: "1 day ago",
        rating: 4.3,
        category: Category::Furniture,
        image: "https://images.unsplash.com/photo-1600166898405-da9535204843",
        by_seller: false,
    },
];

/// Seeded catalog, in display order.
#[must_use]
pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .filter_map(|seed| {
            let price = Price::from_whole(seed.price).ok()?;
            Some(Product {
                id: ProductId::new(seed.id),
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                price,
                images: vec![seed.image.to_string()],
                condition: seed.condition,
                location: seed.location.to_string(),
                category: seed.category,
                rating: Some(seed.rating),
                time_ago: Some(seed.time_ago.to_string()),
                seller: seed.by_seller.then(|| SellerRef {
                    id: SELLER_ID,
                    name: SELLER_NAME.to_string(),
                }),
            })
        })
        .collect()
}

/// Seeded seller profiles.
#[must_use]
pub fn sellers() -> Vec<Seller> {
    let review = |id, reviewer: &str, rating, comment: &str, date: &str| Review {
        id: ReviewId::new(id),
        reviewer: reviewer.to_string(),
        rating,
        comment: comment.to_string(),
        date: date.to_string(),
    };

    vec![Seller {
        id: SELLER_ID,
        name: SELLER_NAME.to_string(),
        avatar: Some("https://i.pravatar.cc/300?img=12".to_string()),
        rating: 4.9,
        member_since: "January 2022".to_string(),
        response_rate: "98%".to_string(),
        response_time: "Under 1 hour".to_string(),
        location: "West Campus".to_string(),
        verified: true,
        bio: "Computer Science student passionate about technology. I sell items I no longer \
              need in good condition. Fast response and fair prices guaranteed!"
            .to_string(),
        reviews: vec![
            review(1, "Michael", 5, "Great seller, item was exactly as described!", "2 weeks ago"),
            review(2, "Sarah", 5, "Very quick responses and easy transaction.", "1 month ago"),
            review(3, "David", 4, "Good condition item, slightly delayed shipping.", "2 months ago"),
        ],
    }]
}

/// Seeded notifications, newest first.
#[must_use]
pub fn notifications() -> Vec<Notification> {
    let notification = |id, kind, title: &str, message: &str, time: &str, read| Notification {
        id: NotificationId::new(id),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        read,
    };

    vec![
        notification(
            1,
            NotificationKind::Trending,
            "MacBook Pro is trending now",
            "This item has gained popularity among students",
            "2 hours ago",
            false,
        ),
        notification(
            2,
            NotificationKind::Info,
            "Website Update",
            "We have updated our terms of service",
            "1 day ago",
            true,
        ),
        notification(
            3,
            NotificationKind::Listing,
            "New Listing Available",
            "Someone just listed \"Calculus Textbook 5th Edition\"",
            "3 days ago",
            false,
        ),
        notification(
            4,
            NotificationKind::Favorite,
            "Price Drop Alert",
            "An item in your favorites has reduced in price",
            "5 days ago",
            true,
        ),
        notification(
            5,
            NotificationKind::Trending,
            "Sony Headphones are trending",
            "This item is getting a lot of attention",
            "1 week ago",
            true,
        ),
    ]
}

/// Seeded admin activity feed, newest first.
#[must_use]
pub fn activity() -> Vec<Activity> {
    [
        (1, "New listing", "MacBook Pro 2019", "Alex Johnson", "10 minutes ago"),
        (2, "New user", "Sarah Williams", "System", "1 hour ago"),
        (3, "Item reported", "Physics Book", "James Smith", "2 hours ago"),
        (4, "Item sold", "Desk Lamp", "Emma Wilson", "3 hours ago"),
        (5, "New listing", "Sony Headphones", "David Brown", "5 hours ago"),
    ]
    .into_iter()
    .map(|(id, action, item, user, time)| Activity {
        id: ActivityId::new(id),
        action: action.to_string(),
        item: item.to_string(),
        user: user.to_string(),
        time: time.to_string(),
    })
    .collect()
}
