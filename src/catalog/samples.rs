use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Category, Service};

struct Sample {
    name: &'static str,
    category: Category,
    description: &'static str,
    price_range: &'static str,
    location: &'static str,
    rating: f64,
    image_url: &'static str,
    contact_phone: &'static str,
    contact_email: &'static str,
}

const SAMPLES: [Sample; 8] = [
    Sample {
        name: "Royal Palace Banquet Hall",
        category: Category::Venues,
        description: "Elegant hall for weddings and receptions with seating for 500 guests",
        price_range: "$5000 - $15000",
        location: "Downtown",
        rating: 4.8,
        image_url: "https://images.unsplash.com/photo-1532712938310-34cb3982ef74",
        contact_phone: "555-0101",
        contact_email: "royal@palace.com",
    },
    Sample {
        name: "Gourmet Delights Catering",
        category: Category::Catering,
        description: "Premium catering service with multi-cuisine menus",
        price_range: "$50 - $150 per person",
        location: "City Center",
        rating: 4.6,
        image_url: "https://images.unsplash.com/photo-1520854221256-17451cc331bf",
        contact_phone: "555-0202",
        contact_email: "info@gourmetdelights.com",
    },
    Sample {
        name: "Blossom & Bloom Decor",
        category: Category::Decoration,
        description: "Floral arrangements, stage design and lighting",
        price_range: "$1000 - $4000",
        location: "Uptown",
        rating: 4.5,
        image_url: "https://images.unsplash.com/photo-1519225421980-715cb0215aed",
        contact_phone: "555-0303",
        contact_email: "hello@blossombloom.com",
    },
    Sample {
        name: "Candid Moments Photography",
        category: Category::Photography,
        description: "Candid and traditional wedding photography with albums",
        price_range: "$1500 - $5000",
        location: "Downtown",
        rating: 4.9,
        image_url: "https://images.unsplash.com/photo-1511285560929-80b456fea0bc",
        contact_phone: "555-0404",
        contact_email: "book@candidmoments.com",
    },
    Sample {
        name: "Glow Bridal Studio",
        category: Category::Makeup,
        description: "Bridal makeup and hair styling for the whole party",
        price_range: "$300 - $1200",
        location: "City Center",
        rating: 4.7,
        image_url: "https://images.unsplash.com/photo-1487412947147-5cebf100ffc2",
        contact_phone: "555-0505",
        contact_email: "glow@bridalstudio.com",
    },
    Sample {
        name: "Beat Drop DJs",
        category: Category::Dj,
        description: "DJ, sound system and dance floor lighting",
        price_range: "$800 - $2500",
        location: "Suburbs",
        rating: 4.4,
        image_url: "https://images.unsplash.com/photo-1571266028243-d220c9c3b2d2",
        contact_phone: "555-0606",
        contact_email: "gigs@beatdrop.com",
    },
    Sample {
        name: "Vintage Wheels Transport",
        category: Category::Transport,
        description: "Vintage cars and guest shuttles for the big day",
        price_range: "$400 - $2000",
        location: "Uptown",
        rating: 4.3,
        image_url: "https://images.unsplash.com/photo-1494976388531-d1058494cdd8",
        contact_phone: "555-0707",
        contact_email: "rides@vintagewheels.com",
    },
    Sample {
        name: "Little Tokens Gifts",
        category: Category::Gifts,
        description: "Custom return gifts and hampers",
        price_range: "$5 - $50 per guest",
        location: "Suburbs",
        rating: 4.2,
        image_url: "https://images.unsplash.com/photo-1513885535751-8b9238bd345a",
        contact_phone: "555-0808",
        contact_email: "orders@littletokens.com",
    },
];

/// Fresh demo services, one per category.
pub fn sample_services() -> Vec<Service> {
    let now = OffsetDateTime::now_utc();
    SAMPLES
        .iter()
        .map(|s| Service {
            id: Uuid::new_v4().to_string(),
            name: s.name.into(),
            category: s.category,
            description: s.description.into(),
            price_range: s.price_range.into(),
            location: s.location.into(),
            rating: s.rating,
            image_url: s.image_url.into(),
            contact_phone: s.contact_phone.into(),
            contact_email: s.contact_email.into(),
            availability: true,
            created_at: now,
        })
        .collect()
}
