// Default catalog loaded by CatalogStore::with_seed_data

use chrono::NaiveDate;

use crate::models::{Booking, BookingStatus, Destination, Location, Review};

#[allow(clippy::too_many_arguments)]
fn destination(
    id: &str,
    name: &str,
    description: &str,
    image: &str,
    rating: f64,
    price: f64,
    location: Location,
    activities: &[&str],
    tags: &[&str],
    featured: bool,
) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        rating,
        price,
        location,
        activities: activities.iter().map(|a| a.to_string()).collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        featured,
    }
}

// All literal dates in this file are valid calendar dates
fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn review(
    id: &str,
    destination_id: &str,
    user_id: &str,
    user_name: &str,
    rating: u8,
    comment: &str,
    on: (i32, u32, u32),
) -> Review {
    Review {
        id: id.to_string(),
        destination_id: destination_id.to_string(),
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        rating,
        comment: comment.to_string(),
        date: date(on),
    }
}

#[allow(clippy::too_many_arguments)]
fn booking(
    id: &str,
    user_id: &str,
    destination_id: &str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    guests: u32,
    total_price: f64,
    status: BookingStatus,
) -> Booking {
    Booking {
        id: id.to_string(),
        user_id: user_id.to_string(),
        destination_id: destination_id.to_string(),
        start_date: date(start),
        end_date: date(end),
        guests,
        total_price,
        status,
    }
}

pub fn destinations() -> Vec<Destination> {
        vec![
            destination(
                "dest-001",
                "Paris, France",
                "The City of Light beckons with its iconic Eiffel Tower, world-class museums, and charming cafés. Experience the romantic ambiance as you stroll along the Seine River and explore historic neighborhoods.",
                "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?q=80&w=2073&auto=format&fit=crop",
                4.8,
                1200.0,
                Location::Europe,
                &["Eiffel Tower", "Louvre Museum", "Notre Dame Cathedral", "Seine River Cruise"],
                &["Romantic", "Cultural", "Historic"],
                true,
            ),
            destination(
                "dest-002",
                "Bali, Indonesia",
                "A tropical paradise with stunning beaches, lush rice terraces, and ancient temples. Immerse yourself in Balinese culture, indulge in spa treatments, and enjoy the vibrant nightlife.",
                "https://images.unsplash.com/photo-1537996194471-e657df975ab4?q=80&w=1938&auto=format&fit=crop",
                4.7,
                950.0,
                Location::Asia,
                &["Uluwatu Temple", "Ubud Monkey Forest", "Tegallalang Rice Terraces", "Kuta Beach"],
                &["Beach", "Adventure", "Relaxation"],
                true,
            ),
            destination(
                "dest-003",
                "Kyoto, Japan",
                "Discover traditional Japan in this city of temples, gardens, and geishas. Experience the cherry blossom season, participate in a tea ceremony, and explore ancient shrines.",
                "https://images.unsplash.com/photo-1545569341-9eb8b30979d9?q=80&w=2070&auto=format&fit=crop",
                4.9,
                1500.0,
                Location::Asia,
                &["Fushimi Inari Shrine", "Arashiyama Bamboo Grove", "Kinkaku-ji Temple", "Gion District"],
                &["Cultural", "Historic", "Scenic"],
                false,
            ),
            destination(
                "dest-004",
                "Santorini, Greece",
                "Famous for its stunning sunsets, white-washed buildings with blue domes, and crystal-clear waters. Enjoy local cuisine, explore ancient ruins, and relax on volcanic beaches.",
                "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?q=80&w=2074&auto=format&fit=crop",
                4.8,
                1100.0,
                Location::Europe,
                &["Oia Sunset", "Akrotiri Archaeological Site", "Red Beach", "Winery Tour"],
                &["Romantic", "Beach", "Scenic"],
                true,
            ),
            destination(
                "dest-005",
                "New York City, USA",
                "The city that never sleeps offers world-class entertainment, dining, shopping, and iconic landmarks. Explore diverse neighborhoods, enjoy Broadway shows, and take in stunning skyline views.",
                "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?q=80&w=2070&auto=format&fit=crop",
                4.6,
                1300.0,
                Location::NorthAmerica,
                &["Empire State Building", "Central Park", "Times Square", "Statue of Liberty"],
                &["Urban", "Shopping", "Nightlife"],
                false,
            ),
            destination(
                "dest-006",
                "Cairo, Egypt",
                "Home to the last remaining wonder of the ancient world, Cairo blends ancient history with modern urban life. Explore pyramids, cruise the Nile, and haggle in bustling bazaars.",
                "https://images.unsplash.com/photo-1572252009286-268acec5ca0a?q=80&w=2070&auto=format&fit=crop",
                4.5,
                800.0,
                Location::Africa,
                &["Great Pyramids", "Egyptian Museum", "Khan el-Khalili", "Nile River Cruise"],
                &["Historic", "Cultural", "Adventure"],
                false,
            ),
            destination(
                "dest-007",
                "Sydney, Australia",
                "Stunning harbor city known for its iconic Opera House, beautiful beaches, and vibrant culture. Explore world-class dining, surfing spots, and nearby natural wonders.",
                "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9?q=80&w=2070&auto=format&fit=crop",
                4.7,
                1700.0,
                Location::Oceania,
                &["Sydney Opera House", "Bondi Beach", "Harbour Bridge Climb", "Royal Botanic Garden"],
                &["Beach", "Urban", "Scenic"],
                true,
            ),
            destination(
                "dest-008",
                "Rio de Janeiro, Brazil",
                "Famous for its stunning landscapes, vibrant carnival, and beautiful beaches. Experience the rhythm of samba, spectacular views, and the warm Brazilian culture.",
                "https://images.unsplash.com/photo-1483729558449-99ef09a8c325?q=80&w=2070&auto=format&fit=crop",
                4.6,
                950.0,
                Location::SouthAmerica,
                &["Christ the Redeemer", "Copacabana Beach", "Sugarloaf Mountain", "Tijuca Forest"],
                &["Beach", "Cultural", "Nightlife"],
                false,
            ),
            destination(
                "dest-009",
                "Marrakech, Morocco",
                "A vibrant city filled with maze-like alleys, bustling souks, and stunning architecture. Experience sensory overload with colorful spices, unique crafts, and diverse flavors.",
                "https://images.unsplash.com/photo-1597212618440-806262de4f9f?q=80&w=2073&auto=format&fit=crop",
                4.5,
                700.0,
                Location::Africa,
                &["Jemaa el-Fnaa", "Majorelle Garden", "Bahia Palace", "Atlas Mountains Tour"],
                &["Cultural", "Shopping", "Historic"],
                false,
            ),
            destination(
                "dest-010",
                "Reykjavik, Iceland",
                "Gateway to stunning natural wonders including glaciers, hot springs, and the Northern Lights. Experience unique landscapes, geothermal spas, and vibrant local culture.",
                "https://images.unsplash.com/photo-1504893524553-b855bce32c67?q=80&w=2070&auto=format&fit=crop",
                4.8,
                1400.0,
                Location::Europe,
                &["Northern Lights Tour", "Blue Lagoon", "Golden Circle", "Whale Watching"],
                &["Nature", "Adventure", "Scenic"],
                true,
            ),
            destination(
                "dest-011",
                "Cape Town, South Africa",
                "A stunning coastal city nestled between mountains and oceans. Experience diverse wildlife, beautiful vineyards, and rich cultural heritage.",
                "https://images.unsplash.com/photo-1576485375217-d6a95e37a043?q=80&w=2070&auto=format&fit=crop",
                4.7,
                1100.0,
                Location::Africa,
                &["Table Mountain", "Cape of Good Hope", "Robben Island", "Wine Tasting"],
                &["Nature", "Scenic", "Wildlife"],
                false,
            ),
            destination(
                "dest-012",
                "Dubai, UAE",
                "An ultramodern city known for luxury shopping, futuristic architecture, and vibrant nightlife. Experience desert adventures, artificial islands, and the world's tallest building.",
                "https://images.unsplash.com/photo-1512453979798-5ea266f8880c?q=80&w=2070&auto=format&fit=crop",
                4.6,
                1600.0,
                Location::Asia,
                &["Burj Khalifa", "Dubai Mall", "Desert Safari", "Palm Jumeirah"],
                &["Luxury", "Shopping", "Modern"],
                true,
            ),
        ]
}

pub fn reviews() -> Vec<Review> {
    vec![
        review(
            "rev-001",
            "dest-001",
            "user123",
            "John Doe",
            5,
            "Paris was everything I dreamed it would be. The Eiffel Tower at night was magical!",
            (2023, 5, 15),
        ),
        review(
            "rev-002",
            "dest-001",
            "user456",
            "Jane Smith",
            4,
            "Beautiful city but a bit crowded during peak season. The food was amazing though!",
            (2023, 6, 22),
        ),
        review(
            "rev-003",
            "dest-002",
            "user123",
            "John Doe",
            5,
            "Bali exceeded my expectations. The beaches and temples were stunning.",
            (2023, 4, 10),
        ),
        review(
            "rev-004",
            "dest-004",
            "user789",
            "Sarah Johnson",
            5,
            "The sunsets in Santorini are unbelievable. Worth every penny!",
            (2023, 7, 5),
        ),
    ]
}

pub fn bookings() -> Vec<Booking> {
    vec![
        booking(
            "book-001",
            "user123",
            "dest-001",
            (2023, 8, 10),
            (2023, 8, 17),
            2,
            2400.0,
            BookingStatus::Confirmed,
        ),
        booking(
            "book-002",
            "user123",
            "dest-004",
            (2023, 9, 15),
            (2023, 9, 22),
            2,
            2200.0,
            BookingStatus::Confirmed,
        ),
        booking(
            "book-003",
            "user456",
            "dest-002",
            (2023, 7, 20),
            (2023, 7, 27),
            3,
            2850.0,
            BookingStatus::Completed,
        ),
    ]
}
