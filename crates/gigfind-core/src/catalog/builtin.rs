use crate::catalog::{Catalog, RecordStore};
use crate::models::{ListingKind, RecordId, SearchableRecord};

pub const CATEGORIES: [&str; 12] = [
    "Photography",
    "Tutoring",
    "Design",
    "Event Help",
    "Web Development",
    "Writing",
    "Translation",
    "Repair & Maintenance",
    "Driving",
    "Cooking",
    "Cleaning",
    "Other",
];

pub const LOCATIONS: [&str; 10] = [
    "Bole",
    "Piazza",
    "Lideta",
    "Kirkos",
    "Arada",
    "Yeka",
    "Nifas Silk-Lafto",
    "Kolfe Keranio",
    "Gulele",
    "Akaky Kaliti",
];

pub const POPULAR_SEARCHES: [&str; 8] = [
    "Logo Design",
    "Website Development",
    "Content Writing",
    "Mobile App",
    "Photography",
    "Video Editing",
    "Translation",
    "Digital Marketing",
];

struct Listing {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    location: &'static str,
    price: f64,
    rating: f64,
    freelancer: &'static str,
    tags: &'static [&'static str],
}

const LISTINGS: [Listing; 8] = [
    Listing {
        id: "1",
        title: "Professional Logo Design",
        description: "I will create a modern, professional logo for your business with unlimited revisions",
        category: "Design",
        location: "Bole, Addis Ababa",
        price: 1500.0,
        rating: 4.9,
        freelancer: "Sarah Tadesse",
        tags: &["logo", "design", "branding", "graphic design"],
    },
    Listing {
        id: "2",
        title: "Website Development",
        description: "Full-stack web development using React, Node.js, and modern technologies",
        category: "Web Development",
        location: "Kazanchis, Addis Ababa",
        price: 8000.0,
        rating: 4.8,
        freelancer: "Michael Bekele",
        tags: &["website", "react", "nodejs", "fullstack"],
    },
    Listing {
        id: "3",
        title: "Content Writing Services",
        description: "Professional content writing for blogs, websites, and marketing materials",
        category: "Writing",
        location: "Piassa, Addis Ababa",
        price: 500.0,
        rating: 4.7,
        freelancer: "Hanan Ahmed",
        tags: &["writing", "content", "blog", "copywriting"],
    },
    Listing {
        id: "4",
        title: "Mobile App Development",
        description: "Native iOS and Android app development with modern UI/UX design",
        category: "Mobile Development",
        location: "Megenagna, Addis Ababa",
        price: 12000.0,
        rating: 4.9,
        freelancer: "Daniel Worku",
        tags: &["mobile", "ios", "android", "app development"],
    },
    Listing {
        id: "5",
        title: "Photography Services",
        description: "Professional photography for events, portraits, and commercial projects",
        category: "Photography",
        location: "CMC, Addis Ababa",
        price: 2000.0,
        rating: 4.6,
        freelancer: "Meron Getachew",
        tags: &["photography", "events", "portraits", "commercial"],
    },
    Listing {
        id: "6",
        title: "Digital Marketing Strategy",
        description: "Comprehensive digital marketing strategy and social media management",
        category: "Marketing",
        location: "Arat Kilo, Addis Ababa",
        price: 3500.0,
        rating: 4.8,
        freelancer: "Yonas Haile",
        tags: &["marketing", "social media", "strategy", "digital"],
    },
    Listing {
        id: "7",
        title: "Translation Services",
        description: "Professional translation between Amharic, English, and other languages",
        category: "Translation",
        location: "Sidist Kilo, Addis Ababa",
        price: 300.0,
        rating: 4.9,
        freelancer: "Tigist Alemayehu",
        tags: &["translation", "amharic", "english", "languages"],
    },
    Listing {
        id: "8",
        title: "Video Editing",
        description: "Professional video editing for YouTube, social media, and promotional content",
        category: "Video",
        location: "Mexico, Addis Ababa",
        price: 1200.0,
        rating: 4.7,
        freelancer: "Robel Tesfaye",
        tags: &["video editing", "youtube", "social media", "promotional"],
    },
];

pub fn records() -> Vec<SearchableRecord> {
    LISTINGS
        .iter()
        .map(|listing| SearchableRecord {
            id: RecordId::from(listing.id),
            title: listing.title.to_string(),
            description: listing.description.to_string(),
            freelancer_name: listing.freelancer.to_string(),
            category: listing.category.to_string(),
            location: listing.location.to_string(),
            tags: listing.tags.iter().map(|tag| tag.to_string()).collect(),
            price: listing.price,
            rating: listing.rating,
            kind: ListingKind::Gig,
        })
        .collect()
}

pub fn catalog() -> Catalog {
    // Invariants checked by builtin_records_satisfy_store_invariants.
    Catalog {
        store: RecordStore { records: records() },
        categories: to_strings(&CATEGORIES),
        locations: to_strings(&LOCATIONS),
        popular_searches: to_strings(&POPULAR_SEARCHES),
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
