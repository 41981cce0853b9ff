#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use veggiemap_core::{
    restaurants_url, ApiError, ApiResult, Cuisine, Endpoints, Location, PriceRange, Rating,
    Restaurant, RestaurantApi, RestaurantDraft,
};

pub const PRIMARY: &str = "http://primary.test/api";
pub const FALLBACK: &str = "http://fallback.test/api";

pub fn endpoints() -> Endpoints {
    Endpoints {
        primary: PRIMARY.to_string(),
        fallback: FALLBACK.to_string(),
    }
}

pub fn draft(name: &str, cuisine: Cuisine, price: PriceRange, rating: u8) -> RestaurantDraft {
    RestaurantDraft {
        name: name.to_string(),
        description: format!("{name} serves plant-based plates"),
        cuisine,
        price_range: price,
        rating: Rating::new(rating).unwrap(),
        recommended_by: "Sam".to_string(),
        location: Location {
            latitude: 52.52,
            longitude: 13.405,
            address: "Alexanderplatz 1, Berlin".to_string(),
        },
    }
}

pub fn restaurant(
    id: &str,
    name: &str,
    cuisine: Cuisine,
    price: PriceRange,
    rating: u8,
    timestamp: i64,
) -> Restaurant {
    Restaurant::from_draft(
        draft(name, cuisine, price, rating),
        id.to_string(),
        timestamp,
    )
}

/// Small mixed collection in insertion order.
pub fn sample_collection() -> Vec<Restaurant> {
    vec![
        restaurant("r1", "Tofu House", Cuisine::Japanese, PriceRange::Moderate, 4, 3_000),
        restaurant("r2", "Green Curry", Cuisine::Thai, PriceRange::Budget, 5, 1_000),
        restaurant("r3", "Pasta Verde", Cuisine::Italian, PriceRange::Upscale, 3, 4_000),
        restaurant("r4", "Taco Garden", Cuisine::Mexican, PriceRange::Budget, 4, 2_000),
        restaurant("r5", "Le Potager", Cuisine::French, PriceRange::Luxury, 5, 5_000),
        restaurant("r6", "Dosa Corner", Cuisine::Indian, PriceRange::Moderate, 4, 3_000),
    ]
}

/// Scripted stand-in for the remote API.
///
/// Each base URL present in `servers` is "up" and serves its own list;
/// absent URLs answer 503.
#[derive(Default)]
pub struct FakeApi {
    servers: Mutex<HashMap<String, Vec<Restaurant>>>,
    reject_posts: bool,
    fetches: Mutex<Vec<String>>,
    posts: Mutex<Vec<Restaurant>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server(self, base_url: &str, restaurants: Vec<Restaurant>) -> Self {
        self.servers
            .lock()
            .unwrap()
            .insert(base_url.to_string(), restaurants);
        self
    }

    pub fn rejecting_posts(mut self) -> Self {
        self.reject_posts = true;
        self
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<Restaurant> {
        self.posts.lock().unwrap().clone()
    }
}

impl RestaurantApi for FakeApi {
    async fn fetch_restaurants(&self, base_url: &str) -> ApiResult<Vec<Restaurant>> {
        let url = restaurants_url(base_url);
        self.fetches.lock().unwrap().push(url.clone());
        self.servers
            .lock()
            .unwrap()
            .get(base_url)
            .cloned()
            .ok_or(ApiError::Status { url, status: 503 })
    }

    async fn create_restaurant(&self, base_url: &str, restaurant: &Restaurant) -> ApiResult<()> {
        let url = restaurants_url(base_url);
        if self.reject_posts {
            return Err(ApiError::Status { url, status: 500 });
        }
        let mut servers = self.servers.lock().unwrap();
        let Some(collection) = servers.get_mut(base_url) else {
            return Err(ApiError::Status { url, status: 503 });
        };
        collection.push(restaurant.clone());
        self.posts.lock().unwrap().push(restaurant.clone());
        Ok(())
    }
}
