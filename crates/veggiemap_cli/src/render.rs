//! Plain-text list and map rendering.

use std::fmt::Write;
use veggiemap_core::{AppState, Restaurant};

/// Renders the error banner, then the views selected by the view mode.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    let visible = state.visible_restaurants();

    if let Some(message) = state.error() {
        let _ = writeln!(out, "!! {message}");
        out.push('\n');
    }

    let query = state.query();
    let _ = writeln!(
        out,
        "{} of {} restaurants (search=\"{}\" cuisine={} price={} sort={})",
        visible.len(),
        state.restaurants().len(),
        query.search_term,
        query.cuisine,
        query.price,
        query.sort
    );

    let mode = state.view_mode();
    if mode.shows_list() {
        out.push('\n');
        for restaurant in &visible {
            render_card(&mut out, restaurant, is_selected(state, restaurant));
        }
    }
    if mode.shows_map() {
        out.push_str("\nmap:\n");
        for restaurant in &visible {
            render_marker(&mut out, restaurant, is_selected(state, restaurant));
        }
    }

    out
}

fn is_selected(state: &AppState, restaurant: &Restaurant) -> bool {
    state.selected_id() == Some(restaurant.id.as_str())
}

fn render_card(out: &mut String, restaurant: &Restaurant, selected: bool) {
    let marker = if selected { ">" } else { " " };
    let stars = "*".repeat(usize::from(restaurant.rating.value()));
    let _ = writeln!(
        out,
        "{marker} {} [{}] {} {stars}",
        restaurant.name, restaurant.cuisine, restaurant.price_range
    );
    if !restaurant.description.is_empty() {
        let _ = writeln!(out, "    {}", restaurant.description);
    }
    let _ = writeln!(
        out,
        "    {} | recommended by {} | id {}",
        restaurant.location.address, restaurant.recommended_by, restaurant.id
    );
}

fn render_marker(out: &mut String, restaurant: &Restaurant, selected: bool) {
    let pin = if selected { "(@)" } else { "(o)" };
    let _ = writeln!(
        out,
        "  {pin} {:>9.4}, {:>9.4}  {}",
        restaurant.location.latitude, restaurant.location.longitude, restaurant.name
    );
}
