use autoscan_core::{Filter, Locator};

use super::query::{encode, QueryBuilder};

const SEARCH_URL: &str = "https://www.mobile.de/auto/search.html?cn=DE&isSearchRequest=true";

pub(super) fn build_locator(filter: &Filter) -> Locator {
    // `ms` is "make;model;;;" and needs its separators unescaped.
    let make_model = filter
        .brand()
        .map(|brand| format!("{};{};;;", encode(brand), encode(filter.model().unwrap_or(""))));

    let mut query = QueryBuilder::new(SEARCH_URL);
    if let Some(ms) = make_model.as_deref() {
        query = query.raw("ms", ms);
    }

    let mut query = query
        .opt("minPrice", filter.price_from())
        .opt("maxPrice", filter.price_to())
        .opt("maxMileage", filter.mileage_to())
        .opt(
            "minFirstRegistrationDate",
            filter.year_from().map(|y| format!("{y}-01")).as_deref(),
        )
        .opt(
            "maxFirstRegistrationDate",
            filter.year_to().map(|y| format!("{y}-12")).as_deref(),
        );

    if let Some(kw) = filter.power_from() {
        query = query.raw("minPowerAsArray", "KW").param("minPower", kw);
    }
    if let Some(kw) = filter.power_to() {
        query = query.raw("maxPowerAsArray", "KW").param("maxPower", kw);
    }

    let mut query = query
        .opt("ft", filter.fuel().map(str::to_uppercase).as_deref())
        .flag(filter.is_manual_transmission(), "tr", "MANUAL_GEAR")
        .flag(filter.is_automatic_transmission(), "tr", "AUTOMATIC_GEAR");

    if let Some(zip) = filter.postal_code() {
        query = query
            .param("zipcode", zip)
            .param("radius", filter.radius_or_default());
    }

    query
        .flag(filter.is_private_seller(), "scopeId", "C")
        .flag(filter.wants_green_badge(), "eb", "GREEN_BADGE")
        .build()
}
