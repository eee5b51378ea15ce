use autoscan_core::{Filter, Locator};

use super::query::QueryBuilder;

const SEARCH_URL: &str = "https://www.uncle-auto.de/gebrauchtwagen";

pub(super) fn build_locator(filter: &Filter) -> Locator {
    QueryBuilder::new(SEARCH_URL)
        .opt("make", filter.brand())
        .opt("model", filter.model())
        .opt("minPrice", filter.price_from())
        .opt("maxPrice", filter.price_to())
        .opt("maxMileage", filter.mileage_to())
        .opt("minYear", filter.year_from())
        .opt("maxYear", filter.year_to())
        .opt("fuelType", filter.fuel())
        .build()
}
