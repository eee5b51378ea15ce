use autoscan_core::{Filter, Locator};

use super::query::encode;

const SEARCH_URL: &str = "https://www.kleinanzeigen.de/s-autos/";
const CARS_CATEGORY: &str = "c216";

/// Kleinanzeigen encodes the whole search in the path:
/// `s-autos/l{zip}r{radius}/c216+autos.marke_s:{make}+autos.model_s:{model}+preis:{min}:{max}`.
pub(super) fn build_locator(filter: &Filter) -> Locator {
    let mut url = SEARCH_URL.to_string();

    if let Some(zip) = filter.postal_code() {
        url.push_str(&format!(
            "l{}r{}/",
            encode(zip),
            encode(filter.radius_or_default())
        ));
    }

    url.push_str(CARS_CATEGORY);
    if let Some(brand) = filter.brand() {
        url.push_str(&format!("+autos.marke_s:{}", encode(brand)));
    }
    if let Some(model) = filter.model() {
        url.push_str(&format!("+autos.model_s:{}", encode(model)));
    }

    let (min, max) = (filter.price_from(), filter.price_to());
    if min.is_some() || max.is_some() {
        url.push_str(&format!(
            "+preis:{}:{}",
            encode(min.unwrap_or("")),
            encode(max.unwrap_or(""))
        ));
    }

    Locator::new(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_category_only() {
        assert_eq!(
            build_locator(&Filter::default()).as_str(),
            "https://www.kleinanzeigen.de/s-autos/c216"
        );
    }

    #[test]
    fn full_filter_builds_path_clauses() {
        let filter = Filter {
            brand: Some("Volkswagen".to_string()),
            model: Some("Golf".to_string()),
            price_from: Some("3500".to_string()),
            price_to: Some("6500".to_string()),
            postal_code: Some("10115".to_string()),
            radius: Some("25".to_string()),
            ..Filter::default()
        };
        assert_eq!(
            build_locator(&filter).as_str(),
            "https://www.kleinanzeigen.de/s-autos/l10115r25/c216+autos.marke_s:Volkswagen+autos.model_s:Golf+preis:3500:6500"
        );
    }

    #[test]
    fn upper_price_bound_alone_keeps_price_clause() {
        let filter = Filter {
            price_to: Some("4000".to_string()),
            ..Filter::default()
        };
        assert!(build_locator(&filter).as_str().ends_with("c216+preis::4000"));
    }
}
