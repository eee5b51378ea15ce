use autoscan_core::{Filter, Locator};

use super::query::{encode, QueryBuilder};

const LIST_URL: &str = "https://www.autoscout24.de/lst";

pub(super) fn build_locator(filter: &Filter) -> Locator {
    // The model slug is only meaningful beneath a make.
    let mut path = LIST_URL.to_string();
    if let Some(brand) = filter.brand() {
        path.push('/');
        path.push_str(&encode(&brand.to_lowercase()));
        if let Some(model) = filter.model() {
            path.push('/');
            path.push_str(&encode(&model.to_lowercase()));
        }
    }

    let mut query = QueryBuilder::new(path)
        .opt("pricefrom", filter.price_from())
        .opt("priceto", filter.price_to())
        .opt("kmto", filter.mileage_to())
        .opt("fregfrom", filter.year_from())
        .opt("fregto", filter.year_to())
        .opt("powerfrom", filter.power_from())
        .opt("powerto", filter.power_to())
        .opt("fuel", filter.fuel().map(str::to_uppercase).as_deref())
        .flag(filter.is_manual_transmission(), "gear", "M")
        .flag(filter.is_automatic_transmission(), "gear", "A");

    if let Some(zip) = filter.postal_code() {
        query = query
            .param("zip", zip)
            .param("zipr", filter.radius_or_default());
    }

    query.flag(filter.is_private_seller(), "offer", "U").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_omits_path_segments_and_query() {
        assert_eq!(build_locator(&Filter::default()).as_str(), LIST_URL);
    }

    #[test]
    fn lowercases_make_and_model_slugs() {
        let filter = Filter {
            brand: Some("Volkswagen".to_string()),
            model: Some("Golf".to_string()),
            price_from: Some("3500".to_string()),
            price_to: Some("6500".to_string()),
            ..Filter::default()
        };
        assert_eq!(
            build_locator(&filter).as_str(),
            "https://www.autoscout24.de/lst/volkswagen/golf?pricefrom=3500&priceto=6500"
        );
    }

    #[test]
    fn model_without_make_is_dropped_from_path() {
        let filter = Filter {
            model: Some("Golf".to_string()),
            ..Filter::default()
        };
        assert_eq!(build_locator(&filter).as_str(), LIST_URL);
    }

    #[test]
    fn zip_uses_requested_radius() {
        let filter = Filter {
            postal_code: Some("80331".to_string()),
            radius: Some("50".to_string()),
            transmission: Some("Automatik".to_string()),
            ..Filter::default()
        };
        assert_eq!(
            build_locator(&filter).as_str(),
            "https://www.autoscout24.de/lst?gear=A&zip=80331&zipr=50"
        );
    }
}
