use autoscan_core::{Filter, Locator};

use super::query::QueryBuilder;

const SEARCH_URL: &str = "https://www.ebay.de/sch/i.html";
/// "Autos" category.
const CARS_CATEGORY: &str = "9801";
/// "Gebraucht" item condition.
const USED_CONDITION: &str = "3000";

pub(super) fn build_locator(filter: &Filter) -> Locator {
    let keywords = [filter.brand(), filter.model(), filter.fuel()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let query = if keywords.is_empty() {
        QueryBuilder::new(SEARCH_URL)
    } else {
        QueryBuilder::new(SEARCH_URL).param("_nkw", &keywords)
    };

    query
        .raw("_sacat", CARS_CATEGORY)
        .opt("_udlo", filter.price_from())
        .opt("_udhi", filter.price_to())
        .raw("LH_ItemCondition", USED_CONDITION)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_join_present_fields() {
        let filter = Filter {
            brand: Some("BMW".to_string()),
            fuel: Some("Benzin".to_string()),
            price_to: Some("9000".to_string()),
            ..Filter::default()
        };
        assert_eq!(
            build_locator(&filter).as_str(),
            "https://www.ebay.de/sch/i.html?_nkw=BMW%20Benzin&_sacat=9801&_udhi=9000&LH_ItemCondition=3000"
        );
    }

    #[test]
    fn empty_filter_has_no_keyword_param() {
        assert_eq!(
            build_locator(&Filter::default()).as_str(),
            "https://www.ebay.de/sch/i.html?_sacat=9801&LH_ItemCondition=3000"
        );
    }
}
