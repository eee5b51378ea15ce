use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::lenient;

/// UI sentinel for "any value" in select fields.
const ANY: &str = "alle";

/// Search radius applied when a postal code is given without one.
pub const DEFAULT_RADIUS_KM: &str = "100";

/// Search criteria shared by every marketplace.
///
/// All fields are optional and absence means "unconstrained". Wire names
/// follow the JSON the search form submits. Raw values are kept as-is; the
/// accessor methods apply normalization (trim, blank → `None`, `Alle` →
/// `None`), so locator builders and prompts never see placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(
        rename = "marke",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub brand: Option<String>,
    #[serde(
        rename = "modell",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub model: Option<String>,
    #[serde(
        rename = "fahrzeugtyp",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub vehicle_type: Option<String>,
    #[serde(
        rename = "preisVon",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub price_from: Option<String>,
    #[serde(
        rename = "preisBis",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub price_to: Option<String>,
    #[serde(
        rename = "kmVon",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub mileage_from: Option<String>,
    #[serde(
        rename = "kmBis",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub mileage_to: Option<String>,
    #[serde(
        rename = "jahrVon",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub year_from: Option<String>,
    #[serde(
        rename = "jahrBis",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub year_to: Option<String>,
    /// Lower power bound in kW.
    #[serde(
        rename = "leistungVon",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub power_from: Option<String>,
    /// Upper power bound in kW.
    #[serde(
        rename = "leistungBis",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub power_to: Option<String>,
    #[serde(
        rename = "kraftstoff",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub fuel: Option<String>,
    /// `Schaltgetriebe` or `Automatik`.
    #[serde(
        rename = "getriebe",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub transmission: Option<String>,
    /// `Privat` or `Händler`.
    #[serde(
        rename = "anbieter",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub seller: Option<String>,
    #[serde(
        rename = "plz",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub postal_code: Option<String>,
    /// Search radius around `postal_code` in km.
    #[serde(
        rename = "radius",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub radius: Option<String>,
    /// Minimum remaining inspection (TÜV) validity in months.
    #[serde(
        rename = "tuev",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub inspection_months: Option<String>,
    /// Emission sticker class, e.g. `Grün`.
    #[serde(
        rename = "umweltplakette",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub emission_class: Option<String>,
}

fn normalized(value: Option<&String>) -> Option<&str> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ANY))
}

impl Filter {
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        normalized(self.brand.as_ref())
    }

    #[must_use]
    pub fn model(&self) -> Option<&str> {
        normalized(self.model.as_ref())
    }

    #[must_use]
    pub fn vehicle_type(&self) -> Option<&str> {
        normalized(self.vehicle_type.as_ref())
    }

    #[must_use]
    pub fn price_from(&self) -> Option<&str> {
        normalized(self.price_from.as_ref())
    }

    #[must_use]
    pub fn price_to(&self) -> Option<&str> {
        normalized(self.price_to.as_ref())
    }

    #[must_use]
    pub fn mileage_from(&self) -> Option<&str> {
        normalized(self.mileage_from.as_ref())
    }

    #[must_use]
    pub fn mileage_to(&self) -> Option<&str> {
        normalized(self.mileage_to.as_ref())
    }

    #[must_use]
    pub fn year_from(&self) -> Option<&str> {
        normalized(self.year_from.as_ref())
    }

    #[must_use]
    pub fn year_to(&self) -> Option<&str> {
        normalized(self.year_to.as_ref())
    }

    #[must_use]
    pub fn power_from(&self) -> Option<&str> {
        normalized(self.power_from.as_ref())
    }

    #[must_use]
    pub fn power_to(&self) -> Option<&str> {
        normalized(self.power_to.as_ref())
    }

    #[must_use]
    pub fn fuel(&self) -> Option<&str> {
        normalized(self.fuel.as_ref())
    }

    #[must_use]
    pub fn transmission(&self) -> Option<&str> {
        normalized(self.transmission.as_ref())
    }

    #[must_use]
    pub fn seller(&self) -> Option<&str> {
        normalized(self.seller.as_ref())
    }

    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        normalized(self.postal_code.as_ref())
    }

    /// Radius in km; only meaningful together with a postal code.
    #[must_use]
    pub fn radius(&self) -> Option<&str> {
        normalized(self.radius.as_ref())
    }

    /// Radius to send alongside a postal code, falling back to
    /// [`DEFAULT_RADIUS_KM`].
    #[must_use]
    pub fn radius_or_default(&self) -> &str {
        self.radius().unwrap_or(DEFAULT_RADIUS_KM)
    }

    /// Minimum inspection validity in months. `0` means "don't care".
    #[must_use]
    pub fn inspection_months(&self) -> Option<&str> {
        normalized(self.inspection_months.as_ref())
            .filter(|v| !v.trim_start_matches('0').is_empty())
    }

    #[must_use]
    pub fn emission_class(&self) -> Option<&str> {
        normalized(self.emission_class.as_ref())
    }

    #[must_use]
    pub fn is_manual_transmission(&self) -> bool {
        self.transmission()
            .is_some_and(|t| t.eq_ignore_ascii_case("Schaltgetriebe"))
    }

    #[must_use]
    pub fn is_automatic_transmission(&self) -> bool {
        self.transmission()
            .is_some_and(|t| t.eq_ignore_ascii_case("Automatik"))
    }

    #[must_use]
    pub fn is_private_seller(&self) -> bool {
        self.seller().is_some_and(|s| s.eq_ignore_ascii_case("Privat"))
    }

    #[must_use]
    pub fn wants_green_badge(&self) -> bool {
        self.emission_class()
            .is_some_and(|e| e.to_lowercase() == "grün" || e.eq_ignore_ascii_case("gruen"))
    }

    /// Brand and model joined by a space, skipping whichever is absent.
    #[must_use]
    pub fn keywords(&self) -> String {
        [self.brand(), self.model()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Checks the caller-supplied values before any work is scheduled.
    ///
    /// Numeric fields must be unsigned whole numbers, the postal code must be
    /// digits only, and every `from` bound must not exceed its `to` bound.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] found, in field order.
    pub fn validate(&self) -> Result<(), FilterError> {
        let ranges = [
            ("preisVon", self.price_from(), "preisBis", self.price_to()),
            ("kmVon", self.mileage_from(), "kmBis", self.mileage_to()),
            ("jahrVon", self.year_from(), "jahrBis", self.year_to()),
            ("leistungVon", self.power_from(), "leistungBis", self.power_to()),
        ];

        for (from_field, from, to_field, to) in ranges {
            let from = parse_number(from_field, from)?;
            let to = parse_number(to_field, to)?;
            if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    return Err(FilterError::InvertedRange {
                        from_field,
                        to_field,
                        from,
                        to,
                    });
                }
            }
        }

        parse_number("radius", self.radius())?;
        parse_number("tuev", self.inspection_months())?;

        if let Some(plz) = self.postal_code() {
            if !plz.chars().all(|c| c.is_ascii_digit()) {
                return Err(FilterError::InvalidPostalCode {
                    field: "plz",
                    value: plz.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<Option<u32>, FilterError> {
    value
        .map(|v| {
            v.parse::<u32>().map_err(|_| FilterError::NotANumber {
                field,
                value: v.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golf() -> Filter {
        Filter {
            brand: Some("Volkswagen".to_string()),
            model: Some("Golf".to_string()),
            price_from: Some("3500".to_string()),
            price_to: Some("6500".to_string()),
            ..Filter::default()
        }
    }

    #[test]
    fn deserializes_wire_names() {
        let filter: Filter = serde_json::from_str(
            r#"{"marke":"Volkswagen","modell":"Golf","preisVon":"3500","preisBis":6500}"#,
        )
        .expect("filter json");
        assert_eq!(filter, golf());
    }

    #[test]
    fn blank_and_sentinel_values_are_unconstrained() {
        let filter: Filter = serde_json::from_str(
            r#"{"marke":"  ","getriebe":"Alle","anbieter":"alle","tuev":"0","kraftstoff":null}"#,
        )
        .expect("filter json");
        assert_eq!(filter.brand(), None);
        assert_eq!(filter.transmission(), None);
        assert_eq!(filter.seller(), None);
        assert_eq!(filter.inspection_months(), None);
        assert_eq!(filter.fuel(), None);
    }

    #[test]
    fn keywords_skip_missing_parts() {
        assert_eq!(golf().keywords(), "Volkswagen Golf");
        let only_model = Filter {
            model: Some("Golf".to_string()),
            ..Filter::default()
        };
        assert_eq!(only_model.keywords(), "Golf");
        assert_eq!(Filter::default().keywords(), "");
    }

    #[test]
    fn radius_defaults_to_100() {
        let mut filter = Filter {
            postal_code: Some("10115".to_string()),
            ..Filter::default()
        };
        assert_eq!(filter.radius_or_default(), "100");
        filter.radius = Some("50".to_string());
        assert_eq!(filter.radius_or_default(), "50");
    }

    #[test]
    fn validate_accepts_empty_filter() {
        assert_eq!(Filter::default().validate(), Ok(()));
        assert_eq!(golf().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_non_numeric_price() {
        let filter = Filter {
            price_to: Some("viel".to_string()),
            ..Filter::default()
        };
        assert_eq!(
            filter.validate(),
            Err(FilterError::NotANumber {
                field: "preisBis",
                value: "viel".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_inverted_year_range() {
        let filter = Filter {
            year_from: Some("2020".to_string()),
            year_to: Some("2010".to_string()),
            ..Filter::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(FilterError::InvertedRange {
                from_field: "jahrVon",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_letters_in_postal_code() {
        let filter = Filter {
            postal_code: Some("1O115".to_string()),
            ..Filter::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(FilterError::InvalidPostalCode { .. })
        ));
    }

    #[test]
    fn transmission_and_seller_flags() {
        let filter = Filter {
            transmission: Some("Automatik".to_string()),
            seller: Some("Privat".to_string()),
            emission_class: Some("Grün".to_string()),
            ..Filter::default()
        };
        assert!(filter.is_automatic_transmission());
        assert!(!filter.is_manual_transmission());
        assert!(filter.is_private_seller());
        assert!(filter.wants_green_badge());
    }
}
