//! Prompt and corpus assembly for the structuring backend.

use autoscan_core::{truncate_chars, AcquisitionResult, Filter};

const ANY: &str = "beliebig";
const UNBOUNDED: &str = "unbegrenzt";

/// Placeholder the user replaces with pasted listings in [`manual_prompt`].
pub const PASTE_MARKER: &str = "[HIER DIE INSERATE EINFÜGEN]";

const RECORD_SHAPE: &str = r#"[
  {
    "id": "Inseratsnummer oder eindeutige Kennung",
    "titel": "vollständiger Fahrzeugtitel",
    "preis": "5.900 €",
    "km": "125.000 km",
    "jahr": "2015",
    "leistung": "81 kW (110 PS)",
    "kraftstoff": "Diesel",
    "getriebe": "Schaltgetriebe",
    "ort": "12345 Musterstadt",
    "anbieter": "Privat",
    "tuev": "06/2025",
    "umweltplakette": "Grün",
    "plattform": "Mobile.de",
    "link": "https://...",
    "highlights": "kurze Stichpunkte zu Besonderheiten"
  }
]"#;

/// Concatenates usable acquisition content, each block headed by its
/// platform's display name, then cuts the result to `max_chars` characters.
///
/// Failed and blank results are left out entirely.
#[must_use]
pub fn build_corpus(results: &[AcquisitionResult], max_chars: usize) -> String {
    let joined = results
        .iter()
        .filter(|r| r.has_usable_content())
        .map(|r| format!("=== {} ===\n{}", r.platform_name, r.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    truncate_chars(&joined, max_chars)
}

/// Filter rendered as the constraint block the backend matches listings against.
#[must_use]
pub fn criteria(filter: &Filter) -> String {
    let mut out = String::from("SUCHKRITERIEN:\n");
    let line = |out: &mut String, label: &str, value: &str| {
        out.push_str(&format!("- {label}: {value}\n"));
    };

    line(&mut out, "Marke", filter.brand().unwrap_or(ANY));
    line(&mut out, "Modell", filter.model().unwrap_or(ANY));
    line(&mut out, "Fahrzeugtyp", filter.vehicle_type().unwrap_or(ANY));
    line(
        &mut out,
        "Preis",
        &format!(
            "{} € - {} €",
            filter.price_from().unwrap_or("0"),
            filter.price_to().unwrap_or(UNBOUNDED)
        ),
    );
    line(
        &mut out,
        "Kilometerstand",
        &format!(
            "{} - {} km",
            filter.mileage_from().unwrap_or("0"),
            filter.mileage_to().unwrap_or(UNBOUNDED)
        ),
    );
    line(
        &mut out,
        "Erstzulassung",
        &format!(
            "{} - {}",
            filter.year_from().unwrap_or(ANY),
            filter.year_to().unwrap_or(ANY)
        ),
    );
    line(
        &mut out,
        "Leistung",
        &format!(
            "{} - {} kW",
            filter.power_from().unwrap_or("0"),
            filter.power_to().unwrap_or(UNBOUNDED)
        ),
    );
    line(&mut out, "Kraftstoff", filter.fuel().unwrap_or(ANY));
    line(&mut out, "Getriebe", filter.transmission().unwrap_or(ANY));
    line(&mut out, "Anbieter", filter.seller().unwrap_or(ANY));
    if let Some(zip) = filter.postal_code() {
        line(
            &mut out,
            "Standort",
            &format!("PLZ {zip}, Umkreis {} km", filter.radius_or_default()),
        );
    }
    match filter.inspection_months() {
        Some(months) => line(&mut out, "TÜV", &format!("mindestens {months} Monate")),
        None => line(&mut out, "TÜV", ANY),
    }
    line(&mut out, "Umweltplakette", filter.emission_class().unwrap_or(ANY));
    out
}

/// Full prompt for one extraction call over an already truncated corpus.
#[must_use]
pub fn extraction_prompt(filter: &Filter, corpus: &str) -> String {
    format!(
        "Du analysierst Gebrauchtwagen-Inserate. Extrahiere aus den folgenden Inseratsdaten \
         alle Fahrzeuge, die zu den Suchkriterien passen.\n\n\
         {criteria}\n\
         INSERATSDATEN:\n{corpus}\n\n\
         Antworte ausschließlich mit einem gültigen JSON-Array ohne weiteren Text:\n\n\
         {RECORD_SHAPE}\n\n\
         Unbekannte Felder lässt du weg. Wenn kein Fahrzeug passt, antworte mit [].",
        criteria = criteria(filter),
    )
}

/// Copy-paste prompt for use with an external assistant. The listings go
/// where [`PASTE_MARKER`] stands.
#[must_use]
pub fn manual_prompt(filter: &Filter) -> String {
    extraction_prompt(filter, PASTE_MARKER)
}
