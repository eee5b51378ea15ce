//! Telegram `MarkdownV2` message formatting.
//!
//! `MarkdownV2` rejects a message outright if any reserved character outside an
//! entity is left unescaped, so every piece of text, ours included, goes
//! through [`escape_markdown`].

use autoscan_core::{Filter, VehicleRecord};
use chrono::{DateTime, Utc};

const RESERVED: [char; 19] = [
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
    '!',
];

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━";
const MISSING: &str = "N/A";

/// Escapes every `MarkdownV2` reserved character.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escapes the URL part of an inline link, where only `)` and `\` are special.
#[must_use]
pub fn escape_link_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c == ')' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn field(value: Option<&str>) -> String {
    escape_markdown(value.unwrap_or(MISSING))
}

fn link(label: &str, url: &str) -> String {
    format!("[{}]({})", escape_markdown(label), escape_link_url(url))
}

/// Summary alert for a batch of new records.
///
/// Lists the first `top_n` records and a remainder count for the rest.
#[must_use]
pub fn summary_message(
    records: &[VehicleRecord],
    filter: &Filter,
    at: DateTime<Utc>,
    top_n: usize,
) -> String {
    let count = records.len();
    let mut msg = String::new();

    msg.push_str(&format!("🚗 *{}*\n\n", escape_markdown("NEUE FAHRZEUGE GEFUNDEN!")));
    let noun = if count == 1 {
        "neues Inserat"
    } else {
        "neue Inserate"
    };
    msg.push_str(&format!("📊 *{count}* {noun}\n"));

    let keywords = filter.keywords();
    let search = if keywords.is_empty() {
        "alle Fahrzeuge"
    } else {
        keywords.as_str()
    };
    msg.push_str(&format!("🔍 Suche: {}\n", escape_markdown(search)));
    msg.push_str(&format!(
        "💰 Preis: {}\n",
        escape_markdown(&format!(
            "{} € - {} €",
            filter.price_from().unwrap_or("0"),
            filter.price_to().unwrap_or("∞")
        ))
    ));
    msg.push_str(&format!(
        "📅 {}\n\n",
        escape_markdown(&at.format("%d.%m.%Y %H:%M UTC").to_string())
    ));
    msg.push_str(DIVIDER);
    msg.push_str("\n\n");

    for record in records.iter().take(top_n) {
        msg.push_str(&format!("🔹 *{}*\n", escape_markdown(record.display_title())));
        msg.push_str(&format!("   💶 {}\n", field(record.price.as_deref())));
        msg.push_str(&format!("   📍 {}\n", field(record.location.as_deref())));
        msg.push_str(&format!("   🛣️ {}\n", field(record.mileage.as_deref())));
        msg.push_str(&format!("   📅 EZ: {}\n", field(record.first_registration.as_deref())));
        msg.push_str(&format!("   🏷️ {}\n", field(record.platform.as_deref())));
        if let Some(url) = record.link.as_deref() {
            msg.push_str(&format!("   🔗 {}\n", link("Zum Inserat", url)));
        }
        msg.push('\n');
    }

    if count > top_n {
        msg.push_str(&escape_markdown(&format!(
            "... und {} weitere",
            count - top_n
        )));
        msg.push('\n');
    }

    msg
}

/// Single-listing message with every known field.
#[must_use]
pub fn detail_message(record: &VehicleRecord) -> String {
    let mut msg = String::new();

    msg.push_str("🚘 *INTERESSANTES FAHRZEUG*\n\n");
    msg.push_str(&format!("*{}*\n\n", escape_markdown(record.display_title())));
    msg.push_str(&format!("💶 Preis: *{}*\n", field(record.price.as_deref())));
    msg.push_str(&format!("🛣️ Kilometer: {}\n", field(record.mileage.as_deref())));
    msg.push_str(&format!(
        "📅 Erstzulassung: {}\n",
        field(record.first_registration.as_deref())
    ));
    msg.push_str(&format!("⚙️ Leistung: {}\n", field(record.power.as_deref())));
    msg.push_str(&format!("⛽ Kraftstoff: {}\n", field(record.fuel.as_deref())));
    msg.push_str(&format!("🔧 Getriebe: {}\n", field(record.transmission.as_deref())));
    msg.push_str(&format!("📍 Standort: {}\n", field(record.location.as_deref())));
    msg.push_str(&format!("👤 Anbieter: {}\n", field(record.seller.as_deref())));
    msg.push_str(&format!("🔰 TÜV: {}\n", field(record.inspection.as_deref())));
    if let Some(badge) = record.emission_class.as_deref() {
        msg.push_str(&format!("🌿 Umweltplakette: {}\n", escape_markdown(badge)));
    }
    msg.push_str(&format!("🏷️ Plattform: {}\n", field(record.platform.as_deref())));

    if let Some(highlights) = record.highlights.as_deref() {
        msg.push_str(&format!("\n✨ {}\n", escape_markdown(highlights)));
    }
    if let Some(url) = record.link.as_deref() {
        msg.push_str(&format!("\n🔗 {}", link("Inserat öffnen", url)));
    }

    msg
}

#[must_use]
pub fn test_message() -> String {
    escape_markdown("✅ autoscan Telegram-Bot funktioniert!")
}
