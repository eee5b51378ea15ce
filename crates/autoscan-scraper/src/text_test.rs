use super::*;

const LIMITS: ContentLimits = ContentLimits {
    max_items: 20,
    max_chars: 50_000,
};

#[test]
fn prefers_listing_elements_over_body() {
    let html = r#"<html><body>
        <nav>Home | Suche</nav>
        <article><h2>VW Golf 1.6 TDI</h2><p>5.900 € · 148.000 km</p></article>
        <article><h2>VW Golf 2.0</h2><p>6.200 €</p></article>
        <footer>Impressum</footer>
    </body></html>"#;

    let text = page_text(html, LIMITS);
    assert_eq!(
        text,
        "VW Golf 1.6 TDI\n5.900 € · 148.000 km\n\n---\n\nVW Golf 2.0\n6.200 €"
    );
}

#[test]
fn falls_back_to_body_text_without_listings() {
    let html = "<html><body><div>Keine Treffer</div><p>Bitte Suche anpassen</p></body></html>";
    assert_eq!(page_text(html, LIMITS), "Keine Treffer\nBitte Suche anpassen");
}

#[test]
fn ignores_script_style_and_noscript() {
    let html = r"<html><head><style>.x{}</style></head><body>
        <script>var tracking = 1;</script>
        <noscript>Bitte JavaScript aktivieren</noscript>
        <p>Sichtbar</p>
    </body></html>";
    assert_eq!(page_text(html, LIMITS), "Sichtbar");
}

#[test]
fn excludes_first_matching_consent_container() {
    let html = r#"<html><body>
        <div id="onetrust-consent-sdk"><p>Wir verwenden Cookies</p>
            <button id="onetrust-accept-btn-handler">Alle akzeptieren</button></div>
        <div class="result-item">Opel Astra 1.4</div>
    </body></html>"#;
    assert_eq!(page_text(html, LIMITS), "Opel Astra 1.4");
}

#[test]
fn missing_consent_banner_is_tolerated() {
    let html = "<html><body><p>Nur Text</p></body></html>";
    assert_eq!(page_text(html, LIMITS), "Nur Text");
}

#[test]
fn caps_listing_count() {
    let items: String = (1..=30)
        .map(|i| format!("<div class=\"listing-item\">Auto {i}</div>"))
        .collect();
    let html = format!("<html><body>{items}</body></html>");
    let text = page_text(
        &html,
        ContentLimits {
            max_items: 20,
            max_chars: 50_000,
        },
    );
    assert_eq!(text.split(ITEM_SEPARATOR).count(), 20);
    assert!(text.ends_with("Auto 20"));
}

#[test]
fn nested_listing_elements_are_not_duplicated() {
    let html = r#"<html><body>
        <article><div class="vehicle-card">Skoda Octavia</div></article>
    </body></html>"#;
    assert_eq!(page_text(html, LIMITS), "Skoda Octavia");
}

#[test]
fn caps_body_text_length_on_char_boundary() {
    let html = "<html><body><p>äöüäöüäöü</p></body></html>";
    let text = page_text(
        html,
        ContentLimits {
            max_items: 20,
            max_chars: 4,
        },
    );
    assert_eq!(text, "äöüä");
}

#[test]
fn inline_fragments_are_space_joined() {
    let html = "<html><body><p><b>5.900</b><span>€</span> VB</p></body></html>";
    assert_eq!(page_text(html, LIMITS), "5.900 € VB");
}
