//! # Integration Tests
//!
//! Whole-page extraction over realistic listing markup, without the network.

use encar_bot::extractor::parse_listing_html;

const ORIGIN: &str = "https://m.encar.com";
const URL: &str = "https://fem.encar.com/cars/detail/38000000";

#[test]
fn test_structured_data_listing() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"name":"Kia K5","image":"/img/1.jpg","offers":{"price":"12000000"}}</script>
        </head><body><p>K5</p></body></html>"#;

    let record = parse_listing_html(URL, html, ORIGIN);

    assert_eq!(record.title.as_deref(), Some("Kia K5"));
    assert_eq!(record.images, vec!["https://m.encar.com/img/1.jpg".to_string()]);
    assert_eq!(record.price.as_deref(), Some("12000000"));
}

#[test]
fn test_text_only_listing() {
    let html = r#"<html><body>
        <div class="car">
          <h2>현대 그랜저 IG</h2>
          <span class="price">15,230,000원</span>
          <dl><dt>주행거리:</dt><dd>45,000 km</dd></dl>
          <dl><dt>연식</dt><dd>2019년 3월</dd></dl>
        </div>
        <img data-src="/carpicture/1.jpg" src="/blank.gif">
        <img src="//ci.encar.com/carpicture/2.jpg">
        <img data-src="/carpicture/1.jpg">
        </body></html>"#;

    let record = parse_listing_html(URL, html, ORIGIN);

    assert_eq!(record.url, URL);
    assert_eq!(record.title, None);
    assert_eq!(record.price.as_deref(), Some("15230000"));
    assert_eq!(record.mileage_km.as_deref(), Some("45000"));
    assert_eq!(record.year.as_deref(), Some("2019"));
    assert_eq!(
        record.images,
        vec![
            "https://m.encar.com/carpicture/1.jpg".to_string(),
            "https://ci.encar.com/carpicture/2.jpg".to_string(),
        ]
    );
}

#[test]
fn test_structured_price_wins_over_text_price() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"offers":{"price":12000000}}</script>
        </head><body>9,990,000원</body></html>"#;

    let record = parse_listing_html(URL, html, ORIGIN);
    assert_eq!(record.price.as_deref(), Some("12000000"));
}

#[test]
fn test_missing_structured_price_uses_text() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"name":"K5","image":"/a.jpg"}</script>
        </head><body>가격 9,990,000 원</body></html>"#;

    let record = parse_listing_html(URL, html, ORIGIN);
    assert_eq!(record.price.as_deref(), Some("9990000"));
}

#[test]
fn test_script_text_does_not_leak_into_fields() {
    let html = r#"<html><head>
        <script>window.__DATA__ = {"year": 2001, "price": "1,000원"};</script>
        </head><body><p>연식 2020</p></body></html>"#;

    let record = parse_listing_html(URL, html, ORIGIN);
    assert_eq!(record.year.as_deref(), Some("2020"));
    assert_eq!(record.price, None);
}

#[test]
fn test_empty_document() {
    let record = parse_listing_html(URL, "", ORIGIN);

    assert_eq!(record.url, URL);
    assert_eq!(record.populated_fields(), 0);
}
