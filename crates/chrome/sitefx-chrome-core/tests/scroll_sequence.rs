use sitefx_chrome::{nav_style, parallax, ChromeConfig, NavStyle, VerticalSpan};

/// A light section sitting 1500px down the document, 900px tall.
fn light_span(scroll_y: f64) -> VerticalSpan {
    VerticalSpan {
        top: 1500.0 - scroll_y,
        bottom: 2400.0 - scroll_y,
    }
}

#[test]
fn nav_walks_through_all_three_styles() {
    let cfg = ChromeConfig::default();
    let viewport = 800.0;
    let styles: Vec<_> = [0.0, 150.0, 900.0, 1450.0, 2000.0, 2350.0, 50.0]
        .into_iter()
        .map(|y| nav_style(&cfg.nav, y, viewport, Some(light_span(y))))
        .collect();
    assert_eq!(
        styles,
        vec![
            NavStyle::Transparent,
            NavStyle::Solid,
            NavStyle::Solid,
            NavStyle::Light,
            NavStyle::Light,
            NavStyle::Solid,
            NavStyle::Transparent,
        ]
    );
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg: ChromeConfig = serde_json::from_str(
        r#"{ "nav": { "solid_after_px": 40 }, "parallax": { "factor": 0.5 } }"#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.nav.solid_after_px, 40.0);
    assert_eq!(cfg.nav.light_class, "light");
    assert_eq!(cfg.menu.toggle_selector, ".menu-toggle");

    assert_eq!(nav_style(&cfg.nav, 50.0, 800.0, None), NavStyle::Solid);
    assert_eq!(parallax::offset(&cfg.parallax, 200.0, 800.0), Some(100.0));
}

#[test]
fn invalid_overrides_are_reported() {
    let cfg: ChromeConfig =
        serde_json::from_str(r#"{ "nav": { "probe_line_px": -10 } }"#).unwrap();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("nav.probe_line_px"));
}
