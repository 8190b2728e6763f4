use {
    super::*,
    crate::{basis::Color, stats::BLACK_THRESHOLD},
};

/// 800x600 の黒背景に 2 つの円を描く. `None` の球は描かない.
fn scene(left: Option<Color>, right: Option<Color>) -> Image {
    const RADIUS: i64 = 120;
    let mut image = Image::filled(800, 600, Color::gray(0));
    for (cx, color) in [(200, left), (600, right)].iter().copied() {
        let color = match color {
            Some(c) => c,
            None => continue,
        };
        for y in 0..600i64 {
            for x in 0..800i64 {
                if (x - cx) * (x - cx) + (y - 300) * (y - 300) < RADIUS * RADIUS {
                    *image.pixel_mut(x as u32, y as u32) = color;
                }
            }
        }
    }
    image
}

#[test]
fn both_spheres_pass() {
    let image = scene(
        Some(Color { r: 200, g: 40, b: 40 }),
        Some(Color { r: 30, g: 30, b: 180 }),
    );
    let report = validate(&image, &Probe::defaults(), BLACK_THRESHOLD).unwrap();
    assert!(report.passed());
    assert_eq!(report.probes.len(), 2);
    assert_eq!(report.probes[0].stats.channels[0].mean, 200.0);
    assert_eq!(report.probes[1].stats.channels[2].max, 180);
    assert!(report.to_string().ends_with("PASS: every sphere is rendered"));
}

#[test]
fn black_sphere_fails() {
    let image = scene(Some(Color::gray(90)), None);
    let report = validate(&image, &Probe::defaults(), BLACK_THRESHOLD).unwrap();
    assert!(!report.passed());
    assert!(report.probes[0].passed());
    assert!(report.probes[1].black);
    assert!(report.to_string().ends_with("FAIL: black sphere(s): normal-mapped"));
}

#[test]
fn one_bright_channel_is_enough() {
    let image = scene(
        Some(Color { r: 5, g: 5, b: 11 }),
        Some(Color { r: 5, g: 5, b: 5 }),
    );
    let report = validate(&image, &Probe::defaults(), BLACK_THRESHOLD).unwrap();
    assert!(!report.probes[0].black);
    assert!(report.probes[1].black);
}

#[test]
fn threshold_is_configurable() {
    let image = scene(Some(Color::gray(20)), Some(Color::gray(20)));
    assert!(validate(&image, &Probe::defaults(), BLACK_THRESHOLD)
        .unwrap()
        .passed());
    assert!(!validate(&image, &Probe::defaults(), 30.0).unwrap().passed());
}

#[test]
fn probe_outside_image_is_an_error() {
    let image = Image::filled(400, 300, Color::gray(255));
    let err = validate(&image, &Probe::defaults(), BLACK_THRESHOLD).unwrap_err();
    assert!(matches!(err, Error::RegionOutOfBounds { .. }));
}

#[test]
fn report_lists_statistics() {
    let image = scene(Some(Color { r: 12, g: 34, b: 56 }), Some(Color::gray(1)));
    let text = validate(&image, &Probe::defaults(), BLACK_THRESHOLD)
        .unwrap()
        .to_string();
    assert!(text.contains("smooth sphere (200,300) size 100x100:"));
    assert!(text.contains("  mean: RGB(12.0, 34.0, 56.0)"));
    assert!(text.contains("  std:  RGB(0.0, 0.0, 0.0)"));
    assert!(text.contains("  FAIL: normal-mapped sphere is black"));
}

#[test]
fn parse_probe() {
    assert_eq!(
        "10, 20,30".parse::<Probe>().unwrap(),
        Probe::new("10, 20,30", 10, 20, 30)
    );
    assert_eq!(
        "left=200,300,100".parse::<Probe>().unwrap(),
        Probe::new("left", 200, 300, 100)
    );
    for bad in &["", "1,2", "1,2,3,4", "a=1,2,x", "-1,2,3"] {
        assert!(
            matches!(bad.parse::<Probe>(), Err(Error::Usage(_))),
            "{:?}",
            bad
        );
    }
}
