use liquid_glass::{
    EffectParams, FILTER_ID, GeometrySpec, SVG_DATA_URI_PREFIX, build_composite_filter,
    build_displacement_map, decode_svg_data_uri, displacement_passes, gradient_stops,
};

fn reference_geometry() -> GeometrySpec {
    GeometrySpec::new(200, 100, 20, 10)
}

#[test]
fn vertical_gradient_stops_for_reference_geometry() {
    let map = build_displacement_map(&reference_geometry());
    let svg = map.svg_source().unwrap();
    assert!(svg.contains(r#"<linearGradient id="Y" x1="0" x2="0" y1="3%" y2="97%">"#));
    assert!(svg.contains(r#"<linearGradient id="X" x1="2%" x2="98%" y1="0" y2="0">"#));
}

#[test]
fn collapsed_passes_share_strength() {
    let passes = displacement_passes(&EffectParams {
        strength: 100,
        chromatic_aberration: 0,
    });
    assert!(passes.iter().all(|p| p.scale == 100));

    let filter = build_composite_filter(&reference_geometry(), &EffectParams::default());
    let svg = filter.svg_source().unwrap();
    assert_eq!(svg.matches(r#"scale="100""#).count(), 3);
}

#[test]
fn chromatic_aberration_spreads_channels() {
    let params = EffectParams {
        strength: 100,
        chromatic_aberration: 20,
    };
    let scales = displacement_passes(&params).map(|p| p.scale);
    assert_eq!(scales, [140, 120, 100]);

    let svg = build_composite_filter(&reference_geometry(), &params)
        .svg_source()
        .unwrap();
    let r = svg.find(r#"scale="140""#).unwrap();
    let g = svg.find(r#"scale="120""#).unwrap();
    let b = svg.find(r#"scale="100""#).unwrap();
    assert!(r < g && g < b);
}

#[test]
fn builders_are_deterministic() {
    let g = reference_geometry();
    let p = EffectParams {
        strength: 80,
        chromatic_aberration: 7,
    };
    assert_eq!(build_displacement_map(&g), build_displacement_map(&g));
    assert_eq!(build_composite_filter(&g, &p), build_composite_filter(&g, &p));
}

#[test]
fn outputs_are_self_contained_data_uris() {
    let g = reference_geometry();
    let map = build_displacement_map(&g);
    let filter = build_composite_filter(&g, &EffectParams::default());

    assert!(map.as_uri().starts_with(SVG_DATA_URI_PREFIX));
    assert!(!map.as_uri().contains('#'));
    assert!(filter.as_uri().starts_with(SVG_DATA_URI_PREFIX));
    assert!(filter.as_uri().ends_with(&format!("#{FILTER_ID}")));
    assert_eq!(filter.as_uri().matches('#').count(), 1);

    // The filter embeds exactly the map built for the same geometry.
    let svg = filter.svg_source().unwrap();
    assert!(svg.contains(&format!(r#"href="{}""#, map.as_uri())));
    assert_eq!(decode_svg_data_uri(map.as_uri()), map.svg_source());
}

#[test]
fn gradient_stops_stay_ordered() {
    for side in [1u32, 30, 50, 99, 100, 480, 2000] {
        for radius in [0u32, 1, 5, 20, 50, 200, 1000] {
            let s = gradient_stops(radius, side);
            assert!(s.near <= 100, "near {} for r={radius} side={side}", s.near);
            assert_eq!(s.near + s.far, 100);
        }
    }
    // Once the radius is clamped to half the side, stops never cross.
    for side in [30u32, 50, 100, 2000] {
        let g = GeometrySpec::new(side, side, u32::MAX, 0);
        let s = gradient_stops(g.corner_radius(), side);
        assert!(s.near < s.far);
    }
}

#[test]
fn geometry_changes_change_the_map() {
    let a = build_displacement_map(&GeometrySpec::new(200, 100, 20, 10));
    let b = build_displacement_map(&GeometrySpec::new(200, 101, 20, 10));
    let c = build_displacement_map(&GeometrySpec::new(200, 100, 21, 10));
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn oversized_radius_is_clamped_before_building() {
    let g = GeometrySpec::new(120, 60, 500, 100);
    assert_eq!(g.corner_radius(), 30);
    assert_eq!(g.edge_depth(), 30);
    let svg = build_displacement_map(&g).svg_source().unwrap();
    assert!(svg.contains(r#"x="30" y="30" height="0" width="60""#));
}
