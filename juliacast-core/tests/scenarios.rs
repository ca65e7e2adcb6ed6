use juliacast_core::{analyze, CellMark, Complex, MapKind, RunConfig};

#[test]
fn basilica_is_detected_at_level_ten() {
    let config = RunConfig::new(MapKind::Z2C)
        .with_seed(-1.0, 0.0)
        .with_levels(10, 12)
        .with_encw(128);
    let analysis = analyze(&config).unwrap();

    // One critical point at the origin.
    assert_eq!(analysis.roots.len(), 1);
    let root = &analysis.roots[0];
    assert!(root.attractor.approx_eq(Complex::ZERO));

    // One superattracting cycle of length 2: {0, -1}.
    assert_eq!(root.cycle.len(), 2);
    assert!(root.multiplier < 1e-10);
    let points: Vec<Complex> = root.cycle.iter().map(|p| p.pp).collect();
    assert!(points.iter().any(|p| p.approx_eq(Complex::ZERO)));
    assert!(points.iter().any(|p| p.approx_eq(Complex::new(-1.0, 0.0))));

    assert_eq!(root.interior_found, 10);
    assert!(!analysis.overlapping);
}

#[test]
fn degenerate_seed_zero_fixed_point() {
    let config = RunConfig::new(MapKind::Z2C)
        .with_seed(0.0, 0.0)
        .with_levels(10, 10)
        .with_encw(128);
    let analysis = analyze(&config).unwrap();

    let root = &analysis.roots[0];
    assert!(root.attractor.approx_eq(Complex::ZERO));
    assert_eq!(root.cycle.len(), 1);
    assert!(root.cycle[0].pp.approx_eq(Complex::ZERO));
    assert!(root.multiplier < 1e-10);
    assert_eq!(root.interior_found, 10);
}

#[test]
fn interior_julia_seed_has_attracting_fixed_point() {
    let config = RunConfig::new(MapKind::Z2C)
        .with_seed(0.285, 0.01)
        .with_levels(10, 18)
        .with_encw(128);
    let analysis = analyze(&config).unwrap();

    let detected: Vec<_> = analysis
        .roots
        .iter()
        .filter(|r| !r.cycle.is_empty())
        .collect();
    assert_eq!(detected.len(), 1);
    let root = detected[0];
    assert_eq!(root.cycle.len(), 1, "a single attracting fixed point");
    assert!(root.multiplier <= 1.00001);
    assert!(
        (10..=18).contains(&root.interior_found),
        "expected detection at some level ≤ 18, got {}",
        root.interior_found
    );
}

#[test]
fn dendrite_has_no_attracting_interior() {
    // c = -2 (Chebyshev): the only cycle is the repelling fixed point 2,
    // which is filtered out. Nothing is analyzed, nothing is detected, and
    // the run is not an error.
    let config = RunConfig::new(MapKind::Z2C)
        .with_seed(-2.0, 0.0)
        .with_levels(10, 24);
    let analysis = analyze(&config).unwrap();

    assert!(analysis.roots.iter().all(|r| r.cycle.is_empty()));
    assert!(analysis.roots.iter().all(|r| r.interior_found == 0));
    assert!(!analysis.overlapping);
}

#[test]
fn pure_cube_fixed_point_detected_quickly() {
    let config = RunConfig::new(MapKind::Z3AZC)
        .with_seed(0.0, 0.0)
        .with_factor(0.0, 0.0)
        .with_levels(10, 12);
    let analysis = analyze(&config).unwrap();

    let detected: Vec<_> = analysis
        .roots
        .iter()
        .filter(|r| !r.cycle.is_empty())
        .collect();
    assert_eq!(detected.len(), 1, "one cycle at the origin");
    let root = detected[0];
    assert_eq!(root.cycle.len(), 1);
    assert!(root.cycle[0].pp.approx_eq(Complex::ZERO));
    assert_eq!(root.interior_found, 10);
}

#[test]
fn whole_rectangle_mode_agrees_with_neighborhood_mode() {
    let neighborhood = RunConfig::new(MapKind::Z2C)
        .with_seed(-1.0, 0.0)
        .with_levels(10, 12)
        .with_encw(64);
    let whole = neighborhood.with_encw(-64);
    assert_eq!(whole.start, CellMark::Gray);

    let a = analyze(&neighborhood).unwrap();
    let b = analyze(&whole).unwrap();
    assert_eq!(
        a.roots[0].interior_found, b.roots[0].interior_found,
        "start mark must not change the detection level for the basilica"
    );
}

#[test]
fn analysis_is_deterministic() {
    let config = RunConfig::new(MapKind::Z2C)
        .with_seed(-1.0, 0.0)
        .with_levels(10, 11);
    let a = analyze(&config).unwrap();
    let b = analyze(&config).unwrap();
    assert_eq!(a.roots.len(), b.roots.len());
    for (ra, rb) in a.roots.iter().zip(&b.roots) {
        assert_eq!(ra.cycle.len(), rb.cycle.len());
        assert_eq!(ra.interior_found, rb.interior_found);
        assert_eq!(ra.multiplier, rb.multiplier);
    }
}
