//! Contour tracing regression test
//!
//! Traces the test masks with the region-and-contour method and checks
//! contour counts, hole attachment, closure, orientation and chain codes.

use regionlab_core::Point;
use regionlab_region::{
    ConnectivityType, Contour, ContourKind, LabelGrid, LabelingMethod, SegmentationOptions,
    segment, trace_regions,
};
use regionlab_test::{RegParams, load_test_mask};

const CONNECTIVITIES: [ConnectivityType; 2] = [ConnectivityType::FourWay, ConnectivityType::EightWay];

fn tracing_options(conn: ConnectivityType) -> SegmentationOptions {
    SegmentationOptions::new(LabelingMethod::RegionContour).with_connectivity(conn)
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn check_contour(rp: &mut RegParams, contour: &Contour, conn: ConnectivityType) {
    rp.compare_values(1.0, flag(contour.is_closed(conn)), 0.0);
    let area = contour.signed_area();
    match contour.kind() {
        ContourKind::Outer => rp.compare_values(1.0, flag(area <= 0.0), 0.0),
        ContourKind::Inner => rp.compare_values(1.0, flag(area > 0.0), 0.0),
    };
    let codes = contour.chain_code().expect("unit steps");
    let start = contour.points()[0];
    let rebuilt = Contour::from_chain_code(contour.label(), contour.kind(), start, &codes);
    rp.compare_values(1.0, flag(&rebuilt == contour), 0.0);
}

#[test]
fn contour_reg() {
    let mut rp = RegParams::new("contour");

    // --- Test 1: outer and inner contour counts ---
    eprintln!("=== Contour counts ===");
    // (mask, connectivity, outer, inner)
    let cases = [
        ("blobs.txt", ConnectivityType::FourWay, 8, 1),
        ("blobs.txt", ConnectivityType::EightWay, 4, 1),
        ("annulus.txt", ConnectivityType::FourWay, 1, 1),
        ("annulus.txt", ConnectivityType::EightWay, 1, 1),
        ("nested.txt", ConnectivityType::EightWay, 2, 1),
        ("checker.txt", ConnectivityType::FourWay, 12, 0),
        ("checker.txt", ConnectivityType::EightWay, 1, 4),
        ("edges.txt", ConnectivityType::FourWay, 2, 1),
        ("edges.txt", ConnectivityType::EightWay, 2, 1),
    ];
    for (name, conn, outer, inner) in cases {
        let mask = load_test_mask(name).expect("load mask");
        let seg = segment(&mask, &tracing_options(conn)).expect("segment");
        rp.compare_values(outer as f64, seg.outer_contours().len() as f64, 0.0);
        rp.compare_values(inner as f64, seg.inner_contours().len() as f64, 0.0);
        let holes: usize = seg.regions().iter().map(|r| r.hole_count()).sum();
        rp.compare_values(inner as f64, holes as f64, 0.0);
        for contour in seg.outer_contours().iter().chain(seg.inner_contours()) {
            check_contour(&mut rp, contour, conn);
        }
        if rp.display() {
            eprintln!("  {name} {conn:?}:");
            for region in seg.regions() {
                eprintln!("    {region}");
            }
        }
    }

    // --- Test 2: annulus geometry ---
    eprintln!("=== Annulus ===");
    let mask = load_test_mask("annulus.txt").expect("load annulus.txt");
    for (conn, inner_len, inner_area) in [
        (ConnectivityType::FourWay, 16, 16.0),
        (ConnectivityType::EightWay, 12, 14.0),
    ] {
        let seg = segment(&mask, &tracing_options(conn)).expect("segment");
        let region = &seg.regions()[0];
        rp.compare_values(40.0, region.size() as f64, 0.0);
        rp.compare_values(1.0, region.hole_count() as f64, 0.0);

        let outer = seg.outer_contour_of(region).expect("outer contour");
        rp.compare_values(24.0, outer.len() as f64, 0.0);
        rp.compare_values(-36.0, outer.signed_area(), 0.0);
        rp.compare_values(1.0, flag(outer.bounding_box() == region.bounding_box()), 0.0);

        let inner = seg.inner_contours_of(region).next().expect("hole contour");
        rp.compare_values(inner_len as f64, inner.len() as f64, 0.0);
        rp.compare_values(inner_area, inner.signed_area(), 0.0);
        rp.compare_values(region.label() as f64, inner.label() as f64, 0.0);
    }

    // --- Test 3: a region inside a hole ---
    eprintln!("=== Nested regions ===");
    let mask = load_test_mask("nested.txt").expect("load nested.txt");
    for conn in CONNECTIVITIES {
        let seg = segment(&mask, &tracing_options(conn)).expect("segment");
        let ring = seg.region_at(1, 1).expect("ring");
        let dot = seg.region_at(3, 3).expect("dot");
        rp.compare_values(1.0, ring.hole_count() as f64, 0.0);
        rp.compare_values(0.0, dot.hole_count() as f64, 0.0);
        rp.compare_values(1.0, dot.size() as f64, 0.0);
        let outer = seg.outer_contour_of(dot).expect("dot contour");
        rp.compare_values(1.0, flag(outer.points() == [Point::new(3, 3)]), 0.0);
    }

    // --- Test 4: tracing on a caller-owned grid ---
    eprintln!("=== Tracing on a grid ===");
    let mask = load_test_mask("blobs.txt").expect("load blobs.txt");
    let mut grid = LabelGrid::from_binary(&mask).expect("grid");
    let contours = trace_regions(&mask, &mut grid, ConnectivityType::EightWay).expect("trace");
    rp.compare_values(1.0, flag(grid.is_fully_labeled()), 0.0);
    rp.compare_values(5.0, grid.max_label() as f64, 0.0);
    let labels: Vec<i32> = contours.outer.iter().map(|c| c.label()).collect();
    rp.compare_strings(format!("{:?}", labels).as_bytes(), b"[2, 3, 4, 5]");
    rp.compare_values(2.0, contours.inner[0].label() as f64, 0.0);

    assert!(rp.cleanup(), "contour regression test failed");
}
