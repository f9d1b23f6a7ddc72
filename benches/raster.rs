//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
use bencher::{benchmark_group, benchmark_main, Bencher};
use cgmath::{vec3, Matrix4, PerspectiveFov, Point3, Rad};

use tenebra::{CoverageRaster, CullerConfig, LocalBox, OcclusionCuller, PixelRect};

fn fill_small(b: &mut Bencher) {
    let mut raster = CoverageRaster::new();
    b.iter(|| {
        raster.clear();
        for i in 0..64 {
            raster.fill(&PixelRect::new(i * 13, i * 7, i * 13 + 20, i * 7 + 10));
        }
    });
}

fn fill_full(b: &mut Bencher) {
    let mut raster = CoverageRaster::new();
    b.iter(|| {
        raster.clear();
        raster.fill(&PixelRect::full());
    });
}

fn query_covered(b: &mut Bencher) {
    let mut raster = CoverageRaster::new();
    raster.fill(&PixelRect::new(0, 0, 700, 400));
    b.iter(|| raster.is_covered(&PixelRect::new(3, 5, 690, 390)));
}

fn cull_grid(b: &mut Bencher) {
    let projection: Matrix4<f32> = PerspectiveFov {
        fovy: Rad(1.2),
        aspect: 2.0,
        near: 0.1,
        far: 1000.0,
    }
    .into();
    let view = Matrix4::look_at_rh(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        vec3(0.0, 1.0, 0.0),
    );
    let wall = [LocalBox::new([0, 0, 0], [16, 16, 1])];

    let mut culler = OcclusionCuller::new(CullerConfig::default()).unwrap();
    b.iter(|| {
        culler.begin_frame(projection * view, Point3::new(8.0, 8.0, -10.0));
        for z in 0..8 {
            for x in -4..4 {
                let origin = Point3::new(x * 16, 0, z * 16);
                if culler.test_box(origin, &LocalBox::FULL).is_visible() {
                    culler.add_occluders(origin, &wall);
                }
            }
        }
        culler.end_frame()
    });
}

benchmark_group!(benches, fill_small, fill_full, query_covered, cull_grid);
benchmark_main!(benches);
