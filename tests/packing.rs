//! Cross-layer packing behavior: pixel round trips through `set`, placement
//! invariants over many items, and spillover across pages.

use shelfpack::{AtlasManager, AtlasRect, CpuSurface, CpuSurfaceFactory, Size};

fn patterned(width: u32, height: u32, seed: u32) -> CpuSurface {
    let pixels = (0..width as usize * height as usize)
        .map(|i| seed.wrapping_mul(0x9e37_79b9).wrapping_add(i as u32))
        .collect();
    CpuSurface::from_pixels(width, height, pixels)
}

#[test]
fn set_round_trips_pixels() {
    let mut atlas = AtlasManager::with_page_size(CpuSurfaceFactory, 64, 64);

    let sources: Vec<(u32, CpuSurface)> = (0..8u32)
        .map(|seed| (seed, patterned(5 + seed % 3, 4 + seed % 5, seed)))
        .collect();

    let mut placed = Vec::new();
    for (seed, source) in &sources {
        let (page, rect) = atlas.set(*seed, source).unwrap();
        placed.push((*seed, page, rect));
    }

    for (seed, page, rect) in placed {
        let source = &sources[seed as usize].1;
        let surface = atlas.page(page).surface();
        for y in 0..rect.height {
            for x in 0..rect.width {
                assert_eq!(
                    surface.pixel(rect.x + x, rect.y + y),
                    source.pixel(x, y),
                    "pixel mismatch for item {seed} at ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn placements_stay_disjoint_and_in_bounds_across_pages() {
    let mut atlas = AtlasManager::with_page_size(CpuSurfaceFactory, 48, 48);

    // enough mixed sizes to force several pages
    let sizes = [
        (20, 12),
        (30, 9),
        (48, 16),
        (7, 7),
        (25, 25),
        (40, 10),
        (16, 30),
        (48, 48),
        (11, 5),
        (33, 21),
        (9, 40),
        (24, 24),
    ];

    for (key, (w, h)) in sizes.into_iter().enumerate() {
        atlas.alloc(key, Size::new(w, h)).unwrap();
    }
    assert!(atlas.page_count() > 1, "scenario must spill over");

    for page in atlas.pages() {
        let rects: Vec<AtlasRect> = page.entries().map(|(_, rect)| *rect).collect();
        for rect in &rects {
            assert!(rect.right() <= page.width() as u64);
            assert!(rect.bottom() <= page.height() as u64);
        }
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}

#[test]
fn every_key_resolves_to_its_recorded_placement() {
    let mut atlas = AtlasManager::with_page_size(CpuSurfaceFactory, 40, 40);

    let mut expected = Vec::new();
    for key in 0..30u32 {
        let size = Size::new(8 + key % 9, 6 + key % 7);
        let placed = atlas.alloc(key, size).unwrap();
        expected.push((key, placed));
    }

    for (key, placed) in expected {
        assert_eq!(atlas.try_get(&key), Some(placed));
        let (page, rect) = placed;
        assert_eq!(atlas.page(page).rect(&key), Some(&rect));
        assert_eq!(rect.size(), Size::new(8 + key % 9, 6 + key % 7));
    }
}

#[test]
fn oversized_source_lands_on_a_fitting_page() {
    let mut atlas = AtlasManager::with_page_size(CpuSurfaceFactory, 16, 16);

    let wide = patterned(50, 4, 7);
    let (page, rect) = atlas.set("wide", &wide).unwrap();

    assert_eq!(rect, AtlasRect::new(0, 0, 50, 4));
    assert!(atlas.page(page).width() >= 50);

    let surface = atlas.page(page).surface();
    for x in 0..50 {
        assert_eq!(surface.pixel(x, 0), wide.pixel(x, 0));
    }
}
