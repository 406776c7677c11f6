use std::path::Path;

use image::{Rgba, RgbaImage};
use refind_theme_builder::{
    ImageCollectionExt, NameFilter, Pipeline, Resample, SizePx, TintConfig, source,
};

#[test]
fn os_icon_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let icons = dir.path().join("icons");
    let out = dir.path().join("out");
    std::fs::create_dir_all(&icons).unwrap();
    std::fs::create_dir_all(&out).unwrap();

    RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 255]))
        .save(icons.join("os_test.png"))
        .unwrap();
    RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]))
        .save(icons.join("func_about.png"))
        .unwrap();
    let button = RgbaImage::from_pixel(4, 4, Rgba([90, 90, 90, 255]));

    let tint = TintConfig::from_hex("#29272A", 1.0).unwrap();
    let written = Pipeline::new()
        .stage(true, |c| c.scale_to(SizePx::square(256), Resample::Nearest))
        .stage(true, move |c| c.tint(tint))
        .stage(true, move |c| c.add_background(button, Resample::Nearest))
        .execute(
            source::list(&icons, |n| NameFilter::OsIcons.matches(n)).unwrap(),
            &out,
        )
        .unwrap();

    assert_eq!(written, vec![out.join("os_test.png")]);
    assert!(!out.join("func_about.png").exists());

    let result = image::open(out.join("os_test.png")).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (256, 256));
    assert!(result.pixels().all(|p| p.0 == [0x29, 0x27, 0x2A, 255]));
}

#[test]
fn conditional_stages_match_omitted_calls() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir_all(&src).unwrap();
    RgbaImage::from_pixel(3, 5, Rgba([12, 34, 56, 200]))
        .save(src.join("icon.png"))
        .unwrap();

    let run = |pipeline: Pipeline, dest: &Path| {
        std::fs::create_dir_all(dest).unwrap();
        pipeline
            .execute(source::list(&src, |_| true).unwrap(), dest)
            .unwrap();
        std::fs::read(dest.join("icon.png")).unwrap()
    };

    let with_disabled = Pipeline::new()
        .stage(true, |c| c.center_fit_to(SizePx::square(9)))
        .stage(false, |c| c.tint(TintConfig::default()))
        .stage(false, |c| c.rename("other.png"));
    let without = Pipeline::new().stage(true, |c| c.center_fit_to(SizePx::square(9)));

    assert_eq!(
        run(with_disabled, &dir.path().join("a")),
        run(without, &dir.path().join("b"))
    );
}
