use super::*;
use crate::error::DisplayError;
use image::{Rgba, RgbaImage};

fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

#[test]
fn test_encode_frame_rgb565_primaries() {
    let mut frame = RgbaImage::new(3, 1);
    frame.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    frame.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
    frame.put_pixel(2, 0, Rgba([0, 0, 255, 255]));

    let data = DisplayConverter::encode_frame(&frame, PixelLayout::Rgb565, 3, 1, 6).unwrap();

    let pixel = |i: usize| u16::from_le_bytes([data[i * 2], data[i * 2 + 1]]);
    assert_eq!(pixel(0), 0xF800);
    assert_eq!(pixel(1), 0x07E0);
    assert_eq!(pixel(2), 0x001F);
}

#[test]
fn test_layout_from_depth() {
    assert_eq!(PixelLayout::from_depth(16, 11).unwrap(), PixelLayout::Rgb565);
    assert_eq!(PixelLayout::from_depth(24, 16).unwrap(), PixelLayout::Bgr24);
    assert_eq!(PixelLayout::from_depth(32, 16).unwrap(), PixelLayout::Bgra32);
    assert_eq!(PixelLayout::from_depth(32, 0).unwrap(), PixelLayout::Rgba32);
    assert!(PixelLayout::from_depth(8, 0).is_err());
}

#[test]
fn test_encode_frame_bgra32() {
    let frame = solid(2, 2, [0, 255, 170, 255]);
    let data = DisplayConverter::encode_frame(&frame, PixelLayout::Bgra32, 2, 2, 8).unwrap();

    assert_eq!(data.len(), 16);
    assert_eq!(&data[0..4], &[170, 255, 0, 255]);
}

#[test]
fn test_encode_frame_pads_rows_to_line_length() {
    let frame = solid(2, 1, [255, 255, 255, 255]);
    let data = DisplayConverter::encode_frame(&frame, PixelLayout::Rgb565, 2, 1, 8).unwrap();

    assert_eq!(data.len(), 8);
    assert_eq!(&data[0..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(&data[4..8], &[0, 0, 0, 0]);
}

#[test]
fn test_encode_frame_fills_missing_area_with_black() {
    let frame = solid(1, 1, [255, 0, 0, 255]);
    let data = DisplayConverter::encode_frame(&frame, PixelLayout::Rgba32, 2, 2, 8).unwrap();

    assert_eq!(data.len(), 16);
    assert_eq!(&data[0..4], &[255, 0, 0, 255]);
    assert_eq!(&data[4..8], &[0, 0, 0, 255]);
    assert_eq!(&data[8..12], &[0, 0, 0, 255]);
}

#[test]
fn test_encode_frame_rejects_short_lines() {
    let frame = solid(4, 1, [0, 0, 0, 255]);
    assert!(DisplayConverter::encode_frame(&frame, PixelLayout::Bgra32, 4, 1, 8).is_err());
}

#[test]
fn test_assumed_geometry_is_rgb565() {
    let geometry = ScreenGeometry::assumed(800, 480);
    assert_eq!(geometry.line_length, 1600);
    assert_eq!(
        PixelLayout::from_depth(geometry.bits_per_pixel, geometry.red_offset).unwrap(),
        PixelLayout::Rgb565
    );
}

#[test]
fn test_framebuffer_open_missing_device_fails() {
    let mut config = crate::config::FieldRadarConfig::default().display;
    config.framebuffer_device = "/nonexistent/fb99".to_string();
    assert!(matches!(
        FramebufferPresenter::open(&config),
        Err(DisplayError::FramebufferOpen { .. })
    ));
}

#[test]
fn test_panned_geometry_start_offset() {
    let geometry = ScreenGeometry {
        width: 800,
        height: 480,
        bits_per_pixel: 32,
        line_length: 3328,
        red_offset: 16,
        x_offset: 4,
        y_offset: 480,
    };
    assert_eq!(geometry.start_offset(), 480 * 3328 + 16);
}

#[test]
fn test_framebuffer_writes_at_panned_offset_with_device_stride() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fb0");
    let file = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .unwrap();
    let geometry = ScreenGeometry {
        width: 2,
        height: 2,
        bits_per_pixel: 16,
        line_length: 8,
        red_offset: 11,
        x_offset: 0,
        y_offset: 2,
    };
    let mut presenter = FramebufferPresenter::with_geometry("fb0", file, geometry).unwrap();

    presenter.present(&solid(2, 2, [255, 255, 255, 255])).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written.len(), 16 + 16);
    assert!(written[..16].iter().all(|b| *b == 0));
    assert_eq!(&written[16..20], &[0xFF; 4]);
    assert_eq!(&written[20..24], &[0; 4]);
    assert_eq!(&written[24..28], &[0xFF; 4]);
}

#[test]
fn test_snapshot_presenter_writes_every_nth_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let mut presenter = SnapshotPresenter::new(&path, 3);
    let frame = solid(4, 4, [2, 8, 6, 255]);

    for _ in 0..7 {
        presenter.present(&frame).unwrap();
    }

    assert_eq!(presenter.frames(), 7);
    assert_eq!(presenter.snapshots_written(), 3);
    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (4, 4));
    assert_eq!(*decoded.get_pixel(0, 0), Rgba([2, 8, 6, 255]));
    assert!(!dir.path().join("frame.png.tmp").exists());
}

#[test]
fn test_snapshot_presenter_reports_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("frame.png");
    let mut presenter = SnapshotPresenter::new(path, 1);

    let result = presenter.present(&solid(2, 2, [0, 0, 0, 255]));
    assert!(matches!(result, Err(DisplayError::Snapshot { .. })));
}

#[test]
fn test_null_presenter_counts_frames() {
    let mut presenter = NullPresenter::new();
    let frame = solid(1, 1, [0, 0, 0, 255]);
    presenter.present(&frame).unwrap();
    presenter.present(&frame).unwrap();
    assert_eq!(presenter.frames(), 2);
}
