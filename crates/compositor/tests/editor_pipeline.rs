use adforge_common::error::ErrorKind;
use adforge_compositor::{
    decode_data_url, encode_data_url, encode_surface, CompositingState, Editor, ExportFormat,
    LogoAnchor,
};
use image::{Rgba, RgbaImage};

const CANVAS: Rgba<u8> = Rgba([240, 230, 220, 255]);
const MARK: Rgba<u8> = Rgba([20, 40, 160, 255]);

fn png_data_url(width: u32, height: u32, color: Rgba<u8>) -> String {
    let image = RgbaImage::from_pixel(width, height, color);
    let bytes = encode_surface(&image, ExportFormat::Png, None).unwrap();
    encode_data_url("image/png", &bytes)
}

#[tokio::test]
async fn generated_image_edit_and_export() {
    let mut editor = Editor::open(&png_data_url(1024, 768, CANVAS)).await.unwrap();
    editor.load_logo(&png_data_url(400, 200, MARK)).await.unwrap();

    editor.set_logo_scale(0.25).unwrap();
    editor.set_logo_visible(true).unwrap();
    let size = editor.resize(Some(512), None, true).unwrap();
    assert_eq!(size, (512, 384));

    // 100x50 logo, 20px from the bottom-right corner.
    let surface = editor.surface();
    assert_eq!(*surface.get_pixel(512 - 20 - 50, 384 - 20 - 25), MARK);
    assert_eq!(*surface.get_pixel(10, 10), CANVAS);
    assert_eq!(*surface.get_pixel(511, 383), CANVAS);

    let url = editor.export(ExportFormat::Png, None).unwrap();
    assert_eq!(decode_data_url(&url).unwrap(), *editor.surface());
}

#[tokio::test]
async fn hiding_logo_leaves_no_trace() {
    let mut editor = Editor::open(&png_data_url(300, 300, CANVAS)).await.unwrap();
    let plain = editor.surface().clone();

    editor.load_logo(&png_data_url(200, 200, MARK)).await.unwrap();
    editor.set_logo_anchor(LogoAnchor::TopLeft).unwrap();
    editor.set_logo_scale(0.5).unwrap();
    editor.set_logo_visible(true).unwrap();
    assert_ne!(*editor.surface(), plain);

    editor.set_logo_visible(false).unwrap();
    assert_eq!(*editor.surface(), plain);
}

#[tokio::test]
async fn moving_logo_redraws_from_scratch() {
    let mut editor = Editor::open(&png_data_url(300, 200, CANVAS)).await.unwrap();
    editor.load_logo(&png_data_url(100, 100, MARK)).await.unwrap();
    editor.set_logo_scale(0.5).unwrap();
    editor.set_logo_visible(true).unwrap();
    editor.set_logo_anchor(LogoAnchor::TopLeft).unwrap();
    assert_eq!(*editor.surface().get_pixel(30, 30), MARK);

    editor.set_logo_anchor(LogoAnchor::BottomRight).unwrap();
    assert_eq!(*editor.surface().get_pixel(30, 30), CANVAS);
    assert_eq!(*editor.surface().get_pixel(300 - 30, 200 - 30), MARK);
}

#[tokio::test]
async fn reset_after_edits() {
    let mut editor = Editor::open(&png_data_url(640, 480, CANVAS)).await.unwrap();
    editor.resize(Some(100), Some(100), false).unwrap();
    editor.set_logo_anchor(LogoAnchor::BottomLeft).unwrap();
    editor.reset().unwrap();

    assert_eq!(*editor.state(), CompositingState::for_image(640, 480));
    assert_eq!(editor.surface().dimensions(), (640, 480));
}

#[tokio::test]
async fn bad_logo_keeps_editor_usable() {
    let mut editor = Editor::open(&png_data_url(50, 50, CANVAS)).await.unwrap();
    let err = editor.load_logo("data:image/png;base64,AAAA").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AssetLoad);
    assert!(!editor.has_logo());

    editor.set_logo_visible(true).unwrap();
    assert_eq!(editor.surface().dimensions(), (50, 50));
}

#[test]
fn save_writes_decodable_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = adforge_compositor::LoadedImage::from_rgba(
        RgbaImage::from_pixel(64, 32, CANVAS),
        "inline",
    )
    .unwrap();
    let editor = Editor::from_image(source);

    let path = dir.path().join("out").join("ad.webp");
    editor.save(&path, ExportFormat::Webp, None).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded, *editor.surface());
}
