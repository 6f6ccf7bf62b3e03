use std::sync::{Arc, Mutex};

use adforge_catalog::{parse_catalog, Product};
use adforge_common::error::{AdforgeError, AdforgeResult, ErrorKind};
use adforge_compositor::{decode_data_url, encode_data_url, Editor, LoadedImage};
use adforge_generation::{
    AdGenerator, AdOptions, AspectRatio, CaptionResult, GenerationBackend, StudioSession, Wearer,
};

#[derive(Clone, Copy)]
enum Outcome {
    Ok,
    Empty,
    Fail,
}

#[derive(Default)]
struct Calls {
    image_prompts: Vec<(String, AspectRatio)>,
    caption_prompts: Vec<String>,
}

struct FakeBackend {
    image: Outcome,
    caption: Outcome,
    calls: Arc<Mutex<Calls>>,
}

impl FakeBackend {
    fn new(image: Outcome, caption: Outcome) -> (Self, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        (
            Self {
                image,
                caption,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

fn tiny_png() -> String {
    let image = image::RgbaImage::from_pixel(8, 8, image::Rgba([1, 2, 3, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image.write_to(&mut out, image::ImageFormat::Png).unwrap();
    encode_data_url("image/png", &out.into_inner())
}

#[async_trait::async_trait]
impl GenerationBackend for FakeBackend {
    async fn generate_image(&self, prompt: &str, aspect: AspectRatio) -> AdforgeResult<String> {
        self.calls
            .lock()
            .unwrap()
            .image_prompts
            .push((prompt.to_string(), aspect));
        match self.image {
            Outcome::Ok => Ok(tiny_png()),
            Outcome::Empty => Ok(String::new()),
            Outcome::Fail => Err(AdforgeError::generation("image model unavailable")),
        }
    }

    async fn generate_caption(&self, prompt: &str) -> AdforgeResult<CaptionResult> {
        self.calls
            .lock()
            .unwrap()
            .caption_prompts
            .push(prompt.to_string());
        match self.caption {
            Outcome::Ok => Ok(CaptionResult {
                caption: "Own the street.".into(),
                hashtags: vec!["AirRunner".into(), "#sneakerhead".into(), "kicks".into()],
            }),
            Outcome::Empty => Ok(CaptionResult::default()),
            Outcome::Fail => Err(AdforgeError::generation("caption model unavailable")),
        }
    }
}

fn catalog() -> Vec<Product> {
    let csv = "Handle,Title,Body (HTML),Vendor,Type,Published,Image Src,Color (product.metafields.shopify.color-pattern)\n\
        air-runner,Air Runner,<p>Featherweight trainer</p>,Nike,Sneakers,true,a.jpg,Volt\n\
        court-classic,Court Classic,,Adidas,Sneakers,true,c.jpg,White\n";
    parse_catalog(csv).unwrap()
}

#[tokio::test]
async fn generates_complete_ad() {
    let (backend, calls) = FakeBackend::new(Outcome::Ok, Outcome::Ok);
    let generator = AdGenerator::new(Box::new(backend));
    let products = catalog();
    let options = AdOptions {
        mood: Some("energetic".into()),
        wearer: Wearer::Held,
        aspect_ratio: AspectRatio::Portrait9x16,
        ..Default::default()
    };

    let ad = generator.generate(&products[0], &options).await.unwrap();
    assert_eq!(ad.product_handle, "air-runner");
    assert_eq!(ad.product_title, "Air Runner");
    assert_eq!(ad.caption, "Own the street.");
    assert_eq!(ad.hashtags, vec!["#AirRunner", "#sneakerhead", "#kicks"]);
    assert_eq!(decode_data_url(&ad.marketing_image).unwrap().dimensions(), (8, 8));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.image_prompts.len(), 1);
    let (prompt, aspect) = &calls.image_prompts[0];
    assert_eq!(*aspect, AspectRatio::Portrait9x16);
    assert!(prompt.contains("Product Name: Air Runner."));
    assert!(prompt.contains("Color: Volt."));
    assert!(prompt.contains("Show the sneakers being held casually."));
    assert!(prompt.contains("The mood of the image should be: energetic."));
    assert_eq!(calls.caption_prompts.len(), 1);
}

#[tokio::test]
async fn caption_failure_discards_image() {
    let (backend, calls) = FakeBackend::new(Outcome::Ok, Outcome::Fail);
    let generator = AdGenerator::new(Box::new(backend));

    let err = generator
        .generate(&catalog()[0], &AdOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generation);
    assert_eq!(calls.lock().unwrap().image_prompts.len(), 1);
}

#[tokio::test]
async fn image_failure_skips_caption() {
    let (backend, calls) = FakeBackend::new(Outcome::Fail, Outcome::Ok);
    let generator = AdGenerator::new(Box::new(backend));

    assert!(generator
        .generate(&catalog()[0], &AdOptions::default())
        .await
        .is_err());
    assert!(calls.lock().unwrap().caption_prompts.is_empty());
}

#[tokio::test]
async fn empty_results_are_errors() {
    let (backend, _) = FakeBackend::new(Outcome::Empty, Outcome::Ok);
    let err = AdGenerator::new(Box::new(backend))
        .generate(&catalog()[0], &AdOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AdforgeError::EmptyResult { .. }));

    let (backend, _) = FakeBackend::new(Outcome::Ok, Outcome::Empty);
    let err = AdGenerator::new(Box::new(backend))
        .generate(&catalog()[0], &AdOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AdforgeError::EmptyResult { .. }));
}

#[tokio::test]
async fn session_drops_result_for_previous_selection() {
    let (backend, _) = FakeBackend::new(Outcome::Ok, Outcome::Ok);
    let generator = AdGenerator::new(Box::new(backend));
    let mut session = StudioSession::new();
    session.load_catalog(catalog());
    let options = AdOptions::default();

    let product = session.select("air-runner").unwrap().clone();
    let ticket = session.begin_generation().unwrap();
    let pending = generator.generate(&product, &options);

    // User picks another product while the request is in flight.
    session.select("court-classic").unwrap();
    let ad = pending.await.unwrap();

    assert!(matches!(
        session.commit_ad(&ticket, ad),
        Err(AdforgeError::StaleResult { .. })
    ));
    assert!(session.current_ad().is_none());

    let product = session.selected_product().unwrap().clone();
    let ticket = session.begin_generation().unwrap();
    let ad = generator.generate(&product, &options).await.unwrap();
    let shown = session.commit_ad(&ticket, ad).unwrap();
    assert_eq!(shown.product_handle, "court-classic");
}

#[tokio::test]
async fn generated_image_feeds_editor() {
    let (backend, _) = FakeBackend::new(Outcome::Ok, Outcome::Ok);
    let ad = AdGenerator::new(Box::new(backend))
        .generate(&catalog()[1], &AdOptions::default())
        .await
        .unwrap();

    let mut editor = Editor::open(&ad.marketing_image).await.unwrap();
    let logo = LoadedImage::from_rgba(
        image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255])),
        "logo",
    )
    .unwrap();
    editor.set_logo(logo).unwrap();
    editor.set_logo_visible(true).unwrap();
    assert_eq!(editor.resize(Some(16), None, true).unwrap(), (16, 16));
}
