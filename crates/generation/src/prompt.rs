//! Provider prompt construction.

use adforge_catalog::Product;

use crate::options::{AdOptions, Wearer};

/// Characters of plain-text body included in the product description.
pub const DESCRIPTION_LIMIT: usize = 100;

/// One-paragraph product summary shared by the image and caption prompts.
pub fn product_description(product: &Product) -> String {
    let mut parts = vec![
        format!("Product Name: {}.", product.title),
        format!("Category: {}.", product.category),
        format!("Type: {}.", product.product_type),
        format!("Vendor: {}.", product.vendor),
    ];
    if let Some(color) = non_empty(product.color.as_deref()) {
        parts.push(format!("Color: {color}."));
    }
    if let Some(material) = non_empty(product.material.as_deref()) {
        parts.push(format!("Material: {material}."));
    }
    let body = product.plain_description(DESCRIPTION_LIMIT);
    if !body.trim().is_empty() {
        parts.push(format!("Description: {}...", body.trim()));
    }
    parts.join(" ")
}

/// Prompt for the marketing image. Each unset option falls back to a
/// default creative direction.
pub fn image_prompt(product: &Product, options: &AdOptions) -> String {
    let mut prompt = String::from(
        "Create a professional, high-resolution marketing ad image for a pair of the \
         following sneaker product. The image should feature a modern ad layout with \
         realistic shadows, professional lighting, and natural reflections. \
         DO NOT alter the core visual identity (color, shape, material) of the sneaker. \
         Draw inspiration from current sneaker advertisement trends on brand social \
         accounts and sneaker culture publications.",
    );
    prompt.push_str("\n\nProduct Details: ");
    prompt.push_str(&product_description(product));

    prompt.push_str(match options.wearer {
        Wearer::Wearing => " Show someone wearing the sneakers in an authentic street style shot.",
        Wearer::Held => " Show the sneakers being held casually.",
        Wearer::None => " Focus on the sneakers themselves.",
    });

    match option(&options.composition) {
        Some(composition) => push_sentence(&mut prompt, "Use a composition style", composition),
        None => prompt
            .push_str(" Employ dynamic positioning and creative framing to highlight the product."),
    }
    match option(&options.angle) {
        Some(angle) => push_sentence(&mut prompt, "Use a camera angle", angle),
        None => prompt
            .push_str(" Utilize varied camera angles to capture the sneaker's design details."),
    }
    match option(&options.background) {
        Some(background) => push_sentence(&mut prompt, "The background should be", background),
        None => prompt.push_str(" Use a trending background color, lighting, reflections, or props."),
    }
    if let Some(environment) = option(&options.environment) {
        push_sentence(&mut prompt, "The environment should be", environment);
    }
    if let Some(mood) = option(&options.mood) {
        push_sentence(&mut prompt, "The mood of the image should be", mood);
    }
    if let Some(custom) = option(&options.custom_instructions) {
        push_sentence(&mut prompt, "Additional instructions", custom);
    }
    prompt
}

/// Prompt for the caption and hashtags, answered as JSON.
pub fn caption_prompt(product: &Product) -> String {
    format!(
        "As an autonomous marketing AI for a sneaker store, generate a short, catchy caption \
         (under 12 words) and 3-5 trending hashtags for the following sneaker product. \
         The tone should be minimal, bold, and youthful, fitting current sneaker community language.\n\
         Product Details: {}\n\
         Output must be a JSON object with 'caption' (string) and 'hashtags' (array of strings).",
        product_description(product)
    )
}

fn push_sentence(prompt: &mut String, lead: &str, value: &str) {
    prompt.push(' ');
    prompt.push_str(lead);
    prompt.push_str(": ");
    prompt.push_str(value.trim_end_matches('.'));
    prompt.push('.');
}

fn option(value: &Option<String>) -> Option<&str> {
    non_empty(value.as_deref())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            handle: "court-classic".into(),
            title: "Court Classic".into(),
            body_html: "<p>Clean <b>leather</b> court shoe.</p>".into(),
            vendor: "Adidas".into(),
            category: "Shoes".into(),
            product_type: "Sneakers".into(),
            tags: vec![],
            published: true,
            image_src: "c.jpg".into(),
            seo_title: String::new(),
            seo_description: String::new(),
            variants: vec![],
            color: Some("White".into()),
            material: None,
            gender: None,
        }
    }

    #[test]
    fn test_description_includes_present_fields_only() {
        let description = product_description(&product());
        assert_eq!(
            description,
            "Product Name: Court Classic. Category: Shoes. Type: Sneakers. Vendor: Adidas. \
             Color: White. Description: Clean leather court shoe...."
        );
        assert!(!description.contains("Material"));
    }

    #[test]
    fn test_description_truncates_body() {
        let mut p = product();
        p.body_html = format!("<div>{}</div>", "a".repeat(300));
        let description = product_description(&p);
        let body = description.split("Description: ").nth(1).unwrap();
        assert_eq!(body, format!("{}...", "a".repeat(DESCRIPTION_LIMIT)));
    }

    #[test]
    fn test_image_prompt_defaults() {
        let prompt = image_prompt(&product(), &AdOptions::default());
        assert!(prompt.contains("Focus on the sneakers themselves."));
        assert!(prompt.contains("Employ dynamic positioning"));
        assert!(prompt.contains("Utilize varied camera angles"));
        assert!(prompt.contains("Use a trending background"));
        assert!(!prompt.contains("mood"));
    }

    #[test]
    fn test_image_prompt_uses_options() {
        let options = AdOptions {
            background: Some("seamless white studio".into()),
            environment: Some("night city".into()),
            mood: Some("energetic".into()),
            composition: Some("centered and minimalistic".into()),
            wearer: Wearer::Wearing,
            angle: Some("low-angle shot".into()),
            custom_instructions: Some("add a lens flare effect.".into()),
            ..Default::default()
        };
        let prompt = image_prompt(&product(), &options);
        assert!(prompt.contains("Show someone wearing the sneakers"));
        assert!(prompt.contains("Use a composition style: centered and minimalistic."));
        assert!(prompt.contains("Use a camera angle: low-angle shot."));
        assert!(prompt.contains("The background should be: seamless white studio."));
        assert!(prompt.contains("The environment should be: night city."));
        assert!(prompt.contains("The mood of the image should be: energetic."));
        assert!(prompt.contains("Additional instructions: add a lens flare effect."));
        assert!(!prompt.contains("Employ dynamic positioning"));
    }

    #[test]
    fn test_caption_prompt_asks_for_json() {
        let prompt = caption_prompt(&product());
        assert!(prompt.contains("Product Name: Court Classic."));
        assert!(prompt.contains("JSON object"));
    }
}
