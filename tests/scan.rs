//! End-to-end checks: render a PNG, read it back with a QR decoder and
//! compare the decoded content with the payload.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use qrcopy::capacity::max_byte_capacity;
use qrcopy::{encode, resolve, DeliveryMode, EncodingPolicy, Error, ErrorCorrection, Submission};

fn scan(png: &[u8]) -> String {
    let img = image::load_from_memory(png).expect("valid png").to_luma8();
    let (w, h) = img.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
        img.get_pixel(x as u32, y as u32).0[0]
    });
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code");
    let (_, content) = grids[0].decode().expect("decodable QR code");
    content
}

fn small() -> EncodingPolicy {
    EncodingPolicy::default().with_module_size(4)
}

#[test]
fn hello_direct_embed_scans_back() {
    let payload = resolve("hello", &DeliveryMode::DirectEmbed).unwrap();
    assert_eq!(payload, "hello");
    let png = encode(&payload, &small()).unwrap().to_png().unwrap();
    assert_eq!(scan(&png), "hello");
}

#[test]
fn short_ascii_strings_scan_back() {
    let samples = [
        "a",
        "Hello, World!",
        "https://example.com/path?q=1&r=2",
        "MIXED case 123 with spaces",
        "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
        "0123456789",
    ];
    for s in samples {
        let payload = resolve(s, &DeliveryMode::DirectEmbed).unwrap();
        let png = encode(&payload, &small()).unwrap().to_png().unwrap();
        assert_eq!(scan(&png), s);
    }
}

#[test]
fn every_error_correction_level_scans_back() {
    for level in ErrorCorrection::ALL {
        let policy = small().with_ec_level(level);
        let img = encode("level check", &policy).unwrap();
        assert_eq!(img.symbol().error_correction(), level);
        assert_eq!(scan(&img.to_png().unwrap()), "level check");
    }
}

#[test]
fn data_url_payload_scans_back() {
    let text = "short";
    let url = resolve(text, &DeliveryMode::DataUrlEmbed).unwrap();
    let img = encode(&url, &small()).unwrap();
    let decoded = scan(&img.to_png().unwrap());
    assert_eq!(decoded, url);

    let html = STANDARD
        .decode(decoded.strip_prefix("data:text/html;base64,").unwrap())
        .unwrap();
    assert!(String::from_utf8(html).unwrap().contains("const textToCopy = \"short\";"));
}

#[test]
fn external_url_payload_scans_back() {
    let mode = DeliveryMode::ExternalUrl("https://x.io/copy.html".into());
    let payload = resolve("ignored", &mode).unwrap();
    let png = encode(&payload, &small()).unwrap().to_png().unwrap();
    assert_eq!(scan(&png), "https://x.io/copy.html");
}

#[test]
fn quote_and_newline_are_escaped_in_the_embedded_page() {
    let text = "she said \"copy me\"\nthen left";
    let sub = Submission::new(text);
    let url = sub.payload(&DeliveryMode::DataUrlEmbed).unwrap();
    let html = String::from_utf8(
        STANDARD
            .decode(url.strip_prefix("data:text/html;base64,").unwrap())
            .unwrap(),
    )
    .unwrap();
    assert!(html.contains(r#"const textToCopy = "she said \"copy me\"\nthen left";"#));
    assert!(html.contains("she said \"copy me\"<br>then left"));
}

#[test]
fn capacity_boundary_at_lowest_error_correction() {
    let max = max_byte_capacity(ErrorCorrection::Low);
    let fits = "z".repeat(max);
    let img = encode(&fits, &EncodingPolicy::default().with_module_size(1)).unwrap();
    assert_eq!(img.symbol().version(), 40);

    let too_long = "z".repeat(max + 1);
    match encode(&too_long, &EncodingPolicy::default()) {
        Err(Error::CapacityExceeded { len, capacity, .. }) => {
            assert_eq!(len, max + 1);
            assert_eq!(capacity, max);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
}

#[test]
fn identical_inputs_give_identical_bytes() {
    for mode in [DeliveryMode::DirectEmbed, DeliveryMode::DataUrlEmbed] {
        let a = resolve("repeatable", &mode).unwrap();
        let b = resolve("repeatable", &mode).unwrap();
        assert_eq!(a, b);
        let png_a = encode(&a, &EncodingPolicy::default()).unwrap().to_png().unwrap();
        let png_b = encode(&b, &EncodingPolicy::default()).unwrap().to_png().unwrap();
        assert_eq!(png_a, png_b);
    }
}
