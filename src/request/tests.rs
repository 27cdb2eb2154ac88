use super::*;
use std::io::Write;

fn sample_image() -> ImageFile {
    ImageFile::new("widget.png", "image/png", b"PNGDATA".to_vec())
}

#[test]
fn test_from_form_nothing() {
    assert_eq!(AnalysisRequest::from_form("", None), None);
    assert_eq!(AnalysisRequest::from_form("   \t ", None), None);
}

#[test]
fn test_from_form_name_only() {
    let request = AnalysisRequest::from_form("  Widget ", None).unwrap();
    assert_eq!(
        request,
        AnalysisRequest::Query {
            name: "Widget".to_string()
        }
    );
    assert_eq!(request.name(), Some("Widget"));
    assert!(!request.has_image());
}

#[test]
fn test_from_form_image_only() {
    let request = AnalysisRequest::from_form(" ", Some(sample_image())).unwrap();
    assert_eq!(
        request,
        AnalysisRequest::Upload {
            name: None,
            image: sample_image()
        }
    );
    assert_eq!(request.name(), None);
    assert!(request.has_image());
}

#[test]
fn test_from_form_name_and_image() {
    let request = AnalysisRequest::from_form("Widget", Some(sample_image())).unwrap();
    assert_eq!(request.name(), Some("Widget"));
    assert!(request.has_image());
}

#[test]
fn test_mime_type_for() {
    assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
    assert_eq!(mime_type_for(Path::new("dir/b.jpeg")), "image/jpeg");
    assert_eq!(mime_type_for(Path::new("c.jpg")), "image/jpeg");
    assert_eq!(mime_type_for(Path::new("d.webp")), "image/webp");
    assert_eq!(mime_type_for(Path::new("no_extension")), "application/octet-stream");
}

#[tokio::test]
async fn test_load_image() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile()?;
    file.write_all(b"JPEGDATA")?;

    let image = ImageFile::load(file.path()).await?;
    assert_eq!(image.bytes, b"JPEGDATA");
    assert_eq!(image.mime_type, "image/jpeg");
    assert!(image.file_name.ends_with(".jpg"));
    Ok(())
}

#[tokio::test]
async fn test_load_missing_image() {
    let err = ImageFile::load("/nonexistent/product.png").await.unwrap_err();
    assert!(err.to_string().contains("Failed to read image"));
}
