use std::{
    path::Path,
    time::Duration,
};

use image::{
    DynamicImage,
    ImageFormat,
    RgbaImage,
};

use crate::core::{
    http,
    ReflinksError,
};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Maps every character outside `[A-Za-z0-9]` to `_`, one output character
/// per input character. Keeps asset filenames portable across filesystems.
pub fn sanitize_name(name: &str) -> String {
    name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

/// `ext` carries its leading dot ("" for none); logo uploads keep the source
/// extension, everything else lands as `.png`.
pub fn logo_filename(platform_name: &str, ext: &str) -> String {
    format!("logo_{}{}", sanitize_name(platform_name), ext)
}

pub fn favicon_filename(platform_name: &str) -> String {
    format!("fav_{}.png", sanitize_name(platform_name))
}

/// Image content of the system clipboard, or None when the clipboard holds
/// something else (text, files, nothing).
pub fn clipboard_image() -> Result<Option<RgbaImage>, ReflinksError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ReflinksError::Clipboard(e.to_string()))?;
    match clipboard.get_image() {
        Ok(data) => {
            let image =
                RgbaImage::from_raw(data.width as u32, data.height as u32, data.bytes.into_owned())
                    .ok_or_else(|| {
                        ReflinksError::Clipboard("Clipboard image had inconsistent dimensions".to_string())
                    })?;
            Ok(Some(image))
        }
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(ReflinksError::Clipboard(e.to_string())),
    }
}

pub fn save_rgba_png(image: &RgbaImage, path: &Path) -> Result<(), ReflinksError> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

pub fn save_png(image: &DynamicImage, path: &Path) -> Result<(), ReflinksError> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Fetches an image URL and decodes it. Any HTTP or decode failure surfaces
/// as a recoverable error; nothing is written on failure.
pub fn download_image(url: &str) -> Result<DynamicImage, ReflinksError> {
    let client = http::client(DOWNLOAD_TIMEOUT)?;
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(ReflinksError::Custom(format!(
            "HTTP error {} from {}",
            response.status(),
            url
        )));
    }
    let bytes = response.bytes()?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Decodes arbitrary image bytes (ico, png, jpeg, ...) and re-encodes as PNG.
pub fn reencode_png(bytes: &[u8], path: &Path) -> Result<(), ReflinksError> {
    let image = image::load_from_memory(bytes)?;
    save_png(&image, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_maps_non_alphanumerics_to_underscores() {
        assert_eq!(sanitize_name("Crypto.com Exchange!"), "Crypto_com_Exchange_");
        assert_eq!(sanitize_name("a b/c"), "a_b_c");
        // Non-ASCII letters are flattened too: output stays [A-Za-z0-9_].
        let sanitized = sanitize_name("Bitpanda Börse №1");
        assert!(sanitized.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert_eq!(sanitized.chars().count(), "Bitpanda Börse №1".chars().count());
    }

    #[test]
    fn deterministic_asset_filenames() {
        assert_eq!(logo_filename("Gate.io", ".png"), "logo_Gate_io.png");
        assert_eq!(logo_filename("Gate.io", ".jpg"), "logo_Gate_io.jpg");
        assert_eq!(favicon_filename("Gate.io"), "fav_Gate_io.png");
    }

    #[test]
    fn reencode_accepts_any_decodable_format() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("fav_X.png");

        let mut bytes = Vec::new();
        let source = DynamicImage::new_rgba8(4, 4);
        source
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Bmp)
            .unwrap();

        reencode_png(&bytes, &out).unwrap();
        assert_eq!(image::open(&out).unwrap().width(), 4);
    }

    #[test]
    fn reencode_rejects_non_image_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("fav_X.png");
        assert!(reencode_png(b"<html>not an image</html>", &out).is_err());
        assert!(!out.exists());
    }
}
