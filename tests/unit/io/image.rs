//! Tests for source decoding and atomic PNG export

#[cfg(test)]
mod tests {
    use allrgb::SynthesisError;
    use allrgb::io::image::{decode_source, temp_path, write_png_atomically};
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_encoded(dir: &TempDir, name: &str, image: DynamicImage, format: ImageFormat) -> PathBuf {
        let path = dir.path().join(name);
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .expect("encode succeeds");
        std::fs::write(&path, bytes).expect("write source");
        path
    }

    // Tests format detection from content and alpha removal
    // Verified by guessing the format from the file extension
    #[test]
    fn test_decode_detects_format() {
        let dir = TempDir::new().expect("temp dir");
        let rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0]));
        let png = write_encoded(&dir, "source.jpg", DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        let decoded = decode_source(&png).expect("png decodes");
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgb([10, 20, 30]));

        let gif = write_encoded(
            &dir,
            "source",
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))),
            ImageFormat::Gif,
        );
        assert_eq!(
            decode_source(&gif).map(|image| image.dimensions()).ok(),
            Some((4, 4))
        );
    }

    // Tests corrupt or missing input is reported with the right variant
    // Verified by returning an empty image for unknown formats
    #[test]
    fn test_decode_rejects_garbage() {
        let dir = TempDir::new().expect("temp dir");
        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not an image at all").expect("write source");

        assert!(matches!(
            decode_source(&garbage),
            Err(SynthesisError::ImageLoad { .. })
        ));
        assert!(matches!(
            decode_source(Path::new("/definitely/missing/source.png")),
            Err(SynthesisError::FileSystem { .. })
        ));
    }

    #[test]
    fn test_temp_path_suffix() {
        assert_eq!(
            temp_path(Path::new("out/picture.png")),
            Path::new("out/picture.png.part")
        );
    }

    // Tests the output lands at the destination with no temporary file left
    // Verified by skipping the final rename
    #[test]
    fn test_write_png_atomically() {
        let dir = TempDir::new().expect("temp dir");
        let dest = dir.path().join("nested").join("result.png");
        let canvas = RgbImage::from_fn(4, 4, |x, y| Rgb([x as u8, y as u8, 7]));

        write_png_atomically(&canvas, &dest).expect("write succeeds");

        assert!(dest.exists());
        assert!(!temp_path(&dest).exists());
        let written = decode_source(&dest).expect("output decodes");
        assert_eq!(written, canvas);
    }

    // Tests the PNG encoding is used regardless of destination extension
    // Verified by saving with the format guessed from the path
    #[test]
    fn test_write_png_ignores_extension() {
        let dir = TempDir::new().expect("temp dir");
        let dest = dir.path().join("result.jpg");
        let canvas = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));

        write_png_atomically(&canvas, &dest).expect("write succeeds");

        let bytes = std::fs::read(&dest).expect("read output");
        assert_eq!(image::guess_format(&bytes).ok(), Some(ImageFormat::Png));
    }

    // Tests a failed rename keeps the encoded file and leaves the destination alone
    // Verified by removing the temporary file when the rename fails
    #[test]
    fn test_write_png_rename_failure_keeps_part() {
        let dir = TempDir::new().expect("temp dir");
        let dest = dir.path().join("occupied");
        std::fs::create_dir(&dest).expect("create destination directory");
        std::fs::write(dest.join("keep.txt"), b"old contents").expect("write marker");
        let canvas = RgbImage::from_pixel(2, 2, Rgb([9, 8, 7]));

        let result = write_png_atomically(&canvas, &dest);

        assert!(matches!(result, Err(SynthesisError::FileSystem { .. })));
        assert!(temp_path(&dest).is_file());
        assert!(dest.is_dir());
        assert_eq!(
            std::fs::read(dest.join("keep.txt")).ok(),
            Some(b"old contents".to_vec())
        );
    }

    // Tests an encode failure is reported as an export error and the destination is untouched
    // Verified by writing straight to the destination instead of the temporary file
    #[test]
    fn test_write_png_encode_failure_keeps_dest() {
        let dir = TempDir::new().expect("temp dir");
        let dest = dir.path().join("result.png");
        std::fs::write(&dest, b"previous image").expect("write old output");
        std::fs::create_dir(temp_path(&dest)).expect("block the temporary path");
        let canvas = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));

        let result = write_png_atomically(&canvas, &dest);

        assert!(matches!(result, Err(SynthesisError::ImageExport { .. })));
        assert_eq!(std::fs::read(&dest).ok(), Some(b"previous image".to_vec()));
    }
}
