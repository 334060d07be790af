// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Image State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array2;

/// A rendered stamp: rows x columns of pixel values.
pub type Image = Array2<f64>;

/// Shape of an image as `(rows, cols)`.
pub type ImageShape = (usize, usize);

/// Shape of `image` in the `(rows, cols)` convention used by errors.
pub fn image_shape(image: &Image) -> ImageShape {
    image.dim()
}

/// Fail with `ShapeMismatch` unless `image` has the `expected` shape.
pub fn ensure_shape(image: &Image, expected: ImageShape) -> crate::error::FisherResult<()> {
    let actual = image.dim();
    if actual != expected {
        return Err(crate::error::FisherError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FisherError;

    #[test]
    fn test_ensure_shape_accepts_matching_image() {
        let img = Image::zeros((3, 4));
        assert_eq!(image_shape(&img), (3, 4));
        assert!(ensure_shape(&img, (3, 4)).is_ok());
    }

    #[test]
    fn test_ensure_shape_reports_both_shapes() {
        let img = Image::zeros((5, 5));
        match ensure_shape(&img, (3, 3)) {
            Err(FisherError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, (3, 3));
                assert_eq!(actual, (5, 5));
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }
}
