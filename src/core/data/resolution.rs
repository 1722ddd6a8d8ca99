use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    InvalidSize { width: u32, height: u32 },
    TooLarge { width: u64, height: u64 },
    Parse { input: String },
}

/// Largest grid a render may sample. One cell costs two bytes in the field
/// and three in the composed image.
pub const MAX_SAMPLE_PIXELS: usize = 1 << 28;

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "resolution must be at least 1x1 pixels, got {}x{}",
                    width, height
                )
            }
            Self::TooLarge { width, height } => {
                write!(
                    f,
                    "{}x{} pixels exceeds the limit of {} samples; lower the antialiasing or the output size",
                    width, height, MAX_SAMPLE_PIXELS
                )
            }
            Self::Parse { input } => {
                write!(f, "expected a resolution like 1920x1080, got '{}'", input)
            }
        }
    }
}

impl Error for ResolutionError {}

/// Pixel dimensions of a field or a frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ResolutionError> {
        if width == 0 || height == 0 {
            return Err(ResolutionError::InvalidSize { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Multiplies both axes, e.g. `2` for the antialiasing input shape.
    pub fn scaled(&self, factor: u32) -> Result<Self, ResolutionError> {
        match (self.width.checked_mul(factor), self.height.checked_mul(factor)) {
            (Some(width), Some(height)) => Self::new(width, height),
            _ => Err(ResolutionError::TooLarge {
                width: u64::from(self.width) * u64::from(factor),
                height: u64::from(self.height) * u64::from(factor),
            }),
        }
    }

    /// Fails when a grid of this size would exceed [`MAX_SAMPLE_PIXELS`].
    pub fn within_sample_limit(self) -> Result<Self, ResolutionError> {
        if self.pixel_count() > MAX_SAMPLE_PIXELS {
            return Err(ResolutionError::TooLarge {
                width: u64::from(self.width),
                height: u64::from(self.height),
            });
        }

        Ok(self)
    }

    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parse_error = || ResolutionError::Parse {
            input: input.to_string(),
        };

        let (width, height) = input
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(parse_error)?;
        let width = width.trim().parse::<u32>().map_err(|_| parse_error())?;
        let height = height.trim().parse::<u32>().map_err(|_| parse_error())?;

        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_dimensions() {
        let resolution = Resolution::new(80, 40).unwrap();

        assert_eq!(resolution.width(), 80);
        assert_eq!(resolution.height(), 40);
        assert_eq!(resolution.pixel_count(), 3200);
    }

    #[test]
    fn test_single_pixel_is_allowed() {
        assert!(Resolution::new(1, 1).is_ok());
    }

    #[test]
    fn test_zero_sized_resolutions_are_rejected() {
        assert_eq!(
            Resolution::new(0, 10),
            Err(ResolutionError::InvalidSize {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            Resolution::new(10, 0),
            Err(ResolutionError::InvalidSize {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn test_scaled_doubles_both_axes() {
        let resolution = Resolution::new(80, 40).unwrap();

        assert_eq!(resolution.scaled(2).unwrap(), Resolution::new(160, 80).unwrap());
        assert!(resolution.scaled(0).is_err());
    }

    #[test]
    fn test_scaled_overflow_is_an_error() {
        let resolution = Resolution::new(3_000_000_000, 1).unwrap();

        assert_eq!(
            resolution.scaled(2),
            Err(ResolutionError::TooLarge {
                width: 6_000_000_000,
                height: 2
            })
        );
    }

    #[test]
    fn test_sample_limit() {
        assert!(Resolution::new(16384, 16384).unwrap().within_sample_limit().is_ok());
        assert!(matches!(
            Resolution::new(16384, 16385).unwrap().within_sample_limit(),
            Err(ResolutionError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_contains() {
        let resolution = Resolution::new(3, 2).unwrap();

        assert!(resolution.contains(0, 0));
        assert!(resolution.contains(2, 1));
        assert!(!resolution.contains(3, 1));
        assert!(!resolution.contains(2, 2));
    }

    #[test]
    fn test_parse_from_string() {
        assert_eq!(
            "1920x1080".parse::<Resolution>().unwrap(),
            Resolution::new(1920, 1080).unwrap()
        );
        assert_eq!(
            " 1280 X 720 ".parse::<Resolution>().unwrap(),
            Resolution::new(1280, 720).unwrap()
        );
        assert!(matches!(
            "1920".parse::<Resolution>(),
            Err(ResolutionError::Parse { .. })
        ));
        assert!(matches!(
            "wide x tall".parse::<Resolution>(),
            Err(ResolutionError::Parse { .. })
        ));
        assert!(matches!(
            "0x10".parse::<Resolution>(),
            Err(ResolutionError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let resolution = Resolution::new(2560, 1440).unwrap();

        assert_eq!(resolution.to_string(), "2560x1440");
    }
}
