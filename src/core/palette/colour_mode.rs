use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ColourMode {
    #[default]
    Grayscale,
    CyclicGradient,
    SmoothNoise,
}

impl ColourMode {
    pub const ALL: &'static [Self] = &[Self::Grayscale, Self::CyclicGradient, Self::SmoothNoise];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::CyclicGradient => "Cyclic gradient",
            Self::SmoothNoise => "Smooth noise",
        }
    }

    /// The next mode in cycling order, wrapping after the last.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Grayscale => Self::CyclicGradient,
            Self::CyclicGradient => Self::SmoothNoise,
            Self::SmoothNoise => Self::Grayscale,
        }
    }
}

impl fmt::Display for ColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColourMode(pub String);

impl fmt::Display for UnknownColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown colour mode '{}', expected grayscale, gradient or noise",
            self.0
        )
    }
}

impl std::error::Error for UnknownColourMode {}

impl FromStr for ColourMode {
    type Err = UnknownColourMode;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::Grayscale),
            "gradient" | "cyclic" | "cyclic-gradient" => Ok(Self::CyclicGradient),
            "noise" | "smooth-noise" => Ok(Self::SmoothNoise),
            _ => Err(UnknownColourMode(input.to_string())),
        }
    }
}
