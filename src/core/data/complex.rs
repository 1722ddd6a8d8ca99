use std::error::Error;
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// A point in the complex plane. Used both for pixel coordinates and for the
/// recurrence constant of the Julia family.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Self = Self {
        real: 0.0,
        imag: 0.0,
    };

    #[must_use]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    /// Component-wise linear interpolation, `t = 0` gives `self`, `t = 1` gives `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            real: self.real + (other.real - self.real) * t,
            imag: self.imag + (other.imag - self.imag) * t,
        }
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real - self.imag * other.imag,
            imag: self.real * other.imag + self.imag * other.real,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexParseError {
    pub input: String,
}

impl fmt::Display for ComplexParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected 'real,imag' but got '{}'", self.input)
    }
}

impl Error for ComplexParseError {}

/// Parses `"real,imag"`, e.g. `"-0.8,0.156"`.
impl FromStr for Complex {
    type Err = ComplexParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parse_error = || ComplexParseError {
            input: input.to_string(),
        };

        let (real, imag) = input.trim().split_once(',').ok_or_else(parse_error)?;
        let real = real.trim().parse::<f64>().map_err(|_| parse_error())?;
        let imag = imag.trim().parse::<f64>().map_err(|_| parse_error())?;

        Ok(Self::new(real, imag))
    }
}
