//! Sampling ranges for random shape generation
//!
//! A [`ShapeConfig`] holds one [`RangeSpec`] per shape parameter plus the set
//! of shape kinds to pick from. It can be built in code with the `with_*`
//! methods or loaded from TOML:
//!
//! ```toml
//! shapes = [0, 3]
//!
//! [ranges]
//! R = [200, 255]
//! G = [0, 0]
//! OP = [0.5, 1.0]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// An inclusive numeric sampling range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub is_float: bool,
}

impl RangeSpec {
    pub fn new(min: f64, max: f64, is_float: bool) -> Self {
        Self { min, max, is_float }
    }

    pub fn int(min: i64, max: i64) -> Self {
        Self::new(min as f64, max as f64, false)
    }

    pub fn float(min: f64, max: f64) -> Self {
        Self::new(min, max, true)
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)?;
        if self.is_float {
            f.write_str(" float")?;
        }
        Ok(())
    }
}

/// The parameters a random shape is sampled over, in formatting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKey {
    /// Shape kind code
    Sha,
    X,
    Y,
    /// Circle radius
    Rad,
    /// Ellipse radii
    Rx,
    Ry,
    /// Rectangle size
    W,
    H,
    /// Color channels
    R,
    G,
    B,
    /// Fill opacity
    Op,
}

impl ShapeKey {
    pub const ALL: [ShapeKey; 12] = [
        ShapeKey::Sha,
        ShapeKey::X,
        ShapeKey::Y,
        ShapeKey::Rad,
        ShapeKey::Rx,
        ShapeKey::Ry,
        ShapeKey::W,
        ShapeKey::H,
        ShapeKey::R,
        ShapeKey::G,
        ShapeKey::B,
        ShapeKey::Op,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKey::Sha => "SHA",
            ShapeKey::X => "X",
            ShapeKey::Y => "Y",
            ShapeKey::Rad => "RAD",
            ShapeKey::Rx => "RX",
            ShapeKey::Ry => "RY",
            ShapeKey::W => "W",
            ShapeKey::H => "H",
            ShapeKey::R => "R",
            ShapeKey::G => "G",
            ShapeKey::B => "B",
            ShapeKey::Op => "OP",
        }
    }

    fn is_color(&self) -> bool {
        matches!(self, ShapeKey::R | ShapeKey::G | ShapeKey::B)
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// A range as reported by [`ShapeConfig::get`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigRange {
    /// A discrete set of shape kind codes
    Choice(Vec<i64>),
    Numeric(RangeSpec),
}

impl fmt::Display for ConfigRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigRange::Choice(codes) => write!(f, "{:?}", codes),
            ConfigRange::Numeric(range) => fmt::Display::fmt(range, f),
        }
    }
}

/// Sampling ranges for every shape parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeConfig {
    shape_kinds: Vec<i64>,
    ranges: IndexMap<ShapeKey, RangeSpec>,
}

/// TOML structure for deserializing shape configs
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlShapeConfig {
    shapes: Option<Vec<i64>>,
    #[serde(default)]
    ranges: BTreeMap<String, (f64, f64)>,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        let ranges = [
            (ShapeKey::X, RangeSpec::int(0, 500)),
            (ShapeKey::Y, RangeSpec::int(0, 300)),
            (ShapeKey::Rad, RangeSpec::int(10, 30)),
            (ShapeKey::Rx, RangeSpec::int(10, 30)),
            (ShapeKey::Ry, RangeSpec::int(10, 30)),
            (ShapeKey::W, RangeSpec::int(10, 100)),
            (ShapeKey::H, RangeSpec::int(10, 100)),
            (ShapeKey::R, RangeSpec::int(0, 255)),
            (ShapeKey::G, RangeSpec::int(0, 255)),
            (ShapeKey::B, RangeSpec::int(0, 255)),
            (ShapeKey::Op, RangeSpec::float(0.0, 1.0)),
        ]
        .into_iter()
        .collect();

        Self {
            shape_kinds: vec![0, 1, 3],
            ranges,
        }
    }
}

impl ShapeConfig {
    /// Create a configuration with the default ranges
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shape kind codes to pick from
    pub fn with_shape_kinds(mut self, codes: Vec<i64>) -> Result<Self, ConfigError> {
        if codes.is_empty() {
            return Err(ConfigError::NoShapeKinds);
        }
        self.shape_kinds = codes;
        Ok(self)
    }

    /// Set the range for one parameter
    ///
    /// Opacity ranges are sampled as floats, everything else as integers.
    pub fn with_range(mut self, key: ShapeKey, min: f64, max: f64) -> Result<Self, ConfigError> {
        if key == ShapeKey::Sha {
            return Err(ConfigError::NotARange(key));
        }
        if !(min <= max) {
            return Err(ConfigError::InvalidRange { key, min, max });
        }
        let bounds = match key {
            ShapeKey::Op => Some((0.0, 1.0)),
            k if k.is_color() => Some((0.0, 255.0)),
            _ => None,
        };
        if let Some((low, high)) = bounds {
            if min < low || max > high {
                return Err(ConfigError::OutOfBounds {
                    key,
                    min,
                    max,
                    low,
                    high,
                });
            }
        }
        let range = if key == ShapeKey::Op {
            RangeSpec::float(min, max)
        } else {
            RangeSpec::new(min.round(), max.round(), false)
        };
        self.ranges.insert(key, range);
        Ok(self)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Allowed shape kind codes
    pub fn shape_kinds(&self) -> &[i64] {
        &self.shape_kinds
    }

    /// The range for a numeric parameter; `None` for [`ShapeKey::Sha`]
    pub fn range(&self, key: ShapeKey) -> Option<&RangeSpec> {
        self.ranges.get(&key)
    }

    /// Numeric ranges in formatting order, shape kind excluded
    pub fn ranges(&self) -> impl Iterator<Item = (ShapeKey, &RangeSpec)> {
        self.ranges.iter().map(|(k, v)| (*k, v))
    }

    /// Snapshot of every range, shape kind first, in formatting order
    pub fn get(&self) -> IndexMap<ShapeKey, ConfigRange> {
        std::iter::once((ShapeKey::Sha, ConfigRange::Choice(self.shape_kinds.clone())))
            .chain(
                self.ranges
                    .iter()
                    .map(|(k, v)| (*k, ConfigRange::Numeric(*v))),
            )
            .collect()
    }
}

impl FromStr for ShapeConfig {
    type Err = ConfigError;

    /// Parse a TOML configuration; unlisted parameters keep their defaults
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let parsed: TomlShapeConfig = toml::from_str(content)?;

        let mut config = ShapeConfig::default();
        if let Some(codes) = parsed.shapes {
            config = config.with_shape_kinds(codes)?;
        }
        for (name, (min, max)) in parsed.ranges {
            let key: ShapeKey = name.parse()?;
            config = config.with_range(key, min, max)?;
        }
        Ok(config)
    }
}

impl fmt::Display for ShapeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, range) in self.get() {
            writeln!(f, "{}: {}", key, range)?;
        }
        Ok(())
    }
}
