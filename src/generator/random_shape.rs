//! Randomly sampled shapes

use std::fmt;

use indexmap::IndexMap;
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ShapeError;
use crate::markup::{Color, Node, Position, Shape, Tree};

use super::config::{ShapeConfig, ShapeKey};

/// Shape kinds a sample can turn into, keyed by their numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle = 0,
    Rectangle = 1,
    Ellipse = 3,
}

impl ShapeKind {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ShapeKind::Circle),
            1 => Some(ShapeKind::Rectangle),
            3 => Some(ShapeKind::Ellipse),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// One sampled parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Int(i64),
    Float(f64),
}

impl SampleValue {
    pub fn as_i64(self) -> i64 {
        match self {
            SampleValue::Int(n) => n,
            SampleValue::Float(x) => x.round() as i64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            SampleValue::Int(n) => n as f64,
            SampleValue::Float(x) => x,
        }
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Int(n) => write!(f, "{}", n),
            SampleValue::Float(x) => write!(f, "{:.1}", x),
        }
    }
}

/// Round to one decimal place
///
/// Goes through the decimal text form so that a value stored just below a
/// tie (0.35 is 0.34999...) rounds down as its exact value says.
fn round1(x: f64) -> f64 {
    format!("{:.1}", x).parse().unwrap_or(x)
}

/// A shape whose parameters were drawn from a [`ShapeConfig`]
///
/// Values are kept in the config's key order, which is also the column order
/// of [`RandomShape::to_row`].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomShape {
    values: IndexMap<ShapeKey, SampleValue>,
}

impl RandomShape {
    /// Sample a shape using the thread-local RNG
    pub fn sample(config: &ShapeConfig) -> Self {
        Self::sample_with(config, &mut rand::thread_rng())
    }

    /// Sample a shape from the given RNG
    pub fn sample_with<R: Rng + ?Sized>(config: &ShapeConfig, rng: &mut R) -> Self {
        let code = config
            .shape_kinds()
            .choose(rng)
            .copied()
            .unwrap_or_default();

        let mut values = IndexMap::new();
        values.insert(ShapeKey::Sha, SampleValue::Int(code));
        for (key, range) in config.ranges() {
            let value = if range.is_float {
                SampleValue::Float(round1(rng.gen_range(range.min..=range.max)))
            } else {
                SampleValue::Int(rng.gen_range(range.min as i64..=range.max as i64))
            };
            values.insert(key, value);
        }
        Self { values }
    }

    pub fn get(&self, key: ShapeKey) -> Option<SampleValue> {
        self.values.get(&key).copied()
    }

    /// Overwrite one sampled value
    pub fn set(&mut self, key: ShapeKey, value: SampleValue) {
        self.values.insert(key, value);
    }

    /// All values in column order
    pub fn values(&self) -> impl Iterator<Item = (ShapeKey, SampleValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn kind_code(&self) -> i64 {
        self.int(ShapeKey::Sha)
    }

    fn int(&self, key: ShapeKey) -> i64 {
        self.get(key).map(SampleValue::as_i64).unwrap_or_default()
    }

    fn channel(&self, key: ShapeKey) -> u8 {
        let value = self.int(key);
        u8::try_from(value).unwrap_or_else(|_| {
            warn!("{} value {} clamped to a color channel", key, value);
            value.clamp(0, 255) as u8
        })
    }

    fn opacity(&self) -> f64 {
        let value = self.get(ShapeKey::Op).map(SampleValue::as_f64).unwrap_or(1.0);
        if !(0.0..=1.0).contains(&value) {
            warn!("opacity {} clamped to 0..1", value);
            return value.clamp(0.0, 1.0);
        }
        value
    }

    /// Build the markup node for the sampled shape kind
    pub fn to_node(&self) -> Result<Node, ShapeError> {
        let code = self.kind_code();
        let kind = ShapeKind::from_code(code).ok_or(ShapeError::InvalidShapeKind(code))?;

        let position = Position::new(self.int(ShapeKey::X), self.int(ShapeKey::Y));
        let shape = match kind {
            ShapeKind::Circle => Shape::circle(position, self.int(ShapeKey::Rad)),
            ShapeKind::Rectangle => {
                Shape::rectangle(position, self.int(ShapeKey::W), self.int(ShapeKey::H))
            }
            ShapeKind::Ellipse => {
                Shape::ellipse(position, self.int(ShapeKey::Rx), self.int(ShapeKey::Ry))
            }
        };
        let fill = Color::rgb(
            self.channel(ShapeKey::R),
            self.channel(ShapeKey::G),
            self.channel(ShapeKey::B),
        );
        Ok(shape.with_fill(fill).with_opacity(self.opacity()).into_node())
    }

    /// Render the shape as standalone markup
    pub fn to_markup(&self) -> Result<String, ShapeError> {
        let mut tree = Tree::new();
        let id = tree.insert(self.to_node()?);
        Ok(tree.render(id))
    }

    /// Fixed-width row: every value right-aligned in 3 columns plus a space
    pub fn to_row(&self) -> String {
        self.values
            .values()
            .map(|v| format!("{:>3} ", v.to_string()))
            .collect()
    }

    /// Column headings matching [`RandomShape::to_row`]
    pub fn report_header(&self) -> String {
        self.values
            .keys()
            .map(|k| format!("{:>3} ", k.as_str()))
            .collect()
    }
}

impl fmt::Display for RandomShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.values {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_shape(code: i64) -> RandomShape {
        let values = [
            (ShapeKey::Sha, SampleValue::Int(code)),
            (ShapeKey::X, SampleValue::Int(50)),
            (ShapeKey::Y, SampleValue::Int(50)),
            (ShapeKey::Rad, SampleValue::Int(50)),
            (ShapeKey::Rx, SampleValue::Int(10)),
            (ShapeKey::Ry, SampleValue::Int(20)),
            (ShapeKey::W, SampleValue::Int(30)),
            (ShapeKey::H, SampleValue::Int(40)),
            (ShapeKey::R, SampleValue::Int(255)),
            (ShapeKey::G, SampleValue::Int(0)),
            (ShapeKey::B, SampleValue::Int(0)),
            (ShapeKey::Op, SampleValue::Float(1.0)),
        ];
        RandomShape {
            values: values.into_iter().collect(),
        }
    }

    #[test]
    fn test_degenerate_range_always_hits() {
        let config = ShapeConfig::new()
            .with_range(ShapeKey::X, 5.0, 5.0)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let shape = RandomShape::sample_with(&config, &mut rng);
            assert_eq!(shape.get(ShapeKey::X), Some(SampleValue::Int(5)));
        }
    }

    #[test]
    fn test_round1_uses_exact_value() {
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(0.96), 1.0);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_degenerate_opacity_range_rounds_down() {
        let config = ShapeConfig::new()
            .with_range(ShapeKey::Op, 0.35, 0.35)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let shape = RandomShape::sample_with(&config, &mut rng);
            assert_eq!(shape.get(ShapeKey::Op), Some(SampleValue::Float(0.3)));
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        let config = ShapeConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let shape = RandomShape::sample_with(&config, &mut rng);
            assert!(config.shape_kinds().contains(&shape.kind_code()));
            for (key, range) in config.ranges() {
                let value = shape.get(key).unwrap().as_f64();
                assert!(value >= range.min && value <= range.max, "{} = {}", key, value);
            }
            let op = shape.get(ShapeKey::Op).unwrap().as_f64();
            assert_eq!(op, round1(op));
        }
    }

    #[test]
    fn test_sample_key_order() {
        let shape = RandomShape::sample(&ShapeConfig::default());
        let keys: Vec<ShapeKey> = shape.values().map(|(k, _)| k).collect();
        assert_eq!(keys, ShapeKey::ALL.to_vec());
    }

    #[test]
    fn test_single_kind_is_always_chosen() {
        let config = ShapeConfig::new().with_shape_kinds(vec![3]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let shape = RandomShape::sample_with(&config, &mut rng);
            assert_eq!(shape.to_node().unwrap().tag(), "ellipse");
        }
    }

    #[test]
    fn test_to_row() {
        assert_eq!(
            fixed_shape(0).to_row(),
            "  0  50  50  50  10  20  30  40 255   0   0 1.0 "
        );
    }

    #[test]
    fn test_report_header_aligns_with_row() {
        let shape = fixed_shape(0);
        assert_eq!(
            shape.report_header(),
            "SHA   X   Y RAD  RX  RY   W   H   R   G   B  OP "
        );
        assert_eq!(shape.report_header().len(), shape.to_row().len());
    }

    #[test]
    fn test_circle_markup() {
        assert_eq!(
            fixed_shape(0).to_markup().unwrap(),
            r#"<circle cx="50" cy="50" r="50" fill="rgb(255, 0, 0)" fill-opacity="1.0"></circle>"#
        );
    }

    #[test]
    fn test_rectangle_and_ellipse_markup() {
        assert_eq!(
            fixed_shape(1).to_markup().unwrap(),
            r#"<rect x="50" y="50" width="30" height="40" fill="rgb(255, 0, 0)" fill-opacity="1.0"></rect>"#
        );
        assert_eq!(
            fixed_shape(3).to_markup().unwrap(),
            r#"<ellipse cx="50" cy="50" rx="10" ry="20" fill="rgb(255, 0, 0)" fill-opacity="1.0"></ellipse>"#
        );
    }

    #[test]
    fn test_invalid_kind_is_an_error() {
        let shape = fixed_shape(2);
        assert_eq!(shape.to_node().unwrap_err(), ShapeError::InvalidShapeKind(2));
        assert!(shape.to_markup().is_err());
    }

    #[test]
    fn test_set_overwrites_value() {
        let mut shape = fixed_shape(0);
        shape.set(ShapeKey::X, SampleValue::Int(7));
        assert_eq!(shape.get(ShapeKey::X), Some(SampleValue::Int(7)));
        assert!(shape.to_row().starts_with("  0   7 "));
    }

    #[test]
    fn test_display() {
        let text = fixed_shape(0).to_string();
        assert!(text.starts_with("SHA: 0\nX: 50\n"));
        assert!(text.ends_with("OP: 1.0\n"));
    }
}
