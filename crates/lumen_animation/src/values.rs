//! Animatable value types
//!
//! [`Property`] names the handful of visual properties the layer animates.
//! [`MotionProps`] is a sparse set of property values, used for the from/to
//! states of reveals and for simplified reduced-motion animations.

use serde::{Deserialize, Serialize};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

/// An animatable visual property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    Opacity,
    X,
    Y,
    Scale,
    Rotate,
    RotateX,
    RotateY,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::Scale,
        Property::Rotate,
        Property::RotateX,
        Property::RotateY,
    ];

    /// Inline style name the value is written to
    pub fn css_name(&self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "translate-x",
            Property::Y => "translate-y",
            Property::Scale => "scale",
            Property::Rotate => "rotate",
            Property::RotateX => "rotate-x",
            Property::RotateY => "rotate-y",
        }
    }

    /// Value of the property when nothing animates it
    pub fn rest_value(&self) -> f32 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            _ => 0.0,
        }
    }

    /// Format a value with the unit the style expects
    pub fn format(&self, value: f32) -> String {
        match self {
            Property::Opacity | Property::Scale => format!("{value:.3}"),
            Property::X | Property::Y => format!("{value:.2}px"),
            Property::Rotate | Property::RotateX | Property::RotateY => format!("{value:.2}deg"),
        }
    }
}

/// A sparse set of property values
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionProps {
    pub opacity: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub scale: Option<f32>,
    pub rotate: Option<f32>,
    pub rotate_x: Option<f32>,
    pub rotate_y: Option<f32>,
}

impl MotionProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, value: f32) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f32) -> Self {
        self.y = Some(value);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotate(mut self, value: f32) -> Self {
        self.rotate = Some(value);
        self
    }

    pub fn rotate_x(mut self, value: f32) -> Self {
        self.rotate_x = Some(value);
        self
    }

    pub fn rotate_y(mut self, value: f32) -> Self {
        self.rotate_y = Some(value);
        self
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.x,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Rotate => self.rotate,
            Property::RotateX => self.rotate_x,
            Property::RotateY => self.rotate_y,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        let slot = match property {
            Property::Opacity => &mut self.opacity,
            Property::X => &mut self.x,
            Property::Y => &mut self.y,
            Property::Scale => &mut self.scale,
            Property::Rotate => &mut self.rotate,
            Property::RotateX => &mut self.rotate_x,
            Property::RotateY => &mut self.rotate_y,
        };
        *slot = Some(value);
    }

    /// Iterate over the properties that are set
    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|v| (p, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl Interpolate for MotionProps {
    /// Properties set on only one side interpolate against the rest value
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut out = MotionProps::new();
        for property in Property::ALL {
            let (from, to) = match (self.get(property), other.get(property)) {
                (None, None) => continue,
                (from, to) => (
                    from.unwrap_or(property.rest_value()),
                    to.unwrap_or(property.rest_value()),
                ),
            };
            out.set(property, Interpolate::lerp(&from, &to, t));
        }
        out
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        Property::ALL.into_iter().all(|p| match (self.get(p), other.get(p)) {
            (None, None) => true,
            (Some(a), Some(b)) => a.approx_eq(&b, epsilon),
            _ => false,
        })
    }
}
