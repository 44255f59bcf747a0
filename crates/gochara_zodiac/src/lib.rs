//! Zodiac sign bands and aspect/orb geometry.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees
//! each, starting from Aries at 0 deg. This crate maps longitudes to
//! signs and measures angular relationships (aspects) between pairs of
//! longitudes, including the optional out-of-sign filter.

pub mod aspect;
pub mod sign;

pub use aspect::{
    ALL_ASPECTS, AspectKind, AspectSpec, angular_separation, aspect_orb,
};
pub use sign::{ALL_SIGNS, Sign, is_in_sign, normalize_360, sign_distance, sign_from_longitude};
