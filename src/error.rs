//! Failures of the display binding.

use std::fmt;

/// The display surface could not create a visual element.
///
/// Fatal to the entity being created, never to the aquarium.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The surface has no room for another element.
    SurfaceFull { capacity: usize },
    /// The element was requested at a position that is not finite.
    NonFiniteGeometry { x: f32, y: f32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceFull { capacity } => {
                write!(f, "renderer binding unavailable: surface full ({capacity} elements)")
            }
            RenderError::NonFiniteGeometry { x, y } => {
                write!(f, "renderer binding unavailable: non-finite position ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_binding() {
        let e = RenderError::SurfaceFull { capacity: 3 };
        assert!(e.to_string().starts_with("renderer binding unavailable"));
        assert!(e.to_string().contains('3'));
    }
}
