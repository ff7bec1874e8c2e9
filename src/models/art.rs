//! Art descriptors: which textures or animations an emitter draws.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel framerate meaning "one loop lasts the particle's lifetime".
pub const MATCH_LIFE: &str = "matchLife";

/// Playback rate of an animated art entry.
///
/// Deserializes from either a number or the string `"matchLife"`. Both
/// `"matchLife"` and `-1` load as [`Framerate::MatchLife`], which always
/// serializes as `-1`.
///
/// # Examples
///
/// ```
/// use particle_upgrade::models::Framerate;
///
/// let rate: Framerate = serde_json::from_str(r#""matchLife""#).unwrap();
/// assert_eq!(rate, Framerate::MatchLife);
/// assert_eq!(serde_json::to_string(&rate).unwrap(), "-1.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFramerate", into = "f64")]
pub enum Framerate {
    /// Stretch the animation over the particle's lifetime
    MatchLife,
    /// Frames per second
    Fixed(f64),
}

impl Framerate {
    /// The numeric form, with `-1` standing in for [`Framerate::MatchLife`].
    pub fn as_number(&self) -> f64 {
        match self {
            Framerate::MatchLife => -1.0,
            Framerate::Fixed(fps) => *fps,
        }
    }
}

impl From<Framerate> for f64 {
    fn from(rate: Framerate) -> Self {
        rate.as_number()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFramerate {
    Number(f64),
    Text(String),
}

impl TryFrom<RawFramerate> for Framerate {
    type Error = String;

    fn try_from(raw: RawFramerate) -> Result<Self, Self::Error> {
        match raw {
            RawFramerate::Number(n) if n == -1.0 => Ok(Framerate::MatchLife),
            RawFramerate::Number(n) => Ok(Framerate::Fixed(n)),
            RawFramerate::Text(s) if s == MATCH_LIFE => Ok(Framerate::MatchLife),
            RawFramerate::Text(s) => {
                Err(format!("invalid framerate '{}', expected a number or \"{}\"", s, MATCH_LIFE))
            }
        }
    }
}

/// One animated art entry: a frame sequence and its playback rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedArt {
    pub textures: Vec<String>,
    pub framerate: Framerate,
}

/// The art an emitter draws for each particle.
///
/// Variant order matters for untagged deserialization: strings before arrays
/// of strings before animation objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Art {
    /// A single texture name
    Texture(String),
    /// Several textures to pick from
    Textures(Vec<String>),
    /// One animated frame sequence
    Animation(AnimatedArt),
    /// Several animated frame sequences to pick from
    Animations(Vec<AnimatedArt>),
}

impl Art {
    /// Texture name used when nothing else is configured.
    pub const DEFAULT_TEXTURE: &'static str = "particle";

    /// Returns true if this art plays frame sequences.
    pub fn is_animated(&self) -> bool {
        matches!(self, Art::Animation(_) | Art::Animations(_))
    }

    /// Returns true for a list with nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Art::Textures(names) => names.is_empty(),
            Art::Animations(anims) => anims.is_empty(),
            Art::Texture(_) | Art::Animation(_) => false,
        }
    }
}

impl Default for Art {
    fn default() -> Self {
        Art::Texture(Self::DEFAULT_TEXTURE.to_string())
    }
}

impl From<&str> for Art {
    fn from(texture: &str) -> Self {
        Art::Texture(texture.to_string())
    }
}

impl From<Vec<String>> for Art {
    fn from(textures: Vec<String>) -> Self {
        Art::Textures(textures)
    }
}

impl fmt::Display for Art {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Art::Texture(name) => write!(f, "{}", name),
            Art::Textures(names) => write!(f, "{} textures", names.len()),
            Art::Animation(anim) => write!(f, "animation ({} frames)", anim.textures.len()),
            Art::Animations(anims) => write!(f, "{} animations", anims.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_art_texture() {
        let art: Art = serde_json::from_str(r#""bubble.png""#).unwrap();
        assert_eq!(art, Art::from("bubble.png"));
        assert!(!art.is_animated());
    }

    #[test]
    fn test_art_textures() {
        let art: Art = serde_json::from_str(r#"["a.png", "b.png"]"#).unwrap();
        assert_eq!(art, Art::Textures(vec!["a.png".to_string(), "b.png".to_string()]));
    }

    #[test]
    fn test_art_animation() {
        let art: Art =
            serde_json::from_str(r#"{"textures": ["f1", "f2"], "framerate": 24}"#).unwrap();
        match art {
            Art::Animation(anim) => {
                assert_eq!(anim.textures.len(), 2);
                assert_eq!(anim.framerate, Framerate::Fixed(24.0));
            }
            other => panic!("expected a single animation, got {:?}", other),
        }
    }

    #[test]
    fn test_art_animations() {
        let art: Art = serde_json::from_str(
            r#"[{"textures": ["a"], "framerate": 10}, {"textures": ["b"], "framerate": "matchLife"}]"#,
        )
        .unwrap();
        assert!(matches!(art, Art::Animations(ref a) if a.len() == 2));
        assert!(art.is_animated());
    }

    #[test]
    fn test_match_life_serializes_as_minus_one() {
        let art: Art =
            serde_json::from_str(r#"{"textures": ["a"], "framerate": "matchLife"}"#).unwrap();
        let value = serde_json::to_value(&art).unwrap();
        assert_eq!(value["framerate"], json!(-1.0));
    }

    #[test]
    fn test_minus_one_loads_as_match_life() {
        let rate: Framerate = serde_json::from_str("-1").unwrap();
        assert_eq!(rate, Framerate::MatchLife);
    }

    #[test]
    fn test_invalid_framerate_string() {
        let result = serde_json::from_str::<Framerate>(r#""fast""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_list_is_empty_art() {
        let art: Art = serde_json::from_str("[]").unwrap();
        assert!(art.is_empty());
        assert!(!Art::default().is_empty());
    }

    #[test]
    fn test_mixed_list_rejected() {
        let result = serde_json::from_str::<Art>(r#"["a.png", {"textures": ["b"], "framerate": 1}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_art() {
        assert_eq!(Art::default(), Art::Texture("particle".to_string()));
        assert_eq!(Art::default().to_string(), "particle");
    }
}
