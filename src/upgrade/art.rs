//! Art resolution: always exactly one texture or animation behavior.

use crate::models::{AnimFrame, AnimatedArt, Art, Behavior};

/// Pick the art behavior for `art`.
///
/// Animated art ignores its framerate: frame sequences are written at the
/// default frame duration and always loop. `ordered` only affects plain
/// texture lists.
pub(crate) fn resolve(art: &Art, ordered: bool) -> Behavior {
    match art {
        Art::Animations(anims) => {
            Behavior::AnimatedRandom { anims: anims.iter().map(anim_frame).collect() }
        }
        Art::Animation(anim) => Behavior::AnimatedSingle { anim: anim_frame(anim) },
        Art::Textures(textures) if ordered => {
            Behavior::TextureOrdered { textures: textures.clone() }
        }
        Art::Textures(textures) => Behavior::TextureRandom { textures: textures.clone() },
        Art::Texture(texture) => Behavior::TextureSingle { texture: texture.clone() },
    }
}

fn anim_frame(anim: &AnimatedArt) -> AnimFrame {
    AnimFrame::looping(anim.textures.clone())
}
