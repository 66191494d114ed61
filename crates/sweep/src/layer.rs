//! Collision layers.
//!
//! Every collider lives on exactly one layer; queries carry a mask and only
//! see colliders whose layer intersects it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Bit set of collision layers.
    ///
    /// # Example
    ///
    /// ```
    /// use sweep::LayerMask;
    ///
    /// let mask = LayerMask::QUERY_DEFAULT;
    /// assert!(mask.contains(LayerMask::TERRAIN));
    /// assert!(!mask.contains(LayerMask::TRIGGER));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LayerMask: u32 {
        /// Generic solid geometry.
        const DEFAULT = 1 << 0;
        /// Walkable terrain.
        const TERRAIN = 1 << 1;
        /// Platforms a body can attach to.
        const PLATFORM = 1 << 2;
        /// Props and obstacles.
        const PROP = 1 << 3;
        /// Trigger volumes. Never blocks movement.
        const TRIGGER = 1 << 4;

        /// Everything solid; the mask used by ground probes and moves.
        const QUERY_DEFAULT = Self::DEFAULT.bits()
            | Self::TERRAIN.bits()
            | Self::PLATFORM.bits()
            | Self::PROP.bits();
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LayerMask {
    /// Returns `true` if a collider on `layer` is visible to this mask.
    #[must_use]
    pub fn sees(self, layer: LayerMask) -> bool {
        self.intersects(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_default_layer() {
        assert_eq!(LayerMask::default(), LayerMask::DEFAULT);
    }

    #[test]
    fn query_default_ignores_triggers() {
        assert!(LayerMask::QUERY_DEFAULT.sees(LayerMask::PLATFORM));
        assert!(!LayerMask::QUERY_DEFAULT.sees(LayerMask::TRIGGER));
    }

    #[test]
    fn empty_mask_sees_nothing() {
        assert!(!LayerMask::empty().sees(LayerMask::DEFAULT));
    }

    #[test]
    fn mask_serializes() {
        let json = serde_json::to_string(&LayerMask::TERRAIN).unwrap();
        let back: LayerMask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LayerMask::TERRAIN);
    }
}
