//! Layout configuration for the bento grid component.
//!
//! Pure data shapes consumed by the page layer; they carry no runtime
//! behavior. Each breakpoint key is optional so a component can declare only
//! the breakpoints it cares about.

use serde::{Deserialize, Serialize};

/// Grid placement: column start, row start, column span, row span.
pub type BentoLayout = [u32; 4];

/// Grid shape: columns, rows.
pub type BentoMatrix = [u32; 2];

/// Per-breakpoint placements for one bento cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BentoLayouts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sm: Option<BentoLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<BentoLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lg: Option<BentoLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<BentoLayout>,
}

/// Per-breakpoint grid shapes for the bento container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BentoMatrices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sm: Option<BentoMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<BentoMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lg: Option<BentoMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<BentoMatrix>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_layouts_deserialize() {
        let layouts: BentoLayouts =
            serde_json::from_str(r#"{"md": [1, 2, 3, 2], "default": [1, 1, 2, 2]}"#).unwrap();
        assert_eq!(layouts.md, Some([1, 2, 3, 2]));
        assert_eq!(layouts.default, Some([1, 1, 2, 2]));
        assert_eq!(layouts.sm, None);
        assert_eq!(layouts.lg, None);
    }

    #[test]
    fn absent_keys_are_omitted_on_serialize() {
        let matrices = BentoMatrices {
            lg: Some([4, 3]),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&matrices).unwrap(), r#"{"lg":[4,3]}"#);
    }

    #[test]
    fn empty_object_is_a_valid_config() {
        let layouts: BentoLayouts = serde_json::from_str("{}").unwrap();
        assert_eq!(layouts, BentoLayouts::default());
    }
}
