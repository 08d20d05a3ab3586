use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Connectivity;

/// Engine setup knobs. Every field has a default so partial JSON files work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    pub connectivity: Connectivity,
    /// Run the find/augment cycle under a halving capacity threshold.
    pub capacity_scaling: bool,
    /// Abort after this many augmentations. `None` runs to saturation.
    pub max_augmentations: Option<u64>,
}

impl SegmentOptions {
    pub fn from_json_file(path: &Path) -> Result<SegmentOptions> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_capacity_scaling(mut self, capacity_scaling: bool) -> Self {
        self.capacity_scaling = capacity_scaling;
        self
    }

    pub fn with_max_augmentations(mut self, max_augmentations: Option<u64>) -> Self {
        self.max_augmentations = max_augmentations;
        self
    }
}

#[cfg(test)]
mod test {
    use super::SegmentOptions;
    use crate::types::Connectivity;

    #[test]
    fn defaults() {
        let options = SegmentOptions::default();
        assert_eq!(options.connectivity, Connectivity::Four);
        assert!(!options.capacity_scaling);
        assert_eq!(options.max_augmentations, None);
    }

    #[test]
    fn partial_json() {
        let options: SegmentOptions =
            serde_json::from_str(r#"{"connectivity": "eight"}"#).unwrap();
        assert_eq!(
            options,
            SegmentOptions::default().with_connectivity(Connectivity::Eight)
        );
        let options: SegmentOptions =
            serde_json::from_str(r#"{"capacity_scaling": true, "max_augmentations": 10}"#)
                .unwrap();
        assert!(options.capacity_scaling);
        assert_eq!(options.max_augmentations, Some(10));
        assert!(serde_json::from_str::<SegmentOptions>(r#"{"connectivity": "six"}"#).is_err());
    }
}
