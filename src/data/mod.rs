/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///    data.txt  (one value per line)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  line index → slot, parse first token
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────┐
///   │ PartitionedSamples │  Vec<Group> in slot order
///   └────────────────────┘
/// ```

pub mod loader;
pub mod model;
