/// Data layer: core types, CSV codec, loading, and filtering.
///
/// Architecture:
/// ```text
///  tomates_calidad.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file (worker thread, newest request wins)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  codec    │  parse text → Dataset, Vec<TomatoRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  four equality pickers → filtered rows, category counts
///   └──────────┘
/// ```

pub mod codec;
pub mod filter;
pub mod loader;
pub mod model;
