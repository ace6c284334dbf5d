/// Data layer: core types, parsing, selection and normalization.
///
/// Architecture:
/// ```text
///  master.csv          *.dpt
///        │               │
///        ▼               ▼
///   ┌──────────────────────────┐
///   │          loader          │  text → MasterTable / SpectrumTable
///   └──────────────────────────┘
///        │               │
///        ▼               ▼
///   ┌──────────┐   ┌───────────┐
///   │  filter   │   │ normalize │  min-max → Normalized Intensity
///   └──────────┘   └───────────┘
///   Code selection
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
