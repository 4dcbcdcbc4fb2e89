/// Data layer: header parsing, table reading and experiment loading.
///
/// Architecture:
/// ```text
///  #W0_VAL=...,INT_ID=...      ← header line
///  #pulseWidth,gridMin,polyMin ← optional column comment
///  1,183.2471,183.2471         ← rows
///        │
///        ▼
///   ┌──────────┐   ┌──────────┐
///   │  params   │   │  table    │  ParameterSet / DataTable
///   └──────────┘   └──────────┘
///        │              │
///        ▼              ▼
///   ┌──────────────────────┐
///   │  loader               │  typed Experiment, fringes correlated by row
///   └──────────────────────┘
/// ```

pub mod analysis;
pub mod error;
pub mod loader;
pub mod model;
pub mod params;
pub mod table;
