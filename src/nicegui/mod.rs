//! NiceGUI side: the export listing and the class-to-component inference.

pub mod exports;
pub mod infer;

pub use exports::{EXPORTS_ENV, ExportRecord, load_exports, public_names};
pub use infer::{Heuristic, Inference, build_mapping, class_name_key, infer_quasar_key};
