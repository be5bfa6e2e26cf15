//! Project ecosystem detection.

pub mod language;

pub use language::{
    detect, detect_for_config, detect_with_override, indicators, LanguageDetection,
};
