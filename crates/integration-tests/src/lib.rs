//! Cross-crate tests for linkboard. Everything lives under `tests/`.
