//! Integration tests for commute-board.
//!
//! These run the real HTTP fetcher against a local stand-in for the TfL
//! and Open-Meteo APIs.

pub mod common;
