//! Configuration loading tests

pub mod loading_test;
